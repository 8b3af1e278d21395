use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::{errors::LedgerError, storage};

use super::{
    report::{self, Statistics},
    transaction::{Category, Transaction, TransactionKind, TransactionPatch},
};

/// An ordered collection of transactions backed by a plain-text file.
///
/// The in-memory sequence is the authoritative state. Every mutation rewrites
/// the backing file; failed rewrites are retried once when the ledger drops,
/// and otherwise the ledger keeps working in memory.
#[derive(Debug)]
pub struct Ledger {
    records: Vec<Transaction>,
    next_id: u64,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Ledger {
    /// Open the ledger stored at `path`, which does not need to exist.
    ///
    /// A missing, unreadable, or malformed file produces an empty ledger
    /// rather than an error; ids continue from the highest id on file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match storage::load_records(&path) {
            Ok(records) => records,
            Err(LedgerError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger file yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read ledger file, starting empty");
                Vec::new()
            }
        };
        let next_id = records.iter().map(|txn| txn.id).max().map_or(1, |max| max + 1);
        Self {
            records,
            next_id,
            path: Some(path),
            dirty: false,
        }
    }

    /// A ledger with no backing file. Mutations stay in memory.
    pub fn in_memory() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            path: None,
            dirty: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.records
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.records.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new transaction under a freshly allocated id.
    ///
    /// Amounts are recorded as given; zero and negative values are legal.
    pub fn add(
        &mut self,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        note: impl Into<String>,
        expires_on: Option<NaiveDate>,
    ) -> &Transaction {
        let id = self.allocate_id();
        self.records
            .push(Transaction::new(id, amount, kind, category, note, expires_on));
        self.autosave();
        self.records.last().expect("record was just appended")
    }

    /// Remove the record with the given id, returning it when it existed.
    /// Remaining ids are untouched and the id counter never rewinds.
    pub fn delete(&mut self, id: u64) -> Option<Transaction> {
        let index = self.records.iter().position(|txn| txn.id == id)?;
        let removed = self.records.remove(index);
        self.autosave();
        Some(removed)
    }

    /// Apply a patch to the record with the given id. Returns the updated
    /// record, or `None` (leaving the ledger untouched) for an unknown id.
    pub fn update(&mut self, id: u64, patch: TransactionPatch) -> Option<&Transaction> {
        let index = self.records.iter().position(|txn| txn.id == id)?;
        patch.apply_to(&mut self.records[index]);
        self.autosave();
        Some(&self.records[index])
    }

    pub fn total_income(&self) -> f64 {
        self.total_income_as_of(today())
    }

    pub fn total_income_as_of(&self, today: NaiveDate) -> f64 {
        self.sum_active(TransactionKind::Income, today)
    }

    pub fn total_expense(&self) -> f64 {
        self.total_expense_as_of(today())
    }

    pub fn total_expense_as_of(&self, today: NaiveDate) -> f64 {
        self.sum_active(TransactionKind::Expense, today)
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics_as_of(today())
    }

    pub fn statistics_as_of(&self, today: NaiveDate) -> Statistics {
        report::statistics(&self.records, today)
    }

    /// Records whose expiry date has passed. These stay listed but are
    /// excluded from every total and statistic.
    pub fn expired(&self) -> Vec<&Transaction> {
        self.expired_as_of(today())
    }

    pub fn expired_as_of(&self, today: NaiveDate) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|txn| txn.is_expired(today))
            .collect()
    }

    /// Matches the category label or the note text. Expired records are
    /// searchable like any other.
    pub fn search_by_keyword(&self, term: &str) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|txn| txn.matches_keyword(term))
            .collect()
    }

    /// Matches records whose kind label equals `label` (`income`/`expense`).
    /// Unknown labels match nothing.
    pub fn search_by_kind_label(&self, label: &str) -> Vec<&Transaction> {
        match TransactionKind::from_label(label) {
            Some(kind) => self.records.iter().filter(|txn| txn.kind == kind).collect(),
            None => Vec::new(),
        }
    }

    /// Exact amount equality is the search contract; no epsilon is applied.
    #[allow(clippy::float_cmp)]
    pub fn search_by_amount(&self, amount: f64) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|txn| txn.amount == amount)
            .collect()
    }

    pub fn search_by_note(&self, substring: &str) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|txn| txn.note.contains(substring))
            .collect()
    }

    /// Rewrite the backing file now. A ledger without a backing file
    /// succeeds trivially.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        if let Some(path) = self.path.as_ref() {
            storage::save_records(path, &self.records)?;
        }
        self.dirty = false;
        Ok(())
    }

    fn autosave(&mut self) {
        self.dirty = true;
        if let Err(err) = self.save() {
            warn!(%err, "ledger autosave failed, keeping changes in memory");
        }
    }

    fn sum_active(&self, kind: TransactionKind, today: NaiveDate) -> f64 {
        self.records
            .iter()
            .filter(|txn| txn.kind == kind && !txn.is_expired(today))
            .map(|txn| txn.amount)
            .sum()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Drop for Ledger {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(err) = self.save() {
                warn!(%err, "final ledger flush failed");
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
