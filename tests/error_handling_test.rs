use std::fs;

use cashbook::cli::render;
use cashbook::ledger::{Category, Ledger, TransactionKind, TransactionPatch};
use tempfile::tempdir;

#[test]
fn missing_ids_are_reported_not_fatal() {
    let mut ledger = Ledger::in_memory();
    ledger.add(10.0, TransactionKind::Income, Category::Others, "x", None);

    assert!(ledger.delete(999).is_none());
    assert!(ledger
        .update(
            999,
            TransactionPatch {
                amount: Some(1.0),
                ..TransactionPatch::default()
            }
        )
        .is_none());
    assert_eq!(ledger.len(), 1, "failed lookups leave the ledger untouched");

    assert_eq!(render::not_found(999), "No transaction with id 999.");
}

#[test]
fn zero_and_negative_amounts_are_recorded_as_given() {
    let mut ledger = Ledger::in_memory();
    ledger.add(0.0, TransactionKind::Income, Category::Others, "nothing", None);
    ledger.add(
        -25.0,
        TransactionKind::Expense,
        Category::Shopping,
        "refunded jacket",
        None,
    );

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.search_by_amount(0.0).len(), 1);
    assert_eq!(ledger.search_by_amount(-25.0).len(), 1);
}

#[test]
fn unreadable_path_opens_as_an_empty_ledger() {
    let ledger = Ledger::open("//invalid/path/file.txt");

    assert!(ledger.is_empty());
    assert_eq!(ledger.total_income(), 0.0);
    assert_eq!(ledger.total_expense(), 0.0);
    assert!(ledger.search_by_keyword("anything").is_empty());
}

#[test]
fn unwritable_ledger_keeps_working_in_memory() {
    let temp = tempdir().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let path = blocker.join("ledger.jsonl");
    let mut ledger = Ledger::open(&path);
    assert!(ledger.is_empty());

    ledger.add(
        10.0,
        TransactionKind::Expense,
        Category::Food,
        "snack",
        None,
    );
    assert_eq!(ledger.len(), 1, "the record stays in memory");
    assert!(ledger.save().is_err());

    drop(ledger);
    assert!(!path.exists());
}

#[test]
fn malformed_file_starts_an_empty_session() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ledger.jsonl");
    fs::write(&path, "this is not json\n").unwrap();

    let mut ledger = Ledger::open(&path);
    assert!(ledger.is_empty());

    ledger.add(
        5.0,
        TransactionKind::Expense,
        Category::Study,
        "notebook",
        None,
    );
    assert_eq!(ledger.len(), 1);

    let reloaded = Ledger::open(&path);
    assert_eq!(reloaded.len(), 1, "the next save replaces the bad file");
}
