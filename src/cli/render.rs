//! Turns ledger data into the exact text the console prints.
//!
//! Keeping rendering separate from printing lets the wording be asserted in
//! tests without capturing stdout.

use crate::ledger::{Statistics, Transaction, DATE_FORMAT};

pub const EMPTY_LEDGER: &str = "No transactions recorded.";

/// One listing row: id, kind, category, amount, then the free-form note.
pub fn transaction_line(txn: &Transaction) -> String {
    let mut line = format!(
        "[id {}] {:<7} {:<14} {:>10.2}  {}",
        txn.id,
        txn.kind.label(),
        txn.category.label(),
        txn.amount,
        txn.note
    );
    if let Some(date) = txn.expires_on {
        line.push_str(&format!("  (expires {})", date.format(DATE_FORMAT)));
    }
    line
}

pub fn transaction_listing(records: &[Transaction]) -> String {
    if records.is_empty() {
        return EMPTY_LEDGER.to_string();
    }
    records
        .iter()
        .map(transaction_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Search output always ends with a count line, even when nothing matched.
pub fn search_results(matches: &[&Transaction]) -> String {
    if matches.is_empty() {
        return "No matching records found.".to_string();
    }
    let mut lines: Vec<String> = matches.iter().map(|txn| transaction_line(txn)).collect();
    lines.push(format!("Found {} matching record(s).", matches.len()));
    lines.join("\n")
}

pub fn not_found(id: u64) -> String {
    format!("No transaction with id {id}.")
}

pub fn statistics_block(stats: &Statistics) -> String {
    let mut lines = vec![
        format!("Total income:  {:.2}", stats.total_income),
        format!("Total expense: {:.2}", stats.total_expense),
        format!("Net:           {:.2}", stats.net),
    ];
    if !stats.expense_by_category.is_empty() {
        lines.push("Expenses by category:".to_string());
        for entry in &stats.expense_by_category {
            lines.push(format!(
                "  {:<14} {:>10.2}  ({} record(s))",
                entry.category.label(),
                entry.total,
                entry.count
            ));
        }
    }
    lines.join("\n")
}

pub fn expiry_report(expired: &[&Transaction]) -> String {
    if expired.is_empty() {
        return "No expired transactions.".to_string();
    }
    let mut lines: Vec<String> = expired.iter().map(|txn| transaction_line(txn)).collect();
    lines.push(format!(
        "{} transaction(s) past their expiry date; they are excluded from totals and statistics.",
        expired.len()
    ));
    lines.join("\n")
}
