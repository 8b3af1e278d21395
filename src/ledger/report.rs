use std::cmp::Ordering;

use chrono::NaiveDate;

use super::transaction::{Category, Transaction, TransactionKind};

/// Aggregate view over the non-expired portion of a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    /// Expense totals per category, largest first.
    pub expense_by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: usize,
}

/// Compute totals and the per-category expense breakdown as of `today`.
/// Records whose expiry date has passed are left out.
pub fn statistics(records: &[Transaction], today: NaiveDate) -> Statistics {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut expense_by_category: Vec<CategoryTotal> = Vec::new();

    for txn in records.iter().filter(|txn| !txn.is_expired(today)) {
        match txn.kind {
            TransactionKind::Income => total_income += txn.amount,
            TransactionKind::Expense => {
                total_expense += txn.amount;
                match expense_by_category
                    .iter_mut()
                    .find(|row| row.category == txn.category)
                {
                    Some(row) => {
                        row.total += txn.amount;
                        row.count += 1;
                    }
                    None => expense_by_category.push(CategoryTotal {
                        category: txn.category,
                        total: txn.amount,
                        count: 1,
                    }),
                }
            }
        }
    }

    expense_by_category
        .sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    Statistics {
        total_income,
        total_expense,
        net: total_income - total_expense,
        expense_by_category,
    }
}
