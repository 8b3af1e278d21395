use cashbook::cli::render;
use cashbook::ledger::{Category, Ledger, TransactionKind};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded() -> Ledger {
    let mut ledger = Ledger::in_memory();
    ledger.add(
        1000.0,
        TransactionKind::Income,
        Category::Wages,
        "salary",
        Some(date(2099, 1, 1)),
    );
    ledger.add(
        500.0,
        TransactionKind::Expense,
        Category::Food,
        "old groceries",
        Some(date(2020, 1, 1)),
    );
    ledger.add(
        200.0,
        TransactionKind::Expense,
        Category::Transportation,
        "metro card",
        None,
    );
    ledger
}

#[test]
fn expired_records_are_reported_but_kept() {
    let ledger = seeded();
    let today = date(2026, 8, 22);

    let expired = ledger.expired_as_of(today);
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, 2);

    assert_eq!(ledger.len(), 3, "expiry never removes records");
}

#[test]
fn totals_and_statistics_skip_expired_records() {
    let ledger = seeded();
    let today = date(2026, 8, 22);

    assert_eq!(ledger.total_income_as_of(today), 1000.0);
    assert_eq!(ledger.total_expense_as_of(today), 200.0);

    let stats = ledger.statistics_as_of(today);
    assert_eq!(stats.total_expense, 200.0);
    assert_eq!(stats.expense_by_category.len(), 1);
    assert_eq!(
        stats.expense_by_category[0].category,
        Category::Transportation
    );
}

#[test]
fn expiry_is_strictly_before_today() {
    let mut ledger = Ledger::in_memory();
    let today = date(2026, 8, 22);
    ledger.add(
        50.0,
        TransactionKind::Expense,
        Category::Food,
        "expires today",
        Some(today),
    );

    assert!(ledger.expired_as_of(today).is_empty());
    assert_eq!(ledger.total_expense_as_of(today), 50.0);
    assert_eq!(
        ledger.expired_as_of(date(2026, 8, 23)).len(),
        1,
        "the day after, it is expired"
    );
}

#[test]
fn listings_and_searches_still_show_expired_records() {
    let ledger = seeded();

    let listing = render::transaction_listing(ledger.transactions());
    assert!(listing.contains("old groceries"));
    assert!(listing.contains("(expires 2020-01-01)"));

    assert_eq!(ledger.search_by_keyword("groceries").len(), 1);
    assert_eq!(ledger.search_by_amount(500.0).len(), 1);
}

#[test]
fn expiry_report_wording_counts_expired_records() {
    let ledger = seeded();
    let today = date(2026, 8, 22);

    let report = render::expiry_report(&ledger.expired_as_of(today));
    assert!(report.contains("[id 2]"));
    assert!(report.ends_with(
        "1 transaction(s) past their expiry date; they are excluded from totals and statistics."
    ));

    let none = Ledger::in_memory();
    assert_eq!(
        render::expiry_report(&none.expired_as_of(today)),
        "No expired transactions."
    );
}
