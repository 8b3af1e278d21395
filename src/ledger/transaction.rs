use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted by prompts and command arguments. Parsing is lenient
/// about zero padding, so `2026-6-1` and `2026-06-01` both resolve.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded income or expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        id: u64,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        note: impl Into<String>,
        expires_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            amount,
            kind,
            category,
            note: note.into(),
            expires_on,
        }
    }

    /// A record expires once its date lies strictly before `today`.
    /// Records without an expiry date never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on.is_some_and(|date| date < today)
    }

    /// Keyword search matches the category label (case-insensitively) or the
    /// note text (case-sensitive containment, like `search note`).
    pub fn matches_keyword(&self, term: &str) -> bool {
        let needle = term.to_ascii_lowercase();
        self.category.label().contains(needle.as_str()) || self.note.contains(term)
    }
}

/// Whether a transaction adds to or draws from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
            .copied()
    }
}

/// Closed classification of a transaction's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Wages,
    Food,
    Transportation,
    Study,
    Travel,
    Shopping,
    Medical,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Wages,
        Category::Food,
        Category::Transportation,
        Category::Study,
        Category::Travel,
        Category::Shopping,
        Category::Medical,
        Category::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Wages => "wages",
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Study => "study",
            Category::Travel => "travel",
            Category::Shopping => "shopping",
            Category::Medical => "medical",
            Category::Others => "others",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|category| category.label().eq_ignore_ascii_case(label.trim()))
            .copied()
    }
}

/// Per-field overrides applied by the edit operation. A `None` field keeps
/// the current value; `expires_on: Some(None)` clears the expiry date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    pub note: Option<String>,
    pub expires_on: Option<Option<NaiveDate>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.note.is_none()
            && self.expires_on.is_none()
    }

    pub fn apply_to(&self, txn: &mut Transaction) {
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(category) = self.category {
            txn.category = category;
        }
        if let Some(note) = &self.note {
            txn.note = note.clone();
        }
        if let Some(expires_on) = self.expires_on {
            txn.expires_on = expires_on;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expiry_is_strictly_before_today() {
        let today = date(2026, 8, 22);
        let mut txn = Transaction::new(
            1,
            10.0,
            TransactionKind::Expense,
            Category::Food,
            "lunch",
            Some(date(2026, 8, 21)),
        );
        assert!(txn.is_expired(today));

        txn.expires_on = Some(today);
        assert!(!txn.is_expired(today), "same-day expiry is still active");

        txn.expires_on = Some(date(2026, 8, 23));
        assert!(!txn.is_expired(today));

        txn.expires_on = None;
        assert!(!txn.is_expired(today), "no expiry date never expires");
    }

    #[test]
    fn lenient_date_parsing_accepts_unpadded_fields() {
        let parsed = NaiveDate::parse_from_str("2026-6-1", DATE_FORMAT).unwrap();
        assert_eq!(parsed, date(2026, 6, 1));
    }

    #[test]
    fn labels_roundtrip_through_from_label() {
        for kind in TransactionKind::ALL {
            assert_eq!(TransactionKind::from_label(kind.label()), Some(kind));
        }
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(TransactionKind::from_label("INCOME"), Some(TransactionKind::Income));
        assert_eq!(Category::from_label(" Food "), Some(Category::Food));
        assert_eq!(Category::from_label("groceries"), None);
    }

    #[test]
    fn keyword_matches_category_label_or_note() {
        let txn = Transaction::new(
            3,
            200.0,
            TransactionKind::Expense,
            Category::Transportation,
            "subway commute",
            None,
        );
        assert!(txn.matches_keyword("transport"));
        assert!(txn.matches_keyword("TRANSPORT"), "label match ignores case");
        assert!(txn.matches_keyword("subway"));
        assert!(!txn.matches_keyword("Subway"), "note match is case-sensitive");
        assert!(!txn.matches_keyword("food"));
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut txn = Transaction::new(
            7,
            100.0,
            TransactionKind::Expense,
            Category::Food,
            "original",
            Some(date(2026, 10, 1)),
        );
        let patch = TransactionPatch {
            amount: Some(250.0),
            note: Some("updated".into()),
            expires_on: Some(None),
            ..TransactionPatch::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut txn);

        assert_eq!(txn.amount, 250.0);
        assert_eq!(txn.note, "updated");
        assert_eq!(txn.expires_on, None);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.id, 7, "ids are never patched");
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(TransactionPatch::default().is_empty());
    }
}
