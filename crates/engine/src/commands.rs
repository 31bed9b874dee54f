//! Command structs for engine operations.
//!
//! These types group parameters for write operations (staging ingestion,
//! staged-row edits, manual entry creation), keeping call sites readable and
//! avoiding long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{MoneyOre, RawTransaction, YearMonth};

/// Stage one extracted batch for a user and target month.
#[derive(Clone, Debug)]
pub struct StageImportCmd {
    pub user_id: String,
    pub year_month: YearMonth,
    /// Rows as returned by the extraction service, in file order.
    pub transactions: Vec<RawTransaction>,
}

impl StageImportCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, year_month: YearMonth) -> Self {
        Self {
            user_id: user_id.into(),
            year_month,
            transactions: Vec::new(),
        }
    }

    #[must_use]
    pub fn transactions(mut self, transactions: Vec<RawTransaction>) -> Self {
        self.transactions = transactions;
        self
    }

    #[must_use]
    pub fn transaction(mut self, transaction: RawTransaction) -> Self {
        self.transactions.push(transaction);
        self
    }
}

/// Partial update of a staged row.
///
/// `None` fields are left unchanged. For `category` and `notes`, passing an
/// empty (or whitespace-only) string clears the field.
#[derive(Clone, Debug)]
pub struct UpdateStagedCmd {
    pub user_id: String,
    pub staged_id: Uuid,

    pub title: Option<String>,
    pub amount: Option<MoneyOre>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_shared: Option<bool>,
    pub collect_to_me: Option<MoneyOre>,
    pub collect_from_me: Option<MoneyOre>,
}

impl UpdateStagedCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, staged_id: Uuid) -> Self {
        Self {
            user_id: user_id.into(),
            staged_id,
            title: None,
            amount: None,
            date: None,
            category: None,
            notes: None,
            is_shared: None,
            collect_to_me: None,
            collect_from_me: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: MoneyOre) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn is_shared(mut self, is_shared: bool) -> Self {
        self.is_shared = Some(is_shared);
        self
    }

    #[must_use]
    pub fn collect_to_me(mut self, amount: MoneyOre) -> Self {
        self.collect_to_me = Some(amount);
        self
    }

    #[must_use]
    pub fn collect_from_me(mut self, amount: MoneyOre) -> Self {
        self.collect_from_me = Some(amount);
        self
    }
}

/// Create a manual ledger entry.
#[derive(Clone, Debug)]
pub struct NewEntryCmd {
    pub user_id: String,
    pub year_month: YearMonth,
    pub date: NaiveDate,
    pub title: String,
    pub amount: MoneyOre,
    pub source: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_shared: bool,
    pub collect_to_me: MoneyOre,
    pub collect_from_me: MoneyOre,
}

impl NewEntryCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        year_month: YearMonth,
        date: NaiveDate,
        title: impl Into<String>,
        amount: MoneyOre,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            year_month,
            date,
            title: title.into(),
            amount,
            source: None,
            category: None,
            notes: None,
            is_shared: false,
            collect_to_me: MoneyOre::ZERO,
            collect_from_me: MoneyOre::ZERO,
        }
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn is_shared(mut self, is_shared: bool) -> Self {
        self.is_shared = is_shared;
        self
    }

    #[must_use]
    pub fn collect_to_me(mut self, amount: MoneyOre) -> Self {
        self.collect_to_me = amount;
        self
    }

    #[must_use]
    pub fn collect_from_me(mut self, amount: MoneyOre) -> Self {
        self.collect_from_me = amount;
        self
    }
}
