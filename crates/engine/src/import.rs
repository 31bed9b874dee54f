//! Input types for staging ingestion.
//!
//! A `RawTransaction` is one row as handed over by the extraction service,
//! already normalized to minor units. It is never persisted on its own: it
//! either becomes a staged transaction or is dropped by the month filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MoneyOre;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// `None` when the extractor produced a missing or unparseable date; such
    /// rows are always filtered out, never staged.
    pub date: Option<NaiveDate>,
    pub title: String,
    /// Signed: negative = expense, positive = credit.
    pub amount: MoneyOre,
    pub source: Option<String>,
    /// Opaque original row, kept for reference only.
    pub raw_data: Option<String>,
    pub is_shared_hint: bool,
}

impl RawTransaction {
    #[must_use]
    pub fn new(date: Option<NaiveDate>, title: impl Into<String>, amount: MoneyOre) -> Self {
        Self {
            date,
            title: title.into(),
            amount,
            source: None,
            raw_data: None,
            is_shared_hint: false,
        }
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn raw_data(mut self, raw_data: impl Into<String>) -> Self {
        self.raw_data = Some(raw_data.into());
        self
    }

    #[must_use]
    pub fn shared_hint(mut self, is_shared: bool) -> Self {
        self.is_shared_hint = is_shared;
        self
    }
}

/// Counts returned by one staging ingestion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Rows inserted into the staging area (duplicates included).
    pub staged: usize,
    /// Of the staged rows, how many were flagged as duplicates of committed
    /// ledger entries.
    pub duplicates: usize,
    /// Rows dropped because their date fell outside the target month (or was
    /// missing).
    pub filtered_by_month: usize,
}
