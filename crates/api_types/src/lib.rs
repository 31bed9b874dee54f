use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod extractor {
    use super::*;

    /// One extraction script exposed by the external service.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExtractorView {
        pub name: String,
        pub description: String,
        pub supported_formats: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExtractorListResponse {
        pub extractors: Vec<ExtractorView>,
    }
}

pub mod import {
    use super::*;

    /// Request body for staging one uploaded statement.
    ///
    /// The file travels base64-encoded inside the JSON body; the server
    /// forwards the decoded bytes to the extraction service.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImportStage {
        /// Target month in packed `YYYYMM` form (e.g. `202603`).
        pub year_month: i32,
        /// Name of the extraction script to run.
        pub extractor: String,
        pub file_name: String,
        pub file_base64: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImportStageResponse {
        /// Rows inserted into the staging area (duplicates included).
        pub staged: u64,
        pub duplicates: u64,
        /// Rows dropped because their date fell outside the target month.
        pub filtered_by_month: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommitMonth {
        pub year_month: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommitResponse {
        pub committed: u64,
    }
}

pub mod staged {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StagedList {
        pub year_month: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StagedView {
        pub id: Uuid,
        pub year_month: i32,
        pub date: NaiveDate,
        pub title: String,
        /// Signed amount in minor units (negative = expense).
        pub amount_ore: i64,
        pub source: Option<String>,
        pub category: Option<String>,
        pub notes: Option<String>,
        pub is_shared: bool,
        pub collect_to_me_ore: i64,
        pub collect_from_me_ore: i64,
        pub is_duplicate: bool,
        /// Ledger entry this row duplicates, when flagged.
        pub duplicate_of: Option<Uuid>,
        /// Position within the uploaded file, for display ordering only.
        pub sort_index: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StagedListResponse {
        pub staged: Vec<StagedView>,
    }

    /// Partial update of one staged row.
    ///
    /// Absent fields are left unchanged. An empty `category`/`notes` string
    /// clears the field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StagedUpdate {
        pub title: Option<String>,
        pub amount_ore: Option<i64>,
        pub date: Option<NaiveDate>,
        pub category: Option<String>,
        pub notes: Option<String>,
        pub is_shared: Option<bool>,
        pub collect_to_me_ore: Option<i64>,
        pub collect_from_me_ore: Option<i64>,
    }

    /// Apply one category to a set of staged rows; `None` (or empty) clears
    /// the category on every row.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StagedBulkCategory {
        pub ids: Vec<Uuid>,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StagedBulkCategoryResponse {
        pub updated: u64,
    }
}

pub mod ledger {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerList {
        pub year_month: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerEntryView {
        pub id: Uuid,
        pub year_month: i32,
        pub date: NaiveDate,
        pub title: String,
        pub amount_ore: i64,
        pub source: Option<String>,
        pub category: Option<String>,
        pub notes: Option<String>,
        pub is_shared: bool,
        pub collect_to_me_ore: i64,
        pub collect_from_me_ore: i64,
        /// `"manual"` or `"imported"`.
        pub origin: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerListResponse {
        pub entries: Vec<LedgerEntryView>,
    }

    /// Manual ledger entry creation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub year_month: i32,
        pub date: NaiveDate,
        pub title: String,
        pub amount_ore: i64,
        pub source: Option<String>,
        pub category: Option<String>,
        pub notes: Option<String>,
        pub is_shared: Option<bool>,
        pub collect_to_me_ore: Option<i64>,
        pub collect_from_me_ore: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryCreated {
        pub id: Uuid,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthSummaryGet {
        pub year_month: i32,
    }

    /// Month totals in minor units. `personal_expenses_ore` counts shared
    /// rows at half their amount (floor division); `shared_expenses_ore` is
    /// the full shared total.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthSummaryView {
        pub income_ore: i64,
        pub expenses_ore: i64,
        pub shared_expenses_ore: i64,
        pub personal_expenses_ore: i64,
    }
}
