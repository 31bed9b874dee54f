//! Import & reconciliation engine.
//!
//! The pipeline, in order: an extracted batch of [`RawTransaction`]s is
//! staged per `(user, month)` ([`Engine::stage_import`]), each row flagged
//! when it duplicates a committed [`LedgerEntry`]; staged rows are reviewed
//! and edited in place; committing the month ([`Engine::commit_month`])
//! turns the non-duplicate rows into permanent entries and clears the
//! staging area.

pub use commands::{NewEntryCmd, StageImportCmd, UpdateStagedCmd};
pub use dedup::find_duplicate;
pub use error::EngineError;
pub use import::{ImportOutcome, RawTransaction};
pub use ledger::{EntryOrigin, LedgerEntry, MonthSummary};
pub use money::MoneyOre;
pub use month::YearMonth;
pub use ops::{Engine, EngineBuilder};
pub use staged::StagedTransaction;

mod commands;
mod dedup;
mod error;
mod import;
mod ledger;
mod money;
mod month;
mod ops;
mod staged;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
