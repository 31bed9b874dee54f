//! Ledger entry primitives.
//!
//! A `LedgerEntry` is a committed, permanent record. The import core writes
//! entries (commit, manual create) and reads them (duplicate detection,
//! month listing); the wider ledger/dashboard machinery owns everything
//! else about them.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyOre, YearMonth, util::parse_uuid};

/// Provenance of a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Entered by hand through the ledger surface.
    Manual,
    /// Produced by committing a staged import.
    Imported,
}

impl EntryOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Imported => "imported",
        }
    }
}

impl TryFrom<&str> for EntryOrigin {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "manual" => Ok(Self::Manual),
            "imported" => Ok(Self::Imported),
            other => Err(EngineError::Validation(format!(
                "invalid entry origin: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
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
    pub origin: EntryOrigin,
    pub created_at: DateTime<Utc>,
}

/// Month totals, all in minor units.
///
/// `personal_expenses` counts shared rows at half their amount (floor
/// division — the odd øre goes to the partner); `shared_expenses` is the
/// full sum of shared rows for "shared total" reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub income: MoneyOre,
    pub expenses: MoneyOre,
    pub shared_expenses: MoneyOre,
    pub personal_expenses: MoneyOre,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub year_month: i32,
    pub date: Date,
    pub title: String,
    pub amount_ore: i64,
    pub source: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_shared: bool,
    pub collect_to_me_ore: i64,
    pub collect_from_me_ore: i64,
    pub origin: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&LedgerEntry> for ActiveModel {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            user_id: ActiveValue::Set(entry.user_id.clone()),
            year_month: ActiveValue::Set(entry.year_month.packed()),
            date: ActiveValue::Set(entry.date),
            title: ActiveValue::Set(entry.title.clone()),
            amount_ore: ActiveValue::Set(entry.amount.ore()),
            source: ActiveValue::Set(entry.source.clone()),
            category: ActiveValue::Set(entry.category.clone()),
            notes: ActiveValue::Set(entry.notes.clone()),
            is_shared: ActiveValue::Set(entry.is_shared),
            collect_to_me_ore: ActiveValue::Set(entry.collect_to_me.ore()),
            collect_from_me_ore: ActiveValue::Set(entry.collect_from_me.ore()),
            origin: ActiveValue::Set(entry.origin.as_str().to_string()),
            created_at: ActiveValue::Set(entry.created_at),
        }
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "ledger entry")?,
            user_id: model.user_id,
            year_month: YearMonth::from_packed(model.year_month)?,
            date: model.date,
            title: model.title,
            amount: MoneyOre::new(model.amount_ore),
            source: model.source,
            category: model.category,
            notes: model.notes,
            is_shared: model.is_shared,
            collect_to_me: MoneyOre::new(model.collect_to_me_ore),
            collect_from_me: MoneyOre::new(model.collect_from_me_ore),
            origin: EntryOrigin::try_from(model.origin.as_str())?,
            created_at: model.created_at,
        })
    }
}
