//! Staged transaction primitives.
//!
//! A `StagedTransaction` is an imported row waiting for review. It lives in
//! the per-(user, month) staging area from ingestion until the month is
//! committed or re-imported; it never survives either.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyOre, YearMonth, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedTransaction {
    pub id: Uuid,
    pub user_id: String,
    /// The month this row targets. Not derived from `date`: a re-import
    /// narrows rows to the requested month instead of re-homing them.
    pub year_month: YearMonth,
    pub date: NaiveDate,
    pub title: String,
    pub amount: MoneyOre,
    pub source: Option<String>,
    pub raw_data: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_shared: bool,
    pub collect_to_me: MoneyOre,
    pub collect_from_me: MoneyOre,
    pub is_duplicate: bool,
    /// Ledger entry this row duplicates, when `is_duplicate` is set.
    pub duplicate_of: Option<Uuid>,
    /// Position within the uploaded file, for display ordering only.
    pub sort_index: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staged_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub year_month: i32,
    pub date: Date,
    pub title: String,
    pub amount_ore: i64,
    pub source: Option<String>,
    pub raw_data: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_shared: bool,
    pub collect_to_me_ore: i64,
    pub collect_from_me_ore: i64,
    pub is_duplicate: bool,
    pub duplicate_of: Option<String>,
    pub sort_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&StagedTransaction> for ActiveModel {
    fn from(row: &StagedTransaction) -> Self {
        Self {
            id: ActiveValue::Set(row.id.to_string()),
            user_id: ActiveValue::Set(row.user_id.clone()),
            year_month: ActiveValue::Set(row.year_month.packed()),
            date: ActiveValue::Set(row.date),
            title: ActiveValue::Set(row.title.clone()),
            amount_ore: ActiveValue::Set(row.amount.ore()),
            source: ActiveValue::Set(row.source.clone()),
            raw_data: ActiveValue::Set(row.raw_data.clone()),
            category: ActiveValue::Set(row.category.clone()),
            notes: ActiveValue::Set(row.notes.clone()),
            is_shared: ActiveValue::Set(row.is_shared),
            collect_to_me_ore: ActiveValue::Set(row.collect_to_me.ore()),
            collect_from_me_ore: ActiveValue::Set(row.collect_from_me.ore()),
            is_duplicate: ActiveValue::Set(row.is_duplicate),
            duplicate_of: ActiveValue::Set(row.duplicate_of.map(|id| id.to_string())),
            sort_index: ActiveValue::Set(row.sort_index),
        }
    }
}

impl TryFrom<Model> for StagedTransaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "staged transaction")?,
            user_id: model.user_id,
            year_month: YearMonth::from_packed(model.year_month)?,
            date: model.date,
            title: model.title,
            amount: MoneyOre::new(model.amount_ore),
            source: model.source,
            raw_data: model.raw_data,
            category: model.category,
            notes: model.notes,
            is_shared: model.is_shared,
            collect_to_me: MoneyOre::new(model.collect_to_me_ore),
            collect_from_me: MoneyOre::new(model.collect_from_me_ore),
            is_duplicate: model.is_duplicate,
            duplicate_of: model
                .duplicate_of
                .map(|id| parse_uuid(&id, "ledger entry"))
                .transpose()?,
            sort_index: model.sort_index,
        })
    }
}
