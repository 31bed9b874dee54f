//! Staging ingestion and the review/edit surface.

use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, ImportOutcome, MoneyOre, RawTransaction, ResultEngine, StageImportCmd,
    StagedTransaction, UpdateStagedCmd, YearMonth, dedup::find_duplicate, staged,
    util::validate_settlements,
};

use super::{Engine, apply_optional_text_patch, normalize_optional_text, with_tx};

impl Engine {
    /// Stages an extracted batch for `(user, month)`.
    ///
    /// Rows whose date is missing or falls outside the target month are
    /// dropped and counted, never re-homed under their natural month. Any
    /// previously staged rows for the key are purged first, so re-processing
    /// a month is idempotent. Each surviving row is checked against the
    /// committed ledger for the month and flagged when it duplicates an
    /// entry; rows are **not** checked against each other, so two identical
    /// rows in one upload both stage as non-duplicates.
    ///
    /// Purge, duplicate flagging, and insertion run in one database
    /// transaction: a failure leaves the staging area untouched.
    pub async fn stage_import(&self, cmd: StageImportCmd) -> ResultEngine<ImportOutcome> {
        let StageImportCmd {
            user_id,
            year_month,
            transactions,
        } = cmd;

        let mut kept: Vec<(NaiveDate, RawTransaction)> = Vec::with_capacity(transactions.len());
        let mut filtered_by_month = 0usize;
        for row in transactions {
            match row.date {
                Some(date) if year_month.contains(date) => kept.push((date, row)),
                _ => filtered_by_month += 1,
            }
        }

        with_tx!(self, |db_tx| {
            let purged = staged::Entity::delete_many()
                .filter(staged::Column::UserId.eq(user_id.clone()))
                .filter(staged::Column::YearMonth.eq(year_month.packed()))
                .exec(&db_tx)
                .await?
                .rows_affected;
            if purged > 0 {
                tracing::debug!(%user_id, %year_month, purged, "purged stale staged rows");
            }

            let ledger = self
                .load_month_entries(&db_tx, &user_id, year_month)
                .await?;

            let staged_count = kept.len();
            let mut duplicates = 0usize;
            for (index, (date, row)) in kept.iter().enumerate() {
                let duplicate_of = find_duplicate(year_month, row, &ledger).map(|entry| entry.id);
                if duplicate_of.is_some() {
                    duplicates += 1;
                }

                let staged_row = StagedTransaction {
                    id: Uuid::new_v4(),
                    user_id: user_id.clone(),
                    year_month,
                    date: *date,
                    title: row.title.clone(),
                    amount: row.amount,
                    source: row.source.clone(),
                    raw_data: row.raw_data.clone(),
                    category: None,
                    notes: None,
                    is_shared: row.is_shared_hint,
                    collect_to_me: MoneyOre::ZERO,
                    collect_from_me: MoneyOre::ZERO,
                    is_duplicate: duplicate_of.is_some(),
                    duplicate_of,
                    sort_index: index as i32,
                };
                staged::ActiveModel::from(&staged_row).insert(&db_tx).await?;
            }

            tracing::info!(
                %user_id,
                %year_month,
                staged = staged_count,
                duplicates,
                filtered_by_month,
                "staged import batch"
            );

            Ok(ImportOutcome {
                staged: staged_count,
                duplicates,
                filtered_by_month,
            })
        })
    }

    /// Lists the staged rows for `(user, month)` in file order.
    pub async fn list_staged(
        &self,
        user_id: &str,
        year_month: YearMonth,
    ) -> ResultEngine<Vec<StagedTransaction>> {
        let models = staged::Entity::find()
            .filter(staged::Column::UserId.eq(user_id))
            .filter(staged::Column::YearMonth.eq(year_month.packed()))
            .order_by_asc(staged::Column::SortIndex)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(StagedTransaction::try_from(model)?);
        }
        Ok(out)
    }

    /// Applies a partial update to one staged row and returns the result.
    ///
    /// Absent fields are left unchanged; empty category/notes patches clear
    /// the field. The settlement invariant is validated against the row as
    /// it would be after the patch (including an amount change), and a
    /// violation rejects the whole update.
    pub async fn update_staged(&self, cmd: UpdateStagedCmd) -> ResultEngine<StagedTransaction> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_staged(&db_tx, &cmd.user_id, cmd.staged_id)
                .await?;
            let mut row = StagedTransaction::try_from(model)?;

            if let Some(title) = cmd.title.as_deref() {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return Err(EngineError::Validation(
                        "title must not be empty".to_string(),
                    ));
                }
                row.title = trimmed.to_string();
            }
            if let Some(amount) = cmd.amount {
                row.amount = amount;
            }
            if let Some(date) = cmd.date {
                row.date = date;
            }
            row.category = apply_optional_text_patch(row.category, cmd.category.as_deref());
            row.notes = apply_optional_text_patch(row.notes, cmd.notes.as_deref());
            if let Some(is_shared) = cmd.is_shared {
                row.is_shared = is_shared;
            }
            if let Some(collect_to_me) = cmd.collect_to_me {
                row.collect_to_me = collect_to_me;
            }
            if let Some(collect_from_me) = cmd.collect_from_me {
                row.collect_from_me = collect_from_me;
            }

            validate_settlements(row.amount, row.collect_to_me, row.collect_from_me)?;

            staged::ActiveModel::from(&row).update(&db_tx).await?;
            Ok(row)
        })
    }

    /// Deletes one staged row (used to discard unwanted or duplicate rows
    /// before commit).
    pub async fn delete_staged(&self, user_id: &str, staged_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_staged(&db_tx, user_id, staged_id).await?;
            staged::Entity::delete_by_id(staged_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Applies one category (or clears it, for an empty/absent value) to a
    /// set of staged rows.
    ///
    /// The batch is all-or-nothing: it runs in a single transaction and an
    /// unknown or foreign id rolls back every row.
    pub async fn set_staged_category_bulk(
        &self,
        user_id: &str,
        staged_ids: &[Uuid],
        category: Option<&str>,
    ) -> ResultEngine<usize> {
        let normalized = normalize_optional_text(category);
        with_tx!(self, |db_tx| {
            let mut updated = 0usize;
            for staged_id in staged_ids {
                let model = self.require_staged(&db_tx, user_id, *staged_id).await?;
                let mut active: staged::ActiveModel = model.into();
                active.category = ActiveValue::Set(normalized.clone());
                active.update(&db_tx).await?;
                updated += 1;
            }
            Ok(updated)
        })
    }

    /// Loads a staged row and checks ownership; foreign rows are reported as
    /// missing.
    async fn require_staged(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        staged_id: Uuid,
    ) -> ResultEngine<staged::Model> {
        let model = staged::Entity::find_by_id(staged_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound("staged transaction".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::NotFound("staged transaction".to_string()));
        }
        Ok(model)
    }
}
