//! The commit engine: staged rows become permanent ledger entries.

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EntryOrigin, LedgerEntry, ResultEngine, StagedTransaction, YearMonth, ledger, staged,
};

use super::{Engine, with_tx};

impl Engine {
    /// Commits a month: every non-duplicate staged row for `(user, month)`
    /// becomes a ledger entry with `origin = imported`, then the whole
    /// staging area for the key is cleared — duplicate rows are discarded,
    /// not retained.
    ///
    /// With no non-duplicate rows this is a no-op returning 0: neither the
    /// ledger nor the staging area (including any duplicate rows) is
    /// touched.
    ///
    /// Ledger inserts and the staging purge run in one database
    /// transaction, so an import is committed exactly once even across a
    /// crash.
    pub async fn commit_month(&self, user_id: &str, year_month: YearMonth) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let models = staged::Entity::find()
                .filter(staged::Column::UserId.eq(user_id))
                .filter(staged::Column::YearMonth.eq(year_month.packed()))
                .filter(staged::Column::IsDuplicate.eq(false))
                .order_by_asc(staged::Column::SortIndex)
                .all(&db_tx)
                .await?;

            if models.is_empty() {
                return Ok(0);
            }

            let committed = models.len();
            let now = Utc::now();
            for model in models {
                let row = StagedTransaction::try_from(model)?;
                let entry = LedgerEntry {
                    id: Uuid::new_v4(),
                    user_id: user_id.to_string(),
                    year_month,
                    date: row.date,
                    title: row.title,
                    amount: row.amount,
                    source: row.source,
                    category: row.category,
                    notes: row.notes,
                    is_shared: row.is_shared,
                    collect_to_me: row.collect_to_me,
                    collect_from_me: row.collect_from_me,
                    origin: EntryOrigin::Imported,
                    created_at: now,
                };
                ledger::ActiveModel::from(&entry).insert(&db_tx).await?;
            }

            staged::Entity::delete_many()
                .filter(staged::Column::UserId.eq(user_id))
                .filter(staged::Column::YearMonth.eq(year_month.packed()))
                .exec(&db_tx)
                .await?;

            tracing::info!(%user_id, %year_month, committed, "committed staged month");

            Ok(committed)
        })
    }
}
