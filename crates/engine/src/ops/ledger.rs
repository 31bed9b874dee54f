//! Ledger reads and manual entry creation.
//!
//! The wider application owns the ledger; this core only needs the month
//! slice (duplicate detection, review context) and a way to create entries.

use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, EntryOrigin, LedgerEntry, MonthSummary, NewEntryCmd, ResultEngine, YearMonth,
    ledger, util::validate_settlements,
};

use super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    /// Creates a manual ledger entry and returns its id.
    pub async fn add_entry(&self, cmd: NewEntryCmd) -> ResultEngine<Uuid> {
        let title = cmd.title.trim().to_string();
        if title.is_empty() {
            return Err(EngineError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if cmd.amount.is_zero() {
            return Err(EngineError::Validation(
                "amount must not be 0".to_string(),
            ));
        }
        validate_settlements(cmd.amount, cmd.collect_to_me, cmd.collect_from_me)?;

        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            user_id: cmd.user_id,
            year_month: cmd.year_month,
            date: cmd.date,
            title,
            amount: cmd.amount,
            source: normalize_optional_text(cmd.source.as_deref()),
            category: normalize_optional_text(cmd.category.as_deref()),
            notes: normalize_optional_text(cmd.notes.as_deref()),
            is_shared: cmd.is_shared,
            collect_to_me: cmd.collect_to_me,
            collect_from_me: cmd.collect_from_me,
            origin: EntryOrigin::Manual,
            created_at: Utc::now(),
        };

        with_tx!(self, |db_tx| {
            ledger::ActiveModel::from(&entry).insert(&db_tx).await?;
            Ok(entry.id)
        })
    }

    /// Lists the committed entries for `(user, month)`, oldest date first.
    pub async fn list_entries(
        &self,
        user_id: &str,
        year_month: YearMonth,
    ) -> ResultEngine<Vec<LedgerEntry>> {
        let models = ledger::Entity::find()
            .filter(ledger::Column::UserId.eq(user_id))
            .filter(ledger::Column::YearMonth.eq(year_month.packed()))
            .order_by_asc(ledger::Column::Date)
            .order_by_asc(ledger::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(LedgerEntry::try_from(model)?);
        }
        Ok(out)
    }

    /// Month totals for the dashboard: income, expenses, the shared-expense
    /// total, and the personal figure where each shared row counts at half
    /// its amount (floor division).
    pub async fn month_summary(
        &self,
        user_id: &str,
        year_month: YearMonth,
    ) -> ResultEngine<MonthSummary> {
        let entries = self.list_entries(user_id, year_month).await?;

        let mut summary = MonthSummary::default();
        for entry in entries {
            if entry.amount.is_negative() {
                summary.expenses += entry.amount;
                if entry.is_shared {
                    summary.shared_expenses += entry.amount;
                    summary.personal_expenses += entry.amount.halved();
                } else {
                    summary.personal_expenses += entry.amount;
                }
            } else {
                summary.income += entry.amount;
            }
        }
        Ok(summary)
    }

    /// Loads the committed entries the duplicate detector compares against,
    /// in commit order (first match wins, so the order is part of the
    /// contract).
    pub(super) async fn load_month_entries(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        year_month: YearMonth,
    ) -> ResultEngine<Vec<LedgerEntry>> {
        let models = ledger::Entity::find()
            .filter(ledger::Column::UserId.eq(user_id))
            .filter(ledger::Column::YearMonth.eq(year_month.packed()))
            .order_by_asc(ledger::Column::CreatedAt)
            .order_by_asc(ledger::Column::Id)
            .all(db_tx)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(LedgerEntry::try_from(model)?);
        }
        Ok(out)
    }
}
