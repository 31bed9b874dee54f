//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Pengebok's import core:
//!
//! - `users`: authentication
//! - `staged_transactions`: per-(user, month) holding area for imported
//!   rows pending review
//! - `ledger_entries`: the permanent ledger, written by commit and by
//!   manual entry creation, read by duplicate detection

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum StagedTransactions {
    Table,
    Id,
    UserId,
    YearMonth,
    Date,
    Title,
    AmountOre,
    Source,
    RawData,
    Category,
    Notes,
    IsShared,
    CollectToMeOre,
    CollectFromMeOre,
    IsDuplicate,
    DuplicateOf,
    SortIndex,
}

#[derive(Iden)]
enum LedgerEntries {
    Table,
    Id,
    UserId,
    YearMonth,
    Date,
    Title,
    AmountOre,
    Source,
    Category,
    Notes,
    IsShared,
    CollectToMeOre,
    CollectFromMeOre,
    Origin,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Staged transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(StagedTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StagedTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::YearMonth)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StagedTransactions::Date).date().not_null())
                    .col(
                        ColumnDef::new(StagedTransactions::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::AmountOre)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StagedTransactions::Source).string())
                    .col(ColumnDef::new(StagedTransactions::RawData).string())
                    .col(ColumnDef::new(StagedTransactions::Category).string())
                    .col(ColumnDef::new(StagedTransactions::Notes).string())
                    .col(
                        ColumnDef::new(StagedTransactions::IsShared)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::CollectToMeOre)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::CollectFromMeOre)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StagedTransactions::IsDuplicate)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StagedTransactions::DuplicateOf).string())
                    .col(
                        ColumnDef::new(StagedTransactions::SortIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staged_transactions-user_id")
                            .from(StagedTransactions::Table, StagedTransactions::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-staged_transactions-user_id-year_month")
                    .table(StagedTransactions::Table)
                    .col(StagedTransactions::UserId)
                    .col(StagedTransactions::YearMonth)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Ledger entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LedgerEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LedgerEntries::UserId).string().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::YearMonth)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LedgerEntries::Date).date().not_null())
                    .col(ColumnDef::new(LedgerEntries::Title).string().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::AmountOre)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LedgerEntries::Source).string())
                    .col(ColumnDef::new(LedgerEntries::Category).string())
                    .col(ColumnDef::new(LedgerEntries::Notes).string())
                    .col(
                        ColumnDef::new(LedgerEntries::IsShared)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LedgerEntries::CollectToMeOre)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LedgerEntries::CollectFromMeOre)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LedgerEntries::Origin).string().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ledger_entries-user_id")
                            .from(LedgerEntries::Table, LedgerEntries::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The duplicate detector reads one (user, month) slice per staging
        // run; commit appends to the same slice.
        manager
            .create_index(
                Index::create()
                    .name("idx-ledger_entries-user_id-year_month")
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::UserId)
                    .col(LedgerEntries::YearMonth)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(LedgerEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StagedTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
