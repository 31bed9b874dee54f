//! Ledger API endpoints: month listing and manual entry creation.

use api_types::ledger::{EntryCreated, EntryNew, LedgerEntryView, LedgerList, LedgerListResponse};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState, user};
use engine::{LedgerEntry, MoneyOre, NewEntryCmd, YearMonth};

fn map_entry(entry: LedgerEntry) -> LedgerEntryView {
    LedgerEntryView {
        id: entry.id,
        year_month: entry.year_month.packed(),
        date: entry.date,
        title: entry.title,
        amount_ore: entry.amount.ore(),
        source: entry.source,
        category: entry.category,
        notes: entry.notes,
        is_shared: entry.is_shared,
        collect_to_me_ore: entry.collect_to_me.ore(),
        collect_from_me_ore: entry.collect_from_me.ore(),
        origin: entry.origin.as_str().to_string(),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<LedgerList>,
) -> Result<Json<LedgerListResponse>, ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;
    let entries = state
        .engine
        .list_entries(&user.username, year_month)
        .await?
        .into_iter()
        .map(map_entry)
        .collect();

    Ok(Json(LedgerListResponse { entries }))
}

pub async fn entry_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryCreated>), ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;

    let mut cmd = NewEntryCmd::new(
        user.username,
        year_month,
        payload.date,
        payload.title,
        MoneyOre::new(payload.amount_ore),
    );
    cmd.source = payload.source;
    cmd.category = payload.category;
    cmd.notes = payload.notes;
    cmd.is_shared = payload.is_shared.unwrap_or(false);
    cmd.collect_to_me = payload.collect_to_me_ore.map(MoneyOre::new).unwrap_or_default();
    cmd.collect_from_me = payload
        .collect_from_me_ore
        .map(MoneyOre::new)
        .unwrap_or_default();

    let id = state.engine.add_entry(cmd).await?;

    Ok((StatusCode::CREATED, Json(EntryCreated { id })))
}
