//! Staged-transaction API endpoints (the review/edit surface).

use api_types::staged::{
    StagedBulkCategory, StagedBulkCategoryResponse, StagedList, StagedListResponse, StagedUpdate,
    StagedView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};
use engine::{MoneyOre, StagedTransaction, UpdateStagedCmd, YearMonth};

fn map_staged(row: StagedTransaction) -> StagedView {
    StagedView {
        id: row.id,
        year_month: row.year_month.packed(),
        date: row.date,
        title: row.title,
        amount_ore: row.amount.ore(),
        source: row.source,
        category: row.category,
        notes: row.notes,
        is_shared: row.is_shared,
        collect_to_me_ore: row.collect_to_me.ore(),
        collect_from_me_ore: row.collect_from_me.ore(),
        is_duplicate: row.is_duplicate,
        duplicate_of: row.duplicate_of,
        sort_index: row.sort_index,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<StagedList>,
) -> Result<Json<StagedListResponse>, ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;
    let staged = state
        .engine
        .list_staged(&user.username, year_month)
        .await?
        .into_iter()
        .map(map_staged)
        .collect();

    Ok(Json(StagedListResponse { staged }))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StagedUpdate>,
) -> Result<Json<StagedView>, ServerError> {
    let mut cmd = UpdateStagedCmd::new(user.username, id);
    cmd.title = payload.title;
    cmd.amount = payload.amount_ore.map(MoneyOre::new);
    cmd.date = payload.date;
    cmd.category = payload.category;
    cmd.notes = payload.notes;
    cmd.is_shared = payload.is_shared;
    cmd.collect_to_me = payload.collect_to_me_ore.map(MoneyOre::new);
    cmd.collect_from_me = payload.collect_from_me_ore.map(MoneyOre::new);

    let row = state.engine.update_staged(cmd).await?;
    Ok(Json(map_staged(row)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_staged(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_category(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<StagedBulkCategory>,
) -> Result<Json<StagedBulkCategoryResponse>, ServerError> {
    let updated = state
        .engine
        .set_staged_category_bulk(&user.username, &payload.ids, payload.category.as_deref())
        .await?;

    Ok(Json(StagedBulkCategoryResponse {
        updated: updated as u64,
    }))
}
