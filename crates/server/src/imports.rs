//! Import API endpoints: extractor listing, staging, and commit.

use api_types::extractor::{ExtractorListResponse, ExtractorView};
use api_types::import::{CommitMonth, CommitResponse, ImportStage, ImportStageResponse};
use axum::{Extension, Json, extract::State};
use base64::Engine as _;
use chrono::NaiveDate;
use extractor_client::ExtractedTransaction;

use crate::{ServerError, server::ServerState, user};
use engine::{MoneyOre, RawTransaction, StageImportCmd, YearMonth};

/// Maps one wire row to the engine's input type.
///
/// A missing or unparseable date becomes `None`, which the engine counts as
/// filtered-out rather than staging the row.
fn map_extracted(row: ExtractedTransaction) -> RawTransaction {
    let date = row
        .date
        .as_deref()
        .and_then(|raw| raw.parse::<NaiveDate>().ok());

    RawTransaction {
        date,
        title: row.title,
        amount: MoneyOre::new(row.amount),
        source: row.source,
        raw_data: row.raw_data,
        is_shared_hint: row.is_shared.unwrap_or(false),
    }
}

pub async fn list_extractors(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ExtractorListResponse>, ServerError> {
    let extractors = state
        .extractor
        .list_extractors()
        .await?
        .into_iter()
        .map(|info| ExtractorView {
            name: info.name,
            description: info.description,
            supported_formats: info.supported_formats,
        })
        .collect();

    Ok(Json(ExtractorListResponse { extractors }))
}

/// Stages one uploaded statement for the target month.
///
/// The extractor runs first; if it fails, the error is returned and no
/// staging mutation has happened.
pub async fn stage(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ImportStage>,
) -> Result<Json<ImportStageResponse>, ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;
    let content = base64::engine::general_purpose::STANDARD
        .decode(payload.file_base64.as_bytes())
        .map_err(|_| ServerError::Generic("invalid file_base64".to_string()))?;

    let extracted = state
        .extractor
        .extract(&payload.extractor, &payload.file_name, content)
        .await?;

    let transactions: Vec<RawTransaction> = extracted.into_iter().map(map_extracted).collect();

    let outcome = state
        .engine
        .stage_import(
            StageImportCmd::new(user.username, year_month).transactions(transactions),
        )
        .await?;

    Ok(Json(ImportStageResponse {
        staged: outcome.staged as u64,
        duplicates: outcome.duplicates as u64,
        filtered_by_month: outcome.filtered_by_month as u64,
    }))
}

/// Commits every non-duplicate staged row for the month and clears the
/// staging area.
pub async fn commit(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CommitMonth>,
) -> Result<Json<CommitResponse>, ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;
    let committed = state
        .engine
        .commit_month(&user.username, year_month)
        .await?;

    Ok(Json(CommitResponse {
        committed: committed as u64,
    }))
}
