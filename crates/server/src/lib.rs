use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use extractor_client::ExtractorError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod imports;
mod ledger;
mod server;
mod staged;
mod statistics;
mod user;

pub mod types {
    pub mod extractor {
        pub use api_types::extractor::{ExtractorListResponse, ExtractorView};
    }

    pub mod import {
        pub use api_types::import::{CommitMonth, CommitResponse, ImportStage, ImportStageResponse};
    }

    pub mod staged {
        pub use api_types::staged::{
            StagedBulkCategory, StagedBulkCategoryResponse, StagedList, StagedListResponse,
            StagedUpdate, StagedView,
        };
    }

    pub mod ledger {
        pub use api_types::ledger::{
            EntryCreated, EntryNew, LedgerEntryView, LedgerList, LedgerListResponse,
        };
    }

    pub mod stats {
        pub use api_types::stats::{MonthSummaryGet, MonthSummaryView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Extractor(ExtractorError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_) | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

fn status_for_extractor_error(err: &ExtractorError) -> StatusCode {
    match err {
        ExtractorError::Rejected(_) => StatusCode::BAD_REQUEST,
        ExtractorError::InvalidBaseUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ExtractorError::Failed(_) | ExtractorError::Unavailable(_) => StatusCode::BAD_GATEWAY,
    }
}

fn message_for_extractor_error(err: ExtractorError) -> String {
    if let ExtractorError::Unavailable(transport) = &err {
        tracing::error!("extractor service unavailable: {transport}");
    }
    err.to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Extractor(err) => (
                status_for_extractor_error(&err),
                message_for_extractor_error(err),
            ),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ExtractorError> for ServerError {
    fn from(value: ExtractorError) -> Self {
        Self::Extractor(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn extractor_rejection_maps_to_400() {
        let res =
            ServerError::from(ExtractorError::Rejected("unknown extractor".to_string()))
                .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn extractor_failure_maps_to_502() {
        let res = ServerError::from(ExtractorError::Failed("boom".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
