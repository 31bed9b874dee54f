//! Month summary endpoint.

use api_types::stats::{MonthSummaryGet, MonthSummaryView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};
use engine::YearMonth;

pub async fn month_summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<MonthSummaryGet>,
) -> Result<Json<MonthSummaryView>, ServerError> {
    let year_month = YearMonth::from_packed(payload.year_month)?;
    let summary = state
        .engine
        .month_summary(&user.username, year_month)
        .await?;

    Ok(Json(MonthSummaryView {
        income_ore: summary.income.ore(),
        expenses_ore: summary.expenses.ore(),
        shared_expenses_ore: summary.shared_expenses.ore(),
        personal_expenses_ore: summary.personal_expenses.ore(),
    }))
}
