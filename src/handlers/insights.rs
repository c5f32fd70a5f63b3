use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::db::entries;
use crate::error::{AppError, AppResult};
use crate::models::entry::Insight;
use crate::AppState;

pub async fn get_insight(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Insight>> {
    let insight = entries::get_insight(&state.db, &state.config.demo_user_id, entry_id)
        .await?
        .ok_or(AppError::NotFound("Insight not found".into()))?;

    Ok(Json(insight))
}
