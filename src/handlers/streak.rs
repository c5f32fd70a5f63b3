use axum::{extract::State, Json};

use crate::db::entries;
use crate::dto::StreakResponse;
use crate::error::AppResult;
use crate::services::{streak::current_streak, week};
use crate::AppState;

pub async fn get_streak(State(state): State<AppState>) -> AppResult<Json<StreakResponse>> {
    let user_id = &state.config.demo_user_id;
    let weeks = entries::week_starts(&state.db, user_id).await?;
    let streak = current_streak(&weeks, week::today());

    tracing::debug!(user_id, streak, "Streak computed");
    Ok(Json(StreakResponse { streak }))
}
