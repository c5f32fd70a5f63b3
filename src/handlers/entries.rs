use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::db::entries;
use crate::dto::{parse_week, CreateEntryRequest, UpdateEntryRequest};
use crate::error::{AppError, AppResult};
use crate::models::entry::FullEntry;
use crate::services::week::current_week_start;
use crate::AppState;

pub async fn list_entries(State(state): State<AppState>) -> AppResult<Json<Vec<FullEntry>>> {
    let entries = entries::list_entries(&state.db, &state.config.demo_user_id).await?;
    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<FullEntry>> {
    let entry = entries::get_entry(&state.db, &state.config.demo_user_id, entry_id)
        .await?
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

/// Entry for the week that contains today, if it has been written yet.
pub async fn get_current_entry(State(state): State<AppState>) -> AppResult<Json<FullEntry>> {
    let entry = entries::get_entry_by_week(
        &state.db,
        &state.config.demo_user_id,
        current_week_start(),
    )
    .await?
    .ok_or(AppError::NotFound("No entry for the current week".into()))?;

    Ok(Json(entry))
}

pub async fn get_entry_by_week(
    State(state): State<AppState>,
    WithRejection(Path(date), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<FullEntry>> {
    let week = parse_week(&date)?;

    let entry = entries::get_entry_by_week(&state.db, &state.config.demo_user_id, week)
        .await?
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn create_entry(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateEntryRequest>, AppError>,
) -> AppResult<(StatusCode, Json<FullEntry>)> {
    let (week, items) = body.into_parts()?;

    let entry = entries::create_entry(&state.db, &state.config.demo_user_id, week, &items).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateEntryRequest>, AppError>,
) -> AppResult<Json<FullEntry>> {
    let items = body.into_items()?;

    let entry = entries::replace_items(&state.db, &state.config.demo_user_id, entry_id, &items)
        .await?
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    let deleted = entries::delete_entry(&state.db, &state.config.demo_user_id, entry_id).await?;

    if !deleted {
        return Err(AppError::NotFound("Entry not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
