use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the database answers and the journal tables have been migrated.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let connected = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let schema = connected && journal_tables_present(&state.db).await;

    let label = |ok: bool| if ok { "ok" } else { "failed" };
    let checks = json!({
        "database": label(connected),
        "schema": label(schema),
    });

    if schema {
        (StatusCode::OK, Json(json!({ "status": "ready", "checks": checks })))
    } else {
        tracing::warn!(%checks, "Readiness check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready", "checks": checks })),
        )
    }
}

async fn journal_tables_present(pool: &SqlitePool) -> bool {
    let found = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM sqlite_master
        WHERE type = 'table' AND name IN ('bullet_entries', 'bullet_items', 'ai_insights')
        "#,
    )
    .fetch_one(pool)
    .await;

    matches!(found, Ok(3))
}
