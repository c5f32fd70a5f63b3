//! Storage for weekly entries, their bullets and their insight.
//!
//! Every multi-statement write runs in one transaction. Returning early
//! with `?` drops the transaction, which rolls it back.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::models::entry::{Entry, FullEntry, Insight, Item, NewItem, MAX_ITEMS_PER_ENTRY};
use crate::services::insight::generate_insight;

/// All of a user's entries, newest week first.
pub async fn list_entries(pool: &SqlitePool, user_id: &str) -> AppResult<Vec<FullEntry>> {
    let mut conn = pool.acquire().await?;

    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT * FROM bullet_entries
        WHERE user_id = ?1
        ORDER BY week_start_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        result.push(load_children(&mut conn, entry).await?);
    }
    Ok(result)
}

pub async fn get_entry(
    pool: &SqlitePool,
    user_id: &str,
    entry_id: i64,
) -> AppResult<Option<FullEntry>> {
    let mut conn = pool.acquire().await?;
    fetch_full(&mut conn, user_id, entry_id).await
}

pub async fn get_entry_by_week(
    pool: &SqlitePool,
    user_id: &str,
    week_start: NaiveDate,
) -> AppResult<Option<FullEntry>> {
    let mut conn = pool.acquire().await?;

    let entry = sqlx::query_as::<_, Entry>(
        "SELECT * FROM bullet_entries WHERE user_id = ?1 AND week_start_date = ?2",
    )
    .bind(user_id)
    .bind(week_start)
    .fetch_optional(&mut *conn)
    .await?;

    match entry {
        Some(entry) => Ok(Some(load_children(&mut conn, entry).await?)),
        None => Ok(None),
    }
}

/// Create the entry for `week_start` with its bullets and insight. Fails with
/// `DuplicateWeek` if the user already has an entry for that week.
pub async fn create_entry(
    pool: &SqlitePool,
    user_id: &str,
    week_start: NaiveDate,
    items: &[NewItem],
) -> AppResult<FullEntry> {
    check_item_count(items)?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM bullet_entries WHERE user_id = ?1 AND week_start_date = ?2",
    )
    .bind(user_id)
    .bind(week_start)
    .fetch_optional(&mut *tx)
    .await?;

    if existing.is_some() {
        return Err(AppError::DuplicateWeek);
    }

    let now = Utc::now();
    let entry_id = sqlx::query(
        r#"
        INSERT INTO bullet_entries (user_id, week_start_date, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?3)
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(AppError::from_insert)?
    .last_insert_rowid();

    insert_items(&mut tx, entry_id, items, now).await?;
    upsert_insight(&mut tx, entry_id, items, now).await?;

    let entry = fetch_full(&mut tx, user_id, entry_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("entry {entry_id} vanished inside its own transaction"))?;

    tx.commit().await?;

    tracing::info!(entry_id, %week_start, user_id, items = items.len(), "Entry created");
    Ok(entry)
}

/// Replace every bullet of an entry and regenerate its insight. `None` when
/// the entry does not exist.
pub async fn replace_items(
    pool: &SqlitePool,
    user_id: &str,
    entry_id: i64,
    items: &[NewItem],
) -> AppResult<Option<FullEntry>> {
    check_item_count(items)?;

    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let touched = sqlx::query(
        "UPDATE bullet_entries SET updated_at = ?3 WHERE id = ?1 AND user_id = ?2",
    )
    .bind(entry_id)
    .bind(user_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if touched.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query("DELETE FROM bullet_items WHERE bullet_entry_id = ?1")
        .bind(entry_id)
        .execute(&mut *tx)
        .await?;

    insert_items(&mut tx, entry_id, items, now).await?;
    upsert_insight(&mut tx, entry_id, items, now).await?;

    let entry = fetch_full(&mut tx, user_id, entry_id).await?;
    tx.commit().await?;

    tracing::info!(entry_id, user_id, items = items.len(), "Entry items replaced");
    Ok(entry)
}

/// Delete an entry together with its bullets and insight. Returns whether
/// anything was removed.
pub async fn delete_entry(pool: &SqlitePool, user_id: &str, entry_id: i64) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    let owned = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM bullet_entries WHERE id = ?1 AND user_id = ?2",
    )
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if owned.is_none() {
        return Ok(false);
    }

    // Children first; the schema also cascades.
    sqlx::query("DELETE FROM bullet_items WHERE bullet_entry_id = ?1")
        .bind(entry_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM ai_insights WHERE bullet_entry_id = ?1")
        .bind(entry_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM bullet_entries WHERE id = ?1")
        .bind(entry_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(entry_id, user_id, "Entry deleted");
    Ok(true)
}

/// Week-start dates of every entry the user has, newest first.
pub async fn week_starts(pool: &SqlitePool, user_id: &str) -> AppResult<Vec<NaiveDate>> {
    let weeks = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT week_start_date FROM bullet_entries
        WHERE user_id = ?1
        ORDER BY week_start_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(weeks)
}

pub async fn get_insight(
    pool: &SqlitePool,
    user_id: &str,
    entry_id: i64,
) -> AppResult<Option<Insight>> {
    let insight = sqlx::query_as::<_, Insight>(
        r#"
        SELECT i.* FROM ai_insights i
        JOIN bullet_entries e ON e.id = i.bullet_entry_id
        WHERE i.bullet_entry_id = ?1 AND e.user_id = ?2
        "#,
    )
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(insight)
}

fn check_item_count(items: &[NewItem]) -> AppResult<()> {
    if items.is_empty() || items.len() > MAX_ITEMS_PER_ENTRY {
        return Err(AppError::Validation(format!(
            "An entry needs between 1 and {MAX_ITEMS_PER_ENTRY} items, got {}",
            items.len()
        )));
    }
    Ok(())
}

async fn fetch_full(
    conn: &mut SqliteConnection,
    user_id: &str,
    entry_id: i64,
) -> AppResult<Option<FullEntry>> {
    let entry = sqlx::query_as::<_, Entry>(
        "SELECT * FROM bullet_entries WHERE id = ?1 AND user_id = ?2",
    )
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    match entry {
        Some(entry) => Ok(Some(load_children(conn, entry).await?)),
        None => Ok(None),
    }
}

async fn load_children(conn: &mut SqliteConnection, entry: Entry) -> AppResult<FullEntry> {
    let items = sqlx::query_as::<_, Item>(
        r#"
        SELECT * FROM bullet_items
        WHERE bullet_entry_id = ?1
        ORDER BY order_index ASC
        "#,
    )
    .bind(entry.id)
    .fetch_all(&mut *conn)
    .await?;

    let insight = sqlx::query_as::<_, Insight>(
        "SELECT * FROM ai_insights WHERE bullet_entry_id = ?1",
    )
    .bind(entry.id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(FullEntry {
        entry,
        items,
        insight,
    })
}

async fn insert_items(
    conn: &mut SqliteConnection,
    entry_id: i64,
    items: &[NewItem],
    now: DateTime<Utc>,
) -> AppResult<()> {
    for (index, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO bullet_items (bullet_entry_id, order_index, emoji, text, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(entry_id)
        .bind(index as i64)
        .bind(&item.emoji)
        .bind(&item.text)
        .bind(&item.category)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn upsert_insight(
    conn: &mut SqliteConnection,
    entry_id: i64,
    items: &[NewItem],
    now: DateTime<Utc>,
) -> AppResult<()> {
    let text = generate_insight(items.iter().map(|item| item.category.as_deref()));

    sqlx::query(
        r#"
        INSERT INTO ai_insights (bullet_entry_id, insight_text, generated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (bullet_entry_id) DO UPDATE SET
            insight_text = excluded.insight_text,
            generated_at = excluded.generated_at
        "#,
    )
    .bind(entry_id)
    .bind(&text)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
