use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::entries;
use crate::error::AppResult;
use crate::models::entry::NewItem;
use crate::services::week::{previous_week, week_start};

/// Insert sample entries for last week and this week. Weeks that already
/// have an entry are left alone. Returns how many entries were created.
pub async fn seed_demo_data(pool: &SqlitePool, user_id: &str, today: NaiveDate) -> AppResult<usize> {
    let this_week = week_start(today);
    let last_week = previous_week(this_week);

    let samples = [
        (
            last_week,
            vec![
                NewItem::new("⚖️", "Lost 5 pounds", Some("health")),
                NewItem::new("🚗", "Got oil change", Some("car")),
                NewItem::new("💅", "Nails done", Some("health")),
                NewItem::new("☎️", "Called mom", Some("relationships")),
            ],
        ),
        (
            this_week,
            vec![
                NewItem::new("📚", "Read 2 chapters", Some("learning")),
                NewItem::new("🏃", "Ran 3 miles", Some("health")),
                NewItem::new("🎶", "Went to Karaoke", Some("social")),
            ],
        ),
    ];

    let mut created = 0;
    for (week, items) in &samples {
        if entries::get_entry_by_week(pool, user_id, *week).await?.is_some() {
            tracing::debug!(%week, user_id, "Week already has an entry, skipping");
            continue;
        }
        entries::create_entry(pool, user_id, *week, items).await?;
        created += 1;
    }

    Ok(created)
}
