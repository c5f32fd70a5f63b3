use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Upper bound on bullets per weekly entry.
pub const MAX_ITEMS_PER_ENTRY: usize = 5;

/// Upper bound on a bullet's text, in characters.
pub const MAX_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub bullet_entry_id: i64,
    pub order_index: i64,
    pub emoji: String,
    pub text: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Insight {
    pub id: i64,
    pub bullet_entry_id: i64,
    pub insight_text: String,
    pub generated_at: DateTime<Utc>,
}

/// An entry with its bullets (in order) and its insight, if one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<Insight>,
}

/// A bullet as it is about to be written; position comes from its index in
/// the list being saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub emoji: String,
    pub text: String,
    pub category: Option<String>,
}

impl NewItem {
    pub fn new(emoji: &str, text: &str, category: Option<&str>) -> Self {
        Self {
            emoji: emoji.trim().to_string(),
            text: text.trim().to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}
