//! # Bullet Journal — Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Field-level rules are expressed via `validator` derive macros

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::entry::{NewItem, MAX_TEXT_CHARS};
use crate::services::week::checked_week_start;

// ============================================================================
// Entries
// ============================================================================

/// One bullet as sent by the client. `order_index` is accepted for
/// compatibility but positions always follow array order.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ItemRequest {
    #[validate(custom = "not_blank")]
    pub emoji: String,

    #[validate(custom = "bullet_text")]
    pub text: String,

    pub category: Option<String>,

    pub order_index: Option<i64>,
}

/// POST /entries
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    /// Any date in the target week (YYYY-MM-DD); stored as that week's Monday
    pub week_start_date: String,

    #[validate(length(min = 1, max = 5, message = "An entry needs between 1 and 5 items"))]
    pub items: Vec<ItemRequest>,
}

/// PUT /entries/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    #[validate(length(min = 1, max = 5, message = "An entry needs between 1 and 5 items"))]
    pub items: Vec<ItemRequest>,
}

impl CreateEntryRequest {
    /// Validate and normalise into (Monday of the week, items to store).
    pub fn into_parts(self) -> AppResult<(NaiveDate, Vec<NewItem>)> {
        self.validate()?;
        let week = parse_week(&self.week_start_date)?;
        let items = validate_items(self.items)?;
        Ok((week, items))
    }
}

impl UpdateEntryRequest {
    pub fn into_items(self) -> AppResult<Vec<NewItem>> {
        self.validate()?;
        validate_items(self.items)
    }
}

/// Parse a YYYY-MM-DD date and bucket it into its week. Only four-digit
/// years from 0001 are accepted.
pub fn parse_week(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    let invalid = || {
        AppError::Validation(format!(
            "week_start_date must be a date in YYYY-MM-DD format, got {raw:?}"
        ))
    };

    if !is_iso_date_shape(raw) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?;
    if date.year() < 1 {
        return Err(invalid());
    }
    checked_week_start(date).ok_or_else(invalid)
}

fn is_iso_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn validate_items(items: Vec<ItemRequest>) -> AppResult<Vec<NewItem>> {
    items
        .into_iter()
        .map(|item| -> AppResult<NewItem> {
            item.validate()?;
            Ok(NewItem::new(&item.emoji, &item.text, item.category.as_deref()))
        })
        .collect()
}

/// Bullet text must hold 1 to `MAX_TEXT_CHARS` characters once trimmed,
/// which is what gets stored.
fn bullet_text(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.trim().chars().count() > MAX_TEXT_CHARS {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("Text must be at most {MAX_TEXT_CHARS} characters").into());
        return Err(err);
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

// ============================================================================
// Streak
// ============================================================================

/// GET /streak
#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> ItemRequest {
        ItemRequest {
            emoji: "✅".into(),
            text: text.into(),
            category: None,
            order_index: None,
        }
    }

    #[test]
    fn parse_week_buckets_to_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(parse_week("2024-06-09").unwrap(), monday);
        assert_eq!(parse_week(" 2024-06-03 ").unwrap(), monday);
    }

    #[test]
    fn parse_week_rejects_non_four_digit_years() {
        for raw in ["-262143-01-01", "+012345-01-03", "12345-01-03", "0000-01-03", "24-06-03", "2024-6-3"] {
            assert!(
                matches!(parse_week(raw), Err(AppError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn parse_week_handles_earliest_accepted_year() {
        // 0001-01-01 is a Monday.
        assert_eq!(
            parse_week("0001-01-03").unwrap(),
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap()
        );
    }

    #[test]
    fn text_length_is_measured_after_trimming() {
        let padded = format!("  {}  ", "x".repeat(100));
        let items = validate_items(vec![item(&padded)]).unwrap();
        assert_eq!(items[0].text.chars().count(), 100);

        let too_long = format!("  {}", "x".repeat(101));
        assert!(matches!(
            validate_items(vec![item(&too_long)]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn text_limit_counts_characters_not_bytes() {
        let emoji = "🏃".repeat(100);
        assert!(validate_items(vec![item(&emoji)]).is_ok());
        assert!(validate_items(vec![item("   ")]).is_err());
    }
}
