//! Canned feedback for a week's bullets, chosen by how many distinct
//! categories the bullets cover.

pub const NO_CATEGORY_INSIGHT: &str = "You're making progress! Consider adding categories to track your accomplishments across different life areas.";
pub const TWO_CATEGORY_INSIGHT: &str =
    "Good progress! Consider adding accomplishments from other life areas for better balance.";
pub const BALANCED_INSIGHT: &str =
    "Excellent! You're staying balanced across multiple life areas. Keep up the great work!";

/// Distinct non-blank categories in first-seen order.
pub fn distinct_categories<'a, I>(categories: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen: Vec<&str> = Vec::new();
    for category in categories.into_iter().flatten() {
        let category = category.trim();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

pub fn generate_insight<'a, I>(categories: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let categories = distinct_categories(categories);

    match categories.as_slice() {
        [] => NO_CATEGORY_INSIGHT.to_string(),
        [only] => format!(
            "Great focus on {only}! Try diversifying your accomplishments across different areas of life."
        ),
        [_, _] => TWO_CATEGORY_INSIGHT.to_string(),
        _ => BALANCED_INSIGHT.to_string(),
    }
}
