//! Row-to-field reducer — collapses the capture dataset into the fixed set
//! of named text fields the prompt templates interpolate.
//!
//! Pure and deterministic: filters on categorical columns, joins text in the
//! dataset's native row order. Recomputed from the session dataset on demand;
//! never persisted.

use serde::Serialize;

use crate::models::record::CaptureRecord;

pub const CATEGORY_KEY_CHALLENGES: &str = "Key Challenges";
pub const CATEGORY_SOLUTIONS_ASPECT: &str = "Solutions Aspect";
pub const CATEGORY_ADDITIONAL_INFO: &str = "Additional Info";

pub const IMPORTANCE_HIGH: &str = "High";
pub const IMPORTANCE_MODERATE: &str = "Moderate";
pub const IMPORTANCE_LOW: &str = "Low";

/// The eight derived strings fed into the prompt templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptFields {
    pub client_name: String,
    pub project_name: String,
    pub solution: String,
    pub key_challenges_high: String,
    pub key_challenges_medium: String,
    pub key_challenges_low: String,
    pub solution_aspect: String,
    pub additional_info: String,
}

/// Reduces the dataset to its field set.
///
/// Exactly one client and one project are active at a time: the first
/// distinct value wins and further values are silently ignored. An empty
/// dataset yields empty strings throughout.
pub fn reduce(records: &[CaptureRecord]) -> PromptFields {
    PromptFields {
        client_name: first_value(records, |r| &r.client),
        project_name: first_value(records, |r| &r.project_name),
        solution: first_value(records, |r| &r.solution),
        key_challenges_high: join_tagged(records, CATEGORY_KEY_CHALLENGES, Some(IMPORTANCE_HIGH)),
        key_challenges_medium: join_tagged(
            records,
            CATEGORY_KEY_CHALLENGES,
            Some(IMPORTANCE_MODERATE),
        ),
        key_challenges_low: join_tagged(records, CATEGORY_KEY_CHALLENGES, Some(IMPORTANCE_LOW)),
        solution_aspect: join_tagged(records, CATEGORY_SOLUTIONS_ASPECT, None),
        additional_info: join_plain(records, CATEGORY_ADDITIONAL_INFO),
    }
}

fn first_value<F>(records: &[CaptureRecord], select: F) -> String
where
    F: Fn(&CaptureRecord) -> &str,
{
    records
        .first()
        .map(|r| select(r).to_string())
        .unwrap_or_default()
}

/// Newline-joined "sub-category: input" lines for rows matching the category
/// (and importance, when given).
fn join_tagged(records: &[CaptureRecord], category: &str, importance: Option<&str>) -> String {
    records
        .iter()
        .filter(|r| r.category == category)
        .filter(|r| importance.map_or(true, |i| r.importance == i))
        .map(|r| format!("{}: {}", r.sub_category, r.user_input))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Newline-joined plain input for rows matching the category.
fn join_plain(records: &[CaptureRecord], category: &str) -> String {
    records
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.user_input.clone())
        .collect::<Vec<_>>()
        .join("\n")
}
