//! Field normalizers for the content store's variant property schema
//!
//! Total, pure extraction functions: a missing or malformed field degrades
//! to its type's zero value instead of failing. All defensive handling of
//! the remote schema lives here rather than inline in the pipeline.

use chrono::Utc;

use crate::services::notion_client::{DateSpec, RichTextSpan, SelectOption};

/// Concatenate the plain-text segments of a rich-text field.
pub fn plain_text(spans: Option<&[RichTextSpan]>) -> String {
    spans
        .map(|spans| {
            spans
                .iter()
                .map(|span| span.plain_text.as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Concatenate the plain-text segments of a title field.
pub fn title_text(spans: Option<&[RichTextSpan]>) -> String {
    plain_text(spans)
}

/// The field's start date, or today's date (UTC, date-only) when absent.
pub fn date_or_today(date: Option<&DateSpec>) -> String {
    date.and_then(|d| d.start.clone())
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string())
}

/// The checkbox value, or `false` when absent.
pub fn checkbox(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// The URL value, or an empty string when absent.
pub fn url(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// The display names of the selected options, source order preserved.
pub fn multi_select(options: Option<&[SelectOption]>) -> Vec<String> {
    options
        .map(|options| options.iter().map(|o| o.name.clone()).collect())
        .unwrap_or_default()
}
