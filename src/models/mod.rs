//! Canonical journal data model

use serde::{Deserialize, Serialize};

/// One normalized journal article.
///
/// Constructed fresh on every cache-miss fetch and never mutated afterwards;
/// the remote content store is the sole source of truth. Serialized field
/// names match the storefront's existing JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Stable identifier from the remote store
    pub id: String,
    pub title: String,
    /// URL slug, unique within a fetch batch; generated from the title
    /// when the source record carries none
    pub slug: String,
    pub summary: String,
    pub published: bool,
    /// ISO date (YYYY-MM-DD); today's date when the source omits it
    pub date: String,
    /// Cover image URL, possibly empty
    pub cover_image: String,
    /// Topical tags in source order
    pub tags: Vec<String>,
    pub author: String,
    /// Source-provided revision timestamp
    pub last_edited_time: String,
    /// Estimated reading time in minutes, derived from the summary
    pub reading_time: u32,
}
