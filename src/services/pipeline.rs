//! Content fetch & transform pipeline
//!
//! Bridges the raw content store records and the canonical [`ContentItem`]
//! model. Every operation degrades to an empty or `None` value on failure;
//! no error crosses this boundary. A failed listing fetch degrades the whole
//! listing, never a partial list.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::metrics::{reading_time, slug_from_title};
use crate::models::ContentItem;
use crate::normalize;
use crate::services::notion_client::{NotionClient, Page, Property};

/// Author shown when the source record carries none
pub const DEFAULT_AUTHOR: &str = "khaki shop";

/// Seam between the cached store facade and the remote fetch pipeline.
///
/// Implementations never error: failures are logged and collapse to the
/// operation's neutral value.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All published items, newest first; empty on any failure.
    async fn published_items(&self) -> Vec<ContentItem>;

    /// One item by store id; `None` on failure or when the record has no
    /// resolvable properties.
    async fn item_by_id(&self, id: &str) -> Option<ContentItem>;

    /// Raw child blocks of a page, passed through unnormalized; empty on
    /// failure.
    async fn child_blocks(&self, page_id: &str) -> Vec<Value>;
}

/// Pipeline backed by the remote content store.
pub struct NotionSource {
    config: StoreConfig,
    client: NotionClient,
}

impl NotionSource {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = NotionClient::new(config.clone())?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(StoreConfig::from_env())
    }

    fn config_ok(&self) -> bool {
        match self.config.validate() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Content store not configured: {err}");
                false
            }
        }
    }
}

#[async_trait]
impl ContentSource for NotionSource {
    async fn published_items(&self) -> Vec<ContentItem> {
        if !self.config_ok() {
            return Vec::new();
        }
        listing_from_result(self.client.query_published().await)
    }

    async fn item_by_id(&self, id: &str) -> Option<ContentItem> {
        if !self.config_ok() {
            return None;
        }
        item_from_result(self.client.retrieve_page(id).await)
    }

    async fn child_blocks(&self, page_id: &str) -> Vec<Value> {
        if !self.config_ok() {
            return Vec::new();
        }
        match self.client.list_children(page_id).await {
            Ok(blocks) => blocks,
            Err(err) => {
                log_fetch_error("Journal block fetch", &err);
                Vec::new()
            }
        }
    }
}

/// Map a listing query result, collapsing failure to an empty listing.
fn listing_from_result(result: Result<Vec<Page>, StoreError>) -> Vec<ContentItem> {
    match result {
        Ok(pages) => {
            let items: Vec<ContentItem> = pages.iter().map(item_from_page).collect();
            tracing::info!(count = items.len(), "Journal listing fetched");
            items
        }
        Err(err) => {
            log_fetch_error("Journal listing fetch", &err);
            Vec::new()
        }
    }
}

/// Map a single-page result, collapsing failure or an empty property bag
/// to `None`.
fn item_from_result(result: Result<Page, StoreError>) -> Option<ContentItem> {
    match result {
        Ok(page) if page.properties.is_empty() => None,
        Ok(page) => Some(item_from_page(&page)),
        Err(err) => {
            log_fetch_error("Journal item fetch", &err);
            None
        }
    }
}

fn log_fetch_error(operation: &str, err: &StoreError) {
    match err {
        StoreError::NotFound(subject) => tracing::error!(
            %subject,
            "{operation} failed: resource not found; check the database id"
        ),
        StoreError::Unauthorized(subject) => tracing::error!(
            %subject,
            "{operation} failed: unauthorized; check the API key and database permissions"
        ),
        other => tracing::error!("{operation} failed: {other}"),
    }
}

/// Normalize one raw page record into a canonical item.
///
/// Title resolves from `Title` falling back to `Name`; the slug falls back
/// to one generated from the title; the author falls back to the brand
/// default. Reading time is computed from the resolved summary.
pub fn item_from_page(page: &Page) -> ContentItem {
    let title = normalize::title_text(
        page.property("Title")
            .and_then(Property::as_title)
            .or_else(|| page.property("Name").and_then(Property::as_title)),
    );
    let summary = normalize::plain_text(page.property("Summary").and_then(Property::as_rich_text));

    let slug = {
        let explicit =
            normalize::plain_text(page.property("Slug").and_then(Property::as_rich_text));
        if explicit.is_empty() {
            slug_from_title(&title)
        } else {
            explicit
        }
    };

    let author = {
        let from_source =
            normalize::plain_text(page.property("Author").and_then(Property::as_rich_text));
        if from_source.is_empty() {
            DEFAULT_AUTHOR.to_string()
        } else {
            from_source
        }
    };

    ContentItem {
        id: page.id.clone(),
        title,
        slug,
        published: normalize::checkbox(page.property("Published").and_then(Property::as_checkbox)),
        date: normalize::date_or_today(page.property("Date").and_then(Property::as_date)),
        cover_image: normalize::url(page.property("CoverImage").and_then(Property::as_url)),
        tags: normalize::multi_select(page.property("Tags").and_then(Property::as_multi_select)),
        author,
        last_edited_time: page.last_edited_time.clone(),
        reading_time: reading_time(&summary),
        summary,
    }
}
