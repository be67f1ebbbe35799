//! Read-through journal store
//!
//! The facade consumers call: cached versions of the three fetch
//! operations, slug/tag lookup helpers built on the listing, tag
//! enumeration, related-items ranking, and the administrative cache
//! invalidation trigger. No method here ever returns an error; failed
//! fetches surface as empty or `None` values (already logged by the
//! pipeline) and may themselves be cached until expiry or invalidation.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{ContentCache, ALL_TAGS};
use crate::error::StoreError;
use crate::models::ContentItem;
use crate::related::{related_items, DEFAULT_RELATED_LIMIT};
use crate::services::pipeline::{ContentSource, NotionSource};

/// Outcome of an administrative cache invalidation
#[derive(Debug, Clone, Serialize)]
pub struct InvalidationReport {
    pub success: bool,
    pub message: String,
}

/// Cached facade over a [`ContentSource`]
pub struct JournalStore {
    source: Arc<dyn ContentSource>,
    cache: ContentCache,
}

impl JournalStore {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_cache(source, ContentCache::new())
    }

    pub fn with_cache(source: Arc<dyn ContentSource>, cache: ContentCache) -> Self {
        Self { source, cache }
    }

    /// Store backed by the remote content store, configured from the
    /// process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(NotionSource::from_env()?)))
    }

    /// All published items, newest first.
    pub async fn published_items(&self) -> Vec<ContentItem> {
        if let Some(items) = self.cache.listing() {
            tracing::debug!(count = items.len(), "Journal listing served from cache");
            return items;
        }
        let items = self.source.published_items().await;
        self.cache.store_listing(items.clone());
        items
    }

    /// One item by store id.
    pub async fn item_by_id(&self, id: &str) -> Option<ContentItem> {
        if let Some(cached) = self.cache.item(id) {
            tracing::debug!(id = %id, "Journal item served from cache");
            return cached;
        }
        let item = self.source.item_by_id(id).await;
        self.cache.store_item(id, item.clone());
        item
    }

    /// Raw child blocks of a page, opaque to this layer.
    pub async fn child_blocks(&self, page_id: &str) -> Vec<Value> {
        if let Some(blocks) = self.cache.blocks(page_id) {
            tracing::debug!(page_id = %page_id, "Journal blocks served from cache");
            return blocks;
        }
        let blocks = self.source.child_blocks(page_id).await;
        self.cache.store_blocks(page_id, blocks.clone());
        blocks
    }

    /// Find a published item by its slug.
    pub async fn item_by_slug(&self, slug: &str) -> Option<ContentItem> {
        self.published_items()
            .await
            .into_iter()
            .find(|item| item.slug == slug)
    }

    /// Published items carrying the given tag (case-insensitive).
    pub async fn items_by_tag(&self, tag: &str) -> Vec<ContentItem> {
        let wanted = tag.to_lowercase();
        self.published_items()
            .await
            .into_iter()
            .filter(|item| item.tags.iter().any(|t| t.to_lowercase() == wanted))
            .collect()
    }

    /// Distinct tags across all published items, sorted lexicographically.
    pub async fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .published_items()
            .await
            .into_iter()
            .flat_map(|item| item.tags)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Items related to `current` by shared tags, newest-first backfilled.
    pub async fn related_items(&self, current: &ContentItem, limit: usize) -> Vec<ContentItem> {
        related_items(current, &self.published_items().await, limit)
    }

    /// Related items with the default limit.
    pub async fn related_to(&self, current: &ContentItem) -> Vec<ContentItem> {
        self.related_items(current, DEFAULT_RELATED_LIMIT).await
    }

    /// Force expiry of every cache tag, independent of the time box.
    ///
    /// Intended for the authenticated admin action. Never panics: an
    /// unavailable cache reports `success: false` with a message.
    pub fn invalidate_cache(&self) -> InvalidationReport {
        match self.cache.invalidate(&ALL_TAGS) {
            Ok(()) => {
                tracing::info!("Journal cache invalidated (listing, item, blocks)");
                InvalidationReport {
                    success: true,
                    message: "Journal cache invalidated.".to_string(),
                }
            }
            Err(err) => {
                tracing::error!("Journal cache invalidation failed: {err}");
                InvalidationReport {
                    success: false,
                    message: format!("Cache invalidation failed: {err}"),
                }
            }
        }
    }
}
