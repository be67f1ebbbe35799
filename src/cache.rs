//! Time-boxed cache with named invalidation tags
//!
//! Process-wide shared state for the three fetch operations. Each entry is
//! stamped with its creation instant and stays valid for [`CACHE_TTL`];
//! entries grouped under a [`CacheTag`] can be dropped in bulk regardless of
//! age. The cache is an explicit component handed to the store facade, so
//! tests substitute their own (shorter-lived or pre-warmed) instance.
//!
//! Lock discipline: no await is ever held across the lock. A poisoned lock
//! degrades reads to a miss; only explicit invalidation reports it.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;

use crate::models::ContentItem;

/// How long a cached value stays valid without explicit invalidation
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Named entry groups, the unit of bulk invalidation.
///
/// Distinct from an article's topical tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTag {
    /// The published-items listing
    Listing,
    /// Single items keyed by store id
    Item,
    /// Child block lists keyed by page id
    Blocks,
}

/// Every tag, in the order the invalidation trigger reports them
pub const ALL_TAGS: [CacheTag; 3] = [CacheTag::Listing, CacheTag::Item, CacheTag::Blocks];

/// The cache lock was poisoned by a panicking writer
#[derive(Debug, Error)]
#[error("journal cache is unavailable (poisoned lock)")]
pub struct CacheUnavailable;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    created: Instant,
}

impl<T: Clone> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            created: Instant::now(),
        }
    }

    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.created.elapsed() < ttl).then(|| self.value.clone())
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    listing: Option<Entry<Vec<ContentItem>>>,
    items: HashMap<String, Entry<Option<ContentItem>>>,
    blocks: HashMap<String, Entry<Vec<Value>>>,
}

/// Keyed store + expiry policy + tag index for the journal fetch operations
#[derive(Debug)]
pub struct ContentCache {
    inner: RwLock<CacheInner>,
    ttl: Duration,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            ttl,
        }
    }

    /// The cached listing, if present and within the time box.
    pub fn listing(&self) -> Option<Vec<ContentItem>> {
        let inner = self.inner.read().ok()?;
        inner.listing.as_ref().and_then(|entry| entry.fresh(self.ttl))
    }

    pub fn store_listing(&self, items: Vec<ContentItem>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.listing = Some(Entry::new(items));
        }
    }

    /// The cached single-item result for `id`, if fresh. The outer `Option`
    /// is hit/miss; the inner one is the cached lookup outcome (a cached
    /// "not found" is still a hit).
    pub fn item(&self, id: &str) -> Option<Option<ContentItem>> {
        let inner = self.inner.read().ok()?;
        inner.items.get(id).and_then(|entry| entry.fresh(self.ttl))
    }

    pub fn store_item(&self, id: &str, item: Option<ContentItem>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.items.insert(id.to_string(), Entry::new(item));
        }
    }

    /// The cached block list for `page_id`, if fresh.
    pub fn blocks(&self, page_id: &str) -> Option<Vec<Value>> {
        let inner = self.inner.read().ok()?;
        inner.blocks.get(page_id).and_then(|entry| entry.fresh(self.ttl))
    }

    pub fn store_blocks(&self, page_id: &str, blocks: Vec<Value>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.blocks.insert(page_id.to_string(), Entry::new(blocks));
        }
    }

    /// Drop every entry under the given tags, regardless of age.
    pub fn invalidate(&self, tags: &[CacheTag]) -> Result<(), CacheUnavailable> {
        let mut inner = self.inner.write().map_err(|_| CacheUnavailable)?;
        for tag in tags {
            match tag {
                CacheTag::Listing => inner.listing = None,
                CacheTag::Item => inner.items.clear(),
                CacheTag::Blocks => inner.blocks.clear(),
            }
        }
        Ok(())
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}
