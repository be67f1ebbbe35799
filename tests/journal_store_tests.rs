//! Integration tests for the cached journal store
//!
//! Drives `JournalStore` with a counting fake source so cache hits,
//! time-box expiry, and explicit invalidation are observable without the
//! remote content store.
//!
//! Note: tests that manipulate NOTION_* environment variables are marked
//! #[serial] to prevent races with parallel test execution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use serial_test::serial;

use khaki_journal::{
    ConfigError, ContentCache, ContentItem, ContentSource, JournalStore, StoreConfig,
};

struct FakeSource {
    items: Vec<ContentItem>,
    listing_calls: AtomicUsize,
    item_calls: AtomicUsize,
    block_calls: AtomicUsize,
}

impl FakeSource {
    fn new(items: Vec<ContentItem>) -> Arc<Self> {
        Arc::new(Self {
            items,
            listing_calls: AtomicUsize::new(0),
            item_calls: AtomicUsize::new(0),
            block_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn published_items(&self) -> Vec<ContentItem> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.items.clone()
    }

    async fn item_by_id(&self, id: &str) -> Option<ContentItem> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.items.iter().find(|item| item.id == id).cloned()
    }

    async fn child_blocks(&self, _page_id: &str) -> Vec<Value> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        vec![json!({ "type": "paragraph" })]
    }
}

fn item(id: &str, slug: &str, tags: &[&str]) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: id.to_string(),
        slug: slug.to_string(),
        summary: "A short note on window dressing.".to_string(),
        published: true,
        date: "2026-01-01".to_string(),
        cover_image: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        author: "khaki shop".to_string(),
        last_edited_time: "2026-01-02T00:00:00.000Z".to_string(),
        reading_time: 1,
    }
}

fn sample_items() -> Vec<ContentItem> {
    vec![
        item("p1", "linen-light", &["Linen", "Modern"]),
        item("p2", "wood-blinds", &["Wood", "Modern"]),
        item("p3", "motor-guide", &["Motorized"]),
    ]
}

#[tokio::test]
async fn test_listing_is_cached_across_reads() {
    let source = FakeSource::new(sample_items());
    let store = JournalStore::new(source.clone());

    let first = store.published_items().await;
    let second = store.published_items().await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(source.listing_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalidation_forces_fresh_fetch_inside_time_box() {
    let source = FakeSource::new(sample_items());
    let store = JournalStore::new(source.clone());

    store.published_items().await;
    store.item_by_id("p1").await;
    store.child_blocks("p1").await;

    let report = store.invalidate_cache();
    assert!(report.success);

    store.published_items().await;
    store.item_by_id("p1").await;
    store.child_blocks("p1").await;

    assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);
    assert_eq!(source.item_calls.load(Ordering::SeqCst), 2);
    assert_eq!(source.block_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_expired_entries_refetch() {
    let source = FakeSource::new(sample_items());
    let store = JournalStore::with_cache(source.clone(), ContentCache::with_ttl(Duration::ZERO));

    store.published_items().await;
    store.published_items().await;

    assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_single_item_misses_are_cached() {
    let source = FakeSource::new(sample_items());
    let store = JournalStore::new(source.clone());

    assert!(store.item_by_id("absent").await.is_none());
    assert!(store.item_by_id("absent").await.is_none());

    // The cached "not found" answers the second read
    assert_eq!(source.item_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_item_by_slug_uses_the_listing() {
    let source = FakeSource::new(sample_items());
    let store = JournalStore::new(source.clone());

    let found = store.item_by_slug("wood-blinds").await.unwrap();
    assert_eq!(found.id, "p2");
    assert!(store.item_by_slug("no-such-slug").await.is_none());

    // Both lookups scan the cached listing; no per-id fetches
    assert_eq!(source.listing_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.item_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_items_by_tag_is_case_insensitive() {
    let store = JournalStore::new(FakeSource::new(sample_items()));

    let modern = store.items_by_tag("modern").await;
    assert_eq!(modern.len(), 2);
    assert!(store.items_by_tag("velvet").await.is_empty());
}

#[tokio::test]
async fn test_all_tags_sorted_and_deduplicated() {
    let store = JournalStore::new(FakeSource::new(sample_items()));

    let tags = store.all_tags().await;
    assert_eq!(tags, ["Linen", "Modern", "Motorized", "Wood"]);
}

#[tokio::test]
async fn test_related_items_through_the_store() {
    let items = sample_items();
    let store = JournalStore::new(FakeSource::new(items.clone()));

    let related = store.related_items(&items[0], 2).await;
    assert_eq!(related.len(), 2);
    assert!(related.iter().all(|i| i.id != "p1"));
    // p2 shares "Modern"; p3 backfills
    assert_eq!(related[0].id, "p2");
    assert_eq!(related[1].id, "p3");
}

#[tokio::test]
async fn test_degraded_empty_listing_is_cached_too() {
    let source = FakeSource::new(Vec::new());
    let store = JournalStore::new(source.clone());

    assert!(store.published_items().await.is_empty());
    assert!(store.published_items().await.is_empty());
    assert_eq!(source.listing_calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Environment configuration
// ============================================================================

#[test]
#[serial]
fn test_config_from_env_reads_both_parameters() {
    std::env::set_var("NOTION_API_KEY", "secret_env");
    std::env::set_var("NOTION_DATABASE_ID", "db-env");

    let config = StoreConfig::from_env();
    assert!(config.validate().is_ok());
    assert_eq!(config.api_key, "secret_env");
    assert_eq!(config.database_id, "db-env");

    std::env::remove_var("NOTION_API_KEY");
    std::env::remove_var("NOTION_DATABASE_ID");
}

#[test]
#[serial]
fn test_config_from_env_reports_missing_parameters() {
    std::env::remove_var("NOTION_API_KEY");
    std::env::remove_var("NOTION_DATABASE_ID");

    assert_eq!(
        StoreConfig::from_env().validate(),
        Err(ConfigError::MissingApiKey)
    );

    std::env::set_var("NOTION_API_KEY", "secret_env");
    assert_eq!(
        StoreConfig::from_env().validate(),
        Err(ConfigError::MissingDatabaseId)
    );

    std::env::remove_var("NOTION_API_KEY");
}
