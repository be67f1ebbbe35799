//! Content synchronization and caching core for the khaki shop journal
//!
//! Bridges the remote headless content store and the storefront's journal
//! pages: raw records with per-field-typed variant properties are
//! normalized into immutable [`ContentItem`]s, fetch operations sit behind
//! a one-hour time-boxed cache with named invalidation tags, and a
//! shared-tag relevance ranking drives the "related posts" rail.
//!
//! Public operations never error: a failed or misconfigured fetch degrades
//! to an empty or `None` value (logged via `tracing`), and the storefront
//! renders its usual empty state.

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod related;
pub mod services;
pub mod store;

pub use crate::cache::{CacheTag, ContentCache, CACHE_TTL};
pub use crate::config::{ConfigError, StoreConfig};
pub use crate::error::StoreError;
pub use crate::models::ContentItem;
pub use crate::related::{related_items, DEFAULT_RELATED_LIMIT};
pub use crate::services::pipeline::{ContentSource, NotionSource, DEFAULT_AUTHOR};
pub use crate::store::{InvalidationReport, JournalStore};
