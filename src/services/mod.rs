//! Remote content store integration

pub mod notion_client;
pub mod pipeline;
