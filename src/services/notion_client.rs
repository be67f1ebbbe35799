//! Notion content store HTTP client
//!
//! Wire types for the store's variant record shape plus the three remote
//! calls the journal needs: database query (published articles), page
//! retrieval, and child block listing. Each page property arrives as a
//! tagged variant; unknown property types deserialize to `Unsupported`
//! rather than failing the whole record.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;

const NOTION_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const USER_AGENT: &str = "khaki-shop-journal/0.1.0 (https://khakishop.kr)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One span of a rich-text or title field
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub plain_text: String,
}

/// Date field payload; `start` is the date the journal displays
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DateSpec {
    pub start: Option<String>,
}

/// One selected option of a multi-select field
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectOption {
    pub name: String,
}

/// A page property: a variant tagged by its `type` field.
///
/// Only the field types the journal schema uses are modeled; anything else
/// becomes `Unsupported` and normalizes to its zero value downstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title { title: Vec<RichTextSpan> },
    RichText { rich_text: Vec<RichTextSpan> },
    Date { date: Option<DateSpec> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    MultiSelect { multi_select: Vec<SelectOption> },
    #[serde(other)]
    Unsupported,
}

impl Property {
    pub fn as_title(&self) -> Option<&[RichTextSpan]> {
        match self {
            Property::Title { title } => Some(title),
            _ => None,
        }
    }

    pub fn as_rich_text(&self) -> Option<&[RichTextSpan]> {
        match self {
            Property::RichText { rich_text } => Some(rich_text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateSpec> {
        match self {
            Property::Date { date } => date.as_ref(),
            _ => None,
        }
    }

    pub fn as_checkbox(&self) -> Option<bool> {
        match self {
            Property::Checkbox { checkbox } => Some(*checkbox),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            Property::Url { url } => url.as_deref(),
            _ => None,
        }
    }

    pub fn as_multi_select(&self) -> Option<&[SelectOption]> {
        match self {
            Property::MultiSelect { multi_select } => Some(multi_select),
            _ => None,
        }
    }
}

/// One raw page record from the content store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
    #[serde(default)]
    pub last_edited_time: String,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct BlockChildren {
    results: Vec<Value>,
}

/// Content store API client
pub struct NotionClient {
    http_client: reqwest::Client,
    config: StoreConfig,
}

impl NotionClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Query the journal database for published pages, newest first.
    pub async fn query_published(&self) -> Result<Vec<Page>, StoreError> {
        let url = format!(
            "{}/databases/{}/query",
            NOTION_BASE_URL, self.config.database_id
        );
        let body = json!({
            "filter": {
                "property": "Published",
                "checkbox": { "equals": true },
            },
            "sorts": [
                { "property": "Date", "direction": "descending" },
            ],
        });

        tracing::debug!(url = %url, "Querying content store database");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let response = Self::check_status(response, &self.config.database_id).await?;

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        tracing::info!(
            count = parsed.results.len(),
            "Retrieved published pages from content store"
        );

        Ok(parsed.results)
    }

    /// Retrieve a single page record by id.
    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page, StoreError> {
        let url = format!("{}/pages/{}", NOTION_BASE_URL, page_id);

        tracing::debug!(page_id = %page_id, "Retrieving page from content store");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let response = Self::check_status(response, page_id).await?;

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// List the child blocks of a page. The records are opaque to this
    /// layer and pass through unnormalized.
    pub async fn list_children(&self, block_id: &str) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/blocks/{}/children", NOTION_BASE_URL, block_id);

        tracing::debug!(block_id = %block_id, "Listing child blocks from content store");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let response = Self::check_status(response, block_id).await?;

        let parsed: BlockChildren = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(parsed.results)
    }

    async fn check_status(
        response: reqwest::Response,
        subject: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();

        if status == 404 {
            return Err(StoreError::NotFound(subject.to_string()));
        }

        if status == 401 || status == 403 {
            return Err(StoreError::Unauthorized(subject.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), error_text));
        }

        Ok(response)
    }
}
