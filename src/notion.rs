//! Notion API client for reading the card database
//!
//! Only the two read calls the exporter needs: query the database for a card
//! by its business code, and list the blocks of a card page. Responses are
//! returned as raw JSON so they can be cached verbatim.

use crate::error::{DeckError, Result};
use serde_json::{json, Value};

/// Public Notion API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

const USER_AGENT: &str = "deck_render/1.0";

/// Largest page size the blocks endpoint accepts
const PAGE_SIZE: u32 = 100;

/// Read-only client for one Notion database
pub struct NotionClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) database_id: String,
    pub(crate) base_url: String,
}

impl NotionClient {
    /// Creates a client for `database_id` authenticated with `api_key`.
    pub fn new(api_key: String, database_id: String) -> Self {
        log::debug!("Creating Notion client for database {}", database_id);
        Self {
            client: reqwest::Client::new(),
            api_key,
            database_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another endpoint (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Query the database for pages whose text `property` equals `code`
    pub async fn query_by_code(&self, property: &str, code: &str) -> Result<Value> {
        let url = format!(
            "{}/databases/{}/query",
            self.base_url,
            urlencoding::encode(&self.database_id)
        );
        let body = json!({
            "filter": {
                "and": [
                    { "property": property, "rich_text": { "equals": code } }
                ]
            }
        });

        log::debug!("Querying Notion for {} = {}", property, code);
        self.send(self.client.post(&url).json(&body)).await
    }

    /// List all child blocks of a page, following pagination.
    ///
    /// Pages are merged into a single list document so callers (and the
    /// cache) see one `results` array.
    pub async fn list_children(&self, block_id: &str) -> Result<Value> {
        let base = format!(
            "{}/blocks/{}/children?page_size={}",
            self.base_url,
            urlencoding::encode(block_id),
            PAGE_SIZE
        );

        log::debug!("Listing blocks of {}", block_id);
        let mut merged = self.send(self.client.get(&base)).await?;
        let mut cursor = next_cursor(&merged);

        while let Some(start) = cursor {
            let url = format!("{}&start_cursor={}", base, urlencoding::encode(&start));
            log::debug!("Fetching next block page of {} ({})", block_id, start);
            let page = self.send(self.client.get(&url)).await?;
            cursor = next_cursor(&page);

            let more = match page.get("results") {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            };
            if let Some(Value::Array(results)) = merged.get_mut("results") {
                results.extend(more);
            }
        }

        if let Some(doc) = merged.as_object_mut() {
            doc.insert("has_more".to_string(), Value::Bool(false));
            doc.insert("next_cursor".to_string(), Value::Null);
        }
        Ok(merged)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<Value>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::debug!("Notion answered {}: {}", status, body);
            Err(DeckError::HttpStatus { status, body })
        }
    }
}

fn next_cursor(page: &Value) -> Option<String> {
    if page.get("has_more").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    page.get("next_cursor")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
#[path = "notion_tests.rs"]
mod tests;
