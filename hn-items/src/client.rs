use reqwest::header::{HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Item, Updates, User};

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

const USER_AGENT_VALUE: &str = concat!("hn-items/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ItemsError {
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    #[error("ResponseError: {0}")]
    Response(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

/// Thin typed wrapper over the tree-structured item API. Stateless; every
/// call is one independent GET.
pub struct ItemsClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ItemsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ItemsError> {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, "item request");

        let resp = self
            .http
            .get(&url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .send()
            .await
            .map_err(|e| ItemsError::Response(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ItemsError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ItemsError::Parsing(format!("Failed to parse response as JSON: {}", e)))
    }

    /// Largest item id assigned so far.
    pub async fn max_item(&self) -> Result<u64, ItemsError> {
        self.fetch("maxitem.json").await
    }

    pub async fn top_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("topstories.json").await
    }

    pub async fn new_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("newstories.json").await
    }

    pub async fn best_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("beststories.json").await
    }

    pub async fn ask_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("askstories.json").await
    }

    pub async fn show_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("showstories.json").await
    }

    pub async fn job_stories(&self) -> Result<Vec<u64>, ItemsError> {
        self.fetch("jobstories.json").await
    }

    /// Recently changed items and profiles.
    pub async fn updates(&self) -> Result<Updates, ItemsError> {
        self.fetch("updates.json").await
    }

    /// `Ok(None)` when the id does not exist; upstream answers `null`.
    pub async fn item(&self, id: u64) -> Result<Option<Item>, ItemsError> {
        self.fetch(&format!("item/{}.json", id)).await
    }

    /// `Ok(None)` when no such user exists.
    pub async fn user(&self, id: &str) -> Result<Option<User>, ItemsError> {
        self.fetch(&format!("user/{}.json", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_are_joined_without_double_slashes() {
        let client = ItemsClient::with_base_url("https://hacker-news.firebaseio.com/v0/");
        assert_eq!(
            client.endpoint_url("item/8863.json"),
            "https://hacker-news.firebaseio.com/v0/item/8863.json"
        );
        assert_eq!(
            client.endpoint_url("maxitem.json"),
            "https://hacker-news.firebaseio.com/v0/maxitem.json"
        );
    }

    #[test]
    fn default_client_points_at_the_public_api() {
        let client = ItemsClient::new();
        assert_eq!(
            client.endpoint_url("topstories.json"),
            "https://hacker-news.firebaseio.com/v0/topstories.json"
        );
    }

    #[tokio::test]
    async fn transport_failures_surface_as_response_errors() {
        // Nothing listens on the discard port, so this fails locally
        // without touching the network.
        let client = ItemsClient::with_base_url("http://127.0.0.1:9");
        let err = client.max_item().await.unwrap_err();
        assert!(matches!(err, ItemsError::Response(_)));
    }
}
