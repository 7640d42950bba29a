use reqwest::header::{HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    domain::{SearchEnvelope, SearchHit, SearchParams, SearchResponse},
    SearchUrl,
};

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";

const USER_AGENT_VALUE: &str = concat!("hn-search/", env!("CARGO_PKG_VERSION"));

/// Construction-time configuration; the client holds nothing mutable.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    /// Log request URLs and response summaries.
    pub debug: bool,
    /// Log every normalized hit.
    pub obj_debug: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            obj_debug: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    #[error("ResponseError: {0}")]
    Response(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

pub struct SearchClient {
    config: SearchConfig,
    http: reqwest::Client,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchClient {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, SearchError> {
        let resp = self
            .http
            .get(url.as_ref())
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .send()
            .await
            .map_err(|e| SearchError::Response(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            SearchError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// One request/response cycle against the search API.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, SearchError> {
        let url = SearchUrl::new(&self.config.base_url)
            .append_path(endpoint_path(params.sort_by_date))
            .with_query(&params.to_query_string());

        if self.config.debug {
            tracing::debug!(url = url.as_ref(), "search request");
        }

        let envelope: SearchEnvelope = self.fetch(url).await?;
        let response = SearchResponse::from(envelope);

        if self.config.debug {
            tracing::debug!(
                hits = response.data.len(),
                total = response.meta.number_of_hits,
                page = response.meta.current_page,
                "search response"
            );
        }
        if self.config.obj_debug {
            for hit in &response.data {
                tracing::trace!(
                    kind = hit.kind(),
                    object_id = %hit.meta().object_id,
                    "normalized hit"
                );
            }
        }

        Ok(response)
    }

    /// Front-page stories from the last seven days.
    pub async fn front_page(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::front_page()).await
    }

    pub async fn newest(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::newest()).await
    }

    pub async fn comments(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::comments()).await
    }

    pub async fn ask_hn(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::ask_hn()).await
    }

    pub async fn show_hn(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::show_hn()).await
    }

    pub async fn polls(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::polls()).await
    }

    pub async fn jobs(&self) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::jobs()).await
    }

    pub async fn user_all(&self, username: &str) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::user_all(username)).await
    }

    pub async fn user_threads(&self, username: &str) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::user_threads(username)).await
    }

    pub async fn user_submitted(&self, username: &str) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::user_submitted(username)).await
    }

    /// Comments under one story, optionally limited to a single author.
    pub async fn comments_to_story(
        &self,
        story_id: u64,
        by_username: Option<&str>,
    ) -> Result<SearchResponse, SearchError> {
        self.search(&SearchParams::comments_to_story(story_id, by_username))
            .await
    }

    /// The latest "Who is hiring?" thread: locate the newest story posted
    /// by the whoishiring account, then fetch a page of comments under it.
    /// When the lookup comes back empty the first response is returned
    /// as-is and no second request is made.
    pub async fn who_is_hiring(&self) -> Result<SearchResponse, SearchError> {
        let stories = self.search(&SearchParams::hiring_story()).await?;

        let story_id = match hiring_story_id(&stories) {
            Some(id) => id,
            None => return Ok(stories),
        };

        self.search(&SearchParams::hiring_comments(story_id)).await
    }
}

fn endpoint_path(sort_by_date: bool) -> &'static str {
    if sort_by_date {
        "search_by_date"
    } else {
        "search"
    }
}

/// The thread to fetch comments from, if the lookup found one. `None`
/// skips the second request and hands the first response back unchanged.
fn hiring_story_id(stories: &SearchResponse) -> Option<u64> {
    match stories.data.first() {
        Some(SearchHit::Story(story)) => Some(story.story_id),
        _ => None,
    }
}
