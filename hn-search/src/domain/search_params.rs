use chrono::Utc;

use super::{
    join_numeric_filters, join_tag_filters, CompareOp, NumericField, NumericFilter, Tag, TagFilter,
};

const DEFAULT_HITS_PER_PAGE: u32 = 100;
const FRONT_PAGE_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;
const HIRING_ACCOUNT: &str = "whoishiring";

/// Everything one search request can be parameterized with. Plain data;
/// [`to_query_string`](SearchParams::to_query_string) does the encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Free-text query.
    pub query: Option<String>,
    /// Top-level list is AND; use [`super::OrTags`] for OR groups.
    pub tags: Vec<TagFilter>,
    pub numeric_filters: Vec<NumericFilter>,
    /// 0-based. Omitted from the query string when `None`, in which case
    /// the API applies its own default of page 0.
    pub page: Option<u32>,
    /// Clamped to `1..=100` when the query string is built.
    pub hits_per_page: Option<u32>,
    /// Selects the `search_by_date` endpoint instead of the
    /// relevance-ordered `search` endpoint; never sent as a parameter.
    pub sort_by_date: bool,
    pub optional_words: Vec<String>,
    /// Raw filter expression, passed through untouched.
    pub filters: Option<String>,
    /// Defaults to `title` when left empty.
    pub restrict_searchable_attributes: Vec<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            tags: Vec::new(),
            numeric_filters: Vec::new(),
            page: None,
            hits_per_page: None,
            sort_by_date: true,
            optional_words: Vec::new(),
            filters: None,
            restrict_searchable_attributes: Vec::new(),
        }
    }
}

impl SearchParams {
    /// Builds the URL query string. Keys are emitted in a fixed order and
    /// every value is percent-encoded; `hitsPerPage` and
    /// `restrictSearchableAttributes` are always present.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("query", query.to_string()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", join_tag_filters(&self.tags)));
        }
        if !self.numeric_filters.is_empty() {
            pairs.push(("numericFilters", join_numeric_filters(&self.numeric_filters)));
        }
        if !self.optional_words.is_empty() {
            pairs.push(("optionalWords", self.optional_words.join(" ")));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(filters) = self.filters.as_deref().filter(|f| !f.is_empty()) {
            pairs.push(("filters", filters.to_string()));
        }
        pairs.push(("hitsPerPage", self.effective_hits_per_page().to_string()));

        let restrict = if self.restrict_searchable_attributes.is_empty() {
            "title".to_string()
        } else {
            self.restrict_searchable_attributes.join(",")
        };
        pairs.push(("restrictSearchableAttributes", restrict));

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `hitsPerPage` with the API's bounds applied: absent means 100, and
    /// anything outside `1..=100` is clamped.
    pub fn effective_hits_per_page(&self) -> u32 {
        match self.hits_per_page {
            None => DEFAULT_HITS_PER_PAGE,
            Some(n) => n.clamp(1, DEFAULT_HITS_PER_PAGE),
        }
    }

    /// Stories selected for the front page within the last week.
    pub fn front_page() -> Self {
        let cutoff = Utc::now().timestamp() - FRONT_PAGE_WINDOW_SECS;
        Self {
            tags: vec![Tag::FrontPage.into(), Tag::Story.into()],
            numeric_filters: vec![NumericFilter::new(
                NumericField::CreatedAt,
                CompareOp::GreaterOrEqual,
                cutoff,
            )],
            ..Self::default()
        }
    }

    pub fn newest() -> Self {
        Self {
            tags: vec![Tag::Story.into()],
            ..Self::default()
        }
    }

    pub fn comments() -> Self {
        Self {
            tags: vec![Tag::Comment.into()],
            ..Self::default()
        }
    }

    pub fn ask_hn() -> Self {
        Self {
            tags: vec![Tag::AskHn.into()],
            ..Self::default()
        }
    }

    pub fn show_hn() -> Self {
        Self {
            tags: vec![Tag::ShowHn.into()],
            ..Self::default()
        }
    }

    pub fn polls() -> Self {
        Self {
            tags: vec![Tag::Poll.into()],
            ..Self::default()
        }
    }

    pub fn jobs() -> Self {
        Self {
            tags: vec![Tag::Job.into()],
            ..Self::default()
        }
    }

    /// Everything a user has posted, regardless of kind.
    pub fn user_all(username: &str) -> Self {
        Self {
            tags: vec![Tag::Author(username.to_string()).into()],
            ..Self::default()
        }
    }

    pub fn user_threads(username: &str) -> Self {
        Self {
            tags: vec![Tag::Comment.into(), Tag::Author(username.to_string()).into()],
            ..Self::default()
        }
    }

    pub fn user_submitted(username: &str) -> Self {
        Self {
            tags: vec![Tag::Story.into(), Tag::Author(username.to_string()).into()],
            ..Self::default()
        }
    }

    /// Comments under one story, optionally limited to a single author.
    pub fn comments_to_story(story_id: u64, by_username: Option<&str>) -> Self {
        let mut tags: Vec<TagFilter> =
            vec![Tag::Comment.into(), Tag::StoryId(story_id).into()];
        if let Some(username) = by_username {
            tags.push(Tag::Author(username.to_string()).into());
        }
        Self {
            tags,
            ..Self::default()
        }
    }

    /// First step of the hiring lookup: the newest story posted by the
    /// whoishiring account.
    pub(crate) fn hiring_story() -> Self {
        Self {
            tags: vec![
                Tag::Story.into(),
                Tag::Author(HIRING_ACCOUNT.to_string()).into(),
            ],
            hits_per_page: Some(1),
            ..Self::default()
        }
    }

    /// Second step: up to a full page of comments directly under the
    /// located thread.
    pub(crate) fn hiring_comments(story_id: u64) -> Self {
        Self {
            tags: vec![Tag::Comment.into()],
            filters: Some(format!("parent_id={}", story_id)),
            hits_per_page: Some(DEFAULT_HITS_PER_PAGE),
            ..Self::default()
        }
    }
}
