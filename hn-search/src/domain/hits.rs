use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::text;

/// One highlighted field from the search engine, emphasis markup intact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HighlightResult {
    pub value: String,
    #[serde(rename = "matchLevel")]
    pub match_level: String,
    #[serde(rename = "matchedWords", default)]
    pub matched_words: Vec<String>,
    #[serde(rename = "fullyHighlighted", default)]
    pub fully_highlighted: Option<bool>,
}

/// A hit exactly as the search endpoint returns it. Deliberately lenient:
/// classification decides what the record is, and missing fields fall back
/// to defaults instead of failing the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_highlightResult", default)]
    pub highlight_result: HashMap<String, HighlightResult>,
    #[serde(rename = "_tags", default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_at_i: i64,
    #[serde(rename = "objectID", default)]
    pub object_id: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub children: Vec<u64>,
    #[serde(default)]
    pub num_comments: Option<u64>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub story_id: Option<u64>,
    #[serde(default)]
    pub story_text: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default)]
    pub comment_text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub job_text: Option<String>,
    #[serde(default)]
    pub parts: Vec<u64>,
}

/// Fields shared by every classified hit.
#[derive(Debug, Clone, PartialEq)]
pub struct HitMeta {
    /// Highlighted fields, filtered to entries that actually matched.
    pub highlight_result: HashMap<String, HighlightResult>,
    /// Raw classification tags from upstream.
    pub tags: Vec<String>,
    pub author: String,
    /// Parsed `created_at`; `None` when upstream sends an unparsable date.
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_i: i64,
    pub object_id: String,
    pub updated_at: String,
}

impl HitMeta {
    /// Direct link to the item on news.ycombinator.com.
    pub fn permalink(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.object_id)
    }
}

impl From<&RawHit> for HitMeta {
    fn from(raw: &RawHit) -> Self {
        let highlight_result = raw
            .highlight_result
            .iter()
            .filter(|(_, highlight)| highlight.match_level != "none")
            .map(|(field, highlight)| (field.clone(), highlight.clone()))
            .collect();

        Self {
            highlight_result,
            tags: raw.tags.clone(),
            author: raw.author.clone(),
            created_at: DateTime::parse_from_rfc3339(&raw.created_at)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
            created_at_i: raw.created_at_i,
            object_id: raw.object_id.clone(),
            updated_at: raw.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryHit {
    pub meta: HitMeta,
    pub children: Vec<u64>,
    pub num_comments: Option<u64>,
    pub points: Option<i64>,
    pub story_id: u64,
    pub story_text: Option<String>,
    pub title: String,
    pub url: Option<String>,
}

impl StoryHit {
    /// True for text posts (Ask HN and similar).
    pub fn is_self_post(&self) -> bool {
        self.story_text.as_deref().is_some_and(|text| !text.is_empty())
    }

    pub fn has_external_url(&self) -> bool {
        self.url.is_some()
    }

    /// The story's own link, or its HN permalink for self posts.
    pub fn effective_url(&self) -> String {
        self.url.clone().unwrap_or_else(|| self.meta.permalink())
    }

    /// Title with HTML entities decoded.
    pub fn display_title(&self) -> String {
        text::decode_entities(&self.title)
    }
}

impl From<RawHit> for StoryHit {
    fn from(raw: RawHit) -> Self {
        let meta = HitMeta::from(&raw);
        // Older records omit story_id on the story itself; fall back to
        // the object id, which is the same item.
        let story_id = raw
            .story_id
            .or_else(|| raw.object_id.parse().ok())
            .unwrap_or_default();

        Self {
            meta,
            children: raw.children,
            num_comments: raw.num_comments,
            points: raw.points,
            story_id,
            story_text: raw.story_text,
            title: raw.title.unwrap_or_default(),
            url: raw.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentHit {
    pub meta: HitMeta,
    pub children: Vec<u64>,
    pub parent_id: Option<u64>,
    pub points: Option<i64>,
    pub story_id: u64,
    pub story_title: String,
    pub comment_text: Option<String>,
}

impl CommentHit {
    /// A direct reply to the story rather than to another comment.
    pub fn is_root_comment(&self) -> bool {
        self.parent_id == Some(self.story_id)
    }

    pub fn display_title(&self) -> String {
        format!(
            "New comment by {} in \"{}\"",
            self.meta.author,
            text::decode_entities(&self.story_title)
        )
    }

    /// Comment body with paragraph markup stripped and entities decoded.
    pub fn decoded_comment_text(&self) -> Option<String> {
        self.comment_text.as_deref().map(text::decode_fragment)
    }
}

impl From<RawHit> for CommentHit {
    fn from(raw: RawHit) -> Self {
        let meta = HitMeta::from(&raw);

        Self {
            meta,
            children: raw.children,
            parent_id: raw.parent_id,
            points: raw.points,
            story_id: raw.story_id.unwrap_or_default(),
            story_title: raw.story_title.unwrap_or_default(),
            comment_text: raw.comment_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollHit {
    pub meta: HitMeta,
    pub children: Vec<u64>,
    pub num_comments: Option<u64>,
    /// Ids of the poll's options.
    pub parts: Vec<u64>,
    pub points: Option<i64>,
    pub title: String,
}

impl PollHit {
    pub fn display_title(&self) -> String {
        text::decode_entities(&self.title)
    }
}

impl From<RawHit> for PollHit {
    fn from(raw: RawHit) -> Self {
        let meta = HitMeta::from(&raw);

        Self {
            meta,
            children: raw.children,
            num_comments: raw.num_comments,
            parts: raw.parts,
            points: raw.points,
            title: raw.title.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollOptionHit {
    pub meta: HitMeta,
    /// Vote count; poll options always carry one.
    pub points: i64,
}

impl From<RawHit> for PollOptionHit {
    fn from(raw: RawHit) -> Self {
        let meta = HitMeta::from(&raw);

        Self {
            meta,
            points: raw.points.unwrap_or_default(),
        }
    }
}

/// Job postings carry either an external link or inline text, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobContent {
    Url(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobHit {
    pub meta: HitMeta,
    pub title: String,
    pub content: JobContent,
}

impl JobHit {
    pub fn display_title(&self) -> String {
        text::decode_entities(&self.title)
    }
}

impl From<RawHit> for JobHit {
    fn from(raw: RawHit) -> Self {
        let meta = HitMeta::from(&raw);
        let content = match (raw.url, raw.job_text) {
            (Some(url), _) => JobContent::Url(url),
            (None, Some(job_text)) => JobContent::Text(job_text),
            (None, None) => JobContent::Text(String::new()),
        };

        Self {
            meta,
            title: raw.title.unwrap_or_default(),
            content,
        }
    }
}

/// A record whose tags match none of the known content kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericHit {
    pub meta: HitMeta,
}

impl From<RawHit> for GenericHit {
    fn from(raw: RawHit) -> Self {
        Self {
            meta: HitMeta::from(&raw),
        }
    }
}

/// A classified search hit. Classification inspects the raw tag list in a
/// fixed priority order; the first matching token wins, so a record tagged
/// both `story` and `front_page` is a story.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    Story(StoryHit),
    Comment(CommentHit),
    Poll(PollHit),
    PollOption(PollOptionHit),
    Job(JobHit),
    Other(GenericHit),
}

impl SearchHit {
    /// Discriminant string mirroring the upstream type tags; `hit` for
    /// records matching none of them.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchHit::Story(_) => "story",
            SearchHit::Comment(_) => "comment",
            SearchHit::Poll(_) => "poll",
            SearchHit::PollOption(_) => "pollopt",
            SearchHit::Job(_) => "job",
            SearchHit::Other(_) => "hit",
        }
    }

    pub fn meta(&self) -> &HitMeta {
        match self {
            SearchHit::Story(hit) => &hit.meta,
            SearchHit::Comment(hit) => &hit.meta,
            SearchHit::Poll(hit) => &hit.meta,
            SearchHit::PollOption(hit) => &hit.meta,
            SearchHit::Job(hit) => &hit.meta,
            SearchHit::Other(hit) => &hit.meta,
        }
    }
}

impl From<RawHit> for SearchHit {
    fn from(raw: RawHit) -> Self {
        let has = |token: &str| raw.tags.iter().any(|tag| tag == token);
        let kind = if has("story") {
            "story"
        } else if has("comment") {
            "comment"
        } else if has("poll") {
            "poll"
        } else if has("pollopt") {
            "pollopt"
        } else if has("job") {
            "job"
        } else {
            "hit"
        };

        match kind {
            "story" => SearchHit::Story(StoryHit::from(raw)),
            "comment" => SearchHit::Comment(CommentHit::from(raw)),
            "poll" => SearchHit::Poll(PollHit::from(raw)),
            "pollopt" => SearchHit::PollOption(PollOptionHit::from(raw)),
            "job" => SearchHit::Job(JobHit::from(raw)),
            _ => SearchHit::Other(GenericHit::from(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_story() -> RawHit {
        serde_json::from_str(
            r#"{
                "_highlightResult": {
                    "title": {"value": "<em>Dropbox</em>", "matchLevel": "full", "matchedWords": ["dropbox"]},
                    "url": {"value": "http://www.getdropbox.com", "matchLevel": "none", "matchedWords": []}
                },
                "_tags": ["story", "author_dhouston", "story_8863", "front_page"],
                "author": "dhouston",
                "created_at": "2007-04-04T19:16:40Z",
                "created_at_i": 1175714200,
                "objectID": "8863",
                "updated_at": "2023-10-08T12:00:00Z",
                "children": [8952, 9224],
                "num_comments": 71,
                "points": 111,
                "story_id": 8863,
                "title": "My YC app: Dropbox &amp; more",
                "url": "http://www.getdropbox.com/u/2/screencast.html"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn tag_priority_classifies_front_page_records_as_stories() {
        let hit = SearchHit::from(raw_story());
        assert_eq!(hit.kind(), "story");
        assert!(matches!(hit, SearchHit::Story(_)));
    }

    #[test]
    fn classification_is_value_equal_across_runs() {
        let first = SearchHit::from(raw_story());
        let second = SearchHit::from(raw_story());
        assert_eq!(first, second);
    }

    #[test]
    fn highlight_entries_without_a_match_are_dropped() {
        let hit = SearchHit::from(raw_story());
        let highlights = &hit.meta().highlight_result;
        assert!(highlights.contains_key("title"));
        assert!(!highlights.contains_key("url"));
        assert_eq!(highlights["title"].value, "<em>Dropbox</em>");
    }

    #[test]
    fn created_at_parses_to_utc() {
        let hit = SearchHit::from(raw_story());
        let created_at = hit.meta().created_at.unwrap();
        assert_eq!(created_at.timestamp(), 1175714200);
    }

    #[test]
    fn unparsable_created_at_yields_none_not_an_error() {
        let mut raw = raw_story();
        raw.created_at = "not a date".to_string();
        let hit = SearchHit::from(raw);
        assert!(hit.meta().created_at.is_none());
    }

    #[test]
    fn story_accessors_derive_from_fields() {
        let hit = match SearchHit::from(raw_story()) {
            SearchHit::Story(story) => story,
            other => panic!("expected story, got {}", other.kind()),
        };

        assert!(hit.has_external_url());
        assert!(!hit.is_self_post());
        assert_eq!(
            hit.effective_url(),
            "http://www.getdropbox.com/u/2/screencast.html"
        );
        assert_eq!(hit.display_title(), "My YC app: Dropbox & more");
        assert_eq!(
            hit.meta.permalink(),
            "https://news.ycombinator.com/item?id=8863"
        );
    }

    #[test]
    fn self_post_falls_back_to_permalink() {
        let mut raw = raw_story();
        raw.url = None;
        raw.story_text = Some("I made a thing".to_string());
        let hit = StoryHit::from(raw);

        assert!(hit.is_self_post());
        assert!(!hit.has_external_url());
        assert_eq!(
            hit.effective_url(),
            "https://news.ycombinator.com/item?id=8863"
        );
    }

    #[test]
    fn root_comments_point_at_their_story() {
        let raw = RawHit {
            tags: vec!["comment".to_string()],
            author: "pg".to_string(),
            object_id: "9001".to_string(),
            parent_id: Some(8863),
            story_id: Some(8863),
            story_title: Some("My YC app: Dropbox &amp; more".to_string()),
            comment_text: Some("<p>Nice!</p>".to_string()),
            ..RawHit::default()
        };
        let hit = CommentHit::from(raw);

        assert!(hit.is_root_comment());
        assert_eq!(
            hit.display_title(),
            "New comment by pg in \"My YC app: Dropbox & more\""
        );
        assert_eq!(hit.decoded_comment_text().unwrap(), "Nice!");
    }

    #[test]
    fn nested_comments_are_not_root() {
        let raw = RawHit {
            tags: vec!["comment".to_string()],
            parent_id: Some(9001),
            story_id: Some(8863),
            ..RawHit::default()
        };
        assert!(!CommentHit::from(raw).is_root_comment());
    }

    #[test]
    fn job_url_wins_over_text() {
        let raw = RawHit {
            tags: vec!["job".to_string()],
            title: Some("Hiring".to_string()),
            url: Some("https://example.com/jobs".to_string()),
            job_text: Some("ignored".to_string()),
            ..RawHit::default()
        };
        let hit = JobHit::from(raw);
        assert_eq!(
            hit.content,
            JobContent::Url("https://example.com/jobs".to_string())
        );
    }

    #[test]
    fn job_without_url_keeps_its_text() {
        let raw = RawHit {
            tags: vec!["job".to_string()],
            job_text: Some("Come work with us".to_string()),
            ..RawHit::default()
        };
        let hit = JobHit::from(raw);
        assert_eq!(hit.content, JobContent::Text("Come work with us".to_string()));
    }

    #[test]
    fn unknown_tags_fall_back_to_generic() {
        let raw = RawHit {
            tags: vec!["author_pg".to_string()],
            object_id: "1".to_string(),
            ..RawHit::default()
        };
        let hit = SearchHit::from(raw);
        assert_eq!(hit.kind(), "hit");
    }

    #[test]
    fn pollopt_points_default_to_zero_when_missing() {
        let raw = RawHit {
            tags: vec!["pollopt".to_string()],
            ..RawHit::default()
        };
        let hit = SearchHit::from(raw);
        assert_eq!(hit.kind(), "pollopt");
        match hit {
            SearchHit::PollOption(option) => assert_eq!(option.points, 0),
            other => panic!("expected pollopt, got {}", other.kind()),
        }
    }

    #[test]
    fn comment_priority_beats_poll() {
        let raw = RawHit {
            tags: vec!["poll".to_string(), "comment".to_string()],
            ..RawHit::default()
        };
        assert_eq!(SearchHit::from(raw).kind(), "comment");
    }
}
