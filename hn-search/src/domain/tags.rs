use thiserror::Error;

/// A single filter token the search API matches against a record's
/// classification tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Story,
    Comment,
    Poll,
    PollOption,
    ShowHn,
    AskHn,
    FrontPage,
    Job,
    /// Restrict to one author, `author_<name>`.
    Author(String),
    /// Restrict to one story's thread, `story_<id>`.
    StoryId(u64),
}

impl Tag {
    /// Usernames and ids are interpolated as-is; upstream treats them as
    /// opaque ASCII identifiers, so commas and parentheses are not escaped.
    pub fn as_token(&self) -> String {
        match self {
            Tag::Story => "story".to_string(),
            Tag::Comment => "comment".to_string(),
            Tag::Poll => "poll".to_string(),
            Tag::PollOption => "pollopt".to_string(),
            Tag::ShowHn => "show_hn".to_string(),
            Tag::AskHn => "ask_hn".to_string(),
            Tag::FrontPage => "front_page".to_string(),
            Tag::Job => "job".to_string(),
            Tag::Author(name) => format!("author_{}", name),
            Tag::StoryId(id) => format!("story_{}", id),
        }
    }
}

#[derive(Error, Debug)]
#[error("an OR tag group requires at least one tag")]
pub struct EmptyTagGroup;

/// A parenthesized group meaning "any of these tags". The API treats the
/// top-level comma-joined list as AND and only parenthesized groups as OR,
/// so that asymmetry lives here and in [`join_tag_filters`] alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrTags(Vec<Tag>);

impl OrTags {
    pub fn new(tags: Vec<Tag>) -> Result<Self, EmptyTagGroup> {
        if tags.is_empty() {
            return Err(EmptyTagGroup);
        }
        Ok(Self(tags))
    }

    pub fn as_token(&self) -> String {
        let joined = self
            .0
            .iter()
            .map(Tag::as_token)
            .collect::<Vec<_>>()
            .join(",");
        format!("({})", joined)
    }
}

/// One element of the top-level (AND-combined) tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    Single(Tag),
    AnyOf(OrTags),
}

impl TagFilter {
    pub fn as_token(&self) -> String {
        match self {
            TagFilter::Single(tag) => tag.as_token(),
            TagFilter::AnyOf(group) => group.as_token(),
        }
    }
}

impl From<Tag> for TagFilter {
    fn from(tag: Tag) -> Self {
        TagFilter::Single(tag)
    }
}

impl From<OrTags> for TagFilter {
    fn from(group: OrTags) -> Self {
        TagFilter::AnyOf(group)
    }
}

/// Comma-joins the top-level list, which the API combines with AND.
pub(crate) fn join_tag_filters(filters: &[TagFilter]) -> String {
    filters
        .iter()
        .map(TagFilter::as_token)
        .collect::<Vec<_>>()
        .join(",")
}
