use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One node of the item tree: story, comment, job, poll, or poll option.
/// Almost everything is optional; deleted and dead items keep only their id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub dead: Option<bool>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub poll: Option<u64>,
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parts: Vec<u64>,
    #[serde(default)]
    pub descendants: Option<u64>,
}

impl Item {
    /// Submission time as a UTC timestamp.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.time
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
    }

    pub fn is_alive(&self) -> bool {
        !self.dead.unwrap_or(false) && !self.deleted.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub created: u64,
    pub karma: i64,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub submitted: Vec<u64>,
}

impl User {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created as i64, 0)
    }
}

/// Recently changed items and profiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Updates {
    pub items: Vec<u64>,
    pub profiles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_item_deserializes() {
        let item: Item = serde_json::from_str(
            r#"{
                "by": "dhouston",
                "descendants": 71,
                "id": 8863,
                "kids": [8952, 9224],
                "score": 111,
                "time": 1175714200,
                "title": "My YC app: Dropbox - Throw away your USB drive",
                "type": "story",
                "url": "http://www.getdropbox.com/u/2/screencast.html"
            }"#,
        )
        .unwrap();

        assert_eq!(item.id, 8863);
        assert_eq!(item.item_type.as_deref(), Some("story"));
        assert_eq!(item.kids, vec![8952, 9224]);
        assert_eq!(item.posted_at().unwrap().timestamp(), 1175714200);
        assert!(item.is_alive());
    }

    #[test]
    fn deleted_item_keeps_only_its_id() {
        let item: Item = serde_json::from_str(r#"{"id": 5, "deleted": true}"#).unwrap();
        assert!(!item.is_alive());
        assert!(item.posted_at().is_none());
    }

    #[test]
    fn missing_item_is_a_json_null() {
        let item: Option<Item> = serde_json::from_str("null").unwrap();
        assert!(item.is_none());
    }

    #[test]
    fn user_deserializes() {
        let user: User = serde_json::from_str(
            r#"{
                "about": "This is a test",
                "created": 1173923446,
                "id": "jl",
                "karma": 2937,
                "submitted": [8265435, 8168423]
            }"#,
        )
        .unwrap();

        assert_eq!(user.id, "jl");
        assert_eq!(user.karma, 2937);
        assert_eq!(user.created_at().unwrap().timestamp(), 1173923446);
    }

    #[test]
    fn updates_deserialize() {
        let updates: Updates = serde_json::from_str(
            r#"{"items": [8423305, 8420805], "profiles": ["thefox", "mdda"]}"#,
        )
        .unwrap();

        assert_eq!(updates.items.len(), 2);
        assert_eq!(updates.profiles, vec!["thefox", "mdda"]);
    }
}
