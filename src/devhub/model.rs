use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::HubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Message,
    Post,
    Comment,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Message => "msg",
            EntityKind::Post => "post",
            EntityKind::Comment => "cmt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Message => "message",
            EntityKind::Post => "post",
            EntityKind::Comment => "comment",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "msg" => Some(EntityKind::Message),
            "post" => Some(EntityKind::Post),
            "cmt" => Some(EntityKind::Comment),
            _ => None,
        }
    }
}

/// Identifier shared by every entity the hub stores.
///
/// The textual form is `<kind-prefix>_<uuid>` (e.g. `post_4be0a6…`), which keeps
/// ids unique across collections and lets a raw id reveal what it points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn generate(kind: EntityKind) -> Self {
        Self(format!("{}_{}", kind.prefix(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind encoded in the id prefix, if the id is well formed.
    pub fn kind(&self) -> Option<EntityKind> {
        let prefix = self.0.split('_').next()?;
        EntityKind::from_prefix(prefix)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EntityId>,
}

impl Message {
    pub fn new(author: String, text: String, reply_to: Option<EntityId>) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Message),
            author,
            text,
            timestamp: Utc::now(),
            reply_to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub author: String,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub code: String,
    pub language: String,
    // Images travel inline as data URIs so a hub directory stays self-contained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_number: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl Post {
    pub fn new(author: String, draft: PostDraft) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Post),
            author,
            title: draft.title,
            subject: draft.subject,
            description: draft.description,
            code: draft.code,
            language: draft.language,
            image: draft.image,
            post_number: draft.post_number,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EntityId>,
}

impl Comment {
    pub fn new(post_id: EntityId, author: String, text: String, reply_to: Option<EntityId>) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Comment),
            post_id,
            author,
            text,
            timestamp: Utc::now(),
            reply_to,
        }
    }
}

/// Fields a caller supplies when creating a post. The store fills in
/// id, author and timestamp.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub image: Option<String>,
    pub post_number: Option<u32>,
}

/// Full replacement payload for editing a post. `image` and `post_number`
/// are `None` to keep the current values; the other fields always overwrite.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub image: Option<String>,
    pub post_number: Option<u32>,
}

/// One entry of the unified feed. Serializes with a `type` tag so consumers
/// can tell the variants apart without sniffing fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedItem {
    Message(Message),
    Post(Post),
    Comment(Comment),
}

impl FeedItem {
    pub fn id(&self) -> &EntityId {
        match self {
            FeedItem::Message(m) => &m.id,
            FeedItem::Post(p) => &p.id,
            FeedItem::Comment(c) => &c.id,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            FeedItem::Message(m) => &m.author,
            FeedItem::Post(p) => &p.author,
            FeedItem::Comment(c) => &c.author,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            FeedItem::Message(m) => m.timestamp,
            FeedItem::Post(p) => p.timestamp,
            FeedItem::Comment(c) => c.timestamp,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            FeedItem::Message(_) => EntityKind::Message,
            FeedItem::Post(_) => EntityKind::Post,
            FeedItem::Comment(_) => EntityKind::Comment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(HubError::Validation(format!(
                "Unknown theme '{}' (expected 'dark' or 'light')",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_their_kind_prefix() {
        let id = EntityId::generate(EntityKind::Post);
        assert!(id.as_str().starts_with("post_"));
        assert_eq!(id.kind(), Some(EntityKind::Post));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = EntityId::generate(EntityKind::Message);
        let b = EntityId::generate(EntityKind::Message);
        assert_ne!(a, b);
    }

    #[test]
    fn foreign_ids_have_no_kind() {
        let id = EntityId::from("1716322m");
        assert_eq!(id.kind(), None);
    }

    #[test]
    fn feed_item_serializes_with_type_tag() {
        let item = FeedItem::Message(Message::new("ada".into(), "hi".into(), None));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["author"], "ada");
    }

    #[test]
    fn theme_round_trips_through_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn message_serde_omits_missing_reply() {
        let m = Message::new("ada".into(), "hi".into(), None);
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("reply_to"));

        let m = Message::new("ada".into(), "hi".into(), Some(EntityId::from("msg_x")));
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("reply_to"));
    }
}
