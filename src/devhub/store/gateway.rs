use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::KeyValueStore;
use crate::error::Result;
use crate::model::{Comment, EntityId, Message, Post, Theme};

// Key names match the original browser build of the hub, so a migrated
// localStorage dump drops straight into a hub directory.
pub const KEY_MESSAGES: &str = "devhub_messages";
pub const KEY_POSTS: &str = "devhub_posts";
pub const KEY_COMMENTS: &str = "devhub_comments";
pub const KEY_FAVORITES: &str = "devhub_favorites";
pub const KEY_USERNAME: &str = "devhub_username";
pub const KEY_THEME: &str = "devhub_theme";

/// Everything the gateway persists, as one value. The store keeps its live
/// state in this shape so saving never has to assemble anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub favorites: Vec<EntityId>,
    pub username: Option<String>,
    pub theme: Option<Theme>,
}

/// Keys whose stored value could not be decoded and was replaced by the
/// empty default. Loading never fails over bad data; it reports instead.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub recovered_keys: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.recovered_keys.is_empty()
    }
}

/// Serializes the snapshot to and from a key-value backend, one JSON
/// document per key.
pub struct PersistenceGateway<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads all keys. A missing key yields its empty default; a corrupt
    /// key does the same and lands in the report.
    pub fn load(&self) -> Result<(Snapshot, LoadReport)> {
        let mut report = LoadReport::default();
        let snapshot = Snapshot {
            messages: self.read_or_default(KEY_MESSAGES, &mut report)?,
            posts: self.read_or_default(KEY_POSTS, &mut report)?,
            comments: self.read_or_default(KEY_COMMENTS, &mut report)?,
            favorites: self.read_or_default(KEY_FAVORITES, &mut report)?,
            username: self.read_or_default(KEY_USERNAME, &mut report)?,
            theme: self.read_or_default(KEY_THEME, &mut report)?,
        };
        Ok((snapshot, report))
    }

    /// Writes every key in one synchronous sequence. Callers are
    /// single-threaded, so no partial state is observable.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.write_key(KEY_MESSAGES, &snapshot.messages)?;
        self.write_key(KEY_POSTS, &snapshot.posts)?;
        self.write_key(KEY_COMMENTS, &snapshot.comments)?;
        self.write_key(KEY_FAVORITES, &snapshot.favorites)?;
        self.write_key(KEY_USERNAME, &snapshot.username)?;
        self.write_key(KEY_THEME, &snapshot.theme)?;
        Ok(())
    }

    fn read_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        report: &mut LoadReport,
    ) -> Result<T> {
        match self.backend.read(key)? {
            None => Ok(T::default()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(_) => {
                    report.recovered_keys.push(key.to_string());
                    Ok(T::default())
                }
            },
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }
}
