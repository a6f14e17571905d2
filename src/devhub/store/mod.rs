//! In-memory source of truth plus its persistence seam.
//!
//! `EntityStore` owns the three collections, the favorites set and the
//! current user. Every mutation validates first, touches memory second and
//! persists last, so a failed call leaves both memory and disk untouched.

pub mod backend;
pub mod fs;
pub mod gateway;
pub mod memory;

use chrono::Utc;

use crate::error::{HubError, Result};
use crate::model::{Comment, EntityId, Message, Post, PostDraft, PostUpdate, Theme};
use backend::KeyValueStore;
use gateway::{LoadReport, PersistenceGateway, Snapshot};

/// What `repair` cleaned out of a snapshot written by older or damaged
/// stores.
#[derive(Debug, Default, PartialEq)]
pub struct RepairReport {
    pub dangling_comments: usize,
    pub orphan_favorites: usize,
    pub duplicate_ids: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_comments == 0 && self.orphan_favorites == 0 && self.duplicate_ids == 0
    }
}

pub struct EntityStore<B: KeyValueStore> {
    gateway: PersistenceGateway<B>,
    data: Snapshot,
}

impl<B: KeyValueStore> EntityStore<B> {
    /// Empty store over a backend, nothing read. Tests start here.
    pub fn with_backend(backend: B) -> Self {
        Self {
            gateway: PersistenceGateway::new(backend),
            data: Snapshot::default(),
        }
    }

    /// Loads whatever the backend holds. Corrupt keys degrade to empty and
    /// are listed in the report for the caller to surface.
    pub fn open(backend: B) -> Result<(Self, LoadReport)> {
        let gateway = PersistenceGateway::new(backend);
        let (data, report) = gateway.load()?;
        Ok((Self { gateway, data }, report))
    }

    pub fn backend(&self) -> &B {
        self.gateway.backend()
    }

    pub fn messages(&self) -> &[Message] {
        &self.data.messages
    }

    pub fn posts(&self) -> &[Post] {
        &self.data.posts
    }

    pub fn comments(&self) -> &[Comment] {
        &self.data.comments
    }

    pub fn favorites(&self) -> &[EntityId] {
        &self.data.favorites
    }

    pub fn current_user(&self) -> Option<&str> {
        self.data.username.as_deref()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.data.theme
    }

    pub fn post(&self, id: &EntityId) -> Option<&Post> {
        self.data.posts.iter().find(|p| &p.id == id)
    }

    pub fn message(&self, id: &EntityId) -> Option<&Message> {
        self.data.messages.iter().find(|m| &m.id == id)
    }

    pub fn comment(&self, id: &EntityId) -> Option<&Comment> {
        self.data.comments.iter().find(|c| &c.id == id)
    }

    pub fn is_favorite(&self, id: &EntityId) -> bool {
        self.data.favorites.contains(id)
    }

    pub fn add_message(&mut self, text: &str, reply_to: Option<EntityId>) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HubError::Validation("Message text cannot be empty".into()));
        }
        let author = self.author()?;
        let message = Message::new(author, text.to_string(), reply_to);
        self.data.messages.push(message.clone());
        self.persist()?;
        Ok(message)
    }

    pub fn add_post(&mut self, draft: PostDraft) -> Result<Post> {
        validate_post_fields(&draft.title, &draft.subject, &draft.code)?;
        let author = self.author()?;
        let post = Post::new(author, draft);
        self.data.posts.push(post.clone());
        self.persist()?;
        Ok(post)
    }

    /// Replaces the editable fields and refreshes the timestamp. The stored
    /// image and number survive unless the update carries replacements.
    pub fn edit_post(&mut self, id: &EntityId, update: PostUpdate) -> Result<Post> {
        validate_post_fields(&update.title, &update.subject, &update.code)?;
        let post = self
            .data
            .posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| HubError::NotFound(id.clone()))?;

        post.title = update.title;
        post.subject = update.subject;
        post.description = update.description;
        post.code = update.code;
        post.language = update.language;
        if let Some(image) = update.image {
            post.image = Some(image);
        }
        if let Some(number) = update.post_number {
            post.post_number = Some(number);
        }
        post.timestamp = Utc::now();

        let edited = post.clone();
        self.persist()?;
        Ok(edited)
    }

    /// Removes the post, every comment under it and its favorites entry.
    /// Returns false (and writes nothing) when the id is already gone.
    pub fn delete_post(&mut self, id: &EntityId) -> Result<bool> {
        let before = self.data.posts.len();
        self.data.posts.retain(|p| &p.id != id);
        if self.data.posts.len() == before {
            return Ok(false);
        }
        self.data.comments.retain(|c| &c.post_id != id);
        self.data.favorites.retain(|fav| fav != id);
        self.persist()?;
        Ok(true)
    }

    pub fn add_comment(
        &mut self,
        post_id: &EntityId,
        text: &str,
        reply_to: Option<EntityId>,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HubError::Validation("Comment text cannot be empty".into()));
        }
        if self.post(post_id).is_none() {
            return Err(HubError::NotFound(post_id.clone()));
        }
        let author = self.author()?;
        let comment = Comment::new(post_id.clone(), author, text.to_string(), reply_to);
        self.data.comments.push(comment.clone());
        self.persist()?;
        Ok(comment)
    }

    pub fn delete_message(&mut self, id: &EntityId) -> Result<bool> {
        let before = self.data.messages.len();
        self.data.messages.retain(|m| &m.id != id);
        if self.data.messages.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn delete_comment(&mut self, id: &EntityId) -> Result<bool> {
        let before = self.data.comments.len();
        self.data.comments.retain(|c| &c.id != id);
        if self.data.comments.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Flips favorite membership and returns the new state.
    pub fn toggle_favorite(&mut self, post_id: &EntityId) -> Result<bool> {
        if self.post(post_id).is_none() {
            return Err(HubError::NotFound(post_id.clone()));
        }
        let now_favorite = if self.data.favorites.contains(post_id) {
            self.data.favorites.retain(|fav| fav != post_id);
            false
        } else {
            self.data.favorites.push(post_id.clone());
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    pub fn set_current_user(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HubError::Validation("Username cannot be empty".into()));
        }
        self.data.username = Some(name.to_string());
        self.persist()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.data.theme = Some(theme);
        self.persist()
    }

    /// Enforces the invariants tolerated from older snapshots: comments must
    /// point at a live post, favorites must reference posts, ids must be
    /// unique within their collection (first occurrence wins). Persists only
    /// when something actually changed.
    pub fn repair(&mut self) -> Result<RepairReport> {
        let mut report = RepairReport::default();

        report.duplicate_ids += dedup_by_id(&mut self.data.posts, |p| &p.id);
        report.duplicate_ids += dedup_by_id(&mut self.data.messages, |m| &m.id);
        report.duplicate_ids += dedup_by_id(&mut self.data.comments, |c| &c.id);

        let post_ids: Vec<&EntityId> = self.data.posts.iter().map(|p| &p.id).collect();

        let before = self.data.comments.len();
        let live: std::collections::HashSet<&EntityId> = post_ids.iter().copied().collect();
        self.data.comments.retain(|c| live.contains(&c.post_id));
        report.dangling_comments = before - self.data.comments.len();

        let before = self.data.favorites.len();
        let mut seen = std::collections::HashSet::new();
        self.data
            .favorites
            .retain(|fav| live.contains(fav) && seen.insert(fav.clone()));
        report.orphan_favorites = before - self.data.favorites.len();

        if !report.is_clean() {
            self.persist()?;
        }
        Ok(report)
    }

    fn author(&self) -> Result<String> {
        self.data
            .username
            .clone()
            .ok_or_else(|| HubError::Validation("No user is logged in".into()))
    }

    fn persist(&self) -> Result<()> {
        self.gateway.save(&self.data)
    }

    #[cfg(test)]
    pub fn posts_mut(&mut self) -> &mut Vec<Post> {
        &mut self.data.posts
    }

    #[cfg(test)]
    pub fn messages_mut(&mut self) -> &mut Vec<Message> {
        &mut self.data.messages
    }

    #[cfg(test)]
    pub fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.data.comments
    }

    #[cfg(test)]
    pub fn favorites_mut(&mut self) -> &mut Vec<EntityId> {
        &mut self.data.favorites
    }
}

fn validate_post_fields(title: &str, subject: &str, code: &str) -> Result<()> {
    for (field, value) in [("title", title), ("subject", subject), ("code", code)] {
        if value.trim().is_empty() {
            return Err(HubError::Validation(format!(
                "Post {} cannot be empty",
                field
            )));
        }
    }
    Ok(())
}

fn dedup_by_id<T, F: Fn(&T) -> &EntityId>(items: &mut Vec<T>, id_of: F) -> usize {
    let before = items.len();
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(id_of(item).clone()));
    before - items.len()
}

#[cfg(test)]
mod tests {
    use super::memory::fixtures::StoreFixture;
    use super::memory::InMemoryStore;
    use super::*;
    use crate::model::{EntityId, PostDraft, PostUpdate};

    fn draft(title: &str, subject: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            subject: subject.into(),
            description: String::new(),
            code: "fn main() {}".into(),
            language: "rust".into(),
            ..PostDraft::default()
        }
    }

    fn update_from(post: &crate::model::Post) -> PostUpdate {
        PostUpdate {
            title: post.title.clone(),
            subject: post.subject.clone(),
            description: post.description.clone(),
            code: post.code.clone(),
            language: post.language.clone(),
            image: None,
            post_number: None,
        }
    }

    #[test]
    fn add_message_requires_logged_in_user() {
        let mut fixture = StoreFixture::logged_out();
        match fixture.store.add_message("hi", None) {
            Err(HubError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(fixture.store.messages().is_empty());
    }

    #[test]
    fn add_message_rejects_blank_text() {
        let mut fixture = StoreFixture::new();
        assert!(matches!(
            fixture.store.add_message("   \n", None),
            Err(HubError::Validation(_))
        ));
        // a rejected mutation must not touch the backend
        assert_eq!(fixture.store.backend().write_count(gateway::KEY_MESSAGES), 1);
    }

    #[test]
    fn add_message_stamps_author_and_persists_once() {
        let mut fixture = StoreFixture::new();
        let writes_before = fixture.store.backend().write_count(gateway::KEY_MESSAGES);
        let message = fixture.store.add_message("  hello  ", None).unwrap();

        assert_eq!(message.author, "tester");
        assert_eq!(message.text, "hello");
        assert_eq!(
            fixture.store.backend().write_count(gateway::KEY_MESSAGES),
            writes_before + 1
        );
    }

    #[test]
    fn author_follows_the_logged_in_user() {
        let mut fixture = StoreFixture::new().as_user("grace");
        let message = fixture.store.add_message("hi", None).unwrap();
        assert_eq!(message.author, "grace");
    }

    #[test]
    fn add_post_rejects_missing_required_fields() {
        let mut fixture = StoreFixture::new();
        let mut d = draft("Title", "rust");
        d.code = "  ".into();
        assert!(matches!(
            fixture.store.add_post(d),
            Err(HubError::Validation(_))
        ));
        assert!(fixture.store.posts().is_empty());
    }

    #[test]
    fn edit_post_preserves_image_when_not_replaced() {
        let mut fixture = StoreFixture::new();
        let mut d = draft("Intro", "rust");
        d.image = Some("data:image/png;base64,AAAA".into());
        let post = fixture.store.add_post(d).unwrap();

        let mut update = update_from(&post);
        update.title = "Intro, revised".into();
        let edited = fixture.store.edit_post(&post.id, update).unwrap();

        assert_eq!(edited.title, "Intro, revised");
        assert_eq!(edited.image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(edited.timestamp >= post.timestamp);
    }

    #[test]
    fn edit_post_replaces_image_when_supplied() {
        let mut fixture = StoreFixture::new();
        let post = fixture.store.add_post(draft("Intro", "rust")).unwrap();

        let mut update = update_from(&post);
        update.image = Some("data:image/png;base64,BBBB".into());
        let edited = fixture.store.edit_post(&post.id, update).unwrap();
        assert_eq!(edited.image.as_deref(), Some("data:image/png;base64,BBBB"));
    }

    #[test]
    fn edit_post_unknown_id_is_not_found() {
        let mut fixture = StoreFixture::new();
        let post = fixture.store.add_post(draft("Intro", "rust")).unwrap();
        let missing = EntityId::from("post_missing");
        assert!(matches!(
            fixture.store.edit_post(&missing, update_from(&post)),
            Err(HubError::NotFound(_))
        ));
    }

    #[test]
    fn delete_post_cascades_comments_and_favorites() {
        let fixture = StoreFixture::new()
            .with_post("Intro", "go")
            .with_comment("Intro", "first")
            .with_comment("Intro", "second")
            .with_favorite("Intro");
        let mut store = fixture.store;
        let id = store.posts()[0].id.clone();

        assert!(store.delete_post(&id).unwrap());
        assert!(store.posts().is_empty());
        assert!(store.comments().is_empty());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn delete_post_is_idempotent() {
        let fixture = StoreFixture::new().with_post("Intro", "go");
        let mut store = fixture.store;
        let id = store.posts()[0].id.clone();

        assert!(store.delete_post(&id).unwrap());
        let writes = store.backend().write_count(gateway::KEY_POSTS);
        assert!(!store.delete_post(&id).unwrap());
        // the no-op second delete writes nothing
        assert_eq!(store.backend().write_count(gateway::KEY_POSTS), writes);
    }

    #[test]
    fn add_comment_to_missing_post_leaves_comments_unchanged() {
        let mut fixture = StoreFixture::new();
        let missing = EntityId::from("post_nope");
        match fixture.store.add_comment(&missing, "text", None) {
            Err(HubError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(fixture.store.comments().is_empty());
        assert_eq!(fixture.store.backend().write_count(gateway::KEY_COMMENTS), 1);
    }

    #[test]
    fn delete_message_and_comment_are_noops_when_absent() {
        let mut fixture = StoreFixture::new().with_message("hi");
        assert!(!fixture
            .store
            .delete_message(&EntityId::from("msg_missing"))
            .unwrap());
        assert_eq!(fixture.store.messages().len(), 1);
        assert!(!fixture
            .store
            .delete_comment(&EntityId::from("cmt_missing"))
            .unwrap());
    }

    #[test]
    fn toggle_favorite_twice_restores_original_set() {
        let fixture = StoreFixture::new().with_post("Intro", "rust");
        let mut store = fixture.store;
        let id = store.posts()[0].id.clone();

        assert!(store.toggle_favorite(&id).unwrap());
        assert!(store.is_favorite(&id));
        assert!(!store.toggle_favorite(&id).unwrap());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn set_current_user_trims_and_rejects_blank() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.set_current_user("  "),
            Err(HubError::Validation(_))
        ));
        store.set_current_user(" ada ").unwrap();
        assert_eq!(store.current_user(), Some("ada"));
    }

    #[test]
    fn every_mutation_persists_exactly_once() {
        let mut fixture = StoreFixture::new();
        let base = fixture.store.backend().write_count(gateway::KEY_POSTS);

        let post = fixture.store.add_post(draft("Intro", "rust")).unwrap();
        assert_eq!(fixture.store.backend().write_count(gateway::KEY_POSTS), base + 1);

        fixture.store.toggle_favorite(&post.id).unwrap();
        assert_eq!(fixture.store.backend().write_count(gateway::KEY_POSTS), base + 2);

        fixture.store.add_comment(&post.id, "hi", None).unwrap();
        assert_eq!(fixture.store.backend().write_count(gateway::KEY_POSTS), base + 3);
    }

    #[test]
    fn repair_prunes_what_older_stores_left_behind() {
        let fixture = StoreFixture::new().with_post("Intro", "rust");
        let mut store = fixture.store;
        let post = store.posts()[0].clone();

        // simulate a snapshot written by a variant without cascade delete
        let dangling = crate::model::Comment::new(
            EntityId::from("post_gone"),
            "tester".into(),
            "lost".into(),
            None,
        );
        store.comments_mut().push(dangling);
        store.favorites_mut().push(EntityId::from("post_gone"));
        store.posts_mut().push(post.clone());

        let report = store.repair().unwrap();
        assert_eq!(report.dangling_comments, 1);
        assert_eq!(report.orphan_favorites, 1);
        assert_eq!(report.duplicate_ids, 1);
        assert_eq!(store.posts().len(), 1);

        let clean = store.repair().unwrap();
        assert!(clean.is_clean());
    }

    #[test]
    fn open_recovers_from_corrupt_backend() {
        let backend = super::memory::MemBackend::new();
        backend.write(gateway::KEY_POSTS, "not json at all").unwrap();

        let (store, report) = EntityStore::open(backend).unwrap();
        assert!(store.posts().is_empty());
        assert_eq!(report.recovered_keys, vec![gateway::KEY_POSTS]);
    }
}
