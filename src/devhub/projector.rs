//! Pure projections over the store. Every function recomputes from scratch
//! on each call; nothing here holds state between calls.

use std::str::FromStr;

use crate::error::HubError;
use crate::model::{Comment, EntityKind, FeedItem, Post};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Pseudo-subject appended to the subject list when any favorite exists.
pub const FAVORITES_SUBJECT: &str = "Favorites";

#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub search: Option<String>,
    pub kind: Option<EntityKind>,
}

/// Ordering for the board's post list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    /// Lexicographic by title.
    Az,
    /// By post number ascending, unnumbered posts last.
    Number,
}

impl FromStr for SortMode {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "az" => Ok(SortMode::Az),
            "number" => Ok(SortMode::Number),
            other => Err(HubError::Validation(format!(
                "Unknown sort mode '{}' (expected newest, oldest, az or number)",
                other
            ))),
        }
    }
}

/// Merges messages, posts and comments into one chronological feed,
/// optionally narrowed by a case-insensitive substring search and/or a
/// single kind. Ascending by timestamp; within equal timestamps the sort is
/// stable, so creation order decides.
pub fn feed<B: KeyValueStore>(store: &EntityStore<B>, query: &FeedQuery) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = Vec::new();
    items.extend(store.messages().iter().cloned().map(FeedItem::Message));
    items.extend(store.posts().iter().cloned().map(FeedItem::Post));
    items.extend(store.comments().iter().cloned().map(FeedItem::Comment));

    if let Some(kind) = query.kind {
        items.retain(|item| item.kind() == kind);
    }
    if let Some(term) = query.search.as_deref() {
        let needle = term.to_lowercase();
        items.retain(|item| searchable_text(item).to_lowercase().contains(&needle));
    }

    items.sort_by_key(|item| item.timestamp());
    items
}

// A message or comment is searched by its body; a post by what the board
// shows about it.
fn searchable_text(item: &FeedItem) -> String {
    match item {
        FeedItem::Message(m) => m.text.clone(),
        FeedItem::Comment(c) => c.text.clone(),
        FeedItem::Post(p) => format!("{} {} {}", p.title, p.subject, p.description),
    }
}

/// Distinct post subjects, trimmed and deduped case-insensitively, in
/// first-seen order (the order the posts were created). The `Favorites`
/// pseudo-subject is appended when at least one favorite exists.
pub fn subjects<B: KeyValueStore>(store: &EntityStore<B>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for post in store.posts() {
        let subject = post.subject.trim();
        if subject.is_empty() {
            continue;
        }
        if seen.insert(subject.to_lowercase()) {
            out.push(subject.to_string());
        }
    }
    if !store.favorites().is_empty() {
        out.push(FAVORITES_SUBJECT.to_string());
    }
    out
}

/// Posts under a subject (case-insensitive equality, or favorites membership
/// for the pseudo-subject; `None` means every post), filtered by a title
/// substring, then stably sorted per `sort`.
pub fn posts_for_subject<B: KeyValueStore>(
    store: &EntityStore<B>,
    subject: Option<&str>,
    search: Option<&str>,
    sort: SortMode,
) -> Vec<Post> {
    let mut posts: Vec<Post> = store
        .posts()
        .iter()
        .filter(|post| match subject {
            None => true,
            Some(s) if s.trim().eq_ignore_ascii_case(FAVORITES_SUBJECT) => {
                store.is_favorite(&post.id)
            }
            Some(s) => post.subject.trim().eq_ignore_ascii_case(s.trim()),
        })
        .cloned()
        .collect();

    if let Some(term) = search {
        let needle = term.to_lowercase();
        posts.retain(|post| post.title.to_lowercase().contains(&needle));
    }

    match sort {
        SortMode::Newest => posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortMode::Oldest => posts.sort_by_key(|p| p.timestamp),
        SortMode::Az => posts.sort_by_key(|p| p.title.to_lowercase()),
        SortMode::Number => posts.sort_by_key(|p| (p.post_number.is_none(), p.post_number)),
    }
    posts
}

/// Comments under one post, timestamp ascending.
pub fn comments_for_post<B: KeyValueStore>(
    store: &EntityStore<B>,
    post_id: &crate::model::EntityId,
) -> Vec<Comment> {
    let mut comments: Vec<Comment> = store
        .comments()
        .iter()
        .filter(|c| &c.post_id == post_id)
        .cloned()
        .collect();
    comments.sort_by_key(|c| c.timestamp);
    comments
}
