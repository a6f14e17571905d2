//! Tracks which screen is active and the contextual selection, and pairs
//! each view with the projection that feeds its renderer.

use crate::error::{HubError, Result};
use crate::model::{Comment, EntityId, EntityKind, FeedItem, Post};
use crate::projector::{self, FeedQuery, SortMode};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

const EXCERPT_LEN: usize = 48;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Chatroom,
    SubjectList,
    PostList(Option<String>),
    SinglePost(EntityId),
}

/// What an in-flight reply points at: enough to show an indicator without
/// re-resolving the id on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTarget {
    pub kind: EntityKind,
    pub id: EntityId,
    pub author: String,
    pub excerpt: String,
}

/// Narrowing applied to the current view's projection.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: Option<String>,
    pub kind: Option<EntityKind>,
    pub sort: SortMode,
}

/// Renderable data for the active view; the renderer contract.
#[derive(Debug)]
pub enum ViewModel {
    Feed(Vec<FeedItem>),
    Subjects(Vec<String>),
    Board {
        subject: Option<String>,
        posts: Vec<Post>,
    },
    Post {
        post: Post,
        comments: Vec<Comment>,
    },
}

#[derive(Debug)]
pub struct ViewRouter {
    view: View,
    replying_to: Option<ReplyTarget>,
    editing_post: bool,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// The session boots into the chatroom.
    pub fn new() -> Self {
        Self {
            view: View::Chatroom,
            replying_to: None,
            editing_post: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn replying_to(&self) -> Option<&ReplyTarget> {
        self.replying_to.as_ref()
    }

    pub fn is_editing_post(&self) -> bool {
        self.editing_post
    }

    /// Switches the active view and drops context that no longer applies.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
        self.replying_to = None;
        self.editing_post = false;
    }

    /// Resolves the id against all three collections. An id that resolves
    /// to nothing clears the indicator instead of failing.
    pub fn start_reply<B: KeyValueStore>(
        &mut self,
        store: &EntityStore<B>,
        id: &EntityId,
    ) -> Option<&ReplyTarget> {
        self.replying_to = resolve_target(store, id);
        self.replying_to.as_ref()
    }

    pub fn cancel_reply(&mut self) {
        self.replying_to = None;
    }

    /// Enters edit mode for a post while staying on its single-post view,
    /// handing back the current fields as the edit draft.
    pub fn begin_edit_post<B: KeyValueStore>(
        &mut self,
        store: &EntityStore<B>,
        id: &EntityId,
    ) -> Result<Post> {
        let post = store
            .post(id)
            .cloned()
            .ok_or_else(|| HubError::NotFound(id.clone()))?;
        self.view = View::SinglePost(id.clone());
        self.editing_post = true;
        Ok(post)
    }

    /// Projects the data for whatever view is active.
    pub fn view_model<B: KeyValueStore>(
        &self,
        store: &EntityStore<B>,
        query: &ViewQuery,
    ) -> Result<ViewModel> {
        match &self.view {
            View::Chatroom => Ok(ViewModel::Feed(projector::feed(
                store,
                &FeedQuery {
                    search: query.search.clone(),
                    kind: query.kind,
                },
            ))),
            View::SubjectList => Ok(ViewModel::Subjects(projector::subjects(store))),
            View::PostList(subject) => Ok(ViewModel::Board {
                subject: subject.clone(),
                posts: projector::posts_for_subject(
                    store,
                    subject.as_deref(),
                    query.search.as_deref(),
                    query.sort,
                ),
            }),
            View::SinglePost(id) => {
                let post = store
                    .post(id)
                    .cloned()
                    .ok_or_else(|| HubError::NotFound(id.clone()))?;
                Ok(ViewModel::Post {
                    comments: projector::comments_for_post(store, id),
                    post,
                })
            }
        }
    }
}

fn resolve_target<B: KeyValueStore>(
    store: &EntityStore<B>,
    id: &EntityId,
) -> Option<ReplyTarget> {
    if let Some(m) = store.message(id) {
        return Some(ReplyTarget {
            kind: EntityKind::Message,
            id: m.id.clone(),
            author: m.author.clone(),
            excerpt: excerpt(&m.text),
        });
    }
    if let Some(p) = store.post(id) {
        return Some(ReplyTarget {
            kind: EntityKind::Post,
            id: p.id.clone(),
            author: p.author.clone(),
            excerpt: excerpt(&p.title),
        });
    }
    if let Some(c) = store.comment(id) {
        return Some(ReplyTarget {
            kind: EntityKind::Comment,
            id: c.id.clone(),
            author: c.author.clone(),
            excerpt: excerpt(&c.text),
        });
    }
    None
}

fn excerpt(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(EXCERPT_LEN)
        .collect();
    if text.chars().count() > EXCERPT_LEN {
        format!("{}…", flat)
    } else {
        flat
    }
}
