use std::path::Path;

use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::{HubError, Result};
use crate::media;
use crate::model::{PostDraft, PostUpdate};
use crate::router::{View, ViewRouter};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Per-field overrides for `post edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub image: Option<String>,
    pub post_number: Option<u32>,
}

pub fn create<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    router: &mut ViewRouter,
    draft: PostDraft,
) -> Result<CmdResult> {
    let post = store.add_post(draft)?;
    router.navigate(View::SinglePost(post.id.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Posted '{}' under {} ({})",
        post.title, post.subject, post.id
    )));
    Ok(result)
}

pub fn edit<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    router: &mut ViewRouter,
    selector: &str,
    patch: PostPatch,
) -> Result<CmdResult> {
    let id = helpers::resolve_post(store, selector)?;
    let current = router.begin_edit_post(store, &id)?;

    let update = PostUpdate {
        title: patch.title.unwrap_or(current.title),
        subject: patch.subject.unwrap_or(current.subject),
        description: patch.description.unwrap_or(current.description),
        code: patch.code.unwrap_or(current.code),
        language: patch.language.unwrap_or(current.language),
        image: patch.image,
        post_number: patch.post_number,
    };
    let edited = store.edit_post(&id, update)?;
    router.navigate(View::SinglePost(id));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated '{}'", edited.title)));
    Ok(result)
}

pub fn remove<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    selector: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let id = match helpers::resolve_post(store, selector) {
        Ok(id) => id,
        Err(HubError::Api(_)) => {
            result.add_message(CmdMessage::info("Nothing deleted."));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    if store.delete_post(&id)? {
        result.add_message(CmdMessage::success(format!(
            "Deleted post {} (comments and favorite pruned with it)",
            id
        )));
    } else {
        result.add_message(CmdMessage::info("Nothing deleted."));
    }
    Ok(result)
}

/// Decodes a post's inline image back into a file.
pub fn image<B: KeyValueStore>(
    store: &EntityStore<B>,
    selector: &str,
    out: &Path,
) -> Result<CmdResult> {
    let id = helpers::resolve_post(store, selector)?;
    let post = store
        .post(&id)
        .ok_or_else(|| HubError::NotFound(id.clone()))?;
    let uri = post
        .image
        .as_deref()
        .ok_or_else(|| HubError::Api(format!("Post '{}' has no image", post.title)))?;

    let decoded = media::parse(uri)?;
    std::fs::write(out, &decoded.data).map_err(HubError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Wrote {} ({}, {} bytes)",
        out.display(),
        decoded.mime,
        decoded.len()
    )));
    Ok(result)
}
