use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn add<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    post_selector: &str,
    text: &str,
    reply_selector: Option<&str>,
) -> Result<CmdResult> {
    let post_id = helpers::resolve_post(store, post_selector)?;
    let reply_to = reply_selector
        .map(|s| helpers::resolve_comment(store, s))
        .transpose()?;

    let comment = store.add_comment(&post_id, text, reply_to)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Comment added ({})",
        comment.id
    )));
    Ok(result)
}

pub fn remove<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    selector: &str,
) -> Result<CmdResult> {
    let id = helpers::resolve_comment(store, selector)?;
    let mut result = CmdResult::default();
    if store.delete_comment(&id)? {
        result.add_message(CmdMessage::success(format!("Deleted comment {}", id)));
    } else {
        result.add_message(CmdMessage::info("Nothing deleted."));
    }
    Ok(result)
}
