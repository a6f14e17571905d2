use crate::clipboard::copy_to_clipboard;
use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::{HubError, Result};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Copies a post's code to the system clipboard.
pub fn run<B: KeyValueStore>(store: &EntityStore<B>, selector: &str) -> Result<CmdResult> {
    let id = helpers::resolve_post(store, selector)?;
    let post = store
        .post(&id)
        .ok_or_else(|| HubError::NotFound(id.clone()))?;

    copy_to_clipboard(&post.code)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Copied the code of '{}' ({} lines)",
        post.title,
        post.code.lines().count()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    // the happy path needs a real clipboard tool; resolution is what we
    // can cover here
    #[test]
    fn unknown_selector_fails_before_touching_the_clipboard() {
        let fixture = StoreFixture::new();
        assert!(run(&fixture.store, "nothing").is_err());
    }
}
