use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::router::ViewRouter;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Posts a chat message, optionally as a reply to any feed item. The reply
/// selector resolves through the router so the caller sees the same target
/// indicator the UI would show.
pub fn run<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    router: &mut ViewRouter,
    text: &str,
    reply_selector: Option<&str>,
) -> Result<CmdResult> {
    let reply_to = match reply_selector {
        Some(selector) => {
            let id = helpers::resolve_any(store, selector)?;
            router.start_reply(store, &id);
            Some(id)
        }
        None => None,
    };

    let message = store.add_message(text, reply_to)?;
    router.cancel_reply();

    let mut result = CmdResult::default();
    let note = match &message.reply_to {
        Some(target) => format!("Reply sent (to {})", target),
        None => "Message sent".to_string(),
    };
    result.add_message(CmdMessage::success(note));
    Ok(result)
}
