use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn remove<B: KeyValueStore>(store: &mut EntityStore<B>, selector: &str) -> Result<CmdResult> {
    let id = helpers::resolve_message(store, selector)?;
    let mut result = CmdResult::default();
    if store.delete_message(&id)? {
        result.add_message(CmdMessage::success(format!("Deleted message {}", id)));
    } else {
        result.add_message(CmdMessage::info("Nothing deleted."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_by_id_prefix() {
        let mut fixture = StoreFixture::new().with_message("oops");
        let id = fixture.store.messages()[0].id.clone();

        remove(&mut fixture.store, &id.as_str()[..10]).unwrap();
        assert!(fixture.store.messages().is_empty());
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let mut fixture = StoreFixture::new();
        assert!(remove(&mut fixture.store, "msg_ghost").is_err());
    }
}
