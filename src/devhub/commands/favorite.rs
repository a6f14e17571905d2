use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, selector: &str) -> Result<CmdResult> {
    let id = helpers::resolve_post(store, selector)?;
    let now_favorite = store.toggle_favorite(&id)?;

    let mut result = CmdResult::default();
    let note = if now_favorite {
        format!("Added {} to favorites", id)
    } else {
        format!("Removed {} from favorites", id)
    };
    result.add_message(CmdMessage::success(note));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn toggles_on_then_off() {
        let mut fixture = StoreFixture::new().with_post("Intro", "rust");

        let on = run(&mut fixture.store, "Intro").unwrap();
        assert!(on.messages[0].content.contains("Added"));
        assert_eq!(fixture.store.favorites().len(), 1);

        let off = run(&mut fixture.store, "Intro").unwrap();
        assert!(off.messages[0].content.contains("Removed"));
        assert!(fixture.store.favorites().is_empty());
    }

    #[test]
    fn unknown_post_is_an_error() {
        let mut fixture = StoreFixture::new();
        assert!(run(&mut fixture.store, "nothing").is_err());
    }
}
