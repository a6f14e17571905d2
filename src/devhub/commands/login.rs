use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn run<B: KeyValueStore>(store: &mut EntityStore<B>, name: &str) -> Result<CmdResult> {
    store.set_current_user(name)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Logged in as {}",
        store.current_user().unwrap_or_default()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn login_sets_and_persists_the_user() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, " ada ").unwrap();
        assert_eq!(store.current_user(), Some("ada"));
        assert!(result.messages[0].content.contains("ada"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            run(&mut store, "  "),
            Err(HubError::Validation(_))
        ));
    }
}
