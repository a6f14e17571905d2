use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Theme;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn run<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    theme: Option<Theme>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match theme {
        Some(theme) => {
            store.set_theme(theme)?;
            result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
        }
        None => {
            let note = match store.theme() {
                Some(theme) => format!("Theme: {}", theme),
                None => "Theme: auto (following the terminal)".to_string(),
            };
            result.add_message(CmdMessage::info(note));
        }
    }
    Ok(result)
}
