//! $EDITOR composition for long-form input: post descriptions, code bodies
//! and chat messages too awkward for a shell argument. Closing the editor
//! with an empty buffer cancels the operation.

use crate::error::{HubError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Checks $EDITOR, then $VISUAL, then common fallbacks on the PATH.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(HubError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

fn open_in_editor(path: &Path) -> Result<String> {
    let editor = get_editor()?;
    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| HubError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(HubError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(HubError::Io)
}

/// Opens a temp buffer seeded with `initial` and hands back the edited
/// text, or `None` when the user cleared the buffer to cancel. The file
/// extension picks up the editor's syntax highlighting.
pub fn compose(initial: &str, extension: &str) -> Result<Option<String>> {
    let temp_file = env::temp_dir().join(format!("devhub-compose.{}", extension.trim_matches('.')));
    fs::write(&temp_file, initial).map_err(HubError::Io)?;

    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);
    let edited = edited?;

    if edited.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(edited.trim_end().to_string()))
    }
}
