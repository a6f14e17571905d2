//! System clipboard access through the platform's own tool: pbcopy on
//! macOS, xclip/xsel on Linux, clip.exe on Windows.

use crate::error::{HubError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for mut command in candidate_commands() {
        match pipe_text(&mut command, text) {
            Ok(()) => return Ok(()),
            Err(HubError::Api(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(HubError::Api(
        "No clipboard tool available (expected pbcopy, xclip, xsel or clip)".to_string(),
    ))
}

#[cfg(target_os = "macos")]
fn candidate_commands() -> Vec<Command> {
    vec![Command::new("pbcopy")]
}

#[cfg(target_os = "linux")]
fn candidate_commands() -> Vec<Command> {
    let mut xclip = Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    let mut xsel = Command::new("xsel");
    xsel.args(["--clipboard", "--input"]);
    vec![xclip, xsel]
}

#[cfg(target_os = "windows")]
fn candidate_commands() -> Vec<Command> {
    vec![Command::new("clip")]
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn candidate_commands() -> Vec<Command> {
    Vec::new()
}

fn pipe_text(command: &mut Command, text: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| HubError::Api(format!("Failed to spawn clipboard tool: {}", e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| HubError::Api(format!("Failed to write to clipboard: {}", e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| HubError::Api(format!("Failed to wait for clipboard tool: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(HubError::Api(
            "Clipboard tool exited with an error".to_string(),
        ))
    }
}
