//! Business logic, one file per verb. Commands operate on the store and
//! router, return structured `CmdResult`s and never print.

use crate::router::ViewModel;

pub mod board;
pub mod comment;
pub mod copy;
pub mod doctor;
pub mod export;
pub mod favorite;
pub mod feed;
pub mod helpers;
pub mod login;
pub mod msg;
pub mod post;
pub mod send;
pub mod theme;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command hands back: an optional view to render plus status
/// messages for the terminal.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub view: Option<ViewModel>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_view(mut self, view: ViewModel) -> Self {
        self.view = Some(view);
        self
    }
}
