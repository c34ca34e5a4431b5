//! The `/ask` pipeline: translate in, classify, compose, complete,
//! translate out, log.

pub mod classify;
pub mod context;
pub mod orchestrator;
pub mod prompt;
pub mod translate;
pub mod types;

pub use classify::*;
pub use context::*;
pub use orchestrator::*;
pub use prompt::*;
pub use translate::*;
pub use types::*;

use thiserror::Error;

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message too long (max {max} chars)")]
    MessageTooLong { max: usize },

    #[error("Assistant failure: {0}")]
    Internal(String),
}

impl AssistantError {
    /// Whether the caller sent bad input, as opposed to a server fault.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::MessageTooLong { .. })
    }
}
