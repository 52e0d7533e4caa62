//! Error types for typing-test-core.

use crate::types::SessionState;
use thiserror::Error;

/// Result type alias using TestError.
pub type Result<T> = std::result::Result<T, TestError>;

/// Errors that can occur while evaluating answers or driving a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    #[error("answer is empty")]
    EmptyAnswer,

    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("no cards to test")]
    NoCards,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
