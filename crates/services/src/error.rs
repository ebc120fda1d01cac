//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionSummaryError;

/// Errors emitted by the quiz session state machine.
///
/// None of these are fatal: the session is left untouched whenever one is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no countries available for session")]
    Empty,
    #[error("no active target; start the quiz first")]
    InvalidState,
    #[error("no country was chosen for the guess")]
    MissingGuess,
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

impl SessionError {
    /// Message shown to the player when an event is rejected.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Empty => "No countries to play with.",
            SessionError::InvalidState => "Start the quiz first.",
            SessionError::MissingGuess => "Choose a country first.",
            SessionError::Summary(_) => "Something went wrong. Please try again.",
        }
    }
}
