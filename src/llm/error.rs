//! Completion error types

use thiserror::Error;

/// Completion failure with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CompletionError {
    pub kind: CompletionErrorKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: CompletionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::Configuration, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::Transport, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::MalformedResponse, message)
    }

    /// What the user hears instead of a model reply
    pub fn display_text(&self) -> &'static str {
        self.kind.fallback_phrase()
    }
}

/// Error classification
///
/// None of these are retried: in a spoken conversation the user asking again
/// is the retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// Credential missing, detected before any network attempt
    Configuration,
    /// Non-success status or network failure
    Transport,
    /// Success status but the body lacks the generated text
    MalformedResponse,
}

impl CompletionErrorKind {
    pub fn fallback_phrase(self) -> &'static str {
        match self {
            Self::Configuration => "API key is not configured. Please check the skill's setup.",
            Self::Transport => "There was an error connecting to the AI service.",
            Self::MalformedResponse => "I received an unusual response. Please try again.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::MalformedResponse => "malformed_response",
        }
    }
}
