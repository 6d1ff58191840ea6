//! Common types for completion calls

use super::CompletionError;
use crate::transcript::Role;
use serde::Serialize;

/// Outcome of one completion call
///
/// Every variant can be spoken: failures carry a fixed fallback phrase.
#[derive(Debug, Clone)]
pub enum CompletionResult {
    Success(String),
    Failure(CompletionError),
}

impl CompletionResult {
    #[allow(dead_code)] // API completeness
    pub fn display_text(&self) -> &str {
        match self {
            Self::Success(text) => text,
            Self::Failure(err) => err.display_text(),
        }
    }

    pub fn into_display_text(self) -> String {
        match self {
            Self::Success(text) => text,
            Self::Failure(err) => err.display_text().to_string(),
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[allow(dead_code)] // API completeness
    pub fn error(&self) -> Option<&CompletionError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

impl From<Result<String, CompletionError>> for CompletionResult {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(err) => Self::Failure(err),
        }
    }
}

/// Role vocabulary understood by the remote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    User,
    Model,
}

/// Translate a local role to the remote two-role vocabulary
///
/// The endpoint has no system role, so the instruction turn travels as a
/// user utterance.
pub fn wire_role(role: Role) -> WireRole {
    match role {
        Role::System | Role::User => WireRole::User,
        Role::Assistant => WireRole::Model,
    }
}
