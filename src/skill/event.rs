//! Incoming voice platform events

use std::collections::BTreeMap;

pub const CHAT_INTENT: &str = "ChatIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const QUERY_SLOT: &str = "query";

/// Closed set of request kinds the skill distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
    Other,
}

/// A platform request, reduced to what routing and handlers need
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEvent {
    Launch,
    Intent {
        name: String,
        /// Filled slots only; slots the user left empty are absent
        slots: BTreeMap<String, String>,
    },
    SessionEnded {
        reason: Option<String>,
    },
    Other {
        request_type: String,
    },
}

impl SkillEvent {
    #[allow(dead_code)] // Test and API convenience
    pub fn intent(name: impl Into<String>) -> Self {
        Self::Intent {
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Intent event with a single filled slot
    #[allow(dead_code)] // Test and API convenience
    pub fn intent_with_slot(
        name: impl Into<String>,
        slot: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Intent {
            name: name.into(),
            slots: BTreeMap::from([(slot.into(), value.into())]),
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Launch => RequestKind::Launch,
            Self::Intent { .. } => RequestKind::Intent,
            Self::SessionEnded { .. } => RequestKind::SessionEnded,
            Self::Other { .. } => RequestKind::Other,
        }
    }

    /// Platform request type name
    pub fn request_type(&self) -> &str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Intent { .. } => "IntentRequest",
            Self::SessionEnded { .. } => "SessionEndedRequest",
            Self::Other { request_type } => request_type,
        }
    }

    pub fn intent_name(&self) -> Option<&str> {
        match self {
            Self::Intent { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        match self {
            Self::Intent { slots, .. } => slots.get(name).map(String::as_str),
            _ => None,
        }
    }
}
