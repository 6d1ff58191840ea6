//! Session-scoped conversation transcript
//!
//! The transcript lives only inside the platform's session attributes. It is
//! loaded at the start of every request and written back into a fresh
//! [`SessionContext`] value at the end; nothing here touches disk.

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session attribute key the transcript is stored under
pub const HISTORY_KEY: &str = "history";

/// Current version tag of the stored transcript blob
pub const BLOB_VERSION: u32 = 1;

/// Text substituted for an empty utterance
pub const EMPTY_TURN_PLACEHOLDER: &str = "(no input)";

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Local-only label for the leading instruction turn
    System,
    User,
    Assistant,
}

/// One role-tagged utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.trim().is_empty() {
            EMPTY_TURN_PLACEHOLDER.to_string()
        } else {
            text
        };
        Self { role, text }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only history of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh transcript holding only the instruction turn
    pub fn with_instruction(instruction: &str) -> Self {
        Self::new().append(Role::System, instruction)
    }

    /// Return a copy with one more turn at the end
    #[must_use]
    pub fn append(&self, role: Role, text: impl Into<String>) -> Self {
        let mut turns = self.turns.clone();
        turns.push(Turn::new(role, text));
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Platform-managed per-session key/value attributes
///
/// Treated as an immutable value: writers produce a new context instead of
/// mutating the one they were handed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    attributes: Map<String, Value>,
}

impl SessionContext {
    #[allow(dead_code)] // API completeness
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Copy of this context with `key` set to `value`
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: Value) -> Self {
        let mut attributes = self.attributes.clone();
        attributes.insert(key.into(), value);
        Self { attributes }
    }

    #[allow(dead_code)] // API completeness
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }
}

// Stored representation

#[derive(Debug, Serialize)]
struct TranscriptBlobRef<'a> {
    version: u32,
    turns: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct TranscriptBlob {
    version: u32,
    turns: Vec<StoredTurn>,
}

#[derive(Debug, Deserialize)]
struct StoredTurn {
    role: Role,
    text: String,
}

/// Read the transcript out of a session context
///
/// Missing, malformed, legacy or future-version blobs all yield an empty
/// transcript; this never fails the request.
pub fn load(context: &SessionContext) -> Transcript {
    let Some(raw) = context.get(HISTORY_KEY) else {
        return Transcript::new();
    };

    match TranscriptBlob::deserialize(raw) {
        Ok(blob) if blob.version == BLOB_VERSION => Transcript {
            turns: blob
                .turns
                .into_iter()
                .map(|t| Turn::new(t.role, t.text))
                .collect(),
        },
        Ok(blob) => {
            tracing::warn!(
                version = blob.version,
                expected = BLOB_VERSION,
                "Unsupported transcript version, starting fresh"
            );
            Transcript::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Malformed transcript in session, starting fresh");
            Transcript::new()
        }
    }
}

/// Write the transcript into a copy of `context`, replacing any prior value
#[must_use]
pub fn save(context: &SessionContext, transcript: &Transcript) -> SessionContext {
    let blob = TranscriptBlobRef {
        version: BLOB_VERSION,
        turns: &transcript.turns,
    };
    // Serializing plain strings and unit enums cannot fail
    let value = serde_json::to_value(blob).unwrap_or(Value::Null);
    context.with(HISTORY_KEY, value)
}
