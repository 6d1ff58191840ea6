//! Platform request and response envelopes

use crate::skill::{HandlerOutcome, SkillEvent};
use crate::transcript::SessionContext;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Incoming request envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    #[allow(dead_code)] // Logged by the platform, not used for routing
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<SessionInfo>,
    pub request: PlatformRequest,
}

impl RequestEnvelope {
    /// Session attributes as a context value; missing or null means empty
    pub fn session_context(&self) -> SessionContext {
        self.session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .map(SessionContext::from_attributes)
            .unwrap_or_default()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.session_id.as_deref())
    }
}

/// Session block of the envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

/// Request block of the envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentInfo>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl PlatformRequest {
    pub fn to_event(&self) -> SkillEvent {
        match (self.request_type.as_str(), &self.intent) {
            ("LaunchRequest", _) => SkillEvent::Launch,
            ("IntentRequest", Some(intent)) => SkillEvent::Intent {
                name: intent.name.clone(),
                slots: intent
                    .slots
                    .iter()
                    .filter_map(|(name, slot)| {
                        slot.value
                            .as_ref()
                            .map(|value| (name.clone(), value.clone()))
                    })
                    .collect::<BTreeMap<_, _>>(),
            },
            ("SessionEndedRequest", _) => SkillEvent::SessionEnded {
                reason: self.reason.clone(),
            },
            (other, _) => SkillEvent::Other {
                request_type: other.to_string(),
            },
        }
    }
}

/// Intent block of an intent request
#[derive(Debug, Deserialize)]
pub struct IntentInfo {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: HashMap<String, SlotInfo>,
}

/// One slot; `value` is absent when the user did not fill it
#[derive(Debug, Deserialize)]
pub struct SlotInfo {
    #[serde(default)]
    #[allow(dead_code)] // Duplicates the map key
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outgoing response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text(text: String) -> Self {
        Self {
            speech_type: "PlainText",
            text,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl From<HandlerOutcome> for ResponseEnvelope {
    fn from(outcome: HandlerOutcome) -> Self {
        let response = outcome.response;
        Self {
            version: "1.0",
            session_attributes: outcome.session.into_attributes(),
            response: ResponseBody {
                output_speech: OutputSpeech::plain_text(response.output_speech),
                reprompt: response.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech::plain_text(text),
                }),
                should_end_session: response.should_end_session,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
