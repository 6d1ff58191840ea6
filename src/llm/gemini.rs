//! Google Gemini completion client

use super::transport::{HttpReply, HttpTransport, ReqwestTransport};
use super::types::{wire_role, CompletionResult, WireRole};
use super::{CompletionClient, CompletionError};
use crate::config::SkillConfig;
use crate::transcript::Transcript;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Gemini `generateContent` client
pub struct GeminiClient {
    transport: Arc<dyn HttpTransport>,
    api_key: Option<String>,
    endpoint: String,
    model_id: String,
}

impl GeminiClient {
    pub fn new(config: &SkillConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: &SkillConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            model_id: config.model.clone(),
        }
    }

    fn translate_request(transcript: &Transcript) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: transcript
                .turns()
                .iter()
                .map(|turn| GeminiContent {
                    role: wire_role(turn.role()),
                    parts: vec![GeminiPart { text: turn.text() }],
                })
                .collect(),
        }
    }

    async fn request(&self, api_key: &str, transcript: &Transcript) -> Result<String, CompletionError> {
        let body = serde_json::to_value(Self::translate_request(transcript))
            .map_err(|e| CompletionError::transport(format!("Failed to encode request: {e}")))?;
        let url = reqwest::Url::parse_with_params(&self.endpoint, &[("key", api_key)])
            .map_err(|e| CompletionError::configuration(format!("Invalid endpoint URL: {e}")))?;

        let reply = self.transport.post_json(url.as_str(), &body).await?;
        interpret_reply(&reply)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("GOOGLE_API_KEY is not set");
            return CompletionResult::Failure(CompletionError::configuration(
                "GOOGLE_API_KEY is not set",
            ));
        };

        self.request(api_key, transcript).await.into()
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Classify a raw reply and pull out the generated text
pub(crate) fn interpret_reply(reply: &HttpReply) -> Result<String, CompletionError> {
    if !reply.is_success() {
        let detail = serde_json::from_str::<GeminiErrorResponse>(&reply.body)
            .map_or_else(|_| reply.body.clone(), |resp| resp.error.message);
        return Err(CompletionError::transport(format!(
            "HTTP {}: {}",
            reply.status, detail
        )));
    }

    extract_text(&reply.body).ok_or_else(|| {
        tracing::error!(body = %reply.body, "Unexpected completion response shape");
        CompletionError::malformed("Response did not contain candidates[0].content.parts[0].text")
    })
}

/// First candidate's first text part, if the body has one
fn extract_text(body: &str) -> Option<String> {
    let response: GeminiResponse = serde_json::from_str(body).ok()?;
    let text = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: WireRole,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidateContent {
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
