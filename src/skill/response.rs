//! Spoken reply assembly

use thiserror::Error;

/// Errors from building a reply
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Refusing to build a reply with empty speech")]
    EmptySpeech,
}

/// Platform-neutral reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillResponse {
    pub output_speech: String,
    pub reprompt: Option<String>,
    pub should_end_session: bool,
}

impl SkillResponse {
    /// Reply from compile-time constant text that is known to be non-empty
    pub fn fixed(speech: &'static str, reprompt: Option<&'static str>, end_session: bool) -> Self {
        debug_assert!(!speech.trim().is_empty());
        Self {
            output_speech: speech.to_string(),
            reprompt: reprompt.map(str::to_string),
            should_end_session: end_session,
        }
    }
}

/// Builder for [`SkillResponse`]
///
/// Sessions stay open unless [`ResponseBuilder::end_session`] is called.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<String>,
    reprompt: Option<String>,
    end_session: bool,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    #[must_use]
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    #[must_use]
    pub fn end_session(mut self) -> Self {
        self.end_session = true;
        self
    }

    pub fn build(self) -> Result<SkillResponse, ResponseError> {
        let output_speech = self
            .speech
            .filter(|s| !s.trim().is_empty())
            .ok_or(ResponseError::EmptySpeech)?;

        Ok(SkillResponse {
            output_speech,
            reprompt: self.reprompt.filter(|s| !s.trim().is_empty()),
            should_end_session: self.end_session,
        })
    }
}
