//! Skill request handlers

use super::dispatcher::{
    DispatchFault, FaultHandler, HandlerInput, HandlerOutcome, RequestHandler, SessionPhase,
};
use super::event::QUERY_SLOT;
use super::response::{ResponseBuilder, SkillResponse};
use crate::llm::CompletionClient;
use crate::transcript::{self, Role, Transcript};
use async_trait::async_trait;
use std::sync::Arc;

/// Instruction that opens every conversation
pub const SYSTEM_INSTRUCTION: &str =
    "You are my AI assistant. I will give you commands, and we will interact as I guide and train you.";
pub const LAUNCH_FOLLOW_UP: &str = " How can I help you?";
pub const CHAT_REPROMPT: &str = "Do you have another question?";
pub const FAREWELL: &str = "Goodbye!";
pub const APOLOGY: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Starts a fresh conversation and greets the user with the model's opener
pub struct LaunchHandler {
    client: Arc<dyn CompletionClient>,
}

impl LaunchHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestHandler for LaunchHandler {
    async fn handle(&self, input: &HandlerInput) -> Result<HandlerOutcome, DispatchFault> {
        let transcript = Transcript::with_instruction(SYSTEM_INSTRUCTION);
        let reply = self.client.complete(&transcript).await.into_display_text();
        let transcript = transcript.append(Role::Assistant, reply.as_str());

        let speech = format!("{reply}{LAUNCH_FOLLOW_UP}");
        let response = ResponseBuilder::new()
            .speak(speech.as_str())
            .reprompt(speech)
            .build()?;

        Ok(HandlerOutcome {
            response,
            session: transcript::save(&input.session, &transcript),
            phase: SessionPhase::NewSession,
        })
    }
}

/// Forwards the user's query with the running transcript
pub struct ChatHandler {
    client: Arc<dyn CompletionClient>,
}

impl ChatHandler {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestHandler for ChatHandler {
    async fn handle(&self, input: &HandlerInput) -> Result<HandlerOutcome, DispatchFault> {
        let query = input.event.slot(QUERY_SLOT).unwrap_or_default();
        if query.trim().is_empty() {
            tracing::warn!(slot = QUERY_SLOT, "Chat intent arrived without a query");
        }

        let transcript = transcript::load(&input.session).append(Role::User, query);
        let reply = self.client.complete(&transcript).await.into_display_text();
        let transcript = transcript.append(Role::Assistant, reply.as_str());

        let response = ResponseBuilder::new()
            .speak(reply)
            .reprompt(CHAT_REPROMPT)
            .build()?;

        Ok(HandlerOutcome {
            response,
            session: transcript::save(&input.session, &transcript),
            phase: SessionPhase::InConversation,
        })
    }
}

/// Says goodbye and closes the session; the transcript is left alone
pub struct CancelOrStopHandler;

#[async_trait]
impl RequestHandler for CancelOrStopHandler {
    async fn handle(&self, input: &HandlerInput) -> Result<HandlerOutcome, DispatchFault> {
        let response = ResponseBuilder::new().speak(FAREWELL).end_session().build()?;

        Ok(HandlerOutcome {
            response,
            session: input.session.clone(),
            phase: SessionPhase::Ended,
        })
    }
}

/// Catch-all: logs the fault and apologises, keeping the session open
pub struct CatchAllFaultHandler;

impl FaultHandler for CatchAllFaultHandler {
    fn handle(&self, input: &HandlerInput, fault: &DispatchFault) -> HandlerOutcome {
        tracing::error!(
            error = %fault,
            detail = ?fault,
            request_type = input.event.request_type(),
            intent = ?input.event.intent_name(),
            "Request failed, replying with apology"
        );

        let phase = if transcript::load(&input.session).is_empty() {
            SessionPhase::NewSession
        } else {
            SessionPhase::InConversation
        };

        HandlerOutcome {
            response: SkillResponse::fixed(APOLOGY, Some(APOLOGY), false),
            session: input.session.clone(),
            phase,
        }
    }
}
