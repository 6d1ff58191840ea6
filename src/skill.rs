//! Voice skill request routing
//!
//! Maps each platform event to exactly one handler. Handlers read the
//! transcript from the session, call the completion client, and hand back a
//! reply together with the updated session context.

mod dispatcher;
pub mod event;
mod handlers;
mod response;

#[allow(unused_imports)] // Public API re-exports
pub use dispatcher::{
    DispatchFault, DispatchRule, Dispatcher, DispatcherBuilder, FaultHandler, HandlerInput,
    HandlerOutcome, Matcher, RequestHandler, SessionPhase,
};
#[allow(unused_imports)] // Public API re-exports
pub use event::{RequestKind, SkillEvent};
#[allow(unused_imports)] // Public API re-exports
pub use handlers::{
    CancelOrStopHandler, CatchAllFaultHandler, ChatHandler, LaunchHandler, APOLOGY,
    CHAT_REPROMPT, FAREWELL, LAUNCH_FOLLOW_UP, SYSTEM_INSTRUCTION,
};
#[allow(unused_imports)] // Public API re-exports
pub use response::{ResponseBuilder, ResponseError, SkillResponse};

use crate::llm::CompletionClient;
use event::{CANCEL_INTENT, CHAT_INTENT, STOP_INTENT};
use std::sync::Arc;

/// The skill's routing table, in priority order
pub fn build_dispatcher(client: Arc<dyn CompletionClient>) -> Dispatcher {
    Dispatcher::builder()
        .rule(
            "launch",
            Matcher::RequestType(RequestKind::Launch),
            Arc::new(LaunchHandler::new(client.clone())),
        )
        .rule(
            "chat",
            Matcher::IntentNamed(&[CHAT_INTENT]),
            Arc::new(ChatHandler::new(client)),
        )
        .rule(
            "cancel_or_stop",
            Matcher::IntentNamed(&[CANCEL_INTENT, STOP_INTENT]),
            Arc::new(CancelOrStopHandler),
        )
        .fallback(Arc::new(CatchAllFaultHandler))
}
