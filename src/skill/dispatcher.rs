//! Ordered first-match-wins request routing
//!
//! Rules are evaluated in registration order. The fault handler is not a
//! rule: [`DispatcherBuilder::fallback`] is the only way to obtain a
//! [`Dispatcher`], so the catch-all is always present and always last.

use super::event::{RequestKind, SkillEvent};
use super::response::{ResponseError, SkillResponse};
use crate::transcript::SessionContext;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

/// Anything that can go wrong between routing and a finished reply
#[derive(Debug, Error)]
pub enum DispatchFault {
    #[error("No handler matched {request_type} (intent: {intent:?})")]
    Unrouted {
        request_type: String,
        intent: Option<String>,
    },
    #[error("Invalid reply: {0}")]
    Response(#[from] ResponseError),
    #[error("Handler panicked: {0}")]
    Panicked(String),
    #[allow(dead_code)] // API completeness
    #[error("{0}")]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl DispatchFault {
    fn unrouted(event: &SkillEvent) -> Self {
        Self::Unrouted {
            request_type: event.request_type().to_string(),
            intent: event.intent_name().map(str::to_string),
        }
    }
}

/// Conversation phase after a request, derived per request and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NewSession,
    InConversation,
    Ended,
}

/// What a handler receives
#[derive(Debug, Clone)]
pub struct HandlerInput {
    pub event: SkillEvent,
    pub session: SessionContext,
}

impl HandlerInput {
    pub fn new(event: SkillEvent, session: SessionContext) -> Self {
        Self { event, session }
    }
}

/// Reply plus the session context the platform should carry forward
#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    pub response: SkillResponse,
    pub session: SessionContext,
    pub phase: SessionPhase,
}

/// Pure predicate over an event
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    RequestType(RequestKind),
    /// Intent request whose name is any of the listed names
    IntentNamed(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, event: &SkillEvent) -> bool {
        match self {
            Self::RequestType(kind) => event.kind() == *kind,
            Self::IntentNamed(names) => event
                .intent_name()
                .is_some_and(|name| names.contains(&name)),
        }
    }
}

/// Request handler owning the events its rule matches
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, input: &HandlerInput) -> Result<HandlerOutcome, DispatchFault>;
}

/// Last-resort handler; must always produce a reply
pub trait FaultHandler: Send + Sync {
    fn handle(&self, input: &HandlerInput, fault: &DispatchFault) -> HandlerOutcome;
}

/// A (predicate, handler) binding
pub struct DispatchRule {
    name: &'static str,
    matcher: Matcher,
    handler: Arc<dyn RequestHandler>,
}

impl DispatchRule {
    #[allow(dead_code)] // API completeness
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Collects rules in priority order
#[derive(Default)]
pub struct DispatcherBuilder {
    rules: Vec<DispatchRule>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule(
        mut self,
        name: &'static str,
        matcher: Matcher,
        handler: Arc<dyn RequestHandler>,
    ) -> Self {
        self.rules.push(DispatchRule {
            name,
            matcher,
            handler,
        });
        self
    }

    /// Finish with the catch-all fault handler
    pub fn fallback(self, fallback: Arc<dyn FaultHandler>) -> Dispatcher {
        Dispatcher {
            rules: self.rules,
            fallback,
        }
    }
}

/// Routes each event to exactly one handler
pub struct Dispatcher {
    rules: Vec<DispatchRule>,
    fallback: Arc<dyn FaultHandler>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    #[allow(dead_code)] // API completeness
    pub fn rules(&self) -> &[DispatchRule] {
        &self.rules
    }

    /// First rule whose predicate matches
    pub fn route(&self, event: &SkillEvent) -> Option<&DispatchRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(event))
    }

    /// Handle one event; never fails
    pub async fn dispatch(&self, input: HandlerInput) -> HandlerOutcome {
        let result = match self.route(&input.event) {
            Some(rule) => {
                tracing::debug!(
                    rule = rule.name,
                    request_type = input.event.request_type(),
                    intent = ?input.event.intent_name(),
                    "Dispatching request"
                );
                AssertUnwindSafe(rule.handler.handle(&input))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(DispatchFault::Panicked(panic_message(&*panic))))
            }
            None => Err(DispatchFault::unrouted(&input.event)),
        };

        match result {
            Ok(outcome) => outcome,
            Err(fault) => self.fallback.handle(&input, &fault),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
