//! Mock implementations for testing
//!
//! These mocks enable handler and client tests without real I/O.

use super::{CompletionClient, CompletionError, CompletionResult, HttpReply, HttpTransport};
use crate::transcript::Transcript;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock completion client
// ============================================================================

/// Mock completion client that returns queued results
pub struct MockCompletionClient {
    results: Mutex<VecDeque<CompletionResult>>,
    model_id: String,
    /// Record of every transcript sent
    pub requests: Mutex<Vec<Transcript>>,
}

impl MockCompletionClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_text(&self, text: impl Into<String>) {
        self.results
            .lock()
            .unwrap()
            .push_back(CompletionResult::Success(text.into()));
    }

    /// Queue a classified failure
    pub fn queue_error(&self, error: CompletionError) {
        self.results
            .lock()
            .unwrap()
            .push_back(CompletionResult::Failure(error));
    }

    pub fn recorded_requests(&self) -> Vec<Transcript> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        self.requests.lock().unwrap().push(transcript.clone());
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            CompletionResult::Failure(CompletionError::transport("No mock result queued"))
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Counting HTTP transport
// ============================================================================

/// Transport that records calls and replays queued replies
pub struct CountingTransport {
    replies: Mutex<VecDeque<HttpReply>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl CountingTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: HttpReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn recorded_calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CompletionError::transport("Connection failed: no reply queued"))
    }
}
