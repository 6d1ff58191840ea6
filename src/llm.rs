//! Remote completion client
//!
//! Turns a transcript into one text-generation call and folds every outcome
//! into a [`CompletionResult`] that can be spoken back to the user.

mod error;
mod gemini;
#[cfg(test)]
pub(crate) mod testing;
mod transport;
mod types;

#[allow(unused_imports)] // Public API re-exports
pub use error::{CompletionError, CompletionErrorKind};
pub use gemini::GeminiClient;
pub use transport::{HttpReply, HttpTransport};
pub use types::CompletionResult;

use crate::transcript::Transcript;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion backends
///
/// Implementations never fail past this boundary; errors are reported as
/// [`CompletionResult::Failure`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Make one completion request for the whole transcript
    async fn complete(&self, transcript: &Transcript) -> CompletionResult;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        (**self).complete(transcript).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for completion clients
pub struct LoggingClient {
    inner: Arc<dyn CompletionClient>,
    model_id: String,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn CompletionClient>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionClient for LoggingClient {
    async fn complete(&self, transcript: &Transcript) -> CompletionResult {
        let start = std::time::Instant::now();
        let result = self.inner.complete(transcript).await;
        let duration = start.elapsed();

        match &result {
            CompletionResult::Success(text) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = transcript.len(),
                    reply_chars = text.chars().count(),
                    "Completion request completed"
                );
            }
            CompletionResult::Failure(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockCompletionClient;
    use super::*;

    #[tokio::test]
    async fn test_logging_client_passes_result_through() {
        let mock = Arc::new(MockCompletionClient::new("mock-model"));
        mock.queue_text("hello");
        mock.queue_error(CompletionError::transport("boom"));
        let client = LoggingClient::new(mock.clone());

        assert_eq!(client.model_id(), "mock-model");
        let transcript = Transcript::with_instruction("sys");
        assert_eq!(client.complete(&transcript).await.display_text(), "hello");
        assert_eq!(
            client.complete(&transcript).await.error().map(|e| e.kind),
            Some(CompletionErrorKind::Transport)
        );
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
