//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse, RequestEnvelope, ResponseEnvelope};
use super::AppState;
use crate::skill::HandlerInput;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Voice platform webhook
        .route("/skill", post(handle_skill_request))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================
// Skill webhook
// ============================================================

async fn handle_skill_request(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(envelope) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let event = envelope.request.to_event();
    let session = envelope.session_context();
    tracing::info!(
        request_id = ?envelope.request.request_id,
        session_id = ?envelope.session_id(),
        new_session = envelope.session.as_ref().is_some_and(|s| s.new),
        locale = ?envelope.request.locale,
        request_type = event.request_type(),
        intent = ?event.intent_name(),
        "Skill request received"
    );

    let outcome = state
        .dispatcher
        .dispatch(HandlerInput::new(event, session))
        .await;

    tracing::info!(
        request_id = ?envelope.request.request_id,
        phase = ?outcome.phase,
        end_session = outcome.response.should_end_session,
        "Skill reply sent"
    );

    Ok(Json(ResponseEnvelope::from(outcome)))
}

// ============================================================
// Service info
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        tracing::warn!(status = %status, error = %message, "Rejected skill request");
        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockCompletionClient;
    use crate::skill::{build_dispatcher, APOLOGY};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(client: Arc<MockCompletionClient>) -> Router {
        create_router(AppState::new(build_dispatcher(client)))
    }

    async fn post_skill(router: Router, body: String) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/skill")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_launch_then_chat_round_trip() {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        client.queue_text("Hi, I'm listening.");
        client.queue_text("Four.");

        let (status, launch) = post_skill(
            app(client.clone()),
            json!({
                "version": "1.0",
                "session": { "new": true, "sessionId": "s1" },
                "request": { "type": "LaunchRequest", "requestId": "r1" }
            })
            .to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            launch["response"]["outputSpeech"]["text"],
            "Hi, I'm listening. How can I help you?"
        );
        assert_eq!(launch["response"]["shouldEndSession"], false);

        // The platform echoes the attributes back on the next request
        let (status, chat) = post_skill(
            app(client.clone()),
            json!({
                "version": "1.0",
                "session": {
                    "new": false,
                    "sessionId": "s1",
                    "attributes": launch["sessionAttributes"].clone()
                },
                "request": {
                    "type": "IntentRequest",
                    "requestId": "r2",
                    "intent": {
                        "name": "ChatIntent",
                        "slots": { "query": { "name": "query", "value": "What is 2+2?" } }
                    }
                }
            })
            .to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(chat["response"]["outputSpeech"]["text"], "Four.");
        assert_eq!(
            chat["response"]["reprompt"]["outputSpeech"]["text"],
            "Do you have another question?"
        );
        let turns = chat["sessionAttributes"]["history"]["turns"]
            .as_array()
            .unwrap();
        assert_eq!(turns.len(), 4);
    }

    #[tokio::test]
    async fn test_unhandled_request_gets_apology() {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        let (status, body) = post_skill(
            app(client),
            json!({ "request": { "type": "SessionEndedRequest", "reason": "ERROR" } }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["outputSpeech"]["text"], APOLOGY);
        assert_eq!(body["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_null_slots_still_route() {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        let (status, body) = post_skill(
            app(client),
            json!({
                "session": { "new": null, "sessionId": "s1" },
                "request": {
                    "type": "IntentRequest",
                    "intent": { "name": "AMAZON.StopIntent", "slots": null }
                }
            })
            .to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["outputSpeech"]["text"], "Goodbye!");
        assert_eq!(body["response"]["shouldEndSession"], true);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_bad_request() {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        let (status, body) = post_skill(app(client), "{\"nope\": true}".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_health() {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        let response = app(client)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
