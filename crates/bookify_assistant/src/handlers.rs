// File: crates/bookify_assistant/src/handlers.rs
use crate::client::{AssistantError, ChatClient};
use axum::{extract::State, http::StatusCode, response::Json};
use bookify_common::http::{error_response, ErrorResponse};
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// What the model is told it is, unless the config overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the booking assistant for an appointment \
    service with 30-minute consultation slots on weekdays between 09:00 and 17:00. Help the \
    visitor choose a date and time and collect their email address, then tell them to confirm \
    the booking. Keep answers short and do not invent availability.";

// Define shared state needed by assistant handlers
#[derive(Clone)]
pub struct AssistantState {
    pub config: Arc<AppConfig>,
    pub client: Arc<ChatClient>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "What times are free on Monday?"))]
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatResponse {
    pub reply: String,
}

/// Handler relaying one chat message to the hosted LLM.
#[axum::debug_handler]
pub async fn chat_handler(
    State(state): State<Arc<AssistantState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !state.config.use_assistant {
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Assistant is disabled.",
        ));
    }

    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| {
            error_response(StatusCode::BAD_REQUEST, "Missing required field: message")
        })?;

    let system_prompt = state
        .config
        .assistant
        .as_ref()
        .and_then(|a| a.system_prompt.clone())
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    let reply = state
        .client
        .complete(&message, Some(&system_prompt))
        .await
        .map_err(|e| {
            info!("Assistant request failed: {}", e);
            match e {
                AssistantError::MissingApiKey => error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Assistant API key is not set",
                ),
                AssistantError::Timeout => error_response(
                    StatusCode::GATEWAY_TIMEOUT,
                    "Assistant request timed out. Please try again.",
                ),
                _ => error_response(
                    StatusCode::BAD_GATEWAY,
                    "Failed to reach the assistant service",
                ),
            }
        })?;

    Ok(Json(ChatResponse { reply }))
}
