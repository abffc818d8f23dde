// --- File: crates/bookify_assistant/src/routes.rs ---

use crate::client::ChatClient;
use crate::handlers::{chat_handler, AssistantState};
use axum::{routing::post, Router};
use bookify_config::{AppConfig, AssistantConfig};
use std::sync::Arc;

/// Creates a router containing the assistant routes.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let assistant_config = config.assistant.clone().unwrap_or_else(|| AssistantConfig {
        api_url: None,
        model: None,
        api_key_env: None,
        system_prompt: None,
        timeout_secs: None,
    });
    let client = Arc::new(ChatClient::from_config(&assistant_config));
    let state = Arc::new(AssistantState { config, client });

    Router::new()
        .route("/assistant/chat", post(chat_handler))
        .with_state(state)
}
