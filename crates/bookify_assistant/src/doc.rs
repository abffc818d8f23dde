// File: crates/bookify_assistant/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{ChatRequest, ChatResponse};
use bookify_common::http::ErrorResponse;

#[utoipa::path(
    post,
    path = "/assistant/chat",
    request_body(content = ChatRequest, example = json!({
        "message": "What times are free on Monday?"
    })),
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse,
         example = json!({"reply": "Monday has open slots from 09:00 AM."})
        ),
        (status = 400, description = "Missing message", body = ErrorResponse,
         example = json!({"error": "Missing required field: message"})
        ),
        (status = 502, description = "Assistant unreachable", body = ErrorResponse),
        (status = 504, description = "Assistant timed out", body = ErrorResponse)
    )
)]
fn doc_chat_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_chat_handler),
    components(schemas(ChatRequest, ChatResponse, ErrorResponse)),
    tags(
        (name = "assistant", description = "Chatbot assistant API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct AssistantApiDoc;
