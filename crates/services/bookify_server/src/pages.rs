// --- File: crates/services/bookify_server/src/pages.rs ---
//! The thin HTML front end: the chat page and the confirmation page.

use axum::{extract::Query, response::Html};
use serde::Deserialize;

/// The chat front end, embedded at compile time.
pub async fn chatbot_page() -> Html<&'static str> {
    Html(include_str!("../static/chatbot.html"))
}

#[derive(Deserialize, Debug)]
pub struct SuccessParams {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub email: String,
}

/// Confirmation page the chat flow redirects to after a booking.
pub async fn chatbot_success_page(Query(params): Query<SuccessParams>) -> Html<String> {
    let email = escape_html(&params.email);
    let link = escape_html(&params.link);
    let link_row = if link.is_empty() {
        String::new()
    } else {
        format!("<p><a href=\"{link}\">View the event in your calendar</a></p>")
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Booking confirmed</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 32rem; margin: 4rem auto; padding: 0 1rem; }}
    .card {{ border: 1px solid #ddd; border-radius: 8px; padding: 2rem; text-align: center; }}
    a {{ color: #2563eb; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Booking confirmed</h1>
    <p>A calendar invitation is on its way to <strong>{email}</strong>.</p>
    {link_row}
    <p><a href="/">Book another appointment</a></p>
  </div>
</body>
</html>
"#
    ))
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
