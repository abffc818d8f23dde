// --- File: crates/bookify_mail/src/service.rs ---
//! Gmail notification service implementation.
//!
//! Sends the plain-text confirmation mail after a booking. Used
//! fire-and-forget: the booking never waits on, or fails because of, the
//! mail.

use bookify_common::services::{BoxFuture, NotificationResult, NotificationService};
use google_gmail1::api::Message;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::MailHubType;

/// Errors that can occur when sending mail through Gmail.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Gmail API error: {0}")]
    Api(#[from] google_gmail1::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Upstream request failed: {0}")]
    Request(String),
}

/// Gmail-backed notification service.
pub struct GmailMailer {
    mail_hub: Arc<MailHubType>,
    sender: Option<String>,
}

impl GmailMailer {
    /// Create a new Gmail mailer. `sender` is the From header; when absent
    /// the provider fills in the authenticated account.
    pub fn new(mail_hub: Arc<MailHubType>, sender: Option<String>) -> Self {
        Self { mail_hub, sender }
    }
}

/// Assembles the RFC 822 message the Gmail send endpoint expects.
pub fn build_rfc822(sender: Option<&str>, to: &str, subject: &str, body: &str) -> String {
    let mut message = String::new();
    if let Some(from) = sender {
        message.push_str(&format!("From: {from}\r\n"));
    }
    message.push_str(&format!("To: {to}\r\n"));
    message.push_str(&format!("Subject: {subject}\r\n"));
    message.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n");
    message.push_str("\r\n");
    message.push_str(body);
    message
}

impl NotificationService for GmailMailer {
    type Error = MailError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        let mail_hub = self.mail_hub.clone();
        let sender = self.sender.clone();

        Box::pin(async move {
            let raw = build_rfc822(sender.as_deref(), &to, &subject, &body);
            let mime_type = "message/rfc822"
                .parse::<mime::Mime>()
                .map_err(|e| MailError::Request(e.to_string()))?;

            // The message body travels as a media upload, not as JSON.
            let (_response, sent) = mail_hub
                .users()
                .messages_send(Message::default(), "me")
                .upload(Cursor::new(raw.into_bytes()), mime_type)
                .await?;

            info!("Email sent to {}: id {:?}", to, sent.id);
            Ok(NotificationResult {
                id: sent.id.unwrap_or_default(),
                status: "sent".to_string(),
            })
        })
    }
}
