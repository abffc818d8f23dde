// File: crates/bookify_mail/src/auth.rs
use crate::service::MailError;
use bookify_config::GmailConfig;
use google_gmail1::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    Gmail,
};
use std::path::Path;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type MailHubType = Gmail<Connector>;

/// Builds the authenticated Gmail client once at startup from a service
/// account key. The key may be the same file the calendar uses.
pub async fn create_gmail_hub(config: &GmailConfig) -> Result<MailHubType, MailError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| MailError::Auth("Missing key_path in GmailConfig".to_string()))?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| MailError::Auth(format!("reading {key_path}: {e}")))?;

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| MailError::Auth(e.to_string()))?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| MailError::Request(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = Gmail::new(client, auth);

    Ok(hub)
}
