// File: crates/bookify_gcal/src/auth.rs
use crate::service::CalendarServiceError;
use bookify_config::GcalConfig;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        read_authorized_user_secret, read_service_account_key, AuthorizedUserAuthenticator,
        ServiceAccountAuthenticator,
    },
    CalendarHub,
};
use std::path::Path;
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds the authenticated Calendar client once at startup.
///
/// Two credential sources are supported: a service account key
/// (`key_path`), or a locally cached authorized-user token
/// (`token_cache_path`). The service account takes precedence when both
/// are configured. The returned hub is the single handle passed into
/// router state; there is no module-level credential state.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, CalendarServiceError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| CalendarServiceError::Request(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let auth = if let Some(key_path) = config.key_path.as_deref() {
        info!("Authenticating with service account key: {}", key_path);
        let sa_key = read_service_account_key(Path::new(key_path))
            .await
            .map_err(|e| CalendarServiceError::Auth(format!("reading {key_path}: {e}")))?;
        ServiceAccountAuthenticator::builder(sa_key)
            .build()
            .await
            .map_err(|e| CalendarServiceError::Auth(e.to_string()))?
    } else if let Some(token_path) = config.token_cache_path.as_deref() {
        info!("Authenticating with cached user token: {}", token_path);
        let user_secret = read_authorized_user_secret(Path::new(token_path))
            .await
            .map_err(|e| CalendarServiceError::Auth(format!("reading {token_path}: {e}")))?;
        AuthorizedUserAuthenticator::builder(user_secret)
            .build()
            .await
            .map_err(|e| CalendarServiceError::Auth(e.to_string()))?
    } else {
        return Err(CalendarServiceError::Auth(
            "Missing key_path or token_cache_path in GcalConfig".to_string(),
        ));
    };

    let hub = CalendarHub::new(client, auth);

    Ok(hub)
}
