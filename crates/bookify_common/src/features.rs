//! Feature flag handling for the Bookify application.
//!
//! Features exist at two levels: compile-time cargo features
//! (`#[cfg(feature = "...")]`) and runtime flags in the configuration
//! (`use_gcal`, `use_mailer`, `use_assistant`). A feature is active only
//! when its flag is set *and* its config section is present.

use bookify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar feature is enabled at runtime.
#[cfg(feature = "gcal")]
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if the confirmation mailer is enabled at runtime.
#[cfg(feature = "mailer")]
pub fn is_mailer_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_mailer, config.gmail.as_ref())
}

/// Check if the chat assistant is enabled at runtime.
#[cfg(feature = "assistant")]
pub fn is_assistant_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_assistant, config.assistant.as_ref())
}
