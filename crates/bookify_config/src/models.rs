// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Calendar Config ---
// Holds the booking calendar plus the scheduling knobs for slot generation.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Path to a service account key JSON file.
    pub key_path: Option<String>,
    /// Path to a cached authorized-user token JSON file. Used when no
    /// service account key is configured.
    pub token_cache_path: Option<String>,
    pub calendar_id: Option<String>,
    /// IANA time zone the working window is expressed in.
    pub time_zone: Option<String>,
    /// Start of the working day, "HH:MM".
    pub work_start_time: Option<String>,
    /// End of the working day, "HH:MM".
    pub work_end_time: Option<String>,
    /// Slot granularity in minutes.
    pub slot_duration_minutes: Option<i64>,
    /// How many days ahead the date picker offers.
    pub booking_window_days: Option<i64>,
    /// Whether weekend days are bookable.
    pub include_weekends: Option<bool>,
    /// Event title used for every booking.
    pub event_summary: Option<String>,
    /// Number of weekly occurrences for recurring bookings.
    pub recurrence_count: Option<i32>,
    /// Path of the append-only booking ledger CSV.
    pub ledger_path: Option<String>,
}

// --- Gmail Config ---
// Confirmation mail sender. The service account key may be shared with GCal.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GmailConfig {
    pub key_path: Option<String>,
    /// Address the confirmation mail is sent from.
    pub sender: Option<String>,
}

// --- Assistant Config ---
// Hosted LLM used by the chat front end. The API key is loaded directly
// from the env var named by `api_key_env` (default GROQ_API_KEY).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistantConfig {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub system_prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_mailer: bool,
    #[serde(default)]
    pub use_assistant: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub gmail: Option<GmailConfig>,
    #[serde(default)]
    pub assistant: Option<AssistantConfig>,
}
