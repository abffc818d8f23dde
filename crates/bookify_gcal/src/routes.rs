// --- File: crates/bookify_gcal/src/routes.rs ---

use crate::handlers::{
    available_dates_handler, available_slots_handler, create_booking_handler, GcalState,
};
use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::create_calendar_hub;
use bookify_common::services::{BoxedError, NotificationService};
use bookify_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// The calendar hub is built here, once, from the config; the optional
/// mailer is injected by the caller so the booking handler can send
/// confirmation mail without this crate knowing which mail provider backs
/// it.
pub async fn routes(
    config: Arc<AppConfig>,
    mailer: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let calendar_hub =
        create_calendar_hub(config.clone().gcal.as_ref().expect("GCal config missing"))
            .await
            .expect("Failed to create calendar hub");
    let gcal_state = Arc::new(GcalState {
        config,
        calendar_hub: Arc::new(calendar_hub),
        mailer,
    });

    Router::new()
        .route("/available_dates", get(available_dates_handler))
        .route("/available_slots/{date}", get(available_slots_handler))
        .route("/create_booking", post(create_booking_handler))
        .with_state(gcal_state)
}
