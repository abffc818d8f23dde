// File: crates/bookify_gcal/src/handlers.rs
use crate::logic::{
    create_booking, generate_slots, get_busy_times, upcoming_dates, AvailableDatesResponse,
    AvailableSlotsResponse, BookingError, BookingOptions, BookingResponse, CreateBookingRequest,
    DateOption, SlotGridConfig, SlotView, DEFAULT_BOOKING_WINDOW_DAYS,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::HubType; // Import the Hub type alias
use crate::ledger::{BookingLedger, DEFAULT_LEDGER_PATH};
use crate::service::GoogleCalendarService;
use bookify_common::http::{error_response, ErrorResponse};
use bookify_common::services::{BoxedError, NotificationService};
use bookify_config::AppConfig; // Use the unified config

// Define shared state needed by GCal handlers
#[derive(Clone)]
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub calendar_hub: Arc<HubType>, // Share the authenticated Calendar client
    /// Confirmation mailer, when the mailer feature is active.
    pub mailer: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn booking_error_response(err: BookingError) -> HandlerError {
    let status = match err {
        BookingError::InvalidDateFormat(_)
        | BookingError::MissingRequiredField(_)
        | BookingError::NoSlotsAvailable => StatusCode::BAD_REQUEST,
        BookingError::SlotNotFound => StatusCode::CONFLICT,
        BookingError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

/// Pulls the GCal config section out of state, or reports the server as
/// misconfigured.
fn gcal_config(state: &GcalState) -> Result<&bookify_config::GcalConfig, HandlerError> {
    if !state.config.use_gcal {
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Calendar service is disabled.",
        ));
    }
    state.config.gcal.as_ref().ok_or_else(|| {
        info!("GCal configuration missing in AppConfig.");
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error: GCal config missing.",
        )
    })
}

fn slot_grid(config: &bookify_config::GcalConfig) -> Result<SlotGridConfig, HandlerError> {
    SlotGridConfig::from_config(config).map_err(|e| {
        info!("Invalid scheduling configuration: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

/// Handler to list the dates the picker offers.
#[axum::debug_handler]
pub async fn available_dates_handler(
    State(state): State<Arc<GcalState>>,
) -> Result<Json<AvailableDatesResponse>, HandlerError> {
    let config = gcal_config(&state)?;
    let grid = slot_grid(config)?;

    let today = Utc::now().with_timezone(&grid.time_zone).date_naive();
    let window_days = config
        .booking_window_days
        .unwrap_or(DEFAULT_BOOKING_WINDOW_DAYS);
    let include_weekends = config.include_weekends.unwrap_or(false);

    let dates = upcoming_dates(today, window_days, include_weekends)
        .into_iter()
        .map(|day| DateOption {
            value: day.format("%Y-%m-%d").to_string(),
            display: day.format("%a, %b %d").to_string(),
        })
        .collect();

    Ok(Json(AvailableDatesResponse { dates }))
}

/// Handler to list the open slots of one date.
#[axum::debug_handler]
pub async fn available_slots_handler(
    State(state): State<Arc<GcalState>>,
    Path(date): Path<String>,
) -> Result<Json<AvailableSlotsResponse>, HandlerError> {
    let config = gcal_config(&state)?;
    let grid = slot_grid(config)?;
    let calendar_id = config.calendar_id.as_deref().unwrap_or("primary");

    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid date format"))?;
    let (day_start, day_end) = grid.day_bounds(day).ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            "Date cannot be resolved in the configured time zone",
        )
    })?;

    let busy_periods = get_busy_times(&state.calendar_hub, calendar_id, day_start, day_end)
        .await
        .map_err(|e| {
            info!("Error fetching free/busy: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to query calendar availability",
            )
        })?;

    let slots = generate_slots(day, &busy_periods, &grid);
    let message = slots
        .is_empty()
        .then(|| "No slots available for this date.".to_string());
    let slots = slots
        .iter()
        .map(|slot| SlotView::from_slot(slot, grid.time_zone))
        .collect();

    Ok(Json(AvailableSlotsResponse { slots, message }))
}

/// Handler to book a slot.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<GcalState>>,   // Extract shared GCal state
    Json(payload): Json<CreateBookingRequest>, // Extract JSON body
) -> Result<Json<BookingResponse>, HandlerError> {
    let config = gcal_config(&state)?;
    let grid = slot_grid(config)?;
    let calendar_id = config.calendar_id.as_deref().unwrap_or("primary");
    let options = BookingOptions::from_config(config);
    let ledger = BookingLedger::new(
        config
            .ledger_path
            .clone()
            .unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string()),
    );

    // Field validation runs before any call leaves the process.
    let booking = payload.validate().map_err(booking_error_response)?;
    let date = booking.day.format("%Y-%m-%d").to_string();

    let service = GoogleCalendarService::new(state.calendar_hub.clone());
    let confirmation = create_booking(&service, calendar_id, &ledger, &grid, &options, booking)
        .await
        .map_err(|e| {
            info!("Error booking slot: {}", e);
            booking_error_response(e)
        })?;

    info!("Successfully created event: {:?}", confirmation.event_id);
    let slot_label = confirmation.slot.label(grid.time_zone);

    // Fire-and-forget confirmation mail; a send failure never fails the booking.
    if let Some(mailer) = state.mailer.clone() {
        let to = confirmation.email.clone();
        let subject = format!("Booking confirmed for {}", date);
        let body = format!(
            "Your appointment on {} ({}) is confirmed.\n\nEvent link: {}\n",
            date,
            slot_label,
            confirmation.event_link.as_deref().unwrap_or("(none)"),
        );
        tokio::spawn(async move {
            if let Err(e) = mailer.send_email(&to, &subject, &body).await {
                warn!("Failed to send confirmation email to {}: {}", to, e);
            }
        });
    }

    Ok(Json(BookingResponse {
        success: true,
        event_link: confirmation.event_link,
        email: confirmation.email,
        date,
        slot: slot_label,
        message: "Appointment booked successfully.".to_string(),
    }))
}
