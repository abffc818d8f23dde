// --- File: crates/bookify_gcal/src/logic.rs ---
use crate::auth::HubType; // Use the specific Hub type alias
use crate::ledger::{BookingLedger, BookingRecord};
use crate::service::{CalendarServiceError, GoogleCalendarService};
use bookify_common::error::BookifyError;
use bookify_common::services::{CalendarEvent, CalendarService};
use bookify_config::GcalConfig;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
use thiserror::Error;

/// Everything that can go wrong on the booking path. Upstream failures of
/// any kind (auth, network, provider validation) surface as `Failed` with
/// the underlying message; nothing is retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("No slots available for this date")]
    NoSlotsAvailable,
    #[error("Selected time slot is not available")]
    SlotNotFound,
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Booking failed: {0}")]
    Failed(String),
}

// --- Slot Grid ---

pub const DEFAULT_TIME_ZONE: &str = "Asia/Kolkata";
pub const DEFAULT_WORK_START: &str = "09:00";
pub const DEFAULT_WORK_END: &str = "17:00";
pub const DEFAULT_SLOT_DURATION_MINUTES: i64 = 30;
pub const DEFAULT_BOOKING_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_EVENT_SUMMARY: &str = "Real Estate Consultation";
pub const DEFAULT_RECURRENCE_COUNT: i32 = 10;

/// The fixed daily grid slots are generated on: a working window in the
/// provider-local time zone, cut into equal-length slots.
#[derive(Debug, Clone)]
pub struct SlotGridConfig {
    pub time_zone: Tz,
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot_duration: Duration,
}

impl SlotGridConfig {
    /// Builds the grid from the GCal config section, falling back to the
    /// defaults (09:00-17:00, 30 minutes) where fields are absent.
    pub fn from_config(config: &GcalConfig) -> Result<Self, BookifyError> {
        let tz_name = config.time_zone.as_deref().unwrap_or(DEFAULT_TIME_ZONE);
        let time_zone = Tz::from_str(tz_name)
            .map_err(|_| BookifyError::ConfigError(format!("Unknown time zone: {tz_name}")))?;

        let day_start = parse_work_time(
            config.work_start_time.as_deref().unwrap_or(DEFAULT_WORK_START),
        )?;
        let day_end =
            parse_work_time(config.work_end_time.as_deref().unwrap_or(DEFAULT_WORK_END))?;
        if day_end <= day_start {
            return Err(BookifyError::ConfigError(
                "work_end_time must be after work_start_time".to_string(),
            ));
        }

        let minutes = config
            .slot_duration_minutes
            .unwrap_or(DEFAULT_SLOT_DURATION_MINUTES);
        if minutes <= 0 {
            return Err(BookifyError::ConfigError(
                "slot_duration_minutes must be positive".to_string(),
            ));
        }

        Ok(Self {
            time_zone,
            day_start,
            day_end,
            slot_duration: Duration::minutes(minutes),
        })
    }

    /// The UTC bounds of a calendar day in the grid's time zone, used when
    /// fetching busy periods. `None` when local midnight does not resolve.
    pub fn day_bounds(&self, day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self
            .time_zone
            .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
            .earliest()?;
        let end = self
            .time_zone
            .from_local_datetime(&day.succ_opt()?.and_hms_opt(0, 0, 0)?)
            .earliest()?;
        Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
    }
}

fn parse_work_time(value: &str) -> Result<NaiveTime, BookifyError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| BookifyError::ConfigError(format!("Invalid working time: {value}")))
}

// --- Data Structures ---

/// A bookable half-open interval `[start, end)`. The RFC3339 start instant
/// doubles as the slot's stable identifier on the wire; the formatted label
/// is presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Half-open overlap test: `[start, end)` against `[busy_start, busy_end)`.
    pub fn overlaps(&self, busy_start: DateTime<Utc>, busy_end: DateTime<Utc>) -> bool {
        self.start < busy_end && self.end > busy_start
    }

    /// Display label in the given time zone, e.g. "09:00 AM - 09:30 AM".
    pub fn label(&self, tz: Tz) -> String {
        format!(
            "{} - {}",
            self.start.with_timezone(&tz).format("%I:%M %p"),
            self.end.with_timezone(&tz).format("%I:%M %p")
        )
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DateOption {
    /// Machine value in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub value: String,
    /// Display form, e.g. "Mon, May 05"
    #[cfg_attr(feature = "openapi", schema(example = "Mon, May 05"))]
    pub display: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableDatesResponse {
    pub dates: Vec<DateOption>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotView {
    /// Slot start in RFC3339; this is the identifier sent back when booking.
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T03:30:00+00:00"))]
    pub start: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T04:00:00+00:00"))]
    pub end: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00 AM - 09:30 AM"))]
    pub label: String,
}

impl SlotView {
    pub fn from_slot(slot: &TimeSlot, tz: Tz) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            label: slot.label(tz),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableSlotsResponse {
    pub slots: Vec<SlotView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateBookingRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "client@example.com"))]
    pub email: Option<String>,
    /// Booking date in YYYY-MM-DD format
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: Option<String>,
    /// Stable slot identifier: the RFC3339 start time of an offered slot
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T03:30:00+00:00"))]
    pub slot_start: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}

/// A booking request with all required fields present and parsed.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub email: String,
    pub day: NaiveDate,
    pub slot_start: DateTime<Utc>,
    pub description: String,
    pub recurring: bool,
}

impl CreateBookingRequest {
    /// Checks the required fields and parses the date and slot identifier.
    /// Runs before any external call is made.
    pub fn validate(self) -> Result<ValidatedBooking, BookingError> {
        let email = self
            .email
            .filter(|v| !v.trim().is_empty())
            .ok_or(BookingError::MissingRequiredField("email"))?;
        let date = self
            .date
            .filter(|v| !v.trim().is_empty())
            .ok_or(BookingError::MissingRequiredField("date"))?;
        let slot_start = self
            .slot_start
            .filter(|v| !v.trim().is_empty())
            .ok_or(BookingError::MissingRequiredField("slot_start"))?;

        let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            BookingError::InvalidDateFormat("date must be YYYY-MM-DD".to_string())
        })?;
        let slot_start = DateTime::parse_from_rfc3339(&slot_start)
            .map_err(|_| {
                BookingError::InvalidDateFormat("slot_start must be an RFC3339 time".to_string())
            })?
            .with_timezone(&Utc);

        Ok(ValidatedBooking {
            email,
            day,
            slot_start,
            description: self.description.unwrap_or_default(),
            recurring: self.recurring,
        })
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://www.google.com/calendar/event?eid=...")
    )]
    pub event_link: Option<String>,
    pub email: String,
    pub date: String,
    pub slot: String,
    pub message: String,
}

/// What a successful booking hands back to the caller.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub event_id: Option<String>,
    pub event_link: Option<String>,
    pub slot: TimeSlot,
    pub email: String,
}

/// Event construction knobs taken from configuration.
#[derive(Debug, Clone)]
pub struct BookingOptions {
    /// Event title used for every booking.
    pub summary: String,
    /// Weekly occurrence count for recurring bookings.
    pub recurrence_count: i32,
}

impl BookingOptions {
    pub fn from_config(config: &GcalConfig) -> Self {
        Self {
            summary: config
                .event_summary
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_SUMMARY.to_string()),
            recurrence_count: config.recurrence_count.unwrap_or(DEFAULT_RECURRENCE_COUNT),
        }
    }
}

// --- Availability Logic ---

/// Fetches busy time intervals from Google Calendar.
pub async fn get_busy_times(
    hub: &HubType,
    calendar_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, CalendarServiceError> {
    let service = GoogleCalendarService::new(Arc::new(hub.clone()));

    let busy_periods = service
        .get_busy_times(calendar_id, start_time, end_time)
        .await?;

    Ok(busy_periods)
}

/// Generates the bookable slots for one day.
///
/// Walks the working window from its open in fixed `slot_duration` steps
/// and keeps every candidate that fits entirely inside the window and
/// overlaps no busy period. A partial slot at the end of the window is
/// dropped, not truncated. Output is chronological. Pure given its inputs.
pub fn generate_slots(
    day: NaiveDate,
    busy_periods: &[(DateTime<Utc>, DateTime<Utc>)],
    grid: &SlotGridConfig,
) -> Vec<TimeSlot> {
    let Some(window_start) = grid
        .time_zone
        .from_local_datetime(&day.and_time(grid.day_start))
        .earliest()
    else {
        debug!("Working window start does not exist on {} in {}", day, grid.time_zone);
        return Vec::new();
    };
    let Some(window_end) = grid
        .time_zone
        .from_local_datetime(&day.and_time(grid.day_end))
        .earliest()
    else {
        debug!("Working window end does not exist on {} in {}", day, grid.time_zone);
        return Vec::new();
    };

    let window_start = window_start.with_timezone(&Utc);
    let window_end = window_end.with_timezone(&Utc);

    let mut slots = Vec::new();
    let mut cursor = window_start;
    while cursor + grid.slot_duration <= window_end {
        let candidate = TimeSlot {
            start: cursor,
            end: cursor + grid.slot_duration,
        };
        // Linear scan; a day holds at most a handful of busy periods.
        let overlaps = busy_periods
            .iter()
            .any(|&(busy_start, busy_end)| candidate.overlaps(busy_start, busy_end));
        if !overlaps {
            slots.push(candidate);
        }
        cursor += grid.slot_duration;
    }
    slots
}

/// Resolves a slot identifier (its start instant) against a freshly
/// generated slot list.
pub fn find_slot(slots: &[TimeSlot], start: DateTime<Utc>) -> Option<TimeSlot> {
    slots.iter().copied().find(|slot| slot.start == start)
}

/// The dates offered by the date picker: the next `window_days` days,
/// with weekends skipped unless `include_weekends` is set.
pub fn upcoming_dates(today: NaiveDate, window_days: i64, include_weekends: bool) -> Vec<NaiveDate> {
    (0..window_days)
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .filter(|day| include_weekends || !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

// --- Booking Logic ---

/// Books a slot: re-computes the day's availability, resolves the requested
/// slot against it, creates the calendar event, and appends a ledger row.
///
/// The availability re-check makes double-booking unlikely, not impossible;
/// there is no lock between the check and the insert. A ledger append
/// failure after a successful insert is logged and otherwise ignored (the
/// event already exists upstream and is not rolled back).
pub async fn create_booking<S>(
    service: &S,
    calendar_id: &str,
    ledger: &BookingLedger,
    grid: &SlotGridConfig,
    options: &BookingOptions,
    booking: ValidatedBooking,
) -> Result<BookingConfirmation, BookingError>
where
    S: CalendarService + ?Sized,
{
    let (day_start, day_end) = grid.day_bounds(booking.day).ok_or_else(|| {
        BookingError::InvalidDateFormat(
            "date cannot be resolved in the configured time zone".to_string(),
        )
    })?;

    let busy_periods = service
        .get_busy_times(calendar_id, day_start, day_end)
        .await
        .map_err(|e| BookingError::Failed(e.to_string()))?;

    let slots = generate_slots(booking.day, &busy_periods, grid);
    if slots.is_empty() {
        return Err(BookingError::NoSlotsAvailable);
    }
    let slot = find_slot(&slots, booking.slot_start).ok_or(BookingError::SlotNotFound)?;

    let event = CalendarEvent {
        start_time: slot.start.to_rfc3339(),
        end_time: slot.end.to_rfc3339(),
        summary: options.summary.clone(),
        description: (!booking.description.is_empty()).then(|| booking.description.clone()),
        attendee_email: Some(booking.email.clone()),
        recurrence: booking
            .recurring
            .then(|| vec![format!("RRULE:FREQ=WEEKLY;COUNT={}", options.recurrence_count)]),
    };

    let created = service
        .create_event(calendar_id, event)
        .await
        .map_err(|e| BookingError::Failed(e.to_string()))?;

    let record = BookingRecord {
        email: booking.email.clone(),
        start_time: slot.start.to_rfc3339(),
        end_time: slot.end.to_rfc3339(),
        description: booking.description.clone(),
    };
    if let Err(e) = ledger.append(&record) {
        // The calendar event already exists; the ledger is allowed to lag.
        error!("Failed to append booking record to ledger: {}", e);
    }

    Ok(BookingConfirmation {
        event_id: created.event_id,
        event_link: created.html_link,
        slot,
        email: booking.email,
    })
}
