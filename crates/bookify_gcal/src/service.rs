// --- File: crates/bookify_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for
//! Google Calendar. All conflict prevention here is best effort: the
//! free/busy re-check before insert narrows the race window but nothing is
//! atomic, so the provider remains the final arbiter of concurrent writes.

use bookify_common::services::{
    BookedEvent, BoxFuture, CalendarEvent, CalendarEventResult, CalendarService,
};
use chrono::{DateTime, Utc};
use google_calendar3::api::{
    Event, EventAttendee, EventDateTime, FreeBusyRequest, FreeBusyRequestItem,
};
use thiserror::Error;
use tracing::info;

use crate::auth::HubType;
use std::sync::Arc;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum CalendarServiceError {
    #[error("Google API error: {0}")]
    Api(#[from] google_calendar3::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Upstream request failed: {0}")]
    Request(String),
    #[error("Failed to parse time: {0}")]
    TimeParse(String),
    #[error("Booking conflict")]
    Conflict,
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = CalendarServiceError;

    /// Retrieves busy time periods for a calendar within a given time range.
    ///
    /// Queries the free/busy endpoint and returns the busy intervals sorted
    /// chronologically by start time. Periods with a missing start or end
    /// are skipped with a warning.
    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let req = FreeBusyRequest {
                time_min: Some(start_time),
                time_max: Some(end_time),
                time_zone: Some("UTC".to_string()),
                items: Some(vec![FreeBusyRequestItem {
                    id: Some(calendar_id.to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            // Make the API call
            let (_response, freebusy_response) = calendar_hub.freebusy().query(req).doit().await?;

            let mut busy_periods = Vec::new();

            // Extract busy periods for the specified calendar
            if let Some(calendars) = freebusy_response.calendars {
                if let Some(cal_info) = calendars.get(&calendar_id) {
                    if let Some(busy_times) = &cal_info.busy {
                        for period in busy_times {
                            if let (Some(start_dt), Some(end_dt)) = (period.start, period.end) {
                                busy_periods.push((start_dt, end_dt));
                            } else {
                                info!(
                                    "Warning: Skipping busy period with missing start/end: {:?}",
                                    period
                                );
                            }
                        }
                    }
                }
            }
            // Sort busy periods for easier processing
            busy_periods.sort_by_key(|k| k.0);
            Ok(busy_periods)
        })
    }

    /// Creates a new calendar event in the specified calendar.
    ///
    /// Validates the event times, re-checks the calendar for conflicting
    /// busy periods, then inserts the event with the attendee invited and
    /// `sendUpdates=all` so the provider mails the invitation. Recurring
    /// events carry their RRULE lines verbatim.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();
        let this = self;

        Box::pin(async move {
            // Parse start and end times from request strings
            let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
                .map_err(|e| CalendarServiceError::TimeParse(format!("Invalid start_time: {}", e)))?
                .with_timezone(&Utc);
            let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
                .map_err(|e| CalendarServiceError::TimeParse(format!("Invalid end_time: {}", e)))?
                .with_timezone(&Utc);

            // Basic validation: end time must be after start time
            if end_dt <= start_dt {
                return Err(CalendarServiceError::TimeParse(
                    "End time must be after start time".to_string(),
                ));
            }

            // Check for conflicts with existing events
            let busy_times = this.get_busy_times(&calendar_id, start_dt, end_dt).await?;

            // Overlap in the half-open sense: (StartA < EndB) and (EndA > StartB)
            for (busy_start, busy_end) in &busy_times {
                if start_dt < *busy_end && end_dt > *busy_start {
                    return Err(CalendarServiceError::Conflict);
                }
            }

            // Construct the Event object
            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(EventDateTime {
                    date_time: Some(start_dt),
                    time_zone: Some("UTC".to_string()), // Store event times in UTC
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(end_dt),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                attendees: event.attendee_email.map(|email| {
                    vec![EventAttendee {
                        email: Some(email),
                        ..Default::default()
                    }]
                }),
                recurrence: event.recurrence,
                ..Default::default() // Use default for other fields
            };

            // Make the API call to insert the event
            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .send_updates("all")
                .doit()
                .await?;

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
                html_link: created_event.html_link,
            })
        })
    }

    /// Retrieves booked events in the specified calendar within a time range.
    ///
    /// Recurring events are expanded and results are ordered by start time.
    /// Date-only events are widened to the full day.
    fn get_booked_events(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<BookedEvent>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let request = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(start_time)
                .time_max(end_time)
                .single_events(true) // Expand recurring events
                .order_by("startTime") // Sort by start time
                .show_deleted(include_cancelled);

            // Make the API call
            let (_, events_list) = request.doit().await?;

            let mut booked_events = Vec::new();

            if let Some(items) = events_list.items {
                for event in items {
                    // Skip cancelled events if not including them
                    let status = event.status.as_deref().unwrap_or("confirmed");
                    if !include_cancelled && status == "cancelled" {
                        continue;
                    }

                    let event_id = event.id.unwrap_or_default();
                    let summary = event.summary.unwrap_or_default();
                    let description = event.description;

                    // Handle start time
                    let start_time = match event.start {
                        Some(start) => match start.date_time {
                            Some(dt) => dt.to_rfc3339(),
                            None => match start.date {
                                Some(d) => format!("{}T00:00:00Z", d),
                                None => "Unknown start time".to_string(),
                            },
                        },
                        None => "Unknown start time".to_string(),
                    };

                    // Handle end time
                    let end_time = match event.end {
                        Some(end) => match end.date_time {
                            Some(dt) => dt.to_rfc3339(),
                            None => match end.date {
                                Some(d) => format!("{}T23:59:59Z", d),
                                None => "Unknown end time".to_string(),
                            },
                        },
                        None => "Unknown end time".to_string(),
                    };

                    let status = event.status.unwrap_or_else(|| "confirmed".to_string());
                    let created = event.created.map(|dt| dt.to_rfc3339()).unwrap_or_default();
                    let updated = event.updated.map(|dt| dt.to_rfc3339()).unwrap_or_default();

                    booked_events.push(BookedEvent {
                        event_id,
                        summary,
                        description,
                        start_time,
                        end_time,
                        status,
                        created,
                        updated,
                    });
                }
            }

            Ok(booked_events)
        })
    }
}

/// Mock implementation of CalendarService for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock calendar service for testing.
    pub struct MockCalendarService {
        events: Mutex<HashMap<String, Vec<(String, CalendarEvent, String)>>>,
    }

    impl Default for MockCalendarService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCalendarService {
        /// Create a new mock calendar service.
        pub fn new() -> Self {
            Self {
                events: Mutex::new(HashMap::new()),
            }
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = CalendarServiceError;

        fn get_busy_times(
            &self,
            calendar_id: &str,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                let events = self.events.lock().unwrap();
                let calendar_events = events.get(&calendar_id).cloned().unwrap_or_default();

                let mut busy_times = Vec::new();
                for (_, event, status) in calendar_events {
                    if status == "cancelled" {
                        continue;
                    }

                    let event_start = DateTime::parse_from_rfc3339(&event.start_time)
                        .map_err(|e| CalendarServiceError::TimeParse(e.to_string()))?
                        .with_timezone(&Utc);
                    let event_end = DateTime::parse_from_rfc3339(&event.end_time)
                        .map_err(|e| CalendarServiceError::TimeParse(e.to_string()))?
                        .with_timezone(&Utc);

                    if event_start < end_time && event_end > start_time {
                        busy_times.push((event_start, event_end));
                    }
                }

                busy_times.sort_by_key(|k| k.0);
                Ok(busy_times)
            })
        }

        fn create_event(
            &self,
            calendar_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let calendar_id = calendar_id.to_string();
            let event = event.clone();

            Box::pin(async move {
                // Parse and validate times
                let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
                    .map_err(|e| {
                        CalendarServiceError::TimeParse(format!("Invalid start_time: {}", e))
                    })?
                    .with_timezone(&Utc);
                let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
                    .map_err(|e| {
                        CalendarServiceError::TimeParse(format!("Invalid end_time: {}", e))
                    })?
                    .with_timezone(&Utc);

                if end_dt <= start_dt {
                    return Err(CalendarServiceError::TimeParse(
                        "End time must be after start time".to_string(),
                    ));
                }

                // Check for conflicts
                let busy_times = self.get_busy_times(&calendar_id, start_dt, end_dt).await?;

                for (busy_start, busy_end) in &busy_times {
                    if start_dt < *busy_end && end_dt > *busy_start {
                        return Err(CalendarServiceError::Conflict);
                    }
                }

                // Create the event
                let event_id = format!("mock-event-{}", uuid::Uuid::new_v4());

                let mut events = self.events.lock().unwrap();
                let calendar_events = events.entry(calendar_id.to_string()).or_default();
                calendar_events.push((event_id.clone(), event, "confirmed".to_string()));

                Ok(CalendarEventResult {
                    event_id: Some(event_id.clone()),
                    status: "confirmed".to_string(),
                    html_link: Some(format!("https://calendar.example/event/{}", event_id)),
                })
            })
        }

        fn get_booked_events(
            &self,
            calendar_id: &str,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            include_cancelled: bool,
        ) -> BoxFuture<'_, Vec<BookedEvent>, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                let events = self.events.lock().unwrap();
                let calendar_events = events.get(&calendar_id).cloned().unwrap_or_default();

                let mut booked_events = Vec::new();
                for (event_id, event, status) in calendar_events {
                    if !include_cancelled && status == "cancelled" {
                        continue;
                    }

                    let event_start = DateTime::parse_from_rfc3339(&event.start_time)
                        .map_err(|e| CalendarServiceError::TimeParse(e.to_string()))?
                        .with_timezone(&Utc);
                    let event_end = DateTime::parse_from_rfc3339(&event.end_time)
                        .map_err(|e| CalendarServiceError::TimeParse(e.to_string()))?
                        .with_timezone(&Utc);

                    if event_start < end_time && event_end > start_time {
                        booked_events.push(BookedEvent {
                            event_id,
                            summary: event.summary,
                            description: event.description,
                            start_time: event.start_time,
                            end_time: event.end_time,
                            status,
                            created: Utc::now().to_rfc3339(),
                            updated: Utc::now().to_rfc3339(),
                        });
                    }
                }

                booked_events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
                Ok(booked_events)
            })
        }
    }
}
