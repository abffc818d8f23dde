#[cfg(test)]
mod tests {
    use crate::ledger::BookingLedger;
    use crate::logic::{
        create_booking, BookingError, BookingOptions, SlotGridConfig, ValidatedBooking,
    };
    use crate::service::mock::MockCalendarService;
    use crate::service::CalendarServiceError;
    use bookify_common::services::{CalendarEvent, CalendarService};
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::Asia::Kolkata;
    use std::fs;

    fn grid() -> SlotGridConfig {
        SlotGridConfig {
            time_zone: Kolkata,
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            day_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            slot_duration: Duration::minutes(30),
        }
    }

    fn options() -> BookingOptions {
        BookingOptions {
            summary: "Consultation".to_string(),
            recurrence_count: 10,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn local(hour: u32, minute: u32) -> DateTime<Utc> {
        Kolkata
            .from_local_datetime(&day().and_hms_opt(hour, minute, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    fn temp_ledger() -> BookingLedger {
        let path =
            std::env::temp_dir().join(format!("bookify-booking-{}.csv", uuid::Uuid::new_v4()));
        BookingLedger::new(path)
    }

    fn booking(email: &str, slot_start: DateTime<Utc>) -> ValidatedBooking {
        ValidatedBooking {
            email: email.to_string(),
            day: day(),
            slot_start,
            description: "flat viewing".to_string(),
            recurring: false,
        }
    }

    #[tokio::test]
    async fn inserting_an_overlapping_event_conflicts() {
        let service = MockCalendarService::new();
        let event = CalendarEvent {
            start_time: local(10, 0).to_rfc3339(),
            end_time: local(10, 30).to_rfc3339(),
            summary: "Consultation".to_string(),
            description: None,
            attendee_email: Some("client@example.com".to_string()),
            recurrence: None,
        };

        service.create_event("primary", event.clone()).await.unwrap();
        let err = service.create_event("primary", event).await.unwrap_err();
        assert!(matches!(err, CalendarServiceError::Conflict));
    }

    #[tokio::test]
    async fn created_events_show_up_as_busy_time() {
        let service = MockCalendarService::new();
        let event = CalendarEvent {
            start_time: local(11, 0).to_rfc3339(),
            end_time: local(11, 30).to_rfc3339(),
            summary: "Consultation".to_string(),
            description: None,
            attendee_email: None,
            recurrence: None,
        };
        service.create_event("primary", event).await.unwrap();

        let busy = service
            .get_busy_times("primary", local(9, 0), local(17, 0))
            .await
            .unwrap();
        assert_eq!(busy, vec![(local(11, 0), local(11, 30))]);
    }

    #[tokio::test]
    async fn booking_appends_one_ledger_row_and_returns_the_event_link() {
        let service = MockCalendarService::new();
        let ledger = temp_ledger();

        let confirmation = create_booking(
            &service,
            "primary",
            &ledger,
            &grid(),
            &options(),
            booking("client@example.com", local(9, 0)),
        )
        .await
        .unwrap();

        assert!(confirmation.event_id.is_some());
        assert!(confirmation.event_link.is_some());
        assert_eq!(confirmation.slot.start, local(9, 0));

        let contents = fs::read_to_string(ledger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "header plus exactly one booking row");
        assert!(lines[1].starts_with("client@example.com,"));

        fs::remove_file(ledger.path()).unwrap();
    }

    #[tokio::test]
    async fn booking_a_taken_slot_fails_and_writes_no_ledger_row() {
        let service = MockCalendarService::new();
        let ledger = temp_ledger();

        create_booking(
            &service,
            "primary",
            &ledger,
            &grid(),
            &options(),
            booking("first@example.com", local(9, 0)),
        )
        .await
        .unwrap();

        // The second request re-computes availability, so the taken slot no
        // longer resolves.
        let err = create_booking(
            &service,
            "primary",
            &ledger,
            &grid(),
            &options(),
            booking("second@example.com", local(9, 0)),
        )
        .await
        .unwrap_err();

        assert_eq!(err, BookingError::SlotNotFound);
        let contents = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            contents.lines().count(),
            2,
            "only the first booking may be recorded"
        );

        fs::remove_file(ledger.path()).unwrap();
    }

    #[tokio::test]
    async fn fully_booked_day_reports_no_availability() {
        let service = MockCalendarService::new();
        let ledger = temp_ledger();

        let all_day = CalendarEvent {
            start_time: local(9, 0).to_rfc3339(),
            end_time: local(17, 0).to_rfc3339(),
            summary: "Offsite".to_string(),
            description: None,
            attendee_email: None,
            recurrence: None,
        };
        service.create_event("primary", all_day).await.unwrap();

        let err = create_booking(
            &service,
            "primary",
            &ledger,
            &grid(),
            &options(),
            booking("client@example.com", local(9, 0)),
        )
        .await
        .unwrap_err();

        assert_eq!(err, BookingError::NoSlotsAvailable);
        assert!(!ledger.path().exists(), "no ledger file may be created");
    }
}
