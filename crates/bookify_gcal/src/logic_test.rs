#[cfg(test)]
mod tests {
    use crate::logic::{
        find_slot, generate_slots, upcoming_dates, BookingError, CreateBookingRequest,
        SlotGridConfig,
    };
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::Asia::Kolkata;

    fn grid() -> SlotGridConfig {
        SlotGridConfig {
            time_zone: Kolkata,
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            day_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            slot_duration: Duration::minutes(30),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap() // Monday
    }

    fn local(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        Kolkata
            .from_local_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn free_day_yields_sixteen_contiguous_slots() {
        let slots = generate_slots(day(), &[], &grid());

        assert_eq!(slots.len(), 16, "09:00-17:00 at 30 minutes is 16 slots");
        assert_eq!(slots[0].start, local(day(), 9, 0));
        assert_eq!(slots.last().unwrap().end, local(day(), 17, 0));

        for slot in &slots {
            assert_eq!(slot.end - slot.start, Duration::minutes(30));
        }
        for pair in slots.windows(2) {
            assert_eq!(
                pair[0].end, pair[1].start,
                "slots must be contiguous and non-overlapping"
            );
            assert!(pair[0].start < pair[1].start, "slots must be ascending");
        }
    }

    #[test]
    fn fully_covered_slot_is_excluded_and_others_untouched() {
        let baseline = generate_slots(day(), &[], &grid());
        let busy = vec![(local(day(), 10, 0), local(day(), 10, 30))];

        let slots = generate_slots(day(), &busy, &grid());

        assert_eq!(slots.len(), 15);
        assert!(
            !slots.iter().any(|s| s.start == local(day(), 10, 0)),
            "the booked slot must be absent"
        );
        let expected: Vec<_> = baseline
            .into_iter()
            .filter(|s| s.start != local(day(), 10, 0))
            .collect();
        assert_eq!(slots, expected, "remaining slots must be unmodified");
    }

    #[test]
    fn partial_overlap_excludes_both_adjacent_slots() {
        // 10:15-10:45 straddles the 10:00 and the 10:30 candidate.
        let busy = vec![(local(day(), 10, 15), local(day(), 10, 45))];

        let slots = generate_slots(day(), &busy, &grid());

        assert_eq!(slots.len(), 14);
        assert!(!slots.iter().any(|s| s.start == local(day(), 10, 0)));
        assert!(!slots.iter().any(|s| s.start == local(day(), 10, 30)));
    }

    #[test]
    fn touching_interval_does_not_exclude_neighbours() {
        // Half-open intervals: busy ending exactly at 10:00 leaves the
        // 10:00 slot free, busy starting at 10:30 leaves 10:00-10:30 free.
        let busy = vec![(local(day(), 9, 30), local(day(), 10, 0))];

        let slots = generate_slots(day(), &busy, &grid());

        assert!(slots.iter().any(|s| s.start == local(day(), 10, 0)));
        assert!(!slots.iter().any(|s| s.start == local(day(), 9, 30)));
    }

    #[test]
    fn partial_tail_slot_is_dropped_not_truncated() {
        let mut grid = grid();
        grid.day_end = NaiveTime::from_hms_opt(16, 45, 0).unwrap();

        let slots = generate_slots(day(), &[], &grid);

        assert_eq!(slots.len(), 15);
        assert_eq!(slots.last().unwrap().end, local(day(), 16, 30));
    }

    #[test]
    fn fully_booked_day_has_no_slots() {
        let busy = vec![(local(day(), 9, 0), local(day(), 17, 0))];
        assert!(generate_slots(day(), &busy, &grid()).is_empty());
    }

    #[test]
    fn slot_identifier_round_trips_through_rfc3339() {
        let slots = generate_slots(day(), &[], &grid());
        let original = slots[5];

        let wire = original.start.to_rfc3339();
        let parsed = DateTime::parse_from_rfc3339(&wire)
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(find_slot(&slots, parsed), Some(original));
    }

    #[test]
    fn unknown_identifier_resolves_to_nothing() {
        let slots = generate_slots(day(), &[], &grid());
        let off_grid = local(day(), 9, 10);
        assert_eq!(find_slot(&slots, off_grid), None);
    }

    #[test]
    fn labels_render_in_local_time() {
        let slots = generate_slots(day(), &[], &grid());
        assert_eq!(slots[0].label(Kolkata), "09:00 AM - 09:30 AM");
        assert_eq!(slots.last().unwrap().label(Kolkata), "04:30 PM - 05:00 PM");
    }

    #[test]
    fn day_bounds_cover_the_local_day() {
        let (start, end) = grid().day_bounds(day()).unwrap();
        // IST is UTC+05:30, so the local day starts at 18:30 UTC the evening before.
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 4, 18, 30, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 5, 5, 18, 30, 0).unwrap());
    }

    #[test]
    fn upcoming_dates_skip_weekends_by_default() {
        let friday = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();

        let dates = upcoming_dates(friday, 7, false);
        assert_eq!(dates.len(), 5, "Sat and Sun fall out of a 7-day window");
        assert_eq!(dates[0], friday);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2025, 5, 12).unwrap());

        let with_weekends = upcoming_dates(friday, 7, true);
        assert_eq!(with_weekends.len(), 7);
    }

    #[test]
    fn validation_rejects_missing_fields_before_anything_else() {
        let missing_email = CreateBookingRequest {
            date: Some("2025-05-05".to_string()),
            slot_start: Some("2025-05-05T03:30:00+00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            missing_email.validate().unwrap_err(),
            BookingError::MissingRequiredField("email")
        );

        let missing_date = CreateBookingRequest {
            email: Some("client@example.com".to_string()),
            slot_start: Some("2025-05-05T03:30:00+00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            missing_date.validate().unwrap_err(),
            BookingError::MissingRequiredField("date")
        );

        let blank_email = CreateBookingRequest {
            email: Some("  ".to_string()),
            date: Some("2025-05-05".to_string()),
            slot_start: Some("2025-05-05T03:30:00+00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            blank_email.validate().unwrap_err(),
            BookingError::MissingRequiredField("email")
        );
    }

    #[test]
    fn validation_rejects_malformed_dates() {
        let bad_date = CreateBookingRequest {
            email: Some("client@example.com".to_string()),
            date: Some("05/05/2025".to_string()),
            slot_start: Some("2025-05-05T03:30:00+00:00".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_date.validate().unwrap_err(),
            BookingError::InvalidDateFormat(_)
        ));

        let bad_slot = CreateBookingRequest {
            email: Some("client@example.com".to_string()),
            date: Some("2025-05-05".to_string()),
            slot_start: Some("09:00 AM - 09:30 AM".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_slot.validate().unwrap_err(),
            BookingError::InvalidDateFormat(_)
        ));
    }

    #[test]
    fn validation_accepts_a_complete_request() {
        let request = CreateBookingRequest {
            email: Some("client@example.com".to_string()),
            date: Some("2025-05-05".to_string()),
            slot_start: Some("2025-05-05T03:30:00+00:00".to_string()),
            description: None,
            recurring: true,
        };
        let booking = request.validate().unwrap();
        assert_eq!(booking.email, "client@example.com");
        assert_eq!(booking.day, day());
        assert_eq!(booking.slot_start, local(day(), 9, 0));
        assert_eq!(booking.description, "");
        assert!(booking.recurring);
    }
}
