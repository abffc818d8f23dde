//! Wire-contract tests: the JSON shapes the HTTP surface promises.

use bookify_common::http::ErrorResponse;
use bookify_gcal::logic::{
    generate_slots, AvailableSlotsResponse, CreateBookingRequest, DateOption, SlotView,
};
use chrono_tz::Asia::Kolkata;
use serde_json::json;


#[test]
fn slots_response_has_the_fixed_shape() {
    let slots = generate_slots(fixtures::test_day(), &[], &fixtures::create_grid());
    let response = AvailableSlotsResponse {
        slots: slots
            .iter()
            .take(1)
            .map(|s| SlotView::from_slot(s, Kolkata))
            .collect(),
        message: None,
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({
            "slots": [{
                "start": "2025-05-05T03:30:00+00:00",
                "end": "2025-05-05T04:00:00+00:00",
                "label": "09:00 AM - 09:30 AM"
            }]
        }),
        "no message key when every slot is open"
    );
}

#[test]
fn empty_slots_response_carries_a_message() {
    let response = AvailableSlotsResponse {
        slots: vec![],
        message: Some("No slots available for this date.".to_string()),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({"slots": [], "message": "No slots available for this date."})
    );
}

#[test]
fn error_response_is_a_flat_error_key() {
    let response = ErrorResponse {
        error: "Invalid date format".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "Invalid date format"})
    );
}

#[test]
fn date_option_serializes_value_and_display() {
    let option = DateOption {
        value: "2025-05-05".to_string(),
        display: "Mon, May 05".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&option).unwrap(),
        json!({"value": "2025-05-05", "display": "Mon, May 05"})
    );
}

#[test]
fn booking_request_tolerates_missing_fields_at_deserialization() {
    // Field presence is a validation concern, not a parse error, so the
    // handler can answer with the missing-field message instead of a 422.
    let request: CreateBookingRequest = serde_json::from_value(json!({})).unwrap();
    assert!(request.email.is_none());
    assert!(request.date.is_none());
    assert!(!request.recurring);

    let request: CreateBookingRequest = serde_json::from_value(json!({
        "email": "client@example.com",
        "date": "2025-05-05",
        "slot_start": "2025-05-05T03:30:00+00:00",
        "recurring": true
    }))
    .unwrap();
    assert_eq!(request.email.as_deref(), Some("client@example.com"));
    assert!(request.recurring);
}

#[test]
fn slot_identifier_on_the_wire_is_the_rfc3339_start() {
    let slots = generate_slots(fixtures::test_day(), &[], &fixtures::create_grid());
    let view = SlotView::from_slot(&slots[0], Kolkata);
    assert_eq!(view.start, slots[0].start.to_rfc3339());
}
