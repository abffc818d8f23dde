// File: crates/bookify_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailableDatesResponse, AvailableSlotsResponse, BookingResponse, CreateBookingRequest,
    DateOption, SlotView,
};
use bookify_common::http::ErrorResponse;

#[utoipa::path(
    get,
    path = "/available_dates",
    responses(
        (status = 200, description = "Dates the picker offers", body = AvailableDatesResponse,
         example = json!({
             "dates": [
                 {"value": "2025-05-05", "display": "Mon, May 05"},
                 {"value": "2025-05-06", "display": "Tue, May 06"}
             ]
         })
        ),
        (status = 500, description = "Server configuration error", body = ErrorResponse)
    )
)]
fn doc_available_dates_handler() {}

#[utoipa::path(
    get,
    path = "/available_slots/{date}",
    params(
        ("date" = String, Path, description = "Date in YYYY-MM-DD format", example = "2025-05-05", format = "date")
    ),
    responses(
        (status = 200, description = "Open slots for the date", body = AvailableSlotsResponse,
         example = json!({
             "slots": [
                 {
                     "start": "2025-05-05T03:30:00+00:00",
                     "end": "2025-05-05T04:00:00+00:00",
                     "label": "09:00 AM - 09:30 AM"
                 }
             ]
         })
        ),
        (status = 400, description = "Invalid date format", body = ErrorResponse,
         example = json!({"error": "Invalid date format"})
        ),
        (status = 502, description = "Calendar provider unavailable", body = ErrorResponse)
    )
)]
fn doc_available_slots_handler() {}

#[utoipa::path(
    post,
    path = "/create_booking",
    request_body(content = CreateBookingRequest, example = json!({
        "email": "client@example.com",
        "date": "2025-05-05",
        "slot_start": "2025-05-05T03:30:00+00:00",
        "description": "First consultation",
        "recurring": false
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse,
         example = json!({
             "success": true,
             "event_link": "https://www.google.com/calendar/event?eid=...",
             "email": "client@example.com",
             "date": "2025-05-05",
             "slot": "09:00 AM - 09:30 AM",
             "message": "Appointment booked successfully."
         })
        ),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse,
         example = json!({"error": "Missing required field: email"})
        ),
        (status = 409, description = "Slot no longer available", body = ErrorResponse,
         example = json!({"error": "Selected time slot is not available"})
        ),
        (status = 500, description = "Booking failed", body = ErrorResponse,
         example = json!({"error": "Booking failed: ..."})
        )
    )
)]
fn doc_create_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_available_dates_handler,
        doc_available_slots_handler,
        doc_create_booking_handler
    ),
    components(
        schemas(
            AvailableDatesResponse,
            DateOption,
            AvailableSlotsResponse,
            SlotView,
            CreateBookingRequest,
            BookingResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "gcal", description = "Calendar booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct GcalApiDoc;
