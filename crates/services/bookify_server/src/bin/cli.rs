// File: crates/services/bookify_server/src/bin/cli.rs
//! Terminal companion wrapping the same calendar calls as the HTTP API.

use bookify_common::services::ServiceFactory;
use bookify_config::load_config;
use bookify_gcal::ledger::{BookingLedger, DEFAULT_LEDGER_PATH};
use bookify_gcal::logic::{
    create_booking, generate_slots, upcoming_dates, BookingOptions, CreateBookingRequest,
    SlotGridConfig, DEFAULT_BOOKING_WINDOW_DAYS,
};
use bookify_server::service_factory::BookifyServiceFactory;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bookify-cli")]
#[command(about = "Inspect availability and book appointment slots from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dates the picker offers
    Dates,
    /// List the open slots of a date
    Slots {
        /// Date in YYYY-MM-DD format
        date: String,
    },
    /// Book a slot
    Book {
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: String,
        /// Slot start time in RFC3339, as printed by `slots`
        #[arg(long)]
        start: String,
        /// Attendee email address
        #[arg(long)]
        email: String,
        /// Free-text note stored with the booking
        #[arg(long)]
        description: Option<String>,
        /// Repeat the appointment weekly
        #[arg(long)]
        recurring: bool,
    },
    /// Show upcoming booked events
    Upcoming {
        /// Maximum number of events to show
        #[arg(long, default_value_t = 10)]
        max: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Arc::new(load_config()?);
    bookify_common::logging::init();

    let factory = BookifyServiceFactory::new(config.clone()).await;
    let service = factory
        .calendar_service()
        .ok_or("Calendar service is not configured (set use_gcal and the gcal section)")?;

    let gcal_config = config.gcal.as_ref().ok_or("Missing gcal config section")?;
    let grid = SlotGridConfig::from_config(gcal_config)?;
    let calendar_id = gcal_config.calendar_id.as_deref().unwrap_or("primary");

    match cli.command {
        Commands::Dates => {
            let today = Utc::now().with_timezone(&grid.time_zone).date_naive();
            let window = gcal_config
                .booking_window_days
                .unwrap_or(DEFAULT_BOOKING_WINDOW_DAYS);
            let include_weekends = gcal_config.include_weekends.unwrap_or(false);
            for day in upcoming_dates(today, window, include_weekends) {
                println!("{}  {}", day.format("%Y-%m-%d"), day.format("%a, %b %d"));
            }
        }
        Commands::Slots { date } => {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| "Invalid date format (expected YYYY-MM-DD)")?;
            let (day_start, day_end) = grid
                .day_bounds(day)
                .ok_or("Date cannot be resolved in the configured time zone")?;
            let busy = service
                .get_busy_times(calendar_id, day_start, day_end)
                .await?;
            let slots = generate_slots(day, &busy, &grid);
            if slots.is_empty() {
                println!("No slots available for {}.", day);
            }
            for slot in slots {
                println!("{}  {}", slot.start.to_rfc3339(), slot.label(grid.time_zone));
            }
        }
        Commands::Book {
            date,
            start,
            email,
            description,
            recurring,
        } => {
            let request = CreateBookingRequest {
                email: Some(email),
                date: Some(date),
                slot_start: Some(start),
                description,
                recurring,
            };
            let booking = request.validate()?;

            let ledger = BookingLedger::new(
                gcal_config
                    .ledger_path
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string()),
            );
            let options = BookingOptions::from_config(gcal_config);

            let confirmation = create_booking(
                service.as_ref(),
                calendar_id,
                &ledger,
                &grid,
                &options,
                booking,
            )
            .await?;

            println!(
                "Booked {} on {} for {}.",
                confirmation.slot.label(grid.time_zone),
                confirmation.slot.start.with_timezone(&grid.time_zone).date_naive(),
                confirmation.email
            );
            if let Some(link) = confirmation.event_link {
                println!("Event link: {}", link);
            }
        }
        Commands::Upcoming { max } => {
            let now = Utc::now();
            let events = service
                .get_booked_events(calendar_id, now, now + Duration::days(30), false)
                .await?;
            if events.is_empty() {
                println!("No upcoming events found.");
            }
            for event in events.into_iter().take(max) {
                println!("{}  {}  ({})", event.start_time, event.summary, event.status);
            }
        }
    }

    Ok(())
}
