// --- File: crates/services/bookify_server/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Initialises the external services once at startup, per runtime flags,
//! and hands them out behind the common trait objects.
use bookify_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)] // which imports are used depends on the enabled features
use {
    bookify_common::is_feature_enabled,
    bookify_common::services::{
        BookedEvent, BoxFuture, BoxedError, CalendarEvent, CalendarEventResult, CalendarService,
        NotificationResult, NotificationService, ServiceFactory,
    },
    chrono::{DateTime, Utc},
    tracing::{error, info},
};

#[cfg(feature = "gcal")]
use bookify_gcal::{auth::create_calendar_hub, service::GoogleCalendarService};

#[cfg(feature = "mailer")]
use bookify_mail::{auth::create_gmail_hub, service::GmailMailer};

/// Wraps a concrete calendar service so callers only see `BoxedError`.
#[cfg(feature = "gcal")]
struct BoxedCalendarService {
    inner: GoogleCalendarService,
}

#[cfg(feature = "gcal")]
impl CalendarService for BoxedCalendarService {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .get_busy_times(&calendar_id, start_time, end_time)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let event = event.clone();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_event(&calendar_id, event)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
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
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .get_booked_events(&calendar_id, start_time, end_time, include_cancelled)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Wraps the Gmail mailer so callers only see `BoxedError`.
#[cfg(feature = "mailer")]
struct BoxedNotificationService {
    inner: GmailMailer,
}

#[cfg(feature = "mailer")]
impl NotificationService for BoxedNotificationService {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .send_email(&to, &subject, &body)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Service factory for the Bookify backend.
pub struct BookifyServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "gcal")]
    calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    #[cfg(feature = "mailer")]
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl BookifyServiceFactory {
    /// Create a new service factory.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "gcal")]
            calendar_service: None,
            #[cfg(feature = "mailer")]
            notification_service: None,
        };

        #[cfg(feature = "gcal")]
        {
            if is_feature_enabled(&config, config.use_gcal, config.gcal.as_ref()) {
                info!("Initializing Google Calendar service...");
                match create_calendar_hub(config.gcal.as_ref().unwrap()).await {
                    Ok(hub) => {
                        let service = GoogleCalendarService::new(Arc::new(hub));
                        factory.calendar_service =
                            Some(Arc::new(BoxedCalendarService { inner: service }));
                        info!("Google Calendar service initialized.");
                    }
                    Err(e) => {
                        error!(
                            "Failed to initialize Google Calendar service: {}. Calendar disabled.",
                            e
                        );
                    }
                }
            } else {
                info!("GCal feature compiled, but disabled via runtime config or missing gcal config section.");
            }
        }

        #[cfg(feature = "mailer")]
        {
            if is_feature_enabled(&config, config.use_mailer, config.gmail.as_ref()) {
                info!("Initializing Gmail notification service...");
                let gmail_config = config.gmail.as_ref().unwrap();
                match create_gmail_hub(gmail_config).await {
                    Ok(hub) => {
                        let mailer =
                            GmailMailer::new(Arc::new(hub), gmail_config.sender.clone());
                        factory.notification_service =
                            Some(Arc::new(BoxedNotificationService { inner: mailer }));
                        info!("Gmail notification service initialized.");
                    }
                    Err(e) => {
                        error!(
                            "Failed to initialize Gmail service: {}. Confirmation mail disabled.",
                            e
                        );
                    }
                }
            } else {
                info!("Mailer feature compiled, but disabled via runtime config or missing gmail config section.");
            }
        }

        factory
    }
}

impl ServiceFactory for BookifyServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        #[cfg(feature = "gcal")]
        {
            if let Some(service) = self.calendar_service.clone() {
                return Some(service);
            }
        }

        None
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        #[cfg(feature = "mailer")]
        {
            if let Some(service) = self.notification_service.clone() {
                return Some(service);
            }
        }

        None
    }
}
