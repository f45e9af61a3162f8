use std::time::Duration;

use crate::api::booking_api::{ApiError, BookingApi, DateRange, HttpBookingClient};
use crate::api::session::{Session, SessionStore};
use crate::calendar::{BookingsByDate, ServiceSchedule, YearMonth};
use crate::storage::config::Config;
use crate::ui::month_view::grid_start;

/// Binds a configured provider and service to a backend client.
pub struct BookingService {
    config: Config,
    api: Box<dyn BookingApi>,
}

impl BookingService {
    pub fn new(config: Config, session: Session) -> Result<Self, ApiError> {
        let mut client = HttpBookingClient::new(config.backend.base_url.clone(), session);
        if let Some(seconds) = config.backend.request_timeout_secs {
            client = client.with_timeout(Duration::from_secs(seconds))?;
        }
        Ok(Self::with_api(config, Box::new(client)))
    }

    /// Loads the session from the configured session file.
    pub fn from_config(config: Config) -> Result<Self, ApiError> {
        let session = SessionStore::new(config.backend.session_file.clone()).load_session();
        if !session.is_authenticated() {
            tracing::info!("No session token; backend requests are anonymous");
        }
        Self::new(config, session)
    }

    pub fn with_api(config: Config, api: Box<dyn BookingApi>) -> Self {
        Self { config, api }
    }

    pub fn api(&self) -> &dyn BookingApi {
        self.api.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service_id(&self) -> &str {
        &self.config.booking.service_id
    }

    pub async fn fetch_schedule(&self) -> Result<ServiceSchedule, ApiError> {
        self.api.fetch_service_schedule(self.service_id()).await
    }

    /// Bookings for every day the month grid shows, leading and trailing
    /// days of the neighbouring months included.
    pub async fn fetch_month_bookings(&self, month: YearMonth) -> Result<BookingsByDate, ApiError> {
        let range = visible_range(month)
            .ok_or_else(|| ApiError::ParseError(format!("Month out of range: {}", month)))?;
        self.api
            .fetch_bookings_by_date(&self.config.booking.provider_id, range)
            .await
    }
}

/// Six full weeks from the grid's first Sunday.
pub fn visible_range(month: YearMonth) -> Option<DateRange> {
    let start = grid_start(month)?;
    let end = start.checked_add_days(chrono::Days::new(41))?;
    Some(DateRange::new(start, end))
}
