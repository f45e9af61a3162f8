use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::api::session::Session;
use crate::calendar::{BookingSummary, BookingsByDate, ScheduleEntry, ServiceSchedule, weekday_name};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Schedule window and bookings the backend reports for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DayAvailability {
    #[serde(default)]
    pub schedule: Option<ScheduleEntry>,
    #[serde(default)]
    pub bookings: Vec<BookingSummary>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_service_schedule(&self, service_id: &str) -> Result<ServiceSchedule, ApiError>;

    async fn fetch_bookings_by_date(
        &self,
        provider_id: &str,
        date_range: DateRange,
    ) -> Result<BookingsByDate, ApiError>;

    async fn check_day_availability(
        &self,
        service_id: &str,
        weekday: Weekday,
        date: NaiveDate,
    ) -> Result<DayAvailability, ApiError>;
}

pub struct HttpBookingClient {
    base_url: String,
    session: Session,
    client: reqwest::Client,
}

impl HttpBookingClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        tracing::info!("{} response status: {}", what, status);

        if status == 401 || status == 403 {
            tracing::error!("Authentication failed when fetching {}", what);
            return Err(ApiError::AuthenticationFailed);
        }

        if status == 404 {
            tracing::error!("{} not found", what);
            return Err(ApiError::NotFound(what.to_string()));
        }

        if status == 429 {
            tracing::warn!("Rate limit exceeded");
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to fetch {}. Status: {}, Body: {}", what, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        let body = response.text().await?;
        tracing::debug!("{} payload: {}", what, body);
        serde_json::from_str(&body)
            .map_err(|e| ApiError::ParseError(format!("Invalid {} payload: {}", what, e)))
    }
}

#[async_trait]
impl BookingApi for HttpBookingClient {
    async fn fetch_service_schedule(&self, service_id: &str) -> Result<ServiceSchedule, ApiError> {
        let url = format!(
            "{}/services/{}/schedules",
            self.base_url,
            urlencoding::encode(service_id)
        );

        tracing::info!("Fetching schedule for service {}", service_id);

        let response = self.get(&url).send().await?;
        let schedule: ServiceSchedule = self.read_json(response, "service schedule").await?;

        tracing::info!(
            "Service {} has {} schedule entries (enabled: {})",
            service_id,
            schedule.entries.len(),
            schedule.enabled
        );
        Ok(schedule)
    }

    async fn fetch_bookings_by_date(
        &self,
        provider_id: &str,
        date_range: DateRange,
    ) -> Result<BookingsByDate, ApiError> {
        let url = format!(
            "{}/bookings/provider/{}/calendar",
            self.base_url,
            urlencoding::encode(provider_id)
        );
        let start = date_range.start.format("%Y-%m-%d").to_string();
        let end = date_range.end.format("%Y-%m-%d").to_string();

        tracing::info!("Fetching bookings from {} to {}", start, end);

        let response = self
            .get(&url)
            .query(&[("startDate", start.as_str()), ("endDate", end.as_str())])
            .send()
            .await?;
        let bookings: BookingsByDate = self.read_json(response, "provider bookings").await?;

        tracing::info!("Fetched {} bookings successfully", bookings.total());
        Ok(bookings)
    }

    async fn check_day_availability(
        &self,
        service_id: &str,
        weekday: Weekday,
        date: NaiveDate,
    ) -> Result<DayAvailability, ApiError> {
        let url = format!(
            "{}/services/{}/availability",
            self.base_url,
            urlencoding::encode(service_id)
        );
        let date_param = date.format("%Y-%m-%d").to_string();

        tracing::info!("Checking availability of service {} on {}", service_id, date_param);

        let response = self
            .get(&url)
            .query(&[("day", weekday_name(weekday)), ("date", date_param.as_str())])
            .send()
            .await?;

        self.read_json(response, "day availability").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::BookingStatus;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = HttpBookingClient::new("http://localhost:8080/api/", Session::anonymous());

        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    #[tokio::test]
    async fn fetches_service_schedule_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/svc-1/schedules"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"enabled": true, "schedules": [{"day": "Friday", "startTime": "09:00", "endTime": "11:00"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::with_token("secret"));
        let schedule = client.fetch_service_schedule("svc-1").await.unwrap();

        assert_eq!(
            schedule,
            ServiceSchedule::new(vec![ScheduleEntry::new(Weekday::Fri, time(9, 0), time(11, 0))])
        );
    }

    #[tokio::test]
    async fn fetches_bookings_for_date_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings/provider/prov-9/calendar"))
            .and(query_param("startDate", "2024-01-28"))
            .and(query_param("endDate", "2024-03-02"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"2024-02-14": [{"time": "14:00", "status": "pending"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let bookings = client
            .fetch_bookings_by_date("prov-9", DateRange::new(date(2024, 1, 28), date(2024, 3, 2)))
            .await
            .unwrap();

        assert_eq!(
            bookings.for_date(date(2024, 2, 14)),
            &[BookingSummary::new(time(14, 0), BookingStatus::Pending)]
        );
    }

    #[tokio::test]
    async fn checks_day_availability_with_weekday_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/svc-1/availability"))
            .and(query_param("day", "Thursday"))
            .and(query_param("date", "2024-02-29"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "schedule": {"day": "Thursday", "startTime": "09:00", "endTime": "10:00"},
                    "bookings": [{"time": "09:30", "status": "confirmed"}],
                    "availableSlots": ["09:00"]
                }"#,
            ))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let day = client
            .check_day_availability("svc-1", Weekday::Thu, date(2024, 2, 29))
            .await
            .unwrap();

        assert_eq!(day.schedule.unwrap().start, time(9, 0));
        assert_eq!(day.bookings.len(), 1);
    }

    #[tokio::test]
    async fn null_schedule_means_no_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/svc-1/availability"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"schedule": null, "bookings": []}"#))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let day = client
            .check_day_availability("svc-1", Weekday::Sun, date(2024, 3, 3))
            .await
            .unwrap();

        assert_eq!(day, DayAvailability::default());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let result = client.fetch_service_schedule("svc-1").await;

        assert!(matches!(result, Err(ApiError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn missing_service_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let result = client.fetch_service_schedule("nope").await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let result = client
            .check_day_availability("svc-1", Weekday::Mon, date(2024, 3, 4))
            .await;

        match result {
            Err(ApiError::RequestError(message)) => assert!(message.contains("boom")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpBookingClient::new(server.uri(), Session::anonymous());
        let result = client.fetch_service_schedule("svc-1").await;

        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
