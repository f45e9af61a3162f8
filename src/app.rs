use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::api::{ApiError, BookingApi, BookingService, DayAvailability};
use crate::calendar::{
    BookingsByDate, DaySlots, ServiceSchedule, TimeFormat, YearMonth, generate_slots,
};
use crate::ui::month_view::{MonthGrid, build_month_grid};
use crate::ui::theme::Theme;

/// What the slot panel shows for the selected day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayDetail {
    Idle,
    Loading(NaiveDate),
    Loaded { date: NaiveDate, slots: DaySlots },
    Failed { date: NaiveDate, message: String },
}

/// A day fetch the caller has to perform after a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRequest {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Ready,
    Loading,
    Error(String),
}

pub struct AppState {
    pub current_month: YearMonth,
    pub selected_date: Option<NaiveDate>,
    pub day_detail: DayDetail,
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub schedule: ServiceSchedule,
    schedule_loaded: bool,
    schedule_error: Option<String>,
    pub month_bookings: BookingsByDate,
    pub status: LoadStatus,
    pub show_help: bool,
    pub theme: Theme,
    pub time_format: TimeFormat,
}

impl AppState {
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            current_month: YearMonth::containing(today),
            selected_date: None,
            day_detail: DayDetail::Idle,
            cursor: today,
            today,
            schedule: ServiceSchedule::disabled(),
            schedule_loaded: false,
            schedule_error: None,
            month_bookings: BookingsByDate::new(),
            status: LoadStatus::Ready,
            show_help: false,
            theme: Theme::default(),
            time_format: TimeFormat::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn with_schedule(mut self, schedule: ServiceSchedule) -> Self {
        self.set_schedule(Ok(schedule));
        self
    }

    pub fn month_grid(&self) -> MonthGrid {
        build_month_grid(
            self.current_month,
            self.today,
            &self.month_bookings,
            &self.schedule,
            self.selected_date,
        )
    }

    pub fn go_to_previous_month(&mut self) {
        self.go_to_month(self.current_month.pred());
    }

    pub fn go_to_next_month(&mut self) {
        self.go_to_month(self.current_month.succ());
    }

    pub fn go_to_today(&mut self) {
        self.go_to_month(YearMonth::containing(self.today));
        self.cursor = self.today;
    }

    /// Any month change drops the selection and whatever was loaded for it.
    /// Bookings of the previous month are dropped too; the caller refetches.
    pub fn go_to_month(&mut self, month: YearMonth) {
        tracing::info!("Showing {}", month);
        self.current_month = month;
        self.selected_date = None;
        self.day_detail = DayDetail::Idle;
        self.month_bookings = BookingsByDate::new();

        if !month.contains(self.cursor)
            && let Some(first) = month.first_day()
        {
            self.cursor = first;
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.current_month.contains(date) && date >= self.today
    }

    /// Selects `date` when it is a present or future day of the displayed
    /// month. Anything else leaves the state untouched.
    pub fn select_day(&mut self, date: NaiveDate) -> Option<DayRequest> {
        if !self.is_selectable(date) {
            tracing::warn!("Ignoring selection of {}", date);
            return None;
        }

        self.selected_date = Some(date);
        self.day_detail = DayDetail::Loading(date);

        Some(DayRequest {
            date,
            weekday: date.weekday(),
        })
    }

    /// Applies a finished day fetch. Whatever finishes last is what shows.
    pub fn apply_day_result(&mut self, date: NaiveDate, result: Result<DayAvailability, ApiError>) {
        self.day_detail = match result {
            Ok(day) => DayDetail::Loaded {
                date,
                slots: generate_slots(day.schedule.as_ref(), &day.bookings),
            },
            Err(e) => {
                tracing::error!("Failed to load {}: {}", date, e);
                DayDetail::Failed {
                    date,
                    message: format!("Failed to load availability: {}", e),
                }
            }
        };
    }

    /// Selects `date` and loads its slots through `api`.
    pub async fn load_day<A: BookingApi + ?Sized>(
        &mut self,
        api: &A,
        service_id: &str,
        date: NaiveDate,
    ) -> bool {
        let Some(request) = self.select_day(date) else {
            return false;
        };

        let result = api
            .check_day_availability(service_id, request.weekday, request.date)
            .await;
        self.apply_day_result(request.date, result);
        true
    }

    /// True until a schedule fetch has succeeded.
    pub fn needs_schedule(&self) -> bool {
        !self.schedule_loaded
    }

    pub fn set_schedule(&mut self, result: Result<ServiceSchedule, ApiError>) {
        match result {
            Ok(schedule) => {
                self.schedule = schedule;
                self.schedule_loaded = true;
                self.schedule_error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load schedule: {}", e);
                let message = format!("Failed to load schedule: {}", e);
                self.status = LoadStatus::Error(message.clone());
                self.schedule_error = Some(message);
            }
        }
    }

    /// Loaded bookings do not clear a schedule error; every day would show
    /// as unavailable without saying why.
    pub fn set_month_bookings(&mut self, result: Result<BookingsByDate, ApiError>) {
        match result {
            Ok(bookings) => {
                self.month_bookings = bookings;
                self.status = match &self.schedule_error {
                    Some(message) => LoadStatus::Error(message.clone()),
                    None => LoadStatus::Ready,
                };
            }
            Err(e) => {
                tracing::error!("Failed to load bookings for {}: {}", self.current_month, e);
                self.month_bookings = BookingsByDate::new();
                self.status = LoadStatus::Error(format!("Failed to load bookings: {}", e));
            }
        }
    }

    /// Refetches the month's bookings, and the schedule too while it is
    /// still missing.
    pub async fn refresh(&mut self, service: &BookingService) {
        if self.needs_schedule() {
            let schedule = service.fetch_schedule().await;
            self.set_schedule(schedule);
        }
        let bookings = service.fetch_month_bookings(self.current_month).await;
        self.set_month_bookings(bookings);
    }

    pub fn move_cursor_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days as u64))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };

        let Some(moved) = moved else { return };
        self.cursor = moved;

        if !self.current_month.contains(moved) {
            self.go_to_month(YearMonth::containing(moved));
        }
    }

    pub fn select_cursor(&mut self) -> Option<DayRequest> {
        self.select_day(self.cursor)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
