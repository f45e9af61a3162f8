use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::{BookingSummary, BookingsByDate, ServiceSchedule, YearMonth, is_available};

/// Upper bound on rows in a month grid.
pub const MAX_WEEKS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<CalendarDayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_past_date: bool,
    pub bookings: Vec<BookingSummary>,
    pub is_available: bool,
    pub is_selected: bool,
}

impl CalendarDayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_current_month: true,
            is_today: false,
            is_past_date: false,
            bookings: Vec::new(),
            is_available: false,
            is_selected: false,
        }
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_past(mut self, past: bool) -> Self {
        self.is_past_date = past;
        self
    }

    pub fn with_bookings(mut self, bookings: Vec<BookingSummary>) -> Self {
        self.bookings = bookings;
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    /// Only future (or current) days of the displayed month take clicks.
    pub fn is_selectable(&self) -> bool {
        self.is_current_month && !self.is_past_date
    }
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarDayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarDayCell> {
        self.cells().find(|cell| cell.date == date)
    }
}

/// The Sunday on or before the first of `month`.
pub fn grid_start(month: YearMonth) -> Option<NaiveDate> {
    let first = month.first_day()?;
    let offset = first.weekday().num_days_from_sunday() as u64;
    first.checked_sub_days(Days::new(offset))
}

/// Builds the Sunday-first grid for `month`.
///
/// Rows are filled one day at a time. After the fifth row the grid stops as
/// soon as the next day falls outside the month, so most months get five
/// rows and only those spilling into a sixth week get six.
pub fn build_month_grid(
    month: YearMonth,
    today: NaiveDate,
    bookings: &BookingsByDate,
    schedule: &ServiceSchedule,
    selected: Option<NaiveDate>,
) -> MonthGrid {
    let Some(mut current) = grid_start(month) else {
        return MonthGrid { month, weeks: Vec::new() };
    };

    let mut weeks = Vec::with_capacity(MAX_WEEKS);

    for row in 0..MAX_WEEKS {
        let mut days = Vec::with_capacity(7);

        for _ in 0..7 {
            let cell = CalendarDayCell::new(current)
                .with_current_month(month.contains(current))
                .with_today(current == today)
                .with_past(current < today)
                .with_bookings(bookings.for_date(current).to_vec())
                .with_available(is_available(current, schedule))
                .with_selected(selected == Some(current));
            days.push(cell);

            let Some(next) = current.succ_opt() else {
                weeks.push(Week { days });
                return MonthGrid { month, weeks };
            };
            current = next;
        }

        weeks.push(Week { days });

        if row >= 4 && !month.contains(current) {
            break;
        }
    }

    MonthGrid { month, weeks }
}
