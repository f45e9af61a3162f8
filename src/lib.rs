pub mod api;
pub mod app;
pub mod calendar;
pub mod input;
pub mod storage;
pub mod ui;

pub use app::{AppState, DayDetail, DayRequest, LoadStatus};
pub use calendar::{BookingStatus, BookingSummary, DaySlots, ScheduleEntry, ServiceSchedule, TimeSlot};
pub use ui::month_view::{CalendarDayCell, MonthGrid, build_month_grid};
