pub mod availability;
pub mod booking;
pub mod month;
pub mod schedule;
pub mod slots;
pub mod time_of_day;

pub use availability::{entry_for_date, is_available};
pub use booking::{BookingStatus, BookingSummary, BookingsByDate};
pub use month::YearMonth;
pub use schedule::{ScheduleEntry, ServiceSchedule, parse_weekday_name, weekday_name};
pub use slots::{DaySlots, SLOT_MINUTES, TimeSlot, generate_slots};
pub use time_of_day::{TimeFormat, format_time};
