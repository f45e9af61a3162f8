pub mod booking_api;
pub mod booking_service;
pub mod session;

pub use booking_api::{ApiError, BookingApi, DateRange, DayAvailability, HttpBookingClient};
pub use booking_service::BookingService;
pub use session::{Session, SessionStore};
