use chrono::{Duration, NaiveTime};

use crate::calendar::booking::BookingSummary;
use crate::calendar::schedule::ScheduleEntry;

/// Length of one bookable slot.
pub const SLOT_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub is_booked: bool,
}

/// The partition of one day into slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySlots {
    /// The schedule has no window on this day.
    NoAvailability,
    Slots(Vec<TimeSlot>),
}

impl DaySlots {
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            DaySlots::NoAvailability => &[],
            DaySlots::Slots(slots) => slots,
        }
    }

    pub fn free_count(&self) -> usize {
        self.slots().iter().filter(|slot| !slot.is_booked).count()
    }

    pub fn booked_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.is_booked).count()
    }
}

/// Start times of every whole slot that fits in `[start, end)`.
///
/// Windows that end before they start produce nothing; slots never wrap past
/// midnight.
pub fn slot_times(start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
    let step = Duration::minutes(SLOT_MINUTES);
    let mut times = Vec::new();
    let mut current = start;

    loop {
        let (slot_end, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 || slot_end > end {
            break;
        }
        times.push(current);
        current = slot_end;
    }

    times
}

/// Splits the day's window into slots and marks the ones an existing booking
/// already holds.
///
/// A booking holds a slot when its time equals the slot's start exactly. The
/// booking status is not consulted, so a cancelled booking still holds its
/// slot.
pub fn generate_slots(entry: Option<&ScheduleEntry>, bookings: &[BookingSummary]) -> DaySlots {
    let Some(entry) = entry else {
        return DaySlots::NoAvailability;
    };

    let slots = slot_times(entry.start, entry.end)
        .into_iter()
        .map(|time| TimeSlot {
            time,
            is_booked: bookings.iter().any(|booking| booking.time == time),
        })
        .collect();

    DaySlots::Slots(slots)
}
