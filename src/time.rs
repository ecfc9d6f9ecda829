use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Minutes since midnight — the only time-of-day type. Valid range 0..=1439.
pub type Minute = u16;

/// Mandatory idle minutes before and after every active booking.
pub const BUFFER_MINUTES: Minute = 15;
/// First bookable slot boundary of the day (06:00).
pub const OFFICE_START: Minute = 6 * 60;
/// Last bookable slot boundary of the day (22:00).
pub const OFFICE_END: Minute = 22 * 60;
/// Slot boundary step in minutes.
pub const SLOT_INTERVAL: Minute = 30;

/// Parse an `"HH:MM"` value into minutes since midnight.
pub fn time_to_minutes(time: &str) -> Result<Minute, EngineError> {
    let bad = || EngineError::InvalidTimeFormat(time.to_string());
    let (h, m) = time.split_once(':').ok_or_else(bad)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(bad());
    }
    let hours: Minute = h.parse().map_err(|_| bad())?;
    let minutes: Minute = m.parse().map_err(|_| bad())?;
    if hours > 23 || minutes > 59 {
        return Err(bad());
    }
    Ok(hours * 60 + minutes)
}

/// Inverse of [`time_to_minutes`]: zero-padded `"HH:MM"`.
pub fn minutes_to_time(minutes: Minute) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Every slot boundary from `day_start` to `day_end` inclusive, step
/// `interval` minutes. Stateless; returns an empty vec when the window is
/// empty or the step is zero.
pub fn generate_time_slots(day_start: Minute, day_end: Minute, interval: Minute) -> Vec<Minute> {
    if interval == 0 || day_start > day_end {
        return Vec::new();
    }
    let mut slots = Vec::with_capacity(((day_end - day_start) / interval + 1) as usize);
    let mut t = day_start;
    while t <= day_end {
        slots.push(t);
        match t.checked_add(interval) {
            Some(next) => t = next,
            None => break,
        }
    }
    slots
}

/// Slot boundaries for the standard office day (06:00..=22:00, 30 min step).
pub fn office_slots() -> Vec<Minute> {
    generate_time_slots(OFFICE_START, OFFICE_END, SLOT_INTERVAL)
}

/// Calendar-day identity key. No time-of-day, no timezone: two bookings are
/// on "the same day" iff their keys are equal. Displays as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateKey {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, EngineError> {
        if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
            return Err(EngineError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            if leap {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EngineError::InvalidDate(s.to_string());
        let mut parts = s.split('-');
        let (y, m, d) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d), None) => (y, m, d),
            _ => return Err(bad()),
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let year: u16 = y.parse().map_err(|_| bad())?;
        let month: u8 = m.parse().map_err(|_| bad())?;
        let day: u8 = d.parse().map_err(|_| bad())?;
        DateKey::new(year, month, day).map_err(|_| bad())
    }
}

// Stored as the plain "YYYY-MM-DD" string the document store keys on.
impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: EngineError| D::Error::custom(e.to_string()))
    }
}
