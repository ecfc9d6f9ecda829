use ulid::Ulid;

use crate::model::{Equipment, Resource};
use crate::time::{DateKey, Minute};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Candidate start is not strictly before its end.
    InvalidTimeRange { start: Minute, end: Minute },
    /// Candidate overlaps an active booking (buffer included) on the same
    /// resource and date.
    ResourceConflict {
        resource: Resource,
        date: DateKey,
        with: Ulid,
    },
    /// One or more requested items have no units left on the date.
    EquipmentUnavailable {
        date: DateKey,
        items: Vec<Equipment>,
    },
    InvalidTimeFormat(String),
    InvalidDate(String),
    UnknownResource(String),
    UnknownEquipment(String),
    NotFound(Ulid),
    /// Caller lacks permission for the operation.
    NotPermitted(&'static str),
    InvalidToken,
    /// Opaque failure propagated from the external document store.
    Store(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidTimeRange { start, end } => {
                write!(f, "invalid time range: start {start} must be before end {end}")
            }
            EngineError::ResourceConflict { resource, date, with } => {
                write!(f, "{resource} is already booked on {date} (conflicts with {with})")
            }
            EngineError::EquipmentUnavailable { date, items } => {
                write!(f, "no units left on {date} for:")?;
                for item in items {
                    write!(f, " {item};")?;
                }
                Ok(())
            }
            EngineError::InvalidTimeFormat(s) => write!(f, "invalid time: {s:?} (expected HH:MM)"),
            EngineError::InvalidDate(s) => write!(f, "invalid date: {s:?} (expected YYYY-MM-DD)"),
            EngineError::UnknownResource(s) => write!(f, "unknown resource: {s:?}"),
            EngineError::UnknownEquipment(s) => write!(f, "unknown equipment: {s:?}"),
            EngineError::NotFound(id) => write!(f, "booking not found: {id}"),
            EngineError::NotPermitted(op) => write!(f, "not permitted: {op}"),
            EngineError::InvalidToken => write!(f, "invalid approval token"),
            EngineError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
