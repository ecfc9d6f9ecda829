//! Booking conflict and availability engine for shared office rooms and
//! equipment.
//!
//! The core is a set of pure functions: a buffered interval-overlap test
//! ([`engine::has_conflict`]), per-date equipment stock computation
//! ([`engine::available_units`]), and the composed admission decision
//! ([`engine::admit`]). [`engine::Engine`] wraps them with a
//! [`store::BookingStore`] snapshot, per-resource admission serialization,
//! and lifecycle notifications; storage itself, authentication, and message
//! delivery stay external.

pub mod engine;
pub mod error;
pub mod model;
pub mod notify;
pub mod observability;
pub mod store;
pub mod time;
pub mod token;

pub use engine::{admit, has_conflict, ApproveOutcome, Engine};
pub use error::EngineError;
pub use model::{Booking, BookingDraft, BookingStatus, Catalog, Equipment, Resource, TimeRange};
pub use store::{BookingStore, InMemoryStore};
pub use time::{DateKey, Minute, BUFFER_MINUTES};
pub use token::ApproveTokens;
