mod admission;
mod conflict;
mod inventory;
mod mutations;
mod queries;

pub use admission::admit;
pub use conflict::{find_conflict, has_conflict, overlaps_buffered};
pub use inventory::{
    available_equipment_for_resource, available_units, built_in_equipment, exhausted_items,
};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::model::{Catalog, Resource};
use crate::notify::NotifyHub;
use crate::store::BookingStore;
use crate::time::{Minute, BUFFER_MINUTES};
use crate::token::ApproveTokens;

/// Result of following an approval link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveOutcome {
    Approved,
    /// The booking was already approved; following the link again does nothing.
    AlreadyApproved,
}

/// The booking service: admission, moderation, cancellation, and
/// availability queries over an external [`BookingStore`].
///
/// The admission algorithm itself is pure (see [`admit`]); the engine's job
/// is to run it against a consistent snapshot and commit the result.
pub struct Engine {
    store: Arc<dyn BookingStore>,
    catalog: Catalog,
    notify: Arc<NotifyHub>,
    tokens: ApproveTokens,
    buffer_minutes: Minute,
    /// One admission at a time per resource, held across the
    /// fetch-validate-insert sequence: two callers must never both pass the
    /// conflict check against the same stale snapshot.
    admission_locks: DashMap<Resource, Arc<Mutex<()>>>,
}

impl Engine {
    pub fn new(store: Arc<dyn BookingStore>, catalog: Catalog, notify: Arc<NotifyHub>) -> Self {
        Self {
            store,
            catalog,
            notify,
            tokens: ApproveTokens::from_env(),
            buffer_minutes: BUFFER_MINUTES,
            admission_locks: DashMap::new(),
        }
    }

    pub fn with_tokens(mut self, tokens: ApproveTokens) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_buffer(mut self, minutes: Minute) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn buffer_minutes(&self) -> Minute {
        self.buffer_minutes
    }

    pub fn notify(&self) -> &NotifyHub {
        &self.notify
    }

    pub fn tokens(&self) -> &ApproveTokens {
        &self.tokens
    }

    fn admission_lock(&self, resource: Resource) -> Arc<Mutex<()>> {
        self.admission_locks
            .entry(resource)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
