use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use crate::model::{Booking, BookingStatus, Resource};
use crate::time::DateKey;

/// Opaque failure from the external document store (network, permission).
/// The core never inspects these; callers just surface them.
#[derive(Debug, Clone)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for crate::error::EngineError {
    fn from(e: StoreError) -> Self {
        crate::error::EngineError::Store(e.0)
    }
}

/// The booking collection of the remote document database, reduced to the
/// operations the engine needs: active-set reads plus simple
/// insert/update-status/delete.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All active (pending/approved) bookings on `date`, every resource.
    /// This is the candidate set for both conflict and stock checks.
    async fn active_on(&self, date: DateKey) -> Result<Vec<Booking>, StoreError>;

    /// Active bookings for one resource, optionally date-filtered.
    async fn active_for(
        &self,
        resource: Resource,
        date: Option<DateKey>,
    ) -> Result<Vec<Booking>, StoreError>;

    async fn get(&self, id: Ulid) -> Result<Option<Booking>, StoreError>;

    /// Insert a new record. The engine only ever inserts pending bookings.
    async fn insert(&self, booking: Booking) -> Result<(), StoreError>;

    /// Update the status field in place. Returns false when the id is gone.
    async fn set_status(&self, id: Ulid, status: BookingStatus) -> Result<bool, StoreError>;

    /// Delete the record entirely (cancellation has no soft-delete).
    async fn remove(&self, id: Ulid) -> Result<bool, StoreError>;
}

/// In-process store over a `DashMap`. Backs the tests and embedders that
/// don't talk to a remote document database.
#[derive(Default)]
pub struct InMemoryStore {
    bookings: DashMap<Ulid, Booking>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn active_on(&self, date: DateKey) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .bookings
            .iter()
            .filter(|e| e.value().date == date && e.value().is_active())
            .map(|e| e.value().clone())
            .collect())
    }

    async fn active_for(
        &self,
        resource: Resource,
        date: Option<DateKey>,
    ) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.resource == resource
                    && b.is_active()
                    && date.map_or(true, |d| b.date == d)
            })
            .map(|e| e.value().clone())
            .collect())
    }

    async fn get(&self, id: Ulid) -> Result<Option<Booking>, StoreError> {
        Ok(self.bookings.get(&id).map(|e| e.value().clone()))
    }

    async fn insert(&self, booking: Booking) -> Result<(), StoreError> {
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn set_status(&self, id: Ulid, status: BookingStatus) -> Result<bool, StoreError> {
        match self.bookings.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Ulid) -> Result<bool, StoreError> {
        Ok(self.bookings.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{BookingDraft, Division, TimeRange};

    fn sample(resource: Resource, date: &str) -> Booking {
        let draft = BookingDraft {
            resource,
            date: date.parse().unwrap(),
            range: TimeRange::new(540, 600),
            equipment: BTreeSet::new(),
            participant_count: 4,
            borrower_name: "Arif Budiyanto".into(),
            division: Division::Fpljk2,
            activity: "Diskusi".into(),
            layout: None,
            notes: None,
        };
        Booking::pending(draft, Ulid::new(), "uid".into(), 0)
    }

    #[tokio::test]
    async fn insert_get_remove() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        let b = sample(Resource::Sinergi, "2025-06-01");
        let id = b.id;
        store.insert(b.clone()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).await.unwrap(), Some(b));
        assert!(store.remove(id).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
        assert!(!store.remove(id).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn active_reads_skip_rejected() {
        let store = InMemoryStore::new();
        let mut rejected = sample(Resource::Sinergi, "2025-06-01");
        rejected.status = BookingStatus::Rejected;
        store.insert(rejected).await.unwrap();
        store.insert(sample(Resource::Sinergi, "2025-06-01")).await.unwrap();
        store.insert(sample(Resource::Visioner, "2025-06-01")).await.unwrap();
        store.insert(sample(Resource::Sinergi, "2025-06-02")).await.unwrap();

        let date: DateKey = "2025-06-01".parse().unwrap();
        assert_eq!(store.active_on(date).await.unwrap().len(), 2);
        assert_eq!(
            store.active_for(Resource::Sinergi, Some(date)).await.unwrap().len(),
            1
        );
        assert_eq!(store.active_for(Resource::Sinergi, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn set_status_in_place() {
        let store = InMemoryStore::new();
        let b = sample(Resource::Inklusif, "2025-06-01");
        let id = b.id;
        store.insert(b).await.unwrap();
        assert!(store.set_status(id, BookingStatus::Approved).await.unwrap());
        assert_eq!(store.get(id).await.unwrap().unwrap().status, BookingStatus::Approved);
        assert!(!store.set_status(Ulid::new(), BookingStatus::Approved).await.unwrap());
    }
}
