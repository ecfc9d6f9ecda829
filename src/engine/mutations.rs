use tracing::{info, warn};
use ulid::Ulid;

use crate::error::EngineError;
use crate::model::{Booking, BookingDraft, BookingStatus, User};
use crate::notify::BookingEvent;
use crate::observability;

use super::admission::admit;
use super::conflict::now_ms;
use super::{ApproveOutcome, Engine};

impl Engine {
    /// Run the admission check against a fresh snapshot and, on acceptance,
    /// persist the candidate as a pending booking.
    ///
    /// The per-resource lock is held across fetch-validate-insert so two
    /// concurrent requests for the same room cannot both admit against the
    /// same stale snapshot.
    pub async fn request(&self, draft: BookingDraft, user: &User) -> Result<Booking, EngineError> {
        metrics::counter!(observability::BOOKINGS_REQUESTED_TOTAL).increment(1);
        let lock = self.admission_lock(draft.resource);
        let _guard = lock.lock().await;

        let existing = self.store.active_on(draft.date).await?;
        if let Err(e) = admit(&self.catalog, &draft, &existing, self.buffer_minutes) {
            warn!(resource = %draft.resource, date = %draft.date, error = %e, "booking rejected");
            metrics::counter!(
                observability::BOOKINGS_REJECTED_TOTAL,
                "reason" => observability::reject_reason(&e)
            )
            .increment(1);
            return Err(e);
        }

        let booking = Booking::pending(draft, Ulid::new(), user.uid.clone(), now_ms());
        self.store.insert(booking.clone()).await?;
        info!(
            id = %booking.id,
            resource = %booking.resource,
            date = %booking.date,
            "booking admitted as pending"
        );
        metrics::counter!(observability::BOOKINGS_ACCEPTED_TOTAL).increment(1);
        self.notify
            .send(booking.resource, &BookingEvent::Requested(booking.clone()));
        Ok(booking)
    }

    /// Admin approval. Unconditional: no re-validation against current
    /// conflicts — approving two overlapping pendings is the admin's call.
    pub async fn approve(&self, id: Ulid, actor: &User) -> Result<(), EngineError> {
        self.moderate(id, actor, BookingStatus::Approved).await
    }

    /// Admin rejection. The record stays but stops constraining anything.
    pub async fn reject(&self, id: Ulid, actor: &User) -> Result<(), EngineError> {
        self.moderate(id, actor, BookingStatus::Rejected).await
    }

    async fn moderate(
        &self,
        id: Ulid,
        actor: &User,
        status: BookingStatus,
    ) -> Result<(), EngineError> {
        if !actor.is_admin() {
            return Err(EngineError::NotPermitted(
                "only administrators may approve or reject bookings",
            ));
        }
        let booking = self
            .store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        self.store.set_status(id, status).await?;

        let (event, action) = match status {
            BookingStatus::Approved => (
                BookingEvent::Approved { id, resource: booking.resource },
                "approve",
            ),
            _ => (
                BookingEvent::Rejected { id, resource: booking.resource },
                "reject",
            ),
        };
        info!(id = %id, resource = %booking.resource, action, "booking moderated");
        metrics::counter!(observability::MODERATIONS_TOTAL, "action" => action).increment(1);
        self.notify.send(booking.resource, &event);
        Ok(())
    }

    /// Approval via deep link: verifies the token instead of the caller's
    /// role. Re-following an already-used link is a no-op.
    pub async fn approve_with_token(
        &self,
        id: Ulid,
        token: &str,
    ) -> Result<ApproveOutcome, EngineError> {
        if !self.tokens.verify(id, token) {
            warn!(id = %id, "approval link with invalid token");
            metrics::counter!(observability::TOKEN_FAILURES_TOTAL).increment(1);
            return Err(EngineError::InvalidToken);
        }
        let booking = self
            .store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        if booking.status == BookingStatus::Approved {
            return Ok(ApproveOutcome::AlreadyApproved);
        }
        self.store.set_status(id, BookingStatus::Approved).await?;
        info!(id = %id, resource = %booking.resource, "booking approved via link");
        metrics::counter!(observability::MODERATIONS_TOTAL, "action" => "approve_link")
            .increment(1);
        self.notify.send(
            booking.resource,
            &BookingEvent::Approved { id, resource: booking.resource },
        );
        Ok(ApproveOutcome::Approved)
    }

    /// Remove a booking outright. Allowed for the original creator while the
    /// booking is still pending, or for an administrator at any time.
    pub async fn cancel(&self, id: Ulid, actor: &User) -> Result<(), EngineError> {
        let booking = self
            .store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;

        let creator_pending =
            booking.created_by == actor.uid && booking.status == BookingStatus::Pending;
        if !actor.is_admin() && !creator_pending {
            return Err(EngineError::NotPermitted(
                "only the creator of a pending booking or an administrator may cancel",
            ));
        }

        self.store.remove(id).await?;
        info!(id = %id, resource = %booking.resource, "booking cancelled");
        metrics::counter!(observability::CANCELLATIONS_TOTAL).increment(1);
        self.notify.send(
            booking.resource,
            &BookingEvent::Cancelled { id, resource: booking.resource },
        );
        Ok(())
    }
}
