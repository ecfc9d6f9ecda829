use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::{Booking, Resource};
use crate::time::minutes_to_time;

const CHANNEL_CAPACITY: usize = 256;

/// Booking lifecycle notifications, broadcast per resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    Requested(Booking),
    Approved { id: Ulid, resource: Resource },
    Rejected { id: Ulid, resource: Resource },
    Cancelled { id: Ulid, resource: Resource },
}

/// Broadcast hub: one channel per resource, created on first subscribe.
pub struct NotifyHub {
    channels: DashMap<Resource, broadcast::Sender<BookingEvent>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to notifications for a resource. Creates the channel if needed.
    pub fn subscribe(&self, resource: Resource) -> broadcast::Receiver<BookingEvent> {
        let sender = self
            .channels
            .entry(resource)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, resource: Resource, event: &BookingEvent) {
        if let Some(sender) = self.channels.get(&resource) {
            let _ = sender.send(event.clone());
        }
    }

    pub fn remove(&self, resource: Resource) {
        self.channels.remove(&resource);
    }
}

// ── Approval request rendering ──────────────────────────────────

/// Deep link an administrator can visit to approve without logging in.
pub fn approval_link(base_url: &str, booking_id: Ulid, token: &str) -> String {
    format!("{}/api/approve-booking?id={booking_id}&token={token}", base_url.trim_end_matches('/'))
}

/// Human-readable approval request, ready for the messaging side channel.
pub fn approval_message(booking: &Booking, link: &str) -> String {
    let mut msg = format!(
        "Permintaan booking baru\n\
         Peminjam: {} ({})\n\
         Ruangan/alat: {}\n\
         Tanggal: {}\n\
         Waktu: {} - {}\n\
         Kegiatan: {}\n\
         Jumlah peserta: {}\n",
        booking.borrower_name,
        booking.division,
        booking.resource,
        booking.date,
        minutes_to_time(booking.range.start),
        minutes_to_time(booking.range.end),
        booking.activity,
        booking.participant_count,
    );
    if !booking.equipment.is_empty() {
        let items: Vec<&str> = booking.equipment.iter().map(|e| e.as_str()).collect();
        msg.push_str(&format!("Alat: {}\n", items.join(", ")));
    }
    msg.push_str(&format!("Setujui: {link}"));
    msg
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{BookingDraft, Division, Equipment, TimeRange};

    fn sample() -> Booking {
        let draft = BookingDraft {
            resource: Resource::Integritas,
            date: "2025-06-01".parse().unwrap(),
            range: TimeRange::new(540, 630),
            equipment: BTreeSet::from([Equipment::LcdProjector, Equipment::Pointer]),
            participant_count: 12,
            borrower_name: "Nita Indrayani".into(),
            division: Division::FpepkLikd,
            activity: "Sosialisasi".into(),
            layout: None,
            notes: None,
        };
        Booking::pending(draft, Ulid::new(), "uid".into(), 0)
    }

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe(Resource::Integritas);

        let event = BookingEvent::Requested(sample());
        hub.send(Resource::Integritas, &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        hub.send(
            Resource::Visioner,
            &BookingEvent::Cancelled {
                id: Ulid::new(),
                resource: Resource::Visioner,
            },
        );
    }

    #[tokio::test]
    async fn channels_are_per_resource() {
        let hub = NotifyHub::new();
        let mut sinergi = hub.subscribe(Resource::Sinergi);
        let _visioner = hub.subscribe(Resource::Visioner);

        hub.send(
            Resource::Visioner,
            &BookingEvent::Approved {
                id: Ulid::new(),
                resource: Resource::Visioner,
            },
        );
        assert!(matches!(
            sinergi.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn link_shape() {
        let id = Ulid::new();
        let link = approval_link("https://booking.example", id, "abc123");
        assert_eq!(
            link,
            format!("https://booking.example/api/approve-booking?id={id}&token=abc123")
        );
        // Trailing slash does not double up
        let link = approval_link("https://booking.example/", id, "abc123");
        assert!(!link.contains("//api"));
    }

    #[test]
    fn message_carries_booking_details() {
        let booking = sample();
        let link = approval_link("https://booking.example", booking.id, "tok");
        let msg = approval_message(&booking, &link);
        assert!(msg.contains("Nita Indrayani"));
        assert!(msg.contains("R. Integritas"));
        assert!(msg.contains("2025-06-01"));
        assert!(msg.contains("09:00 - 10:30"));
        assert!(msg.contains("LCD Proyektor, Pointer"));
        assert!(msg.ends_with(&link));
    }
}
