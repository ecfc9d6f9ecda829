use crate::error::EngineError;
use crate::model::{Booking, Equipment, Resource, TimeRange};
use crate::notify::{approval_link, approval_message};
use crate::time::{office_slots, DateKey, Minute};

use super::conflict::find_conflict;
use super::inventory::{available_equipment_for_resource, available_units};
use super::Engine;

impl Engine {
    /// Active bookings for a resource, optionally restricted to one date.
    pub async fn bookings_for(
        &self,
        resource: Resource,
        date: Option<DateKey>,
    ) -> Result<Vec<Booking>, EngineError> {
        let mut bookings = self.store.active_for(resource, date).await?;
        bookings.sort_by_key(|b| (b.date, b.range.start));
        Ok(bookings)
    }

    /// Bookable slot pairs for a resource and date: adjacent office slot
    /// boundaries whose interval clears the conflict check (buffer included).
    pub async fn available_slots(
        &self,
        resource: Resource,
        date: DateKey,
    ) -> Result<Vec<(Minute, Minute)>, EngineError> {
        let existing = self.store.active_for(resource, Some(date)).await?;
        let slots = office_slots();
        Ok(slots
            .windows(2)
            .map(|w| (w[0], w[1]))
            .filter(|&(start, end)| {
                let candidate = TimeRange::new(start, end);
                find_conflict(resource, date, &candidate, &existing, self.buffer_minutes)
                    .is_none()
            })
            .collect())
    }

    /// Remaining units per shared inventory item on `date`.
    pub async fn equipment_availability(
        &self,
        date: DateKey,
    ) -> Result<Vec<(Equipment, u16)>, EngineError> {
        let existing = self.store.active_on(date).await?;
        Ok(self
            .catalog
            .inventory()
            .map(|(e, _)| (e, available_units(&self.catalog, e, date, &existing)))
            .collect())
    }

    /// Items a booking form for `resource` may offer.
    pub fn selectable_equipment(&self, resource: Resource) -> Vec<Equipment> {
        available_equipment_for_resource(&self.catalog, resource)
    }

    /// The approval-request message for a booking, deep link included.
    pub fn approval_request(&self, booking: &Booking, base_url: &str) -> String {
        let token = self.tokens.generate(booking.id);
        let link = approval_link(base_url, booking.id, &token);
        approval_message(booking, &link)
    }
}
