use std::collections::BTreeSet;

use crate::model::{Booking, Catalog, Equipment, Resource};
use crate::time::DateKey;

// ── Equipment availability ────────────────────────────────────────

/// Units of `equipment` still unbooked on `date`: total configured quantity
/// minus the number of active bookings on that date whose equipment set
/// includes the item.
///
/// Counting is presence-based: a booking consumes exactly one unit per
/// listed item, never more. Items unknown to the inventory (built-ins) have
/// zero shared units. Never negative, never above the configured total.
pub fn available_units(
    catalog: &Catalog,
    equipment: Equipment,
    date: DateKey,
    existing: &[Booking],
) -> u16 {
    let total = match catalog.quantity(equipment) {
        Some(q) => q,
        None => return 0,
    };
    let booked = existing
        .iter()
        .filter(|b| b.date == date && b.is_active() && b.equipment.contains(&equipment))
        .count();
    total.saturating_sub(booked.min(u16::MAX as usize) as u16)
}

/// Equipment permanently attached to `resource`. Always implicitly included
/// in a booking for that room; never drawn from shared stock.
pub fn built_in_equipment(catalog: &Catalog, resource: Resource) -> &BTreeSet<Equipment> {
    catalog.built_in(resource)
}

/// The catalog visible when booking `resource`: full shared inventory minus
/// the room's built-ins minus its manual exclusions.
pub fn available_equipment_for_resource(catalog: &Catalog, resource: Resource) -> Vec<Equipment> {
    let built_in = catalog.built_in(resource);
    let excluded = catalog.excluded(resource);
    catalog
        .inventory()
        .map(|(e, _)| e)
        .filter(|e| !built_in.contains(e) && !excluded.contains(e))
        .collect()
}

/// Requested items with no units left on `date`, skipping anything built in
/// to the room. Empty means the request is satisfiable.
pub fn exhausted_items(
    catalog: &Catalog,
    resource: Resource,
    requested: &BTreeSet<Equipment>,
    date: DateKey,
    existing: &[Booking],
) -> Vec<Equipment> {
    let built_in = catalog.built_in(resource);
    requested
        .iter()
        .filter(|e| !built_in.contains(e))
        .filter(|e| available_units(catalog, **e, date, existing) == 0)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Booking, BookingDraft, Division, TimeRange};
    use ulid::Ulid;

    fn date() -> DateKey {
        "2025-06-01".parse().unwrap()
    }

    fn booking_with(equipment: &[Equipment], date: DateKey) -> Booking {
        let draft = BookingDraft {
            resource: Resource::Sinergi,
            date,
            range: TimeRange::new(540, 600),
            equipment: equipment.iter().copied().collect(),
            participant_count: 5,
            borrower_name: "Tri Mugi Lestari".into(),
            division: Division::Fpljk1,
            activity: "Rapat".into(),
            layout: None,
            notes: None,
        };
        Booking::pending(draft, Ulid::new(), "uid".into(), 0)
    }

    #[test]
    fn full_stock_when_unbooked() {
        let catalog = Catalog::standard();
        assert_eq!(available_units(&catalog, Equipment::LcdProjector, date(), &[]), 3);
    }

    #[test]
    fn each_booking_consumes_one_unit() {
        let catalog = Catalog::standard();
        let bookings = vec![
            booking_with(&[Equipment::LcdProjector], date()),
            booking_with(&[Equipment::LcdProjector, Equipment::Pointer], date()),
        ];
        assert_eq!(available_units(&catalog, Equipment::LcdProjector, date(), &bookings), 1);
        assert_eq!(available_units(&catalog, Equipment::Pointer, date(), &bookings), 2);
    }

    #[test]
    fn other_dates_do_not_count() {
        let catalog = Catalog::standard();
        let other: DateKey = "2025-06-02".parse().unwrap();
        let bookings = vec![booking_with(&[Equipment::Recording], other)];
        assert_eq!(available_units(&catalog, Equipment::Recording, date(), &bookings), 2);
    }

    #[test]
    fn rejected_bookings_release_units() {
        let catalog = Catalog::standard();
        let mut b = booking_with(&[Equipment::ZoomMobile], date());
        b.status = crate::model::BookingStatus::Rejected;
        assert_eq!(available_units(&catalog, Equipment::ZoomMobile, date(), &[b]), 1);
    }

    #[test]
    fn never_negative_when_overbooked() {
        let catalog = Catalog::standard();
        let bookings: Vec<_> = (0..5)
            .map(|_| booking_with(&[Equipment::ZoomDedicated], date()))
            .collect();
        assert_eq!(available_units(&catalog, Equipment::ZoomDedicated, date(), &bookings), 0);
    }

    #[test]
    fn unknown_to_inventory_is_zero() {
        let catalog = Catalog::standard();
        assert_eq!(available_units(&catalog, Equipment::VideoWall, date(), &[]), 0);
    }

    #[test]
    fn room_catalog_excludes_built_ins_and_exclusions() {
        let catalog = Catalog::standard();
        let aula = available_equipment_for_resource(&catalog, Resource::AulaInpresiv);
        assert!(!aula.contains(&Equipment::VideoWall));
        assert!(!aula.contains(&Equipment::LcdProjector));
        assert!(aula.contains(&Equipment::PortableSpeaker));

        let plain = available_equipment_for_resource(&catalog, Resource::Sinergi);
        assert_eq!(plain.len(), 9);
        assert!(plain.contains(&Equipment::LcdProjector));
    }

    #[test]
    fn built_in_lookup() {
        let catalog = Catalog::standard();
        assert!(built_in_equipment(&catalog, Resource::Inklusif).contains(&Equipment::CiscoMonitor));
        assert!(built_in_equipment(&catalog, Resource::Visioner).is_empty());
    }

    #[test]
    fn exhausted_skips_built_ins() {
        let catalog = Catalog::standard();
        // VideoWall has no shared stock but is built in to the Aula:
        // requesting it there is a no-op, not an exhaustion.
        let requested = std::collections::BTreeSet::from([Equipment::VideoWall]);
        let out = exhausted_items(&catalog, Resource::AulaInpresiv, &requested, date(), &[]);
        assert!(out.is_empty());

        // Elsewhere it is not built in and has no stock.
        let out = exhausted_items(&catalog, Resource::Sinergi, &requested, date(), &[]);
        assert_eq!(out, vec![Equipment::VideoWall]);
    }

    #[test]
    fn exhausted_names_every_missing_item() {
        let catalog = Catalog::standard();
        let bookings = vec![
            booking_with(&[Equipment::ZoomDedicated, Equipment::ZoomMobile], date()),
        ];
        let requested = std::collections::BTreeSet::from([
            Equipment::ZoomDedicated,
            Equipment::ZoomMobile,
            Equipment::Pointer,
        ]);
        let out = exhausted_items(&catalog, Resource::Sinergi, &requested, date(), &bookings);
        assert_eq!(out, vec![Equipment::ZoomDedicated, Equipment::ZoomMobile]);
    }
}
