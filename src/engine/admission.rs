use crate::error::EngineError;
use crate::model::{Booking, BookingDraft, Catalog};
use crate::time::Minute;

use super::conflict::find_conflict;
use super::inventory::exhausted_items;

/// Decide whether a candidate booking may be admitted, in order:
/// time ordering, then room conflict, then equipment stock.
///
/// `existing` is the active (pending/approved) set for the candidate's date
/// across all resources: the conflict check narrows to the candidate's room
/// itself, while equipment counting spans every room. Pure — persistence and
/// notification happen elsewhere, after acceptance.
pub fn admit(
    catalog: &Catalog,
    draft: &BookingDraft,
    existing: &[Booking],
    buffer: Minute,
) -> Result<(), EngineError> {
    if draft.range.start >= draft.range.end {
        return Err(EngineError::InvalidTimeRange {
            start: draft.range.start,
            end: draft.range.end,
        });
    }

    if let Some(hit) = find_conflict(draft.resource, draft.date, &draft.range, existing, buffer) {
        return Err(EngineError::ResourceConflict {
            resource: draft.resource,
            date: draft.date,
            with: hit.id,
        });
    }

    let items = exhausted_items(catalog, draft.resource, &draft.equipment, draft.date, existing);
    if !items.is_empty() {
        return Err(EngineError::EquipmentUnavailable {
            date: draft.date,
            items,
        });
    }

    Ok(())
}
