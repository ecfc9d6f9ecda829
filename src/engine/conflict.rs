use crate::model::{Booking, BookingDraft, Ms, Resource, TimeRange};
use crate::time::{DateKey, Minute};

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

/// Overlap test for one candidate/existing pair after expanding the existing
/// interval by `buffer` minutes on both ends.
///
/// The buffer is applied to the existing side only: it guards time around
/// already-placed bookings, not around the new request. Computed in `i32`
/// because the buffered start of an early-morning booking goes below zero.
pub fn overlaps_buffered(candidate: &TimeRange, existing: &TimeRange, buffer: Minute) -> bool {
    let new_start = candidate.start as i32;
    let new_end = candidate.end as i32;
    let buffered_start = existing.start as i32 - buffer as i32;
    let buffered_end = existing.end as i32 + buffer as i32;

    (new_start >= buffered_start && new_start < buffered_end)
        || (new_end > buffered_start && new_end <= buffered_end)
        || (new_start <= buffered_start && new_end >= buffered_end)
}

/// First active booking on the candidate's resource and date that the
/// candidate collides with (buffer included), or `None`.
///
/// `existing` may be the full booking set: bookings on other resources,
/// other dates, or with rejected status never count.
pub fn find_conflict<'a>(
    resource: Resource,
    date: DateKey,
    candidate: &TimeRange,
    existing: &'a [Booking],
    buffer: Minute,
) -> Option<&'a Booking> {
    existing
        .iter()
        .filter(|b| b.resource == resource && b.date == date && b.is_active())
        .find(|b| overlaps_buffered(candidate, &b.range, buffer))
}

/// Whether a candidate draft collides with any existing active booking on
/// the same resource and date. Short-circuits on the first hit.
pub fn has_conflict(candidate: &BookingDraft, existing: &[Booking], buffer: Minute) -> bool {
    find_conflict(
        candidate.resource,
        candidate.date,
        &candidate.range,
        existing,
        buffer,
    )
    .is_some()
}
