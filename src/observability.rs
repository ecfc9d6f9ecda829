use std::net::SocketAddr;

use crate::error::EngineError;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: admission attempts.
pub const BOOKINGS_REQUESTED_TOTAL: &str = "ruang_bookings_requested_total";

/// Counter: admitted bookings (inserted as pending).
pub const BOOKINGS_ACCEPTED_TOTAL: &str = "ruang_bookings_accepted_total";

/// Counter: rejected admissions. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "ruang_bookings_rejected_total";

/// Counter: status transitions by an admin or via link. Labels: action.
pub const MODERATIONS_TOTAL: &str = "ruang_moderations_total";

/// Counter: cancelled (deleted) bookings.
pub const CANCELLATIONS_TOTAL: &str = "ruang_cancellations_total";

/// Counter: approval links presented with a bad token.
pub const TOKEN_FAILURES_TOTAL: &str = "ruang_token_failures_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection to a short label for metrics.
pub fn reject_reason(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidTimeRange { .. } => "invalid_time_range",
        EngineError::ResourceConflict { .. } => "resource_conflict",
        EngineError::EquipmentUnavailable { .. } => "equipment_unavailable",
        EngineError::InvalidTimeFormat(_) => "invalid_time_format",
        EngineError::InvalidDate(_) => "invalid_date",
        EngineError::UnknownResource(_) => "unknown_resource",
        EngineError::UnknownEquipment(_) => "unknown_equipment",
        EngineError::NotFound(_) => "not_found",
        EngineError::NotPermitted(_) => "not_permitted",
        EngineError::InvalidToken => "invalid_token",
        EngineError::Store(_) => "store",
    }
}
