//! Shared constants.

// ═══════════════════════════════════════════════════════════════════════
// Reference Numbers
// ═══════════════════════════════════════════════════════════════════════

/// Default number of random bytes in a reference number.
///
/// 12 bytes encode to 16 URL-safe base64 characters.
pub const DEFAULT_REFERENCE_BYTES: usize = 12;

/// Smallest accepted reference size.
pub const MIN_REFERENCE_BYTES: usize = 8;

/// Largest accepted reference size.
pub const MAX_REFERENCE_BYTES: usize = 32;

// ═══════════════════════════════════════════════════════════════════════
// Notifications
// ═══════════════════════════════════════════════════════════════════════

/// Display name used when the user directory cannot resolve a user.
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

// ═══════════════════════════════════════════════════════════════════════
// Metrics
// ═══════════════════════════════════════════════════════════════════════

/// Swap requests successfully created.
pub const METRIC_CREATED: &str = "swap_requests.created";

/// Create attempts refused because the offered item was already reserved.
pub const METRIC_CONFLICTS: &str = "swap_requests.conflicts";

/// Successful status transitions, labelled by `status`.
pub const METRIC_TRANSITIONS: &str = "swap_requests.transitions";

/// Reservations released to undo a failed create.
pub const METRIC_COMPENSATIONS: &str = "swap_requests.compensations";

/// Notifications that could not be delivered.
pub const METRIC_NOTIFICATION_FAILURES: &str = "swap_requests.notification_failures";
