//! Small shared helpers.

use chrono::Utc;

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// Format: `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Clamps a signed index into `[0, len - 1]`.
///
/// `len` must be non-zero.
#[must_use]
pub fn clamp_index(index: i64, len: usize) -> usize {
    let last = i64::try_from(len.saturating_sub(1)).unwrap_or(i64::MAX);
    // Non-negative and at most `last`, so it fits back into usize.
    usize::try_from(index.clamp(0, last)).unwrap_or(0)
}
