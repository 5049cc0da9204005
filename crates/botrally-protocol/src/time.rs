//! Wall-clock timestamps for wire responses.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time as milliseconds since the Unix
/// epoch.
///
/// Read responses (`roomInfo`, `getProgrammingRecords`) carry a
/// `requestTime` field so polling clients can order snapshots. This is
/// wall-clock time, not a monotonic instant — it crosses the wire and
/// must mean the same thing to every client.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
