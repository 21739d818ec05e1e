use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Issue the next draft/attachment id: milliseconds since the epoch,
/// bumped past the previously issued value so two calls in the same
/// millisecond still come out unique and strictly increasing.
pub fn next_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let ids: Vec<i64> = (0..1000).map(|_| next_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn ids_track_wall_clock_millis() {
        let before = Utc::now().timestamp_millis();
        let id = next_id();
        // Never behind the clock; at most nudged forward past earlier ids.
        assert!(id >= before);
    }
}
