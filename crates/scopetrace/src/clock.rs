//! Monotonic microsecond clock.

use std::sync::OnceLock;
use std::time::Instant;

/// Process-local epoch, fixed on the first call to [`now`].
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Current time in microseconds since an arbitrary monotonic epoch.
#[inline]
#[must_use]
pub fn now() -> u64 {
    let epoch = *EPOCH.get_or_init(Instant::now);
    u64::try_from(epoch.elapsed().as_micros()).unwrap_or(u64::MAX)
}
