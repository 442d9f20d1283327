//! # Exit Periods
//!
//! Time since an exit started is cut into fixed-length periods, numbered
//! from [`FIRST_PERIOD`]. Non-canonicity challenges are only admitted in the
//! first one.

/// Number of the period an exit starts in.
pub const FIRST_PERIOD: u64 = 1;

/// Period an exit started at `started_at` is in at time `now`.
///
/// A clock behind the start time counts as the first period. A zero period
/// length is treated as a window that is already over.
pub fn current_period(started_at: u64, now: u64, period_length_secs: u64) -> u64 {
    if period_length_secs == 0 {
        return u64::MAX;
    }
    let elapsed = now.saturating_sub(started_at);
    (elapsed / period_length_secs).saturating_add(FIRST_PERIOD)
}

/// Whether non-canonicity challenges are still admitted.
pub fn challenge_period_open(started_at: u64, now: u64, period_length_secs: u64) -> bool {
    current_period(started_at, now, period_length_secs) == FIRST_PERIOD
}
