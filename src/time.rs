//! Clock abstraction so the game runs on any timer.
//!
//! Embedded targets wrap their HAL timer, host builds wrap `std::time::Instant`,
//! and tests use a manually advanced fake clock.

/// A clock the game reads to drive its timed routines.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
///
/// Patterns only need millisecond resolution, so conversion both ways is all
/// that is required.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
