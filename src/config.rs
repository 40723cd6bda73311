//! Timing configuration for the game's timed routines.

use crate::time::TimeDuration;

/// Attract loop: first symbol shown for this long.
pub const ATTRACT_ON_MS: u64 = 800;
/// Attract loop: dark gap between repetitions.
pub const ATTRACT_OFF_MS: u64 = 200;
/// How long an input's color is held before reverting to dark.
pub const FLASH_MS: u64 = 700;
/// Replay: each symbol is shown for this long.
pub const REPLAY_ON_MS: u64 = 800;
/// Replay: dark gap after each symbol.
pub const REPLAY_OFF_MS: u64 = 200;
/// Replay lead-in, in multiples of the replay on-time.
pub const REPLAY_LEAD_IN_FACTOR: u64 = 2;

/// Durations used by the attract, flash, and replay routines.
///
/// `Timings::default()` gives the standard game feel. Use [`Timings::builder`] to
/// override individual values; every duration must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings<D: TimeDuration> {
    attract_on: D,
    attract_off: D,
    flash: D,
    replay_on: D,
    replay_off: D,
    replay_lead_in: D,
}

impl<D: TimeDuration> Timings<D> {
    /// Creates a timings builder starting from the defaults.
    pub fn builder() -> TimingsBuilder<D> {
        TimingsBuilder::new()
    }

    /// Attract loop on-time.
    pub fn attract_on(&self) -> D {
        self.attract_on
    }

    /// Attract loop off-time.
    pub fn attract_off(&self) -> D {
        self.attract_off
    }

    /// Flash hold time.
    pub fn flash(&self) -> D {
        self.flash
    }

    /// Replay on-time per symbol.
    pub fn replay_on(&self) -> D {
        self.replay_on
    }

    /// Replay off-time per symbol.
    pub fn replay_off(&self) -> D {
        self.replay_off
    }

    /// Dark pause before the first replayed symbol.
    pub fn replay_lead_in(&self) -> D {
        self.replay_lead_in
    }
}

impl<D: TimeDuration> Default for Timings<D> {
    fn default() -> Self {
        Self {
            attract_on: D::from_millis(ATTRACT_ON_MS),
            attract_off: D::from_millis(ATTRACT_OFF_MS),
            flash: D::from_millis(FLASH_MS),
            replay_on: D::from_millis(REPLAY_ON_MS),
            replay_off: D::from_millis(REPLAY_OFF_MS),
            replay_lead_in: D::from_millis(REPLAY_ON_MS * REPLAY_LEAD_IN_FACTOR),
        }
    }
}

/// Builder for validated [`Timings`].
#[derive(Debug)]
pub struct TimingsBuilder<D: TimeDuration> {
    timings: Timings<D>,
    lead_in_set: bool,
}

impl<D: TimeDuration> TimingsBuilder<D> {
    /// Creates a builder holding the default timings.
    pub fn new() -> Self {
        Self {
            timings: Timings::default(),
            lead_in_set: false,
        }
    }

    /// Sets the attract loop on-time.
    pub fn attract_on(mut self, duration: D) -> Self {
        self.timings.attract_on = duration;
        self
    }

    /// Sets the attract loop off-time.
    pub fn attract_off(mut self, duration: D) -> Self {
        self.timings.attract_off = duration;
        self
    }

    /// Sets the flash hold time.
    pub fn flash(mut self, duration: D) -> Self {
        self.timings.flash = duration;
        self
    }

    /// Sets the replay on-time.
    ///
    /// Unless [`replay_lead_in`](Self::replay_lead_in) is set explicitly, the
    /// lead-in follows as twice this value.
    pub fn replay_on(mut self, duration: D) -> Self {
        self.timings.replay_on = duration;
        self
    }

    /// Sets the replay off-time.
    pub fn replay_off(mut self, duration: D) -> Self {
        self.timings.replay_off = duration;
        self
    }

    /// Sets the dark pause before the first replayed symbol.
    pub fn replay_lead_in(mut self, duration: D) -> Self {
        self.timings.replay_lead_in = duration;
        self.lead_in_set = true;
        self
    }

    /// Builds and validates the timings.
    ///
    /// # Errors
    /// * `ZeroDuration` - one of the durations is zero; carries its name
    pub fn build(mut self) -> Result<Timings<D>, TimingError> {
        if !self.lead_in_set {
            self.timings.replay_lead_in = D::from_millis(
                self.timings
                    .replay_on
                    .as_millis()
                    .saturating_mul(REPLAY_LEAD_IN_FACTOR),
            );
        }

        let t = &self.timings;
        let named = [
            ("attract_on", t.attract_on),
            ("attract_off", t.attract_off),
            ("flash", t.flash),
            ("replay_on", t.replay_on),
            ("replay_off", t.replay_off),
            ("replay_lead_in", t.replay_lead_in),
        ];
        for (name, duration) in named {
            if duration.as_millis() == 0 {
                return Err(TimingError::ZeroDuration(name));
            }
        }

        Ok(self.timings)
    }
}

impl<D: TimeDuration> Default for TimingsBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// The named duration is zero.
    ZeroDuration(&'static str),
}

impl core::fmt::Display for TimingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimingError::ZeroDuration(name) => {
                write!(f, "timing `{}` must be non-zero", name)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimingError {}
