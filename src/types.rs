//! Core types for indicator pattern construction.

use crate::colors::IndicatorColor;
use crate::time::TimeDuration;

/// How many times a pattern should repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Repeat a specific number of times.
    Finite(u32),

    /// Repeat until superseded.
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

/// A single held color in a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternStep<D: TimeDuration> {
    /// Color shown for the whole step.
    pub color: IndicatorColor,

    /// How long the color is held.
    pub duration: D,
}

impl<D: TimeDuration> PatternStep<D> {
    /// Creates a new pattern step.
    #[inline]
    pub fn new(color: IndicatorColor, duration: D) -> Self {
        Self { color, duration }
    }
}

/// Pattern validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// No steps provided.
    EmptyPattern,

    /// A step has zero duration.
    ZeroDuration,

    /// Pattern capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::EmptyPattern => {
                write!(f, "pattern must have at least one step")
            }
            PatternError::ZeroDuration => {
                write!(f, "pattern steps must have a non-zero duration")
            }
            PatternError::CapacityExceeded => {
                write!(f, "pattern capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}
