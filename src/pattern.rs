use crate::colors::IndicatorColor;
use crate::config::Timings;
use crate::symbol::Symbol;
use crate::time::TimeDuration;
use crate::types::{LoopCount, PatternError, PatternStep};
use heapless::Vec;

/// A timed pattern of held indicator colors.
///
/// Every timed routine in the game (attract loop, input flash, solution replay)
/// is one of these: a list of colors each held for a duration, repeated a finite
/// number of times or forever, with an optional landing color shown once a
/// finite pattern has run out.
///
/// Patterns are pure data. [`Pattern::evaluate`] answers "what color, and for how
/// much longer" for any elapsed time, which is what lets the game be driven by a
/// fake clock in tests.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `embassy_time::Duration`)
/// * `N` - Maximum number of steps this pattern can hold
#[derive(Debug, Clone)]
pub struct Pattern<D: TimeDuration, const N: usize> {
    steps: Vec<PatternStep<D>, N>,
    loop_count: LoopCount,
    landing_color: Option<IndicatorColor>,
}

impl<D: TimeDuration, const N: usize> Pattern<D, N> {
    /// Creates a new pattern builder.
    pub fn builder() -> PatternBuilder<D, N> {
        PatternBuilder::new()
    }

    /// Idle attract loop: `first` for the on-time, dark for the off-time, forever.
    pub fn attract(first: Symbol, timings: &Timings<D>) -> Result<Self, PatternError> {
        Self::builder()
            .step(first.color(), timings.attract_on())?
            .step(IndicatorColor::Off, timings.attract_off())?
            .loop_count(LoopCount::Infinite)
            .build()
    }

    /// Input acknowledgement: `symbol` for the flash time, then dark.
    pub fn flash(symbol: Symbol, timings: &Timings<D>) -> Result<Self, PatternError> {
        Self::builder()
            .step(symbol.color(), timings.flash())?
            .landing_color(IndicatorColor::Off)
            .build()
    }

    /// Solution replay: a dark lead-in, then each symbol of `prefix` followed by
    /// a dark gap. Ends dark.
    ///
    /// # Errors
    /// * `CapacityExceeded` - `prefix` needs more than `N` steps (`2 * len + 1`)
    pub fn replay(prefix: &[Symbol], timings: &Timings<D>) -> Result<Self, PatternError> {
        let mut builder = Self::builder().step(IndicatorColor::Off, timings.replay_lead_in())?;
        for symbol in prefix {
            builder = builder
                .step(symbol.color(), timings.replay_on())?
                .step(IndicatorColor::Off, timings.replay_off())?;
        }
        builder.landing_color(IndicatorColor::Off).build()
    }

    /// Calculates the color at a given elapsed time since the pattern started.
    ///
    /// # Returns
    /// * `(color, Some(remaining))` - color to show and how long it stays unchanged
    /// * `(color, None)` - finite pattern has finished; `color` is the landing color
    ///   (or the last step's color if none was set)
    pub fn evaluate(&self, elapsed: D) -> (IndicatorColor, Option<D>) {
        let loop_millis = self.loop_duration().as_millis();
        let elapsed_millis = elapsed.as_millis();

        if loop_millis == 0 {
            return (self.final_color(), None);
        }

        if let LoopCount::Finite(count) = self.loop_count {
            let total_millis = loop_millis.saturating_mul(u64::from(count));
            if elapsed_millis >= total_millis {
                return (self.final_color(), None);
            }
        }

        let mut time_in_loop = elapsed_millis % loop_millis;
        for step in &self.steps {
            let step_millis = step.duration.as_millis();
            if time_in_loop < step_millis {
                return (step.color, Some(D::from_millis(step_millis - time_in_loop)));
            }
            time_in_loop -= step_millis;
        }

        // time_in_loop < loop_millis, so a step always matches above
        (self.final_color(), None)
    }

    /// Total duration of a finite pattern, or `None` for an infinite one.
    pub fn duration(&self) -> Option<D> {
        match self.loop_count {
            LoopCount::Finite(count) => Some(D::from_millis(
                self.loop_duration().as_millis().saturating_mul(u64::from(count)),
            )),
            LoopCount::Infinite => None,
        }
    }

    /// Calculates the total duration of one pass through all steps.
    fn loop_duration(&self) -> D {
        let total_millis: u64 = self.steps.iter().map(|s| s.duration.as_millis()).sum();
        D::from_millis(total_millis)
    }

    fn final_color(&self) -> IndicatorColor {
        self.landing_color
            .or_else(|| self.steps.last().map(|s| s.color))
            .unwrap_or_default()
    }

    /// Returns the number of steps in this pattern.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// Builder for constructing validated patterns.
#[derive(Debug)]
pub struct PatternBuilder<D: TimeDuration, const N: usize> {
    steps: Vec<PatternStep<D>, N>,
    loop_count: LoopCount,
    landing_color: Option<IndicatorColor>,
}

impl<D: TimeDuration, const N: usize> PatternBuilder<D, N> {
    /// Creates a new empty pattern builder.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            loop_count: LoopCount::default(),
            landing_color: None,
        }
    }

    /// Adds a step to the pattern.
    ///
    /// # Errors
    /// * `CapacityExceeded` - the pattern already holds `N` steps
    pub fn step(mut self, color: IndicatorColor, duration: D) -> Result<Self, PatternError> {
        self.steps
            .push(PatternStep::new(color, duration))
            .map_err(|_| PatternError::CapacityExceeded)?;
        Ok(self)
    }

    /// Sets how many times the pattern should loop.
    ///
    /// Default is `LoopCount::Finite(1)`.
    pub fn loop_count(mut self, count: LoopCount) -> Self {
        self.loop_count = count;
        self
    }

    /// Sets the color to display after the pattern completes.
    ///
    /// Only relevant for finite loop counts.
    pub fn landing_color(mut self, color: IndicatorColor) -> Self {
        self.landing_color = Some(color);
        self
    }

    /// Builds and validates the pattern.
    ///
    /// # Errors
    /// * `EmptyPattern` - No steps were added
    /// * `ZeroDuration` - A step has zero duration
    pub fn build(self) -> Result<Pattern<D, N>, PatternError> {
        if self.steps.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        if self.steps.iter().any(|step| step.duration.as_millis() == 0) {
            return Err(PatternError::ZeroDuration);
        }

        Ok(Pattern {
            steps: self.steps,
            loop_count: self.loop_count,
            landing_color: self.landing_color,
        })
    }
}

impl<D: TimeDuration, const N: usize> Default for PatternBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[test]
    fn builder_rejects_empty_and_zero_duration() {
        assert_eq!(
            Pattern::<Ms, 4>::builder().build().unwrap_err(),
            PatternError::EmptyPattern
        );
        let zero = Pattern::<Ms, 4>::builder()
            .step(IndicatorColor::Red, Ms(0))
            .unwrap()
            .build();
        assert_eq!(zero.unwrap_err(), PatternError::ZeroDuration);
    }

    #[test]
    fn builder_reports_capacity_instead_of_panicking() {
        let result = Pattern::<Ms, 1>::builder()
            .step(IndicatorColor::Red, Ms(10))
            .unwrap()
            .step(IndicatorColor::Off, Ms(10));
        assert!(matches!(result, Err(PatternError::CapacityExceeded)));
    }

    #[test]
    fn attract_loops_forever() {
        let timings = Timings::<Ms>::default();
        let pattern = Pattern::<Ms, 4>::attract(Symbol::Green, &timings).unwrap();

        assert_eq!(pattern.duration(), None);
        assert_eq!(pattern.evaluate(Ms(0)), (IndicatorColor::Green, Some(Ms(800))));
        assert_eq!(pattern.evaluate(Ms(850)), (IndicatorColor::Off, Some(Ms(150))));
        assert_eq!(pattern.evaluate(Ms(10_000)), (IndicatorColor::Green, Some(Ms(800))));
    }

    #[test]
    fn flash_lands_dark() {
        let timings = Timings::<Ms>::default();
        let pattern = Pattern::<Ms, 4>::flash(Symbol::Yellow, &timings).unwrap();

        assert_eq!(pattern.evaluate(Ms(699)), (IndicatorColor::Yellow, Some(Ms(1))));
        assert_eq!(pattern.evaluate(Ms(700)), (IndicatorColor::Off, None));
        assert_eq!(pattern.duration(), Some(Ms(700)));
    }

    #[test]
    fn replay_has_lead_in_then_symbol_gap_pairs() {
        let timings = Timings::<Ms>::default();
        let pattern =
            Pattern::<Ms, 5>::replay(&[Symbol::Red, Symbol::Blue], &timings).unwrap();

        assert_eq!(pattern.step_count(), 5);
        assert_eq!(pattern.duration(), Some(Ms(1600 + 2 * 1000)));
        assert_eq!(pattern.evaluate(Ms(0)), (IndicatorColor::Off, Some(Ms(1600))));
        assert_eq!(pattern.evaluate(Ms(1600)), (IndicatorColor::Red, Some(Ms(800))));
        assert_eq!(pattern.evaluate(Ms(2400)), (IndicatorColor::Off, Some(Ms(200))));
        assert_eq!(pattern.evaluate(Ms(2600)), (IndicatorColor::Blue, Some(Ms(800))));
        assert_eq!(pattern.evaluate(Ms(3600)), (IndicatorColor::Off, None));
    }

    #[test]
    fn replay_longer_than_capacity_is_rejected() {
        let timings = Timings::<Ms>::default();
        let result = Pattern::<Ms, 4>::replay(&[Symbol::Red, Symbol::Blue], &timings);
        assert!(matches!(result, Err(PatternError::CapacityExceeded)));
    }
}
