//! Indicator light driver with pattern timing.
//!
//! Provides [`IndicatorDriver`], which owns the indicator output and runs at most
//! one [`Pattern`] at a time, and the [`Indicator`] trait the presentation layer
//! implements.

use crate::colors::IndicatorColor;
use crate::pattern::Pattern;
use crate::time::{TimeInstant, TimeSource};

/// Trait for abstracting the indicator light.
///
/// Implement this for whatever renders the light: a PWM RGB LED, a material in a
/// 3D scene, a terminal cell. Use [`IndicatorColor::rgb`] or
/// [`IndicatorColor::emission`] to get numeric values. Handle any output errors
/// internally - this method cannot fail.
pub trait Indicator {
    /// Shows `color` on the indicator.
    fn set_color(&mut self, color: IndicatorColor);
}

/// The current state of an indicator driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// No pattern running. Indicator holds its last color.
    Idle,
    /// Pattern actively executing.
    Running,
    /// Finite pattern finished. Indicator shows its landing color.
    Complete,
}

/// When the caller needs to service again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// The indicator holds its color for this long. Service again after it elapses.
    Delay(D),

    /// Nothing is scheduled. No servicing is needed until the next input.
    Idle,
}

/// Runs timed patterns on a single indicator.
///
/// Playing a pattern replaces whatever was running; there is never more than one
/// routine writing to the indicator. Color writes are skipped when the color does
/// not change.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - Indicator implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of steps in patterns
pub struct IndicatorDriver<'t, I: TimeInstant, L: Indicator, T: TimeSource<I>, const N: usize> {
    indicator: L,
    time_source: &'t T,
    state: DriverState,
    pattern: Option<Pattern<I::Duration, N>>,
    start_time: Option<I>,
    current_color: IndicatorColor,
}

impl<'t, I: TimeInstant, L: Indicator, T: TimeSource<I>, const N: usize>
    IndicatorDriver<'t, I, L, T, N>
{
    /// Creates an idle driver with the indicator turned off.
    pub fn new(mut indicator: L, time_source: &'t T) -> Self {
        indicator.set_color(IndicatorColor::Off);

        Self {
            indicator,
            time_source,
            state: DriverState::Idle,
            pattern: None,
            start_time: None,
            current_color: IndicatorColor::Off,
        }
    }

    /// Starts `pattern` now, superseding whatever was running.
    pub fn play(&mut self, pattern: Pattern<I::Duration, N>) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();
        self.play_from(pattern, now)
    }

    /// Starts `pattern` as if it had begun at `start`.
    ///
    /// `start` may lie in the past; the pattern picks up at the matching position.
    pub fn play_from(
        &mut self,
        pattern: Pattern<I::Duration, N>,
        start: I,
    ) -> ServiceTiming<I::Duration> {
        self.pattern = Some(pattern);
        self.start_time = Some(start);
        self.state = DriverState::Running;
        self.service()
    }

    /// Starts `pattern` at the instant the previous finite pattern ended.
    ///
    /// Keeps back-to-back patterns gap-free even when the host services late.
    /// Falls back to now if there is no finished pattern to chain from.
    pub fn chain(&mut self, pattern: Pattern<I::Duration, N>) -> ServiceTiming<I::Duration> {
        let end = match (&self.pattern, self.start_time) {
            (Some(previous), Some(start)) => previous
                .duration()
                .and_then(|duration| start.checked_add(duration)),
            _ => None,
        };
        let start = end.unwrap_or_else(|| self.time_source.now());
        self.play_from(pattern, start)
    }

    /// Stops the running pattern without touching the indicator.
    ///
    /// Safe to call when nothing is running.
    pub fn cancel(&mut self) {
        self.pattern = None;
        self.start_time = None;
        self.state = DriverState::Idle;
    }

    /// Services the driver, updating the indicator if necessary.
    ///
    /// # Returns
    /// - `ServiceTiming::Delay(duration)` - current color holds for this long
    /// - `ServiceTiming::Idle` - pattern finished (state becomes `Complete`) or
    ///   nothing running
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        if self.state != DriverState::Running {
            return ServiceTiming::Idle;
        }

        let (Some(pattern), Some(start_time)) = (self.pattern.as_ref(), self.start_time) else {
            self.state = DriverState::Idle;
            return ServiceTiming::Idle;
        };

        let elapsed = self.time_source.now().duration_since(start_time);
        let (new_color, next_service) = pattern.evaluate(elapsed);

        // Update indicator only if color changed
        if new_color != self.current_color {
            self.indicator.set_color(new_color);
            self.current_color = new_color;
        }

        match next_service {
            Some(duration) => ServiceTiming::Delay(duration),
            None => {
                self.state = DriverState::Complete;
                ServiceTiming::Idle
            }
        }
    }

    /// Returns the current state of the driver.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns the color currently shown on the indicator.
    pub fn current_color(&self) -> IndicatorColor {
        self.current_color
    }

    /// Returns true if a pattern is currently running.
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Returns a reference to the indicator.
    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::symbol::Symbol;
    use crate::time::TimeDuration;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestDuration(u64);

    impl TimeDuration for TestDuration {
        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            TestDuration(millis)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        type Duration = TestDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            TestDuration(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            Some(TestInstant(self.0 + duration.0))
        }
    }

    struct MockIndicator {
        history: Vec<IndicatorColor, 32>,
    }

    impl MockIndicator {
        fn new() -> Self {
            Self {
                history: Vec::new(),
            }
        }
    }

    impl Indicator for MockIndicator {
        fn set_color(&mut self, color: IndicatorColor) {
            let _ = self.history.push(color);
        }
    }

    struct MockTimeSource {
        current_time: core::cell::Cell<TestInstant>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                current_time: core::cell::Cell::new(TestInstant(0)),
            }
        }

        fn advance(&self, millis: u64) {
            let current = self.current_time.get();
            self.current_time.set(TestInstant(current.0 + millis));
        }
    }

    impl TimeSource<TestInstant> for MockTimeSource {
        fn now(&self) -> TestInstant {
            self.current_time.get()
        }
    }

    type Driver<'t> = IndicatorDriver<'t, TestInstant, MockIndicator, MockTimeSource, 8>;

    fn flash(symbol: Symbol) -> Pattern<TestDuration, 8> {
        Pattern::flash(symbol, &Timings::default()).unwrap()
    }

    #[test]
    fn new_driver_turns_indicator_off() {
        let timer = MockTimeSource::new();
        let driver = Driver::new(MockIndicator::new(), &timer);

        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(driver.indicator().history.as_slice(), &[IndicatorColor::Off]);
    }

    #[test]
    fn play_shows_first_color_and_reports_delay() {
        let timer = MockTimeSource::new();
        let mut driver = Driver::new(MockIndicator::new(), &timer);

        let timing = driver.play(flash(Symbol::Red));

        assert_eq!(timing, ServiceTiming::Delay(TestDuration(700)));
        assert_eq!(driver.current_color(), IndicatorColor::Red);
        assert!(driver.is_running());
    }

    #[test]
    fn finite_pattern_completes_on_landing_color() {
        let timer = MockTimeSource::new();
        let mut driver = Driver::new(MockIndicator::new(), &timer);
        driver.play(flash(Symbol::Blue));

        timer.advance(700);
        assert_eq!(driver.service(), ServiceTiming::Idle);
        assert_eq!(driver.state(), DriverState::Complete);
        assert_eq!(driver.current_color(), IndicatorColor::Off);
    }

    #[test]
    fn cancel_is_safe_when_idle_and_leaves_color() {
        let timer = MockTimeSource::new();
        let mut driver = Driver::new(MockIndicator::new(), &timer);
        driver.cancel();
        assert_eq!(driver.state(), DriverState::Idle);

        driver.play(flash(Symbol::Green));
        driver.cancel();
        assert_eq!(driver.current_color(), IndicatorColor::Green);
        assert_eq!(driver.service(), ServiceTiming::Idle);
    }

    #[test]
    fn chain_starts_where_previous_pattern_ended() {
        let timer = MockTimeSource::new();
        let mut driver = Driver::new(MockIndicator::new(), &timer);
        driver.play(flash(Symbol::Red));

        // Serviced 300ms late: flash ended at 700, now is 1000
        timer.advance(1000);
        driver.service();
        let timing = driver.chain(flash(Symbol::Yellow));

        assert_eq!(timing, ServiceTiming::Delay(TestDuration(400)));
        assert_eq!(driver.current_color(), IndicatorColor::Yellow);
    }

    #[test]
    fn unchanged_color_is_not_rewritten() {
        let timer = MockTimeSource::new();
        let mut driver = Driver::new(MockIndicator::new(), &timer);

        driver.play(flash(Symbol::Red));
        driver.play(flash(Symbol::Red));
        timer.advance(100);
        driver.service();

        assert_eq!(
            driver.indicator().history.as_slice(),
            &[IndicatorColor::Off, IndicatorColor::Red]
        );
    }
}
