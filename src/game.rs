//! The game phase engine.
//!
//! [`SimonGame`] owns the game state and the indicator driver. It has two entry
//! points: [`SimonGame::button_pressed`] when the player presses a button, and
//! [`SimonGame::service`] when the last returned delay has elapsed. Neither
//! blocks.
//!
//! Timed routines (attract loop, input flash, solution replay) are [`Pattern`]s
//! handed to the driver. Playing one supersedes the previous, and every input
//! also drops a replay that is still waiting for the flash to end, so at most
//! one routine ever writes the indicator.

use crate::colors::IndicatorColor;
use crate::command::GameAction;
use crate::config::Timings;
use crate::feedback::GameFeedback;
use crate::generator::{Sequence, SequenceGenerator};
use crate::indicator::{DriverState, Indicator, IndicatorDriver, ServiceTiming};
use crate::input::{InputBuffer, Verdict};
use crate::pattern::Pattern;
use crate::symbol::{Symbol, SymbolError};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::PatternError;
use crate::{PATTERN_CAPACITY, SEQUENCE_LENGTH};
use rand::RngCore;

/// Observable phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Idle before the first input, looping the first symbol.
    Attract,
    /// Showing the first `level` symbols.
    ReplayingSolution,
    /// Indicator dark, waiting for the next input.
    AwaitingInput,
    /// Acknowledging the most recent input.
    Flashing,
    /// The whole sequence has been reproduced. Input is ignored.
    Completed,
}

/// What a single input did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputOutcome {
    /// The game is already complete; nothing changed.
    Ignored,
    /// Correct so far, more symbols needed for this level.
    Accepted {
        /// Symbols entered in the current attempt.
        entered: usize,
        /// Symbols required for this level.
        level: usize,
    },
    /// The level's prefix was reproduced; a longer replay follows the flash.
    LevelUp {
        /// The new level.
        level: usize,
    },
    /// The last level was reproduced; the game is won.
    Completed,
    /// Wrong symbol; back to level 1 with a fresh sequence.
    Mismatch {
        /// The symbol that was expected.
        expected: Symbol,
        /// The symbol that was entered.
        entered: Symbol,
    },
}

/// Errors that can occur during game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// A raw button index outside the alphabet was delivered.
    ///
    /// This is a caller bug; the game state is left untouched.
    InvalidSymbol(u8),
    /// A timed routine could not be built.
    Pattern(PatternError),
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidSymbol(index) => {
                write!(f, "invalid button index {} (expected 0-3)", index)
            }
            GameError::Pattern(err) => {
                write!(f, "pattern error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl From<SymbolError> for GameError {
    fn from(err: SymbolError) -> Self {
        match err {
            SymbolError::OutOfRange(index) => GameError::InvalidSymbol(index),
        }
    }
}

impl From<PatternError> for GameError {
    fn from(err: PatternError) -> Self {
        GameError::Pattern(err)
    }
}

/// All mutable game state, updated in one synchronous step per input.
///
/// Holds no timers, so the input rules can be exercised on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    level: usize,
    input_index: usize,
    solution: Sequence,
    input: Option<InputBuffer>,
    finished: bool,
}

impl GameState {
    /// Fresh game at level 1 against `solution`.
    pub fn new(solution: Sequence) -> Self {
        Self {
            level: 1,
            input_index: 0,
            solution,
            input: None,
            finished: false,
        }
    }

    /// Applies one input.
    ///
    /// On a `Mismatch` the solution is replaced with one drawn from
    /// `regenerate`, which is not called for any other outcome.
    pub fn apply(
        &mut self,
        symbol: Symbol,
        regenerate: impl FnOnce() -> Sequence,
    ) -> InputOutcome {
        if self.finished {
            return InputOutcome::Ignored;
        }

        let index = self.input_index;
        let input = self.input.get_or_insert_with(InputBuffer::new);
        input.record(index, symbol);
        self.input_index += 1;

        match input.check(&self.solution) {
            Verdict::CorrectSoFar if self.input_index == self.level => {
                self.level += 1;
                self.input_index = 0;
                self.input = None;

                if self.level == SEQUENCE_LENGTH + 1 {
                    self.finished = true;
                    InputOutcome::Completed
                } else {
                    InputOutcome::LevelUp { level: self.level }
                }
            }
            Verdict::CorrectSoFar => InputOutcome::Accepted {
                entered: self.input_index,
                level: self.level,
            },
            Verdict::Incorrect => {
                let expected = self.solution[index];
                self.solution = regenerate();
                self.level = 1;
                self.input_index = 0;
                self.input = None;
                InputOutcome::Mismatch {
                    expected,
                    entered: symbol,
                }
            }
        }
    }

    /// Length of the prefix currently required.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Symbols entered in the current attempt.
    pub fn input_index(&self) -> usize {
        self.input_index
    }

    /// The secret sequence.
    pub fn solution(&self) -> &Sequence {
        &self.solution
    }

    /// The current attempt, or `None` between attempts.
    pub fn input_buffer(&self) -> Option<&InputBuffer> {
        self.input.as_ref()
    }

    /// True once the whole sequence has been reproduced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Applies `symbol` to a copy of `state` and builds the replay the outcome
/// calls for.
///
/// Leaves `state` untouched; on error nothing about the input has taken effect.
fn stage_input<D: TimeDuration, const N: usize>(
    state: &GameState,
    symbol: Symbol,
    timings: &Timings<D>,
    regenerate: impl FnOnce() -> Sequence,
) -> Result<(GameState, InputOutcome, Option<Pattern<D, N>>), GameError> {
    let mut next = state.clone();
    let outcome = next.apply(symbol, regenerate);
    let replay = match outcome {
        InputOutcome::LevelUp { .. } | InputOutcome::Mismatch { .. } => {
            Some(Pattern::replay(next.solution().prefix(next.level()), timings)?)
        }
        _ => None,
    };
    Ok((next, outcome, replay))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Routine {
    Attract,
    Flash,
    Replay,
}

/// A Simon-says game driving one indicator light.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - Indicator implementation type
/// * `T` - Time source implementation type
/// * `R` - Entropy source for sequence generation
/// * `F` - Audio/visual feedback implementation
pub struct SimonGame<'t, I, L, T, R, F>
where
    I: TimeInstant,
    L: Indicator,
    T: TimeSource<I>,
    R: RngCore,
    F: GameFeedback,
{
    driver: IndicatorDriver<'t, I, L, T, PATTERN_CAPACITY>,
    generator: SequenceGenerator<R>,
    feedback: F,
    timings: Timings<I::Duration>,
    state: GameState,
    routine: Option<Routine>,
    queued_replay: Option<Pattern<I::Duration, PATTERN_CAPACITY>>,
}

impl<'t, I, L, T, R, F> SimonGame<'t, I, L, T, R, F>
where
    I: TimeInstant,
    L: Indicator,
    T: TimeSource<I>,
    R: RngCore,
    F: GameFeedback,
{
    /// Creates a game with default timings and starts the attract loop.
    pub fn new(indicator: L, time_source: &'t T, rng: R, feedback: F) -> Result<Self, GameError> {
        Self::with_timings(indicator, time_source, rng, feedback, Timings::default())
    }

    /// Creates a game with custom timings and starts the attract loop.
    pub fn with_timings(
        indicator: L,
        time_source: &'t T,
        rng: R,
        feedback: F,
        timings: Timings<I::Duration>,
    ) -> Result<Self, GameError> {
        let mut generator = SequenceGenerator::new(rng);
        let solution = generator.generate();
        let attract = Pattern::attract(solution.first(), &timings)?;

        let mut driver = IndicatorDriver::new(indicator, time_source);
        driver.play(attract);
        info!("new game, attract loop on {}", solution.first());

        Ok(Self {
            driver,
            generator,
            feedback,
            timings,
            state: GameState::new(solution),
            routine: Some(Routine::Attract),
            queued_replay: None,
        })
    }

    /// Handles a button press.
    ///
    /// Cancels whatever is on the indicator, flashes the pressed color, and
    /// updates the game state. A completed level or a mismatch queues a replay
    /// that starts when the flash ends. Call [`service`](Self::service)
    /// afterwards to learn the next deadline.
    ///
    /// Does nothing once the game is complete.
    pub fn button_pressed(&mut self, symbol: Symbol) -> Result<InputOutcome, GameError> {
        if self.state.is_finished() {
            debug!("input {} ignored, game complete", symbol);
            return Ok(InputOutcome::Ignored);
        }

        // Nothing is committed until every routine for this input is built
        let flash = Pattern::flash(symbol, &self.timings)?;
        let generator = &mut self.generator;
        let (state, outcome, replay) =
            stage_input(&self.state, symbol, &self.timings, || generator.generate())?;

        self.state = state;
        self.queued_replay = replay;
        self.driver.cancel();
        self.driver.play(flash);
        self.routine = Some(Routine::Flash);

        match outcome {
            InputOutcome::Accepted { entered, level } => {
                trace!("input {} ok ({}/{})", symbol, entered, level);
            }
            InputOutcome::LevelUp { level } => {
                info!("level up: {}", level);
            }
            InputOutcome::Completed => {
                info!("sequence complete");
                self.feedback.game_completed();
                self.feedback.play_success_cue();
            }
            InputOutcome::Mismatch { expected, entered } => {
                info!("mismatch: expected {}, got {}", expected, entered);
                self.feedback.play_failure_cue();
                if !self.feedback.failure_effect_active() {
                    self.feedback.trigger_failure_effect();
                }
            }
            InputOutcome::Ignored => {}
        }

        Ok(outcome)
    }

    /// Handles a press identified by raw button index (`0..=3`).
    ///
    /// # Errors
    /// * `InvalidSymbol` - index outside the alphabet; state is untouched
    pub fn button_index_pressed(&mut self, index: u8) -> Result<InputOutcome, GameError> {
        let symbol = Symbol::from_index(index)?;
        self.button_pressed(symbol)
    }

    /// Dispatches a [`GameAction`] and returns the next service timing.
    pub fn handle_action(
        &mut self,
        action: GameAction,
    ) -> Result<ServiceTiming<I::Duration>, GameError> {
        match action {
            GameAction::Press(symbol) => {
                self.button_pressed(symbol)?;
            }
            GameAction::NewGame => self.new_game()?,
        }
        Ok(self.service())
    }

    /// Starts over: fresh sequence, level 1, attract loop. Works in any phase,
    /// including after completion.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        let solution = self.generator.generate();
        let attract = Pattern::attract(solution.first(), &self.timings)?;

        self.queued_replay = None;
        self.driver.cancel();
        self.state = GameState::new(solution);
        self.driver.play(attract);
        self.routine = Some(Routine::Attract);
        info!("new game, attract loop on {}", solution.first());
        Ok(())
    }

    /// Advances the running routine and updates the indicator.
    ///
    /// When the flash ends and a replay is queued, the replay starts at the
    /// exact instant the flash ended, after the indicator has gone dark.
    ///
    /// # Returns
    /// - `ServiceTiming::Delay(duration)` - service again after this long
    /// - `ServiceTiming::Idle` - nothing scheduled until the next input
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let mut timing = self.driver.service();

        while self.driver.state() == DriverState::Complete {
            match self.queued_replay.take() {
                Some(replay) => {
                    debug!("replaying {} symbols", self.state.level().min(SEQUENCE_LENGTH));
                    self.routine = Some(Routine::Replay);
                    timing = self.driver.chain(replay);
                }
                None => {
                    if self.routine.take().is_some() {
                        trace!("awaiting input");
                    }
                    break;
                }
            }
        }

        timing
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        if self.state.is_finished() {
            return GamePhase::Completed;
        }

        match self.routine {
            Some(Routine::Attract) => GamePhase::Attract,
            Some(Routine::Flash) => GamePhase::Flashing,
            Some(Routine::Replay) => GamePhase::ReplayingSolution,
            None => GamePhase::AwaitingInput,
        }
    }

    /// Returns true if a replay is waiting for the flash to end.
    pub fn replay_pending(&self) -> bool {
        self.queued_replay.is_some()
    }

    /// Length of the prefix currently required.
    pub fn level(&self) -> usize {
        self.state.level()
    }

    /// Symbols entered in the current attempt.
    pub fn input_index(&self) -> usize {
        self.state.input_index()
    }

    /// The secret sequence.
    pub fn solution(&self) -> &Sequence {
        self.state.solution()
    }

    /// The current attempt, or `None` between attempts.
    pub fn input_buffer(&self) -> Option<&InputBuffer> {
        self.state.input_buffer()
    }

    /// True once the whole sequence has been reproduced.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The full game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Color currently shown on the indicator.
    pub fn current_color(&self) -> IndicatorColor {
        self.driver.current_color()
    }

    /// The timings in use.
    pub fn timings(&self) -> &Timings<I::Duration> {
        &self.timings
    }

    /// Returns a reference to the indicator.
    pub fn indicator(&self) -> &L {
        self.driver.indicator()
    }

    /// Returns a reference to the feedback implementation.
    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Returns a mutable reference to the feedback implementation.
    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}
