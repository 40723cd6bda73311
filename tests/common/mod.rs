//! Shared test infrastructure for simon-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rand::RngCore;
use simon_sequencer::{
    GameFeedback, Indicator, IndicatorColor, SEQUENCE_LENGTH, Sequence, SimonGame, Symbol,
    TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }
}

// ============================================================================
// Mock Indicator
// ============================================================================

/// Mock indicator that records every color write
pub struct MockIndicator {
    history: Vec<IndicatorColor>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[IndicatorColor] {
        &self.history
    }

    pub fn last_color(&self) -> Option<IndicatorColor> {
        self.history.last().copied()
    }
}

impl Indicator for MockIndicator {
    fn set_color(&mut self, color: IndicatorColor) {
        self.history.push(color);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Scripted Entropy
// ============================================================================

/// RNG that makes the generator produce the given sequences in order.
///
/// Each symbol is drawn from the top two bits of one `next_u32`. After the
/// script runs out it keeps repeating the last sequence.
pub struct ScriptedRng {
    symbols: Vec<Symbol>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(sequences: &[Sequence]) -> Self {
        let symbols = sequences
            .iter()
            .flat_map(|sequence| sequence.as_slice().iter().copied())
            .collect();
        Self { symbols, cursor: 0 }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let len = self.symbols.len();
        let index = if self.cursor < len {
            self.cursor
        } else {
            // Repeat the final sequence
            len - SEQUENCE_LENGTH + (self.cursor - len) % SEQUENCE_LENGTH
        };
        self.cursor += 1;
        u32::from(self.symbols[index].index()) << 30
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Recording Feedback
// ============================================================================

/// Counts every cue the game fires
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub failure_cues: u32,
    pub success_cues: u32,
    pub failure_effects: u32,
    pub completions: u32,
    pub effect_active: bool,
}

impl GameFeedback for RecordingFeedback {
    fn play_failure_cue(&mut self) {
        self.failure_cues += 1;
    }

    fn play_success_cue(&mut self) {
        self.success_cues += 1;
    }

    fn trigger_failure_effect(&mut self) {
        self.failure_effects += 1;
    }

    fn failure_effect_active(&self) -> bool {
        self.effect_active
    }

    fn game_completed(&mut self) {
        self.completions += 1;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestGame<'t> =
    SimonGame<'t, TestInstant, MockIndicator, MockTimeSource, ScriptedRng, RecordingFeedback>;

/// Builds a game whose generator yields `sequences` in order
pub fn scripted_game<'t>(timer: &'t MockTimeSource, sequences: &[Sequence]) -> TestGame<'t> {
    SimonGame::new(
        MockIndicator::new(),
        timer,
        ScriptedRng::new(sequences),
        RecordingFeedback::default(),
    )
    .unwrap()
}

/// Advances the clock in `step_ms` increments, servicing the game after each
pub fn run_for(game: &mut TestGame<'_>, timer: &MockTimeSource, total_ms: u64, step_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        let step = step_ms.min(total_ms - elapsed);
        timer.advance(step);
        game.service();
        elapsed += step;
    }
}

/// Enters the first `level` symbols of the current solution
pub fn enter_level(game: &mut TestGame<'_>) {
    let solution = *game.solution();
    for symbol in solution.prefix(game.level()) {
        game.button_pressed(*symbol).unwrap();
    }
}

/// A symbol different from `symbol`
pub fn other_than(symbol: Symbol) -> Symbol {
    Symbol::ALL[(usize::from(symbol.index()) + 1) % 4]
}
