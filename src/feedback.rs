//! Audio/visual cues the game asks the presentation layer to play.

/// Non-indicator feedback hooks.
///
/// The game calls these at its transitions; what "playing a cue" means (a sound
/// clip, a buzzer, a particle burst) is up to the implementation. All methods
/// must return promptly.
pub trait GameFeedback {
    /// A wrong symbol was entered. Called once per failure.
    fn play_failure_cue(&mut self);

    /// The whole sequence was reproduced. Called once, on completion.
    fn play_success_cue(&mut self);

    /// One-shot failure effect (sparks, shake). Called on each failure unless
    /// [`failure_effect_active`](Self::failure_effect_active) reports it is
    /// still playing.
    fn trigger_failure_effect(&mut self);

    /// Whether the failure effect from a previous failure is still playing.
    fn failure_effect_active(&self) -> bool {
        false
    }

    /// The game has been won. Called exactly once per game.
    fn game_completed(&mut self);
}

/// No feedback: for setups where the indicator is the only output.
impl GameFeedback for () {
    fn play_failure_cue(&mut self) {}

    fn play_success_cue(&mut self) {}

    fn trigger_failure_effect(&mut self) {}

    fn game_completed(&mut self) {}
}
