#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SimonGame`**: The game engine. Owns the state, generates sequences, runs timed routines
//! - **`GameState`**: Level, input cursor, secret sequence, attempt buffer and finished flag
//! - **`Symbol`**: One of the four colored inputs
//! - **`Sequence`**: The secret 8-symbol target, regenerated on failure
//! - **`Pattern`**: A timed list of held indicator colors (attract, flash, replay)
//! - **`IndicatorDriver`**: Runs one pattern at a time on the indicator
//! - **`Indicator`**: Trait to implement for your light
//! - **`GameFeedback`**: Trait to implement for sounds and effects
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`GameAction`**: Commands that can be sent to control the game
//!
//! The host calls [`SimonGame::button_pressed`] on input and [`SimonGame::service`]
//! whenever the last returned [`ServiceTiming::Delay`] has elapsed.

#[macro_use]
mod fmt;

pub mod colors;
pub mod command;
pub mod config;
pub mod feedback;
pub mod game;
pub mod generator;
pub mod indicator;
pub mod input;
pub mod pattern;
pub mod symbol;
pub mod time;
pub mod types;

pub use colors::{BLACK, BLUE, GREEN, IndicatorColor, RED, YELLOW};
pub use command::GameAction;
pub use config::{Timings, TimingsBuilder, TimingError};
pub use feedback::GameFeedback;
pub use game::{GameError, GamePhase, GameState, InputOutcome, SimonGame};
pub use generator::{Sequence, SequenceGenerator};
pub use indicator::{DriverState, Indicator, IndicatorDriver, ServiceTiming};
pub use input::{InputBuffer, Verdict};
pub use pattern::{Pattern, PatternBuilder};
pub use symbol::{Symbol, SymbolError};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{LoopCount, PatternError, PatternStep};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

/// Number of symbols in the secret sequence.
pub const SEQUENCE_LENGTH: usize = 8;

/// Step capacity for game patterns: replay lead-in plus an on/off pair per symbol.
pub const PATTERN_CAPACITY: usize = 2 * SEQUENCE_LENGTH + 1;
