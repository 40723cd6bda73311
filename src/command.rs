//! Command-based control for the game.

use crate::symbol::Symbol;

/// Actions for controlling a game, e.g. sent over a channel from an input task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameAction {
    /// A button was pressed.
    Press(Symbol),
    /// Throw away the current game and start over in attract mode.
    NewGame,
}

impl From<Symbol> for GameAction {
    fn from(symbol: Symbol) -> Self {
        GameAction::Press(symbol)
    }
}
