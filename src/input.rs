//! The player's in-progress attempt.

use crate::SEQUENCE_LENGTH;
use crate::generator::Sequence;
use crate::symbol::Symbol;

/// Result of checking an attempt against the secret sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Every entered symbol matches so far.
    CorrectSoFar,
    /// An entered symbol differs from the sequence.
    Incorrect,
}

/// Fixed-capacity attempt buffer, one slot per sequence position.
///
/// Slots start unset and are filled front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputBuffer {
    slots: [Option<Symbol>; SEQUENCE_LENGTH],
}

impl InputBuffer {
    /// Creates a buffer with every slot unset.
    pub const fn new() -> Self {
        Self {
            slots: [None; SEQUENCE_LENGTH],
        }
    }

    /// Stores `symbol` at `index`. Indices past the end are ignored.
    pub fn record(&mut self, index: usize, symbol: Symbol) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(symbol);
        }
    }

    /// Returns the slot at `index` (`None` if unset or out of range).
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.slots.get(index).copied().flatten()
    }

    /// Returns all slots.
    pub fn slots(&self) -> &[Option<Symbol>; SEQUENCE_LENGTH] {
        &self.slots
    }

    /// Number of leading filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_some()).count()
    }

    /// Checks the attempt against `sequence`.
    ///
    /// Scans from the front; the first unset slot ends the scan as correct so
    /// far, so slots past the fill point are never compared.
    pub fn check(&self, sequence: &Sequence) -> Verdict {
        for (slot, expected) in self.slots.iter().zip(sequence.as_slice()) {
            match slot {
                None => return Verdict::CorrectSoFar,
                Some(entered) if entered != expected => return Verdict::Incorrect,
                Some(_) => {}
            }
        }
        Verdict::CorrectSoFar
    }
}
