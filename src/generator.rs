//! Secret sequence generation.

use crate::SEQUENCE_LENGTH;
use crate::symbol::Symbol;
use core::ops::Index;
use rand::RngCore;
use rand::distributions::{Distribution, Standard};

/// The secret sequence the player has to reproduce.
///
/// Always exactly [`SEQUENCE_LENGTH`] symbols. Replaced wholesale on
/// regeneration, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence([Symbol; SEQUENCE_LENGTH]);

impl Sequence {
    /// Wraps a fixed set of symbols, e.g. for a scripted game.
    pub const fn new(symbols: [Symbol; SEQUENCE_LENGTH]) -> Self {
        Self(symbols)
    }

    /// Returns the symbols as a slice.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Returns the first `len` symbols, clamped to the sequence length.
    pub fn prefix(&self, len: usize) -> &[Symbol] {
        &self.0[..len.min(SEQUENCE_LENGTH)]
    }

    /// Returns the symbol at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.0.get(index).copied()
    }

    /// Returns the first symbol, shown by the attract loop.
    pub fn first(&self) -> Symbol {
        self.0[0]
    }

    /// Number of symbols (always [`SEQUENCE_LENGTH`]).
    pub const fn len(&self) -> usize {
        SEQUENCE_LENGTH
    }

    /// Always false; present for API symmetry with slices.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Index<usize> for Sequence {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Symbol {
        &self.0[index]
    }
}

/// Draws fresh secret sequences from an entropy source.
///
/// Each symbol is an independent uniform draw over the four symbols, so repeats
/// and runs are expected.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<R: RngCore> {
    rng: R,
}

impl<R: RngCore> SequenceGenerator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a new [`SEQUENCE_LENGTH`]-symbol sequence.
    pub fn generate(&mut self) -> Sequence {
        Sequence(core::array::from_fn(|_| Standard.sample(&mut self.rng)))
    }
}
