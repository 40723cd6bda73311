//! The four-symbol input alphabet.

use crate::colors::IndicatorColor;
use rand::Rng;
use rand::distributions::{Distribution, Standard};

/// One of the four colored inputs.
///
/// Discriminants are the raw button indices used by presentation layers that
/// number their buttons (`Red = 0` .. `Yellow = 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Button 0.
    Red = 0,
    /// Button 1.
    Blue = 1,
    /// Button 2.
    Green = 2,
    /// Button 3.
    Yellow = 3,
}

impl Symbol {
    /// Every symbol, in index order.
    pub const ALL: [Symbol; 4] = [Symbol::Red, Symbol::Blue, Symbol::Green, Symbol::Yellow];

    /// Returns the raw button index of this symbol.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Looks up a symbol by raw button index.
    ///
    /// # Errors
    /// * `OutOfRange` - `index` is not in `0..=3`
    pub fn from_index(index: u8) -> Result<Self, SymbolError> {
        Symbol::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(SymbolError::OutOfRange(index))
    }

    /// Returns the indicator color shown for this symbol.
    #[inline]
    pub const fn color(self) -> IndicatorColor {
        match self {
            Symbol::Red => IndicatorColor::Red,
            Symbol::Blue => IndicatorColor::Blue,
            Symbol::Green => IndicatorColor::Green,
            Symbol::Yellow => IndicatorColor::Yellow,
        }
    }
}

impl TryFrom<u8> for Symbol {
    type Error = SymbolError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Symbol::from_index(index)
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.index()
    }
}

/// Uniform draw over the four symbols.
///
/// Uses the top two bits of a single `next_u32`, which is exactly uniform and
/// consumes one draw per symbol.
impl Distribution<Symbol> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        Symbol::ALL[(rng.next_u32() >> 30) as usize]
    }
}

/// Raw symbol conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SymbolError {
    /// Button index outside the alphabet.
    OutOfRange(u8),
}

impl core::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SymbolError::OutOfRange(index) => {
                write!(f, "button index {} is not a symbol (expected 0-3)", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SymbolError {}
