//! Indicator colors and their RGB values.
//!
//! The engine only ever speaks in [`IndicatorColor`]; hardware that wants
//! numeric values converts with [`IndicatorColor::rgb`] or
//! [`IndicatorColor::emission`].

use crate::symbol::Symbol;
use palette::Srgb;

/// Indicator off.
pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
/// Red symbol color.
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
/// Blue symbol color.
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
/// Green symbol color.
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
/// Yellow symbol color (slightly warm, matches common engine "yellow").
pub const YELLOW: Srgb = Srgb::new(1.0, 0.92, 0.016);

/// Gain applied to the base color for an emissive light material.
pub const EMISSION_GAIN: f32 = 1.1;

/// What the indicator light is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorColor {
    /// Dark.
    #[default]
    Off,
    /// Red symbol.
    Red,
    /// Blue symbol.
    Blue,
    /// Green symbol.
    Green,
    /// Yellow symbol.
    Yellow,
}

impl IndicatorColor {
    /// Returns the base RGB value (0.0-1.0 per channel).
    #[inline]
    pub const fn rgb(self) -> Srgb {
        match self {
            IndicatorColor::Off => BLACK,
            IndicatorColor::Red => RED,
            IndicatorColor::Blue => BLUE,
            IndicatorColor::Green => GREEN,
            IndicatorColor::Yellow => YELLOW,
        }
    }

    /// Returns the emissive RGB value, the base color scaled by [`EMISSION_GAIN`].
    ///
    /// Channels may exceed 1.0; HDR pipelines use them as-is, LED drivers clamp.
    #[inline]
    pub fn emission(self) -> Srgb {
        let base = self.rgb();
        Srgb::new(
            base.red * EMISSION_GAIN,
            base.green * EMISSION_GAIN,
            base.blue * EMISSION_GAIN,
        )
    }

    /// Returns true if the indicator is dark.
    #[inline]
    pub fn is_off(self) -> bool {
        self == IndicatorColor::Off
    }
}

impl From<Symbol> for IndicatorColor {
    fn from(symbol: Symbol) -> Self {
        symbol.color()
    }
}

impl From<Option<Symbol>> for IndicatorColor {
    fn from(symbol: Option<Symbol>) -> Self {
        symbol.map_or(IndicatorColor::Off, Symbol::color)
    }
}
