//! Monochrome classification.
//!
//! A pixel is first sorted into a [`Shade`], then a [`ColorMap`] decides
//! which of the three shades end up as set bits.

use std::{fmt, str::FromStr};

use crate::pixel::Pixel;

/// Pixels with alpha below this are transparent.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Pixels with a mean channel value below this are black.
pub const LUMINANCE_THRESHOLD: u16 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    White,
    Black,
    Transparent,
}

impl Shade {
    pub fn of(pixel: &Pixel) -> Self {
        if pixel.a < ALPHA_THRESHOLD {
            return Self::Transparent;
        }
        let luminance = (u16::from(pixel.r) + u16::from(pixel.g) + u16::from(pixel.b)) / 3;
        if luminance < LUMINANCE_THRESHOLD {
            Self::Black
        } else {
            Self::White
        }
    }
}

/// Which shades become set bits in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    pub white: bool,
    pub black: bool,
    pub transparent: bool,
}

impl ColorMap {
    /// White pixels are set, black and transparent ones are clear.
    pub const WHITE_IS_SET: ColorMap = ColorMap {
        white: true,
        black: false,
        transparent: false,
    };

    /// Black pixels are set, white and transparent ones are clear.
    pub const BLACK_IS_SET: ColorMap = ColorMap {
        white: false,
        black: true,
        transparent: false,
    };

    pub const fn new(white: bool, black: bool, transparent: bool) -> Self {
        ColorMap {
            white,
            black,
            transparent,
        }
    }

    /// Output bit (0 or 1) for a shade.
    pub fn bit(&self, shade: Shade) -> u32 {
        let set = match shade {
            Shade::White => self.white,
            Shade::Black => self.black,
            Shade::Transparent => self.transparent,
        };
        u32::from(set)
    }

    pub fn classify(&self, pixel: &Pixel) -> u32 {
        self.bit(Shade::of(pixel))
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::WHITE_IS_SET
    }
}

#[derive(Debug)]
/// Failed to parse a color map name
pub struct ColorMapError(String);

impl fmt::Display for ColorMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown color map `{}`, use `white` or `black`",
            self.0
        )
    }
}

impl std::error::Error for ColorMapError {}

impl FromStr for ColorMap {
    type Err = ColorMapError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "white" | "white-is-set" => Ok(Self::WHITE_IS_SET),
            "black" | "black-is-set" => Ok(Self::BLACK_IS_SET),
            _ => Err(ColorMapError(val.to_string())),
        }
    }
}
