use crate::errors::ParamError;

use core::fmt;
use std::str::FromStr;

/// The dithering algorithm used when mapping frames onto the generated palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DitherMode {
    /// No dithering, colors snap to the nearest palette entry.
    None,
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Sierra-2 error diffusion.
    Sierra2,
    /// Ordered 8x8 Bayer dithering, tuned by the Bayer scale.
    Bayer,
}

impl DitherMode {
    pub const NAMES: &'static str = "none, floyd_steinberg, sierra2, bayer";
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DitherMode::None => write!(f, "none"),
            DitherMode::FloydSteinberg => write!(f, "floyd_steinberg"),
            DitherMode::Sierra2 => write!(f, "sierra2"),
            DitherMode::Bayer => write!(f, "bayer"),
        }
    }
}

impl FromStr for DitherMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(DitherMode::None),
            "floyd_steinberg" => Ok(DitherMode::FloydSteinberg),
            "sierra2" => Ok(DitherMode::Sierra2),
            "bayer" => Ok(DitherMode::Bayer),
            _ => Err(ParamError::UnknownOption {
                field: "dithering mode",
                value: s.to_string(),
                expected: DitherMode::NAMES,
            }),
        }
    }
}

/// How the palette generator gathers its color statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaletteMode {
    /// Favour the colors that change between frames.
    Diff,
    /// One global palette built from every frame.
    #[default]
    Full,
}

impl PaletteMode {
    pub const NAMES: &'static str = "diff, full";
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PaletteMode::Diff => write!(f, "diff"),
            PaletteMode::Full => write!(f, "full"),
        }
    }
}

impl FromStr for PaletteMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "diff" => Ok(PaletteMode::Diff),
            "full" => Ok(PaletteMode::Full),
            _ => Err(ParamError::UnknownOption {
                field: "palette mode",
                value: s.to_string(),
                expected: PaletteMode::NAMES,
            }),
        }
    }
}
