use crate::errors::ParamError;

use core::fmt;

const COLOR_RANGE: &str = "a value between -1.0 and 1.0";

/// The color adjustment applied before the palette is used.
///
/// Each scalar is applied uniformly to the red, green and blue channels:
/// saturation to the shadows, contrast to the midtones and brightness to
/// the highlights of the `colorbalance` filter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorBalance {
    pub saturation: f64,
    pub contrast: f64,
    pub brightness: f64,
}

impl ColorBalance {
    pub fn validate(&self) -> Result<(), ParamError> {
        let fields = [
            ("saturation", self.saturation),
            ("contrast", self.contrast),
            ("brightness", self.brightness),
        ];

        for (field, value) in fields {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ParamError::OutOfRange {
                    field,
                    value: value.to_string(),
                    expected: COLOR_RANGE,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for ColorBalance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = self.saturation;
        let c = self.contrast;
        let b = self.brightness;

        write!(
            f,
            "colorbalance=rs={s}:gs={s}:bs={s}:rm={c}:gm={c}:bm={c}:rh={b}:gh={b}:bh={b}"
        )
    }
}
