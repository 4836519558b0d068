use crate::{
    errors::ParamError,
    substitutions::{BAD_NTFS_CHARS, REPLACEMENT_CHAR},
};

use serde::de::{self, Deserialize, Deserializer, Unexpected};
use serde_derive::Deserialize;

use super::{
    color::ColorBalance,
    options::{DitherMode, PaletteMode},
};

/// The upper bound accepted by the `paletteuse` filter's `bayer_scale` option.
pub const MAX_BAYER_SCALE: u32 = 5;

/// The conversion parameters exactly as supplied by the user. Numeric fields
/// are kept as text until [`ParameterSet::from_raw`] validates them.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawParams {
    /// The output frame rate.
    #[serde(deserialize_with = "string_or_number")]
    pub fps: String,
    /// The output width in pixels. The height follows the aspect ratio.
    #[serde(deserialize_with = "string_or_number")]
    pub scale_width: String,
    /// The presentation timestamp expression, for example `0.5*PTS`.
    pub speed: String,
    /// The dithering mode name.
    pub dither: String,
    /// The Bayer dithering scale.
    #[serde(deserialize_with = "string_or_number")]
    pub bayer_scale: String,
    /// The palette statistics mode name.
    pub palette_mode: String,
    #[serde(deserialize_with = "string_or_number")]
    pub saturation: String,
    #[serde(deserialize_with = "string_or_number")]
    pub contrast: String,
    #[serde(deserialize_with = "string_or_number")]
    pub brightness: String,
    /// Should the color balance stage be applied?
    pub color_adjust: bool,
}

impl Default for RawParams {
    fn default() -> Self {
        Self {
            fps: "10".to_string(),
            scale_width: "750".to_string(),
            speed: "1*PTS".to_string(),
            dither: "floyd_steinberg".to_string(),
            bayer_scale: "3".to_string(),
            palette_mode: "full".to_string(),
            saturation: "0.0".to_string(),
            contrast: "0.0".to_string(),
            brightness: "0.0".to_string(),
            color_adjust: false,
        }
    }
}

/// A fully validated set of conversion parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    pub fps: u32,
    pub scale_width: u32,
    pub speed: String,
    pub dither: DitherMode,
    pub bayer_scale: u32,
    pub palette_mode: PaletteMode,
    pub color: ColorBalance,
    pub color_adjust: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            fps: 10,
            scale_width: 750,
            speed: "1*PTS".to_string(),
            dither: DitherMode::FloydSteinberg,
            bayer_scale: 3,
            palette_mode: PaletteMode::Full,
            color: ColorBalance::default(),
            color_adjust: false,
        }
    }
}

impl ParameterSet {
    /// Parse and validate the raw parameters. The first failure is returned.
    ///
    /// # Arguments
    ///
    /// * `raw` - The raw parameters.
    pub fn from_raw(raw: &RawParams) -> Result<Self, ParamError> {
        let params = Self {
            fps: parse_integer("frame rate", &raw.fps)?,
            scale_width: parse_integer("scale width", &raw.scale_width)?,
            speed: raw.speed.trim().to_string(),
            dither: raw.dither.parse()?,
            bayer_scale: parse_integer("Bayer scale", &raw.bayer_scale)?,
            palette_mode: raw.palette_mode.parse()?,
            color: ColorBalance {
                saturation: parse_float("saturation", &raw.saturation)?,
                contrast: parse_float("contrast", &raw.contrast)?,
                brightness: parse_float("brightness", &raw.brightness)?,
            },
            color_adjust: raw.color_adjust,
        };

        params.validate()?;

        Ok(params)
    }

    /// Check the parameters against the ranges the filters accept.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.fps == 0 {
            return Err(ParamError::OutOfRange {
                field: "frame rate",
                value: self.fps.to_string(),
                expected: "a value greater than zero",
            });
        }

        if self.scale_width == 0 {
            return Err(ParamError::OutOfRange {
                field: "scale width",
                value: self.scale_width.to_string(),
                expected: "a value greater than zero",
            });
        }

        if self.bayer_scale > MAX_BAYER_SCALE {
            return Err(ParamError::OutOfRange {
                field: "Bayer scale",
                value: self.bayer_scale.to_string(),
                expected: "a value between 0 and 5",
            });
        }

        if self.speed.is_empty() {
            return Err(ParamError::EmptySpeed);
        }

        // The scalars are only passed to the tool when the stage is enabled.
        if self.color_adjust {
            self.color.validate()?;
        }

        Ok(())
    }

    /// The time remap, resample and scale chain shared by both passes.
    pub fn base_filter_chain(&self) -> String {
        format!(
            "setpts={},fps={},scale={}:-1:flags=lanczos",
            self.speed, self.fps, self.scale_width
        )
    }

    /// The parameter portion of an output file name, for example
    /// `_fps10_w750_sp1xPTS`.
    pub fn output_suffix(&self) -> String {
        let speed: String = self
            .speed
            .chars()
            .map(|c| match c {
                '*' => 'x',
                c if BAD_NTFS_CHARS.contains(&c) => REPLACEMENT_CHAR,
                c => c,
            })
            .collect();

        format!("_fps{}_w{}_sp{}", self.fps, self.scale_width, speed)
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<u32, ParamError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ParamError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, ParamError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParamError::InvalidFloat {
            field,
            value: value.to_string(),
        })
}

/// Accept either a JSON string or a JSON number, keeping the text as written.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Err(de::Error::invalid_type(
            Unexpected::Bool(b),
            &"a string or a number",
        )),
        _ => Err(de::Error::invalid_type(
            Unexpected::Other("a non-scalar value"),
            &"a string or a number",
        )),
    }
}

/// Apply a comma separated list of `key=value` overrides to a set of raw
/// parameters.
///
/// # Arguments
///
/// * `raw` - The raw parameters to be updated.
/// * `overrides` - The override list, for example `fps=12,dither=bayer`.
pub fn apply_overrides(raw: &mut RawParams, overrides: &str) -> Result<(), ParamError> {
    for pair in overrides.split(',').filter(|p| !p.trim().is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim().to_string()),
            None => {
                return Err(ParamError::UnknownOption {
                    field: "parameter override",
                    value: pair.to_string(),
                    expected: OVERRIDE_KEYS,
                });
            }
        };

        match key {
            "fps" => raw.fps = value,
            "scale_width" | "width" => raw.scale_width = value,
            "speed" => raw.speed = value,
            "dither" => raw.dither = value,
            "bayer_scale" => raw.bayer_scale = value,
            "palette_mode" => raw.palette_mode = value,
            "saturation" => raw.saturation = value,
            "contrast" => raw.contrast = value,
            "brightness" => raw.brightness = value,
            "color_adjust" => {
                raw.color_adjust = match value.to_lowercase().as_str() {
                    "true" | "yes" | "1" => true,
                    "false" | "no" | "0" => false,
                    _ => {
                        return Err(ParamError::UnknownOption {
                            field: "color adjustment flag",
                            value,
                            expected: "true, false, yes, no, 1, 0",
                        });
                    }
                }
            }
            _ => {
                return Err(ParamError::UnknownOption {
                    field: "parameter name",
                    value: key.to_string(),
                    expected: OVERRIDE_KEYS,
                });
            }
        }
    }

    Ok(())
}

const OVERRIDE_KEYS: &str = "fps, scale_width, speed, dither, bayer_scale, palette_mode, saturation, contrast, brightness, color_adjust";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_raw_defaults() {
        let params = ParameterSet::from_raw(&RawParams::default()).unwrap();
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let raw = RawParams {
            fps: "ten".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ParameterSet::from_raw(&raw),
            Err(ParamError::InvalidInteger {
                field: "frame rate",
                value: "ten".to_string(),
            })
        );

        let raw = RawParams {
            scale_width: "750.5".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ParameterSet::from_raw(&raw),
            Err(ParamError::InvalidInteger {
                field: "scale width",
                ..
            })
        ));

        let raw = RawParams {
            contrast: "high".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ParameterSet::from_raw(&raw),
            Err(ParamError::InvalidFloat {
                field: "contrast",
                ..
            })
        ));
    }

    #[test]
    fn floats_are_parsed_even_when_color_adjust_is_off() {
        let raw = RawParams {
            brightness: "".to_string(),
            color_adjust: false,
            ..Default::default()
        };
        assert!(ParameterSet::from_raw(&raw).is_err());
    }

    #[test]
    fn color_range_is_only_checked_when_enabled() {
        let mut raw = RawParams {
            saturation: "3".to_string(),
            ..Default::default()
        };
        assert!(ParameterSet::from_raw(&raw).is_ok());

        raw.color_adjust = true;
        assert!(matches!(
            ParameterSet::from_raw(&raw),
            Err(ParamError::OutOfRange {
                field: "saturation",
                ..
            })
        ));
    }

    #[test]
    fn ranges_are_enforced() {
        for (raw, field) in [
            (
                RawParams {
                    fps: "0".to_string(),
                    ..Default::default()
                },
                "frame rate",
            ),
            (
                RawParams {
                    scale_width: "0".to_string(),
                    ..Default::default()
                },
                "scale width",
            ),
            (
                RawParams {
                    bayer_scale: "6".to_string(),
                    ..Default::default()
                },
                "Bayer scale",
            ),
        ] {
            match ParameterSet::from_raw(&raw) {
                Err(ParamError::OutOfRange { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected an out of range error, got {other:?}"),
            }
        }

        let raw = RawParams {
            speed: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(ParameterSet::from_raw(&raw), Err(ParamError::EmptySpeed));
    }

    #[test]
    fn numeric_text_is_trimmed() {
        let raw = RawParams {
            fps: " 12 ".to_string(),
            scale_width: "480\n".to_string(),
            ..Default::default()
        };
        let params = ParameterSet::from_raw(&raw).unwrap();
        assert_eq!(params.fps, 12);
        assert_eq!(params.scale_width, 480);
    }

    #[test]
    fn output_suffix_encodes_parameters() {
        let params = ParameterSet::default();
        assert_eq!(params.output_suffix(), "_fps10_w750_sp1xPTS");

        let params = ParameterSet {
            speed: "PTS/2".to_string(),
            ..Default::default()
        };
        assert_eq!(params.output_suffix(), "_fps10_w750_spPTS_2");
    }

    #[test]
    fn base_chain_scales_with_lanczos() {
        let params = ParameterSet {
            fps: 15,
            scale_width: 320,
            speed: "0.5*PTS".to_string(),
            ..Default::default()
        };
        assert_eq!(
            params.base_filter_chain(),
            "setpts=0.5*PTS,fps=15,scale=320:-1:flags=lanczos"
        );
    }

    #[test]
    fn raw_params_accept_strings_and_numbers() {
        let raw: RawParams =
            serde_json::from_str(r#"{ "fps": 12, "scale_width": "640", "saturation": -0.25 }"#)
                .unwrap();
        assert_eq!(raw.fps, "12");
        assert_eq!(raw.scale_width, "640");
        assert_eq!(raw.saturation, "-0.25");
        assert_eq!(raw.speed, "1*PTS");

        assert!(serde_json::from_str::<RawParams>(r#"{ "fps": true }"#).is_err());
    }

    #[test]
    fn overrides_are_layered_over_defaults() {
        let mut raw = RawParams::default();
        apply_overrides(
            &mut raw,
            "fps=24, width=480,dither=bayer,color_adjust=yes,contrast=0.2",
        )
        .unwrap();
        let params = ParameterSet::from_raw(&raw).unwrap();
        assert_eq!(params.fps, 24);
        assert_eq!(params.scale_width, 480);
        assert_eq!(params.dither, DitherMode::Bayer);
        assert!(params.color_adjust);
        assert_eq!(params.color.contrast, 0.2);

        assert!(matches!(
            apply_overrides(&mut raw, "frames=24"),
            Err(ParamError::UnknownOption {
                field: "parameter name",
                ..
            })
        ));
        assert!(matches!(
            apply_overrides(&mut raw, "fps"),
            Err(ParamError::UnknownOption { .. })
        ));
        assert!(apply_overrides(&mut raw, "color_adjust=maybe").is_err());
        assert_eq!(
            apply_overrides(&mut raw, "color_adjust=on"),
            Err(ParamError::UnknownOption {
                field: "color adjustment flag",
                value: "on".to_string(),
                expected: "true, false, yes, no, 1, 0",
            })
        );
        apply_overrides(&mut raw, "color_adjust=0").unwrap();
        assert!(!raw.color_adjust);
    }
}
