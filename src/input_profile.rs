use crate::{
    conversion_params::unified::RawParams, errors::ProfileError, substitutions::Substitutions,
    utils,
};

use serde_derive::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputProfile {
    /// The directory that receives the converted files, used as given.
    /// When absent the desktop output folder is used.
    pub output_dir: Option<String>,
    /// The conversion parameters, as entered by the user.
    pub params: RawParams,
    /// Substitutions applied to the output base names.
    pub substitutions: Substitutions,
}

impl InputProfile {
    /// Read and parse a conversion profile.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the conversion profile data file.
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        if !utils::file_exists(path) {
            return Err(ProfileError::Missing(path.to_path_buf()));
        }

        let json = fs::read_to_string(path)?;
        InputProfile::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let mut profile = serde_json::from_str::<InputProfile>(json)?;
        profile.substitutions.compile()?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_uses_defaults() {
        let profile = InputProfile::from_json("{}").unwrap();
        assert!(profile.output_dir.is_none());
        assert_eq!(profile.params, RawParams::default());
        assert_eq!(profile.substitutions.apply("a:b"), "a_b");
    }

    #[test]
    fn full_profile_is_parsed() {
        let json = r#"{
            "output_dir": "/tmp/gifs",
            "params": {
                "fps": "15",
                "scale_width": 480,
                "speed": "0.5*PTS",
                "dither": "bayer",
                "bayer_scale": "2",
                "palette_mode": "diff",
                "saturation": "0.1",
                "contrast": "0.2",
                "brightness": "0.3",
                "color_adjust": true
            },
            "substitutions": {
                "regular_expressions": [["\\s+", "_"]],
                "strings": [["(copy)", ""]]
            }
        }"#;

        let profile = InputProfile::from_json(json).unwrap();
        assert_eq!(profile.output_dir.as_deref(), Some("/tmp/gifs"));
        assert_eq!(profile.params.fps, "15");
        assert_eq!(profile.params.scale_width, "480");
        assert_eq!(profile.params.dither, "bayer");
        assert!(profile.params.color_adjust);
        assert_eq!(profile.substitutions.apply("my clip (copy)"), "my_clip_");
    }

    #[test]
    fn invalid_values_are_kept_for_validation() {
        // Parsing the numbers is the job of the parameter validation step.
        let profile = InputProfile::from_json(r#"{ "params": { "fps": "fast" } }"#).unwrap();
        assert_eq!(profile.params.fps, "fast");
    }

    #[test]
    fn bad_profiles_are_reported() {
        assert!(matches!(
            InputProfile::from_json("{"),
            Err(ProfileError::Parse(_))
        ));
        assert!(matches!(
            InputProfile::from_json(r#"{ "substitutions": { "regular_expressions": [["[", ""]] } }"#),
            Err(ProfileError::Substitution { .. })
        ));
        assert!(matches!(
            InputProfile::from_file(Path::new("/definitely/not/here.json")),
            Err(ProfileError::Missing(_))
        ));
    }
}
