use std::{ffi::OsString, path::Path};

use super::{params_trait::ConversionParams, unified::ParameterSet};

/// The first pass: build an optimal palette image for the clip.
pub struct PaletteParams<'a> {
    pub params: &'a ParameterSet,
}

impl<'a> PaletteParams<'a> {
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    pub fn filter_graph(&self) -> String {
        format!(
            "{},palettegen=stats_mode={}",
            self.params.base_filter_chain(),
            self.params.palette_mode
        )
    }
}

impl ConversionParams for PaletteParams<'_> {
    fn as_ffmpeg_argument_list(&self, file_in: &Path, file_out: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(6);

        // Input file.
        args.push("-i".into());
        args.push(file_in.into());

        args.push("-vf".into());
        args.push(self.filter_graph().into());

        // A stale palette from an interrupted run may still be present.
        args.push("-y".into());

        // The output file path should always go last.
        args.push(file_out.into());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion_params::options::PaletteMode;

    #[test]
    fn palette_pass_arguments() {
        let params = ParameterSet::default();
        let args = PaletteParams::new(&params)
            .as_ffmpeg_argument_list(Path::new("in/clip.MOV"), Path::new("out/clip_palette.png"));

        let expected: Vec<OsString> = [
            "-i",
            "in/clip.MOV",
            "-vf",
            "setpts=1*PTS,fps=10,scale=750:-1:flags=lanczos,palettegen=stats_mode=full",
            "-y",
            "out/clip_palette.png",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        assert_eq!(args, expected);
    }

    #[test]
    fn diff_mode_is_passed_through() {
        let params = ParameterSet {
            palette_mode: PaletteMode::Diff,
            ..Default::default()
        };
        assert!(
            PaletteParams::new(&params)
                .filter_graph()
                .ends_with("palettegen=stats_mode=diff")
        );
    }
}
