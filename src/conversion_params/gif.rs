use std::{ffi::OsString, path::Path};

use super::{params_trait::ConversionParams, unified::ParameterSet};

/// The second pass: render the GIF against a previously generated palette.
pub struct GifParams<'a> {
    pub params: &'a ParameterSet,
    pub palette: &'a Path,
}

impl<'a> GifParams<'a> {
    pub fn new(params: &'a ParameterSet, palette: &'a Path) -> Self {
        Self { params, palette }
    }

    /// Build the `-filter_complex` graph. Input 0 is the clip and input 1
    /// is the palette image.
    pub fn filter_graph(&self) -> String {
        let p = self.params;

        let mut graph = p.base_filter_chain();
        if p.color_adjust {
            graph.push(',');
            graph.push_str(&p.color.to_string());
        }

        graph.push_str(&format!(
            "[x];[x][1:v]paletteuse=dither={}:bayer_scale={}",
            p.dither, p.bayer_scale
        ));

        graph
    }
}

impl ConversionParams for GifParams<'_> {
    fn as_ffmpeg_argument_list(&self, file_in: &Path, file_out: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(7);

        // Input files: the clip, then its palette.
        args.push("-i".into());
        args.push(file_in.into());
        args.push("-i".into());
        args.push(self.palette.into());

        args.push("-filter_complex".into());
        args.push(self.filter_graph().into());

        // The output file path should always go last.
        args.push(file_out.into());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion_params::{color::ColorBalance, options::DitherMode};

    #[test]
    fn conversion_pass_without_color_adjustment() {
        let params = ParameterSet::default();
        let palette = Path::new("out/clip_palette.png");
        let args = GifParams::new(&params, palette).as_ffmpeg_argument_list(
            Path::new("in/clip.MOV"),
            Path::new("out/clip_fps10_w750_sp1xPTS_1.gif"),
        );

        let expected: Vec<OsString> = [
            "-i",
            "in/clip.MOV",
            "-i",
            "out/clip_palette.png",
            "-filter_complex",
            "setpts=1*PTS,fps=10,scale=750:-1:flags=lanczos[x];[x][1:v]paletteuse=dither=floyd_steinberg:bayer_scale=3",
            "out/clip_fps10_w750_sp1xPTS_1.gif",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        assert_eq!(args, expected);
    }

    #[test]
    fn color_balance_is_inserted_before_the_palette_stage() {
        let params = ParameterSet {
            dither: DitherMode::Bayer,
            bayer_scale: 5,
            color: ColorBalance {
                saturation: 0.2,
                contrast: 0.1,
                brightness: -0.3,
            },
            color_adjust: true,
            ..Default::default()
        };

        let graph = GifParams::new(&params, Path::new("p.png")).filter_graph();
        assert_eq!(
            graph,
            "setpts=1*PTS,fps=10,scale=750:-1:flags=lanczos,\
             colorbalance=rs=0.2:gs=0.2:bs=0.2:rm=0.1:gm=0.1:bm=0.1:rh=-0.3:gh=-0.3:bh=-0.3\
             [x];[x][1:v]paletteuse=dither=bayer:bayer_scale=5"
        );
    }

    #[test]
    fn disabled_color_adjustment_ignores_scalars() {
        let params = ParameterSet {
            color: ColorBalance {
                saturation: 0.9,
                ..Default::default()
            },
            color_adjust: false,
            ..Default::default()
        };

        let graph = GifParams::new(&params, Path::new("p.png")).filter_graph();
        assert!(!graph.contains("colorbalance"));
    }
}
