use crate::{errors::InputListError, file_processor::VALID_EXTENSIONS, logger, utils};

use lexical_sort::natural_cmp;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A line that ends the reading of an input list file.
pub const STOP_CLAUSE: &str = "###STOP###";

/// Read the input paths from a list file, one path per line.
///
/// Blank lines and lines starting with `#` are skipped. Reading ends at
/// a [`STOP_CLAUSE`] line.
///
/// # Arguments
///
/// * `path` - The path to the list file.
pub fn read_list_file(path: &Path) -> Result<Vec<PathBuf>, InputListError> {
    let to_error = |source| InputListError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;

    let mut paths = Vec::new();
    for line in BufReader::new(file).lines() {
        // This can occur if the line does not contain valid UTF-8 sequences.
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                logger::log(format!("Error parsing input list file: {e}"), false);
                continue;
            }
        };

        let line = line.trim();
        if line == STOP_CLAUSE {
            break;
        }

        // Skip empty lines and comment lines.
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}

/// Expand any directories within a list of inputs into the applicable files
/// they contain, in natural order. Other inputs are passed through untouched
/// so that missing files can still be reported.
///
/// # Arguments
///
/// * `inputs` - The candidate input paths, in the order they were supplied.
pub fn expand_inputs(inputs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut expanded = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !utils::dir_exists(&input) {
            expanded.push(input);
            continue;
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&input)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    logger::log(format!("Error reading directory entry: {e}"), false);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| has_valid_extension(p))
            .collect();

        // Sort the file paths using a natural sorting algorithm.
        files.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));

        logger::log(
            format!(
                "Directory '{}' contains {} applicable file{}.",
                input.display(),
                files.len(),
                utils::plural(files.len())
            ),
            false,
        );

        expanded.extend(files);
    }

    expanded
}

/// Check whether a path has one of the accepted video extensions.
pub fn has_valid_extension(path: &Path) -> bool {
    utils::get_file_extension(path).is_some_and(|ext| VALID_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_file_skips_comments_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("inputs.txt");
        fs::write(
            &list,
            "# holiday clips\n/videos/a.mp4\n\n  /videos/b c.mov  \n###STOP###\n/videos/ignored.mp4\n",
        )
        .unwrap();

        let paths = read_list_file(&list).unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("/videos/a.mp4"), PathBuf::from("/videos/b c.mov")]
        );
    }

    #[test]
    fn missing_list_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_list_file(&dir.path().join("missing.txt")),
            Err(InputListError::Read { .. })
        ));
    }

    #[test]
    fn directories_expand_in_natural_order() {
        let dir = tempfile::tempdir().unwrap();
        let clips = dir.path().join("clips");
        fs::create_dir_all(clips.join("nested")).unwrap();
        for name in ["clip10.mp4", "clip2.MOV", "clip1.mp4", "notes.txt"] {
            fs::write(clips.join(name), b"").unwrap();
        }
        fs::write(clips.join("nested").join("extra.mp4"), b"").unwrap();

        let loose = dir.path().join("missing.mp4");
        let expanded = expand_inputs(vec![loose.clone(), clips.clone()]);

        assert_eq!(
            expanded,
            vec![
                loose,
                clips.join("clip1.mp4"),
                clips.join("clip2.MOV"),
                clips.join("clip10.mp4"),
                clips.join("nested").join("extra.mp4"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectories_do_not_stop_expansion() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let clips = dir.path().join("clips");
        let locked = clips.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(clips.join("a.mp4"), b"").unwrap();
        fs::write(locked.join("b.mp4"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let expanded = expand_inputs(vec![clips.clone()]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // A privileged user can still read the locked folder.
        assert_eq!(expanded.first(), Some(&clips.join("a.mp4")));
        assert!(expanded.len() <= 2);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_valid_extension(Path::new("a.MP4")));
        assert!(has_valid_extension(Path::new("a.Mov")));
        assert!(!has_valid_extension(Path::new("a.mkv")));
        assert!(!has_valid_extension(Path::new("mp4")));
    }
}
