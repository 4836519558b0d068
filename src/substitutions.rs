use crate::errors::ProfileError;

use regex::Regex;
use serde_derive::Deserialize;

/// Characters that may not appear in a file name on common filesystems.
pub const BAD_NTFS_CHARS: [char; 9] = ['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

/// The character used in place of any forbidden character.
pub const REPLACEMENT_CHAR: char = '_';

/// The maximum length of a sanitized file name, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 200;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Substitutions {
    /// A list of regex substitutions to be applied when sanitizing a string.
    #[serde(default)]
    pub regular_expressions: Vec<[String; 2]>,

    /// A list of plain string substitutions to be applied when sanitizing a string.
    #[serde(default)]
    pub strings: Vec<[String; 2]>,

    /// Compiled by [`Substitutions::compile`].
    #[serde(skip)]
    regex_internal: Vec<(Regex, String)>,
}

impl Substitutions {
    /// Compile the regular expressions. This must be called before
    /// [`Substitutions::apply`] for the regex rules to take effect.
    pub fn compile(&mut self) -> Result<(), ProfileError> {
        self.regex_internal.clear();

        for entry in &self.regular_expressions {
            let re = Regex::new(&entry[0]).map_err(|source| ProfileError::Substitution {
                pattern: entry[0].clone(),
                source,
            })?;
            self.regex_internal.push((re, entry[1].clone()));
        }

        Ok(())
    }

    /// Apply the user substitutions and then the mandatory file name
    /// sanitization to a file stem.
    ///
    /// # Arguments
    ///
    /// * `s` - The file stem to be sanitized.
    pub fn apply(&self, s: &str) -> String {
        let mut line = s.to_string();

        for (re, sub) in &self.regex_internal {
            line = re.replace_all(&line, sub.as_str()).to_string();
        }

        for entry in &self.strings {
            if !entry[0].is_empty() {
                line = line.replace(&entry[0], &entry[1]);
            }
        }

        sanitize_file_name(&line)
    }
}

/// Replace every forbidden character with an underscore and truncate the
/// result to [`MAX_FILE_NAME_LENGTH`] characters.
///
/// # Arguments
///
/// * `name` - The file name to be sanitized.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if BAD_NTFS_CHARS.contains(&c) {
                REPLACEMENT_CHAR
            } else {
                c
            }
        })
        .take(MAX_FILE_NAME_LENGTH)
        .collect()
}
