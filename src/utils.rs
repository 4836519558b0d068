use std::{fmt::Display, path::Path};

/// Convert a boolean value to yes or no.
///
/// # Arguments
///
/// * `b` - The boolean value to be converted.
#[inline]
pub fn bool_to_yes_no(b: bool) -> String {
    (if b { "yes" } else { "no" }).to_string()
}

/// Return a boolean value indicating whether a given directory exists.
///
/// # Arguments
///
/// * `path` - The path to the directory.
#[inline]
pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Return a boolean value indicating whether a given file exists.
///
/// # Arguments
///
/// * `path` - The path to the file.
#[inline]
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Return a boolean value indicating whether the current process may write
/// into a given directory.
///
/// # Arguments
///
/// * `path` - The path to the directory.
pub fn dir_is_writable<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !path.is_dir() {
        return false;
    }

    // The scratch file is removed as soon as it is dropped.
    tempfile::tempfile_in(path).is_ok()
}

/// Return "s" when a count needs a plural noun.
#[inline]
pub fn plural(count: usize) -> &'static str {
    if count != 1 { "s" } else { "" }
}

struct DurationUnit<'a> {
    amount: u64,
    unit: &'a str,
}

impl<'a> DurationUnit<'a> {
    pub fn new(amount: u64, unit: &'a str) -> Self {
        Self { amount, unit }
    }
}

impl Display for DurationUnit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)?;
        if self.amount != 1 {
            // 0 seconds, 2 seconds, but 1 second.
            write!(f, "s")?;
        }
        Ok(())
    }
}

const SECONDS_IN_MINUTE: u64 = 60;
const SECONDS_IN_HOUR: u64 = SECONDS_IN_MINUTE * 60;
const SECONDS_IN_DAY: u64 = SECONDS_IN_HOUR * 24;

/// Convert a duration (in seconds) into days, hours, minutes and seconds.
///
/// # Arguments
///
/// * `seconds` - The duration, in seconds.
pub fn format_duration(seconds: u64) -> String {
    let mut units = vec![];

    let mut seconds = seconds;

    if seconds >= SECONDS_IN_DAY {
        let d = seconds / SECONDS_IN_DAY;
        seconds -= d * SECONDS_IN_DAY;

        units.push(DurationUnit::new(d, "day"));
    }

    if seconds >= SECONDS_IN_HOUR {
        let h = seconds / SECONDS_IN_HOUR;
        seconds -= h * SECONDS_IN_HOUR;

        units.push(DurationUnit::new(h, "hour"));
    }

    if seconds >= SECONDS_IN_MINUTE {
        let m = seconds / SECONDS_IN_MINUTE;
        seconds -= m * SECONDS_IN_MINUTE;

        units.push(DurationUnit::new(m, "minute"));
    }

    if seconds > 0 || units.is_empty() {
        units.push(DurationUnit::new(seconds, "second"));
    }

    let mut formatted = String::new();
    let is_single = units.len() == 1;
    let last = units.len() - 1;
    for (i, unit) in units.into_iter().enumerate() {
        if i == last && !is_single {
            formatted.push_str("and ");
        }

        formatted.push_str(&format!("{unit}"));

        if i < last {
            formatted.push_str(", ");
        }
    }

    formatted
}

/// Get the lowercase extension of a given file path.
///
/// # Arguments
///
/// * `fp` - The path to the file.
#[inline]
pub fn get_file_extension<P: AsRef<Path>>(fp: P) -> Option<String> {
    fp.as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
