//! Revision filename codec.
//!
//! Continuous-sync backup tools keep prior revisions of `report.txt` under
//! names like `report~20240714-183000.txt`: the creation timestamp sits
//! between a `~` separator and the original extension.

use crate::error::{CoreError, Result};
use chrono::NaiveDateTime;

/// Timestamp format embedded in revision filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Human-readable timestamp format used in the recovered-files table.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Splits a filename into base and extension (extension keeps its dot).
///
/// The split happens at the last dot, with a leading run of dots belonging
/// to the base. Plain dotfiles get the roles swapped: the platform rule
/// calls `.gitignore` a pure base, but the backup tool names its revisions
/// `~<timestamp>.gitignore`, so the whole name must act as the extension.
#[must_use]
pub fn split_base_ext(file_name: &str) -> (&str, &str) {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    let split = file_name[leading..].rfind('.').map(|i| i + leading);

    let (base, ext) = match split {
        Some(idx) => (&file_name[..idx], &file_name[idx..]),
        None => (file_name, ""),
    };

    if ext.is_empty() && base.starts_with('.') {
        ("", base)
    } else {
        (base, ext)
    }
}

/// True if `candidate` is a revision filename for the original split into
/// `base` and `ext`: it must start with `base~` and end with `ext`.
#[must_use]
pub fn is_revision_of(base: &str, ext: &str, candidate: &str) -> bool {
    candidate
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('~'))
        .is_some_and(|rest| rest.ends_with(ext))
}

/// Extracts the embedded timestamp from a revision filename.
///
/// The segment between the final `~` and the extension must match
/// [`TIMESTAMP_FORMAT`]; anything else is a `MalformedTimestamp` for this
/// one candidate.
pub fn parse_revision_timestamp(candidate: &str) -> Result<NaiveDateTime> {
    let (base, _ext) = split_base_ext(candidate);
    let segment = base.rsplit('~').next().unwrap_or(base);

    NaiveDateTime::parse_from_str(segment, TIMESTAMP_FORMAT).map_err(|_| {
        CoreError::MalformedTimestamp {
            file_name: candidate.to_string(),
            segment: segment.to_string(),
        }
    })
}
