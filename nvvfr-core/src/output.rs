//! Output filename bookkeeping
//!
//! Output files are numbered `<prefix>_00001.mp4`, `<prefix>_00002.mp4`
//! and so on. The next free number comes from scanning the output
//! directory for the highest existing numeric suffix under the prefix.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{NvvfrError, Result};

/// Width of the zero-padded counter in output filenames
const COUNTER_WIDTH: usize = 5;

/// Compute the next non-colliding output path for a prefix
///
/// The directory is created when missing. Files are matched against
/// `<prefix>_(\d+)<non-digits>.<ext>` case-insensitively, so both
/// `clip_00004.mp4` and `clip_00004_final.mkv` reserve number 4.
pub fn next_output_path(output_dir: &Path, prefix: &str) -> Result<PathBuf> {
    let counter = highest_counter(output_dir, prefix)? + 1;
    let filename = format!("{}_{:0width$}.mp4", prefix, counter, width = COUNTER_WIDTH);
    debug!(
        "Next output file under {}: {}",
        output_dir.display(),
        filename
    );
    Ok(output_dir.join(filename))
}

/// Highest numeric suffix already taken under a prefix (0 when none)
pub fn highest_counter(output_dir: &Path, prefix: &str) -> Result<u64> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
        return Ok(0);
    }

    let matcher = filename_matcher(prefix)?;
    let mut max_counter = 0u64;

    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(caps) = matcher.captures(name) {
            // Counters longer than u64 are not ours to collide with
            if let Ok(counter) = caps[1].parse::<u64>() {
                max_counter = max_counter.max(counter);
            }
        }
    }

    Ok(max_counter)
}

/// Build the case-insensitive full-name matcher for a prefix
fn filename_matcher(prefix: &str) -> Result<Regex> {
    let pattern = format!(r"(?i)^{}_(\d+)\D*\..+$", regex::escape(prefix));
    Regex::new(&pattern)
        .map_err(|e| NvvfrError::encoder(format!("Invalid output prefix pattern: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_accepts_expected_names() {
        let m = filename_matcher("clip").unwrap();
        assert!(m.is_match("clip_00001.mp4"));
        assert!(m.is_match("CLIP_00007.MP4"));
        assert!(m.is_match("clip_12_preview.mkv"));
        assert!(!m.is_match("clip_00001"));
        assert!(!m.is_match("other_00001.mp4"));
        assert!(!m.is_match("clip-00001.mp4"));
    }

    #[test]
    fn test_matcher_escapes_prefix() {
        // A prefix containing regex metacharacters must match literally
        let m = filename_matcher("a.b+c").unwrap();
        assert!(m.is_match("a.b+c_00001.mp4"));
        assert!(!m.is_match("aXb+c_00001.mp4"));
    }
}
