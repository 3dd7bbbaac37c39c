//! AviSynth script materialization for image-sequence input
//!
//! NVEncC cannot read a bare list of stills, so an image sequence is
//! turned into a small `.avs` script describing a virtual clip. The
//! script lives in a temp directory only for the duration of the encode.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{NvvfrError, Result};

/// Image extensions probed for sequence playback, in priority order
const SEQUENCE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// A materialized AviSynth script, removed from disk on drop
///
/// Dropping the guard deletes the script whether the encode succeeded
/// or not.
#[derive(Debug)]
pub struct AvsScript {
    path: PathBuf,
}

impl AvsScript {
    /// Render and write the script for an image sequence
    ///
    /// The script is written UTF-8 as `<prefix>_input.avs` inside `dir`.
    pub fn materialize(
        dir: impl Into<PathBuf>,
        prefix: &str,
        images: &[PathBuf],
        frame_rate: f64,
    ) -> Result<Self> {
        let dir = dir.into();
        let content = render(images, frame_rate)?;
        let path = dir.join(format!("{}_input.avs", prefix));

        fs::create_dir_all(&dir)?;
        fs::write(&path, &content)?;
        debug!("Generated AVS script: {}", path.display());

        Ok(Self { path })
    }

    /// Path to the script file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for AvsScript {
    fn drop(&mut self) {
        if self.path.exists() {
            match fs::remove_file(&self.path) {
                Ok(()) => debug!("Cleaned up AVS script: {}", self.path.display()),
                Err(e) => warn!("Failed to remove AVS script {}: {}", self.path.display(), e),
            }
        }
    }
}

/// Render script content for a list of images
///
/// A single image becomes one `ImageSource`. For multiple images the
/// first image's directory is scanned for a numbered sequence to play
/// via `ImageSource(end=...)`; when no sequence is found each listed
/// image is interleaved individually.
pub fn render(images: &[PathBuf], frame_rate: f64) -> Result<String> {
    let first = images
        .first()
        .ok_or_else(|| NvvfrError::script("Image list is empty"))?;

    if images.len() == 1 {
        return Ok(format!(
            "ImageSource(\"{}\", fps={})\n",
            first.display(),
            fps_literal(frame_rate)
        ));
    }

    let dir = match first.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => Path::new("."),
    };

    let sequence = scan_sequence(dir);
    if !sequence.is_empty() {
        return Ok(format!(
            "ImageSource(\"{}\", end={}, fps={})\n",
            sequence[0].display(),
            sequence.len(),
            fps_literal(frame_rate)
        ));
    }

    Ok(render_interleave(images, frame_rate))
}

/// Frame rate as an AviSynth float literal
///
/// Integral rates keep a trailing `.0` so the script always reads as a
/// float parameter.
fn fps_literal(frame_rate: f64) -> String {
    if frame_rate.fract() == 0.0 {
        format!("{:.1}", frame_rate)
    } else {
        format!("{}", frame_rate)
    }
}

/// Find a same-extension image sequence in a directory
///
/// Tries each supported extension in priority order and returns the
/// sorted matches for the first extension that has any.
fn scan_sequence(dir: &Path) -> Vec<PathBuf> {
    for ext in SEQUENCE_EXTENSIONS {
        let mut matches: Vec<PathBuf> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case(ext))
                        .unwrap_or(false)
                })
                .collect(),
            Err(_) => return Vec::new(),
        };

        if !matches.is_empty() {
            matches.sort();
            return matches;
        }
    }
    Vec::new()
}

/// Fallback: one `ImageSource` per image, interleaved
fn render_interleave(images: &[PathBuf], frame_rate: f64) -> String {
    let mut content = String::from("Interleave(\n");
    for (i, image) in images.iter().enumerate() {
        content.push_str(&format!(
            "  ImageSource(\"{}\", fps={})",
            image.display(),
            fps_literal(frame_rate)
        ));
        if i < images.len() - 1 {
            content.push_str(",\n");
        } else {
            content.push('\n');
        }
    }
    content.push_str(")\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_image() {
        let content = render(&[PathBuf::from("/tmp/frame.png")], 30.0).unwrap();
        assert_eq!(content, "ImageSource(\"/tmp/frame.png\", fps=30.0)\n");
    }

    #[test]
    fn test_fps_literal_forms() {
        assert_eq!(fps_literal(30.0), "30.0");
        assert_eq!(fps_literal(24.0), "24.0");
        assert_eq!(fps_literal(23.976), "23.976");
        assert_eq!(fps_literal(59.94), "59.94");
    }

    #[test]
    fn test_render_empty_list_is_error() {
        assert!(render(&[], 30.0).is_err());
    }

    #[test]
    fn test_render_interleave_shape() {
        let images = vec![PathBuf::from("/x/a.tif"), PathBuf::from("/x/b.tif")];
        let content = render_interleave(&images, 24.0);
        assert!(content.starts_with("Interleave(\n"));
        assert!(content.contains("ImageSource(\"/x/a.tif\", fps=24.0),\n"));
        assert!(content.contains("ImageSource(\"/x/b.tif\", fps=24.0)\n"));
        assert!(content.ends_with(")\n"));
    }
}
