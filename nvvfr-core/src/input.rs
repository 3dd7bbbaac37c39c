//! Input sources for an encode job
//!
//! An encode reads either a video file handed straight to NVEncC, or an
//! image sequence that first gets materialized into an AviSynth script.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{NvvfrError, Result};

/// Frame rate bounds for image-sequence input
pub const MIN_FRAME_RATE: f64 = 1.0;
pub const MAX_FRAME_RATE: f64 = 120.0;

/// Kind of input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A single video file
    Video,
    /// A sequence of still images played at a fixed rate
    Images,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Video => write!(f, "Video"),
            SourceKind::Images => write!(f, "Images"),
        }
    }
}

/// What to encode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSource {
    /// A video file passed to NVEncC as-is
    Video {
        /// Path to the video file
        path: PathBuf,
    },
    /// An image sequence synthesized into a script-driven virtual clip
    Images {
        /// Paths to the image files, in playback order
        paths: Vec<PathBuf>,
        /// Source frame rate the images play back at
        frame_rate: f64,
    },
}

impl InputSource {
    /// Create a video input source
    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self::Video { path: path.into() }
    }

    /// Create an image-sequence input source
    pub fn images(paths: Vec<PathBuf>, frame_rate: f64) -> Self {
        Self::Images { paths, frame_rate }
    }

    /// Resolve a source from optional video path and image list inputs
    ///
    /// The image list takes priority when both are given. The list is
    /// comma-separated; entries are trimmed and empties dropped.
    pub fn resolve(video: Option<&str>, image_list: Option<&str>, frame_rate: f64) -> Result<Self> {
        let image_list = image_list.filter(|s| !s.trim().is_empty());
        let video = video.filter(|s| !s.trim().is_empty());

        if let Some(list) = image_list {
            let paths: Vec<PathBuf> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();

            if paths.is_empty() {
                return Err(NvvfrError::input(
                    "Image list must contain at least one valid image path",
                ));
            }

            return Ok(Self::images(paths, frame_rate));
        }

        if let Some(path) = video {
            return Ok(Self::video(path));
        }

        Err(NvvfrError::input(
            "Either a video path or an image list must be provided",
        ))
    }

    /// Get the source kind
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Video { .. } => SourceKind::Video,
            Self::Images { .. } => SourceKind::Images,
        }
    }

    /// Validate that every referenced file exists and rates are sane
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Video { path } => {
                if !path.exists() {
                    return Err(NvvfrError::file_not_found(format!(
                        "Input video file not found: {}",
                        path.display()
                    )));
                }
            }
            Self::Images { paths, frame_rate } => {
                if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(frame_rate) {
                    return Err(NvvfrError::input(format!(
                        "Frame rate {} is outside {} - {}",
                        frame_rate, MIN_FRAME_RATE, MAX_FRAME_RATE
                    )));
                }
                for path in paths {
                    if !path.exists() {
                        return Err(NvvfrError::file_not_found(format!(
                            "Image file not found: {}",
                            path.display()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video { path } => write!(f, "Video({})", path.display()),
            Self::Images { paths, frame_rate } => {
                write!(f, "Images({} files @ {} fps)", paths.len(), frame_rate)
            }
        }
    }
}
