//! Configuration types for NVVFR
//!
//! Provides codec, quality, and encode-job configuration.

mod file;

pub use file::{ConfigFile, sample_config, write_sample};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolution bounds accepted by the encoder
pub const MIN_DIMENSION: u32 = 64;
pub const MAX_DIMENSION: u32 = 8192;

/// Video codec for encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// H.264 / AVC (most compatible, 8-bit only)
    H264,
    /// H.265 / HEVC (better compression, 10-bit capable)
    #[default]
    Hevc,
}

impl Codec {
    /// Get the NVEncC codec name (`-c` argument)
    pub fn nvencc_name(&self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::Hevc => "hevc",
        }
    }

    /// Get the codec name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::H264 => "H.264",
            Self::Hevc => "HEVC",
        }
    }

    /// Whether this codec can encode 10-bit output
    pub fn supports_10bit(&self) -> bool {
        matches!(self, Self::Hevc)
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h264" | "avc" | "264" => Ok(Self::H264),
            "h265" | "hevc" | "265" => Ok(Self::Hevc),
            _ => Err(format!("Unknown codec: {}", s)),
        }
    }
}

/// Encoder quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Best quality, slowest encoding
    #[default]
    High,
    /// Balanced encoding
    Medium,
    /// Fast encoding, lower quality
    Low,
}

impl Quality {
    /// Get the NVEncC preset name (`-u` argument)
    pub fn nvencc_preset(&self) -> &'static str {
        match self {
            Self::High => "P7",
            Self::Medium => "P4",
            Self::Low => "P1",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown quality: {}", s)),
        }
    }
}

/// Output bit depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BitDepth {
    /// 8-bit output
    #[serde(rename = "8bit")]
    Eight,
    /// 10-bit output (HEVC only)
    #[default]
    #[serde(rename = "10bit")]
    Ten,
}

impl BitDepth {
    /// Get the NVEncC depth value (`--output-depth` argument)
    pub fn nvencc_depth(&self) -> &'static str {
        match self {
            Self::Eight => "8",
            Self::Ten => "10",
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eight => write!(f, "8bit"),
            Self::Ten => write!(f, "10bit"),
        }
    }
}

impl std::str::FromStr for BitDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "8" | "8bit" => Ok(Self::Eight),
            "10" | "10bit" => Ok(Self::Ten),
            _ => Err(format!("Unknown bit depth: {}", s)),
        }
    }
}

/// Complete configuration for one encode job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Output filename prefix
    pub prefix: String,
    /// Directory to place the output file in
    pub output_dir: PathBuf,
    /// Video codec
    pub codec: Codec,
    /// Encoder quality preset
    pub quality: Quality,
    /// Output bit depth
    pub depth: BitDepth,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Enable NVVFX super-resolution upscaling
    pub superres: bool,
    /// Super-resolution strength (0.0 - 1.0)
    pub superres_strength: f32,
    /// Enable frame-rate doubling via FRUC
    pub double_frame: bool,
}

fn default_prefix() -> String {
    "nvvfr".to_string()
}

impl EncodeConfig {
    /// Create a config writing into the given output directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: default_prefix(),
            output_dir: output_dir.into(),
            codec: Codec::default(),
            quality: Quality::default(),
            depth: BitDepth::default(),
            width: 1920,
            height: 1080,
            superres: true,
            superres_strength: 1.0,
            double_frame: false,
        }
    }

    /// Set the output filename prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the codec
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Set the quality preset
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the output bit depth
    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the output resolution
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable super-resolution
    pub fn with_superres(mut self, enabled: bool) -> Self {
        self.superres = enabled;
        self
    }

    /// Set the super-resolution strength
    pub fn with_superres_strength(mut self, strength: f32) -> Self {
        self.superres_strength = strength;
        self
    }

    /// Enable or disable frame-rate doubling
    pub fn with_double_frame(mut self, enabled: bool) -> Self {
        self.double_frame = enabled;
        self
    }

    /// Output resolution as an NVEncC `WxH` string
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Effective bit depth after codec compatibility is applied
    ///
    /// H.264 cannot carry 10-bit output, so a 10-bit request is
    /// downgraded to 8-bit for that codec.
    pub fn effective_depth(&self) -> BitDepth {
        if self.depth == BitDepth::Ten && !self.codec.supports_10bit() {
            BitDepth::Eight
        } else {
            self.depth
        }
    }

    /// Whether the requested depth had to be downgraded for the codec
    pub fn depth_downgraded(&self) -> bool {
        self.effective_depth() != self.depth
    }

    /// Validate the configuration and return any warnings
    ///
    /// Returns a list of warning messages for settings that will still
    /// encode but not the way the user asked for.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.depth_downgraded() {
            warnings.push(
                "H.264 does not support 10-bit output. Forcing 8-bit depth.".to_string(),
            );
        }

        if self.superres && !self.superres_strength.is_finite() {
            warnings.push("Super-resolution strength is not a finite number.".to_string());
        }

        warnings
    }

    /// Validate and return an error if the configuration cannot work
    pub fn validate_strict(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("Output prefix cannot be empty".to_string());
        }

        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(format!(
                "Resolution {}x{} is below the minimum supported ({}x{})",
                self.width, self.height, MIN_DIMENSION, MIN_DIMENSION
            ));
        }

        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(format!(
                "Resolution {}x{} exceeds maximum supported ({}x{})",
                self.width, self.height, MAX_DIMENSION, MAX_DIMENSION
            ));
        }

        if self.superres && !(0.0..=1.0).contains(&self.superres_strength) {
            return Err(format!(
                "Super-resolution strength {} is outside 0.0..=1.0",
                self.superres_strength
            ));
        }

        Ok(())
    }
}
