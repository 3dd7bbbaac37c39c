//! Configuration file loading and saving
//!
//! Loads user configuration from `~/.config/nvvfr/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{NvvfrError, Result};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings
    #[serde(default)]
    pub defaults: DefaultSettings,

    /// Processing settings
    #[serde(default)]
    pub processing: ProcessingSettings,

    /// Paths to external tools and directories
    #[serde(default)]
    pub paths: PathSettings,
}

/// Default encode settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Default output filename prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Default codec (h264, h265)
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Default quality preset (high, medium, low)
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Default output depth (8bit, 10bit)
    #[serde(default = "default_depth")]
    pub depth: String,
}

/// Upscaling and frame interpolation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Default output width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Default output height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Enable super-resolution by default
    #[serde(default = "default_true")]
    pub superres: bool,

    /// Super-resolution strength (0.0 - 1.0)
    #[serde(default = "default_strength")]
    pub superres_strength: f32,

    /// Enable frame-rate doubling by default
    #[serde(default)]
    pub double_frame: bool,
}

/// External tool and directory paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Explicit path to the NVEncC binary (empty = search PATH)
    #[serde(default)]
    pub nvencc: Option<PathBuf>,

    /// Default output directory (empty = current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_prefix() -> String {
    "nvvfr".to_string()
}

fn default_codec() -> String {
    "h265".to_string()
}

fn default_quality() -> String {
    "high".to_string()
}

fn default_depth() -> String {
    "10bit".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_strength() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            codec: default_codec(),
            quality: default_quality(),
            depth: default_depth(),
        }
    }
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            superres: true,
            superres_strength: default_strength(),
            double_frame: false,
        }
    }
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("nvvfr").join("config.toml")
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("nvvfr")
                .join("config.toml")
        } else {
            PathBuf::from("/etc/nvvfr/config.toml")
        }
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| NvvfrError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| NvvfrError::Config(format!("Failed to parse config file: {}", e)))?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, logging a warning but returning defaults on error
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    NvvfrError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NvvfrError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, content)
            .map_err(|e| NvvfrError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Write the commented sample configuration to a path
///
/// Creates missing parent directories, like [`ConfigFile::save_to`].
pub fn write_sample(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NvvfrError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
    }

    std::fs::write(path, sample_config())
        .map_err(|e| NvvfrError::Config(format!("Failed to write config file: {}", e)))?;

    info!("Wrote sample configuration to {:?}", path);
    Ok(())
}

/// Generate a sample configuration file
pub fn sample_config() -> String {
    r#"# NVVFR Configuration

[defaults]
# Output filename prefix (files are named <prefix>_00001.mp4, ...)
prefix = "nvvfr"

# Video codec: h264, h265
codec = "h265"

# Quality preset: high, medium, low
quality = "high"

# Output bit depth: 8bit, 10bit (10bit requires h265)
depth = "10bit"

[processing]
# Output resolution in pixels (64 - 8192)
width = 1920
height = 1080

# Enable NVVFX super-resolution upscaling
superres = true

# Super-resolution strength (0.0 - 1.0)
superres_strength = 1.0

# Double the frame rate with NVIDIA FRUC interpolation
double_frame = false

[paths]
# Explicit path to the NVEncC binary (omit to search NVVFR_NVENCC and PATH)
# nvencc = "/opt/nvencc/NVEncC64"

# Default output directory (omit to use the current directory)
# output_dir = "/home/user/videos"
"#
    .to_string()
}
