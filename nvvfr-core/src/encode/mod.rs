//! NVEncC invocation
//!
//! Locates the NVEncC binary, translates an [`EncodeConfig`] and input
//! source into the flat argument list NVEncC expects, and runs one
//! blocking encode per call.

use std::env;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::EncodeConfig;
use crate::error::{NvvfrError, Result, ResultExt};
use crate::input::InputSource;
use crate::output::next_output_path;
use crate::script::AvsScript;

/// Environment variable overriding NVEncC discovery
pub const NVENCC_ENV: &str = "NVVFR_NVENCC";

/// Binary names probed on PATH, in priority order
const BINARY_NAMES: [&str; 2] = ["NVEncC64", "NVEncC"];

/// Input handed to NVEncC on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderInput<'a> {
    /// A video file (`-i`)
    Video(&'a Path),
    /// A materialized AviSynth script (`--avs`)
    Script(&'a Path),
}

/// A fully resolved invocation, ready to spawn or print
#[derive(Debug, Clone)]
pub struct EncodePlan {
    /// Arguments passed to the binary, in order
    pub args: Vec<String>,
    /// Output file the encode will produce
    pub output: PathBuf,
}

/// Locate the NVEncC binary
///
/// Resolution order: explicit path, `NVVFR_NVENCC`, then a PATH scan
/// for `NVEncC64`/`NVEncC` (with `.exe` variants).
pub fn locate_nvencc(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(NvvfrError::BinaryNotFound(format!(
            "configured path does not exist: {}",
            path.display()
        )));
    }

    if let Ok(path) = env::var(NVENCC_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        return Err(NvvfrError::BinaryNotFound(format!(
            "{} points to a missing file: {}",
            NVENCC_ENV,
            path.display()
        )));
    }

    if let Some(path) = search_path() {
        return Ok(path);
    }

    Err(NvvfrError::BinaryNotFound(format!(
        "no {} on PATH (set {} or [paths].nvencc in the config file)",
        BINARY_NAMES.join("/"),
        NVENCC_ENV
    )))
}

/// Scan PATH directories for a known NVEncC binary name
fn search_path() -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        for name in BINARY_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            let candidate = dir.join(format!("{}.exe", name));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Build the NVEncC argument list for one encode
///
/// Flag order mirrors how NVEncC documents its options: codec, preset,
/// resolution, depth, filters, then input and output.
pub fn build_args(config: &EncodeConfig, input: EncoderInput<'_>, output: &Path) -> Vec<String> {
    let mut args = Vec::new();

    args.push("-c".to_string());
    args.push(config.codec.nvencc_name().to_string());

    args.push("-u".to_string());
    args.push(config.quality.nvencc_preset().to_string());

    args.push("--output-res".to_string());
    args.push(config.resolution());

    args.push("--output-depth".to_string());
    args.push(config.effective_depth().nvencc_depth().to_string());

    if config.superres {
        args.push("--vpp-resize".to_string());
        args.push(format!(
            "algo=nvvfx-superres,superres-mode=1,superres-strength={}",
            config.superres_strength
        ));
    }

    if config.double_frame {
        args.push("--vpp-fruc".to_string());
        args.push("double".to_string());
    }

    match input {
        EncoderInput::Script(path) => {
            args.push("--avs".to_string());
            args.push(path.display().to_string());
        }
        EncoderInput::Video(path) => {
            args.push("-i".to_string());
            args.push(path.display().to_string());
        }
    }

    args.push("--output".to_string());
    args.push(output.display().to_string());

    args
}

/// Handle to a located NVEncC binary
#[derive(Debug, Clone)]
pub struct Encoder {
    binary: PathBuf,
    temp_dir: PathBuf,
}

impl Encoder {
    /// Create an encoder for an already located binary
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            temp_dir: env::temp_dir(),
        }
    }

    /// Locate the binary and create an encoder
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let binary = locate_nvencc(explicit)?;
        info!("Using NVEncC binary: {}", binary.display());
        Ok(Self::new(binary))
    }

    /// Override the directory temporary scripts are written to
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Path to the NVEncC binary
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Resolve the invocation for a source without touching the disk
    ///
    /// Image input is planned against the script path that
    /// [`encode`](Self::encode) would materialize.
    pub fn plan(&self, config: &EncodeConfig, source: &InputSource) -> Result<EncodePlan> {
        let output = next_output_path(&config.output_dir, &config.prefix)?;
        let args = match source {
            InputSource::Video { path } => {
                build_args(config, EncoderInput::Video(path), &output)
            }
            InputSource::Images { .. } => {
                let script = self.script_path(&config.prefix);
                build_args(config, EncoderInput::Script(&script), &output)
            }
        };
        Ok(EncodePlan { args, output })
    }

    /// Run one encode to completion and return the output path
    ///
    /// Validates config and source, materializes the AviSynth script for
    /// image input (removed again when this function returns), computes
    /// the next free output filename, and blocks on NVEncC.
    pub async fn encode(&self, config: &EncodeConfig, source: &InputSource) -> Result<PathBuf> {
        config
            .validate_strict()
            .map_err(NvvfrError::config)?;
        source.validate()?;

        for warning in config.validate() {
            warn!("{}", warning);
        }

        let output = next_output_path(&config.output_dir, &config.prefix)
            .context("computing output filename")?;

        // Guard lives until the encode finishes, success or not
        let (args, _script) = match source {
            InputSource::Video { path } => {
                (build_args(config, EncoderInput::Video(path), &output), None)
            }
            InputSource::Images { paths, frame_rate } => {
                let script =
                    AvsScript::materialize(&self.temp_dir, &config.prefix, paths, *frame_rate)
                        .context("materializing AviSynth script")?;
                let args = build_args(config, EncoderInput::Script(script.path()), &output);
                (args, Some(script))
            }
        };

        self.run(&args).await?;

        info!("Encode complete: {}", output.display());
        Ok(output)
    }

    /// Spawn NVEncC with the given arguments and wait for it to exit
    pub async fn run(&self, args: &[String]) -> Result<()> {
        debug!("Executing: {} {}", self.binary.display(), args.join(" "));

        let result = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                NvvfrError::encoder(format!("Failed to spawn {}: {}", self.binary.display(), e))
            })?;

        if !result.status.success() {
            let code = result.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(NvvfrError::EncodeFailed { code, stderr });
        }

        Ok(())
    }

    /// Query the binary's version banner
    pub fn version(&self) -> Result<String> {
        probe(&self.binary, "--version")
    }

    /// Query the binary's hardware support report
    pub fn check_hw(&self) -> Result<String> {
        probe(&self.binary, "--check-hw")
    }

    fn script_path(&self, prefix: &str) -> PathBuf {
        self.temp_dir.join(format!("{}_input.avs", prefix))
    }
}

/// Whether an NVEncC binary resolves at all
pub fn nvencc_available(explicit: Option<&Path>) -> bool {
    locate_nvencc(explicit).is_ok()
}

/// Run a quick informational flag against the binary
fn probe(binary: &Path, flag: &str) -> Result<String> {
    let output = std::process::Command::new(binary)
        .arg(flag)
        .output()
        .map_err(|e| {
            NvvfrError::encoder(format!("Failed to run {} {}: {}", binary.display(), flag, e))
        })?;

    // NVEncC prints informational output on stdout but some builds use
    // stderr for the version banner
    let text = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    };

    if text.is_empty() {
        return Err(NvvfrError::encoder(format!(
            "{} {} produced no output",
            binary.display(),
            flag
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BitDepth, Codec, Quality};

    fn base_config() -> EncodeConfig {
        EncodeConfig::new("/out").with_prefix("clip")
    }

    #[test]
    fn test_build_args_defaults() {
        let config = base_config();
        let args = build_args(
            &config,
            EncoderInput::Video(Path::new("/in/clip.mp4")),
            Path::new("/out/clip_00001.mp4"),
        );
        assert_eq!(
            args,
            vec![
                "-c",
                "hevc",
                "-u",
                "P7",
                "--output-res",
                "1920x1080",
                "--output-depth",
                "10",
                "--vpp-resize",
                "algo=nvvfx-superres,superres-mode=1,superres-strength=1",
                "-i",
                "/in/clip.mp4",
                "--output",
                "/out/clip_00001.mp4",
            ]
        );
    }

    #[test]
    fn test_build_args_h264_forces_8bit() {
        let config = base_config()
            .with_codec(Codec::H264)
            .with_depth(BitDepth::Ten)
            .with_superres(false);
        let args = build_args(
            &config,
            EncoderInput::Video(Path::new("/in/clip.mp4")),
            Path::new("/out/clip_00001.mp4"),
        );
        let depth_pos = args.iter().position(|a| a == "--output-depth").unwrap();
        assert_eq!(args[depth_pos + 1], "8");
        assert_eq!(args[1], "h264");
        assert!(!args.contains(&"--vpp-resize".to_string()));
    }

    #[test]
    fn test_build_args_fruc_and_script() {
        let config = base_config()
            .with_quality(Quality::Low)
            .with_double_frame(true);
        let args = build_args(
            &config,
            EncoderInput::Script(Path::new("/tmp/clip_input.avs")),
            Path::new("/out/clip_00002.mp4"),
        );
        assert!(args.windows(2).any(|w| w == ["-u", "P1"]));
        assert!(args.windows(2).any(|w| w == ["--vpp-fruc", "double"]));
        assert!(args.windows(2).any(|w| w == ["--avs", "/tmp/clip_input.avs"]));
        assert!(!args.contains(&"-i".to_string()));
    }

    #[test]
    fn test_build_args_superres_strength() {
        let config = base_config().with_superres_strength(0.5);
        let args = build_args(
            &config,
            EncoderInput::Video(Path::new("/in/clip.mp4")),
            Path::new("/out/clip_00001.mp4"),
        );
        assert!(args.contains(
            &"algo=nvvfx-superres,superres-mode=1,superres-strength=0.5".to_string()
        ));
    }

    #[test]
    fn test_locate_explicit_missing() {
        let err = locate_nvencc(Some(Path::new("/definitely/not/here/NVEncC64")));
        assert!(matches!(err, Err(NvvfrError::BinaryNotFound(_))));
    }
}
