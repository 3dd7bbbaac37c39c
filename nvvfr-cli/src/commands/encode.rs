//! Encode command - run one NVEncC encode

use anyhow::{Context, Result};
use clap::Args;
use nvvfr_core::{
    config::{BitDepth, Codec, ConfigFile, EncodeConfig, Quality},
    encode::Encoder,
    input::InputSource,
};
use std::path::PathBuf;

/// Arguments for the encode command
#[derive(Args)]
pub struct EncodeArgs {
    /// Input video file
    #[arg(short, long)]
    input: Option<String>,

    /// Comma-separated list of image files (takes priority over --input)
    #[arg(long)]
    images: Option<String>,

    /// Source frame rate for image-sequence input
    #[arg(long, default_value = "30.0")]
    frame_rate: f64,

    /// Output filename prefix
    #[arg(short, long)]
    prefix: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Video codec (h264, h265)
    #[arg(short, long)]
    codec: Option<String>,

    /// Quality preset (high, medium, low)
    #[arg(short, long)]
    quality: Option<String>,

    /// Output bit depth (8bit, 10bit)
    #[arg(short, long)]
    depth: Option<String>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Enable super-resolution upscaling (overrides the config file)
    #[arg(long, conflicts_with = "no_superres")]
    superres: bool,

    /// Disable super-resolution upscaling (overrides the config file)
    #[arg(long)]
    no_superres: bool,

    /// Super-resolution strength (0.0 - 1.0)
    #[arg(long)]
    superres_strength: Option<f32>,

    /// Double the frame rate with FRUC interpolation (overrides the config file)
    #[arg(long, conflicts_with = "no_double_frame")]
    double_frame: bool,

    /// Do not double the frame rate (overrides the config file)
    #[arg(long)]
    no_double_frame: bool,

    /// Explicit path to the NVEncC binary
    #[arg(long)]
    nvencc: Option<PathBuf>,

    /// Print the NVEncC invocation without running it
    #[arg(long)]
    dry_run: bool,
}

/// Resolve an on/off flag pair against the config-file default
///
/// An explicit flag wins; with neither given the file value stands.
fn resolve_toggle(on: bool, off: bool, file_value: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        file_value
    }
}

/// Run one encode
pub async fn encode(args: EncodeArgs) -> Result<()> {
    let file = ConfigFile::load_or_default();

    // CLI arguments override config file values
    let codec: Codec = args
        .codec
        .as_deref()
        .unwrap_or(&file.defaults.codec)
        .parse()
        .map_err(|e| anyhow::anyhow!("{}. Valid options: h264, h265", e))?;

    let quality: Quality = args
        .quality
        .as_deref()
        .unwrap_or(&file.defaults.quality)
        .parse()
        .map_err(|e| anyhow::anyhow!("{}. Valid options: high, medium, low", e))?;

    let depth: BitDepth = args
        .depth
        .as_deref()
        .unwrap_or(&file.defaults.depth)
        .parse()
        .map_err(|e| anyhow::anyhow!("{}. Valid options: 8bit, 10bit", e))?;

    let output_dir = args
        .output_dir
        .or(file.paths.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = EncodeConfig::new(output_dir)
        .with_prefix(args.prefix.unwrap_or(file.defaults.prefix))
        .with_codec(codec)
        .with_quality(quality)
        .with_depth(depth)
        .with_resolution(
            args.width.unwrap_or(file.processing.width),
            args.height.unwrap_or(file.processing.height),
        )
        .with_superres(resolve_toggle(
            args.superres,
            args.no_superres,
            file.processing.superres,
        ))
        .with_superres_strength(
            args.superres_strength
                .unwrap_or(file.processing.superres_strength),
        )
        .with_double_frame(resolve_toggle(
            args.double_frame,
            args.no_double_frame,
            file.processing.double_frame,
        ));

    config
        .validate_strict()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let source = InputSource::resolve(
        args.input.as_deref(),
        args.images.as_deref(),
        args.frame_rate,
    )
    .context("Failed to resolve input source")?;

    let nvencc = args.nvencc.or(file.paths.nvencc.clone());
    let encoder = Encoder::locate(nvencc.as_deref()).context("Failed to locate NVEncC")?;

    println!("NVVFR - Starting Encode\n");
    println!("Configuration:");
    println!("  Input:       {}", source);
    println!("  Codec:       {}", config.codec);
    println!("  Quality:     {}", config.quality);
    println!("  Resolution:  {}", config.resolution());
    println!("  Depth:       {}", config.effective_depth());
    if config.depth_downgraded() {
        println!("               (10-bit downgraded: H.264 is 8-bit only)");
    }
    println!(
        "  Superres:    {}",
        if config.superres {
            format!("on (strength {})", config.superres_strength)
        } else {
            "off".to_string()
        }
    );
    println!(
        "  Frame x2:    {}",
        if config.double_frame { "on" } else { "off" }
    );
    println!();

    if args.dry_run {
        let plan = encoder.plan(&config, &source)?;
        println!("Would run:");
        println!(
            "  {} {}",
            encoder.binary().display(),
            plan.args.join(" ")
        );
        println!();
        println!("Would write: {}", plan.output.display());
        return Ok(());
    }

    println!("Encoding (this may take a while)...\n");

    let output = encoder
        .encode(&config, &source)
        .await
        .context("Encode failed")?;

    println!("Encode complete.");
    println!("  Output: {}", output.display());

    Ok(())
}
