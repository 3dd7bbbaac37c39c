//! NVVFR CLI
//!
//! NVEncC-powered video super-resolution, frame doubling, and encoding.
//!
//! # Usage
//!
//! ```bash
//! # Upscale and encode a video to the next free nvvfr_NNNNN.mp4
//! nvvfr encode -i input.mp4
//!
//! # Encode an image sequence at 24 fps with doubled frame rate
//! nvvfr encode --images "a.png,b.png,c.png" --frame-rate 24 --double-frame
//!
//! # Show NVEncC availability and hardware support
//! nvvfr info
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// NVVFR - GPU video upscaling and frame doubling via NVEncC
#[derive(Parser)]
#[command(name = "nvvfr")]
#[command(version)]
#[command(about = "GPU video upscaling, frame doubling, and encoding via NVEncC", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a video or image sequence to MP4
    #[command(alias = "enc")]
    Encode(commands::EncodeArgs),

    /// Show NVEncC binary and hardware information
    Info(commands::InfoArgs),

    /// Manage the configuration file
    Config(commands::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("nvvfr={}", level).parse().unwrap()),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Encode(args) => commands::encode(args).await?,
        Commands::Info(args) => commands::info(args).await?,
        Commands::Config(args) => commands::config(args).await?,
    }

    Ok(())
}
