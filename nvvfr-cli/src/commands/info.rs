//! Info command - show NVEncC binary and hardware information

use anyhow::Result;
use clap::Args;
use nvvfr_core::config::ConfigFile;
use nvvfr_core::encode::{Encoder, NVENCC_ENV};
use std::path::PathBuf;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Explicit path to the NVEncC binary
    #[arg(long)]
    nvencc: Option<PathBuf>,
}

/// Show NVEncC availability, version, and hardware support
pub async fn info(args: InfoArgs) -> Result<()> {
    println!("NVVFR - System Information\n");

    let file = ConfigFile::load_or_default();
    let nvencc = args.nvencc.or(file.paths.nvencc.clone());

    println!("NVEncC Binary:");
    let encoder = match Encoder::locate(nvencc.as_deref()) {
        Ok(encoder) => {
            println!("  Path: {}", encoder.binary().display());
            encoder
        }
        Err(e) => {
            println!("  Not found: {}", e);
            println!();
            println!("  Make sure you have:");
            println!("  - NVEncC installed (NVEncC64 or NVEncC on PATH)");
            println!("  - or {} pointing at the binary", NVENCC_ENV);
            println!("  - or [paths].nvencc set in the config file");
            return Ok(());
        }
    };

    println!();

    match encoder.version() {
        Ok(version) => {
            println!("Version:");
            for line in version.lines() {
                println!("  {}", line);
            }
        }
        Err(e) => println!("Version query failed: {}", e),
    }

    println!();

    match encoder.check_hw() {
        Ok(report) => {
            println!("Hardware Support:");
            for line in report.lines() {
                println!("  {}", line);
            }
        }
        Err(e) => {
            println!("Hardware check failed: {}", e);
            println!();
            println!("  An NVIDIA GPU with NVENC support and a recent driver");
            println!("  are required for encoding.");
        }
    }

    Ok(())
}
