//! Config command - inspect and create the configuration file

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use nvvfr_core::config::{ConfigFile, sample_config, write_sample};
use nvvfr_core::encode::NVENCC_ENV;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the path to the config file
    Path,

    /// Show the effective configuration (file values merged with defaults)
    Show,

    /// Generate a default config file
    Init {
        /// Force overwrite if file exists
        #[arg(short, long)]
        force: bool,
    },

    /// Print a sample configuration to stdout
    Sample,
}

/// Run config subcommand
pub async fn config(args: ConfigArgs) -> Result<()> {
    let path = ConfigFile::default_path();

    match args.command {
        ConfigCommand::Path => {
            println!("{}", path.display());
            if !path.exists() {
                println!("(not created yet - run `nvvfr config init`)");
            }
        }
        ConfigCommand::Show => {
            let file = if path.exists() {
                println!("Configuration file: {}\n", path.display());
                ConfigFile::load_from(path).context("Failed to load config file")?
            } else {
                println!("No configuration file; showing built-in defaults.\n");
                ConfigFile::default()
            };
            print_effective(&file);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }

            write_sample(&path).context("Failed to write config file")?;

            println!("Created configuration file: {}", path.display());
        }
        ConfigCommand::Sample => {
            print!("{}", sample_config());
        }
    }

    Ok(())
}

/// Render the settings an encode would start from
fn print_effective(file: &ConfigFile) {
    println!("Defaults:");
    println!("  Prefix:      {}", file.defaults.prefix);
    println!("  Codec:       {}", file.defaults.codec);
    println!("  Quality:     {}", file.defaults.quality);
    println!("  Depth:       {}", file.defaults.depth);
    println!();
    println!("Processing:");
    println!(
        "  Resolution:  {}x{}",
        file.processing.width, file.processing.height
    );
    println!(
        "  Superres:    {}",
        if file.processing.superres {
            format!("on (strength {})", file.processing.superres_strength)
        } else {
            "off".to_string()
        }
    );
    println!(
        "  Frame x2:    {}",
        if file.processing.double_frame {
            "on"
        } else {
            "off"
        }
    );
    println!();
    println!("Paths:");
    match &file.paths.nvencc {
        Some(nvencc) => println!("  NVEncC:      {}", nvencc.display()),
        None => println!("  NVEncC:      (search {} and PATH)", NVENCC_ENV),
    }
    match &file.paths.output_dir {
        Some(dir) => println!("  Output dir:  {}", dir.display()),
        None => println!("  Output dir:  (current directory)"),
    }
}
