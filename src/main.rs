//! `hlsconv` CLI - Adjust hue, lightness and saturation of images.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hlsconv::{Config, Pipeline};

/// Adjust images in HLS (hue, lightness, saturation) space.
#[derive(Parser, Debug)]
#[command(name = "hlsconv")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image path.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Hue rotation in degrees.
    #[arg(long, default_value = "0.0", value_name = "DEG", allow_negative_numbers = true)]
    hue: f32,

    /// Lightness multiplier (0.0-10.0).
    #[arg(short, long, default_value = "1.0", value_name = "FLOAT")]
    lightness: f32,

    /// Saturation multiplier (0.0-10.0).
    #[arg(short, long, default_value = "1.0", value_name = "FLOAT")]
    saturation: f32,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "95", value_name = "INT")]
    quality: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hlsconv={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = Config {
        hue_shift_degrees: args.hue,
        lightness_scale: args.lightness,
        saturation_scale: args.saturation,
        output_quality: args.quality,
    };

    let pipeline = Pipeline::new(config).context("Failed to initialize pipeline")?;

    pipeline
        .process(&args.input, &args.output)
        .context("Failed to process image")?;

    println!(
        "Successfully processed {} -> {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_hue() {
        let args =
            Args::try_parse_from(["hlsconv", "a.png", "b.png", "--hue", "-90", "-s", "0.5"])
                .unwrap();
        assert_eq!(args.hue, -90.0);
        assert_eq!(args.saturation, 0.5);
        assert_eq!(args.lightness, 1.0);
        assert_eq!(args.quality, 95);
    }
}
