//! docqr entrypoint

use anyhow::Context;
use clap::Parser;
use docqr::{DocqrConfig, EccLevel, Generator, QrPayload, logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docqr",
    version,
    about = "Write a QR code image for a documentation link"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to docqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// String to encode
    #[arg(long, value_name = "TEXT")]
    target: Option<String>,

    /// Destination image; the extension selects the format (png, jpg, bmp, svg, ...)
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pixels per module
    #[arg(long, short, value_name = "N")]
    scale: Option<u32>,

    /// Minimum error correction level (l, m, q, h)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<EccLevel>,

    /// Keep the requested error correction level instead of raising it
    #[arg(long)]
    no_boost: bool,

    /// Omit the quiet zone border
    #[arg(long)]
    no_quiet_zone: bool,

    /// Decode the written image and check it matches the target
    #[arg(long)]
    verify: bool,

    /// Print the generation report as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DocqrConfig::load(cli.config.as_deref())?;
    let options = &mut config.generator;

    if let Some(target) = cli.target {
        options.target = target;
    }
    if let Some(output) = cli.output {
        options.output = output;
    }
    if let Some(scale) = cli.scale {
        options.scale = scale;
    }
    if let Some(ecc) = cli.ecc {
        options.ecc = ecc;
    }
    if cli.no_boost {
        options.boost_error = false;
    }
    if cli.no_quiet_zone {
        options.quiet_zone = false;
    }
    if cli.verify {
        options.verify = true;
    }

    logging::init(&config.logging)?;
    if let Some(path) = &cli.config {
        tracing::info!("Using configuration file: {}", path.display());
    }

    let options = &config.generator;
    tracing::debug!(?options, "Generating QR image");

    let report = Generator::new()
        .with_encoder(options.encoder())
        .verify(options.verify)
        .generate(
            &QrPayload::from_string(options.target.clone()),
            &options.descriptor(),
        )
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.human_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
