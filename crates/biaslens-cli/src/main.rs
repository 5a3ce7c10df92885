//! BiasLens CLI
//!
//! Analyze text for biased language from the command line. Text comes from
//! a positional argument, a file, or stdin; output is either the rendered
//! report or the full JSON result.

use anyhow::{Context, Result};
use biaslens_engine::{BiasDetector, DetectionConfig};
use clap::Parser;
use std::io::Read;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "biaslens")]
#[command(about = "Multi-signal bias detection for text", long_about = None)]
struct Cli {
    /// Text to analyze; omit to read from --file or stdin
    text: Option<String>,

    /// Read the text to analyze from a file
    #[arg(short, long)]
    file: Option<String>,

    /// Detection configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,

    /// Emit the full result as JSON instead of the report
    #[arg(short, long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => DetectionConfig::from_file(path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => DetectionConfig::default(),
    };

    let text = read_input(&cli)?;

    let detector = BiasDetector::builder().with_config(config).build()?;
    info!("detector ready");

    if cli.json {
        let response = detector.detect_response(&text).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        if response["success"] == false {
            std::process::exit(1);
        }
    } else {
        let result = detector.detect(&text).await?;
        println!("{}", result.detailed_report);
        if !result.flags.is_empty() {
            eprintln!(
                "bias score {:.1} from {} flag(s)",
                result.bias_score,
                result.flags.len()
            );
        }
    }

    Ok(())
}

/// Resolve the input text: positional argument, then --file, then stdin
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input from {path}"));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read input from stdin")?;
    Ok(buffer)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("biaslens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("biaslens=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
