use clap::Parser;
use screenloc::image::io::load_gray_image;
use screenloc::{match_all, set_threads, MatchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "screenloc CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    threshold: f64,
    max_count: usize,
    threads: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            threshold: 0.8,
            max_count: 10,
            threads: 0,
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: i32,
    y: i32,
    confidence: f64,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            x: value.x,
            y: value.y,
            confidence: value.confidence,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    best: Option<MatchRecord>,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("screenloc=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    set_threads(config.threads)?;

    let image = load_gray_image(&config.image_path)?;
    let template = load_gray_image(&config.template_path)?;

    let matches = match_all(
        image.view(),
        template.view(),
        config.threshold,
        config.max_count,
    )?;
    let best = matches.first().copied().map(MatchRecord::from);
    let matches = matches.into_iter().map(MatchRecord::from).collect();
    let output = Output { best, matches };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
