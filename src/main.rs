use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use research_options::parser::{parse_and_enrich, split_paragraphs};

#[derive(Parser)]
#[command(name = "research-options")]
#[command(about = "Parse generated research-direction text into scored options", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a research-options response and print the enriched options
    Parse {
        /// File holding the generated text
        file: PathBuf,

        /// The user's courses, used for match-score estimation
        #[arg(long, default_value = "")]
        courses: String,

        /// The user's extracurricular experience
        #[arg(long, default_value = "")]
        extracurricular: String,
    },

    /// Split a composition into five paragraphs
    Paragraphs {
        /// File holding the generated text
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "research_options=info".into())
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, courses, extracurricular } => {
            let text = read_input(&file)?;
            match parse_and_enrich(&text, &courses, &extracurricular) {
                Ok(options) => println!("{}", serde_json::to_string_pretty(&options)?),
                Err(e) => {
                    eprintln!("could not interpret the generated content: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Paragraphs { file } => {
            let text = read_input(&file)?;
            let paragraphs = split_paragraphs(&text);
            println!("{}", serde_json::to_string_pretty(&paragraphs)?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    debug!("Reading generated text from {:?}", path);
    std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
}
