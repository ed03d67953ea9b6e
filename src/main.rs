use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use driftnet::config::Config;
use driftnet::scorer::onnx::OnnxUrlScorer;
use driftnet::scorer::traits::UrlScorer;
use driftnet::verdict::{assess, Verdict};

/// Driftnet: local phishing URL detection.
///
/// Scores URLs for phishing likelihood with a fine-tuned BERT classifier
/// running locally via ONNX Runtime — no API calls, nothing leaves the
/// machine.
#[derive(Parser)]
#[command(name = "driftnet", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single URL
    Score {
        /// The URL to score (e.g. https://example.com/login)
        url: String,

        /// Print the verdict as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score URLs from a file, one per line (use - for stdin)
    Batch {
        /// Path to the URL list, or - to read stdin
        path: String,

        /// Print the verdicts as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Extract URLs from a text file and score each one
    ScanText {
        /// Path to the text file to scan
        path: String,
    },

    /// Download the ONNX phishing model (~1.3 GB)
    DownloadModel,

    /// Show model status (artifact presence, sizes, location)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("driftnet=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { url, json } => {
            let config = Config::load()?;
            config.require_model()?;

            let scorer = OnnxUrlScorer::load(&config.model_dir)?;
            let score = scorer.score_url(&url).await?;
            let verdict = assess(&url, score);

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                driftnet::output::terminal::display_verdict(&verdict);
            }
        }

        Commands::Batch { path, json } => {
            let config = Config::load()?;
            config.require_model()?;

            let urls = read_url_lines(&path)?;
            if urls.is_empty() {
                println!("No URLs to score in {path}.");
                return Ok(());
            }

            info!(count = urls.len(), "scoring batch");
            let scorer = OnnxUrlScorer::load(&config.model_dir)?;
            let verdicts = score_and_rank(&scorer, &urls).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&verdicts)?);
            } else {
                driftnet::output::terminal::display_verdict_list(&verdicts);
            }
        }

        Commands::ScanText { path } => {
            let config = Config::load()?;
            config.require_model()?;

            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {path}"))?;
            let urls = driftnet::extract::extract_urls(&text);

            if urls.is_empty() {
                println!("No URLs found in {path}.");
                return Ok(());
            }

            println!("Found {} URLs, scoring...", urls.len());
            let scorer = OnnxUrlScorer::load(&config.model_dir)?;
            let verdicts = score_and_rank(&scorer, &urls).await?;
            driftnet::output::terminal::display_verdict_list(&verdicts);
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading ONNX phishing model...");
            println!("  Destination: {}", config.model_dir.display());

            driftnet::scorer::download::download_model(&config.model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `driftnet score <url>`.");
        }

        Commands::Status => {
            let config = Config::load()?;
            driftnet::status::show(&config.model_dir)?;
        }
    }

    Ok(())
}

/// Read a URL list: one per line, blank lines and #-comments skipped.
/// `-` reads stdin, for piping.
fn read_url_lines(path: &str) -> Result<Vec<String>> {
    let content = if path == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Score a URL list in one batch and rank the verdicts, worst first.
async fn score_and_rank(scorer: &OnnxUrlScorer, urls: &[String]) -> Result<Vec<Verdict>> {
    let scores = scorer.score_many(urls).await?;

    let mut verdicts: Vec<Verdict> = scores
        .iter()
        .map(|(url, &score)| assess(url, score))
        .collect();
    verdicts.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(verdicts)
}
