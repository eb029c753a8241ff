use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use senti_core::{ScorerKind, SentimentAnalyzer, SentimentLabel};
use senti_server::{ServerConfig, build_scorer, serve};

#[derive(Parser)]
#[command(name = "senti")]
#[command(about = "Label text as Positive, Negative or Neutral", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Scoring engine (lexicon or watsonx)
        #[arg(short, long)]
        scorer: Option<ScorerKind>,

        /// Persist feedback to this JSON file
        #[arg(long)]
        feedback_file: Option<PathBuf>,
    },
    /// Label a single text and exit
    Analyze {
        /// Text to analyse
        text: String,

        /// Scoring engine (lexicon or watsonx)
        #[arg(short, long, default_value = "lexicon")]
        scorer: ScorerKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            scorer,
            feedback_file,
        } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(scorer) = scorer {
                config = config.with_scorer(scorer);
            }
            if let Some(path) = feedback_file {
                config = config.with_feedback_file(path);
            }

            serve(config).await
        }
        Commands::Analyze { text, scorer } => analyze_once(&text, scorer).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn analyze_once(text: &str, scorer: ScorerKind) -> Result<()> {
    let analyzer = SentimentAnalyzer::new(build_scorer(scorer).await?);
    let analysis = analyzer.analyze_text(text).await?;

    let label = match analysis.sentiment {
        SentimentLabel::Positive => analysis.sentiment.as_str().green(),
        SentimentLabel::Negative => analysis.sentiment.as_str().red(),
        SentimentLabel::Neutral => analysis.sentiment.as_str().dimmed(),
    };

    println!("{} {}", "→".green(), label.bold());
    println!("  {} {}", "polarity:".dimmed(), analysis.polarity);
    println!("  {} {}", "scorer:".dimmed(), analyzer.scorer_name());

    Ok(())
}
