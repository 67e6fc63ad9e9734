//! Lectern CLI — the main entry point.
//!
//! Commands:
//! - `serve`       — Start the HTTP gateway
//! - `ask`         — Answer a single question from the terminal
//! - `quiz`        — Generate a practice quiz from a lecture
//! - `transcripts` — List available lecture files
//! - `doctor`      — Diagnose configuration health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "lectern",
    about = "Lectern — course assistant service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single question against the course materials
    Ask {
        /// Topic mode: syllabus, essay, midterm, or final
        #[arg(short, long)]
        mode: String,

        /// The question to answer
        question: String,
    },

    /// Generate a practice quiz from a lecture file
    Quiz {
        /// Lecture filename (e.g. lecture3.txt)
        transcript: String,
    },

    /// List available lecture files
    Transcripts,

    /// Diagnose configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { mode, question } => commands::ask::run(mode, question).await?,
        Commands::Quiz { transcript } => commands::quiz::run(transcript).await?,
        Commands::Transcripts => commands::transcripts::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
