//! biasquiz CLI — a terminal front end for the cognitive bias quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "biasquiz", version, about = "Cognitive bias true/false quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz in the terminal
    Play {
        /// Claim file tried before the configured locations
        #[arg(long)]
        data: Option<PathBuf>,

        /// Maximum number of claims (default: 10)
        #[arg(long)]
        limit: Option<usize>,

        /// Results format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a claim file for problems
    Validate {
        /// Path to a biases.json file
        #[arg(long)]
        data: PathBuf,
    },

    /// Create a sample biases.json in the current directory
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("biasquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            data,
            limit,
            format,
            config,
        } => commands::play::execute(data, limit, format, config),
        Commands::Validate { data } => commands::validate::execute(data),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
