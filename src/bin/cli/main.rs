mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lexi::catalog::CefrLevel;

#[derive(Parser)]
#[command(name = "lexi-cli", about = "Vocabulary trainer with Leitner spaced repetition", version)]
struct Cli {
    /// Learner profile to track progress for
    #[arg(long, global = true, default_value = "default")]
    learner: String,

    /// Only study items of one CEFR level (A1..C2)
    #[arg(long, global = true)]
    level: Option<CefrLevel>,

    /// Path to the task bank JSON file (default: <data dir>/tasks.json)
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List items currently due for review
    Due {
        /// Maximum items to list
        #[arg(long, default_value = "20")]
        max: usize,
    },

    /// Run an interactive review session over the due batch
    Review {
        /// Maximum items per session
        #[arg(long, default_value = "20")]
        max: usize,
    },

    /// Show progress statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Due { max } => {
            let app = app::App::new(&cli.learner, cli.tasks.as_deref(), cli.level)?;
            commands::due::run(&app, max, &cli.format)?;
        }
        Command::Review { max } => {
            let mut app = app::App::new(&cli.learner, cli.tasks.as_deref(), cli.level)?;
            commands::review::run(&mut app, max)?;
        }
        Command::Stats => {
            let app = app::App::new(&cli.learner, cli.tasks.as_deref(), cli.level)?;
            commands::stats::run(&app, &cli.format)?;
        }
    }

    Ok(())
}
