mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Track {
            path,
            keywords,
            coactivate,
            pinned,
        } => commands::track::run_track(&path, &keywords, &coactivate, pinned),
        Commands::Untrack { path } => commands::track::run_untrack(&path),
        Commands::Turn { message, number } => commands::turn::run(&message, number),
        Commands::Status => commands::status::run(),
        Commands::Sessions => commands::history::run_sessions(),
        Commands::History { session, limit } => commands::history::run(session.as_deref(), limit),
        Commands::File { path } => commands::history::run_file(&path),
        Commands::Report {
            min_appearances,
            hot_ratio,
        } => commands::report::run(min_appearances, hot_ratio),
        Commands::Reset { full } => commands::reset::run(full),
        Commands::Clear { older_than_days } => commands::clear::run(older_than_days),
    }
}
