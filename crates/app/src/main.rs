mod config;
mod terminal;

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_core::Clock;
use services::{QuizEvent, QuizLoop};

use crate::config::{Args, QuizConfig};
use crate::terminal::Terminal;

fn init_tracing(default_directive: &str) {
    // stderr keeps logs out of the quiz transcript on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = QuizConfig::from_args(&args)?;
    info!(
        countries = config.catalog.len(),
        filter = %config.filter,
        seeded = config.seed.is_some(),
        "starting geoquiz"
    );

    let mut quiz = QuizLoop::new(config.catalog, Clock::system()).with_filter(config.filter);
    if let Some(seed) = config.seed {
        quiz = quiz.with_seed(seed);
    }
    if config.skip_welcome {
        quiz.dispatch(QuizEvent::Continue);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Terminal::new(stdin.lock(), stdout.lock(), config.json).run(&mut quiz)?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
