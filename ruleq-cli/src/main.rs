//! A thin example binary wrapping [`ruleq`]: reads a rule and a JSON
//! context file, evaluates the rule, and prints the boolean result.
//!
//! Deliberately minimal — the CLI is explicitly out of scope for the
//! engine itself (spec §1, §6 "No wire protocol, no file format, no
//! environment variables, no CLI"). It exists only to give the library a
//! runnable demonstration, not a supported interface.

mod context_json;
mod error;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{CliError, Result};
use ruleq::Engine;

/// Evaluate a ruleq predicate against a JSON context file.
#[derive(Parser, Debug)]
#[command(name = "ruleq-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate a ruleq predicate rule against a JSON context", long_about = None)]
struct Cli {
    /// The rule text, e.g. `user.age ge 18 and user.status eq "active"`.
    rule: String,

    /// Path to a JSON file holding the evaluation context.
    #[arg(short, long)]
    context: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        tracing::error!(%err, "evaluation failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let raw = std::fs::read_to_string(&cli.context).map_err(|source| CliError::ReadContext {
        path: cli.context.clone(),
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| CliError::ParseContext { source })?;
    let ctx = context_json::context_from_json(&json)?;

    let engine = Engine::new();
    let result = engine
        .evaluate(&cli.rule, &ctx)
        .map_err(|source| CliError::Compile { source })?;

    tracing::debug!(rule = %cli.rule, result, "evaluated");
    println!("{result}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
