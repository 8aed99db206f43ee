use std::io;

use anyhow::Result;
use clap::Parser;
use taggraph::{cli::Cli, graph::WindowedGraph, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the stderr diagnostics channel.
///
/// Defaults to WARN so bad input lines are always reported; `--debug`
/// raises the level to TRACE and `RUST_LOG` overrides both. The statistic
/// stream on stdout is never interleaved with diagnostics.
fn init_tracing(debug: bool) {
    let default_level = if debug { "trace" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.window <= 0 {
        anyhow::bail!(
            "Invalid value for WINDOW: {} (must be a positive number of seconds)",
            args.window
        );
    }

    init_tracing(args.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();

    let stats = if args.extract {
        pipeline::run_extract(stdin.lock(), stdout.lock())?
    } else {
        let mode = if args.records {
            pipeline::InputMode::Records
        } else {
            pipeline::InputMode::Json
        };
        let mut graph = WindowedGraph::new(args.window);
        pipeline::run_averages(stdin.lock(), stdout.lock(), &mut graph, mode)?
    };

    info!(
        lines = stats.lines,
        accepted = stats.accepted,
        emitted = stats.emitted,
        malformed = stats.malformed,
        not_tweet = stats.not_tweet,
        bad_timestamp = stats.bad_timestamp,
        too_few_tags = stats.too_few_tags,
        "run complete"
    );

    Ok(())
}
