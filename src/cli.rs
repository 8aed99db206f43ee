//! CLI argument parsing for taggraph

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "taggraph")]
#[command(version)]
#[command(
    about = "Rolling average vertex degree of a hashtag co-occurrence graph",
    long_about = None
)]
pub struct Cli {
    /// Sliding window length in seconds
    #[arg(value_name = "WINDOW")]
    pub window: i64,

    /// Read the compact pre-extracted record format instead of raw tweet JSON
    #[arg(long = "records")]
    pub records: bool,

    /// Emit compact records for accepted tweets instead of the statistic
    #[arg(long = "extract", conflicts_with = "records")]
    pub extract: bool,

    /// Enable verbose diagnostics on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
