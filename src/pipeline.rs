//! Stream driver loop
//!
//! Wires the normalizer and the windowed graph together over generic
//! reader/writer pairs and applies the emission policy: structural parse
//! failures and control messages produce no output line, semantic
//! rejections emit the current (unchanged) statistic, accepted records
//! update the graph first. Bad input never aborts the run.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::graph::WindowedGraph;
use crate::record::{self, Rejection, TweetRecord};
use crate::records_io;

/// What the driver reads on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Raw tweet JSON, one object per line.
    Json,
    /// The compact pre-extracted record format.
    Records,
}

/// Per-run counters, reported on the diagnostics channel at EOF.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Input lines read, including comments and blanks.
    pub lines: u64,
    /// Records that reached the graph.
    pub accepted: u64,
    /// Output lines written.
    pub emitted: u64,
    /// Lines that were not well-formed JSON or records.
    pub malformed: u64,
    /// Well-formed non-tweet control messages.
    pub not_tweet: u64,
    /// Tweets with an unparsable `created_at`.
    pub bad_timestamp: u64,
    /// Valid tweets with fewer than two distinct hashtags.
    pub too_few_tags: u64,
}

fn decode(mode: InputMode, line: &str) -> Result<TweetRecord, Rejection> {
    match mode {
        InputMode::Json => record::normalize(line),
        InputMode::Records => records_io::parse_record(line),
    }
}

/// Feed the input stream through the graph, writing one two-decimal average
/// per emission to `output`.
pub fn run_averages(
    input: impl BufRead,
    mut output: impl Write,
    graph: &mut WindowedGraph,
    mode: InputMode,
) -> io::Result<RunStats> {
    let mut stats = RunStats::default();

    for line in input.lines() {
        let line = line?;
        stats.lines += 1;

        if mode == InputMode::Records {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
        }

        match decode(mode, &line) {
            Ok(recorded) => {
                graph.update(recorded.timestamp, &recorded.tags);
                stats.accepted += 1;
                writeln!(output, "{:.2}", graph.average_degree())?;
                stats.emitted += 1;
            }
            Err(Rejection::InsufficientHashtags) => {
                // No graph mutation, but the statistic is still due.
                stats.too_few_tags += 1;
                debug!("fewer than two distinct hashtags, graph unchanged");
                writeln!(output, "{:.2}", graph.average_degree())?;
                stats.emitted += 1;
            }
            Err(Rejection::NotATweet) => {
                stats.not_tweet += 1;
                debug!("control message, nothing emitted");
            }
            Err(rejection @ Rejection::InvalidTimestamp(_)) => {
                stats.bad_timestamp += 1;
                warn!("{rejection}");
            }
            Err(rejection @ Rejection::MalformedJson(_)) => {
                stats.malformed += 1;
                warn!("{rejection}");
            }
        }
    }

    output.flush()?;
    Ok(stats)
}

/// Convert the raw JSON stream into the compact record format.
///
/// Accepted tweets come out one per line; every rejection is counted and
/// reported diagnostically, with no placeholder line in the output.
pub fn run_extract(input: impl BufRead, mut output: impl Write) -> io::Result<RunStats> {
    let mut stats = RunStats::default();

    for line in input.lines() {
        let line = line?;
        stats.lines += 1;

        match record::normalize(&line) {
            Ok(recorded) => {
                records_io::write_record(&mut output, &recorded)?;
                stats.accepted += 1;
                stats.emitted += 1;
            }
            Err(Rejection::InsufficientHashtags) => {
                stats.too_few_tags += 1;
                debug!("fewer than two distinct hashtags, record dropped");
            }
            Err(Rejection::NotATweet) => {
                stats.not_tweet += 1;
                debug!("control message dropped");
            }
            Err(rejection @ Rejection::InvalidTimestamp(_)) => {
                stats.bad_timestamp += 1;
                warn!("{rejection}");
            }
            Err(rejection @ Rejection::MalformedJson(_)) => {
                stats.malformed += 1;
                warn!("{rejection}");
            }
        }
    }

    output.flush()?;
    Ok(stats)
}
