//! Compact pre-extracted record format
//!
//! One line per accepted tweet: `<timestamp>,<tag>,<tag>[,<tag>...]` with
//! literal, distinct, sorted tag texts. `--extract` writes this format so
//! the raw JSON decode runs once; `--records` replays it into the graph.
//! Lines starting with `#` are comments and are skipped by the driver.

use std::io::{self, Write};

use crate::record::{Rejection, TweetRecord};

/// Write one record in the compact format.
pub fn write_record(out: &mut impl Write, record: &TweetRecord) -> io::Result<()> {
    write!(out, "{}", record.timestamp)?;
    for tag in &record.tags {
        write!(out, ",{tag}")?;
    }
    writeln!(out)
}

/// Parse one compact-format line back into a record.
///
/// The first field must be an integer timestamp; the remaining fields are
/// tag texts, de-duplicated and sorted on the way in so a hand-written line
/// behaves exactly like an extracted one.
pub fn parse_record(line: &str) -> Result<TweetRecord, Rejection> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split(',');

    let timestamp = fields
        .next()
        .and_then(|field| field.trim().parse::<i64>().ok())
        .ok_or_else(|| Rejection::MalformedJson(format!("bad record line: {line:?}")))?;

    let distinct: std::collections::BTreeSet<String> = fields
        .filter(|field| !field.is_empty())
        .map(|field| field.to_string())
        .collect();

    if distinct.len() < 2 {
        return Err(Rejection::InsufficientHashtags);
    }

    Ok(TweetRecord {
        timestamp,
        tags: distinct.into_iter().collect(),
    })
}
