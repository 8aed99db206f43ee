//! Taggraph - rolling average vertex degree of a hashtag co-occurrence graph
//!
//! This library provides the core functionality for maintaining a graph of
//! hashtag co-occurrences over a trailing time window and answering its
//! average vertex degree after every update, plus the record normalization
//! and stream plumbing the `taggraph` binary is built from.

pub mod cli;
pub mod graph;
pub mod pipeline;
pub mod record;
pub mod records_io;
