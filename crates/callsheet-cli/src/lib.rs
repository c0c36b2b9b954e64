//! # callsheet-cli — transcript files in, analyst digests out
//!
//! Loads already-fetched transcripts from disk, runs the callsheet-core pipeline and
//! writes JSON records, per-analyst batches and a Markdown digest.

pub mod args;
pub mod input;
pub mod report;

pub use args::{print_usage, CliArgs};
pub use input::{filter_by_symbol, load_transcripts, parse_transcript_file};
pub use report::{render_digest, write_outputs, OutputPaths};
