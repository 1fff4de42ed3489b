//! Fixed-width to delimited transcoder.
//!
//! Applies a parsed [`VariableSpec`](ipums_model::VariableSpec) to the raw
//! extract, one line at a time:
//!
//! 1. Slice the record type code (hierarchical layouts only).
//! 2. Slice and trim every variable of that record type.
//! 3. Insert the decimal point for implied-decimal variables.
//! 4. Join the fields with the delimiter and write them to the record type's
//!    stream.
//!
//! The raw file is never loaded whole; gzip input is decompressed as it is
//! read.

mod options;
mod output;
mod record;
mod source;
mod transcode;
mod writer;

pub use options::{DEFAULT_PROGRESS_INTERVAL, TranscodeOptions};
pub use output::output_paths;
pub use record::{RecordLayout, insert_implied_decimal};
pub use source::open_raw_data;
pub use transcode::{
    RecordOutput, TranscodeCounts, TranscodeEvent, TranscodeSummary, Transcoder, transcode_file,
};
pub use writer::{RecordWriter, RecordWriters};
