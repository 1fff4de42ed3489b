//! Streaming transcode loop.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use ipums_model::{ExtractError, FLAT_RECORD_TYPE, Result, VariableSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::options::TranscodeOptions;
use crate::output::output_paths;
use crate::record::RecordLayout;
use crate::source::open_raw_data;
use crate::writer::RecordWriters;

/// Events reported while a transcode runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeEvent {
    /// Emitted every `progress_interval` records.
    Progress { records_read: u64 },
    /// Emitted once after the last record has been written and flushed.
    Finished { records_read: u64 },
}

/// Counts from an in-memory run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeCounts {
    pub records_read: u64,
    /// Records written per record type, in the layout's record type order.
    pub records_written: Vec<(String, u64)>,
}

impl TranscodeCounts {
    pub fn written(&self, record_type: &str) -> u64 {
        self.records_written
            .iter()
            .find(|(code, _)| code == record_type)
            .map_or(0, |(_, count)| *count)
    }
}

/// One output file of a file-to-file run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutput {
    pub record_type: String,
    pub path: PathBuf,
    pub records_written: u64,
}

/// Result of [`transcode_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeSummary {
    pub data_file: PathBuf,
    pub records_read: u64,
    pub outputs: Vec<RecordOutput>,
}

impl TranscodeSummary {
    pub fn total_written(&self) -> u64 {
        self.outputs.iter().map(|output| output.records_written).sum()
    }
}

/// Applies a [`VariableSpec`] to fixed-width lines.
#[derive(Debug, Clone)]
pub struct Transcoder<'a> {
    spec: &'a VariableSpec,
    options: TranscodeOptions,
    layouts: Vec<RecordLayout<'a>>,
}

impl<'a> Transcoder<'a> {
    pub fn new(spec: &'a VariableSpec, options: TranscodeOptions) -> Self {
        Self {
            spec,
            options,
            layouts: RecordLayout::for_spec(spec),
        }
    }

    /// Layout for the record type of `line`.
    pub fn layout_for(&self, record: u64, line: &str) -> Result<&RecordLayout<'a>> {
        let code = match self.spec.record_type_column() {
            None => FLAT_RECORD_TYPE,
            Some(columns) => columns
                .slice(line)
                .ok_or_else(|| {
                    ExtractError::data_format(
                        record,
                        "record type",
                        format!(
                            "line is {} bytes long but the record type spans columns {columns}",
                            line.len()
                        ),
                    )
                })?
                .trim(),
        };
        self.layouts
            .iter()
            .find(|layout| layout.record_type == code)
            .ok_or_else(|| ExtractError::UnknownRecordType {
                record,
                record_type: code.to_string(),
            })
    }

    /// Reformat one raw line into `out` (cleared first) and return its
    /// record type.
    pub fn format_record(&self, record: u64, line: &str, out: &mut String) -> Result<&'a str> {
        out.clear();
        let layout = self.layout_for(record, line)?;
        layout.format_into(record, line, self.options.delimiter, out)?;
        Ok(layout.record_type)
    }

    /// Transcode every line of `reader` into `writers`.
    ///
    /// Lines are read lazily; with a row cap no line past the cap is read.
    pub fn run<R, W, F>(
        &self,
        reader: R,
        writers: &mut RecordWriters<W>,
        mut on_event: F,
    ) -> Result<TranscodeCounts>
    where
        R: BufRead,
        W: Write,
        F: FnMut(TranscodeEvent),
    {
        let limit = self.options.row_limit();
        let interval = self.options.progress_interval;
        let mut records_read = 0u64;
        let mut buffer = String::new();
        let mut lines = reader.lines();

        while limit.is_none_or(|max| records_read < max) {
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            records_read += 1;
            let record_type = self.format_record(records_read, &line, &mut buffer)?;
            writers.write_line(record_type, &buffer)?;
            if interval > 0 && records_read % interval == 0 {
                debug!(records_read, "records processed");
                on_event(TranscodeEvent::Progress { records_read });
            }
        }
        writers.flush_all()?;
        on_event(TranscodeEvent::Finished { records_read });

        Ok(TranscodeCounts {
            records_read,
            records_written: writers.counts(),
        })
    }
}

/// Transcode a raw data file into one delimited file per record type.
///
/// Output files are created up front and closed when this function returns.
/// On error the files written so far are left in place and must not be
/// loaded.
pub fn transcode_file<F>(
    spec: &VariableSpec,
    data_file: &Path,
    output: &Path,
    options: TranscodeOptions,
    on_event: F,
) -> Result<TranscodeSummary>
where
    F: FnMut(TranscodeEvent),
{
    let span = info_span!("transcode", data_file = %data_file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let paths = output_paths(spec, output)?;
    let reader = open_raw_data(data_file)?;
    let mut writers = RecordWriters::new();
    for (code, path) in &paths {
        writers.insert(code.clone(), BufWriter::new(File::create(path)?));
    }

    let transcoder = Transcoder::new(spec, options);
    let counts = match transcoder.run(reader, &mut writers, on_event) {
        Ok(counts) => counts,
        Err(error) => {
            warn!(
                outputs = paths.len(),
                %error,
                "transcode aborted; partial output files are not valid"
            );
            return Err(error);
        }
    };
    drop(writers);

    let outputs: Vec<RecordOutput> = paths
        .into_iter()
        .map(|(record_type, path)| RecordOutput {
            records_written: counts.written(&record_type),
            record_type,
            path,
        })
        .collect();
    for output in &outputs {
        info!(
            record_type = %output.record_type,
            path = %output.path.display(),
            records_written = output.records_written,
            "records written"
        );
    }
    info!(
        records_read = counts.records_read,
        duration_ms = start.elapsed().as_millis(),
        "transcode complete"
    );

    Ok(TranscodeSummary {
        data_file: data_file.to_path_buf(),
        records_read: counts.records_read,
        outputs,
    })
}
