use serde::{Deserialize, Serialize};

/// Default number of records between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Options for a transcode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeOptions {
    /// Stop after this many records. `None` or `Some(0)` reads everything.
    pub max_rows: Option<u64>,

    /// Emit a progress event every N records. Zero disables progress events.
    pub progress_interval: u64,

    /// Field separator in the output.
    pub delimiter: char,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_rows: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            delimiter: '\t',
        }
    }
}

impl TranscodeOptions {
    /// Cap the number of records read.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: Option<u64>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Set the progress event interval.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Effective row cap; a cap of zero means unbounded.
    pub fn row_limit(&self) -> Option<u64> {
        self.max_rows.filter(|max| *max > 0)
    }
}
