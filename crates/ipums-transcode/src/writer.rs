//! One output stream per record type.

use std::io::{self, Write};

use ipums_model::{ExtractError, Result, VariableSpec};

/// Output stream for one record type.
#[derive(Debug)]
pub struct RecordWriter<W> {
    pub record_type: String,
    pub writer: W,
    pub written: u64,
}

/// Output streams keyed by record type, in the layout's record type order.
#[derive(Debug)]
pub struct RecordWriters<W> {
    writers: Vec<RecordWriter<W>>,
}

impl<W> Default for RecordWriters<W> {
    fn default() -> Self {
        Self {
            writers: Vec::new(),
        }
    }
}

impl<W: Write> RecordWriters<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open one writer per record type of `spec`.
    pub fn for_spec<F>(spec: &VariableSpec, mut open: F) -> io::Result<Self>
    where
        F: FnMut(&str) -> io::Result<W>,
    {
        let mut writers = Self::new();
        for code in spec.record_types() {
            let writer = open(code)?;
            writers.insert(code.clone(), writer);
        }
        Ok(writers)
    }

    /// Register a writer; replaces any writer already registered for the code.
    pub fn insert(&mut self, record_type: impl Into<String>, writer: W) {
        let record_type = record_type.into();
        self.writers.retain(|existing| existing.record_type != record_type);
        self.writers.push(RecordWriter {
            record_type,
            writer,
            written: 0,
        });
    }

    /// Write one line (a newline is appended) to the stream of `record_type`.
    pub fn write_line(&mut self, record_type: &str, line: &str) -> Result<()> {
        let entry = self
            .writers
            .iter_mut()
            .find(|entry| entry.record_type == record_type)
            .ok_or_else(|| {
                ExtractError::usage(format!("no output stream for record type {record_type}"))
            })?;
        entry.writer.write_all(line.as_bytes())?;
        entry.writer.write_all(b"\n")?;
        entry.written += 1;
        Ok(())
    }

    pub fn flush_all(&mut self) -> io::Result<()> {
        for entry in &mut self.writers {
            entry.writer.flush()?;
        }
        Ok(())
    }

    /// Records written per record type.
    pub fn counts(&self) -> Vec<(String, u64)> {
        self.writers
            .iter()
            .map(|entry| (entry.record_type.clone(), entry.written))
            .collect()
    }

    pub fn into_inner(self) -> Vec<RecordWriter<W>> {
        self.writers
    }
}
