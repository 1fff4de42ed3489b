//! Tab-delimited label lookup files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ipums_model::{Result, ValueLabel, VariableSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sanitize::sanitize_label;

/// Counts from writing value labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabelCounts {
    pub records_read: u64,
    pub records_written: u64,
    /// Labels of alpha variables; the lookup table is keyed by integer values.
    pub skipped_alpha: u64,
    /// Labels naming a variable the layout never declared.
    pub skipped_undeclared: u64,
}

/// Result of [`save_variable_labels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelWriteSummary {
    pub path: PathBuf,
    pub records_written: u64,
}

/// Result of [`save_value_labels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabelWriteSummary {
    pub path: PathBuf,
    pub counts: ValueLabelCounts,
}

/// Write `name<TAB>label` for every variable, in declaration order.
/// Unlabelled variables get an empty label.
pub fn write_variable_labels<W: Write>(spec: &VariableSpec, writer: &mut W) -> io::Result<u64> {
    let mut written = 0u64;
    for variable in spec.variables() {
        let label = variable.label.as_deref().unwrap_or_default();
        writeln!(writer, "{}\t{}", variable.name, sanitize_label(label))?;
        written += 1;
    }
    Ok(written)
}

/// Write `variable<TAB>value<TAB>label` for every label of a declared,
/// non-alpha variable, in declaration order.
pub fn write_value_labels<W: Write>(
    spec: &VariableSpec,
    labels: &[ValueLabel],
    writer: &mut W,
) -> io::Result<ValueLabelCounts> {
    let mut counts = ValueLabelCounts::default();
    for label in labels {
        counts.records_read += 1;
        match spec.variable(&label.variable) {
            None => {
                counts.skipped_undeclared += 1;
                debug!(variable = %label.variable, "value label for undeclared variable skipped");
            }
            Some(variable) if variable.is_alpha() => counts.skipped_alpha += 1,
            Some(_) => {
                writeln!(
                    writer,
                    "{}\t{}\t{}",
                    label.variable,
                    label.value,
                    sanitize_label(&label.label)
                )?;
                counts.records_written += 1;
            }
        }
    }
    Ok(counts)
}

/// Write the variable label file at `path`.
pub fn save_variable_labels(spec: &VariableSpec, path: &Path) -> Result<LabelWriteSummary> {
    let mut writer = BufWriter::new(File::create(path)?);
    let records_written = write_variable_labels(spec, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), records_written, "variable labels written");
    Ok(LabelWriteSummary {
        path: path.to_path_buf(),
        records_written,
    })
}

/// Write the value label file at `path`.
pub fn save_value_labels(
    spec: &VariableSpec,
    labels: &[ValueLabel],
    path: &Path,
) -> Result<ValueLabelWriteSummary> {
    let mut writer = BufWriter::new(File::create(path)?);
    let counts = write_value_labels(spec, labels, &mut writer)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        records_read = counts.records_read,
        records_written = counts.records_written,
        "value labels written"
    );
    Ok(ValueLabelWriteSummary {
        path: path.to_path_buf(),
        counts,
    })
}
