//! Parser for SPSS syntax files that describe fixed-width census extracts.
//!
//! Only the commands used by extract layouts are recognized:
//!
//! - `data list` and `file type mixed` / `record type` / `end file type`
//! - `variable labels`
//! - `value labels`
//!
//! Every other command is skipped. Lines inside a recognized block must match
//! that block's grammar exactly; a mismatch is reported as
//! [`ExtractError::MalformedSyntax`](ipums_model::ExtractError) with the line
//! number.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! let spec = ipums_syntax::read_layout(Path::new("usa_00001.sps")).unwrap();
//! let labels = ipums_syntax::read_value_labels(Path::new("usa_00001.sps")).unwrap();
//! println!("{} variables, {} value labels", spec.len(), labels.len());
//! ```

pub mod grammar;
pub mod layout;
pub mod value_labels;

use std::fs;
use std::path::Path;

use ipums_model::{Result, ValueLabel, VariableSpec};
use tracing::info;

pub use layout::{LayoutParser, LayoutState, parse_declaration, parse_layout};
pub use value_labels::{ValueLabelParser, ValueLabelState, parse_value_labels};

/// Read a syntax file and parse its layout and variable labels.
pub fn read_layout(path: &Path) -> Result<VariableSpec> {
    let text = fs::read_to_string(path)?;
    let spec = parse_layout(&text)?;
    info!(
        path = %path.display(),
        variables = spec.len(),
        record_types = spec.record_types().len(),
        "layout loaded"
    );
    Ok(spec)
}

/// Read a syntax file and parse its value labels.
pub fn read_value_labels(path: &Path) -> Result<Vec<ValueLabel>> {
    let text = fs::read_to_string(path)?;
    let labels = parse_value_labels(&text)?;
    info!(path = %path.display(), labels = labels.len(), "value labels loaded");
    Ok(labels)
}
