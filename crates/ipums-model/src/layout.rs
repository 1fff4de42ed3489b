use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lookup::VariableIndex;

/// Record type code used when the extract is not hierarchical.
pub const FLAT_RECORD_TYPE: &str = "0";

/// Inclusive, 1-based column bounds within a fixed-width line.
///
/// Always `1 <= start <= end`; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawColumnRange")]
pub struct ColumnRange {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawColumnRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawColumnRange> for ColumnRange {
    type Error = String;

    fn try_from(raw: RawColumnRange) -> std::result::Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
            .ok_or_else(|| format!("invalid column range {}-{}", raw.start, raw.end))
    }
}

impl ColumnRange {
    /// Returns `None` unless `1 <= start <= end`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start >= 1 && start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of columns covered by the range.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Slice the columns out of a raw line. Returns `None` when the line is
    /// shorter than `end` or the bounds split a multi-byte character.
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.get(self.start - 1..self.end)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// How the columns of a variable are interpreted.
///
/// Alpha and implied decimals are mutually exclusive, so they share one enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableFormat {
    /// Integer digits with no fractional part.
    #[default]
    Numeric,
    /// Free text; written verbatim.
    Alpha,
    /// Numeric value whose trailing digits are the fractional part.
    ImpliedDecimals(u32),
}

/// One variable declared in a `data list` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub columns: ColumnRange,
    /// Owning record type; `None` for flat layouts.
    pub record_type: Option<String>,
    pub label: Option<String>,
    pub format: VariableFormat,
}

impl Variable {
    pub fn new(name: impl Into<String>, columns: ColumnRange) -> Self {
        Self {
            name: name.into(),
            columns,
            record_type: None,
            label: None,
            format: VariableFormat::Numeric,
        }
    }

    #[must_use]
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: VariableFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_alpha(&self) -> bool {
        matches!(self.format, VariableFormat::Alpha)
    }

    pub fn implied_decimals(&self) -> Option<u32> {
        match self.format {
            VariableFormat::ImpliedDecimals(digits) => Some(digits),
            _ => None,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.width()
    }
}

/// Layout metadata parsed from a syntax file.
///
/// Built once per run and read-only afterwards. Variable order is the
/// declaration order and drives both column order in the DDL and field order
/// in the transcoded output.
#[derive(Debug, Clone, Serialize)]
pub struct VariableSpec {
    record_type_column: Option<ColumnRange>,
    record_types: Vec<String>,
    variables: Vec<Variable>,
    #[serde(skip)]
    index: VariableIndex,
}

impl VariableSpec {
    /// Assemble a layout.
    ///
    /// When `record_types` is empty the placeholder [`FLAT_RECORD_TYPE`] is
    /// registered, so flat and hierarchical layouts can be handled uniformly.
    /// Duplicate record type codes are collapsed, keeping first-seen order.
    pub fn new(
        record_type_column: Option<ColumnRange>,
        record_types: Vec<String>,
        variables: Vec<Variable>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(record_types.len().max(1));
        for code in record_types {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        if unique.is_empty() {
            unique.push(FLAT_RECORD_TYPE.to_string());
        }
        let index = VariableIndex::new(variables.iter().map(|variable| variable.name.as_str()));
        Self {
            record_type_column,
            record_types: unique,
            variables,
            index,
        }
    }

    /// True when the layout declares several record types behind a
    /// discriminator column.
    pub fn is_hierarchical(&self) -> bool {
        self.record_type_column.is_some()
    }

    pub fn record_type_column(&self) -> Option<ColumnRange> {
        self.record_type_column
    }

    /// Record type codes in declaration order.
    pub fn record_types(&self) -> &[String] {
        &self.record_types
    }

    pub fn has_record_type(&self, code: &str) -> bool {
        self.record_types.iter().any(|known| known == code)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Variables belonging to `record_type`, in declaration order. For flat
    /// layouts every variable is returned regardless of the code.
    pub fn variables_for<'a>(&'a self, record_type: &'a str) -> impl Iterator<Item = &'a Variable> {
        let hierarchical = self.is_hierarchical();
        self.variables.iter().filter(move |variable| {
            !hierarchical || variable.record_type.as_deref() == Some(record_type)
        })
    }

    /// First declared variable with the given name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index
            .position(name)
            .and_then(|position| self.variables.get(position))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
