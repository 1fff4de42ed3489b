//! Layout parser: `file type mixed` / `data list` / `variable labels`.
//!
//! The parser is a finite-state machine fed one line at a time. Each state
//! owns one handler and every handler returns the next state, so a single
//! transition can be exercised without building a whole syntax file.

use ipums_model::{
    ColumnRange, ExtractError, Result, Variable, VariableFormat, VariableIndex, VariableSpec,
};
use tracing::{debug, trace};

use crate::grammar::{self, Command};

/// Parser phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutState {
    /// Skipping lines until `data list` or `file type mixed`.
    Preamble,
    /// Inside `file type mixed`, waiting for the `/record` column range.
    FileTypeMixed,
    /// Hierarchical layout waiting for `record type` or `end file type`.
    AwaitRecordType,
    /// A record type was named; waiting for its `data list`.
    AwaitDataList { record_type: String },
    /// Reading variable declarations until a lone `.`.
    DataList { record_type: Option<String> },
    /// Layout complete; looking for `variable labels`.
    SeekLabels,
    /// Attaching labels until a lone `.`.
    Labels,
    /// Nothing more to read.
    Finished,
}

/// Incremental layout parser.
#[derive(Debug)]
pub struct LayoutParser {
    state: LayoutState,
    record_type_column: Option<ColumnRange>,
    record_types: Vec<String>,
    variables: Vec<Variable>,
    index: Option<VariableIndex>,
    last_line: usize,
}

impl Default for LayoutParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutParser {
    pub fn new() -> Self {
        Self {
            state: LayoutState::Preamble,
            record_type_column: None,
            record_types: Vec::new(),
            variables: Vec::new(),
            index: None,
            last_line: 0,
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == LayoutState::Finished
    }

    /// Variables declared so far.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Feed one line. `number` is the 1-based line number used in errors.
    pub fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        self.last_line = number;
        let state = std::mem::replace(&mut self.state, LayoutState::Finished);
        let next = match state {
            LayoutState::Preamble => self.on_preamble(line),
            LayoutState::FileTypeMixed => self.on_file_type_mixed(number, line)?,
            LayoutState::AwaitRecordType => self.on_await_record_type(number, line)?,
            LayoutState::AwaitDataList { record_type } => {
                self.on_await_data_list(line, record_type)
            }
            LayoutState::DataList { record_type } => {
                self.on_data_list(number, line, record_type)?
            }
            LayoutState::SeekLabels => self.on_seek_labels(line),
            LayoutState::Labels => self.on_labels(number, line)?,
            LayoutState::Finished => LayoutState::Finished,
        };
        self.state = next;
        Ok(())
    }

    /// Close the parse and build the layout.
    pub fn finish(self) -> Result<VariableSpec> {
        let at = self.last_line.max(1);
        match self.state {
            LayoutState::Preamble => {
                return Err(ExtractError::malformed_syntax(
                    at,
                    "layout declaration",
                    "end of file before `data list` or `file type mixed`",
                ));
            }
            LayoutState::FileTypeMixed => {
                return Err(ExtractError::malformed_syntax(
                    at,
                    "record column range",
                    "end of file before `/record`",
                ));
            }
            LayoutState::AwaitDataList { record_type } => {
                return Err(ExtractError::malformed_syntax(
                    at,
                    "data list",
                    format!("end of file before `data list` for record type {record_type}"),
                ));
            }
            LayoutState::DataList { .. } => {
                return Err(ExtractError::malformed_syntax(
                    at,
                    "data list",
                    "end of file before the `.` terminator",
                ));
            }
            LayoutState::AwaitRecordType
            | LayoutState::SeekLabels
            | LayoutState::Labels
            | LayoutState::Finished => {}
        }
        if self.record_type_column.is_some() && self.record_types.is_empty() {
            return Err(ExtractError::malformed_syntax(
                at,
                "record type declaration",
                "`file type mixed` declares no record types",
            ));
        }
        let spec = VariableSpec::new(self.record_type_column, self.record_types, self.variables);
        debug!(
            variables = spec.len(),
            record_types = spec.record_types().len(),
            hierarchical = spec.is_hierarchical(),
            "layout parsed"
        );
        Ok(spec)
    }

    fn on_preamble(&mut self, line: &str) -> LayoutState {
        match grammar::command(line) {
            Some(Command::DataList) => LayoutState::DataList { record_type: None },
            Some(Command::FileTypeMixed) => LayoutState::FileTypeMixed,
            _ => LayoutState::Preamble,
        }
    }

    fn on_file_type_mixed(&mut self, number: usize, line: &str) -> Result<LayoutState> {
        if !grammar::is_record_subcommand(line) {
            return Ok(LayoutState::FileTypeMixed);
        }
        let malformed = || ExtractError::malformed_syntax(number, "record column range", line);
        let (start, end) = grammar::record_columns(line).ok_or_else(malformed)?;
        let columns = column_range(start, end).ok_or_else(malformed)?;
        debug!(line = number, columns = %columns, "record type column");
        self.record_type_column = Some(columns);
        Ok(LayoutState::AwaitRecordType)
    }

    fn on_await_record_type(&mut self, number: usize, line: &str) -> Result<LayoutState> {
        match grammar::command(line) {
            Some(Command::RecordType) => {
                let code = grammar::record_type(line)
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .ok_or_else(|| {
                        ExtractError::malformed_syntax(number, "record type declaration", line)
                    })?;
                if !self.record_types.iter().any(|known| known == code) {
                    self.record_types.push(code.to_string());
                }
                debug!(line = number, record_type = code, "record type");
                Ok(LayoutState::AwaitDataList {
                    record_type: code.to_string(),
                })
            }
            Some(Command::EndFileType) => Ok(LayoutState::SeekLabels),
            _ => Ok(LayoutState::AwaitRecordType),
        }
    }

    fn on_await_data_list(&mut self, line: &str, record_type: String) -> LayoutState {
        match grammar::command(line) {
            Some(Command::DataList) => LayoutState::DataList {
                record_type: Some(record_type),
            },
            _ => LayoutState::AwaitDataList { record_type },
        }
    }

    fn on_data_list(
        &mut self,
        number: usize,
        line: &str,
        record_type: Option<String>,
    ) -> Result<LayoutState> {
        if grammar::is_terminator(line) {
            return Ok(match record_type {
                Some(_) => LayoutState::AwaitRecordType,
                None => LayoutState::SeekLabels,
            });
        }
        if grammar::is_blank(line) {
            return Ok(LayoutState::DataList { record_type });
        }
        let variable = parse_declaration(number, line, record_type.as_deref())?;
        trace!(line = number, name = %variable.name, columns = %variable.columns, "variable");
        self.variables.push(variable);
        Ok(LayoutState::DataList { record_type })
    }

    fn on_seek_labels(&mut self, line: &str) -> LayoutState {
        match grammar::command(line) {
            Some(Command::VariableLabels) => {
                self.index = Some(VariableIndex::new(
                    self.variables.iter().map(|variable| variable.name.as_str()),
                ));
                LayoutState::Labels
            }
            _ => LayoutState::SeekLabels,
        }
    }

    fn on_labels(&mut self, number: usize, line: &str) -> Result<LayoutState> {
        if grammar::is_terminator(line) {
            return Ok(LayoutState::Finished);
        }
        if grammar::is_blank(line) {
            return Ok(LayoutState::Labels);
        }
        let (name, label) = grammar::variable_label(line)
            .ok_or_else(|| ExtractError::malformed_syntax(number, "variable label", line))?;
        let position = self.index.as_ref().and_then(|index| index.position(name));
        match position.and_then(|position| self.variables.get_mut(position)) {
            Some(variable) => variable.label = Some(label),
            None => debug!(line = number, name, "label for undeclared variable ignored"),
        }
        Ok(LayoutState::Labels)
    }
}

fn column_range(start: &str, end: Option<&str>) -> Option<ColumnRange> {
    let start: usize = start.parse().ok()?;
    let end: usize = match end {
        Some(end) => end.parse().ok()?,
        None => start,
    };
    ColumnRange::new(start, end)
}

/// Parse `name start[-end] [(flag)]` into a variable.
pub fn parse_declaration(number: usize, line: &str, record_type: Option<&str>) -> Result<Variable> {
    let malformed = || ExtractError::malformed_syntax(number, "variable declaration", line);
    let decl = grammar::declaration(line).ok_or_else(malformed)?;
    let columns = column_range(decl.start, decl.end).ok_or_else(malformed)?;
    let format = match decl.flag {
        None => VariableFormat::Numeric,
        Some(flag) if flag.eq_ignore_ascii_case("a") => VariableFormat::Alpha,
        Some(flag) if flag.bytes().all(|b| b.is_ascii_digit()) => {
            match flag.parse::<u32>().map_err(|_| malformed())? {
                0 => VariableFormat::Numeric,
                digits => VariableFormat::ImpliedDecimals(digits),
            }
        }
        Some(_) => return Err(malformed()),
    };
    let mut variable = Variable::new(decl.name, columns).with_format(format);
    variable.record_type = record_type.map(str::to_string);
    Ok(variable)
}

/// Parse the layout of a syntax file held in memory.
pub fn parse_layout(text: &str) -> Result<VariableSpec> {
    let mut parser = LayoutParser::new();
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
        if parser.is_finished() {
            break;
        }
    }
    parser.finish()
}
