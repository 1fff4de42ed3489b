//! Value-label parser: the `value labels` block.
//!
//! Runs as its own pass over the syntax file, independent of the layout.

use ipums_model::{ExtractError, Result, ValueLabel};
use tracing::debug;

use crate::grammar::{self, Command};

/// Parser phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueLabelState {
    /// Skipping lines until `value labels`.
    Waiting,
    /// Reading `/VAR`, `value "label"` and `+ "continued"` lines.
    Collecting { variable: Option<String> },
    /// Block terminated.
    Done,
}

/// Incremental value-label parser.
#[derive(Debug)]
pub struct ValueLabelParser {
    state: ValueLabelState,
    labels: Vec<ValueLabel>,
}

impl Default for ValueLabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueLabelParser {
    pub fn new() -> Self {
        Self {
            state: ValueLabelState::Waiting,
            labels: Vec::new(),
        }
    }

    pub fn state(&self) -> &ValueLabelState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ValueLabelState::Done
    }

    /// Feed one line. `number` is the 1-based line number used in errors.
    pub fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        let state = std::mem::replace(&mut self.state, ValueLabelState::Done);
        self.state = match state {
            ValueLabelState::Waiting => match grammar::command(line) {
                Some(Command::ValueLabels) => ValueLabelState::Collecting { variable: None },
                _ => ValueLabelState::Waiting,
            },
            ValueLabelState::Collecting { variable } => self.on_collecting(number, line, variable)?,
            ValueLabelState::Done => ValueLabelState::Done,
        };
        Ok(())
    }

    fn on_collecting(
        &mut self,
        number: usize,
        line: &str,
        variable: Option<String>,
    ) -> Result<ValueLabelState> {
        if grammar::is_terminator(line) {
            return Ok(ValueLabelState::Done);
        }
        if grammar::is_blank(line) {
            return Ok(ValueLabelState::Collecting { variable });
        }
        if let Some(name) = grammar::value_variable(line) {
            return Ok(ValueLabelState::Collecting {
                variable: Some(name.to_string()),
            });
        }
        if let Some(fragment) = grammar::continuation(line) {
            let last = self.labels.last_mut().ok_or_else(|| {
                ExtractError::malformed_syntax(number, "label continuation", line)
            })?;
            last.label.push_str(&fragment);
            return Ok(ValueLabelState::Collecting { variable });
        }
        let (value, label) = grammar::value_label(line)
            .ok_or_else(|| ExtractError::malformed_syntax(number, "value label", line))?;
        let Some(name) = variable.as_deref() else {
            return Err(ExtractError::malformed_syntax(
                number,
                "value label without a /variable line",
                line,
            ));
        };
        self.labels.push(ValueLabel::new(name, value, label));
        Ok(ValueLabelState::Collecting { variable })
    }

    /// Labels in declaration order.
    pub fn finish(self) -> Vec<ValueLabel> {
        debug!(labels = self.labels.len(), "value labels parsed");
        self.labels
    }
}

/// Parse the value labels of a syntax file held in memory.
///
/// A file without a `value labels` block yields an empty list.
pub fn parse_value_labels(text: &str) -> Result<Vec<ValueLabel>> {
    let mut parser = ValueLabelParser::new();
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
        if parser.is_done() {
            break;
        }
    }
    Ok(parser.finish())
}
