use serde::{Deserialize, Serialize};

/// One coded value label from a `value labels` block.
///
/// `value` is kept as text because alpha and numeric variables share the
/// same lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub variable: String,
    pub value: String,
    pub label: String,
}

impl ValueLabel {
    pub fn new(
        variable: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
            label: label.into(),
        }
    }
}
