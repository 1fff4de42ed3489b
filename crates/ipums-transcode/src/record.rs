//! Per-record slicing and reformatting.

use ipums_model::{ExtractError, Result, Variable, VariableSpec};

/// Insert a decimal point `decimals` digits from the right of `field`.
///
/// A leading sign is kept in front. Returns `None` when the field does not
/// have at least one integer digit in front of the fractional digits.
pub fn insert_implied_decimal(field: &str, decimals: u32) -> Option<String> {
    let (sign, digits) = match field.as_bytes().first() {
        Some(b'-' | b'+') => field.split_at(1),
        _ => ("", field),
    };
    let decimals = usize::try_from(decimals).ok()?;
    if digits.len() <= decimals {
        return None;
    }
    let split = digits.len() - decimals;
    if !digits.is_char_boundary(split) {
        return None;
    }
    let (whole, fraction) = digits.split_at(split);
    Some(format!("{sign}{whole}.{fraction}"))
}

/// Variables of one record type, in declaration order.
#[derive(Debug, Clone)]
pub struct RecordLayout<'a> {
    pub record_type: &'a str,
    pub variables: Vec<&'a Variable>,
}

impl<'a> RecordLayout<'a> {
    /// One layout per record type of `spec`.
    pub fn for_spec(spec: &'a VariableSpec) -> Vec<Self> {
        spec.record_types()
            .iter()
            .map(|code| Self {
                record_type: code.as_str(),
                variables: spec.variables_for(code).collect(),
            })
            .collect()
    }

    /// Append the delimited fields of `line` to `out`.
    ///
    /// `record` is the 1-based record number used in errors.
    pub fn format_into(
        &self,
        record: u64,
        line: &str,
        delimiter: char,
        out: &mut String,
    ) -> Result<()> {
        for (position, variable) in self.variables.iter().enumerate() {
            if position > 0 {
                out.push(delimiter);
            }
            let raw = variable.columns.slice(line).ok_or_else(|| {
                ExtractError::data_format(
                    record,
                    &variable.name,
                    format!(
                        "line is {} bytes long but the variable spans columns {}",
                        line.len(),
                        variable.columns
                    ),
                )
            })?;
            let field = raw.trim();
            match variable.implied_decimals() {
                Some(decimals) => {
                    let value = insert_implied_decimal(field, decimals).ok_or_else(|| {
                        ExtractError::data_format(
                            record,
                            &variable.name,
                            format!("{field:?} is too short for {decimals} implied decimal places"),
                        )
                    })?;
                    out.push_str(&value);
                }
                None => out.push_str(field),
            }
        }
        Ok(())
    }
}
