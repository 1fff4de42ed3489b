use std::fmt;

use ipums_model::{Variable, VariableSpec};
use serde::{Deserialize, Serialize};

/// Integer columns wider than this many characters use a 64-bit type.
pub const MAX_INT_WIDTH: usize = 9;

/// SQL column type inferred from a variable's format and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Varchar(usize),
    DoublePrecision,
    BigInt,
    Int,
}

impl ColumnType {
    pub fn for_variable(variable: &Variable) -> Self {
        let width = variable.width();
        if variable.is_alpha() {
            ColumnType::Varchar(width)
        } else if variable.implied_decimals().is_some() {
            ColumnType::DoublePrecision
        } else if width > MAX_INT_WIDTH {
            ColumnType::BigInt
        } else {
            ColumnType::Int
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Varchar(width) => write!(f, "varchar({width})"),
            ColumnType::DoublePrecision => f.write_str("double precision"),
            ColumnType::BigInt => f.write_str("bigint"),
            ColumnType::Int => f.write_str("int"),
        }
    }
}

/// DDL formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdlOptions {
    /// Table name used when the layout is flat. Hierarchical layouts name each
    /// table after its record type.
    pub flat_table_name: String,
    /// Column names are padded to this width so the types line up.
    pub name_width: usize,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            flat_table_name: "ipumsdata".to_string(),
            name_width: 24,
        }
    }
}

/// One `create table` statement per record type, columns in declaration
/// order. Record types without variables produce no statement.
pub fn generate_ddl(spec: &VariableSpec, options: &DdlOptions) -> String {
    let mut ddl = String::new();
    for code in spec.record_types() {
        let table = if spec.is_hierarchical() {
            code.as_str()
        } else {
            options.flat_table_name.as_str()
        };
        if let Some(statement) = table_statement(table, spec.variables_for(code), options) {
            ddl.push_str(&statement);
        }
    }
    ddl
}

/// A single `create table` statement, or `None` when there are no columns.
pub fn table_statement<'a, I>(table: &str, variables: I, options: &DdlOptions) -> Option<String>
where
    I: IntoIterator<Item = &'a Variable>,
{
    let columns: Vec<String> = variables
        .into_iter()
        .map(|variable| column_definition(variable, options.name_width))
        .collect();
    if columns.is_empty() {
        return None;
    }
    Some(format!(
        "create table {table} (\n{}\n);\n",
        columns.join(",\n")
    ))
}

fn column_definition(variable: &Variable, name_width: usize) -> String {
    let padding = name_width.saturating_sub(variable.name.len()).max(1);
    format!(
        "    {}{}{}",
        variable.name,
        " ".repeat(padding),
        ColumnType::for_variable(variable)
    )
}
