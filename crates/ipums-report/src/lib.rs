//! Metadata outputs derived from a parsed extract layout.
//!
//! - **DDL**: `create table` statements with inferred column types
//! - **Variable labels**: `name<TAB>label` rows
//! - **Value labels**: `variable<TAB>value<TAB>label` rows
//!
//! Label text is escaped for tab-delimited bulk loading (`COPY ... FROM`).

mod ddl;
mod labels;
mod sanitize;

pub use ddl::{ColumnType, DdlOptions, MAX_INT_WIDTH, generate_ddl, table_statement};
pub use labels::{
    LabelWriteSummary, ValueLabelCounts, ValueLabelWriteSummary, save_value_labels,
    save_variable_labels, write_value_labels, write_variable_labels,
};
pub use sanitize::sanitize_label;
