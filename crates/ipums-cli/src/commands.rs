use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use ipums_model::VariableSpec;
use ipums_report::{
    DdlOptions, LabelWriteSummary, ValueLabelWriteSummary, generate_ddl, save_value_labels,
    save_variable_labels,
};
use ipums_syntax::{read_layout, read_value_labels};
use ipums_transcode::{TranscodeOptions, TranscodeSummary, transcode_file};

use crate::cli::{DataArgs, DdlArgs, LabelArgs};
use crate::progress::{apply_event, record_spinner};

pub fn run_ddl(args: &DdlArgs) -> Result<String> {
    let _span = info_span!("ddl").entered();
    let spec = load_layout(&args.syntax)?;
    let options = DdlOptions {
        flat_table_name: args.table_name.clone(),
        ..DdlOptions::default()
    };
    Ok(generate_ddl(&spec, &options))
}

pub fn run_vars(args: &LabelArgs) -> Result<LabelWriteSummary> {
    let _span = info_span!("vars").entered();
    let spec = load_layout(&args.syntax)?;
    save_variable_labels(&spec, &args.output)
        .with_context(|| format!("write variable labels to {}", args.output.display()))
}

pub fn run_vals(args: &LabelArgs) -> Result<ValueLabelWriteSummary> {
    let _span = info_span!("vals").entered();
    let spec = load_layout(&args.syntax)?;
    let labels = read_value_labels(&args.syntax)
        .with_context(|| format!("read value labels from {}", args.syntax.display()))?;
    save_value_labels(&spec, &labels, &args.output)
        .with_context(|| format!("write value labels to {}", args.output.display()))
}

pub fn run_data(args: &DataArgs) -> Result<TranscodeSummary> {
    let _span = info_span!("data").entered();
    let spec = load_layout(&args.syntax)?;
    let options = TranscodeOptions::default().with_max_rows(args.max_rows);
    let spinner = record_spinner("transcoding", args.no_progress);
    let result = transcode_file(&spec, &args.data, &args.output, options, |event| {
        apply_event(&spinner, event);
    });
    spinner.finish_and_clear();
    result.with_context(|| format!("transcode {}", args.data.display()))
}

fn load_layout(path: &Path) -> Result<VariableSpec> {
    read_layout(path).with_context(|| format!("read layout from {}", path.display()))
}
