//! Integration tests for layout parsing.

use std::fs;

use ipums_model::{ColumnRange, ExtractError, FLAT_RECORD_TYPE, VariableFormat};
use ipums_syntax::{parse_layout, read_layout};

const FLAT: &str = include_str!("fixtures/flat.sps");
const HIERARCHICAL: &str = include_str!("fixtures/hierarchical.sps");

#[test]
fn flat_layout_has_placeholder_record_type() {
    let spec = parse_layout(FLAT).expect("parse flat layout");

    assert!(!spec.is_hierarchical());
    assert_eq!(spec.record_type_column(), None);
    assert_eq!(spec.record_types(), [FLAT_RECORD_TYPE.to_string()]);
    assert!(spec.variables().iter().all(|v| v.record_type.is_none()));
}

#[test]
fn flat_layout_preserves_declaration_order() {
    let spec = parse_layout(FLAT).expect("parse flat layout");
    let names: Vec<&str> = spec.variables().iter().map(|v| v.name.as_str()).collect();

    assert_eq!(
        names,
        ["YEAR", "SERIAL", "HWTSUPP", "STATEFIP", "METAREA", "STATECENSUS"]
    );
}

#[test]
fn flat_layout_reads_formats_and_labels() {
    let spec = parse_layout(FLAT).expect("parse flat layout");

    let weight = spec.variable("HWTSUPP").expect("HWTSUPP");
    assert_eq!(weight.columns, ColumnRange::new(10, 19).unwrap());
    assert_eq!(weight.format, VariableFormat::ImpliedDecimals(4));
    assert_eq!(weight.label.as_deref(), Some("Household weight, Supplement"));

    let census = spec.variable("STATECENSUS").expect("STATECENSUS");
    assert!(census.is_alpha());
    assert_eq!(census.label.as_deref(), Some("State (Census code)"));
}

#[test]
fn hierarchical_layout_assigns_record_types() {
    let spec = parse_layout(HIERARCHICAL).expect("parse hierarchical layout");

    assert!(spec.is_hierarchical());
    assert_eq!(spec.record_type_column(), ColumnRange::new(1, 1));
    assert_eq!(spec.record_types(), ["H".to_string(), "P".to_string()]);
    for variable in spec.variables() {
        let record_type = variable.record_type.as_deref().expect("record type");
        assert!(spec.has_record_type(record_type));
    }

    let household: Vec<&str> = spec.variables_for("H").map(|v| v.name.as_str()).collect();
    let person: Vec<&str> = spec.variables_for("P").map(|v| v.name.as_str()).collect();
    assert_eq!(household, ["RECTYPE", "YEAR", "SERIAL", "HHWT"]);
    assert_eq!(person, ["RECTYPE", "SERIAL", "PERNUM", "AGE", "SEX"]);
}

#[test]
fn hierarchical_labels_attach_to_first_declaration() {
    let spec = parse_layout(HIERARCHICAL).expect("parse hierarchical layout");

    let labelled: Vec<(&str, Option<&str>)> = spec
        .variables()
        .iter()
        .map(|v| (v.name.as_str(), v.label.as_deref()))
        .collect();
    assert_eq!(labelled[0], ("RECTYPE", Some("Record type")));
    assert_eq!(labelled[4], ("RECTYPE", None));
    assert_eq!(labelled[8], ("SEX", Some("Sex")));
}

#[test]
fn one_column_record_discriminator() {
    let text = "file type mixed\n /record = 3.\nrecord type \"A\".\ndata list /\n  X 1-2\n.\nend file type.\n";
    let spec = parse_layout(text).expect("parse");

    assert_eq!(spec.record_type_column(), ColumnRange::new(3, 3));
    assert_eq!(spec.variables()[0].record_type.as_deref(), Some("A"));
}

#[test]
fn malformed_declaration_reports_line() {
    let text = "data list /\n  YEAR 1-4\n  SERIAL five\n.\n";
    let error = parse_layout(text).unwrap_err();

    match error {
        ExtractError::MalformedSyntax {
            line,
            construct,
            text,
        } => {
            assert_eq!(line, 3);
            assert_eq!(construct, "variable declaration");
            assert_eq!(text, "  SERIAL five");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_variable_label_is_fatal() {
    let text = "data list /\n  YEAR 1-4\n.\nvariable labels\n  YEAR Census year\n.\n";
    let error = parse_layout(text).unwrap_err();

    assert!(matches!(
        error,
        ExtractError::MalformedSyntax { line: 5, construct: "variable label", .. }
    ));
}

#[test]
fn read_layout_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("extract.sps");
    fs::write(&path, FLAT).expect("write syntax file");

    let spec = read_layout(&path).expect("read layout");
    assert_eq!(spec.len(), 6);
}

#[test]
fn read_layout_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = read_layout(&dir.path().join("missing.sps")).unwrap_err();

    assert!(matches!(error, ExtractError::Io(_)));
}
