//! Integration tests for the fixed-width transcoder.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use ipums_model::{ExtractError, FLAT_RECORD_TYPE, VariableSpec};
use ipums_syntax::parse_layout;
use ipums_transcode::{
    RecordWriters, TranscodeEvent, TranscodeOptions, Transcoder, transcode_file,
};

const FLAT_SYNTAX: &str = "\
data list file = fhandle /
  NAME   1-3 (a)
  AGE    4-6
  V1     10-15 (2)
.
";

const HIERARCHICAL_SYNTAX: &str = "\
file type mixed
 /file = fhandle
 /record = 1-1.

record type \"H\".
data list /
  RECTYPE 1-1 (a)
  SERIAL  2-5
  HHWT    6-11 (2)
.

record type \"P\".
data list /
  RECTYPE 1-1 (a)
  SERIAL  2-5
  AGE     6-8
.

end file type.
";

fn flat_spec() -> VariableSpec {
    parse_layout(FLAT_SYNTAX).expect("parse flat layout")
}

fn hierarchical_spec() -> VariableSpec {
    parse_layout(HIERARCHICAL_SYNTAX).expect("parse hierarchical layout")
}

fn run_in_memory(
    spec: &VariableSpec,
    input: &str,
    options: TranscodeOptions,
) -> ipums_model::Result<(Vec<(String, String)>, u64)> {
    let mut writers = RecordWriters::for_spec(spec, |_| Ok(Vec::<u8>::new()))?;
    let counts = Transcoder::new(spec, options).run(Cursor::new(input), &mut writers, |_| {})?;
    let outputs = writers
        .into_inner()
        .into_iter()
        .map(|entry| {
            (
                entry.record_type,
                String::from_utf8(entry.writer).expect("utf-8 output"),
            )
        })
        .collect();
    Ok((outputs, counts.records_read))
}

fn write_gzip(path: &Path, contents: &str) {
    let file = fs::File::create(path).expect("create gzip file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("write gzip data");
    encoder.finish().expect("finish gzip");
}

#[test]
fn flat_record_is_sliced_in_declaration_order() {
    let spec = flat_spec();
    let (outputs, read) =
        run_in_memory(&spec, "ABC 42   001234\n", TranscodeOptions::default()).unwrap();

    assert_eq!(read, 1);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].1, "ABC\t42\t0012.34\n");
}

#[test]
fn row_cap_stops_reading() {
    let spec = flat_spec();
    let input: String = (0..10).map(|i| format!("AB{i}{i:>3}   00010{i}\n")).collect();
    let options = TranscodeOptions::default().with_max_rows(Some(3));
    let (outputs, read) = run_in_memory(&spec, &input, options).unwrap();

    assert_eq!(read, 3);
    assert_eq!(outputs[0].1.lines().count(), 3);
}

#[test]
fn zero_row_cap_is_unbounded() {
    let spec = flat_spec();
    let input: String = (0..5).map(|_| "XYZ  1   000100\n").collect();
    let options = TranscodeOptions::default().with_max_rows(Some(0));
    let (_, read) = run_in_memory(&spec, &input, options).unwrap();

    assert_eq!(read, 5);
}

#[test]
fn hierarchical_records_are_split_by_type() {
    let spec = hierarchical_spec();
    let input = "H0001012345\nP0001034\nP0001009\nH0002000150\nP0002071\n";
    let (outputs, read) = run_in_memory(&spec, input, TranscodeOptions::default()).unwrap();

    assert_eq!(read, 5);
    assert_eq!(outputs[0].0, "H");
    assert_eq!(outputs[0].1, "H\t0001\t0123.45\nH\t0002\t0001.50\n");
    assert_eq!(outputs[1].0, "P");
    assert_eq!(outputs[1].1, "P\t0001\t034\nP\t0001\t009\nP\t0002\t071\n");
}

#[test]
fn short_line_aborts_with_data_format_error() {
    let spec = flat_spec();
    let error = run_in_memory(&spec, "ABC 42   001234\nABC 42\n", TranscodeOptions::default())
        .unwrap_err();

    match error {
        ExtractError::DataFormat {
            record, variable, ..
        } => {
            assert_eq!(record, 2);
            assert_eq!(variable, "V1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn implied_decimals_need_an_integer_digit() {
    let spec = flat_spec();
    let error =
        run_in_memory(&spec, "ABC 42       12\n", TranscodeOptions::default()).unwrap_err();

    assert!(matches!(error, ExtractError::DataFormat { record: 1, .. }));
}

#[test]
fn undeclared_record_type_is_rejected() {
    let spec = hierarchical_spec();
    let error =
        run_in_memory(&spec, "X0001034\n", TranscodeOptions::default()).unwrap_err();

    match error {
        ExtractError::UnknownRecordType {
            record,
            record_type,
        } => {
            assert_eq!(record, 1);
            assert_eq!(record_type, "X");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn layout_lookup_by_record_type() {
    let flat = flat_spec();
    let transcoder = Transcoder::new(&flat, TranscodeOptions::default());
    let layout = transcoder.layout_for(1, "ABC 42").unwrap();
    assert_eq!(layout.record_type, FLAT_RECORD_TYPE);
    assert_eq!(layout.variables.len(), 3);

    let hierarchical = hierarchical_spec();
    let transcoder = Transcoder::new(&hierarchical, TranscodeOptions::default());
    assert_eq!(transcoder.layout_for(1, "P0001034").unwrap().record_type, "P");
    let error = transcoder.layout_for(2, "").unwrap_err();
    assert!(matches!(
        error,
        ExtractError::DataFormat { record: 2, ref variable, .. } if variable == "record type"
    ));
}

#[test]
fn progress_events_follow_interval() {
    let spec = flat_spec();
    let input: String = (0..7).map(|_| "XYZ  1   000100\n").collect();
    let mut writers = RecordWriters::for_spec(&spec, |_| Ok(Vec::<u8>::new())).unwrap();
    let mut events = Vec::new();
    let options = TranscodeOptions::default().with_progress_interval(3);

    Transcoder::new(&spec, options)
        .run(Cursor::new(input), &mut writers, |event| events.push(event))
        .unwrap();

    assert_eq!(
        events,
        vec![
            TranscodeEvent::Progress { records_read: 3 },
            TranscodeEvent::Progress { records_read: 6 },
            TranscodeEvent::Finished { records_read: 7 },
        ]
    );
}

#[test]
fn gzip_file_to_per_record_type_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = dir.path().join("usa_00001.dat.gz");
    write_gzip(&data, "H0001012345\nP0001034\nP0001009\nH0002000150\nP0002071\n");
    let output = dir.path().join("usa.dat");

    let summary = transcode_file(
        &hierarchical_spec(),
        &data,
        &output,
        TranscodeOptions::default(),
        |_| {},
    )
    .expect("transcode");

    assert_eq!(summary.records_read, 5);
    assert_eq!(summary.outputs.len(), 2);
    assert_eq!(summary.total_written(), summary.records_read);

    let household = &summary.outputs[0];
    assert_eq!(household.path, dir.path().join("usa_H.dat"));
    assert_eq!(household.records_written, 2);
    let person = &summary.outputs[1];
    assert_eq!(person.path, dir.path().join("usa_P.dat"));
    assert_eq!(person.records_written, 3);

    let person_rows = fs::read_to_string(&person.path).expect("read person file");
    assert!(person_rows.lines().all(|row| row.starts_with("P\t")));
    let household_rows = fs::read_to_string(&household.path).expect("read household file");
    assert!(household_rows.lines().all(|row| row.starts_with("H\t")));
}

#[test]
fn plain_text_input_is_accepted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = dir.path().join("cps.dat");
    fs::write(&data, "ABC 42   001234\n").expect("write data");
    let output = dir.path().join("cps.tsv");

    let summary = transcode_file(&flat_spec(), &data, &output, TranscodeOptions::default(), |_| {})
        .expect("transcode");

    assert_eq!(summary.outputs[0].path, output);
    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "ABC\t42\t0012.34\n"
    );
}

#[test]
fn summary_serializes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = dir.path().join("cps.dat.gz");
    write_gzip(&data, "ABC 42   001234\n");

    let summary = transcode_file(
        &flat_spec(),
        &data,
        &dir.path().join("cps.tsv"),
        TranscodeOptions::default(),
        |_| {},
    )
    .expect("transcode");
    let json = serde_json::to_string(&summary).expect("serialize summary");
    let round: ipums_transcode::TranscodeSummary =
        serde_json::from_str(&json).expect("deserialize summary");

    assert_eq!(round, summary);
}
