//! Line grammars for the subset of SPSS syntax used by extract layouts.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Commands recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DataList,
    FileTypeMixed,
    RecordType,
    EndFileType,
    VariableLabels,
    ValueLabels,
}

static COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(data\s+list|file\s+type\s+mixed|record\s+type|end\s+file\s+type|variable\s+labels|value\s+labels)\b",
    )
    .expect("command pattern")
});

static RECORD_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*/\s*record\s*=\s*(\d+)(?:\s*-\s*(\d+))?").expect("record pattern")
});

static RECORD_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*record\s+type\s+(?:"([^"]+)"|'([^']+)'|(\w+))"#)
        .expect("record type pattern")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s+(\d+)(?:\s*-\s*(\d+))?(?:\s*\(\s*(\w+)\s*\))?\s*$")
        .expect("variable pattern")
});

static VARIABLE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\w+)\s+(?:"(.*)"|'(.*)')"#).expect("variable label pattern")
});

static VALUE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/\s*(\w+)").expect("value variable pattern"));

static CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\+\s*(?:"(.*)"|'(.*)')"#).expect("continuation pattern")
});

static VALUE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:"([^"]*)"|'([^']*)'|(\S+))\s+(?:"(.*)"|'(.*)')"#)
        .expect("value label pattern")
});

/// Parsed `name start[-end] [(flag)]` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub start: &'a str,
    pub end: Option<&'a str>,
    pub flag: Option<&'a str>,
}

pub fn command(line: &str) -> Option<Command> {
    let caps = COMMAND.captures(line)?;
    let words: Vec<String> = caps[1]
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect();
    match words.join(" ").as_str() {
        "data list" => Some(Command::DataList),
        "file type mixed" => Some(Command::FileTypeMixed),
        "record type" => Some(Command::RecordType),
        "end file type" => Some(Command::EndFileType),
        "variable labels" => Some(Command::VariableLabels),
        "value labels" => Some(Command::ValueLabels),
        _ => None,
    }
}

/// A line holding only the `.` command terminator.
pub fn is_terminator(line: &str) -> bool {
    line.trim() == "."
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when the line looks like a `/record = ...` subcommand, whether or not
/// it is well formed.
pub fn is_record_subcommand(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('/')
        && trimmed[1..]
            .trim_start()
            .get(..6)
            .is_some_and(|word| word.eq_ignore_ascii_case("record"))
}

pub fn record_columns(line: &str) -> Option<(&str, Option<&str>)> {
    let caps = RECORD_COLUMNS.captures(line)?;
    let start = caps.get(1)?.as_str();
    Some((start, caps.get(2).map(|m| m.as_str())))
}

pub fn record_type(line: &str) -> Option<&str> {
    let caps = RECORD_TYPE.captures(line)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

pub fn declaration(line: &str) -> Option<Declaration<'_>> {
    let caps = VARIABLE.captures(line)?;
    Some(Declaration {
        name: caps.get(1)?.as_str(),
        start: caps.get(2)?.as_str(),
        end: caps.get(3).map(|m| m.as_str()),
        flag: caps.get(4).map(|m| m.as_str()),
    })
}

pub fn variable_label(line: &str) -> Option<(&str, String)> {
    let caps = VARIABLE_LABEL.captures(line)?;
    let name = caps.get(1)?.as_str();
    Some((name, quoted(&caps, 2, 3)?))
}

pub fn value_variable(line: &str) -> Option<&str> {
    VALUE_VARIABLE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn continuation(line: &str) -> Option<String> {
    let caps = CONTINUATION.captures(line)?;
    quoted(&caps, 1, 2)
}

pub fn value_label(line: &str) -> Option<(String, String)> {
    let caps = VALUE_LABEL.captures(line)?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .to_string();
    Some((value, quoted(&caps, 4, 5)?))
}

/// Text of whichever quote style matched, with doubled quotes collapsed.
fn quoted(caps: &Captures<'_>, double: usize, single: usize) -> Option<String> {
    if let Some(text) = caps.get(double) {
        return Some(text.as_str().replace("\"\"", "\""));
    }
    caps.get(single)
        .map(|text| text.as_str().replace("''", "'"))
}
