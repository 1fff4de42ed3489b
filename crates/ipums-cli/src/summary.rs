use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ipums_model::FLAT_RECORD_TYPE;
use ipums_report::{LabelWriteSummary, ValueLabelWriteSummary};
use ipums_transcode::TranscodeSummary;

pub fn print_ddl(ddl: &str) {
    print!("{ddl}");
}

pub fn print_label_summary(summary: &LabelWriteSummary) {
    println!("{}", label_table(summary));
}

pub fn print_value_label_summary(summary: &ValueLabelWriteSummary) {
    println!("{}", value_label_table(summary));
}

pub fn print_transcode_summary(summary: &TranscodeSummary) {
    println!("Data: {}", summary.data_file.display());
    println!("{}", transcode_table(summary));
}

pub fn label_table(summary: &LabelWriteSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Variables")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(summary.path.display()),
        Cell::new(summary.records_written),
    ]);
    table
}

pub fn value_label_table(summary: &ValueLabelWriteSummary) -> Table {
    let counts = &summary.counts;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Output"),
        header_cell("Read"),
        header_cell("Written"),
        header_cell("Alpha"),
        header_cell("Undeclared"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.path.display()),
        Cell::new(counts.records_read),
        Cell::new(counts.records_written),
        skipped_cell(counts.skipped_alpha),
        skipped_cell(counts.skipped_undeclared),
    ]);
    table
}

pub fn transcode_table(summary: &TranscodeSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record type"),
        header_cell("Output"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for output in &summary.outputs {
        table.add_row(vec![
            record_type_cell(&output.record_type),
            Cell::new(output.path.display()),
            Cell::new(output.records_written),
        ]);
    }
    table.add_row(vec![
        total_cell("Read"),
        dim_cell("-"),
        total_cell(summary.records_read),
    ]);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn record_type_cell(code: &str) -> Cell {
    if code == FLAT_RECORD_TYPE {
        dim_cell("-")
    } else {
        Cell::new(code)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    }
}

fn skipped_cell(count: u64) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn total_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
