use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dlt_model::FieldKey;

use dlt_cli::types::BatchResult;

/// Prints the per-row batch summary on stderr, keeping stdout for records.
pub fn print_batch_summary(result: &BatchResult) {
    eprintln!("Client: {}", result.client_id);
    eprintln!("Batch file: {}", result.batch_file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Source"),
        header_cell("File path"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in &result.rows {
        let (file_path, status) = match &row.result {
            Ok(record) => (
                record
                    .get(FieldKey::FilePath)
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
            ),
            Err(error) => (Cell::new(error).fg(Color::Red), Cell::new("✗").fg(Color::Red)),
        };
        table.add_row(vec![
            Cell::new(row.line),
            Cell::new(row.source_path.display()),
            file_path,
            status,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} rows", result.rows.len())).add_attribute(Attribute::Bold),
        count_cell(result.failed(), "failed", Color::Red),
        count_cell(result.succeeded(), "ok", Color::Green),
    ]);
    eprintln!("{table}");
}

/// Prints `MRN<TAB>PATIENT_ID` pairs.
pub fn print_patient_ids(pairs: &[(String, String)]) {
    for (mrn, patient_id) in pairs {
        println!("{mrn}\t{patient_id}");
    }
}

fn count_cell(count: usize, label: &str, color: Color) -> Cell {
    if count > 0 {
        Cell::new(format!("{count} {label}"))
            .fg(color)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(format!("{count} {label}"))
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
