//! Run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::commands::RunSummary;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn print_summary(result: &RunSummary) {
    if let Some(path) = &result.output {
        println!("Meta table: {}", path.display());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Group"),
        header_cell("Rows"),
        header_cell("Indicators"),
        header_cell("Advisories"),
        header_cell("Included"),
    ]);
    for column_idx in [3usize, 4, 5] {
        if let Some(column) = table.column_mut(column_idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    if let Some(column) = table.column_mut(6) {
        column.set_cell_alignment(CellAlignment::Center);
    }

    let mut included = 0usize;
    let mut advisories = 0usize;
    for field in &result.fields {
        if field.included {
            included += 1;
        }
        advisories += field.advisories;
        table.add_row(vec![
            Cell::new(field.field_id),
            Cell::new(field.field_type.as_str()),
            Cell::new(&field.group),
            Cell::new(field.rows),
            Cell::new(field.indicators),
            Cell::new(field.advisories),
            Cell::new(if field.included { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");
    println!(
        "{} fields processed, {} included, {} excluded, {} advisories",
        result.fields.len(),
        included,
        result.fields.len() - included,
        advisories
    );
}
