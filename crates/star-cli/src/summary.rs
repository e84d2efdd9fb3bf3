//! Terminal rendering of command results.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use star_cli::types::{BuildResult, SummaryResult, WriteOutcome};
use star_core::NamedTable;
use star_report::{any_to_string, summary_json};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn totals_table(label: &str, totals: &[(String, f64)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(label), header_cell("Sales")]);
    apply_table_style(&mut table);
    for (name, total) in totals {
        table.add_row(vec![Cell::new(name), Cell::new(money(*total))]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn print_build(result: &BuildResult) {
    println!("Input: {}", result.input.display());
    println!("Fingerprint: {}", result.fingerprint);
    let stats = &result.stats;
    println!(
        "Records: {} read, {} duplicates removed, {} kept",
        stats.input_rows, stats.duplicates_removed, stats.output_rows
    );
    if stats.missing_order_dates > 0 || stats.missing_ship_dates > 0 {
        println!(
            "Missing dates: {} order, {} ship",
            stats.missing_order_dates, stats.missing_ship_dates
        );
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    for (name, rows) in &result.row_counts {
        table.add_row(vec![Cell::new(name), Cell::new(rows)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    println!("{table}");

    for output in &result.outputs {
        let status = match output.outcome {
            WriteOutcome::Written => "written",
            WriteOutcome::Skipped => "skipped (exists)",
        };
        println!("{}: {} [{status}]", output.label, output.path.display());
    }
}

/// Tables to stdout when the JSON went to a file; otherwise only the JSON,
/// so stdout stays machine readable.
pub fn print_summary(result: &SummaryResult) -> Result<()> {
    let Some(path) = &result.output else {
        println!("{}", summary_json(&result.summary)?);
        return Ok(());
    };

    println!(
        "Records: {} of {} match the filter",
        result.matched_records, result.total_records
    );
    let mut kpis = Table::new();
    kpis.set_header(vec![
        header_cell("Total Sales"),
        header_cell("Orders"),
        header_cell("Customers"),
    ]);
    apply_table_style(&mut kpis);
    kpis.add_row(vec![
        Cell::new(money(result.kpis.total_sales)),
        Cell::new(result.kpis.order_count),
        Cell::new(result.kpis.customer_count),
    ]);
    println!("{kpis}");

    println!("{}", totals_table("Category", &result.summary.sales_by_category.0));
    println!("{}", totals_table("Segment", &result.sales_by_segment));
    println!("{}", totals_table("Region", &result.sales_by_region));

    let top: Vec<(String, f64)> = result
        .summary
        .top_products
        .iter()
        .map(|p| (p.name.clone(), p.sales))
        .collect();
    println!("{}", totals_table("Top Products", &top));

    let trend: Vec<(String, f64)> = result
        .summary
        .monthly_sales_trend
        .iter()
        .map(|m| (m.month.clone(), m.sales))
        .collect();
    println!("{}", totals_table("Month", &trend));

    println!("Summary: {}", path.display());
    Ok(())
}

pub fn print_preview(tables: &[NamedTable]) -> Result<()> {
    for table in tables {
        let frame = &table.frame;
        let mut rendered = Table::new();
        rendered.set_header(
            frame
                .get_column_names()
                .into_iter()
                .map(|name| header_cell(name.as_str()))
                .collect::<Vec<_>>(),
        );
        apply_table_style(&mut rendered);
        for row in 0..frame.height() {
            let mut cells = Vec::with_capacity(frame.width());
            for column in frame.get_columns() {
                cells.push(Cell::new(any_to_string(column.get(row)?)));
            }
            rendered.add_row(cells);
        }
        println!("{} ({} rows shown)", table.name, frame.height());
        println!("{rendered}");
    }
    Ok(())
}
