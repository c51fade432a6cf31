use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use followup_model::FollowupStatus;

use crate::types::{CompareResult, ProcessResult};

pub fn print_process_summary(result: &ProcessResult) {
    let report = &result.outcome.report;
    println!("Input: {}", result.input_folder.display());
    println!("Endpoint: {}", result.endpoint);
    println!("Group: {}", result.group);
    println!(
        "Tables: {} loaded, {} dropped",
        result.tables_loaded,
        report.dropped_tables.len()
    );
    match &result.outputs {
        Some(outputs) => {
            println!("Output: {}", result.output_dir.display());
            for path in outputs.paths() {
                println!("  {}", path.display());
            }
        }
        None => println!("Output: none (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Subjects")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for status in FollowupStatus::ALL {
        let count = result.status_counts.get(&status).copied().unwrap_or(0);
        table.add_row(vec![status_cell(status), count_cell(count, Color::Reset)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.succeeded).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_distribution(result);
    print_breakdown(result);
    print_problems(result);
}

fn print_distribution(result: &ProcessResult) {
    let distribution = &result.distribution;
    if distribution.total == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("First event"),
        header_cell("Subjects"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (event, count) in distribution.iter() {
        table.add_row(vec![
            Cell::new(event),
            Cell::new(count),
            Cell::new(format!("{:.1}%", distribution.percentage(event))),
        ]);
    }
    println!();
    println!("Event distribution:");
    println!("{table}");
}

fn print_breakdown(result: &ProcessResult) {
    let reached: Vec<_> = result
        .breakdown
        .iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    if reached.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Subjects")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, count) in reached {
        table.add_row(vec![Cell::new(category.as_str()), Cell::new(count)]);
    }
    println!();
    println!("Detailed event breakdown:");
    println!("{table}");
}

fn print_problems(result: &ProcessResult) {
    let report = &result.outcome.report;
    let warnings = result
        .outputs
        .as_ref()
        .map(|outputs| outputs.warnings.as_slice())
        .unwrap_or_default();
    if report.skipped.is_empty()
        && report.dropped_tables.is_empty()
        && result.load_failures.is_empty()
        && warnings.is_empty()
    {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Item"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    for (path, error) in &result.load_failures {
        table.add_row(vec![kind_cell("FILE", Color::Red), Cell::new(path), Cell::new(error)]);
    }
    for dropped in &report.dropped_tables {
        table.add_row(vec![
            kind_cell("TABLE", Color::Yellow),
            Cell::new(&dropped.label),
            Cell::new(&dropped.reason),
        ]);
    }
    for skipped in &report.skipped {
        table.add_row(vec![
            kind_cell("SUBJECT", Color::Yellow),
            Cell::new(&skipped.subject_id),
            Cell::new(&skipped.reason),
        ]);
    }
    for warning in warnings {
        table.add_row(vec![kind_cell("OUTPUT", Color::Yellow), dim_cell("-"), Cell::new(warning)]);
    }
    println!();
    println!("Problems:");
    println!("{table}");
}

pub fn print_compare_summary(result: &CompareResult) {
    println!("Input: {}", result.input_folder.display());
    println!("Subjects: {} ({} skipped)", result.subjects, result.skipped);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Endpoint"),
        header_cell("Events"),
        header_cell("Censored"),
        header_cell("Event rate"),
        header_cell("Mean survival (days)"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for summary in &result.summaries {
        table.add_row(vec![
            Cell::new(summary.endpoint.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(summary.events, Color::Red),
            Cell::new(summary.censored),
            Cell::new(format!("{:.1}%", summary.event_rate)),
            Cell::new(format!("{:.1}", summary.mean_survival_days)),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn status_cell(status: FollowupStatus) -> Cell {
    let color = match status {
        FollowupStatus::Complete => Color::Green,
        FollowupStatus::Adequate => Color::Blue,
        FollowupStatus::Incomplete => Color::Yellow,
        FollowupStatus::LostToFollowup => Color::Red,
        FollowupStatus::NoData | FollowupStatus::Unknown => Color::DarkGrey,
    };
    Cell::new(status.as_str()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn kind_cell(kind: &str, color: Color) -> Cell {
    Cell::new(kind).fg(color).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
