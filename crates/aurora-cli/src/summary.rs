use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::json;

use aurora_map::ConfidenceLevel;
use aurora_model::Token;

use aurora_formula::FunctionInfo;

use crate::cli::ReportFormatArg;
use crate::commands::{ColumnProfile, ImportResult};

pub fn print_import_summary(result: &ImportResult, format: ReportFormatArg) {
    if format == ReportFormatArg::Json {
        let payload = json!({
            "file": result.file,
            "rows": result.rows,
            "mappings": result.mappings,
            "unmapped_source": result.unmapped_source,
            "unmapped_target": result.unmapped_target,
            "errors": result.report.errors,
            "warnings": result.report.warnings,
            "output": result.output,
        });
        println!("{payload}");
        return;
    }

    println!("File: {} ({} rows)", result.file.display(), result.rows);
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for mapping in &result.mappings {
        table.add_row(vec![
            Cell::new(&mapping.source_column),
            Cell::new(&mapping.target_column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            confidence_cell(mapping.confidence),
            level_cell(ConfidenceLevel::of(mapping)),
        ]);
    }
    println!("{table}");

    if !result.unmapped_source.is_empty() {
        println!("Unmapped source columns: {}", result.unmapped_source.join(", "));
    }
    if !result.unmapped_target.is_empty() {
        println!("Unmapped target columns: {}", result.unmapped_target.join(", "));
    }
    for warning in &result.report.warnings {
        println!("warning: {warning}");
    }
    if !result.report.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.report.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_inspect(profiles: &[ColumnProfile], format: ReportFormatArg) {
    if format == ReportFormatArg::Json {
        let columns: Vec<serde_json::Value> = profiles
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "type": p.inferred,
                    "is_numeric": p.hint.is_numeric,
                    "unique_ratio": p.hint.unique_ratio,
                    "null_ratio": p.hint.null_ratio,
                    "suggested_required": p.suggested_required,
                })
            })
            .collect();
        println!("{}", json!({ "columns": columns }));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Null %"),
        header_cell("Unique %"),
        header_cell("Required?"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(profile.inferred.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            percent_cell(profile.hint.null_ratio),
            percent_cell(profile.hint.unique_ratio),
            if profile.suggested_required {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
        ]);
    }
    println!("{table}");
}

pub fn print_tokens(formula: &str, tokens: &[Token], format: ReportFormatArg) {
    if format == ReportFormatArg::Json {
        match serde_json::to_string(tokens) {
            Ok(payload) => println!("{payload}"),
            Err(error) => eprintln!("error: serialize tokens: {error}"),
        }
        return;
    }

    println!("Formula: {formula}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Value"),
        header_cell("Start"),
        header_cell("End"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for token in tokens {
        table.add_row(vec![
            Cell::new(format!("{:?}", token.token_type).to_lowercase()),
            Cell::new(&token.value),
            Cell::new(token.start),
            Cell::new(token.end),
        ]);
    }
    println!("{table}");
}

pub fn print_functions(functions: &[&FunctionInfo], format: ReportFormatArg) {
    if format == ReportFormatArg::Json {
        match serde_json::to_string(functions) {
            Ok(payload) => println!("{payload}"),
            Err(error) => eprintln!("error: serialize functions: {error}"),
        }
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Function"),
        header_cell("Category"),
        header_cell("Description"),
        header_cell("Example"),
    ]);
    apply_table_style(&mut table);
    for function in functions {
        table.add_row(vec![
            Cell::new(function.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(function.category.to_string()),
            Cell::new(function.description),
            function
                .examples
                .first()
                .map_or_else(|| dim_cell("-"), |e| Cell::new(*e)),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: Option<f64>) -> Cell {
    match confidence {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    match level {
        ConfidenceLevel::High => Cell::new("high").fg(Color::Green),
        ConfidenceLevel::Medium => Cell::new("medium").fg(Color::Yellow),
        ConfidenceLevel::Low => Cell::new("low").fg(Color::Red),
        ConfidenceLevel::Manual => dim_cell("manual"),
    }
}

fn percent_cell(ratio: f64) -> Cell {
    Cell::new(format!("{:.0}%", ratio * 100.0))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
