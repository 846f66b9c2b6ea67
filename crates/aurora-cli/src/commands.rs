use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use aurora_formula::{FUNCTIONS, FunctionCategory, FunctionInfo, evaluate, tokenize, validate};
use aurora_ingest::{CsvTable, apply_mapping, infer_column_type, suggest_schema};
use aurora_map::{MappingReport, auto_map_with_threshold, validate_mapping};
use aurora_model::{ColumnHint, ColumnMapping, ColumnSchema, ColumnType, Token, Value};

use crate::cli::{CategoryArg, EvalArgs, FunctionsArgs, ImportArgs, InspectArgs, TokensArgs};

/// Outcome of one `import` run, for the summary printer.
pub struct ImportResult {
    pub file: PathBuf,
    pub rows: usize,
    pub mappings: Vec<ColumnMapping>,
    pub unmapped_source: Vec<String>,
    pub unmapped_target: Vec<String>,
    pub report: MappingReport,
    /// Path the projected table was written to, when it was.
    pub output: Option<PathBuf>,
}

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let schema = load_schema(&args.schema)?;
    let table = CsvTable::load(&args.file)?;
    info!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded source file"
    );

    let outcome = auto_map_with_threshold(&table.headers, &schema, args.threshold);
    let report = validate_mapping(&outcome.mappings, &schema);
    for warning in &report.warnings {
        warn!("{warning}");
    }

    let mut output = None;
    if !args.dry_run
        && let Some(path) = &args.output
    {
        if report.is_valid() || args.force {
            let projected = apply_mapping(&table, &outcome.mappings);
            projected.write(path)?;
            info!(output = %path.display(), rows = projected.rows.len(), "wrote projected table");
            output = Some(path.clone());
        } else {
            warn!("validation failed, output not written (use --force to override)");
        }
    }

    Ok(ImportResult {
        file: args.file.clone(),
        rows: table.rows.len(),
        mappings: outcome.mappings,
        unmapped_source: outcome.unmapped_source,
        unmapped_target: outcome.unmapped_target,
        report,
        output,
    })
}

fn load_schema(path: &PathBuf) -> Result<Vec<ColumnSchema>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read schema: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse schema: {}", path.display()))
}

/// One profiled column of an inspected file.
pub struct ColumnProfile {
    pub name: String,
    pub inferred: ColumnType,
    pub hint: ColumnHint,
    pub suggested_required: bool,
}

pub fn run_inspect(args: &InspectArgs) -> Result<Vec<ColumnProfile>> {
    let table = CsvTable::load(&args.file)?;
    let hints = table.column_hints();
    let suggested = suggest_schema(&table, &[]);

    let profiles = table
        .headers
        .iter()
        .map(|header| {
            let values = table.column(header).unwrap_or_default();
            let hint = hints.get(header).cloned().unwrap_or_default();
            let suggestion = suggested.iter().find(|c| &c.name == header);
            ColumnProfile {
                name: header.clone(),
                inferred: infer_column_type(values),
                hint,
                suggested_required: suggestion.is_some_and(|c| c.is_required),
            }
        })
        .collect();
    Ok(profiles)
}

pub fn run_tokens(args: &TokensArgs) -> Vec<Token> {
    tokenize(&args.formula)
}

pub fn run_eval(args: &EvalArgs) -> Result<Value> {
    let context: BTreeMap<String, Value> = match &args.context {
        Some(raw) => serde_json::from_str(raw).context("parse --context JSON")?,
        None => BTreeMap::new(),
    };

    let dependencies: Vec<String> = context.keys().cloned().collect();
    let validation = validate(&args.formula, &dependencies);
    for error in &validation.errors {
        warn!("{error}");
    }

    Ok(evaluate(&args.formula, &context)?)
}

pub fn run_functions(args: &FunctionsArgs) -> Vec<&'static FunctionInfo> {
    let category = args.category.map(|c| match c {
        CategoryArg::Math => FunctionCategory::Math,
        CategoryArg::String => FunctionCategory::String,
        CategoryArg::Date => FunctionCategory::Date,
        CategoryArg::Logic => FunctionCategory::Logic,
    });
    FUNCTIONS
        .iter()
        .filter(|f| category.is_none_or(|c| f.category == c))
        .collect()
}
