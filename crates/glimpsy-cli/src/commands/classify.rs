//! Classify and filters command implementations.
//!
//! Shows how each column is classified and which filter controls follow.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use glimpsy_analytics::{build_templates, classify, FilterTemplates};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_number, print_header, print_output, print_single, KeyValue};
use crate::source::load_dataset;

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,
}

/// Arguments for the filters command.
#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,
}

#[derive(serde::Serialize, Tabled)]
struct ClassificationRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let types = classify(&dataset, ctx.pipeline());

    match ctx.format {
        OutputFormat::Json => print_single(&types, ctx.format),
        OutputFormat::Minimal => {
            for entry in types.iter() {
                println!("{}={}", entry.column, entry.kind);
            }
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<ClassificationRow> = types
                .iter()
                .map(|entry| ClassificationRow {
                    column: entry.column.clone(),
                    kind: entry.kind.to_string(),
                })
                .collect();
            if ctx.format == OutputFormat::Table {
                print_header("Column Types");
            }
            print_output(&rows, ctx.format)
        }
    }
}

#[derive(serde::Serialize, Tabled)]
struct CategoricalRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Options")]
    count: usize,
    #[tabled(rename = "Values")]
    values: String,
}

#[derive(serde::Serialize, Tabled)]
struct NumericalRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Avg")]
    avg: String,
}

const PREVIEW_OPTIONS: usize = 6;

fn preview(options: &[String]) -> String {
    let shown: Vec<&str> = options.iter().take(PREVIEW_OPTIONS).map(String::as_str).collect();
    if options.len() > PREVIEW_OPTIONS {
        format!("{}, ...", shown.join(", "))
    } else {
        shown.join(", ")
    }
}

/// Execute the filters command.
pub fn execute_filters(args: FiltersArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let types = classify(&dataset, ctx.pipeline());
    let templates = build_templates(&dataset, &types, ctx.pipeline());

    match ctx.format {
        OutputFormat::Table => print_templates(&templates, ctx),
        OutputFormat::Csv => print_output(&template_rows(&templates, ctx.precision()), ctx.format),
        OutputFormat::Json | OutputFormat::Minimal => print_single(&templates, ctx.format),
    }
}

#[derive(serde::Serialize, Tabled)]
struct TemplateRow {
    column: String,
    control: &'static str,
    detail: String,
}

fn template_rows(templates: &FilterTemplates, precision: u8) -> Vec<TemplateRow> {
    let mut rows = Vec::new();
    if let Some(range) = &templates.date_range {
        rows.push(TemplateRow {
            column: range.column.clone(),
            control: "date_range",
            detail: format!("{}..{}", range.min, range.max),
        });
    }
    rows.extend(templates.categorical.iter().map(|t| TemplateRow {
        column: t.column.clone(),
        control: "categorical",
        detail: t.options.join("|"),
    }));
    rows.extend(templates.numerical.iter().map(|t| TemplateRow {
        column: t.column.clone(),
        control: "numerical",
        detail: format!(
            "{}..{}",
            format_number(t.min, precision),
            format_number(t.max, precision)
        ),
    }));
    rows
}

fn print_templates(templates: &FilterTemplates, ctx: &Context) -> Result<()> {
    let precision = ctx.precision();

    if let Some(range) = &templates.date_range {
        let rows = vec![
            KeyValue::new("Bounds from", range.column.clone()),
            KeyValue::new("Applies to", range.fields.join(", ")),
            KeyValue::new("Earliest", range.min.to_string()),
            KeyValue::new("Latest", range.max.to_string()),
        ];
        print_header("Date Range");
        print_output(&rows, ctx.format)?;
    }

    if !templates.categorical.is_empty() {
        let rows: Vec<CategoricalRow> = templates
            .categorical
            .iter()
            .map(|t| CategoricalRow {
                column: t.column.clone(),
                count: t.options.len(),
                values: preview(&t.options),
            })
            .collect();
        print_header("Categorical Filters");
        print_output(&rows, ctx.format)?;
    }

    if !templates.numerical.is_empty() {
        let rows: Vec<NumericalRow> = templates
            .numerical
            .iter()
            .map(|t| NumericalRow {
                column: t.column.clone(),
                min: format_number(t.min, precision),
                max: format_number(t.max, precision),
                avg: format_number(t.avg, precision),
            })
            .collect();
        print_header("Numerical Filters");
        print_output(&rows, ctx.format)?;
    }

    if templates.is_empty() {
        println!("No filters available.");
    }
    Ok(())
}
