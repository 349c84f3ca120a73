//! # excelmap-cli
//!
//! Command-line interface for inspecting and editing spreadsheets through
//! sanitized field names.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use excelmap_core::{CellValue, RecordRow, SaveOptions, SaveStatus, TableMapper};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// excelmap - spreadsheet rows addressed by sanitized column names
#[derive(Parser)]
#[command(name = "excelmap")]
#[command(author, version, about = "Read and edit spreadsheet rows by field name", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show original headers and their field names
    Columns {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (json, table)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
    /// Show rows as field maps
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only show this row (0-based)
        #[arg(short, long)]
        row: Option<usize>,

        /// Output format (json, table)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
    /// Set fields on one row
    Update {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row to update (0-based)
        #[arg(short, long)]
        row: usize,

        /// Field assignments
        #[arg(value_name = "FIELD=VALUE", required = true)]
        values: Vec<String>,

        #[command(flatten)]
        save: SaveArgs,
    },
    /// Replace every value of one field
    Fill {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field name to replace
        #[arg(short, long)]
        column: String,

        /// One value per row
        #[arg(value_name = "VALUE")]
        values: Vec<String>,

        #[command(flatten)]
        save: SaveArgs,
    },
    /// Append a row
    Append {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field assignments; unset fields stay empty
        #[arg(value_name = "FIELD=VALUE")]
        values: Vec<String>,

        #[command(flatten)]
        save: SaveArgs,
    },
}

#[derive(clap::Args)]
struct SaveArgs {
    /// Write the result here instead of over the input file
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Allow replacing an existing file (the input file when no output is given)
    #[arg(long)]
    overwrite: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Plain table output (default)
    #[default]
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Command::Columns { file, format } => {
            let mapper = load(&file)?;
            print_columns(&mapper, format)
        }
        Command::Show { file, row, format } => {
            let mapper = load(&file)?;
            match row {
                Some(index) => print_rows(&mapper, &[mapper.row(index)?], format),
                None => print_rows(&mapper, &mapper.iter().collect::<Vec<_>>(), format),
            }
        }
        Command::Update {
            file,
            row,
            values,
            save,
        } => {
            let mut mapper = load(&file)?;
            let assignments = parse_assignments(&values)?;
            mapper.update_row(row, assignments)?;
            save_mapper(&mapper, save)
        }
        Command::Fill {
            file,
            column,
            values,
            save,
        } => {
            let mut mapper = load(&file)?;
            let values: Vec<CellValue> = values.iter().map(|v| parse_cli_value(v)).collect();
            mapper.update_column(&column, values)?;
            save_mapper(&mapper, save)
        }
        Command::Append { file, values, save } => {
            let mut mapper = load(&file)?;
            let assignments = parse_assignments(&values)?;
            mapper.add_row(assignments)?;
            save_mapper(&mapper, save)
        }
    }
}

fn load(file: &Path) -> Result<TableMapper> {
    let mapper =
        TableMapper::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    tracing::info!(
        columns = mapper.mapping().len(),
        rows = mapper.len(),
        "loaded {}",
        file.display()
    );
    Ok(mapper)
}

fn save_mapper(mapper: &TableMapper, args: SaveArgs) -> Result<()> {
    let options = SaveOptions::default()
        .with_overwrite(args.overwrite)
        .with_source_overwrite(args.overwrite);

    let status = mapper
        .save(args.output.as_deref(), &options)
        .context("Failed to save")?;

    match status {
        SaveStatus::Overwrote => println!("{}", "== Updated the sheet ==".green()),
        SaveStatus::Created => println!("{}", "== New file created ==".green()),
    }
    Ok(())
}

/// Parse FIELD=VALUE arguments.
fn parse_assignments(values: &[String]) -> Result<Vec<(String, CellValue)>> {
    values
        .iter()
        .map(|var| {
            let Some((key, value)) = var.split_once('=') else {
                bail!("Invalid assignment: '{var}'. Expected FIELD=VALUE format");
            };
            Ok((key.to_string(), parse_cli_value(value)))
        })
        .collect()
}

/// Parse a CLI value string into a CellValue.
fn parse_cli_value(s: &str) -> CellValue {
    if s.is_empty() || s.eq_ignore_ascii_case("null") {
        CellValue::Null
    } else if s.eq_ignore_ascii_case("true") {
        CellValue::Bool(true)
    } else if s.eq_ignore_ascii_case("false") {
        CellValue::Bool(false)
    } else if let Ok(n) = s.parse::<i64>() {
        CellValue::Int(n)
    } else if let Ok(f) = s.parse::<f64>() {
        CellValue::Float(f)
    } else {
        CellValue::String(s.to_string())
    }
}

fn print_columns(mapper: &TableMapper, format: OutputFormat) -> Result<()> {
    let info = mapper.column_info();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Table => {
            println!(
                "{}\t{}\t{}",
                "#".bold(),
                "original".bold(),
                "field".bold()
            );
            for column in info {
                println!(
                    "{}\t{}\t{}",
                    column.index,
                    column.original_name,
                    column.attribute_name.cyan()
                );
            }
        }
    }
    Ok(())
}

fn print_rows(mapper: &TableMapper, rows: &[&RecordRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json: Vec<IndexMap<&str, &CellValue>> =
                rows.iter().map(|row| row.fields().collect()).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("{}", mapper.attribute_names().join("\t").bold());
            for row in rows {
                let cells: Vec<String> = row.fields().map(|(_, v)| format_value(v)).collect();
                println!("{}", cells.join("\t"));
            }
        }
    }
    Ok(())
}

/// Format a cell value for display.
fn format_value(value: &CellValue) -> String {
    match value {
        CellValue::Null => "null".dimmed().to_string(),
        other => other.to_string(),
    }
}
