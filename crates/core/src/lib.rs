//! Spreadsheet rows as records with sanitized field names.
//!
//! A table is loaded from a file whose first row holds human-written column
//! headers. Each header is turned into a stable identifier (`"Amount (USD)"`
//! becomes `amount_usd`) and every data row becomes a [`RecordRow`] whose
//! fields are read and written through those identifiers. Saving writes the
//! original header text back out, so edits round-trip without losing the
//! human-facing names.
//!
//! # Examples
//!
//! ## Loading and editing
//!
//! ```no_run
//! use excelmap_core::{SaveOptions, TableMapper};
//! use std::path::Path;
//!
//! let mut mapper = TableMapper::load("financial_data.xlsx").unwrap();
//! let amount = mapper[1].get("amount_usd").unwrap().as_float();
//!
//! mapper.update_row(0, [("transaction_id", "TXN_2024_001")]).unwrap();
//! mapper.update_column("category", vec!["Travel"; mapper.len()]).unwrap();
//! mapper.save(Some(Path::new("updated.xlsx")), &SaveOptions::default()).unwrap();
//! ```
//!
//! ## Header sanitization
//!
//! ```
//! use excelmap_core::{sanitize_headers, CellValue};
//!
//! let headers = vec![CellValue::from("Qty"), CellValue::from("Qty")];
//! assert_eq!(sanitize_headers(&headers), vec!["qty", "qty_B"]);
//! ```
//!
//! # Supported files
//!
//! - `.xlsx`: read and write
//! - `.xlsm`, `.xls`, `.xlsb`, `.ods`: read only (first worksheet)
//! - `.csv`, `.tsv`: read and write, cells kept as text

mod cell;
mod csv;
mod error;
mod mapper;
mod mapping;
mod naming;
mod row;
mod table;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export error types.
pub use error::{MapperError, Result};
/// Re-export the table mapper and its save options.
pub use mapper::{SaveOptions, SaveStatus, TableMapper};
/// Re-export column mapping types.
pub use mapping::{ColumnInfo, ColumnMapping};
/// Re-export header sanitization.
pub use naming::{column_index_to_letters, sanitize_headers, sanitize_name};
/// Re-export row type.
pub use row::RecordRow;
/// Re-export raw table and file format detection.
pub use table::{Format, RawTable};
