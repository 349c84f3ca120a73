//! The tabular hand-off between file formats and [`crate::TableMapper`].

use crate::cell::CellValue;
use crate::error::{MapperError, Result};
use std::path::Path;

/// Header row plus positional data rows, as read from or written to a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        RawTable { headers, rows }
    }

    /// Build a table from a header row and data rows of any convertible type
    #[must_use]
    pub fn from_data<H, T>(headers: Vec<H>, rows: Vec<Vec<T>>) -> Self
    where
        H: Into<CellValue>,
        T: Into<CellValue>,
    {
        RawTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Read a table, picking the format from the file extension
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Format::from_path(path)? {
            Format::Xlsx | Format::Workbook => Self::read_workbook(path),
            Format::Csv => Self::read_delimited(path, b','),
            Format::Tsv => Self::read_delimited(path, b'\t'),
        }
    }

    /// Write a table, picking the format from the file extension
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Format::from_path(path)? {
            Format::Xlsx => self.write_xlsx(path),
            Format::Csv => self.write_delimited(path, b','),
            Format::Tsv => self.write_delimited(path, b'\t'),
            Format::Workbook => Err(MapperError::io(
                path,
                "writing this workbook format is not supported, save as .xlsx",
            )),
        }
    }
}

/// File formats, detected from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Excel 2007+ workbook, read and write
    Xlsx,
    /// Other workbook formats (xlsm, xls, xlsb, ods), read only
    Workbook,
    Csv,
    Tsv,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(Format::Xlsx),
            "xlsm" | "xls" | "xlsb" | "ods" => Ok(Format::Workbook),
            "csv" => Ok(Format::Csv),
            "tsv" => Ok(Format::Tsv),
            _ => Err(MapperError::io(
                path,
                format!("unsupported format '{ext}'"),
            )),
        }
    }
}
