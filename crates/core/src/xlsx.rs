use crate::cell::CellValue;
use crate::error::{MapperError, Result};
use crate::table::RawTable;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Convert calamine Data to CellValue. `Data::Empty` is the missing sentinel.
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl RawTable {
    /// Read the first worksheet of a workbook. Its first row is the header row.
    pub(crate) fn read_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| MapperError::io(path, e))?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(RawTable::default());
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| MapperError::io(path, e))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect::<Vec<_>>());
        let headers = rows.next().unwrap_or_default();
        let rows: Vec<Vec<CellValue>> = rows.collect();

        debug!(
            sheet = %sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "read worksheet"
        );

        Ok(RawTable { headers, rows })
    }

    /// Write the table as a single-sheet xlsx workbook
    pub(crate) fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        self.write_to_worksheet(worksheet, path)?;

        workbook.save(path).map_err(|e| MapperError::io(path, e))?;

        Ok(())
    }

    fn write_to_worksheet(&self, worksheet: &mut Worksheet, path: &Path) -> Result<()> {
        for (col_idx, header) in self.headers.iter().enumerate() {
            let col_num = column_number(col_idx, path)?;
            worksheet
                .write_string(0, col_num, header.to_string())
                .map_err(|e| MapperError::io(path, e))?;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1)
                .map_err(|_| MapperError::io(path, "Row index overflow"))?;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = column_number(col_idx, path)?;

                match cell {
                    CellValue::Null => {} // Leave empty
                    CellValue::Bool(b) => {
                        worksheet
                            .write_boolean(row_num, col_num, *b)
                            .map_err(|e| MapperError::io(path, e))?;
                    }
                    CellValue::Int(i) => {
                        // Note: Excel stores all numbers as f64, so integers > 2^53
                        // may lose precision
                        worksheet
                            .write_number(row_num, col_num, *i as f64)
                            .map_err(|e| MapperError::io(path, e))?;
                    }
                    CellValue::Float(f) => {
                        worksheet
                            .write_number(row_num, col_num, *f)
                            .map_err(|e| MapperError::io(path, e))?;
                    }
                    CellValue::String(s) => {
                        worksheet
                            .write_string(row_num, col_num, s)
                            .map_err(|e| MapperError::io(path, e))?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn column_number(col_idx: usize, path: &Path) -> Result<u16> {
    u16::try_from(col_idx).map_err(|_| MapperError::io(path, "Column index overflow"))
}
