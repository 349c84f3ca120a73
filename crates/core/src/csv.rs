use crate::cell::CellValue;
use crate::error::{MapperError, Result};
use crate::table::RawTable;
use std::path::Path;
use tracing::warn;

impl RawTable {
    /// Read a delimited text file. The first record is the header row, empty
    /// fields are the missing sentinel and everything else stays text.
    pub(crate) fn read_delimited(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| MapperError::io(path, e))?;

        let headers: Vec<CellValue> = reader
            .headers()
            .map_err(|e| MapperError::io(path, e))?
            .iter()
            .map(|h| CellValue::String(h.to_string()))
            .collect();

        let mut rows = Vec::new();
        let mut ragged = 0usize;
        for result in reader.records() {
            let record = result.map_err(|e| MapperError::io(path, e))?;
            if record.len() != headers.len() {
                ragged += 1;
            }
            let mut row: Vec<CellValue> = record.iter().map(field_to_cell_value).collect();
            row.resize(headers.len(), CellValue::Null);
            rows.push(row);
        }

        if ragged > 0 {
            warn!(
                path = %path.display(),
                records = ragged,
                "records with a different field count than the header were padded or truncated"
            );
        }

        Ok(RawTable { headers, rows })
    }

    /// Write the header row and data rows as delimited text.
    pub(crate) fn write_delimited(&self, path: &Path, delimiter: u8) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(path)
            .map_err(|e| MapperError::io(path, e))?;

        writer
            .write_record(self.headers.iter().map(ToString::to_string))
            .map_err(|e| MapperError::io(path, e))?;

        for row in &self.rows {
            writer
                .write_record(row.iter().map(ToString::to_string))
                .map_err(|e| MapperError::io(path, e))?;
        }

        writer.flush().map_err(|e| MapperError::io(path, e))?;
        Ok(())
    }
}

fn field_to_cell_value(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Null
    } else {
        CellValue::String(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_missing_fields_become_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Name,Amount (USD)\nAlice,10\nBob,\n").unwrap();

        let table = RawTable::read(&path).unwrap();
        assert_eq!(
            table.headers,
            vec![CellValue::from("Name"), CellValue::from("Amount (USD)")]
        );
        assert_eq!(table.rows[0][1], CellValue::from("10"));
        assert_eq!(table.rows[1][1], CellValue::Null);
    }

    #[test]
    fn test_csv_ragged_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b,c\n1\n1,2,3,4\n").unwrap();

        let table = RawTable::read(&path).unwrap();
        assert_eq!(table.rows[0], vec!["1".into(), CellValue::Null, CellValue::Null]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_tsv_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        let table = RawTable::new(
            vec!["Qty".into(), "Note, free text".into()],
            vec![vec!["3".into(), CellValue::Null]],
        );
        table.write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Qty\tNote, free text\n"));

        let loaded = RawTable::read(&path).unwrap();
        assert_eq!(loaded, table);
    }
}
