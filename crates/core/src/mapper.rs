use crate::cell::CellValue;
use crate::error::{MapperError, Result};
use crate::mapping::{ColumnInfo, ColumnMapping};
use crate::row::RecordRow;
use crate::table::RawTable;
use indexmap::IndexMap;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Options for [`TableMapper::save`]
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Whether an existing destination file may be replaced
    pub overwrite: bool,
    /// Whether saving without a destination writes back over the loaded file
    pub overwrite_source: bool,
}

impl SaveOptions {
    /// Set whether an existing destination may be replaced
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set whether a save with no destination goes back to the source file
    #[must_use]
    pub fn with_source_overwrite(mut self, overwrite_source: bool) -> Self {
        self.overwrite_source = overwrite_source;
        self
    }
}

/// What [`TableMapper::save`] did to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Created,
    Overwrote,
}

/// A loaded table whose rows are addressed by sanitized field names.
///
/// ```
/// use excelmap_core::{CellValue, RawTable, TableMapper};
///
/// let mut mapper = TableMapper::from_table(RawTable::from_data(
///     vec!["Transaction ID", "Amount (USD)"],
///     vec![vec![CellValue::from("TXN-1"), CellValue::from(12.5)]],
/// ));
///
/// assert_eq!(mapper.attribute_names(), vec!["transaction_id", "amount_usd"]);
/// mapper.update_row(0, [("amount_usd", 20.0)]).unwrap();
/// assert_eq!(mapper[0].get("amount_usd").unwrap(), &CellValue::Float(20.0));
/// ```
#[derive(Debug, Clone)]
pub struct TableMapper {
    source: Option<PathBuf>,
    mapping: Arc<ColumnMapping>,
    rows: Vec<RecordRow>,
}

impl TableMapper {
    /// Load a table from a spreadsheet or delimited text file.
    ///
    /// The first row holds the headers; every following row becomes a
    /// [`RecordRow`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = RawTable::read(path)?;
        let mut mapper = Self::from_table(table);
        mapper.source = Some(path.to_path_buf());

        debug!(
            path = %path.display(),
            columns = mapper.mapping.len(),
            rows = mapper.rows.len(),
            "loaded table"
        );
        Ok(mapper)
    }

    /// Build a mapper from an in-memory table with no source file
    #[must_use]
    pub fn from_table(table: RawTable) -> Self {
        let mapping = Arc::new(ColumnMapping::from_headers(&table.headers));
        let rows = table
            .rows
            .into_iter()
            .map(|values| RecordRow::new(Arc::clone(&mapping), values))
            .collect();

        TableMapper {
            source: None,
            mapping,
            rows,
        }
    }

    /// The file this table was loaded from
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    // ===== Row Access =====

    /// Get the number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordRow> {
        self.rows.iter()
    }

    /// Get a row by index (0-based, first data row is 0)
    pub fn row(&self, index: usize) -> Result<&RecordRow> {
        let count = self.rows.len();
        self.rows
            .get(index)
            .ok_or(MapperError::RowIndexOutOfBounds { index, count })
    }

    /// Get a mutable row by index (0-based)
    pub fn row_mut(&mut self, index: usize) -> Result<&mut RecordRow> {
        let count = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(MapperError::RowIndexOutOfBounds { index, count })
    }

    // ===== Column Mapping =====

    /// Original header -> identifier
    #[must_use]
    pub fn column_mapping(&self) -> IndexMap<String, String> {
        self.mapping.header_to_identifier()
    }

    /// Original header text in column order
    #[must_use]
    pub fn original_columns(&self) -> Vec<&str> {
        self.mapping.headers().collect()
    }

    /// Identifiers in column order
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.mapping.identifiers().collect()
    }

    #[must_use]
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        self.mapping.column_info()
    }

    // ===== Mutation =====

    /// Overwrite fields of one row.
    ///
    /// All field names are checked before anything is written, so a failed
    /// call leaves the row untouched.
    pub fn update_row<I, K, V>(&mut self, index: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        let count = self.rows.len();
        if index >= count {
            return Err(MapperError::RowIndexOutOfBounds { index, count });
        }

        let updates = self.resolve_fields(values)?;
        let row = &mut self.rows[index];
        for (field, value) in updates {
            row.set(&field, value)?;
        }
        Ok(())
    }

    /// Overwrite one field across all rows, positionally.
    ///
    /// The identifier is checked against the column mapping, so unknown
    /// names are rejected even when the table has no rows.
    pub fn update_column<V: Into<CellValue>>(&mut self, field: &str, values: Vec<V>) -> Result<()> {
        if !self.mapping.contains(field) {
            return Err(MapperError::unknown_field(field));
        }

        if values.len() != self.rows.len() {
            return Err(MapperError::LengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.set(field, value)?;
        }
        Ok(())
    }

    /// Append a row. Fields not supplied are absent.
    pub fn add_row<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        let mut cells = vec![CellValue::Null; self.mapping.len()];
        for (field, value) in self.resolve_fields(values)? {
            if let Some(position) = self.mapping.position(&field) {
                cells[position] = value;
            }
        }

        self.rows
            .push(RecordRow::new(Arc::clone(&self.mapping), cells));
        Ok(())
    }

    /// Append a row where every field is absent
    pub fn add_blank_row(&mut self) {
        self.rows.push(RecordRow::new(
            Arc::clone(&self.mapping),
            vec![CellValue::Null; self.mapping.len()],
        ));
    }

    fn resolve_fields<I, K, V>(&self, values: I) -> Result<Vec<(String, CellValue)>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<CellValue>,
    {
        values
            .into_iter()
            .map(|(field, value)| {
                let field = field.as_ref();
                if self.mapping.contains(field) {
                    Ok((field.to_string(), value.into()))
                } else {
                    Err(MapperError::unknown_field(field))
                }
            })
            .collect()
    }

    // ===== Save =====

    /// Rebuild the tabular data that [`TableMapper::save`] writes: the
    /// original header text and every row's current field values.
    #[must_use]
    pub fn to_table(&self) -> RawTable {
        RawTable {
            headers: self
                .mapping
                .headers()
                .map(|h| CellValue::String(h.to_string()))
                .collect(),
            rows: self.rows.iter().map(|row| row.values().to_vec()).collect(),
        }
    }

    /// Save the current data.
    ///
    /// With no destination the data goes back to the source file, which
    /// requires `overwrite_source`. An existing destination is only
    /// replaced with `overwrite`.
    pub fn save(&self, destination: Option<&Path>, options: &SaveOptions) -> Result<SaveStatus> {
        let target = match destination {
            Some(path) => {
                if !options.overwrite && path.exists() {
                    return Err(MapperError::AlreadyExists {
                        path: path.to_path_buf(),
                    });
                }
                path
            }
            None => {
                if !options.overwrite_source {
                    return Err(MapperError::MissingDestination(
                        "source overwrite must be enabled to save over the original file"
                            .to_string(),
                    ));
                }
                self.source.as_deref().ok_or_else(|| {
                    MapperError::MissingDestination(
                        "table was not loaded from a file".to_string(),
                    )
                })?
            }
        };

        let status = if target.exists() {
            SaveStatus::Overwrote
        } else {
            SaveStatus::Created
        };

        self.to_table().write(target)?;

        match status {
            SaveStatus::Overwrote => info!(path = %target.display(), "updated the sheet"),
            SaveStatus::Created => info!(path = %target.display(), "created new file"),
        }
        Ok(status)
    }
}

impl Index<usize> for TableMapper {
    type Output = RecordRow;

    fn index(&self, index: usize) -> &RecordRow {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a TableMapper {
    type Item = &'a RecordRow;
    type IntoIter = std::slice::Iter<'a, RecordRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
