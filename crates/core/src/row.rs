use crate::cell::CellValue;
use crate::error::{MapperError, Result};
use crate::mapping::ColumnMapping;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// One data row, readable by original header and by identifier.
///
/// The original values are kept as loaded. Field values start as a copy of
/// them and change independently through [`RecordRow::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    mapping: Arc<ColumnMapping>,
    original: Vec<CellValue>,
    fields: Vec<CellValue>,
}

impl RecordRow {
    /// Build a row from positional cell values.
    ///
    /// Values are aligned to the mapping's columns: missing trailing cells
    /// become `Null`, extra cells are dropped.
    pub(crate) fn new(mapping: Arc<ColumnMapping>, mut values: Vec<CellValue>) -> Self {
        values.resize(mapping.len(), CellValue::Null);
        RecordRow {
            mapping,
            fields: values.clone(),
            original: values,
        }
    }

    /// Get a field by identifier
    pub fn get(&self, field: &str) -> Result<&CellValue> {
        let index = self.index_of(field)?;
        Ok(&self.fields[index])
    }

    /// Set a field by identifier
    pub fn set<T: Into<CellValue>>(&mut self, field: &str, value: T) -> Result<()> {
        let index = self.index_of(field)?;
        self.fields[index] = value.into();
        Ok(())
    }

    /// Get the loaded value of the first column carrying this header text
    #[must_use]
    pub fn original(&self, header: &str) -> Option<&CellValue> {
        self.mapping
            .headers()
            .position(|h| h == header)
            .map(|index| &self.original[index])
    }

    /// (header, loaded value) pairs in column order
    pub fn original_values(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.mapping.headers().zip(self.original.iter())
    }

    /// (identifier, current value) pairs in column order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.mapping.identifiers().zip(self.fields.iter())
    }

    /// Original header text behind an identifier
    #[must_use]
    pub fn original_column_name(&self, field: &str) -> Option<&str> {
        self.mapping.header_of(field)
    }

    /// Loaded values keyed by header merged with current values keyed by
    /// identifier. On a key clash the identifier entry wins.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, CellValue> {
        let mut map: IndexMap<String, CellValue> = self
            .original_values()
            .map(|(header, value)| (header.to_string(), value.clone()))
            .collect();
        for (field, value) in self.fields() {
            map.insert(field.to_string(), value.clone());
        }
        map
    }

    pub(crate) fn values(&self) -> &[CellValue] {
        &self.fields
    }

    fn index_of(&self, field: &str) -> Result<usize> {
        self.mapping
            .position(field)
            .ok_or_else(|| MapperError::unknown_field(field))
    }
}

impl fmt::Display for RecordRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row(")?;
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                CellValue::Null => write!(f, "{field}=None")?,
                CellValue::String(s) => write!(f, "{field}={s:?}")?,
                other => write!(f, "{field}={other}")?,
            }
        }
        write!(f, ")")
    }
}
