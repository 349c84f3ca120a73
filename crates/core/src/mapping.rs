use crate::cell::CellValue;
use crate::naming::sanitize_headers;
use indexmap::IndexMap;
use serde::Serialize;

/// One column as seen from both sides of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub index: usize,
    pub original_name: String,
    pub attribute_name: String,
}

/// Ordered identifier -> original header association for one table.
///
/// Built once when a table is loaded and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    columns: IndexMap<String, String>,
}

impl ColumnMapping {
    /// Build the mapping by sanitizing the raw header row
    #[must_use]
    pub fn from_headers(headers: &[CellValue]) -> Self {
        let identifiers = sanitize_headers(headers);
        let columns = identifiers
            .into_iter()
            .zip(headers.iter().map(ToString::to_string))
            .collect();
        ColumnMapping { columns }
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Identifiers in column order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Original header text in column order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    /// (identifier, header) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.columns.contains_key(identifier)
    }

    /// Column position of an identifier
    #[must_use]
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.columns.get_index_of(identifier)
    }

    /// Original header text behind an identifier
    #[must_use]
    pub fn header_of(&self, identifier: &str) -> Option<&str> {
        self.columns.get(identifier).map(String::as_str)
    }

    /// Inverse view: original header -> identifier.
    ///
    /// Header text repeated across columns keeps its first position and maps
    /// to the identifier of its last occurrence.
    #[must_use]
    pub fn header_to_identifier(&self) -> IndexMap<String, String> {
        self.columns
            .iter()
            .map(|(identifier, header)| (header.clone(), identifier.clone()))
            .collect()
    }

    #[must_use]
    pub fn column_info(&self) -> Vec<ColumnInfo> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, (attribute_name, original_name))| ColumnInfo {
                index,
                original_name: original_name.clone(),
                attribute_name: attribute_name.clone(),
            })
            .collect()
    }
}
