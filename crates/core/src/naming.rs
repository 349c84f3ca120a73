//! Header text to field identifier sanitization.

use crate::cell::CellValue;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn invalid_run() -> &'static Regex {
    static INVALID_RUN: OnceLock<Regex> = OnceLock::new();
    INVALID_RUN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static pattern"))
}

/// Sanitize a single header into its base identifier.
///
/// Lowercases the text, turns every run of characters outside `[a-z0-9]`
/// into one underscore and strips underscores from both ends. A header with
/// no valid characters becomes the empty string.
#[must_use]
pub fn sanitize_name(header: &str) -> String {
    let lowered = header.to_lowercase();
    invalid_run()
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Sanitize an ordered list of headers into unique identifiers.
///
/// A header whose base identifier was already produced earlier in the list
/// gets `_` plus the spreadsheet letters of its own column position
/// (`qty_B` for a repeat in the second column). Bases are lowercase and
/// suffixes are uppercase, so a suffixed name never collides with another
/// identifier.
///
/// ```
/// use excelmap_core::{sanitize_headers, CellValue};
///
/// let headers = vec![CellValue::from("Transaction ID"), CellValue::from("Amount (USD)")];
/// assert_eq!(sanitize_headers(&headers), vec!["transaction_id", "amount_usd"]);
/// ```
#[must_use]
pub fn sanitize_headers(headers: &[CellValue]) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let base = sanitize_name(&header.to_string());
            if seen.contains(&base) {
                format!("{base}_{}", column_index_to_letters(index))
            } else {
                seen.insert(base.clone());
                base
            }
        })
        .collect()
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
#[must_use]
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}
