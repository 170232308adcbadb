//! Best-effort parser for loosely-structured delimited exports

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A single data line keyed by the header tokens
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Look up a field by header name; absent keys read as empty
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }

    /// Header names captured for this row
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of captured fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row captured no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse delimited text into header-keyed rows.
///
/// The first line supplies the keys: its comma-split tokens, in order, with
/// no quote handling. Data lines with fewer fields than the header are
/// dropped; extra trailing fields are ignored. Content with fewer than two
/// lines yields no rows. Malformed quoting never fails; the parser always
/// terminates with whatever rows qualified.
pub fn parse_rows(content: &str) -> Vec<RawRow> {
    let mut lines = content.trim().lines();

    let headers: Vec<&str> = match lines.next() {
        Some(header_line) => header_line.split(',').collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for line in lines {
        let values = split_line(line);
        if values.len() < headers.len() {
            continue;
        }
        let fields = headers
            .iter()
            .zip(values)
            .map(|(header, value)| ((*header).to_string(), value))
            .collect();
        rows.push(RawRow { fields });
    }
    rows
}

/// Read and parse a source file from disk
pub fn parse_rows_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_rows(&content))
}

/// Split one data line into trimmed fields.
///
/// A double quote toggles the quoted state unless the previous character is
/// a backslash; commas separate fields only outside quotes. Unescaped quote
/// characters are consumed, not carried into the field value.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut prev = None;

    for ch in line.chars() {
        match ch {
            '"' if prev != Some('\\') => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
        prev = Some(ch);
    }
    fields.push(current.trim().to_string());
    fields
}
