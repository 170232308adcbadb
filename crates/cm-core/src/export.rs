//! Output encoders for the merged customer list
//!
//! The bulk importer consumes the CSV form; JSON is available for
//! inspection and downstream tooling. Both use the renamed serde field
//! names, so the column headers come out in import order.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::customer::{Customer, OUTPUT_COLUMNS};
use crate::error::{Error, Result};

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Default output file name for this encoding
    pub fn default_output(self) -> &'static str {
        match self {
            Format::Csv => "merged_customers.csv",
            Format::Json => "merged_customers.json",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Write the merged list to a file in the requested format
pub fn write_output<P: AsRef<Path>>(
    customers: &[Customer],
    path: P,
    format: Format,
) -> Result<()> {
    match format {
        Format::Csv => write_csv(customers, path),
        Format::Json => write_json(customers, path),
    }
}

/// Write the merged list as a bulk-import CSV
pub fn write_csv<P: AsRef<Path>>(customers: &[Customer], path: P) -> Result<()> {
    let path = path.as_ref();
    let encoded = to_csv_string(customers)?;
    fs::write(path, encoded).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the merged list as a pretty-printed JSON array
pub fn write_json<P: AsRef<Path>>(customers: &[Customer], path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(customers)?;
    fs::write(path, json).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode the merged list as CSV in memory, header line included
pub fn to_csv_string(customers: &[Customer]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // serde only emits headers alongside the first record; an empty run
    // still needs the header line for the importer.
    if customers.is_empty() {
        writer.write_record(&OUTPUT_COLUMNS)?;
    }
    for customer in customers {
        writer.serialize(customer)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
