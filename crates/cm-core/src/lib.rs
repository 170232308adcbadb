//! cm-core: Core library for normalizing and merging customer exports
//!
//! This library provides functionality to:
//! - Parse loosely-structured delimited exports into header-keyed rows
//! - Normalize idiosyncratic source fields onto one canonical schema
//! - Merge two partial record sets into a deduplicated customer list
//! - Encode the merged list for bulk import (CSV or JSON)

pub mod customer;
pub mod error;
pub mod export;
pub mod merge;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod transform;

pub use customer::{is_present, Customer};
pub use error::{Error, Result};
pub use export::{to_csv_string, write_csv, write_json, write_output, Format};
pub use merge::{merge_customers, union_tags};
pub use normalize::{clean_tags, format_birth_date, map_referral_source, parse_address, Address};
pub use parser::{parse_rows, parse_rows_file, RawRow};
pub use report::RunSummary;
pub use transform::{transform_form_rows, transform_master_rows, FormRow, MasterRow};
