//! Customer Merge CLI
//!
//! Command-line tool that normalizes a master contact export and a web-form
//! submission export into one deduplicated customer list for bulk import.

use clap::Parser;
use cm_core::{
    merge_customers, parse_rows_file, transform_form_rows, transform_master_rows, write_output,
    Format, RunSummary,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cm-cli")]
#[command(about = "Merge customer exports into one bulk-import list", long_about = None)]
#[command(version)]
struct Cli {
    /// Master contact export (CSV)
    master: PathBuf,

    /// Web-form submission export (CSV)
    form: PathBuf,

    /// Output file path (defaults to merged_customers.csv / .json)
    output: Option<PathBuf>,

    /// Output format (csv or json)
    #[arg(long, default_value = "csv")]
    format: Format,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> cm_core::Result<()> {
    let cli = Cli::parse();

    let master_rows = parse_rows_file(&cli.master)?;
    let form_rows = parse_rows_file(&cli.form)?;

    let master_customers = transform_master_rows(&master_rows);
    let form_customers = transform_form_rows(&form_rows);

    let master_count = master_customers.len();
    let form_count = form_customers.len();

    let merged = merge_customers(master_customers, form_customers);

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(cli.format.default_output()));
    write_output(&merged, &output, cli.format)?;

    let summary = RunSummary::new(master_count, form_count, merged.len());
    println!("{}", summary);
    println!("Output: {}", output.display());

    Ok(())
}
