//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with who is on the board, not which file they came from. Each
//! record is a header line (positional index + name) followed by indented
//! context lines for city, year and any naming error. Files appear only in
//! live ingest lines, where the filename is what the user needs to fix.
//!
//! # Output Format
//!
//! ## Inventory
//!
//! ```text
//! Board
//! 001 DOE John
//!     City: PARIS
//!     Year: Année de 1ère inscription 2021
//! 002 holiday
//!     Error: Le nom du fichier ne correspond pas ...
//!
//! Naming errors
//!     holiday
//!
//! 2 records, 1 with naming errors
//! ```
//!
//! ## Ingest events
//!
//! ```text
//! ok    DOE John PARIS Année de 1ère inscription 2021.jpg → DOE John
//! error holiday.jpg → holiday
//! fail  gone.jpg: Cannot read gone.jpg: No such file or directory
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::scan::{IngestEvent, IngestSummary};
use crate::store::RecordStore;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format the board inventory: every record, then the error subset.
pub fn format_inventory(store: &RecordStore) -> Vec<String> {
    let mut lines = vec!["Board".to_string()];

    for (i, record) in store.all().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), record.name));
        if !record.city.is_empty() {
            lines.push(format!("    City: {}", record.city));
        }
        if !record.year.is_empty() {
            lines.push(format!("    Year: {}", record.year));
        }
        if record.has_error() {
            lines.push(format!("    Error: {}", record.error_message()));
        }
    }

    lines.extend(format_errors(store));
    lines
}

/// Format only the records in error. Empty when there are none.
pub fn format_errors(store: &RecordStore) -> Vec<String> {
    let errored = store.errored();
    if errored.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Naming errors".to_string()];
    lines.extend(errored.iter().map(|r| format!("    {}", r.name)));
    lines
}

/// Format a single ingest event as one line.
pub fn format_ingest_event(event: &IngestEvent) -> String {
    match event {
        IngestEvent::Parsed {
            filename,
            name,
            error: None,
        } => format!("ok    {filename} → {name}"),
        IngestEvent::Parsed {
            filename,
            name,
            error: Some(_),
        } => format!("error {filename} → {name}"),
        IngestEvent::ReadFailed { filename, reason } => format!("fail  {filename}: {reason}"),
    }
}

/// One-line totals for the store plus anything lost during ingest.
pub fn format_summary(store: &RecordStore, summary: &IngestSummary) -> String {
    let mut line = format!(
        "{}, {} with naming errors",
        plural(store.len(), "record", "records"),
        store.errored().len()
    );
    if summary.read_failures > 0 {
        line.push_str(&format!(", {} unreadable", summary.read_failures));
    }
    line
}

/// Print the inventory and summary to stdout.
pub fn print_inventory(store: &RecordStore, summary: &IngestSummary) {
    for line in format_inventory(store) {
        println!("{}", line);
    }
    println!();
    println!("{}", format_summary(store, summary));
}

/// Print the error subset and summary to stdout.
pub fn print_errors(store: &RecordStore, summary: &IngestSummary) {
    for line in format_errors(store) {
        println!("{}", line);
    }
    println!("{}", format_summary(store, summary));
}
