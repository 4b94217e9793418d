//! Table formatting utilities for CLI list commands
//!
//! One rendering path for every list command: callers hand over headers
//! plus stringified rows and the selected output format. Structured
//! formats (json/yaml) are serialized by the caller from the typed rows
//! instead, since only the caller knows the field names.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 item(s)")
    pub show_summary: bool,
    /// Noun used in the summary line
    pub noun: &'static str,
}

impl TableConfig {
    pub fn new(noun: &'static str) -> Self {
        Self {
            show_summary: true,
            noun,
        }
    }

    /// Create config optimized for piping (no summary)
    pub fn for_pipe(noun: &'static str) -> Self {
        Self {
            show_summary: false,
            noun,
        }
    }
}

/// Render rows in the requested format. `Auto` falls back to a boxed
/// terminal table; the name column is assumed to be first for `Name`.
pub fn render(
    headers: &[&str],
    rows: &[Vec<String>],
    format: OutputFormat,
    config: &TableConfig,
) {
    match format {
        OutputFormat::Tsv => {
            println!("{}", headers.join("\t"));
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
        OutputFormat::Csv => {
            println!(
                "{}",
                headers
                    .iter()
                    .map(|h| escape_csv(h))
                    .collect::<Vec<_>>()
                    .join(",")
            );
            for row in rows {
                println!(
                    "{}",
                    row.iter()
                        .map(|c| escape_csv(c))
                        .collect::<Vec<_>>()
                        .join(",")
                );
            }
        }
        OutputFormat::Name => {
            for row in rows {
                if let Some(first) = row.first() {
                    println!("{}", first);
                }
            }
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for row in rows {
                builder.push_record(row.iter().map(String::as_str));
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        // Auto, and the structured formats when a caller didn't special-case
        // them, all land on the boxed terminal table.
        _ => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for row in rows {
                builder.push_record(row.iter().map(String::as_str));
            }
            println!("{}", builder.build().with(Style::sharp()));
            if config.show_summary {
                println!("{} {}(s)", rows.len(), config.noun);
            }
        }
    }
}
