//! Output formatting for calculation reports.
//!
//! Supports multiple output formats: table, JSON, YAML, and plain text.

mod output;

pub use output::{OutputFormat, Report, format_report, format_report_to_string};
