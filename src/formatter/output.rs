//! Rendering of per-workload usages and the aggregated total.

use crate::calc::{ResourceUsage, Resources, total};
use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use std::fmt::Display;
use serde::{Deserialize, Serialize};

// ============================================================================
// Output Format
// ============================================================================

/// Output format for calculation reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Per-workload table (with --detailed) followed by the totals
    #[default]
    Table,
    /// JSON document with every usage and the totals
    Json,
    /// YAML document with every usage and the totals
    Yaml,
    /// The totals only
    Summary,
}

// ============================================================================
// Report
// ============================================================================

/// Everything a calculation run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub usages: Vec<ResourceUsage>,
    pub total: Resources,
    /// Simultaneous rollouts assumed for `total`; negative means all.
    pub max_rollouts: i64,
}

impl Report {
    pub fn new(usages: Vec<ResourceUsage>, max_rollouts: i64) -> Self {
        let total = total(max_rollouts, &usages);
        Self {
            usages,
            total,
            max_rollouts,
        }
    }
}

// ============================================================================
// Formatting Functions
// ============================================================================

/// Format a report to string.
pub fn format_report_to_string(report: &Report, format: OutputFormat, detailed: bool) -> String {
    match format {
        OutputFormat::Table if detailed => format_table(report),
        OutputFormat::Table | OutputFormat::Summary => format_summary(&report.total),
        OutputFormat::Json => format_json(report),
        OutputFormat::Yaml => format_yaml(report),
    }
}

/// Format and print a report.
pub fn format_report(report: &Report, format: OutputFormat, detailed: bool) {
    print!("{}", format_report_to_string(report, format, detailed));
}

// ============================================================================
// Table Format
// ============================================================================

fn format_table(report: &Report) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row![
        "Version",
        "Kind",
        "Name",
        "Replicas",
        "Strategy",
        "MaxReplicas",
        "CPURequest",
        "CPULimit",
        "MemoryRequest",
        "MemoryLimit"
    ]);

    for usage in &report.usages {
        let details = &usage.details;
        let rollout = &usage.rollout_resources;
        table.add_row(Row::new(vec![
            Cell::new(&details.version),
            Cell::new(&details.kind),
            Cell::new(&details.name),
            number(details.replicas),
            Cell::new(&details.strategy),
            number(details.max_replicas),
            number(rollout.cpu_min),
            number(rollout.cpu_max),
            number(rollout.memory_min),
            number(rollout.memory_max),
        ]));
    }

    let mut output = table.to_string();

    output.push('\n');
    if report.max_rollouts < 0 {
        output.push_str(&format!(
            "{}\n",
            "Table and Total assuming simultaneous rollout of all resources".dimmed()
        ));
    } else {
        output.push_str(&format!(
            "{}\n",
            "Table assuming simultaneous rollout of all resources".dimmed()
        ));
        output.push_str(&format!(
            "{}\n",
            format!(
                "Total assuming simultaneous rollout of {} resources",
                report.max_rollouts
            )
            .dimmed()
        ));
    }

    output.push_str(&format!("\n{}\n", "Total".bold()));
    output.push_str(&format_summary(&report.total));

    output
}

/// A right-aligned cell.
fn number(value: impl Display) -> Cell {
    Cell::new(&value.to_string()).style_spec("r")
}

// ============================================================================
// Summary Format
// ============================================================================

fn format_summary(total: &Resources) -> String {
    format!(
        "CPU Request: {}\nCPU Limit: {}\nMemory Request: {}\nMemory Limit: {}\n",
        total.cpu_min, total.cpu_max, total.memory_min, total.memory_max
    )
}

// ============================================================================
// JSON / YAML Format
// ============================================================================

fn format_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

fn format_yaml(report: &Report) -> String {
    serde_yaml::to_string(report).unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
