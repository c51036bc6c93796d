//! Handler for calculating the quota of a set of manifests.
//!
//! Reads every input, decodes each document, calculates its usage and
//! prints the report. Documents of unsupported kinds are skipped.

use crate::calc::ResourceUsage;
use crate::error::{KuotaCalcError, Result};
use crate::formatter::{OutputFormat, Report, format_report};
use crate::manifest::split_documents;
use log::{debug, error, info, warn};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const STDIN: &str = "-";

/// Configuration for the calculate command
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateOptions {
    /// Manifest files; empty means stdin
    pub files: Vec<PathBuf>,
    /// Print the per-workload table
    pub detailed: bool,
    /// Maximum simultaneous rollouts, negative for unlimited
    pub max_rollouts: i64,
    pub format: OutputFormat,
    /// Log calculation errors and continue instead of aborting
    pub keep_going: bool,
    pub color: bool,
}

impl Default for CalculateOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            detailed: false,
            max_rollouts: -1,
            format: OutputFormat::Table,
            keep_going: false,
            color: true,
        }
    }
}

/// Usages collected from one or more manifest streams.
#[derive(Debug, Default)]
pub struct Batch {
    pub usages: Vec<ResourceUsage>,
    /// Non-empty documents seen
    pub documents: usize,
    /// Documents of unsupported kinds
    pub skipped: usize,
    /// Documents that failed with `keep_going` set
    pub failed: usize,
}

impl Batch {
    /// Decode and calculate every document of `content`, appending the
    /// results. `source` names the input in log messages.
    pub fn collect(&mut self, source: &str, content: &str, keep_going: bool) -> Result<()> {
        for document in split_documents(content) {
            if document.is_empty() {
                debug!("{source}:{}: skipping empty document", document.line);
                continue;
            }
            self.documents += 1;

            match crate::usage_from_document(&document) {
                Ok(usage) => self.usages.push(usage),
                Err(e) if e.is_not_supported() => {
                    warn!("{source}:{}: {e}, skipping", document.line);
                    self.skipped += 1;
                }
                Err(e) if keep_going => {
                    error!("{source}:{}: {e}", document.line);
                    self.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Handle the calculate command.
pub fn handle_calculate(options: CalculateOptions) -> Result<()> {
    if !options.color {
        colored::control::set_override(false);
    }

    let mut batch = Batch::default();
    if options.files.is_empty() {
        batch.collect("<stdin>", &read_stdin()?, options.keep_going)?;
    }
    for path in &options.files {
        if path.as_os_str() == STDIN {
            batch.collect("<stdin>", &read_stdin()?, options.keep_going)?;
        } else {
            batch.collect(&path.display().to_string(), &read_file(path)?, options.keep_going)?;
        }
    }

    info!(
        "calculated {} of {} documents ({} unsupported, {} failed)",
        batch.usages.len(),
        batch.documents,
        batch.skipped,
        batch.failed
    );

    let report = Report::new(batch.usages, options.max_rollouts);
    format_report(&report, options.format, options.detailed);

    if batch.failed > 0 {
        return Err(KuotaCalcError::Incomplete {
            failed: batch.failed,
            total: batch.documents,
        });
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| KuotaCalcError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
