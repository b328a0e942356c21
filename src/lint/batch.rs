use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::evaluate;
use super::types::{PackageReport, Verdict};

/// Partition of a lint run by verdict
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
    pub needs_review: Vec<String>,
    pub reports: Vec<PackageReport>,
}

impl BatchSummary {
    pub fn from_reports(reports: Vec<PackageReport>) -> Self {
        let mut summary = BatchSummary {
            total: reports.len(),
            ..Default::default()
        };

        for report in &reports {
            let bucket = match report.verdict {
                Verdict::Valid => &mut summary.valid,
                Verdict::Invalid => &mut summary.invalid,
                Verdict::NeedsReview => &mut summary.needs_review,
            };
            bucket.push(report.name.clone());
        }

        summary.reports = reports;
        summary
    }

    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }
}

/// Package folders to lint: every `packages` entry as given, then the
/// subfolders of each `directories` entry sorted by name
pub fn collect_packages(packages: &[PathBuf], directories: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut candidates = packages.to_vec();

    for directory in directories {
        let mut children = Vec::new();
        for entry in fs::read_dir(directory)
            .with_context(|| format!("Failed to list {}", directory.display()))?
        {
            let entry = entry.with_context(|| format!("Failed to list {}", directory.display()))?;
            if entry.path().is_dir() {
                children.push(entry.path());
            }
        }
        children.sort();
        candidates.extend(children);
    }

    Ok(candidates)
}

/// Lint every package, keeping the input order in each bucket
pub fn lint_packages(packages: &[PathBuf], parallel: bool) -> BatchSummary {
    let reports: Vec<PackageReport> = if parallel {
        packages.par_iter().map(|p| evaluate(p)).collect()
    } else {
        packages.iter().map(|p| evaluate(p)).collect()
    };

    BatchSummary::from_reports(reports)
}
