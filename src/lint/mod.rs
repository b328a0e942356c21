pub mod types;
pub mod predicates;
pub mod rules;
pub mod batch;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;

// Re-export main types
pub use types::{CheckId, CheckResult, Diagnostic, PackageReport, Severity, Verdict};
pub use rules::{aggregate, Rule, RULES};
pub use batch::{collect_packages, lint_packages, BatchSummary};

/// Run every check against one package directory.
///
/// All checks run even after a failure so the report carries every
/// diagnostic. The result depends only on what is on disk right now.
pub fn evaluate(package: &Path) -> PackageReport {
    let results: Vec<CheckResult> = RULES.iter().map(|rule| rule.apply(package)).collect();
    let verdict = aggregate(&results);

    let diagnostics = results
        .into_iter()
        .filter_map(|result| {
            result.message.map(|message| Diagnostic {
                check: result.check,
                severity: result.severity,
                message,
            })
        })
        .collect();

    PackageReport {
        name: predicates::package_name(package),
        path: package.to_path_buf(),
        verdict,
        diagnostics,
    }
}
