use crate::lint::{BatchSummary, PackageReport, Severity};

/// Plain-text run summary, one block per non-empty bucket
pub fn format_summary(summary: &BatchSummary, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nTotal packages ran: {}\n", summary.total));

    if !summary.valid.is_empty() {
        output.push_str(&format!(
            "\n    The following {} packages are valid: {}\n",
            summary.valid.len(),
            format_names(&summary.valid)
        ));
    }
    if !summary.invalid.is_empty() {
        output.push_str(&format!(
            "\n    The following {} packages are invalid: {}\n",
            summary.invalid.len(),
            format_names(&summary.invalid)
        ));
    }
    if !summary.needs_review.is_empty() {
        output.push_str(&format!(
            "\n    The following {} packages need review.\n    They may be passed without change after review: {}\n",
            summary.needs_review.len(),
            format_names(&summary.needs_review)
        ));
    }

    if verbose {
        let flagged: Vec<&PackageReport> = summary
            .reports
            .iter()
            .filter(|report| !report.diagnostics.is_empty())
            .collect();
        if !flagged.is_empty() {
            output.push_str("\nFindings:\n");
            for report in flagged {
                output.push_str(&format_report(report));
            }
        }
    }

    output
}

fn format_report(report: &PackageReport) -> String {
    let mut output = format!("  {} ({})\n", report.name, report.verdict);
    for diagnostic in &report.diagnostics {
        let level = match diagnostic.severity {
            Severity::Advisory => "warning",
            Severity::Blocking => "error",
        };
        output.push_str(&format!(
            "    {:<7} [{}] {}\n",
            level, diagnostic.check, diagnostic.message
        ));
    }
    output
}

fn format_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
    format!("[{}]", quoted.join(", "))
}
