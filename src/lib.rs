pub mod config;
pub mod layout;
pub mod lint;
pub mod logging;
pub mod output;
pub mod package;

// Re-export main types for easy access
pub use lint::{
    evaluate, lint_packages, BatchSummary, CheckId, Diagnostic, PackageReport, Severity, Verdict,
};
pub use package::{build_package, PackageRequest};
