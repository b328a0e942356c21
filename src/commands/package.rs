use anyhow::Result;
use package_cloud::lint::{evaluate, Verdict};
use package_cloud::logging::{emit_diagnostics, init_console_logging};
use package_cloud::package::{build_package, PackageRequest};

pub fn handle_package(request: PackageRequest, quiet: bool, verbose: bool) -> Result<()> {
    init_console_logging(verbose, quiet)?;

    let base = build_package(&request)?;

    // Lint the fresh package so layout problems surface right away
    let report = evaluate(&base);
    emit_diagnostics(&report);

    if !quiet {
        println!("Package created: {}", base.display());
        match report.verdict {
            Verdict::Valid => println!("✅ {} is valid", report.name),
            Verdict::NeedsReview => println!("⚠️  {} needs review", report.name),
            Verdict::Invalid => println!("❌ {} is invalid", report.name),
        }
    }

    Ok(())
}
