use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use crate::cli::OutputFormat;
use package_cloud::config::load_config;
use package_cloud::lint::{collect_packages, lint_packages};
use package_cloud::logging::{emit_diagnostics, init_lint_logging};
use package_cloud::output::format_summary;

pub struct LintArgs {
    pub packages: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub log_folder: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub parallel: bool,
    pub exit_zero: bool,
}

pub fn handle_lint(args: LintArgs, quiet: bool, verbose: bool) -> Result<()> {
    let config = load_config()?;

    // CLI arguments override config values
    let log_folder = args
        .log_folder
        .or(config.log_folder.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let parallel = args.parallel || config.parallel.unwrap_or(false);

    let log_file = init_lint_logging(&log_folder)?;

    let packages = collect_packages(&args.packages, &args.directories)?;
    let summary = lint_packages(&packages, parallel);

    for report in &summary.reports {
        emit_diagnostics(report);
    }

    let format = args.format.unwrap_or_else(|| match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    });

    let output_content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        OutputFormat::Table => format_summary(&summary, verbose),
    };

    match args.output {
        Some(path) => fs::write(path, output_content)?,
        None => {
            if !quiet {
                println!("{}", output_content);
            }
        }
    }

    if verbose && !quiet {
        eprintln!("Lint log: {}", log_file.display());
    }

    if summary.has_invalid() && !args.exit_zero && config.fail_on_invalid.unwrap_or(false) {
        if !quiet {
            eprintln!("Exiting with error due to {} invalid package(s)", summary.invalid.len());
        }
        std::process::exit(1);
    }

    Ok(())
}
