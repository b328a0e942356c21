use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{handle_config, handle_lint, handle_package, LintArgs};
use package_cloud::package::PackageRequest;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lint {
            packages,
            directories,
            log_folder,
            format,
            output,
            parallel,
            exit_zero,
        } => handle_lint(
            LintArgs {
                packages,
                directories,
                log_folder,
                format,
                output,
                parallel,
                exit_zero,
            },
            cli.quiet,
            cli.verbose,
        ),
        Commands::Package {
            payload,
            md5,
            log,
            dest,
            id,
        } => handle_package(
            PackageRequest {
                payload,
                md5,
                log,
                dest,
                id,
            },
            cli.quiet,
            cli.verbose,
        ),
        Commands::Config { show, validate } => handle_config(show, validate, cli.quiet),
    }
}
