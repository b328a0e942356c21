use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use package_cloud::package::validate_package_id;

#[derive(Parser)]
#[command(name = "package-cloud")]
#[command(about = "Build and lint digital-preservation transfer packages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint packages and sort them into valid, invalid and needs review
    Lint {
        /// Package folder to lint (repeatable)
        #[arg(
            long = "package",
            value_name = "DIR",
            num_args = 1..,
            value_parser = extant_dir,
            required_unless_present = "directories"
        )]
        packages: Vec<PathBuf>,

        /// Folder whose subfolders are all packages (repeatable)
        #[arg(long = "directory", value_name = "DIR", value_parser = extant_dir)]
        directories: Vec<PathBuf>,

        /// Where to write the lint log (default: current directory)
        #[arg(long, alias = "log_folder", value_name = "DIR")]
        log_folder: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lint packages in parallel
        #[arg(long)]
        parallel: bool,

        /// Exit with code 0 even when packages are invalid
        #[arg(long)]
        exit_zero: bool,
    },
    /// Build a package from a payload folder, md5 manifest and transfer log
    Package {
        /// Folder holding the transferred files
        #[arg(long, value_name = "DIR", value_parser = extant_dir)]
        payload: PathBuf,

        /// rclone md5sum output for the payload
        #[arg(long, value_name = "FILE", value_parser = extant_file)]
        md5: PathBuf,

        /// rclone transfer log
        #[arg(long, value_name = "FILE", value_parser = extant_file)]
        log: PathBuf,

        /// Destination folder, the package is created below it
        #[arg(long, value_name = "DIR", value_parser = extant_dir)]
        dest: PathBuf,

        /// Package id, ACQ_####_######
        #[arg(long, value_parser = package_id)]
        id: String,
    },
    /// Show or validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn extant_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("{} does not exist", path.display()))
    }
}

fn extant_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} does not exist", path.display()))
    }
}

fn package_id(value: &str) -> Result<String, String> {
    validate_package_id(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}
