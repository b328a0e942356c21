pub mod lint;
pub mod package;
pub mod config;

pub use lint::{handle_lint, LintArgs};
pub use package::handle_package;
pub use config::handle_config;
