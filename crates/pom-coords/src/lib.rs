//! Command-line front end printing Maven coordinates of POM files.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod run;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use error::CliError;
pub use output::OutputFormat;
pub use run::{Summary, run};
