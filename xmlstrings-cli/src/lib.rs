//! Command-line front end for xmlstrings: argument definitions, settings,
//! output-path policy, summaries and the interactive menu.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod interactive;
pub mod logging;
pub mod paths;
pub mod report;

pub use config::Settings;
pub use error::{CliError, Result};
