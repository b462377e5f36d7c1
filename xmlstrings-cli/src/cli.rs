use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Export Android strings.xml entries to Apple .strings and import the
/// translations back.
#[derive(Parser, Debug)]
#[command(name = "xmlstrings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export strings from a strings.xml file into a .strings file
    Export(ExportArgs),

    /// Import an edited .strings file into a copy of a strings.xml file
    Import(ImportArgs),

    /// Start the interactive menu
    Menu,

    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// The strings.xml file to read
    #[arg(short, long)]
    pub input: String,

    /// Output name; `.strings` is appended when missing
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write elements without text as empty strings
    #[arg(long, conflicts_with = "skip_empty")]
    pub include_empty: bool,

    /// Leave elements without text out of the output
    #[arg(long)]
    pub skip_empty: bool,

    /// Replace the output file instead of picking a numbered name
    #[arg(long)]
    pub overwrite: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// The flag given on the command line, if any.
    pub fn include_empty_override(&self) -> Option<bool> {
        match (self.include_empty, self.skip_empty) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// The original strings.xml file
    #[arg(short = 'x', long)]
    pub xml: String,

    /// The edited .strings file
    #[arg(short = 's', long)]
    pub strings: String,

    /// Output name; `.xml` is appended when missing
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print every applied change
    #[arg(long)]
    pub detailed: bool,

    /// Replace the output file instead of picking a numbered name
    #[arg(long)]
    pub overwrite: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current settings
    Show,
    /// Print the settings file location
    Path,
    /// Change one setting
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
    /// Restore the default settings
    Reset,
}
