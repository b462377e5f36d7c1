//! All error types for the xmlstrings crate.
//!
//! These are returned from all fallible operations (reading markup, decoding
//! `.strings` text, writing either format).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid markup: {0}")]
    InvalidMarkup(String),

    #[error("malformed .strings content at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("undecodable text: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("no entries found in `{}`", path.display())]
    NoMatch { path: PathBuf },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Attaches the identity of the file being read to an error.
    ///
    /// Errors that already carry a path are returned unchanged.
    pub fn parse_error(path: impl AsRef<Path>, source: Error) -> Self {
        match source {
            Error::Parse { .. } | Error::NoMatch { .. } | Error::Write { .. } => source,
            other => Error::Parse {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Creates a write error for the given destination.
    pub fn write_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// `true` for outcomes that should be shown as a notice rather than a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Error::NoMatch { .. })
    }
}
