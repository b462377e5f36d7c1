pub mod markup;
pub mod strings;

use std::{fmt::Display, path::Path, str::FromStr};

use crate::error::Error;

// Reexporting the formats for easier access
pub use markup::Document as MarkupDocument;
pub use strings::Format as StringsFormat;

/// The two file formats xmlstrings moves text between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Android `strings.xml`.
    Markup,
    /// Apple `.strings`.
    Strings,
}

impl FormatType {
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Markup => "xml",
            FormatType::Strings => "strings",
        }
    }

    /// Infers the format from a file extension, ignoring case.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    /// `true` when the path carries this format's extension, ignoring case.
    pub fn matches<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" | "markup" => Ok(FormatType::Markup),
            "strings" => Ok(FormatType::Strings),
            other => Err(Error::UnsupportedFormat(format!(
                "unsupported file extension: {:?}",
                other
            ))),
        }
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Markup => write!(f, "strings.xml"),
            FormatType::Strings => write!(f, ".strings"),
        }
    }
}
