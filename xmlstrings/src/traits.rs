//! Traits for format-agnostic parsing and serialization in xmlstrings.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Write},
    path::Path,
};

use crate::{error::Error, io::write_atomic};

/// A trait for parsing and writing one localization file.
///
/// # Example
///
/// ```rust,no_run
/// use xmlstrings::traits::Parser;
/// let document = xmlstrings::formats::markup::Document::read_from("strings.xml")?;
/// document.write_to("strings_copy.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path. Errors carry the path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::parse_error(path, Error::Io(e)))?;
        let reader = BufReader::new(file);
        Self::from_reader(reader).map_err(|e| Error::parse_error(path, e))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    ///
    /// The content is serialized in memory first and then replaces the
    /// destination in one step, so a failed write leaves no partial file.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut content = Vec::new();
        self.to_writer(&mut content)?;
        write_atomic(path.as_ref(), &content)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}
