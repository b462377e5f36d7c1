#![forbid(unsafe_code)]
//! Move localization strings between Android `strings.xml` and Apple `.strings`.
//!
//! Export turns the `<string name="...">` elements of a markup file into
//! `"key" = "value";` lines. Import takes an edited `.strings` file, works out
//! which values changed and writes an updated copy of the markup file, leaving
//! everything else in it untouched.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xmlstrings::{ExportOptions, decode_flat, encode_flat, merge_and_write, read_markup};
//!
//! let table = read_markup("res/values/strings.xml")?;
//! let encoded = encode_flat(&table, &ExportOptions::new().with_include_empty(true));
//! std::fs::write("Localizable.strings", &encoded.text)?;
//!
//! // ... translate Localizable.strings ...
//!
//! let edited = decode_flat(&std::fs::read_to_string("Localizable.strings")?)?;
//! let result = merge_and_write("res/values/strings.xml", &edited, "strings_edited.xml")?;
//! println!("{} value(s) updated", result.applied_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod io;
pub mod merge;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{
        decode_flat, encode_flat, export, import, merge_and_write, read_flat, read_markup,
        write_flat,
    },
    error::Error,
    formats::{FormatType, MarkupDocument, StringsFormat, strings::Encoded},
    merge::{merge, merge_entries},
    types::{ChangeRecord, ExportOptions, ExportStats, MergeResult, StringEntry, StringTable},
};
