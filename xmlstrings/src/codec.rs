//! Entry points for moving strings between `strings.xml` and `.strings` files.
//!
//! Export reads a markup file and writes its entries as `.strings` text.
//! Import decodes an edited `.strings` file, merges it into the markup file it
//! came from and writes an updated copy. Both run to completion on one thread
//! and keep no file open past the call.

use std::path::Path;

use crate::{
    error::Error,
    formats::{
        markup::Document,
        strings::{self, Encoded, Format as StringsFormat},
    },
    io::write_atomic,
    merge::merge_entries,
    traits::Parser,
    types::{ExportOptions, ExportStats, MergeResult, StringTable},
};

/// Reads every named `<string>` entry of a markup file.
pub fn read_markup<P: AsRef<Path>>(path: P) -> Result<StringTable, Error> {
    Ok(Document::read_from(path)?.table())
}

/// Encodes a table as `.strings` text.
pub fn encode_flat(table: &StringTable, options: &ExportOptions) -> Encoded {
    strings::encode(table, options)
}

/// Decodes `.strings` text into a table.
pub fn decode_flat(text: &str) -> Result<StringTable, Error> {
    strings::decode(text)
}

/// Reads a UTF-16 or UTF-8 `.strings` file.
pub fn read_flat<P: AsRef<Path>>(path: P) -> Result<StringTable, Error> {
    Ok(StringsFormat::read_from(path)?.table)
}

/// Encodes a table and writes it as UTF-8 in one step.
pub fn write_flat<P: AsRef<Path>>(
    path: P,
    table: &StringTable,
    options: &ExportOptions,
) -> Result<ExportStats, Error> {
    let encoded = encode_flat(table, options);
    write_atomic(path.as_ref(), encoded.text.as_bytes())?;
    Ok(encoded.stats)
}

/// Merges an edited table into the markup file at `markup_path`.
///
/// The updated document goes to `output_path` only when at least one value
/// changed; `MergeResult::written` tells which happened.
pub fn merge_and_write<P: AsRef<Path>, Q: AsRef<Path>>(
    markup_path: P,
    edited: &StringTable,
    output_path: Q,
) -> Result<MergeResult, Error> {
    let output_path = output_path.as_ref();
    let mut document = Document::read_from(markup_path)?;

    let mut result = merge_entries(document.entries(), edited);
    result.element_count = document.element_count();

    if result.is_unchanged() {
        tracing::info!(
            checked = result.total_checked(),
            "no changes to write"
        );
        return Ok(result);
    }

    let changed_elements = document.apply(&result);
    document.write_to(output_path)?;
    result.written = Some(output_path.to_path_buf());

    tracing::info!(
        applied = result.applied_count(),
        skipped = result.skipped_count(),
        elements = changed_elements,
        output = %output_path.display(),
        "imported strings"
    );
    Ok(result)
}

/// Exports a markup file to a `.strings` file.
///
/// A markup file without named entries yields [`Error::NoMatch`] and writes
/// nothing.
pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(
    markup_path: P,
    output_path: Q,
    options: &ExportOptions,
) -> Result<ExportStats, Error> {
    let markup_path = markup_path.as_ref();
    let table = read_markup(markup_path)?;
    if table.is_empty() {
        return Err(Error::NoMatch {
            path: markup_path.to_path_buf(),
        });
    }

    let stats = write_flat(output_path.as_ref(), &table, options)?;
    tracing::info!(
        exported = stats.exported,
        exported_empty = stats.exported_empty,
        skipped = stats.skipped,
        output = %output_path.as_ref().display(),
        "exported strings"
    );
    Ok(stats)
}

/// Imports an edited `.strings` file into a copy of the markup file.
///
/// A `.strings` file without any pair yields [`Error::NoMatch`].
pub fn import<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    markup_path: P,
    strings_path: Q,
    output_path: R,
) -> Result<MergeResult, Error> {
    let strings_path = strings_path.as_ref();
    let edited = read_flat(strings_path)?;
    if edited.is_empty() {
        return Err(Error::NoMatch {
            path: strings_path.to_path_buf(),
        });
    }

    merge_and_write(markup_path, &edited, output_path)
}
