use std::path::Path;

use xmlstrings::{Error, MergeResult};

use crate::{
    error::Result,
    report::{BoxStyle, change_lines, import_lines, render_box},
};

/// Merges the edited `.strings` file into a copy of `xml` and prints what
/// happened.
///
/// Returns `None` when the `.strings` file holds no pairs at all.
pub fn run_import(
    xml: &Path,
    strings: &Path,
    output: &Path,
    detailed: bool,
    json_output: bool,
) -> Result<Option<MergeResult>> {
    let result = match xmlstrings::import(xml, strings, output) {
        Ok(result) => result,
        Err(Error::NoMatch { .. }) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&MergeResult::default())?);
            } else {
                println!("No valid strings found in .strings file!");
            }
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(Some(result));
    }

    if detailed {
        for record in &result.applied {
            for line in change_lines(record) {
                println!("{}", line);
            }
        }
    }

    match &result.written {
        Some(path) => println!("{}", render_box(&import_lines(&result, path), BoxStyle::default())),
        None => println!("Found no strings to update!"),
    }
    Ok(Some(result))
}
