use std::path::Path;

use serde_json::json;
use xmlstrings::{ExportOptions, ExportStats};

use crate::{
    error::Result,
    report::{BoxStyle, export_lines, render_box},
};

/// Exports `input` into `output` and prints the summary.
///
/// A markup file without named `<string>` entries is reported and counts as
/// success.
pub fn run_export(
    input: &Path,
    output: &Path,
    options: &ExportOptions,
    json_output: bool,
) -> Result<Option<ExportStats>> {
    let stats = match xmlstrings::export(input, output, options) {
        Ok(stats) => stats,
        Err(e) if e.is_informational() => {
            if json_output {
                let body = json!({
                    "input": input.display().to_string(),
                    "output": null,
                    "stats": null,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("No strings found in XML file!");
            }
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    if json_output {
        let body = json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", render_box(&export_lines(&stats, output), BoxStyle::default()));
    }
    Ok(Some(stats))
}
