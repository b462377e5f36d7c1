//! Human-readable summaries printed after export and import.

use std::path::Path;

use unicode_width::UnicodeWidthStr;
use xmlstrings::{ChangeRecord, ExportStats, MergeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

/// Frame settings for [`render_box`].
#[derive(Debug, Clone, Copy)]
pub struct BoxStyle {
    /// Columns of space added around the text, split evenly between sides.
    pub h_padding: usize,
    /// Blank rows added around the text, split evenly above and below.
    pub v_padding: usize,
    pub alignment: Alignment,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            h_padding: 4,
            v_padding: 2,
            alignment: Alignment::Left,
        }
    }
}

impl BoxStyle {
    pub fn banner() -> Self {
        Self {
            h_padding: 6,
            v_padding: 2,
            alignment: Alignment::Center,
        }
    }
}

/// Draws `lines` inside a box-drawing frame.
///
/// Widths are measured in terminal columns, so wide characters line up.
pub fn render_box<S: AsRef<str>>(lines: &[S], style: BoxStyle) -> String {
    let max_width = lines
        .iter()
        .map(|line| line.as_ref().width())
        .max()
        .unwrap_or(0);
    let half_h = " ".repeat(style.h_padding / 2);
    let inner = max_width + (style.h_padding / 2) * 2;
    let blank = format!("│{}│\n", " ".repeat(inner));

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(inner)));
    for _ in 0..style.v_padding / 2 {
        out.push_str(&blank);
    }
    for line in lines {
        let line = line.as_ref();
        let gap = max_width - line.width();
        let (left, right) = match style.alignment {
            Alignment::Left => (0, gap),
            Alignment::Right => (gap, 0),
            Alignment::Center => (gap / 2, gap - gap / 2),
        };
        out.push_str(&format!(
            "│{half_h}{}{line}{}{half_h}│\n",
            " ".repeat(left),
            " ".repeat(right)
        ));
    }
    for _ in 0..style.v_padding / 2 {
        out.push_str(&blank);
    }
    out.push_str(&format!("└{}┘", "─".repeat(inner)));
    out
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn export_lines(stats: &ExportStats, output: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Total strings: {}", stats.total),
        format!("Exported strings: {}", stats.exported),
    ];
    if stats.exported_empty > 0 {
        lines.push(format!("Exported empty strings: {}", stats.exported_empty));
    }
    if stats.skipped > 0 {
        lines.push(format!("Skipped empty strings: {}", stats.skipped));
    }
    lines.push(format!(
        "Strings have been written to {} file!",
        display_name(output)
    ));
    lines
}

pub fn import_lines(result: &MergeResult, output: &Path) -> Vec<String> {
    vec![
        format!("Total strings: {}", result.element_count),
        format!("Imported strings: {}", result.applied_count()),
        format!("Strings have been imported to {}!", display_name(output)),
    ]
}

fn repr(value: Option<&str>) -> String {
    match value {
        Some(text) => format!("{:?}", text),
        None => "None".to_string(),
    }
}

/// The three-line log of one applied change.
pub fn change_lines(record: &ChangeRecord) -> [String; 3] {
    [
        format!("Changed: {}", record.key),
        format!("  From: {}", repr(record.old_value.as_deref())),
        format!("  To:   {}", repr(record.new_value.as_deref())),
    ]
}
