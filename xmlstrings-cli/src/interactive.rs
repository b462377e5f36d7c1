//! Interactive menu
//!
//! Uses dialoguer for terminal prompts. Invalid paths are re-prompted in
//! place; failures of a finished step are printed and the menu comes back.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};
use xmlstrings::FormatType;

use crate::{
    config::Settings,
    error::{CliError, Result},
    export::run_export,
    import::run_import,
    paths,
    report::{BoxStyle, render_box},
};

const MENU_ITEMS: &[&str] = &[
    "Export strings from .xml",
    "Import strings from .strings",
    "Settings",
    "Exit",
];

/// Runs the menu until the user picks Exit.
///
/// Only prompt failures (closed terminal, Ctrl-C) end the loop early.
pub fn run_menu(settings: &mut Settings, settings_path: Option<&Path>) -> Result<()> {
    let banner = [
        format!("xmlstrings {}", env!("CARGO_PKG_VERSION")),
        "strings.xml <-> .strings".to_string(),
    ];
    println!("{}", render_box(&banner, BoxStyle::banner()));

    loop {
        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => export_flow(settings),
            1 => import_flow(settings),
            2 => settings_flow(settings, settings_path),
            _ => {
                println!("Exiting the program...");
                return Ok(());
            }
        };

        match outcome {
            Err(CliError::Prompt(e)) => return Err(CliError::Prompt(e)),
            Err(e) => eprintln!("Error: {}", e),
            Ok(()) => {}
        }
        println!();
    }
}

fn export_flow(settings: &Settings) -> Result<()> {
    let input = prompt_existing(FormatType::Markup)?;
    let output = prompt_output(FormatType::Strings, &settings.default_export_name)?;
    println!();
    run_export(&input, &output, &settings.export_options(), false)?;
    Ok(())
}

fn import_flow(settings: &Settings) -> Result<()> {
    let xml = prompt_existing(FormatType::Markup)?;
    let strings = prompt_existing(FormatType::Strings)?;
    let output = prompt_output(FormatType::Markup, &settings.default_import_name)?;
    println!();
    run_import(&xml, &strings, &output, settings.detailed_changes, false)?;
    Ok(())
}

fn settings_flow(settings: &mut Settings, settings_path: Option<&Path>) -> Result<()> {
    loop {
        let items = [
            format!("Include empty strings in export: {}", on_off(settings.include_empty)),
            format!("Show detailed changes on import: {}", on_off(settings.detailed_changes)),
            format!("Default export name: {}", settings.default_export_name),
            format!("Default import name: {}", settings.default_import_name),
            "Back".to_string(),
        ];
        let choice = Select::new()
            .with_prompt("Settings")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => settings.include_empty = !settings.include_empty,
            1 => settings.detailed_changes = !settings.detailed_changes,
            2 => settings.default_export_name = prompt_name(&settings.default_export_name)?,
            3 => settings.default_import_name = prompt_name(&settings.default_import_name)?,
            _ => return Ok(()),
        }

        match settings_path {
            Some(path) => settings.save(path)?,
            None => tracing::warn!("no settings location, changes last for this session only"),
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Asks for an existing file until one with the right extension is given.
fn prompt_existing(format: FormatType) -> Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt(format!("Enter the path to a .{} file", format.extension()))
        .validate_with(move |input: &String| -> std::result::Result<(), String> {
            paths::existing_input(input, format)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    paths::existing_input(&raw, format)
}

/// Asks for an output name, offering to overwrite or number an existing
/// file.
fn prompt_output(format: FormatType, default: &str) -> Result<PathBuf> {
    let name: String = Input::new()
        .with_prompt(format!("Enter a name of .{} output file", format.extension()))
        .default(default.to_string())
        .validate_with(move |input: &String| -> std::result::Result<(), String> {
            paths::resolve_output(input, format, true)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    let mut path = paths::resolve_output(&name, format, true)?;
    while path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "File '{}' already exists! Would you like to overwrite the file?",
                path.file_name().unwrap_or_default().to_string_lossy()
            ))
            .default(false)
            .interact()?;
        if overwrite {
            break;
        }
        path = paths::bump(&path);
    }
    Ok(path)
}

fn prompt_name(current: &str) -> Result<String> {
    let name: String = Input::new()
        .with_prompt("New default name (without extension)")
        .default(current.to_string())
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if paths::is_valid_file_name(input.trim()) {
                Ok(())
            } else {
                Err("Filename contains invalid characters, ends with space/dot, or uses a reserved name.")
            }
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}
