use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser};
use xmlstrings::FormatType;
use xmlstrings_cli::{
    Result, Settings,
    cli::{Cli, Commands, ConfigAction, ExportArgs, ImportArgs},
    config, export, import, interactive, logging, paths,
};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Export(args) => cmd_export(args, &load_settings(cli.config)?.0),
        Commands::Import(args) => cmd_import(args, &load_settings(cli.config)?.0),
        Commands::Menu => {
            let (mut settings, path) = load_settings(cli.config)?;
            interactive::run_menu(&mut settings, path.as_deref())
        }
        Commands::Config { action } => cmd_config(action, cli.config),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "xmlstrings", &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings plus their location. A platform without a config directory
/// only matters to `config`; everything else runs on defaults.
fn load_settings(explicit: Option<PathBuf>) -> Result<(Settings, Option<PathBuf>)> {
    let path = config::resolve_path(explicit.as_deref()).ok();
    let settings = match &path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    tracing::debug!(?path, "loaded settings");
    Ok((settings, path))
}

fn cmd_export(args: ExportArgs, settings: &Settings) -> Result<()> {
    let input = paths::existing_input(&args.input, FormatType::Markup)?;
    let name = args
        .output
        .as_deref()
        .unwrap_or(&settings.default_export_name);
    let output = paths::resolve_output(name, FormatType::Strings, args.overwrite)?;

    let mut options = settings.export_options();
    if let Some(include_empty) = args.include_empty_override() {
        options = options.with_include_empty(include_empty);
    }

    export::run_export(&input, &output, &options, args.json)?;
    Ok(())
}

fn cmd_import(args: ImportArgs, settings: &Settings) -> Result<()> {
    let xml = paths::existing_input(&args.xml, FormatType::Markup)?;
    let strings = paths::existing_input(&args.strings, FormatType::Strings)?;
    let name = args
        .output
        .as_deref()
        .unwrap_or(&settings.default_import_name);
    let output = paths::resolve_output(name, FormatType::Markup, args.overwrite)?;

    let detailed = args.detailed || settings.detailed_changes;
    import::run_import(&xml, &strings, &output, detailed, args.json)?;
    Ok(())
}

fn cmd_config(action: ConfigAction, explicit: Option<PathBuf>) -> Result<()> {
    let path = config::resolve_path(explicit.as_deref())?;
    match action {
        ConfigAction::Show => println!("{}", Settings::load(&path)?),
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load(&path)?;
            settings.set(&key, &value)?;
            settings.save(&path)?;
            println!("Set {} in {}", key, path.display());
        }
        ConfigAction::Reset => {
            Settings::default().save(&path)?;
            println!("Settings reset to defaults");
        }
    }
    Ok(())
}
