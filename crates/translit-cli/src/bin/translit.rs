use std::path::Path;

use clap::{Parser, Subcommand};

use translit_cli::commands::convert_ops::{self, ConvertArgs};
use translit_cli::commands::{config_ops, table_ops};
use translit_engine::trace_init::{init_tracing, TraceSink};

#[derive(Parser)]
#[command(name = "translit", about = "Table-driven Cyrillic romanization")]
struct Cli {
    /// Write a JSONL trace to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    /// Print trace records to stderr (requires --features trace)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Romanize text (arguments, or stdin line by line)
    Convert {
        /// Text to convert; reads stdin when omitted
        text: Vec<String>,
        /// Bundled table id (default from settings)
        #[arg(short, long)]
        table: Option<String>,
        /// Custom table TOML file instead of a bundled table
        #[arg(long)]
        table_file: Option<String>,
        /// Overlay table id layered on top; repeatable
        #[arg(short, long = "overlay")]
        overlays: Vec<String>,
        /// Settings TOML file
        #[arg(long)]
        settings: Option<String>,
        /// Lower-case the input and emit a single leading capital
        #[arg(long)]
        normalize_case: bool,
    },
    /// List bundled tables
    List {
        /// Only tables for this language code (uk, ru, overlay)
        #[arg(long)]
        language: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every rule of a bundled table
    Show {
        /// Table id
        id: String,
    },
    /// Export a bundled table as TOML
    Export {
        /// Table id
        id: String,
    },
    /// Validate a custom table TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        init_tracing(TraceSink::JsonFile(Path::new(dir)));
    } else if cli.verbose {
        init_tracing(TraceSink::Stderr);
    }

    match cli.command {
        Command::Convert {
            text,
            table,
            table_file,
            overlays,
            settings,
            normalize_case,
        } => {
            let args = ConvertArgs {
                table: table.as_deref(),
                table_file: table_file.as_deref(),
                overlays: &overlays,
                settings: settings.as_deref(),
                normalize_case,
            };
            convert_ops::convert_cmd(&args, &text);
        }
        Command::List { language, json } => table_ops::list_cmd(language.as_deref(), json),
        Command::Show { id } => table_ops::show_cmd(&id),
        Command::Export { id } => table_ops::export_cmd(&id),
        Command::Validate { file } => table_ops::validate_cmd(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
