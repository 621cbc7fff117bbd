use std::collections::BTreeMap;
use std::path::Path;

use unicode_width::UnicodeWidthStr;

use translit_engine::bundled;
use translit_engine::table::{load_table_file, MappingTable};
use translit_engine::TableInfo;

use super::{die, CliError};

pub fn list_cmd(language: Option<&str>, json: bool) {
    let catalog = die!(bundled::catalog(), "Error loading tables: {}");
    let infos: Vec<&TableInfo> = catalog
        .iter()
        .map(|(info, _)| info)
        .filter(|info| language.map_or(true, |l| info.language == l))
        .collect();

    if json {
        let out = die!(
            serde_json::to_string_pretty(&infos).map_err(CliError::from),
            "Error: {}"
        );
        println!("{out}");
        return;
    }

    let id_width = infos.iter().map(|i| i.id.width()).max().unwrap_or(0);
    for info in infos {
        println!(
            "{}{}  [{}] {}",
            info.id,
            " ".repeat(id_width - info.id.width()),
            info.language,
            info.name
        );
    }
}

pub fn show_cmd(id: &str) {
    let catalog = die!(bundled::catalog(), "Error loading tables: {}");
    let table = die!(catalog.resolve(id), "Error: {}");
    if let Some(info) = catalog.info(id) {
        println!("# {} ({})", info.name, info.id);
        if !info.description.is_empty() {
            println!("# {}", info.description);
        }
    }
    print!("{}", render_rules(table.as_ref()));
}

/// Render every rule set of `table`, keys aligned by display width.
pub fn render_rules(table: &dyn MappingTable) -> String {
    let mut out = String::new();

    let base: BTreeMap<String, &str> = table
        .base()
        .iter()
        .map(|(k, v)| (k.to_string(), v.as_str()))
        .collect();
    push_section(&mut out, "base", base.iter().map(|(k, v)| (k.as_str(), *v)));

    if let Some(rules) = table.contextual() {
        push_section(
            &mut out,
            "contextual",
            rules.rules().iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }
    if let Some(rules) = table.word_initial() {
        push_section(
            &mut out,
            "word_initial",
            rules.rules().iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }
    if let Some(deletion) = table.deletion() {
        let patterns: Vec<String> = deletion
            .patterns()
            .iter()
            .map(|p| format!("{p:?}"))
            .collect();
        out.push_str(&format!("\n[delete]\n{}\n", patterns.join(" ")));
    }
    out
}

fn push_section<'a>(out: &mut String, title: &str, rules: impl Iterator<Item = (&'a str, &'a str)>) {
    let rules: Vec<(&str, &str)> = rules.collect();
    let width = rules.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("[{title}]\n"));
    for (k, v) in rules {
        let pad = " ".repeat(width.saturating_sub(k.width()));
        out.push_str(&format!("{k}{pad} → {v:?}\n"));
    }
}

pub fn export_cmd(id: &str) {
    match bundled::source(id) {
        Some(toml) => print!("{toml}"),
        None => {
            eprintln!("Error: unknown table: {id}");
            std::process::exit(1);
        }
    }
}

pub fn validate_cmd(file: &str) {
    let (source, table) = die!(load_table_file(Path::new(file)), "Error: {}");
    println!(
        "OK: {} base rules ({} with synthesized upper case), {} contextual, {} word-initial, {} deleted",
        source.base.len(),
        table.base().len(),
        table.contextual().map_or(0, |r| r.len()),
        table.word_initial().map_or(0, |r| r.len()),
        table.deletion().map_or(0, |d| d.len()),
    );
}
