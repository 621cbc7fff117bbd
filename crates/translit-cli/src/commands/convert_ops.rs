use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use translit_engine::bundled;
use translit_engine::convert::convert;
use translit_engine::settings::Settings;
use translit_engine::table::{load_table_file, LayeredTable, MappingTable};

use super::{die, CliError};

/// Where the script table for a conversion comes from.
pub struct ConvertArgs<'a> {
    pub table: Option<&'a str>,
    pub table_file: Option<&'a str>,
    pub overlays: &'a [String],
    pub settings: Option<&'a str>,
    pub normalize_case: bool,
}

/// Assemble the table stack: explicit flags override the settings file,
/// which overrides the embedded defaults.
pub fn resolve_table(args: &ConvertArgs<'_>) -> Result<(Arc<dyn MappingTable>, bool), CliError> {
    let settings = match args.settings {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::default(),
    };
    let catalog = bundled::catalog()?;

    let overlays: &[String] = if args.overlays.is_empty() {
        &settings.conversion.overlays
    } else {
        args.overlays
    };

    let mut table: Arc<dyn MappingTable> = match (args.table_file, args.table) {
        (Some(_), Some(_)) => {
            return Err(CliError::Usage(
                "--table and --table-file are mutually exclusive".to_string(),
            ))
        }
        (Some(path), None) => Arc::new(load_table_file(Path::new(path))?.1),
        (None, Some(id)) => catalog.resolve(id)?,
        (None, None) => catalog.resolve(&settings.conversion.table)?,
    };
    for overlay in overlays {
        table = Arc::new(LayeredTable::new(table, catalog.resolve(overlay)?));
    }

    let preserve_case = settings.conversion.preserve_case && !args.normalize_case;
    Ok((table, preserve_case))
}

pub fn convert_cmd(args: &ConvertArgs<'_>, texts: &[String]) {
    let (table, preserve_case) = die!(resolve_table(args), "Error: {}");

    if !texts.is_empty() {
        println!("{}", convert(&texts.join(" "), table.as_ref(), preserve_case));
        return;
    }

    let out = BufWriter::new(io::stdout().lock());
    die!(
        convert_lines(io::stdin().lock(), out, table.as_ref(), preserve_case),
        "Error: {}"
    );
}

/// Convert `input` line by line into `out`.
pub fn convert_lines<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    table: &dyn MappingTable,
    preserve_case: bool,
) -> Result<(), CliError> {
    for line in input.lines() {
        writeln!(out, "{}", convert(&line?, table, preserve_case))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(table: Option<&'a str>, overlays: &'a [String]) -> ConvertArgs<'a> {
        ConvertArgs {
            table,
            table_file: None,
            overlays,
            settings: None,
            normalize_case: false,
        }
    }

    #[test]
    fn default_stack_uses_settings() {
        let (table, preserve) = resolve_table(&args(None, &[])).unwrap();
        assert!(preserve);
        assert_eq!(convert("«Євген»", table.as_ref(), preserve), "\"Yevhen\"");
    }

    #[test]
    fn explicit_overlays_replace_defaults() {
        let overlays = vec!["currency".to_string()];
        let (table, _) = resolve_table(&args(Some("russian_simple"), &overlays)).unwrap();
        assert_eq!(convert("«цена» 5₽", table.as_ref(), true), "«tsena» 5RUB");
    }

    #[test]
    fn normalize_case_flag() {
        let mut a = args(Some("ukrainian_kmu"), &[]);
        a.normalize_case = true;
        let (table, preserve) = resolve_table(&a).unwrap();
        assert!(!preserve);
        assert_eq!(convert("ЖИТОМИР", table.as_ref(), preserve), "Zhytomyr");
    }

    #[test]
    fn table_and_file_conflict() {
        let mut a = args(Some("ukrainian_kmu"), &[]);
        a.table_file = Some("custom.toml");
        assert!(matches!(resolve_table(&a), Err(CliError::Usage(_))));
    }

    #[test]
    fn convert_lines_per_line() {
        let (table, preserve) = resolve_table(&args(Some("ukrainian_kmu"), &[])).unwrap();
        let mut out = Vec::new();
        convert_lines(
            io::Cursor::new("Київ\nЛЬВІВ\n\n"),
            &mut out,
            table.as_ref(),
            preserve,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Kyiv\nLVIV\n\n");
    }

    #[test]
    fn convert_lines_reports_invalid_utf8() {
        let (table, preserve) = resolve_table(&args(Some("ukrainian_kmu"), &[])).unwrap();
        let input: &[u8] = b"ok\n\xff\xfe\n";
        let err = convert_lines(input, Vec::new(), table.as_ref(), preserve).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn unknown_table() {
        assert!(matches!(
            resolve_table(&args(Some("martian"), &[])),
            Err(CliError::Catalog(_))
        ));
    }
}
