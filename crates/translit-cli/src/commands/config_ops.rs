use std::path::Path;

use translit_engine::bundled;
use translit_engine::settings::{self, Settings};

use super::die;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let s = die!(Settings::load(Path::new(file)), "Error: {}");
    let catalog = die!(bundled::catalog(), "Error loading tables: {}");
    die!(s.resolve(&catalog), "Error: {}");
    println!(
        "OK: table={}, overlays=[{}], preserve_case={}",
        s.conversion.table,
        s.conversion.overlays.join(", "),
        s.conversion.preserve_case
    );
}
