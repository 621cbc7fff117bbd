
use crate::table::{Table, TableBuilder};

/// Minimal Ukrainian-style table exercising every rule set.
pub(super) fn test_table() -> Table {
    TableBuilder::new()
        .base_rules([
            ("а", "a"),
            ("б", "b"),
            ("в", "v"),
            ("г", "h"),
            ("д", "d"),
            ("е", "e"),
            ("є", "ie"),
            ("ж", "zh"),
            ("з", "z"),
            ("и", "y"),
            ("і", "i"),
            ("ї", "i"),
            ("й", "i"),
            ("к", "k"),
            ("л", "l"),
            ("м", "m"),
            ("н", "n"),
            ("о", "o"),
            ("п", "p"),
            ("р", "r"),
            ("с", "s"),
            ("т", "t"),
            ("у", "u"),
            ("ф", "f"),
            ("х", "kh"),
            ("ц", "ts"),
            ("ч", "ch"),
            ("ш", "sh"),
            ("щ", "shch"),
            ("ю", "iu"),
            ("я", "ia"),
        ])
        .contextual_rules([("зг", "zgh"), ("Зг", "Zgh"), ("ЗГ", "ZGh")])
        .word_initial_rules([
            ("є", "ye"),
            ("Є", "Ye"),
            ("ї", "yi"),
            ("Ї", "Yi"),
            ("й", "y"),
            ("Й", "Y"),
            ("ю", "yu"),
            ("Ю", "Yu"),
            ("я", "ya"),
            ("Я", "Ya"),
        ])
        .delete_all(["ь", "Ь", "'", "\u{2019}", "\u{02BC}"])
        .build()
        .unwrap()
}
