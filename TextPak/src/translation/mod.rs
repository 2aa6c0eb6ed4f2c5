//! Translation table workflow
//!
//! Decoded entries are exported to a tab-separated table for translators and
//! the filled-in table is loaded back as a lookup keyed by id.
//!
//! # Table Format
//!
//! UTF-8 text, one row per line, four tab-separated columns:
//!
//! 1. `id` - entry key
//! 2. `flags` - opaque marker, `1` for binary exports
//! 3. `source` - original text
//! 4. `translation` - empty on export, filled by the translator
//!
//! Backslash, newline, carriage return and tab inside a field are written
//! as `\\`, `\n`, `\r` and `\t`.
//!
//! ```tsv
//! id\tflags\tsource\ttranslation
//! menu_start\t1\tStart game\t
//! menu_quit\t1\tQuit\\nNow\t
//! ```

mod table;

pub use table::{
    TABLE_HEADER, TranslationTable, escape_field, export_entries, load_table, parse_table,
    unescape_field, write_table,
};

/// One data row of a translation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub id: String,
    pub flags: String,
    pub source: String,
    /// Empty means no translation supplied
    pub translation: String,
}

impl TranslationRow {
    /// Row for an untranslated entry
    pub fn untranslated(
        id: impl Into<String>,
        flags: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            flags: flags.into(),
            source: source.into(),
            translation: String::new(),
        }
    }

    #[must_use]
    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }
}
