//! Translation table parsing and rendering

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use super::TranslationRow;
use crate::error::{Error, Result};
use crate::formats::common_texts::Entry;

/// Required header row, in column order
pub const TABLE_HEADER: [&str; 4] = ["id", "flags", "source", "translation"];

/// Flags value written for entries exported from binary files
const BINARY_FLAGS: &str = "1";

/// A loaded translation table
///
/// Rows are kept in file order. Lookups by id see the last row with that id.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    rows: Vec<TranslationRow>,
    index: HashMap<String, usize>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row; a later row with the same id replaces the earlier one for lookups
    pub fn push(&mut self, row: TranslationRow) {
        if self.index.insert(row.id.clone(), self.rows.len()).is_some() {
            tracing::warn!("Duplicate table id '{}', later row wins", row.id);
        }
        self.rows.push(row);
    }

    /// Most recent row for `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TranslationRow> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    /// All data rows in file order, duplicates included
    #[must_use]
    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    /// Number of data rows read
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rows shadowed by a later row with the same id
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.rows.len() - self.index.len()
    }
}

/// Load a translation table from disk
///
/// # Errors
/// Returns an IO error if the file cannot be read, [`Error::Utf8Error`] if
/// it is not UTF-8, or any error from [`parse_table`].
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<TranslationTable> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    parse_table(&text)
}

/// Parse translation table text
///
/// # Errors
/// - [`Error::EmptyTable`] if there is no header row
/// - [`Error::InvalidHeader`] if the header is not exactly [`TABLE_HEADER`]
/// - [`Error::MalformedRow`] if a data row does not have four columns
pub fn parse_table(text: &str) -> Result<TranslationTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    // A final newline terminates the last row rather than starting a new one
    let body = text.strip_suffix('\n').unwrap_or(text);
    if body.is_empty() {
        return Err(Error::EmptyTable);
    }

    let mut lines = body.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = lines.next().ok_or(Error::EmptyTable)?;
    if !header.split('\t').eq(TABLE_HEADER) {
        return Err(Error::InvalidHeader {
            found: header.to_string(),
        });
    }

    let mut table = TranslationTable::new();
    for (i, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        let [id, flags, source, translation] = fields[..] else {
            return Err(Error::MalformedRow {
                row: i + 2,
                columns: fields.len(),
            });
        };
        table.push(TranslationRow {
            id: unescape_field(id),
            flags: unescape_field(flags),
            source: unescape_field(source),
            translation: unescape_field(translation),
        });
    }

    tracing::debug!(
        "Loaded translation table: {} rows, {} ids",
        table.row_count(),
        table.len()
    );
    Ok(table)
}

/// Render rows as table text, header included
#[must_use]
pub fn write_table(rows: &[TranslationRow]) -> String {
    let mut out = String::new();
    out.push_str(&TABLE_HEADER.join("\t"));
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            escape_field(&row.id),
            escape_field(&row.flags),
            escape_field(&row.source),
            escape_field(&row.translation)
        );
    }
    out
}

/// Render decoded entries as an untranslated table, in the given order
#[must_use]
pub fn export_entries(entries: &[Entry]) -> String {
    let rows: Vec<TranslationRow> = entries
        .iter()
        .map(|e| TranslationRow::untranslated(e.key.clone(), BINARY_FLAGS, e.value.clone()))
        .collect();
    write_table(&rows)
}

/// Escape backslash, newline, carriage return and tab
#[must_use]
pub fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`escape_field`]; unknown escapes are kept as written
#[must_use]
pub fn unescape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
