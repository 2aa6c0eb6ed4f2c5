//! Merging translations into decoded entries
//!
//! Produces a new entry sequence in the original order. Keys and their
//! stored bytes are never touched; only values change.
//!
//! ```no_run
//! use textpak::formats::common_texts::read_common_texts;
//! use textpak::merge::{MergeOptions, merge_entries};
//! use textpak::translation::load_table;
//!
//! let texts = read_common_texts("common_texts.bin")?;
//! let table = load_table("common_texts.uk.tsv")?;
//! let options = MergeOptions { strict_placeholders: true, ..MergeOptions::default() };
//!
//! let (entries, report) = merge_entries(&texts.entries, &table, &options)?;
//! println!("replaced {} of {}", report.replaced, report.entries_total);
//! # Ok::<(), textpak::Error>(())
//! ```

mod placeholders;

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::formats::common_texts::Entry;
use crate::translation::TranslationTable;

pub use placeholders::{is_consistent, placeholder_counts};

/// Options for merge operations
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Let an empty translation replace the original value
    pub allow_empty_overwrite: bool,
    /// Reject the whole merge when placeholders or newline counts differ
    /// between a row's source and translation
    pub strict_placeholders: bool,
}

/// Counts collected while merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Entries in the input sequence
    pub entries_total: usize,
    /// Entries whose key has no table row
    pub missing_in_table: usize,
    /// Entries given a new value
    pub replaced: usize,
    /// Entries kept because their translation was empty
    pub skipped_empty: usize,
}

/// Merge table translations into `entries`
///
/// # Errors
/// Returns [`Error::PlaceholderMismatch`] listing every offending key when
/// `strict_placeholders` is set and any translation fails validation. No
/// entries are returned in that case.
pub fn merge_entries(
    entries: &[Entry],
    table: &TranslationTable,
    options: &MergeOptions,
) -> Result<(Vec<Entry>, MergeReport)> {
    let mut report = MergeReport {
        entries_total: entries.len(),
        ..MergeReport::default()
    };
    let mut mismatched: BTreeSet<String> = BTreeSet::new();
    let mut merged = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(row) = table.get(&entry.key) else {
            report.missing_in_table += 1;
            merged.push(entry.clone());
            continue;
        };

        if row.translation.is_empty() {
            if options.allow_empty_overwrite {
                report.replaced += 1;
                merged.push(entry.with_value(String::new()));
            } else {
                report.skipped_empty += 1;
                merged.push(entry.clone());
            }
            continue;
        }

        if options.strict_placeholders && !is_consistent(&row.source, &row.translation) {
            mismatched.insert(entry.key.clone());
        }

        report.replaced += 1;
        merged.push(entry.with_value(row.translation.as_str()));
    }

    if !mismatched.is_empty() {
        tracing::warn!("{} keys failed placeholder validation", mismatched.len());
        return Err(Error::PlaceholderMismatch {
            keys: mismatched.into_iter().collect(),
        });
    }

    tracing::debug!(
        "Merged {} entries: {} replaced, {} skipped empty, {} missing",
        report.entries_total,
        report.replaced,
        report.skipped_empty,
        report.missing_in_table
    );
    Ok((merged, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::parse_table;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("greet_user", "Hello %s, you have %d items"),
            Entry::new("menu_quit", "Quit"),
            Entry::new("menu_help", "Help"),
        ]
    }

    fn table(rows: &str) -> TranslationTable {
        parse_table(&format!("id\tflags\tsource\ttranslation\n{rows}")).unwrap()
    }

    #[test]
    fn test_empty_table_is_identity() {
        let original = entries();
        let (merged, report) =
            merge_entries(&original, &TranslationTable::new(), &MergeOptions::default()).unwrap();
        assert_eq!(merged, original);
        assert_eq!(report.missing_in_table, original.len());
        assert_eq!(report.replaced, 0);
    }

    #[test]
    fn test_replaces_and_counts() {
        let t = table("menu_quit\t1\tQuit\tВихід\nunused_key\t1\tx\ty\n");
        let (merged, report) = merge_entries(&entries(), &t, &MergeOptions::default()).unwrap();
        assert_eq!(merged[1].value, "Вихід");
        assert_eq!(merged[1].key_bytes, b"menu_quit");
        assert_eq!(merged[0].value, "Hello %s, you have %d items");
        assert_eq!(
            report,
            MergeReport {
                entries_total: 3,
                missing_in_table: 2,
                replaced: 1,
                skipped_empty: 0,
            }
        );
    }

    #[test]
    fn test_empty_translation_kept_by_default() {
        let t = table("menu_help\t1\tHelp\t\n");
        let (merged, report) = merge_entries(&entries(), &t, &MergeOptions::default()).unwrap();
        assert_eq!(merged[2].value, "Help");
        assert_eq!(report.skipped_empty, 1);
        assert_eq!(report.replaced, 0);
    }

    #[test]
    fn test_empty_translation_overwrites_when_allowed() {
        let t = table("menu_help\t1\tHelp\t\n");
        let options = MergeOptions {
            allow_empty_overwrite: true,
            ..MergeOptions::default()
        };
        let (merged, report) = merge_entries(&entries(), &t, &options).unwrap();
        assert_eq!(merged[2].value, "");
        assert_eq!(report.replaced, 1);
        assert_eq!(report.skipped_empty, 0);
    }

    #[test]
    fn test_strict_rejects_missing_placeholder() {
        let t = table(
            "greet_user\t1\tHello %s, you have %d items\tПривіт %s\n\
             menu_quit\t1\tQuit\tВихід\\nзараз\n\
             menu_help\t1\tHelp\tДовідка\n",
        );
        let options = MergeOptions {
            strict_placeholders: true,
            ..MergeOptions::default()
        };
        let err = merge_entries(&entries(), &t, &options).unwrap_err();
        match err {
            Error::PlaceholderMismatch { keys } => {
                assert_eq!(keys, ["greet_user", "menu_quit"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_accepts_mismatch() {
        let t = table("greet_user\t1\tHello %s, you have %d items\tПривіт %s\n");
        let (merged, _) = merge_entries(&entries(), &t, &MergeOptions::default()).unwrap();
        assert_eq!(merged[0].value, "Привіт %s");
    }

    #[test]
    fn test_duplicate_keys_in_entries_all_merged() {
        let original = vec![Entry::new("dup_key", "a"), Entry::new("dup_key", "b")];
        let t = table("dup_key\t1\ta\tc\n");
        let (merged, report) = merge_entries(&original, &t, &MergeOptions::default()).unwrap();
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|e| e.value == "c"));
        assert_eq!(report.replaced, 2);
    }
}
