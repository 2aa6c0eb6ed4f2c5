//! Heuristic record recovery for blobs without trusted framing
//!
//! Walks the data one byte at a time looking for `u16 len | key | u16 units | value`
//! runs. A candidate is accepted only when the key looks like an identifier
//! (ASCII letters, digits and underscores, with at least one underscore) and
//! the value decodes as mostly printable UTF-16LE text. After an accepted
//! record scanning continues directly behind it; after a rejection it
//! resumes one byte further on.
//!
//! Both missed records and accidental matches are possible. Neither is an
//! error: callers only get what was recovered.

use super::Entry;
use super::reader::decode_utf16le;
use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Keys must be shorter than this many bytes
pub const MAX_KEY_LEN: usize = 200;

/// Values must be shorter than this many UTF-16 units
pub const MAX_VALUE_UNITS: usize = 4000;

/// Minimum share of printable characters in an accepted value
pub const MIN_PRINTABLE_RATIO: f64 = 0.9;

/// Acceptance thresholds for [`scan_records_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannerConfig {
    /// Exclusive upper bound on key length in bytes
    pub max_key_len: usize,
    /// Exclusive upper bound on value length in UTF-16 units
    pub max_value_units: usize,
    /// Minimum printable share (0.0 to 1.0) of decoded value characters
    pub min_printable_ratio: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            max_value_units: MAX_VALUE_UNITS,
            min_printable_ratio: MIN_PRINTABLE_RATIO,
        }
    }
}

/// Outcome of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Recovered entries in first-seen key order
    pub entries: Vec<Entry>,
    /// Number of records accepted before de-duplication
    pub records: usize,
}

impl ScanResult {
    /// Number of records dropped because their key was already seen
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.records - self.entries.len()
    }
}

/// Scan a blob with the default thresholds
#[must_use]
pub fn scan_records(data: &[u8]) -> ScanResult {
    scan_records_with(data, &ScannerConfig::default())
}

/// Scan a blob for key/value records
///
/// When a key appears more than once, the first record wins.
#[must_use]
pub fn scan_records_with(data: &[u8], config: &ScannerConfig) -> ScanResult {
    let mut seen: IndexMap<String, Entry> = IndexMap::new();
    let mut records = 0;
    let mut pos = 0;

    while pos + 4 < data.len() {
        if let Some((entry, next)) = match_record(data, pos, config) {
            records += 1;
            match seen.entry(entry.key.clone()) {
                MapEntry::Occupied(_) => {
                    tracing::debug!("Scanner dropped repeat of '{}' at offset {pos}", entry.key);
                }
                MapEntry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
            pos = next;
        } else {
            pos += 1;
        }
    }

    tracing::debug!("Scanner accepted {records} records, {} unique", seen.len());

    ScanResult {
        entries: seen.into_values().collect(),
        records,
    }
}

/// Try to read one record at `pos`, returning it and the offset behind it
fn match_record(data: &[u8], pos: usize, config: &ScannerConfig) -> Option<(Entry, usize)> {
    let key_len = LittleEndian::read_u16(data.get(pos..pos + 2)?) as usize;
    if key_len == 0 || key_len >= config.max_key_len {
        return None;
    }

    let key_start = pos + 2;
    let key_end = key_start + key_len;
    // Room for the key and the value length that follows it
    if key_end + 2 > data.len() {
        return None;
    }
    let key_bytes = &data[key_start..key_end];
    if !is_key_bytes(key_bytes) {
        return None;
    }

    let value_units = LittleEndian::read_u16(&data[key_end..key_end + 2]) as usize;
    if value_units == 0 || value_units >= config.max_value_units {
        return None;
    }

    let value_start = key_end + 2;
    let value_end = value_start + value_units * 2;
    let value = decode_utf16le(data.get(value_start..value_end)?)?;
    if !is_mostly_printable(&value, config.min_printable_ratio) {
        return None;
    }

    // The key predicate only admits ASCII, so the text form is exact
    let key = String::from_utf8_lossy(key_bytes).into_owned();
    Some((
        Entry {
            key,
            value,
            key_bytes: key_bytes.to_vec(),
        },
        value_end,
    ))
}

/// ASCII identifier with at least one underscore
pub(crate) fn is_key_bytes(bytes: &[u8]) -> bool {
    !bytes.is_empty()
        && bytes.contains(&b'_')
        && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Share of printable characters is at least `min_ratio`; empty text fails
pub(crate) fn is_mostly_printable(text: &str, min_ratio: f64) -> bool {
    let mut total = 0usize;
    let mut printable = 0usize;
    for ch in text.chars() {
        total += 1;
        if is_printable(ch) {
            printable += 1;
        }
    }
    total > 0 && (printable as f64 / total as f64) >= min_ratio
}

/// Plain space, or any character outside the Other (C*) and Separator (Z*)
/// general categories
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}
