//! Common texts encoding

use super::{CommonTexts, Entry, HEADER_SIZE};
use crate::error::{Error, Result};
use crate::utils::write_atomic;
use byteorder::{LittleEndian, WriteBytesExt};
use std::path::Path;

/// Encode and atomically write a common texts file
///
/// # Errors
/// Returns an encode error from [`encode_common_texts`] or an IO error if
/// the file cannot be written. The destination is left untouched on failure.
pub fn write_common_texts<P: AsRef<Path>>(path: P, texts: &CommonTexts) -> Result<()> {
    let bytes = encode_common_texts(texts.version, &texts.entries)?;
    write_atomic(path, &bytes)
}

/// Encode entries into the strict binary layout
///
/// Keys are written from their stored `key_bytes`, so untouched entries
/// round-trip bit for bit.
///
/// # Errors
/// - [`Error::ValueTooLong`] if a value exceeds 65535 UTF-16 units
/// - [`Error::KeyTooLong`] if a key exceeds 65535 bytes
/// - [`Error::TooManyEntries`] if the count does not fit in a u32
pub fn encode_common_texts(version: u32, entries: &[Entry]) -> Result<Vec<u8>> {
    let count = u32::try_from(entries.len()).map_err(|_| Error::TooManyEntries {
        count: entries.len(),
    })?;

    let body_size: usize = entries
        .iter()
        .map(|e| 4 + e.key_bytes.len() + e.value.len() * 2)
        .sum();
    let mut writer = Vec::with_capacity(HEADER_SIZE + body_size);

    writer.write_u32::<LittleEndian>(version)?;
    writer.write_u32::<LittleEndian>(count)?;

    for entry in entries {
        let key_len = u16::try_from(entry.key_bytes.len()).map_err(|_| Error::KeyTooLong {
            key: String::from_utf8_lossy(&entry.key_bytes).into_owned(),
            len: entry.key_bytes.len(),
        })?;

        let units: Vec<u16> = entry.value.encode_utf16().collect();
        let value_units = u16::try_from(units.len()).map_err(|_| Error::ValueTooLong {
            key: entry.key.clone(),
            units: units.len(),
        })?;

        writer.write_u16::<LittleEndian>(key_len)?;
        writer.extend_from_slice(&entry.key_bytes);
        writer.write_u16::<LittleEndian>(value_units)?;
        for unit in units {
            writer.write_u16::<LittleEndian>(unit)?;
        }
    }

    Ok(writer)
}
