//! Strict common texts decoding

use super::{CommonTexts, Entry, HEADER_SIZE};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::Path;

/// Read a common texts file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any decode error
/// from [`parse_common_texts_bytes`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_common_texts<P: AsRef<Path>>(path: P) -> Result<CommonTexts> {
    let data = std::fs::read(path)?;
    parse_common_texts_bytes(&data)
}

/// Decode a common texts file from bytes
///
/// The header `count` is authoritative: exactly that many records are read
/// and any byte left over afterwards is an error.
///
/// # Errors
///
/// - [`Error::TruncatedInput`] if a field extends past the end of the data
/// - [`Error::MalformedKey`] if a key is not UTF-8
/// - [`Error::MalformedValue`] if a value is not UTF-16LE
/// - [`Error::TrailingData`] if bytes remain after the last record
pub fn parse_common_texts_bytes(data: &[u8]) -> Result<CommonTexts> {
    let mut cursor = Cursor::new(data);

    ensure_available(&cursor, HEADER_SIZE)?;
    let version = cursor.read_u32::<LittleEndian>()?;
    let count = cursor.read_u32::<LittleEndian>()? as usize;

    tracing::debug!("Common texts header: version {version}, {count} records");

    // Don't trust the header for preallocation; each record needs at least 4 bytes
    let mut entries = Vec::with_capacity(count.min(data.len() / 4));

    for index in 0..count {
        // Key: u16 byte length + UTF-8 bytes
        ensure_available(&cursor, 2)?;
        let key_len = cursor.read_u16::<LittleEndian>()? as usize;
        let key_offset = position(&cursor);
        let key_bytes = take(&mut cursor, key_len)?;
        let key = std::str::from_utf8(key_bytes)
            .map_err(|_| Error::MalformedKey {
                index,
                offset: key_offset,
            })?
            .to_string();

        // Value: u16 UTF-16 unit count + units * 2 bytes
        ensure_available(&cursor, 2)?;
        let value_units = cursor.read_u16::<LittleEndian>()? as usize;
        let value_offset = position(&cursor);
        let value_bytes = take(&mut cursor, value_units * 2)?;
        let value = decode_utf16le(value_bytes).ok_or_else(|| Error::MalformedValue {
            index,
            offset: value_offset,
            key: key.clone(),
        })?;

        entries.push(Entry {
            key,
            value,
            key_bytes: key_bytes.to_vec(),
        });
    }

    let offset = position(&cursor);
    if offset < data.len() {
        return Err(Error::TrailingData {
            offset,
            remaining: data.len() - offset,
        });
    }

    Ok(CommonTexts { version, entries })
}

/// Decode UTF-16LE bytes, rejecting unpaired surrogates
pub(crate) fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

fn position(cursor: &Cursor<&[u8]>) -> usize {
    cursor.position() as usize
}

fn ensure_available(cursor: &Cursor<&[u8]>, needed: usize) -> Result<()> {
    let offset = position(cursor);
    let available = cursor.get_ref().len().saturating_sub(offset);
    if available < needed {
        return Err(Error::TruncatedInput {
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

/// Borrow the next `len` bytes and advance past them
fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8]> {
    ensure_available(cursor, len)?;
    let start = position(cursor);
    let data: &'a [u8] = cursor.get_ref();
    cursor.set_position((start + len) as u64);
    Ok(&data[start..start + len])
}
