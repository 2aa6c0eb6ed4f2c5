//! XML string table exchange
//!
//! Talk-table style XML where each `<string>` element carries an `<id>`, an
//! optional `<flags>` and an optional `<data>` child:
//!
//! ```xml
//! <tlk>
//!   <string><id>42</id><flags>1</flags><data>Hello</data></string>
//! </tlk>
//! ```
//!
//! Strings are exported to the same four-column translation table used for
//! binary files, and translated tables are applied back by rewriting `<data>`.
//! Everything outside the touched `<data>` elements is streamed through as is.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::translation::{TranslationRow, TranslationTable};

const STRING_TAG: &[u8] = b"string";
const ID_TAG: &[u8] = b"id";
const FLAGS_TAG: &[u8] = b"flags";
const DATA_TAG: &str = "data";

/// Missing ids kept for display in an [`ApplyReport`]
pub const MAX_REPORTED_MISSING: usize = 20;

/// Result of applying a translation table to XML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Table rows read
    pub rows: usize,
    /// Rows with a non-blank translation
    pub provided: usize,
    /// Provided rows whose id exists in the XML
    pub applied: usize,
    /// Provided rows whose id does not exist in the XML
    pub missing: usize,
    /// The first [`MAX_REPORTED_MISSING`] missing ids
    pub missing_ids: Vec<String>,
}

/// Export every `<string>` with a non-blank `<id>` as an untranslated row
///
/// # Errors
/// Returns [`Error::XmlError`] for malformed XML, or
/// [`Error::NoStringEntries`] if no usable `<string>` element exists.
pub fn extract_strings(xml: &str) -> Result<Vec<TranslationRow>> {
    let mut rows = Vec::new();
    for_each_string(xml, |events| {
        if let Some(row) = string_row(events)? {
            rows.push(row);
        }
        Ok(())
    })?;

    if rows.is_empty() {
        return Err(Error::NoStringEntries);
    }
    tracing::debug!("Extracted {} <string> entries", rows.len());
    Ok(rows)
}

/// Write non-blank translations from `table` into matching `<data>` elements
///
/// A `<data>` child is created when a matched `<string>` has none. When a
/// table id repeats, the last non-blank translation is used. When several
/// `<string>` elements share an id, every one of them is updated.
///
/// # Errors
/// Returns [`Error::XmlError`] for malformed XML.
pub fn apply_translations(xml: &str, table: &TranslationTable) -> Result<(String, ApplyReport)> {
    let mut known_ids: HashSet<String> = HashSet::new();
    for_each_string(xml, |events| {
        if let Some(id) = child_text(events, ID_TAG)?.map(|t| t.trim().to_string())
            && !id.is_empty()
        {
            known_ids.insert(id);
        }
        Ok(())
    })?;

    let mut report = ApplyReport {
        rows: table.row_count(),
        ..ApplyReport::default()
    };
    let mut updates: HashMap<&str, &str> = HashMap::new();
    for row in table.rows() {
        if row.translation.trim().is_empty() {
            continue;
        }
        report.provided += 1;
        if known_ids.contains(row.id.as_str()) {
            report.applied += 1;
            updates.insert(row.id.as_str(), row.translation.as_str());
        } else {
            report.missing += 1;
            if report.missing_ids.len() < MAX_REPORTED_MISSING {
                report.missing_ids.push(row.id.clone());
            }
        }
    }

    let output = rewrite(xml, &updates)?;
    Ok((output, report))
}

/// Call `visit` with the buffered events of each outermost `<string>` element
fn for_each_string<'a, F>(xml: &'a str, mut visit: F) -> Result<()>
where
    F: FnMut(&[Event<'a>]) -> Result<()>,
{
    let mut reader = Reader::from_str(strip_bom(xml));
    // Don't trim text - <data> keeps its leading/trailing whitespace
    reader.trim_text(false);

    let mut buffer: Vec<Event<'a>> = Vec::new();
    let mut depth = 0usize;

    loop {
        let event = reader.read_event()?;
        let opens_string = is_string_start(&event);
        match event {
            Event::Eof => break,
            Event::Start(_) if depth == 0 && opens_string => {
                depth = 1;
                buffer.push(event);
            }
            Event::Start(_) if depth > 0 => {
                depth += 1;
                buffer.push(event);
            }
            Event::End(_) if depth > 0 => {
                depth -= 1;
                buffer.push(event);
                if depth == 0 {
                    visit(&buffer)?;
                    buffer.clear();
                }
            }
            _ if depth > 0 => buffer.push(event),
            _ => {}
        }
    }
    Ok(())
}

/// Build a row from a buffered `<string>` element, if it has a usable id
fn string_row(events: &[Event<'_>]) -> Result<Option<TranslationRow>> {
    let Some(id) = child_text(events, ID_TAG)? else {
        return Ok(None);
    };
    let id = id.trim();
    if id.is_empty() {
        return Ok(None);
    }

    let flags = child_text(events, FLAGS_TAG)?
        .map(|f| f.trim().to_string())
        .unwrap_or_default();
    let source = child_text(events, DATA_TAG.as_bytes())?.unwrap_or_default();

    Ok(Some(TranslationRow::untranslated(id, flags, source)))
}

/// Text of the first direct child named `name` of a buffered element
///
/// Only the text ahead of the child's own first nested element is returned.
fn child_text(events: &[Event<'_>], name: &[u8]) -> Result<Option<String>> {
    let mut depth = 0usize;
    let mut collecting = false;
    let mut leading = true;
    let mut text = String::new();

    for event in events {
        match event {
            Event::Start(e) => {
                depth += 1;
                if collecting {
                    leading = false;
                } else if depth == 2 && e.name().as_ref() == name {
                    collecting = true;
                }
            }
            Event::Empty(e) if depth == 1 && e.name().as_ref() == name => {
                return Ok(Some(String::new()));
            }
            Event::Empty(_) if collecting => leading = false,
            Event::End(_) => {
                if collecting && depth == 2 {
                    return Ok(Some(text));
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(e) if collecting && leading => text.push_str(&e.unescape()?),
            Event::CData(e) if collecting && leading => {
                text.push_str(&String::from_utf8_lossy(e));
            }
            _ => {}
        }
    }
    Ok(None)
}

/// Stream `xml` through, replacing `<data>` text for ids in `updates`
fn rewrite(xml: &str, updates: &HashMap<&str, &str>) -> Result<String> {
    let mut reader = Reader::from_str(strip_bom(xml));
    reader.trim_text(false);
    let mut writer = Writer::new(Vec::new());

    let mut buffer: Vec<Event<'_>> = Vec::new();
    let mut depth = 0usize;
    let mut first = true;

    loop {
        let event = reader.read_event()?;
        if first {
            first = false;
            if !matches!(event, Event::Decl(_)) {
                writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
                writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
            }
        }

        let opens_string = is_string_start(&event);
        match event {
            Event::Eof => break,
            Event::Start(_) if depth == 0 && opens_string => {
                depth = 1;
                buffer.push(event);
            }
            Event::Start(_) if depth > 0 => {
                depth += 1;
                buffer.push(event);
            }
            Event::End(_) if depth > 0 => {
                depth -= 1;
                buffer.push(event);
                if depth == 0 {
                    let id = child_text(&buffer, ID_TAG)?.map(|t| t.trim().to_string());
                    let update = id.as_deref().and_then(|id| updates.get(id).copied());
                    write_string(&mut writer, &buffer, update)?;
                    buffer.clear();
                }
            }
            _ if depth > 0 => buffer.push(event),
            _ => writer.write_event(event)?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Write a buffered `<string>` element, swapping in `data` when given
fn write_string(
    writer: &mut Writer<Vec<u8>>,
    events: &[Event<'_>],
    data: Option<&str>,
) -> Result<()> {
    let Some(data) = data else {
        for event in events {
            writer.write_event(event.borrow())?;
        }
        return Ok(());
    };

    let mut depth = 0usize;
    let mut skipping = false;
    let mut wrote_data = false;

    for event in events {
        match event {
            Event::Start(e) => {
                depth += 1;
                if skipping {
                    continue;
                }
                writer.write_event(event.borrow())?;
                if depth == 2 && !wrote_data && e.name().as_ref() == DATA_TAG.as_bytes() {
                    write_data_text(writer, data)?;
                    wrote_data = true;
                    skipping = true;
                }
            }
            Event::Empty(e)
                if depth == 1 && !wrote_data && e.name().as_ref() == DATA_TAG.as_bytes() =>
            {
                writer.write_event(Event::Start(e.borrow()))?;
                write_data_text(writer, data)?;
                writer.write_event(Event::End(e.to_end()))?;
                wrote_data = true;
            }
            Event::End(_) => {
                if skipping && depth == 2 {
                    skipping = false;
                    writer.write_event(event.borrow())?;
                } else if depth == 1 && !wrote_data {
                    // Closing </string> without a <data> child
                    writer.write_event(Event::Start(BytesStart::new(DATA_TAG)))?;
                    write_data_text(writer, data)?;
                    writer.write_event(Event::End(BytesEnd::new(DATA_TAG)))?;
                    wrote_data = true;
                    writer.write_event(event.borrow())?;
                } else if !skipping {
                    writer.write_event(event.borrow())?;
                }
                depth = depth.saturating_sub(1);
            }
            _ if skipping => {}
            _ => writer.write_event(event.borrow())?,
        }
    }
    Ok(())
}

fn write_data_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped(escape_text_minimal(text))))?;
    Ok(())
}

/// Escape only the characters required in XML text content.
/// In text content, only < and & need escaping. Apostrophes and quotes are fine.
fn escape_text_minimal(s: &str) -> Cow<'_, str> {
    if s.contains('&') || s.contains('<') {
        Cow::Owned(s.replace('&', "&amp;").replace('<', "&lt;"))
    } else {
        Cow::Borrowed(s)
    }
}

fn is_string_start(event: &Event<'_>) -> bool {
    matches!(event, Event::Start(e) if e.name().as_ref() == STRING_TAG)
}

fn strip_bom(xml: &str) -> &str {
    xml.strip_prefix('\u{feff}').unwrap_or(xml)
}
