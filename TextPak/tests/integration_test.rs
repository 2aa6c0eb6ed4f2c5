use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::Path;
use tempfile::tempdir;
use textpak::operations::{tlk_apply, tlk_extract};
use textpak::prelude::*;

const HEADER: &str = "id\tflags\tsource\ttranslation\n";

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("menu_start", "Start game"),
        Entry::new("greet_user", "Hello %s, you have %d items"),
        Entry::new("hint_multiline", "First line\nSecond line\tTabbed"),
        Entry::new("menu_quit", "Quit"),
    ]
}

fn write_sample(path: &Path) -> Vec<u8> {
    let bytes = encode_common_texts(7, &sample_entries()).unwrap();
    std::fs::write(path, &bytes).unwrap();
    bytes
}

fn record(key: &str, value: &str) -> Vec<u8> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut out = Vec::new();
    out.extend_from_slice(&(key.len() as u16).to_le_bytes());
    out.extend_from_slice(key.as_bytes());
    out.extend_from_slice(&(units.len() as u16).to_le_bytes());
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

#[test]
fn test_extract_then_pack_is_byte_identical() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("work/common_texts.tsv");
    let output = dir.path().join("out/common_texts.bin");
    let original = write_sample(&input);

    let extracted = extract_to_table(&input, &table).unwrap();
    assert_eq!(extracted.version, 7);
    assert_eq!(extracted.entries, 4);

    let summary = pack(&input, &table, &output, &MergeOptions::default()).unwrap();
    assert_eq!(summary.table_rows, 4);
    assert_eq!(summary.report.skipped_empty, 4);
    assert_eq!(summary.report.replaced, 0);
    assert_eq!(std::fs::read(&output).unwrap(), original);
}

#[test]
fn test_exported_table_escapes_control_characters() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("common_texts.tsv");
    write_sample(&input);

    extract_to_table(&input, &table).unwrap();
    let text = std::fs::read_to_string(&table).unwrap();
    assert!(text.starts_with(HEADER));
    assert!(text.contains("hint_multiline\t1\tFirst line\\nSecond line\\tTabbed\t\n"));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_pack_applies_translations() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("uk.tsv");
    let output = dir.path().join("uk.bin");
    write_sample(&input);
    std::fs::write(
        &table,
        format!(
            "{HEADER}menu_quit\t1\tQuit\tВихід\n\
             hint_multiline\t1\tFirst line\\nSecond line\\tTabbed\tПерший\\nДругий\n\
             unknown_key\t1\tx\ty\n"
        ),
    )
    .unwrap();

    let options = MergeOptions {
        strict_placeholders: true,
        ..MergeOptions::default()
    };
    let summary = pack(&input, &table, &output, &options).unwrap();
    assert_eq!(
        summary.report,
        MergeReport {
            entries_total: 4,
            missing_in_table: 2,
            replaced: 2,
            skipped_empty: 0,
        }
    );

    let packed = read_common_texts(&output).unwrap();
    assert_eq!(packed.version, 7);
    let keys: Vec<_> = packed.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["menu_start", "greet_user", "hint_multiline", "menu_quit"]);
    assert_eq!(packed.get("menu_quit").unwrap().value, "Вихід");
    assert_eq!(packed.get("hint_multiline").unwrap().value, "Перший\nДругий");
    assert_eq!(packed.get("menu_start").unwrap().value, "Start game");
}

#[test]
fn test_empty_translation_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("uk.tsv");
    write_sample(&input);
    std::fs::write(&table, format!("{HEADER}menu_start\t1\tStart game\t\n")).unwrap();

    let kept = dir.path().join("kept.bin");
    let summary = pack(&input, &table, &kept, &MergeOptions::default()).unwrap();
    assert_eq!(summary.report.skipped_empty, 1);
    assert_eq!(
        read_common_texts(&kept).unwrap().get("menu_start").unwrap().value,
        "Start game"
    );

    let cleared = dir.path().join("cleared.bin");
    let options = MergeOptions {
        allow_empty_overwrite: true,
        ..MergeOptions::default()
    };
    let summary = pack(&input, &table, &cleared, &options).unwrap();
    assert_eq!(summary.report.replaced, 1);
    assert_eq!(summary.report.skipped_empty, 0);
    assert_eq!(
        read_common_texts(&cleared).unwrap().get("menu_start").unwrap().value,
        ""
    );
}

#[test]
fn test_strict_placeholder_mismatch_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("uk.tsv");
    let output = dir.path().join("out/uk.bin");
    let existing = dir.path().join("existing.bin");
    write_sample(&input);
    std::fs::write(
        &table,
        format!("{HEADER}greet_user\t1\tHello %s, you have %d items\tПривіт %s\n"),
    )
    .unwrap();
    std::fs::write(&existing, b"previous build").unwrap();

    let options = MergeOptions {
        strict_placeholders: true,
        ..MergeOptions::default()
    };
    let err = pack(&input, &table, &output, &options).unwrap_err();
    match err {
        Error::PlaceholderMismatch { keys } => assert_eq!(keys, ["greet_user"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());

    assert!(pack(&input, &table, &existing, &options).is_err());
    assert_eq!(std::fs::read(&existing).unwrap(), b"previous build");

    // Without strict checking the same table packs
    pack(&input, &table, &output, &MergeOptions::default()).unwrap();
    assert_eq!(
        read_common_texts(&output).unwrap().get("greet_user").unwrap().value,
        "Привіт %s"
    );
}

#[test]
fn test_value_past_end_is_truncated_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let mut bytes = encode_common_texts(1, &sample_entries()).unwrap();
    bytes.truncate(bytes.len() - 3);
    std::fs::write(&path, &bytes).unwrap();

    let err = read_common_texts(&path).unwrap_err();
    assert!(matches!(err, Error::TruncatedInput { .. }), "got {err}");
}

#[test]
fn test_count_larger_than_records_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overcount.bin");
    let mut bytes = encode_common_texts(1, &sample_entries()).unwrap();
    bytes[4..8].copy_from_slice(&5u32.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    let err = read_common_texts(&path).unwrap_err();
    assert!(matches!(err, Error::TruncatedInput { .. }), "got {err}");
}

#[test]
fn test_failed_pack_with_bad_table_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("common_texts.bin");
    let table = dir.path().join("bad.tsv");
    let output = dir.path().join("out.bin");
    write_sample(&input);
    std::fs::write(&table, "Key\tText\nmenu_quit\tQuit\n").unwrap();

    let err = pack(&input, &table, &output, &MergeOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { .. }));
    assert!(!output.exists());
}

#[test]
fn test_scanner_random_blob_has_few_false_positives() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut data = vec![0u8; 10_000];
    rng.fill_bytes(&mut data);

    let result = scan_records(&data);
    assert!(result.records <= 2, "{} accidental records", result.records);
}

#[test]
fn test_scan_to_table_sorts_and_dedups() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("blob.bin");
    let output = dir.path().join("blob.tsv");

    let mut data = vec![0xFF; 13];
    data.extend(record("menu_start", "Start"));
    data.extend([0u8; 5]);
    data.extend(record("menu_quit", "Quit"));
    data.extend(record("menu_start", "Again"));
    std::fs::write(&input, &data).unwrap();

    let summary = scan_to_table(&input, &output).unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.unique, 2);

    let table = load_table(&output).unwrap();
    let ids: Vec<_> = table.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["menu_quit", "menu_start"]);
    assert_eq!(table.get("menu_start").unwrap().source, "Start");
}

#[test]
fn test_tlk_extract_and_apply() {
    let dir = tempdir().unwrap();
    let xml_in = dir.path().join("dialog.xml");
    let tsv = dir.path().join("dialog.tsv");
    let xml_out = dir.path().join("out/dialog.xml");
    std::fs::write(
        &xml_in,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <tlk>\n\
         <string><id>10</id><flags>1</flags><data>Hello</data></string>\n\
         <string><id>11</id></string>\n\
         </tlk>\n",
    )
    .unwrap();

    let summary = tlk_extract(&xml_in, &tsv).unwrap();
    assert_eq!(summary.rows, 2);
    let table = load_table(&tsv).unwrap();
    assert_eq!(table.get("10").unwrap().source, "Hello");
    assert_eq!(table.get("10").unwrap().flags, "1");

    std::fs::write(
        &tsv,
        format!("{HEADER}10\t1\tHello\tПривіт\n11\t\t\tНове\n12\t\t\tзайве\n13\t\t\t\n"),
    )
    .unwrap();
    let report = tlk_apply(&xml_in, &tsv, &xml_out).unwrap();
    assert_eq!(report.rows, 4);
    assert_eq!(report.provided, 3);
    assert_eq!(report.applied, 2);
    assert_eq!(report.missing_ids, ["12"]);

    let written = std::fs::read_to_string(&xml_out).unwrap();
    assert!(written.contains("<data>Привіт</data>"));
    assert!(written.contains("<string><id>11</id><data>Нове</data></string>"));
}
