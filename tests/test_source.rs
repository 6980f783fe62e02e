//! Table loader tests: delimiters, encodings, failures and indexing.

mod common;

use margin_sdk::config::{Encoding, PRODUCTS_FILE};
use margin_sdk::source::{field, index, RawRow, TableSource};
use margin_sdk::MarginError;
use std::fs;

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn read_rows(text: &str, delimiter: u8) -> Vec<RawRow> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    fs::write(&path, text).unwrap();
    TableSource::new(&path).delimiter(delimiter).load().unwrap()
}

#[test]
fn rows_are_keyed_by_header() {
    let rows = read_rows("CODPRODUTO\tPRODUTO\nP001\tParafuso\nP002\tPorca\n", b'\t');
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["CODPRODUTO"], "P001");
    assert_eq!(rows[1]["PRODUTO"], "Porca");
}

#[test]
fn header_names_are_trimmed() {
    let rows = read_rows(" CODPRODUTO \tPRODUTO\nP001\tParafuso\n", b'\t');
    assert_eq!(field(&rows[0], "CODPRODUTO"), "P001");
}

#[test]
fn short_rows_leave_cells_absent() {
    let rows = read_rows("CODPRODUTO\tPRODUTO\nP001\n", b'\t');
    assert_eq!(field(&rows[0], "CODPRODUTO"), "P001");
    assert_eq!(field(&rows[0], "PRODUTO"), "");
    assert!(!rows[0].contains_key("PRODUTO"));
}

#[test]
fn other_delimiters_are_supported() {
    let rows = read_rows("CODPRODUTO;PRODUTO\nP001;Parafuso\n", b';');
    assert_eq!(rows[0]["PRODUTO"], "Parafuso");
}

#[test]
fn header_only_table_is_empty() {
    let rows = read_rows("CODPRODUTO\tPRODUTO\n", b'\t');
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// TableSource
// ---------------------------------------------------------------------------

#[test]
fn load_reads_utf8_file() {
    let dir = common::write_sample_tables();
    let rows = TableSource::new(dir.path().join(PRODUCTS_FILE)).load().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["PRODUTO"], "Parafuso sextavado");
}

#[test]
fn load_is_restartable() {
    let dir = common::write_sample_tables();
    let source = TableSource::new(dir.path().join(PRODUCTS_FILE));
    let first = source.load().unwrap();
    let second = source.load().unwrap();
    assert_eq!(first, second);
}

#[test]
fn utf8_byte_order_mark_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.csv");
    fs::write(&path, "\u{feff}CODPRODUTO\tPRODUTO\nP001\tParafuso\n").unwrap();
    let rows = TableSource::new(&path)
        .load_with_columns(&["CODPRODUTO"])
        .unwrap();
    assert_eq!(rows[0]["CODPRODUTO"], "P001");
}

#[test]
fn latin1_file_decodes_accents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    let mut bytes = b"CODPRODUTO\tPRODUTO\nP001\t".to_vec();
    // "Açúcar" in ISO-8859-1
    bytes.extend_from_slice(&[0x41, 0xE7, 0xFA, 0x63, 0x61, 0x72, b'\n']);
    fs::write(&path, bytes).unwrap();

    let rows = TableSource::new(&path)
        .encoding(Encoding::Latin1)
        .load()
        .unwrap();
    assert_eq!(rows[0]["PRODUTO"], "Açúcar");
}

#[test]
fn latin1_bytes_fail_as_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    fs::write(&path, [b'C', b'\t', b'P', b'\n', b'1', b'\t', 0xE7, b'\n']).unwrap();

    let err = TableSource::new(&path).load().unwrap_err();
    assert!(matches!(err, MarginError::SourceUnavailable { .. }));
}

#[test]
fn missing_file_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = TableSource::new(&path).load().unwrap_err();
    match err {
        MarginError::SourceUnavailable { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_column_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrong.csv");
    // Comma-separated file read as tab-separated: one big header.
    fs::write(&path, "CODPRODUTO,PRODUTO\nP001,Parafuso\n").unwrap();
    let err = TableSource::new(&path)
        .load_with_columns(&["CODPRODUTO"])
        .unwrap_err();
    assert!(err.to_string().contains("missing column 'CODPRODUTO'"));
}

#[test]
fn encoding_from_str() {
    assert_eq!("utf-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
    assert_eq!("UTF8".parse::<Encoding>().unwrap(), Encoding::Utf8);
    assert_eq!("latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
    assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
    assert!("cp1252".parse::<Encoding>().is_err());
}

// ---------------------------------------------------------------------------
// index
// ---------------------------------------------------------------------------

#[test]
fn index_groups_by_trimmed_key_in_file_order() {
    let rows = vec![("A ", 1), ("B", 2), (" A", 3), ("A", 4)];
    let grouped = index(rows, |r| r.0);
    assert_eq!(grouped.len(), 2);
    let a: Vec<i32> = grouped["A"].iter().map(|r| r.1).collect();
    assert_eq!(a, vec![1, 3, 4]);
    assert_eq!(grouped["B"].len(), 1);
}
