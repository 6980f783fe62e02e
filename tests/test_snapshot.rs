//! Snapshot reload tests: atomic swap, failure isolation, status.

mod common;

use margin_sdk::config::{Encoding, PURCHASES_FILE, SALES_FILE};
use margin_sdk::MarginError;

const PURCHASES_V2: &str = "\
CODPRODUTO\tDATA\tCUSTODIRETO_UN_EST
P001\t20.06.2025\t130,00
";

#[test]
fn initial_status_reports_counts() {
    let (sdk, _tmp) = common::sample_sdk();
    let status = sdk.status();
    assert_eq!(status.generation, 1);
    assert_eq!(status.products, 4);
    assert_eq!(status.purchases, 6);
    assert_eq!(status.sales, 3);
    assert_eq!(status.encoding, Encoding::Utf8);
}

#[test]
fn reload_swaps_in_new_data() {
    let (sdk, tmp) = common::sample_sdk();
    common::write_table(tmp.path(), PURCHASES_FILE, PURCHASES_V2);

    let status = sdk.reload().unwrap();
    assert_eq!(status.generation, 2);
    assert_eq!(status.purchases, 1);
    assert_eq!(sdk.margin("P001", None).unwrap().purchase_price, 130.0);
}

#[test]
fn held_snapshot_is_unaffected_by_reload() {
    let (sdk, tmp) = common::sample_sdk();
    let before = sdk.snapshot();

    common::write_table(tmp.path(), PURCHASES_FILE, PURCHASES_V2);
    sdk.reload().unwrap();

    assert_eq!(before.margins().get("P001", None).unwrap().purchase_price, 120.0);
    assert_eq!(sdk.snapshot().margins().get("P001", None).unwrap().purchase_price, 130.0);
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let (sdk, tmp) = common::sample_sdk();
    std::fs::remove_file(tmp.path().join(SALES_FILE)).unwrap();

    let err = sdk.reload().unwrap_err();
    assert!(matches!(err, MarginError::SourceUnavailable { .. }));
    assert_eq!(sdk.status().generation, 1);
    assert_eq!(sdk.margin("P001", None).unwrap().sale_price, 150.0);
}

#[test]
fn build_fails_loudly_on_missing_source() {
    let tmp = tempfile::tempdir().unwrap();
    let err = margin_sdk::MarginSdk::builder()
        .data_dir(tmp.path())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, MarginError::SourceUnavailable { .. }));
}

#[test]
fn custom_file_names_and_latin1() {
    let tmp = tempfile::tempdir().unwrap();
    let mut products = b"CODPRODUTO\tPRODUTO\nP001\tA".to_vec();
    products.extend_from_slice(&[0xE7, 0xFA, 0x63, 0x61, 0x72, b'\n']);
    std::fs::write(tmp.path().join("produtos.tsv"), products).unwrap();
    common::write_table(tmp.path(), "compras.tsv", common::PURCHASES);
    common::write_table(tmp.path(), "vendas.tsv", common::SALES);

    let sdk = margin_sdk::MarginSdk::builder()
        .data_dir(tmp.path())
        .products_file("produtos.tsv")
        .purchases_file("compras.tsv")
        .sales_file("vendas.tsv")
        .encoding(Encoding::Latin1)
        .build()
        .unwrap();

    let one = sdk.margin("P001", None).unwrap();
    assert_eq!(one.product_name, "Açúcar");
    assert_eq!(one.purchase_price, 120.0);
    assert!(sdk.to_string().contains("encoding=latin1"));
}

#[test]
fn concurrent_readers_during_reload() {
    let (sdk, tmp) = common::sample_sdk();
    let sdk = std::sync::Arc::new(sdk);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let sdk = sdk.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let price = sdk.margin("P001", None).unwrap().purchase_price;
                    assert!(price == 120.0 || price == 130.0, "torn read: {price}");
                }
            })
        })
        .collect();

    common::write_table(tmp.path(), PURCHASES_FILE, PURCHASES_V2);
    sdk.reload().unwrap();

    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(sdk.margin("P001", None).unwrap().purchase_price, 130.0);
}

#[test]
fn overlapping_reloads_each_bump_the_generation_once() {
    let (sdk, tmp) = common::sample_sdk();
    let sdk = std::sync::Arc::new(sdk);
    common::write_table(tmp.path(), PURCHASES_FILE, PURCHASES_V2);

    let reloaders: Vec<_> = (0..8)
        .map(|_| {
            let sdk = sdk.clone();
            std::thread::spawn(move || sdk.reload().unwrap().generation)
        })
        .collect();
    let mut generations: Vec<u64> = reloaders.into_iter().map(|h| h.join().unwrap()).collect();
    generations.sort_unstable();

    assert_eq!(generations, (2..=9).collect::<Vec<u64>>());
    let status = sdk.status();
    assert_eq!(status.generation, 9);
    assert_eq!(status.purchases, 1);
}
