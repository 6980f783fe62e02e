//! Shared test fixtures for the margin SDK integration tests.
//!
//! Provides `write_sample_tables()` which writes small tab-separated
//! products, purchases and sales tables into a temporary directory.

#![allow(dead_code)]

use margin_sdk::config::{PRODUCTS_FILE, PURCHASES_FILE, SALES_FILE};
use margin_sdk::MarginSdk;
use std::fs;
use std::path::Path;

pub const PRODUCTS: &str = "\
CODPRODUTO\tPRODUTO
P001\tParafuso sextavado
P002\tPorca M8
P003\tArruela lisa
P004\tPrego 17x21
P001\tParafuso duplicado
";

// P001: scenario data. P002: a same-day tie and an undated row.
// P005 has no product row.
pub const PURCHASES: &str = "\
CODPRODUTO\tDATA\tCUSTODIRETO_UN_EST\tNUMNOTA
P001\t01.06.2025\t100,00\t1001
P001\t10/06/2025\t120,00\t1002
P002\t05-06-2025\t10,00\t2001
 P002 \t05.06.2025\t12,00\t2002
P002\t\t99,00\t2003
P005\t01.06.2025\t7,00\t5001
";

pub const SALES: &str = "\
CODPRODUTO\tDATAEMISSAONF\tPRECO\tNUMNOTA
P001\t05.06.2025\t150,00\t9001
P002\t20.05.2025\t9,00\t9002
P003\t15.06.2025\t50,00\t9003
";

/// Write the three sample tables into a fresh temp directory.
///
/// The caller must keep the `TempDir` alive for as long as the files are
/// needed (including for reloads).
pub fn write_sample_tables() -> tempfile::TempDir {
    write_tables(PRODUCTS, PURCHASES, SALES)
}

/// Write arbitrary table contents using the default file names.
pub fn write_tables(products: &str, purchases: &str, sales: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), PRODUCTS_FILE, products);
    write_table(dir.path(), PURCHASES_FILE, purchases);
    write_table(dir.path(), SALES_FILE, sales);
    dir
}

pub fn write_table(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

/// An SDK loaded from the sample tables.
pub fn sample_sdk() -> (MarginSdk, tempfile::TempDir) {
    let dir = write_sample_tables();
    let sdk = MarginSdk::builder().data_dir(dir.path()).build().unwrap();
    (sdk, dir)
}
