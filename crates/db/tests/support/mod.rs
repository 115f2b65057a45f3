#![allow(dead_code)]

use std::path::PathBuf;

use billing_core::{Contract, Customer, MeterReading, TaxType};
use billing_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let mut dir = tempfile::tempdir().expect("temp dir");
    // Tests reopen the database file after dropping TestDb, so the
    // directory must survive the TempDir drop.
    dir.disable_cleanup(true);
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn make_contract(device_id: &str, tax_type: TaxType) -> Contract {
    Contract {
        device_id: device_id.to_string(),
        monthly_rent: 1000.0,
        color_unit_price: 3.0,
        bw_unit_price: 0.5,
        color_giveaway: 50,
        bw_giveaway: 100,
        color_error_rate: 0.02,
        bw_error_rate: 0.01,
        color_basic: 200,
        bw_basic: 500,
        tax_type,
        notes: String::new(),
    }
}

pub fn make_reading(device_id: &str, period: &str, color: i64, bw: i64) -> MeterReading {
    MeterReading {
        id: None,
        device_id: device_id.to_string(),
        period: period.to_string(),
        color_count: color,
        bw_count: bw,
        recorded_at: "2025/08/31-09:00".to_string(),
    }
}

pub fn make_customer(device_id: &str, name: &str) -> Customer {
    Customer {
        device_id: device_id.to_string(),
        customer_name: name.to_string(),
        device_number: "A12345".to_string(),
        machine_model: "Canon iR-ADV".to_string(),
        tax_id: "12345678".to_string(),
        install_address: "1 Example Rd".to_string(),
        service_person: "Pat".to_string(),
        contract_number: "C001".to_string(),
        contract_start: "2024/01/01".to_string(),
        contract_end: "2025/12/31".to_string(),
    }
}
