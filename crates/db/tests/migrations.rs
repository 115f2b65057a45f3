mod support;

use billing_core::TaxType;
use billing_db::Db;
use support::{make_contract, setup_db};

#[test]
fn migrate_is_idempotent() {
    let mut test_db = setup_db();
    test_db.db.migrate().expect("second migrate");
    test_db.db.migrate().expect("third migrate");
}

#[test]
fn data_survives_reopen_and_remigrate() {
    let test_db = setup_db();
    let mut contract = make_contract("DEV001", TaxType::Inclusive);
    contract.notes = "ink delivered monthly".to_string();
    test_db.db.upsert_contract(&contract).expect("upsert");
    let path = test_db.path.clone();
    drop(test_db);

    let mut db = Db::open(&path).expect("reopen");
    db.migrate().expect("remigrate");
    let found = db.get_contract("DEV001").expect("query").expect("contract");
    assert_eq!(found.notes, "ink delivered monthly");
    assert_eq!(found.tax_type, TaxType::Inclusive);
}
