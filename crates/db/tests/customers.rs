mod support;

use support::{make_customer, setup_db};

#[test]
fn get_customer_round_trips() {
    let test_db = setup_db();
    let customer = make_customer("DEV001", "Grand Print Co");
    test_db.db.upsert_customer(&customer).expect("upsert");

    let found = test_db
        .db
        .get_customer("DEV001")
        .expect("query")
        .expect("customer");
    assert_eq!(found, customer);
}

#[test]
fn search_matches_substrings_of_customer_name() {
    let test_db = setup_db();
    test_db
        .db
        .upsert_customer(&make_customer("DEV001", "Grand Print Co"))
        .expect("upsert");
    test_db
        .db
        .upsert_customer(&make_customer("DEV002", "Print Masters"))
        .expect("upsert");
    test_db
        .db
        .upsert_customer(&make_customer("DEV003", "Acme Legal"))
        .expect("upsert");

    let matches = test_db.db.search_customers("Print").expect("search");
    let ids: Vec<&str> = matches.iter().map(|c| c.device_id.as_str()).collect();
    assert_eq!(ids, vec!["DEV001", "DEV002"]);

    let none = test_db.db.search_customers("Nobody").expect("search");
    assert!(none.is_empty());
}
