use assert_cmd::cargo_bin;
use tempfile::tempdir;

#[test]
fn test_ledger_export_records_completed_orders() {
    let dir = tempdir().unwrap();
    let ledger_path = dir.path().join("ledger.json");

    assert_cmd::Command::new(cargo_bin!("storekeep"))
        .arg("--ledger-out")
        .arg(&ledger_path)
        .write_stdin("Ada\n2\nC01\n2\n5\n1\n39.98\n11\n")
        .assert()
        .success();

    let raw = std::fs::read_to_string(&ledger_path).unwrap();
    let orders: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["total_paid"], "39.98");
    assert_eq!(orders[0]["lines"][0]["product_id"], "C01");
    assert_eq!(orders[0]["lines"][0]["quantity"], 2);
    assert_eq!(orders[0]["payments"][0]["kind"], "card");
    assert_eq!(orders[0]["payments"][0]["amount"], "39.98");
    assert!(orders[0]["placed_at"].as_str().is_some());
}

#[test]
fn test_ledger_export_empty_session() {
    let dir = tempdir().unwrap();
    let ledger_path = dir.path().join("ledger.json");

    assert_cmd::Command::new(cargo_bin!("storekeep"))
        .arg("--ledger-out")
        .arg(&ledger_path)
        .write_stdin("Ada\n11\n")
        .assert()
        .success();

    let raw = std::fs::read_to_string(&ledger_path).unwrap();
    let orders: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 0);
}
