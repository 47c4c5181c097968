use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_pricing_prints_catalog() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.arg("pricing").env_remove("ESTATE_PAY_DEPOSIT_AMOUNT");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("item,name,amount,currency"))
        .stdout(predicate::str::contains("deposit,Reservation deposit,50000,ngn"))
        .stdout(predicate::str::contains("pro,Pro Boost,15000,ngn"));
}

#[test]
fn test_pricing_custom_deposit() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["pricing", "--deposit-amount", "75000.50"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("deposit,Reservation deposit,75000.5,ngn"));
}

#[test]
fn test_pricing_rejects_non_positive_deposit() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["pricing", "--deposit-amount", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));
}

#[test]
fn test_serve_rejects_short_jwt_secret() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args([
        "serve",
        "--provider",
        "simulated",
        "--jwt-secret",
        "too-short",
        "--address",
        "127.0.0.1:0",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JWT secret must be at least 32 characters"));
}

#[test]
fn test_export_empty_ledger() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["export", "--user", "user-1"]).env_remove("ESTATE_PAY_DB_PATH");

    cmd.assert().success().stdout(
        "id,created_at,type,status,amount,currency,property_id,provider_payment_intent_id,description\n",
    );
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["export", "--user", "user-1", "--db-path", "some_db"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["export", "--user", "user-1", "--db-path"])
        .arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING").not());
}

#[cfg(feature = "storage-rocksdb")]
#[tokio::test]
async fn test_export_reads_persisted_ledger() {
    use estate_pay::domain::payment::PaymentPlan;
    use estate_pay::domain::ports::TransactionStore;
    use estate_pay::domain::pricing::PriceCatalog;
    use estate_pay::domain::transaction::TransactionRecord;
    use estate_pay::infrastructure::rocksdb::RocksDBStore;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ledger_db");
    {
        let store = RocksDBStore::open(&db_path).unwrap();
        let catalog = PriceCatalog::default();
        let plan = PaymentPlan::subscription(
            "user-1".to_string(),
            catalog.tier("pro").unwrap(),
            None,
        );
        TransactionStore::store(&store, TransactionRecord::pending(&plan, "pi_persisted"))
            .await
            .unwrap();
    }

    let mut cmd = Command::new(cargo_bin!("estate-pay"));
    cmd.args(["export", "--user", "user-1", "--db-path"])
        .arg(&db_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("subscription,pending,15000,ngn,,pi_persisted,Pro Boost - Promoted Listing"));
}
