use estate_pay::domain::ports::PropertyStore;
use estate_pay::infrastructure::in_memory::InMemoryPropertyStore;
use estate_pay::startup::seed_properties;
use rust_decimal_macros::dec;
use std::path::Path;

#[tokio::test]
async fn test_seed_skips_malformed_rows() {
    let store = InMemoryPropertyStore::new();
    let loaded = seed_properties(&store, Path::new("tests/fixtures/properties.csv"))
        .await
        .unwrap();

    // The row with a non-numeric price is skipped.
    assert_eq!(loaded, 3);
    assert!(store.get("prop-bad").await.unwrap().is_none());

    let lekki = store.get("prop-lekki").await.unwrap().unwrap();
    assert_eq!(lekki.price, dec!(120000000));
    assert_eq!(lekki.images.len(), 2);

    let gra = store.get("prop-gra").await.unwrap().unwrap();
    assert_eq!(gra.city, "Port Harcourt");
    assert!(gra.images.is_empty());
}

#[tokio::test]
async fn test_seed_missing_file() {
    let store = InMemoryPropertyStore::new();
    assert!(
        seed_properties(&store, Path::new("tests/fixtures/nope.csv"))
            .await
            .is_err()
    );
}
