#![allow(clippy::unwrap_used, clippy::expect_used)]

use stallmap_store::seed::{import_seed, import_seed_str};
use stallmap_store::StallRepo;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_import_sample_fixture() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let result = import_seed(&fixture("sample_stalls.yaml"), &mut repo).unwrap();

    assert_eq!(result.stall_ids.len(), 3);
    assert_eq!(result.digest.len(), 64);

    let stalls = repo.get_all_stalls().unwrap();
    assert_eq!(stalls[0].name, "たこ焼き屋台");
    assert_eq!(stalls[1].products.len(), 3);
    assert_eq!(stalls[2].description, None);
}

#[test]
fn test_import_digest_is_reproducible() {
    let mut first = StallRepo::open_in_memory().unwrap();
    let mut second = StallRepo::open_in_memory().unwrap();

    let a = import_seed(&fixture("sample_stalls.yaml"), &mut first).unwrap();
    let b = import_seed(&fixture("sample_stalls.yaml"), &mut second).unwrap();
    assert_eq!(a.digest, b.digest);
}

#[test]
fn test_invalid_seed_writes_nothing() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let yaml = r#"
schema_version: 0
stalls:
  - name: Good
    latitude: 39.7
    longitude: 141.1
    products:
      - { name: Tea, price: 100 }
  - name: Empty
    latitude: 39.7
    longitude: 141.1
    products: []
"#;

    let err = import_seed_str(yaml, &mut repo).unwrap_err();
    assert!(err.is_validation());
    assert!(err.message().contains("stalls[1] (Empty)"));
    assert_eq!(repo.count_stalls().unwrap(), 0);
}

#[test]
fn test_missing_seed_file_is_io_error() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let err = import_seed(&fixture("does_not_exist.yaml"), &mut repo).unwrap_err();
    assert_eq!(err.code(), "ERR_IO");
}
