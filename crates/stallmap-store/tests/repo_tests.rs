#![allow(clippy::unwrap_used, clippy::expect_used)]

use stallmap_core::errors::ExErrorKind;
use stallmap_core::model::{ProductDraft, StallDraft, StallId, StallUpdate};
use stallmap_store::StallRepo;

fn takoyaki() -> StallDraft {
    StallDraft {
        name: "たこ焼き屋台".to_string(),
        latitude: 39.7035,
        longitude: 141.1438,
        description: Some("大阪風の本格たこ焼き".to_string()),
        products: vec![
            ProductDraft::new("たこ焼き", 400),
            ProductDraft::new("イカ焼き", 300),
        ],
    }
}

fn product_count(repo: &StallRepo, stall_id: StallId) -> i64 {
    repo.connection()
        .query_row(
            "SELECT COUNT(*) FROM products WHERE stall_id = ?",
            [stall_id.get()],
            |row| row.get(0),
        )
        .unwrap()
}

#[test]
fn test_create_then_get_round_trip() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();

    let stall = repo.get_stall_by_id(id).unwrap();
    assert_eq!(stall.id, id);
    assert_eq!(stall.name, "たこ焼き屋台");
    assert_eq!(stall.latitude(), 39.7035);
    assert_eq!(stall.longitude(), 141.1438);
    assert_eq!(stall.description.as_deref(), Some("大阪風の本格たこ焼き"));
    assert_eq!(stall.product_drafts(), takoyaki().products);
    assert!(stall.products.iter().all(|p| p.stall_id == id));
}

#[test]
fn test_get_all_orders_stalls_and_products_by_insertion() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let first = repo.create_stall(&takoyaki()).unwrap();
    let mut other = takoyaki();
    other.name = "焼きそば本舗".to_string();
    other.products = vec![
        ProductDraft::new("焼きそば", 300),
        ProductDraft::new("ジュース", 150),
    ];
    let second = repo.create_stall(&other).unwrap();

    let stalls = repo.get_all_stalls().unwrap();
    assert_eq!(stalls.iter().map(|s| s.id).collect::<Vec<_>>(), vec![first, second]);
    assert_eq!(stalls[1].products[0].name, "焼きそば");
    assert_eq!(stalls[1].products[1].name, "ジュース");
}

#[test]
fn test_create_rejects_invalid_drafts_without_writing() {
    let mut repo = StallRepo::open_in_memory().unwrap();

    let mut out_of_range = takoyaki();
    out_of_range.latitude = 91.0;
    let err = repo.create_stall(&out_of_range).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(err.field(), Some("latitude"));

    let mut blank = takoyaki();
    blank.name = "   ".to_string();
    assert_eq!(repo.create_stall(&blank).unwrap_err().field(), Some("name"));

    let mut no_products = takoyaki();
    no_products.products.clear();
    assert_eq!(
        repo.create_stall(&no_products).unwrap_err().field(),
        Some("products")
    );

    let mut negative = takoyaki();
    negative.products[1].price = -1;
    assert_eq!(
        repo.create_stall(&negative).unwrap_err().field(),
        Some("products[1]")
    );

    assert_eq!(repo.count_stalls().unwrap(), 0);
}

#[test]
fn test_get_unknown_stall_is_not_found() {
    let repo = StallRepo::open_in_memory().unwrap();
    let err = repo.get_stall_by_id(StallId(42)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.stall_id(), Some(42));
    assert_eq!(repo.find_stall(StallId(42)).unwrap(), None);
}

#[test]
fn test_delete_cascades_to_products() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    assert_eq!(product_count(&repo, id), 2);

    assert!(repo.delete_stall(id).unwrap());

    assert!(!repo.stall_exists(id).unwrap());
    assert_eq!(product_count(&repo, id), 0);
}

#[test]
fn test_delete_unknown_stall_is_noop() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    repo.create_stall(&takoyaki()).unwrap();
    assert!(!repo.delete_stall(StallId(999)).unwrap());
    assert_eq!(repo.count_stalls().unwrap(), 1);
}

#[test]
fn test_delete_all_stalls_clears_products() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    repo.create_stall(&takoyaki()).unwrap();
    repo.create_stall(&takoyaki()).unwrap();

    assert_eq!(repo.delete_all_stalls().unwrap(), 2);
    let remaining: i64 = repo
        .connection()
        .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(repo.delete_all_stalls().unwrap(), 0);
}

#[test]
fn test_update_coordinates_only_moves_stall() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();

    repo.update_stall_coordinates(id, 39.7040, 141.1450).unwrap();

    let stall = repo.get_stall_by_id(id).unwrap();
    assert_eq!(stall.coordinate.label(), "39.704000, 141.145000");
    assert_eq!(stall.name, "たこ焼き屋台");
    assert_eq!(stall.products.len(), 2);
}

#[test]
fn test_failed_coordinate_update_leaves_state_unchanged() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    let before = repo.get_stall_by_id(id).unwrap();

    let err = repo.update_stall_coordinates(id, 95.0, 10.0).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.stall_id(), Some(id.get()));

    assert_eq!(repo.get_stall_by_id(id).unwrap(), before);
}

#[test]
fn test_update_coordinates_unknown_stall() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let err = repo
        .update_stall_coordinates(StallId(7), 39.0, 141.0)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_update_stall_keeps_products() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();

    let update = StallUpdate {
        name: "たこ焼き大将".to_string(),
        latitude: 39.7036,
        longitude: 141.1439,
        description: None,
    };
    repo.update_stall(id, &update).unwrap();

    let stall = repo.get_stall_by_id(id).unwrap();
    assert_eq!(stall.name, "たこ焼き大将");
    assert_eq!(stall.description, None);
    assert_eq!(stall.product_drafts(), takoyaki().products);

    assert!(repo
        .update_stall(StallId(100), &update)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_replace_products_is_idempotent() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    let menu = vec![
        ProductDraft::new("ラムネ", 200),
        ProductDraft::new("たこ焼き", 450),
    ];

    repo.replace_products(id, &menu).unwrap();
    let once = repo.get_stall_by_id(id).unwrap().product_drafts();
    repo.replace_products(id, &menu).unwrap();
    let twice = repo.get_stall_by_id(id).unwrap().product_drafts();

    assert_eq!(once, menu);
    assert_eq!(twice, menu);
    assert_eq!(product_count(&repo, id), 2);
}

#[test]
fn test_replace_products_rejects_invalid_without_writing() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();

    let err = repo
        .replace_products(id, &[ProductDraft::new("ok", 1), ProductDraft::new("", 2)])
        .unwrap_err();
    assert_eq!(err.field(), Some("products[1]"));
    assert_eq!(
        repo.get_stall_by_id(id).unwrap().product_drafts(),
        takoyaki().products
    );

    assert!(repo
        .replace_products(StallId(55), &[ProductDraft::new("x", 1)])
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_replace_with_empty_list_clears_menu() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    repo.replace_products(id, &[]).unwrap();
    assert!(repo.get_stall_by_id(id).unwrap().products.is_empty());
}

#[test]
fn test_full_update_is_atomic() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    let before = repo.get_stall_by_id(id).unwrap();

    let update = StallUpdate {
        name: "Renamed".to_string(),
        latitude: 39.7,
        longitude: 141.1,
        description: None,
    };
    let err = repo
        .update_stall_with_products(id, &update, &[ProductDraft::new("bad", -5)])
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(repo.get_stall_by_id(id).unwrap(), before);

    repo.update_stall_with_products(id, &update, &[ProductDraft::new("Tea", 120)])
        .unwrap();
    let after = repo.get_stall_by_id(id).unwrap();
    assert_eq!(after.name, "Renamed");
    assert_eq!(after.product_drafts(), vec![ProductDraft::new("Tea", 120)]);
}

#[test]
fn test_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stalls.db");

    let id = {
        let mut repo = StallRepo::open(&path).unwrap();
        repo.create_stall(&takoyaki()).unwrap()
    };

    let repo = StallRepo::open(&path).unwrap();
    assert_eq!(repo.get_stall_by_id(id).unwrap().name, "たこ焼き屋台");
}

/// Makes any insert of a product named `boom` abort inside the transaction
fn fail_inserts_of_boom(repo: &StallRepo) {
    repo.connection()
        .execute_batch(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON products
             WHEN NEW.product_name = 'boom'
             BEGIN SELECT RAISE(ABORT, 'disk gone'); END;",
        )
        .unwrap();
}

fn total_products(repo: &StallRepo) -> i64 {
    repo.connection()
        .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_storage_failure_mid_create_leaves_nothing() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    fail_inserts_of_boom(&repo);

    let mut draft = takoyaki();
    draft.products.push(ProductDraft::new("boom", 100));
    let err = repo.create_stall(&draft).unwrap_err();

    assert_eq!(err.code(), "ERR_STORAGE");
    assert!(err.message().contains("disk gone"));
    assert_eq!(repo.count_stalls().unwrap(), 0);
    assert_eq!(total_products(&repo), 0);
}

#[test]
fn test_storage_failure_mid_batch_create_leaves_nothing() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let existing = repo.create_stall(&takoyaki()).unwrap();
    fail_inserts_of_boom(&repo);

    let mut bad = takoyaki();
    bad.products = vec![ProductDraft::new("boom", 1)];
    let err = repo.create_stalls(&[takoyaki(), bad]).unwrap_err();

    assert_eq!(err.code(), "ERR_STORAGE");
    assert_eq!(repo.count_stalls().unwrap(), 1);
    assert_eq!(product_count(&repo, existing), 2);
    assert_eq!(total_products(&repo), 2);
}

#[test]
fn test_storage_failure_mid_replace_keeps_old_menu() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    fail_inserts_of_boom(&repo);

    let err = repo
        .replace_products(
            id,
            &[ProductDraft::new("ラムネ", 150), ProductDraft::new("boom", 1)],
        )
        .unwrap_err();

    assert_eq!(err.code(), "ERR_STORAGE");
    assert_eq!(repo.get_stall_by_id(id).unwrap().product_drafts(), takoyaki().products);
}

#[test]
fn test_storage_failure_mid_full_update_keeps_stall() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = repo.create_stall(&takoyaki()).unwrap();
    let before = repo.get_stall_by_id(id).unwrap();
    fail_inserts_of_boom(&repo);

    let update = StallUpdate {
        name: "Renamed".to_string(),
        latitude: 39.7,
        longitude: 141.1,
        description: None,
    };
    let err = repo
        .update_stall_with_products(id, &update, &[ProductDraft::new("boom", 1)])
        .unwrap_err();

    assert_eq!(err.code(), "ERR_STORAGE");
    assert_eq!(repo.get_stall_by_id(id).unwrap(), before);
    assert_eq!(repo.count_stalls().unwrap(), 1);
}
