#![allow(clippy::unwrap_used, clippy::expect_used)]

use stallmap_core::logging_facility::test_capture::init_test_capture;
use stallmap_core::model::{Coordinate, ProductDraft, StallDraft, StallId, StallUpdate};
use stallmap_core::picker::{spawn_picker, PickOutcome};
use stallmap_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use stallmap_engine::commands::stall::{apply_pick, list_display_stalls};
use stallmap_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use stallmap_store::StallRepo;

fn draft(name: &str) -> StallDraft {
    StallDraft {
        name: name.to_string(),
        latitude: 39.7035,
        longitude: 141.1438,
        description: None,
        products: vec![ProductDraft::new("たこ焼き", 400)],
    }
}

fn register(repo: &mut StallRepo, name: &str) -> StallId {
    match apply_engine_command(
        EngineCommand::RegisterStall { draft: draft(name) },
        repo,
    )
    .unwrap()
    {
        EngineCommandResult::Registered(id) => id,
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_register_emits_start_and_end() {
    let capture = init_test_capture();
    let mut repo = StallRepo::open_in_memory().unwrap();

    let id = register(&mut repo, "Logged Stall");

    assert!(capture
        .events_for_op("register_stall")
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_START)));
    assert!(capture
        .events_for_stall("register_stall", id.get())
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END) && e.duration_ms.is_some()));
}

#[test]
fn test_failed_move_emits_error_event() {
    let capture = init_test_capture();
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = register(&mut repo, "Mover");

    let err = apply_engine_command(
        EngineCommand::MoveStall {
            stall_id: id,
            latitude: 100.0,
            longitude: 141.0,
        },
        &mut repo,
    )
    .unwrap_err();
    assert!(err.is_validation());

    capture.assert_failed("move_stall", "ERR_VALIDATION");
    assert!(capture
        .events_for_stall("move_stall", id.get())
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_END_ERROR)));
}

#[test]
fn test_edit_with_and_without_products() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = register(&mut repo, "Editable");
    let update = StallUpdate {
        name: "Edited".to_string(),
        latitude: 39.7,
        longitude: 141.1,
        description: Some("fresh".to_string()),
    };

    apply_engine_command(
        EngineCommand::EditStall {
            stall_id: id,
            update: update.clone(),
            products: None,
        },
        &mut repo,
    )
    .unwrap();
    assert_eq!(repo.get_stall_by_id(id).unwrap().products.len(), 1);

    apply_engine_command(
        EngineCommand::EditStall {
            stall_id: id,
            update,
            products: Some(vec![
                ProductDraft::new("A", 1),
                ProductDraft::new("B", 2),
            ]),
        },
        &mut repo,
    )
    .unwrap();
    let stall = repo.get_stall_by_id(id).unwrap();
    assert_eq!(stall.name, "Edited");
    assert_eq!(stall.products.len(), 2);
}

#[test]
fn test_remove_and_clear() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = register(&mut repo, "One");
    register(&mut repo, "Two");
    register(&mut repo, "Three");

    let result =
        apply_engine_command(EngineCommand::RemoveStall { stall_id: id }, &mut repo).unwrap();
    assert_eq!(
        result,
        EngineCommandResult::Removed {
            stall_id: id,
            removed: true
        }
    );

    let again =
        apply_engine_command(EngineCommand::RemoveStall { stall_id: id }, &mut repo).unwrap();
    assert_eq!(
        again,
        EngineCommandResult::Removed {
            stall_id: id,
            removed: false
        }
    );

    let cleared = apply_engine_command(EngineCommand::ClearStalls, &mut repo).unwrap();
    assert_eq!(cleared, EngineCommandResult::Cleared { count: 2 });
}

#[test]
fn test_set_products_unknown_stall_is_not_found() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let err = apply_engine_command(
        EngineCommand::SetProducts {
            stall_id: StallId(404),
            products: vec![ProductDraft::new("x", 1)],
        },
        &mut repo,
    )
    .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_picked_coordinate_is_applied_on_caller_thread() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = register(&mut repo, "Picked");

    let handle = spawn_picker(|reply| reply.select(Coordinate::new(39.7040, 141.1450).unwrap()));
    let applied = apply_pick(&mut repo, id, handle.wait()).unwrap();

    assert_eq!(applied.map(|c| c.to_pair()), Some("39.704000,141.145000".to_string()));
    assert_eq!(
        repo.get_stall_by_id(id).unwrap().coordinate.label(),
        "39.704000, 141.145000"
    );
}

#[test]
fn test_cancelled_pick_writes_nothing() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    let id = register(&mut repo, "Unmoved");
    let before = repo.get_stall_by_id(id).unwrap();

    assert_eq!(apply_pick(&mut repo, id, PickOutcome::Cancelled).unwrap(), None);
    assert_eq!(repo.get_stall_by_id(id).unwrap(), before);
}

#[test]
fn test_display_listing_uses_currency_unit() {
    let mut repo = StallRepo::open_in_memory().unwrap();
    register(&mut repo, "たこ焼き屋台");

    let records = list_display_stalls(&repo, "円").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].products_text, "たこ焼き: 400円");
}
