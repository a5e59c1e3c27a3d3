//! Snapshots of a world in play

use wayfarer_runtime::{Repl, Session, demo, serialize};

use crate::repl::ScriptedEditor;
use wayfarer_storage::{ItemLocation, LockState};

#[test]
fn a_played_world_survives_a_round_trip() {
    let demo = demo::build_world().unwrap();
    let mut session = Session::with_world(demo.world.clone());
    session.play_as(demo.alice).unwrap();
    session.submit(demo.alice, "open east").unwrap();
    session.submit(demo.alice, "drop key").unwrap();

    let restored = serialize::from_bytes(&serialize::to_bytes(session.world()).unwrap()).unwrap();

    assert_eq!(
        restored
            .door_between(demo.gatehouse, demo.armory)
            .unwrap()
            .unwrap()
            .state,
        LockState::Open
    );
    assert_eq!(
        restored.item_location(demo.key).unwrap(),
        &ItemLocation::Room(demo.gatehouse)
    );
    assert!(restored.is_connected(demo.alice));
}

#[test]
fn loading_keeps_the_active_character_only_if_connected() {
    let demo = demo::build_world().unwrap();
    let path = std::env::temp_dir().join("wayfarer_integration_snapshot.msgpack");
    serialize::save_to_file(&demo.world, &path).unwrap();

    let mut session = Session::with_world(demo.world.clone());
    session.play_as(demo.bob).unwrap();
    session.replace_world(serialize::load_from_file(&path).unwrap());

    assert_eq!(session.actor(), None);
    assert!(!session.mailbox().is_open(demo.bob));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_and_load_from_the_repl() {
    let demo = demo::build_world().unwrap();
    let path = std::env::temp_dir().join("wayfarer_integration_repl.msgpack");
    let mut repl = Repl::with_editor(ScriptedEditor::default())
        .with_session(Session::with_world(demo.world.clone()));

    let save = format!(":save {}", path.display());
    let load = format!(":load {}", path.display());
    let output = repl
        .eval_script(&format!(":as alice\nopen east\n{save}\nclose east\n{load}\n"))
        .unwrap();

    assert!(output.contains(&format!("Loaded {}.", path.display())));
    assert_eq!(
        repl.session()
            .world()
            .door_between(demo.gatehouse, demo.armory)
            .unwrap()
            .unwrap()
            .state,
        LockState::Open
    );
    assert_eq!(repl.session().actor(), Some(demo.alice));

    let _ = std::fs::remove_file(&path);
}
