use blockcraft_core::{Coordinate, Material};
use blockcraft_testkit::{check_script_snapshot, record_script, SnapshotMode};
use blockcraft_world::{BuilderSession, Command, MemoryStore, SessionOptions};
use serde::Serialize;
use std::path::PathBuf;

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Snap {
    blocks: Vec<String>,
    ghost: String,
    material: &'static str,
    undo: usize,
    redo: usize,
}

fn snap(session: &BuilderSession<MemoryStore>) -> Snap {
    Snap {
        blocks: session
            .blocks()
            .map(|b| format!("{} {}", b.coordinate, b.material))
            .collect(),
        ghost: session.ghost().to_string(),
        material: session.material().as_str(),
        undo: session.history().undo_entries().len(),
        redo: session.history().redo_entries().len(),
    }
}

fn steps() -> Vec<Command> {
    let at = |x, y, z| Some(Coordinate::new(x, y, z));
    vec![
        Command::Place {
            target: at(0, 0, 0),
            material: None,
        },
        Command::Place {
            target: at(0, 0, 0),
            material: None,
        },
        Command::SetMaterial(Material::Glass),
        Command::Place {
            target: at(0, 0, 1),
            material: None,
        },
        Command::Undo,
        Command::Remove { target: at(1, 0, 0) },
    ]
}

fn run() -> blockcraft_testkit::ScriptReport<Snap> {
    let mut session = BuilderSession::new(SessionOptions::default(), MemoryStore::new());
    record_script(
        "scripted_session",
        &mut session,
        &steps(),
        |session, command| {
            session.dispatch(*command);
        },
        snap,
    )
}

#[test]
fn scripted_session_snapshot() {
    let report = run();
    check_script_snapshot(
        snapshot_path("scripted_session.json"),
        &report,
        SnapshotMode::from_env(),
    )
    .expect("snapshot should match");
}

#[test]
fn scripted_session_is_deterministic() {
    assert_eq!(run(), run());
}
