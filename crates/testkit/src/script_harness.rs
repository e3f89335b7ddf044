//! Step-by-step harness for scripted session tests.
//!
//! A scripted run applies a fixed list of steps to some state and snapshots
//! selected state before the first step and after every step. The resulting
//! report can be compared in memory or against a golden JSON file.

use crate::snapshot::{check_json_snapshot, SnapshotMode};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Single snapshot frame captured after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptFrame<S> {
    /// Number of steps applied so far.
    pub step: usize,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Every frame of a scripted run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptReport<S> {
    /// Human-readable run name.
    pub name: String,
    /// `steps.len() + 1` frames; frame 0 is the initial state.
    pub frames: Vec<ScriptFrame<S>>,
}

impl<S> ScriptReport<S> {
    /// Snapshot after the last step.
    pub fn last(&self) -> Option<&S> {
        self.frames.last().map(|frame| &frame.snapshot)
    }
}

/// Apply `steps` in order and collect a snapshot around each one.
pub fn record_script<State, Step, Snapshot, ApplyFn, SnapFn>(
    name: impl Into<String>,
    state: &mut State,
    steps: &[Step],
    mut apply: ApplyFn,
    mut snapshot: SnapFn,
) -> ScriptReport<Snapshot>
where
    ApplyFn: FnMut(&mut State, &Step),
    SnapFn: FnMut(&State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(steps.len() + 1);
    frames.push(ScriptFrame {
        step: 0,
        snapshot: snapshot(state),
    });
    for (i, step) in steps.iter().enumerate() {
        apply(state, step);
        frames.push(ScriptFrame {
            step: i + 1,
            snapshot: snapshot(state),
        });
    }
    ScriptReport {
        name: name.into(),
        frames,
    }
}

/// Check a report against (or write it to) the golden file at `path`.
pub fn check_script_snapshot<S: Serialize, P: AsRef<Path>>(
    path: P,
    report: &ScriptReport<S>,
    mode: SnapshotMode,
) -> Result<()> {
    check_json_snapshot(path, report, mode)
}
