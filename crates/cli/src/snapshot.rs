//! JSON snapshots of a simulation session.
//!
//! A snapshot is what an external renderer reads each frame: the parameter
//! set, the raw grid sample arrays (for quiver display), and the particle
//! positions. Written here once at the end of a run.

use crate::error::CliError;
use flowfield_core::SimulationSession;
use glam::DVec3;
use serde_json::{json, Value};
use std::path::Path;

fn vec3_json(v: DVec3) -> Value {
    json!([v.x, v.y, v.z])
}

/// Builds the snapshot JSON for `session`.
pub fn session_snapshot(session: &SimulationSession) -> Value {
    let grid = session.grid();
    json!({
        "params": session.params().to_json(),
        "grid": {
            "grid_size": grid.grid_size(),
            "positions": grid.positions().iter().map(|p| vec3_json(*p)).collect::<Vec<_>>(),
            "velocities": grid.velocities().iter().map(|v| vec3_json(*v)).collect::<Vec<_>>(),
        },
        "particles": session
            .particles()
            .positions()
            .iter()
            .map(|p| vec3_json(*p))
            .collect::<Vec<_>>(),
    })
}

/// Writes the session snapshot as pretty-printed JSON to `path`.
pub fn write_snapshot(session: &SimulationSession, path: &Path) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(&session_snapshot(session))?;
    std::fs::write(path, text).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))
}
