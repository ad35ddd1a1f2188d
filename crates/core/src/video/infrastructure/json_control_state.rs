use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::filtering::domain::control_snapshot::ControlSnapshot;
use crate::filtering::domain::filter_kind::FilterKind;
use crate::video::domain::control_state::ControlState;

/// On-disk shape of the control file. Absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ControlFile {
    filter: Option<String>,
    intensity: Option<i64>,
}

/// Controls read from a JSON file such as `{"filter": "cartoon", "intensity": 40}`.
///
/// The file is re-read only when its modification time changes. A missing
/// or unreadable file keeps the last good snapshot.
pub struct JsonControlState {
    path: PathBuf,
    current: ControlSnapshot,
    seen_modified: Option<SystemTime>,
}

impl JsonControlState {
    pub fn new(path: impl Into<PathBuf>, initial: ControlSnapshot) -> Self {
        Self {
            path: path.into(),
            current: initial,
            seen_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reload(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let text = fs::read_to_string(&self.path)?;
        let file: ControlFile = serde_json::from_str(&text)?;
        let filter = file
            .filter
            .as_deref()
            .map(FilterKind::from_name)
            .unwrap_or(self.current.filter);
        let intensity = file
            .intensity
            .unwrap_or(self.current.intensity as i64);
        let next = ControlSnapshot::new(filter, intensity);
        if next != self.current {
            log::info!(
                "Controls changed: filter={} intensity={}",
                next.filter,
                next.intensity
            );
        }
        self.current = next;
        Ok(())
    }
}

impl ControlState for JsonControlState {
    fn get(&mut self) -> ControlSnapshot {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return self.current,
        };
        if self.seen_modified != Some(modified) {
            self.seen_modified = Some(modified);
            if let Err(e) = self.reload() {
                log::warn!(
                    "Ignoring control file {}: {e}",
                    self.path.display()
                );
            }
        }
        self.current
    }
}
