use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Longest gap between two runs a delta is still computed for, in seconds.
const MAX_ELAPSED: i64 = 600;

/// Values reported by the previous run, kept in the tempfile.
#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct State {
    pub timestamp: i64,
    pub values: BTreeMap<String, f64>,
}

impl State {
    /// A missing or unreadable state file is the same as a first run.
    pub fn load(path: &Path) -> Option<State> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(message = "state file not found", ?path);
                return None;
            }
            Err(err) => {
                warn!(message = "read state file failed", ?path, %err);
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(message = "decode state file failed", ?path, %err);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let data = serde_json::to_vec(self).map_err(Error::EncodeState)?;

        // readers never see a partially written file
        let tmp = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&tmp, data)
            .and_then(|_| std::fs::rename(&tmp, path))
            .map_err(|err| Error::WriteState {
                path: path.to_path_buf(),
                err,
            })
    }

    /// Per minute delta of `key` since this state was saved.
    pub fn rate(&self, key: &str, value: f64, now: i64) -> Option<f64> {
        let elapsed = now.checked_sub(self.timestamp)?;
        if elapsed <= 0 || elapsed > MAX_ELAPSED {
            return None;
        }

        let delta = value - self.values.get(key)?;
        if delta < 0.0 {
            // counter reset
            return None;
        }

        Some(delta * 60.0 / elapsed as f64)
    }
}
