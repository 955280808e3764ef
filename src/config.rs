use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Where the agent keeps plugin state, if it tells us.
const WORKDIR_ENV: &str = "MACKEREL_PLUGIN_WORKDIR";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the IPVS connection table.
    pub target: PathBuf,

    /// File the values of the previous run are kept in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempfile: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: default_target(),
            tempfile: None,
        }
    }
}

pub fn default_target() -> PathBuf {
    PathBuf::from("/proc/net/ip_vs")
}

pub fn default_tempfile() -> PathBuf {
    let dir = std::env::var_os(WORKDIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    dir.join("ipvs-plugin")
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|err| Error::ReadConfig {
            path: path.to_path_buf(),
            err,
        })?;

        serde_yaml::from_str(&content).map_err(|err| Error::ParseConfig {
            path: path.to_path_buf(),
            err,
        })
    }

    pub fn tempfile(&self) -> PathBuf {
        self.tempfile.clone().unwrap_or_else(default_tempfile)
    }
}
