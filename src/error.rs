use std::path::PathBuf;

use exitcode::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("read config {path:?} failed, {err}")]
    ReadConfig { path: PathBuf, err: std::io::Error },
    #[error("parse config {path:?} failed, {err}")]
    ParseConfig {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    #[error("open {path:?} failed, {err}")]
    Open { path: PathBuf, err: std::io::Error },
    #[error("parse {path:?} failed, {err}")]
    Parse { path: PathBuf, err: ipvs::Error },

    #[error("encode state failed, {0}")]
    EncodeState(serde_json::Error),
    #[error("write state file {path:?} failed, {err}")]
    WriteState { path: PathBuf, err: std::io::Error },

    #[error("encode graph definitions failed, {0}")]
    EncodeGraphs(serde_json::Error),
    #[error("write output failed, {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::ReadConfig { .. } | Error::ParseConfig { .. } => exitcode::CONFIG,
            Error::Open { .. } | Error::Output(_) => exitcode::IOERR,
            Error::Parse { err, .. } => match err {
                ipvs::Error::Io(_) => exitcode::IOERR,
                ipvs::Error::Parse { .. } => exitcode::DATAERR,
            },
            Error::EncodeState(_) | Error::EncodeGraphs(_) => exitcode::SOFTWARE,
            Error::WriteState { .. } => exitcode::CANTCREAT,
        }
    }
}
