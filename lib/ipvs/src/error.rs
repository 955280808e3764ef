use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Failure to turn a `<hex ip>:<hex port>` token into an address.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("address `{0}` has no port")]
    MissingPort(String),
    #[error("address `{0}` is not valid hex")]
    InvalidHex(String),
    #[error("address `{token}` decodes to {len} bytes, expected 4")]
    AddressLength { token: String, len: usize },
    #[error("invalid port in `{token}`, {err}")]
    InvalidPort { token: String, err: ParseIntError },
}

/// Why a single line of the table was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("virtual server entry must have 3 fields, found {0}")]
    VirtualServerFields(usize),
    #[error("real server entry must have 6 fields, found {0}")]
    RealServerFields(usize),
    #[error("real server entry has no preceding virtual server")]
    OrphanRealServer,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("invalid {field} `{value}`, {err}")]
    Numeric {
        field: &'static str,
        value: String,
        err: ParseFloatError,
    },
}

impl ParseError {
    /// The line does not have the shape of a table entry.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            ParseError::VirtualServerFields(_)
                | ParseError::RealServerFields(_)
                | ParseError::OrphanRealServer
        )
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("read ip_vs failed, {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {err}")]
    Parse { line: usize, err: ParseError },
}
