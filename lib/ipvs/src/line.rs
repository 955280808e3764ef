//! Classification of single lines of `/proc/net/ip_vs`.
//!
//! ```text
//! IP Virtual Server version 1.2.1 (size=4096)
//! Prot LocalAddress:Port Scheduler Flags
//!   -> RemoteAddress:Port Forward Weight ActiveConn InActConn
//! TCP  C0A80001:0050 wrr
//!   -> C0A80101:0050      Tunnel  10     3          242
//! ```

use std::io::BufRead;

use crate::{Error, ParseError, Protocol, RealServerStat, VirtualServer, decode_address};

const REAL_SERVER_MARKER: &str = "->";

#[derive(Debug, PartialEq)]
pub enum Entry {
    /// Blank lines, the version banner and the table headers.
    Skip,
    VirtualServer(VirtualServer),
    RealServer(RealServerStat),
    Unrecognized,
}

pub fn classify(line: &str) -> Result<Entry, ParseError> {
    let fields = line.split_ascii_whitespace().collect::<Vec<_>>();

    match fields.as_slice() {
        [] => Ok(Entry::Skip),
        ["IP", "Virtual", "Server", ..] => Ok(Entry::Skip),
        ["Prot" | "Port" | "IP", "LocalAddress:Port", ..] => Ok(Entry::Skip),
        [REAL_SERVER_MARKER, "RemoteAddress:Port", ..] => Ok(Entry::Skip),
        [REAL_SERVER_MARKER, ..] => parse_real_server(&fields).map(Entry::RealServer),
        [first, ..] => match first.parse::<Protocol>() {
            Ok(protocol) => parse_virtual_server(protocol, &fields).map(Entry::VirtualServer),
            Err(_) => Ok(Entry::Unrecognized),
        },
    }
}

// <Protocol> <hex ip>:<hex port> <schedule>
fn parse_virtual_server(protocol: Protocol, fields: &[&str]) -> Result<VirtualServer, ParseError> {
    let [_, address, schedule] = fields else {
        return Err(ParseError::VirtualServerFields(fields.len()));
    };

    Ok(VirtualServer {
        protocol,
        address: decode_address(address)?,
        schedule: schedule.to_string(),
        real_servers: vec![],
    })
}

// -> <hex ip>:<hex port> <forward> <weight> <active conns> <inactive conns>
fn parse_real_server(fields: &[&str]) -> Result<RealServerStat, ParseError> {
    let [_, address, forward, weight, active, inactive] = fields else {
        return Err(ParseError::RealServerFields(fields.len()));
    };

    Ok(RealServerStat {
        address: decode_address(address)?,
        forward: forward.to_string(),
        weight: parse_value("weight", weight)?,
        active_conns: parse_value("active conns", active)?,
        inactive_conns: parse_value("inactive conns", inactive)?,
    })
}

fn parse_value(field: &'static str, value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|err| ParseError::Numeric {
        field,
        value: value.to_string(),
        err,
    })
}

/// Classified lines, numbered from 1.
///
/// Lines are not required to be UTF-8, invalid bytes are replaced before
/// classification.
pub(crate) fn entries<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, Entry), Error>> {
    reader.split(b'\n').enumerate().map(|(index, line)| {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let number = index + 1;

        classify(&String::from_utf8_lossy(&line))
            .map(|entry| (number, entry))
            .map_err(|err| Error::Parse { line: number, err })
    })
}
