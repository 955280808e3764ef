use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::ServerAddress;
use crate::address::dotted_to_underscore;

/// Every metric and graph name starts with this.
pub const KEY_PREFIX: &str = "proc.net.ip_vs";

/// Protocols the kernel prints in front of a virtual server entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
    Am,
    Esp,
}

impl Protocol {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Sctp => "SCTP",
            Protocol::Am => "AM",
            Protocol::Esp => "ESP",
        }
    }
}

impl FromStr for Protocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            "SCTP" => Ok(Protocol::Sctp),
            "AM" => Ok(Protocol::Am),
            "ESP" => Ok(Protocol::Esp),
            _ => Err(()),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three per real server values, each one graph per virtual server.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Group {
    ActiveConns,
    InactiveConns,
    Weight,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::ActiveConns, Group::InactiveConns, Group::Weight];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Group::ActiveConns => "active_conns",
            Group::InactiveConns => "inactive_conns",
            Group::Weight => "weight",
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace shared by the values of one virtual server and its graphs, e.g.
/// `proc.net.ip_vs.192_168_0_1_80_TCP_wrr`.
pub fn graph_key(protocol: Protocol, ip: Ipv4Addr, port: u64, schedule: &str) -> String {
    format!(
        "{KEY_PREFIX}.{}_{port}_{protocol}_{schedule}",
        dotted_to_underscore(ip)
    )
}

/// Name of one graph of a virtual server, e.g. `<graph key>.active_conns`.
pub fn graph_name(graph_key: &str, group: Group) -> String {
    format!("{graph_key}.{group}")
}

/// Name of one reported value, e.g. `<graph key>.weight.192_168_1_1_80`.
pub fn metric_key(graph_key: &str, group: Group, real_server: &ServerAddress) -> String {
    format!("{graph_key}.{group}.{}", real_server.key())
}
