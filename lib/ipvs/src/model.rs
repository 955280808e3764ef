use std::io::BufRead;

use crate::line::{Entry, entries};
use crate::{Error, Group, ParseError, Protocol, ServerAddress, graph_key};

/// A load balanced service and the backends behind it, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualServer {
    pub protocol: Protocol,
    pub address: ServerAddress,
    pub schedule: String,
    pub real_servers: Vec<RealServer>,
}

impl VirtualServer {
    pub fn graph_key(&self) -> String {
        graph_key(
            self.protocol,
            self.address.ip,
            self.address.port,
            &self.schedule,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RealServer {
    pub address: ServerAddress,
    pub forward: String,
}

/// One `->` entry with its counters.
#[derive(Clone, Debug, PartialEq)]
pub struct RealServerStat {
    pub address: ServerAddress,
    pub forward: String,
    pub weight: f64,
    pub active_conns: f64,
    pub inactive_conns: f64,
}

impl RealServerStat {
    pub fn value(&self, group: Group) -> f64 {
        match group {
            Group::ActiveConns => self.active_conns,
            Group::InactiveConns => self.inactive_conns,
            Group::Weight => self.weight,
        }
    }
}

impl From<RealServerStat> for RealServer {
    fn from(stat: RealServerStat) -> Self {
        Self {
            address: stat.address,
            forward: stat.forward,
        }
    }
}

/// Build the virtual server tree of an `ip_vs` table.
pub fn parse_virtual_servers<R: BufRead>(reader: R) -> Result<Vec<VirtualServer>, Error> {
    entries(reader).try_fold(Vec::new(), |mut servers: Vec<VirtualServer>, entry| {
        let (line, entry) = entry?;

        match entry {
            Entry::VirtualServer(vs) => servers.push(vs),
            Entry::RealServer(stat) => match servers.last_mut() {
                Some(vs) => vs.real_servers.push(stat.into()),
                None => {
                    return Err(Error::Parse {
                        line,
                        err: ParseError::OrphanRealServer,
                    });
                }
            },
            Entry::Skip | Entry::Unrecognized => {}
        }

        Ok(servers)
    })
}
