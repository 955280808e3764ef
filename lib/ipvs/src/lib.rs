//! Parser of the IPVS connection table the kernel exposes at `/proc/net/ip_vs`.
//!
//! The same line classification feeds two views, a tree of virtual servers
//! (for graph definitions) and a flat map of dotted metric names (for values).
//! Both name things with [`graph_key`], so graphs and values always line up.

mod address;
mod error;
mod key;
mod line;
mod metrics;
mod model;

pub use address::{ServerAddress, decode_address};
pub use error::{DecodeError, Error, ParseError};
pub use key::{Group, KEY_PREFIX, Protocol, graph_key, graph_name, metric_key};
pub use line::{Entry, classify};
pub use metrics::{Metrics, parse_metrics};
pub use model::{RealServer, RealServerStat, VirtualServer, parse_virtual_servers};
