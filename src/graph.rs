use indexmap::IndexMap;
use ipvs::{Group, VirtualServer, graph_name};
use serde::Serialize;

/// Metric name standing for every value reported under a graph.
pub const WILDCARD: &str = "#";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Graph {
    pub label: String,
    pub unit: Unit,
    pub metrics: Vec<GraphMetric>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphMetric {
    pub name: String,
    pub label: String,
    /// Report the per minute delta against the previous run instead of the value.
    #[serde(skip)]
    pub diff: bool,
    pub stacked: bool,
    /// Multiplier applied to reported values, ignored when zero.
    #[serde(skip)]
    pub scale: f64,
}

impl GraphMetric {
    fn wildcard(label: &str) -> Self {
        Self {
            name: WILDCARD.to_string(),
            label: label.to_string(),
            diff: false,
            stacked: false,
            scale: 0.0,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.name == WILDCARD || self.name == "*"
    }
}

/// The graph definition and metric a reported value belongs to, the graph name
/// is everything before the last dot of `key`.
pub fn lookup<'a>(graphs: &'a IndexMap<String, Graph>, key: &str) -> Option<&'a GraphMetric> {
    let (graph, name) = key.rsplit_once('.')?;

    graphs
        .get(graph)?
        .metrics
        .iter()
        .find(|metric| metric.matches(name))
}

fn group_label(group: Group) -> &'static str {
    match group {
        Group::ActiveConns => "IPVS Real Server (ActiveConn)",
        Group::InactiveConns => "IPVS Real Server (InActConn)",
        Group::Weight => "IPVS Real Server (Weight)",
    }
}

/// Three graphs per virtual server, each with one slot filled by every real
/// server at report time. Virtual servers with the same graph key share them.
pub fn generate_graph_definition(servers: &[VirtualServer]) -> IndexMap<String, Graph> {
    let mut graphs = IndexMap::with_capacity(servers.len() * Group::ALL.len());

    for vs in servers {
        let key = vs.graph_key();

        for group in Group::ALL {
            graphs.insert(
                graph_name(&key, group),
                Graph {
                    label: group_label(group).to_string(),
                    unit: Unit::Integer,
                    metrics: vec![GraphMetric::wildcard("Real Server")],
                },
            );
        }
    }

    graphs
}
