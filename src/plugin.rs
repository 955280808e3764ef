use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use indexmap::IndexMap;
use ipvs::Metrics;
use serde::Serialize;

use crate::Error;
use crate::graph::{Graph, generate_graph_definition, lookup};
use crate::state::State;

/// When this is set and not empty, the agent asks for graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

const META_HEADER: &str = "# mackerel-agent-plugin";

pub trait Plugin {
    fn fetch_metrics(&self) -> Result<Metrics, Error>;

    fn graph_definition(&self) -> Result<IndexMap<String, Graph>, Error>;
}

/// Reads the IPVS connection table, once per call.
pub struct IpvsPlugin {
    target: PathBuf,
}

impl IpvsPlugin {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }

    fn open(&self) -> Result<BufReader<File>, Error> {
        let file = File::open(&self.target).map_err(|err| Error::Open {
            path: self.target.clone(),
            err,
        })?;

        Ok(BufReader::new(file))
    }

    fn parse_error(&self, err: ipvs::Error) -> Error {
        Error::Parse {
            path: self.target.clone(),
            err,
        }
    }
}

impl Plugin for IpvsPlugin {
    fn fetch_metrics(&self) -> Result<Metrics, Error> {
        let reader = self.open()?;
        ipvs::parse_metrics(reader).map_err(|err| self.parse_error(err))
    }

    fn graph_definition(&self) -> Result<IndexMap<String, Graph>, Error> {
        let reader = self.open()?;
        let servers = ipvs::parse_virtual_servers(reader).map_err(|err| self.parse_error(err))?;

        debug!(
            message = "parsed virtual servers",
            path = ?self.target,
            count = servers.len()
        );

        Ok(generate_graph_definition(&servers))
    }
}

#[derive(Serialize)]
struct Meta<'a> {
    graphs: &'a IndexMap<String, Graph>,
}

/// Runs a plugin once and writes what the agent asked for.
pub struct Helper<P> {
    plugin: P,
    tempfile: PathBuf,
}

impl<P: Plugin> Helper<P> {
    pub fn new(plugin: P, tempfile: PathBuf) -> Self {
        Self { plugin, tempfile }
    }

    pub fn run<W: Write>(&self, meta: bool, output: &mut W) -> Result<(), Error> {
        if meta {
            self.output_definitions(output)
        } else {
            self.output_values(chrono::Utc::now().timestamp(), output)
        }
    }

    pub fn output_definitions<W: Write>(&self, output: &mut W) -> Result<(), Error> {
        let graphs = self.plugin.graph_definition()?;
        let json = serde_json::to_string(&Meta { graphs: &graphs }).map_err(Error::EncodeGraphs)?;

        writeln!(output, "{META_HEADER}\n{json}")?;
        Ok(())
    }

    /// One `key\tvalue\ttimestamp` line per value. Nothing is written when
    /// collecting fails.
    pub fn output_values<W: Write>(&self, now: i64, output: &mut W) -> Result<(), Error> {
        let graphs = self.plugin.graph_definition()?;
        let metrics = self.plugin.fetch_metrics()?;
        let last = State::load(&self.tempfile);

        let mut buf = String::new();
        for (key, value) in &metrics {
            let metric = lookup(&graphs, key);

            let mut value = *value;
            if let Some(metric) = metric {
                if metric.diff {
                    let Some(rate) = last.as_ref().and_then(|last| last.rate(key, value, now))
                    else {
                        debug!(message = "no previous value to diff against", key);
                        continue;
                    };

                    value = rate;
                }

                if metric.scale != 0.0 {
                    value *= metric.scale;
                }
            }

            // writing to a String never fails
            let _ = writeln!(buf, "{key}\t{value:.6}\t{now}");
        }

        State {
            timestamp: now,
            values: metrics,
        }
        .save(&self.tempfile)?;

        output.write_all(buf.as_bytes())?;
        Ok(())
    }
}
