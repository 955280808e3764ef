use std::collections::BTreeMap;
use std::io::BufRead;

use crate::line::{Entry, entries};
use crate::{Error, Group, ParseError, metric_key};

/// Flat values keyed by dotted metric name.
pub type Metrics = BTreeMap<String, f64>;

/// Flatten an `ip_vs` table into one weight, active and inactive connection
/// value per real server. When a key shows up twice, e.g. a virtual server
/// listed twice, the later value wins.
pub fn parse_metrics<R: BufRead>(reader: R) -> Result<Metrics, Error> {
    let (_, metrics) = entries(reader).try_fold(
        (None::<String>, Metrics::new()),
        |(graph_key, mut metrics), entry| {
            let (line, entry) = entry?;

            let graph_key = match entry {
                Entry::VirtualServer(vs) => Some(vs.graph_key()),
                Entry::RealServer(stat) => {
                    let Some(graph_key) = graph_key else {
                        return Err(Error::Parse {
                            line,
                            err: ParseError::OrphanRealServer,
                        });
                    };

                    for group in Group::ALL {
                        metrics.insert(
                            metric_key(&graph_key, group, &stat.address),
                            stat.value(group),
                        );
                    }

                    Some(graph_key)
                }
                Entry::Skip | Entry::Unrecognized => graph_key,
            };

            Ok((graph_key, metrics))
        },
    )?;

    Ok(metrics)
}
