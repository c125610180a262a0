//! List pods together with the zone of the node they run on

use crate::config::settings::Settings;
use crate::k8s::nodes::{self, ZoneMap};
use crate::k8s::pods::{self, Pod};
use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use tabwriter::TabWriter;

/// Spaces between the widest cell of a column and the next column
const COLUMN_PADDING: usize = 2;

/// Parsed invocation: the arguments for `kubectl get pods` plus the display mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZonesOptions {
    pub kubectl_args: Vec<String>,
    pub all_namespaces: bool,
}

impl ZonesOptions {
    /// Every argument is forwarded; `-A`/`--all-namespaces` also switch on the namespace column
    pub fn from_args(kubectl_args: Vec<String>) -> Self {
        let all_namespaces = kubectl_args
            .iter()
            .fold(false, |enabled, arg| match arg.as_str() {
                "-A" | "--all-namespaces" | "--all-namespaces=true" => true,
                "--all-namespaces=false" => false,
                _ => enabled,
            });

        Self {
            kubectl_args,
            all_namespaces,
        }
    }
}

/// One output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodZone {
    pub namespace: String,
    pub name: String,
    pub zone: String,
}

/// Attach a zone to every pod and order by namespace, then name
pub fn join_zones(pods: Vec<Pod>, zones: &ZoneMap) -> Vec<PodZone> {
    let mut rows: Vec<PodZone> = pods
        .into_iter()
        .map(|pod| PodZone {
            zone: zones.zone_of(&pod.node_name).to_string(),
            namespace: pod.namespace,
            name: pod.name,
        })
        .collect();

    rows.sort_by(|a, b| a.namespace.cmp(&b.namespace).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Write the aligned table; the namespace column only appears with `all_namespaces`.
///
/// Every cell but the last of a row is padded to its column width, so a row with an
/// empty zone still ends in padding, exactly like kubectl's own tables.
pub fn write_table<W: Write>(rows: &[PodZone], all_namespaces: bool, out: W) -> io::Result<()> {
    let mut tw = TabWriter::new(out).minwidth(0).padding(COLUMN_PADDING);

    if all_namespaces {
        writeln!(tw, "NAMESPACE\tNAME\tZONE")?;
        for row in rows {
            writeln!(tw, "{}\t{}\t{}", row.namespace, row.name, row.zone)?;
        }
    } else {
        writeln!(tw, "NAME\tZONE")?;
        for row in rows {
            writeln!(tw, "{}\t{}", row.name, row.zone)?;
        }
    }

    tw.flush()
}

/// Query pods and nodes, then write the zone table to `out`
pub fn list_zones<W: Write>(
    options: &ZonesOptions,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let pods = pods::list_pods(&options.kubectl_args, &settings.kubectl)
        .context("Failed to list pods")?;
    let nodes = nodes::list_nodes(&settings.kubectl).context("Failed to list nodes")?;

    let zones = ZoneMap::from_nodes(&nodes, &settings.zones);
    if zones.is_empty() {
        crate::log_warn!("No nodes returned, every zone will be empty");
    }
    crate::log_info!(
        "Resolved zones for {} nodes, joining {} pods",
        zones.len(),
        pods.len()
    );

    let rows = join_zones(pods, &zones);
    write_table(&rows, options.all_namespaces, out).context("Failed to write output")?;

    Ok(())
}

/// Entry point used by the binary: renders to a buffered stdout
pub fn run(options: ZonesOptions, settings: &Settings) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    list_zones(&options, settings, &mut out)?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}
