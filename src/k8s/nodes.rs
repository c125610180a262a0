//! Node listing and zone resolution

use crate::config::settings::{KubectlSettings, ZoneSettings};
use crate::k8s::kubectl;
use crate::utils::errors::ZonesError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub labels: HashMap<String, String>,
}

#[derive(Deserialize)]
struct NodeList {
    #[serde(default)]
    items: Vec<NodeItem>,
}

#[derive(Deserialize)]
struct NodeItem {
    #[serde(default)]
    metadata: NodeMetadata,
}

#[derive(Deserialize, Default)]
struct NodeMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    labels: Option<HashMap<String, String>>,
}

impl From<NodeItem> for Node {
    fn from(item: NodeItem) -> Self {
        Self {
            name: item.metadata.name,
            labels: item.metadata.labels.unwrap_or_default(),
        }
    }
}

/// Parse the output of `kubectl get nodes -o json`
pub fn parse_nodes(json: &str) -> Result<Vec<Node>, ZonesError> {
    let list: NodeList = serde_json::from_str(json)
        .map_err(|source| ZonesError::Parse { resource: "node", source })?;
    Ok(list.items.into_iter().map(Node::from).collect())
}

/// List every node in the cluster
pub fn list_nodes(kubectl: &KubectlSettings) -> Result<Vec<Node>, ZonesError> {
    let json = kubectl::get_json::<&str>("nodes", &[], kubectl)?;
    let nodes = parse_nodes(&json)?;
    tracing::debug!("Listed {} nodes", nodes.len());
    Ok(nodes)
}

impl Node {
    /// The node's zone: the primary label, then the legacy one, else empty
    pub fn zone(&self, keys: &ZoneSettings) -> String {
        [&keys.label, &keys.legacy_label]
            .into_iter()
            .filter_map(|key| self.labels.get(key))
            .find(|value| !value.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}

/// Node name to zone lookup
#[derive(Debug, Clone, Default)]
pub struct ZoneMap {
    zones: HashMap<String, String>,
}

impl ZoneMap {
    pub fn from_nodes(nodes: &[Node], keys: &ZoneSettings) -> Self {
        let zones = nodes
            .iter()
            .map(|node| (node.name.clone(), node.zone(keys)))
            .collect();
        Self { zones }
    }

    /// Zone of `node_name`; unknown or empty node names resolve to ""
    pub fn zone_of(&self, node_name: &str) -> &str {
        self.zones.get(node_name).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
