//! Pod listing

use crate::config::settings::KubectlSettings;
use crate::k8s::kubectl;
use crate::utils::errors::ZonesError;
use serde::Deserialize;
use std::collections::HashMap;

/// A pod as far as zone placement is concerned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    /// Empty while the pod is unscheduled
    pub node_name: String,
    pub labels: HashMap<String, String>,
}

#[derive(Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<PodItem>,
}

#[derive(Deserialize)]
struct PodItem {
    #[serde(default)]
    metadata: PodMetadata,
    #[serde(default)]
    spec: PodSpec,
}

#[derive(Deserialize, Default)]
struct PodMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    labels: Option<HashMap<String, String>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PodSpec {
    #[serde(default)]
    node_name: Option<String>,
}

impl From<PodItem> for Pod {
    fn from(item: PodItem) -> Self {
        Self {
            name: item.metadata.name,
            namespace: item.metadata.namespace,
            node_name: item.spec.node_name.unwrap_or_default(),
            labels: item.metadata.labels.unwrap_or_default(),
        }
    }
}

/// Parse the output of `kubectl get pods -o json`
pub fn parse_pods(json: &str) -> Result<Vec<Pod>, ZonesError> {
    let list: PodList =
        serde_json::from_str(json).map_err(|source| ZonesError::Parse { resource: "pod", source })?;
    Ok(list.items.into_iter().map(Pod::from).collect())
}

/// List pods, forwarding `args` verbatim after `get pods`
pub fn list_pods<S: AsRef<str>>(
    args: &[S],
    kubectl: &KubectlSettings,
) -> Result<Vec<Pod>, ZonesError> {
    let json = kubectl::get_json("pods", args, kubectl)?;
    let pods = parse_pods(&json)?;
    tracing::debug!("Listed {} pods", pods.len());
    Ok(pods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pod_list() {
        let json = r#"{
            "apiVersion": "v1",
            "kind": "List",
            "items": [
                {
                    "metadata": {
                        "name": "web-1",
                        "namespace": "default",
                        "labels": {"app": "web"}
                    },
                    "spec": {"nodeName": "n1", "containers": []},
                    "status": {"phase": "Running"}
                },
                {
                    "metadata": {"name": "pending-1", "namespace": "default", "labels": null},
                    "spec": {}
                }
            ]
        }"#;

        let pods = parse_pods(json).unwrap();
        assert_eq!(pods.len(), 2);
        assert_eq!(pods[0].name, "web-1");
        assert_eq!(pods[0].namespace, "default");
        assert_eq!(pods[0].node_name, "n1");
        assert_eq!(pods[0].labels.get("app").map(String::as_str), Some("web"));
        assert_eq!(pods[1].node_name, "");
        assert!(pods[1].labels.is_empty());
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_pods(r#"{"items": []}"#).unwrap().is_empty());
        assert!(parse_pods("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_pods(r#"{"items": {"name": "x"}}"#).unwrap_err();
        assert!(matches!(err, ZonesError::Parse { resource: "pod", .. }));

        assert!(parse_pods("NAME READY STATUS").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_pods_forwards_args() {
        let fake = crate::k8s::kubectl::testing::FakeKubectl::new(
            r#"{"items":[{"metadata":{"name":"a","namespace":"x"},"spec":{"nodeName":"n1"}}]}"#,
            r#"{"items":[]}"#,
        );

        let pods = list_pods(&["-A", "-l", "app=web"], &fake.settings).unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(fake.calls(), vec!["get pods -A -l app=web -o json"]);
    }
}
