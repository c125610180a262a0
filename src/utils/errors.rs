//! Error types for kubectl invocations and their JSON payloads

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures while querying the cluster through kubectl
#[derive(Error, Debug)]
pub enum ZonesError {
    #[error("Required tool '{program}' not found")]
    KubectlNotFound { program: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("kubectl command failed ({status}): {args}\n{stderr}")]
    Kubectl {
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("kubectl output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse {resource} list: {source}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ZonesError {
    /// Hints shown when verbose logging is enabled
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ZonesError::KubectlNotFound { program } => vec![
                format!("Install {} from: https://kubernetes.io/docs/tasks/tools/", program),
                "Set KUBECTL_ZONES_KUBECTL to the kubectl binary to use".to_string(),
            ],
            ZonesError::Kubectl { stderr, .. } => {
                let stderr = stderr.to_lowercase();
                if stderr.contains("connection refused") || stderr.contains("timeout") {
                    vec![
                        "Check if the cluster is reachable".to_string(),
                        "Verify the current context: kubectl config current-context".to_string(),
                    ]
                } else if stderr.contains("unauthorized") || stderr.contains("forbidden") {
                    vec!["Verify you are allowed to list pods and nodes".to_string()]
                } else {
                    Vec::new()
                }
            }
            ZonesError::Parse { .. } => {
                vec!["Check that the forwarded flags do not override the output format".to_string()]
            }
            ZonesError::Spawn { .. } | ZonesError::Utf8(_) => Vec::new(),
        }
    }
}

/// Write the error to stderr and exit with status 1
pub fn display_error_and_exit(err: anyhow::Error) -> ! {
    eprintln!("{:#}", err);

    if let Some(zones_err) = err.downcast_ref::<ZonesError>() {
        for suggestion in zones_err.suggestions() {
            crate::log_info!("hint: {}", suggestion);
        }
    }

    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_suggestions() {
        let err = ZonesError::KubectlNotFound {
            program: "kubectl".to_string(),
        };
        assert_eq!(err.to_string(), "Required tool 'kubectl' not found");
        assert_eq!(err.suggestions().len(), 2);
    }

    #[test]
    fn test_parse_error_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ZonesError::Parse {
            resource: "pod",
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse pod list"));
        assert_eq!(err.suggestions().len(), 1);
    }
}
