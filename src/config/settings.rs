//! Configuration file support for kubectl-zones

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides `kubectl.program`
pub const KUBECTL_ENV: &str = "KUBECTL_ZONES_KUBECTL";

/// Project config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".kubectl-zones.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub kubectl: KubectlSettings,

    #[serde(default)]
    pub zones: ZoneSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How kubectl is invoked
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KubectlSettings {
    #[serde(default = "default_program")]
    pub program: String,

    /// Exported as KUBECONFIG to kubectl when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
}

/// Node label keys consulted for the zone
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ZoneSettings {
    #[serde(default = "default_zone_label")]
    pub label: String,

    #[serde(default = "default_legacy_zone_label")]
    pub legacy_label: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_program() -> String {
    "kubectl".to_string()
}

fn default_zone_label() -> String {
    "topology.kubernetes.io/zone".to_string()
}

fn default_legacy_zone_label() -> String {
    "failure-domain.beta.kubernetes.io/zone".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for KubectlSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            kubeconfig: None,
        }
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            label: default_zone_label(),
            legacy_label: default_legacy_zone_label(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the config files, or defaults when there are none.
    /// Environment overrides are applied in both cases.
    pub fn load() -> Result<Self> {
        Self::load_from(
            Path::new("."),
            dirs::config_dir().as_deref(),
            |key| std::env::var(key).ok(),
        )
    }

    /// Load settings, looking for the project file in `local_dir` and the user file
    /// under `config_dir`.
    ///
    /// Priority:
    /// 1. .kubectl-zones.toml in `local_dir`
    /// 2. `config_dir`/kubectl-zones/config.toml
    ///
    /// The `[kubectl]` section is only read from the user file and the environment,
    /// never from the file in `local_dir`.
    pub fn load_from<F>(local_dir: &Path, config_dir: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = config_dir
            .map(|dir| dir.join("kubectl-zones").join("config.toml"))
            .filter(|path| path.exists())
            .map(|path| Self::load_from_file(&path))
            .transpose()?;

        let local_path = local_dir.join(LOCAL_CONFIG_FILE);
        let mut settings = if local_path.exists() {
            let mut local = Self::load_from_file(&local_path)?;
            local.kubectl = user.map(|user| user.kubectl).unwrap_or_default();
            local
        } else {
            user.unwrap_or_default()
        };

        settings.apply_overrides(lookup);
        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(program) = lookup(KUBECTL_ENV).filter(|p| !p.is_empty()) {
            self.kubectl.program = program;
        }
    }
}
