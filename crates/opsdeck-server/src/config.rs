//! Server configuration: one TOML file, environment overrides on top.
//!
//! A missing config file is not an error; every field has a deployable
//! default. Sections mirror the probe config structs so the file reads the
//! same as the wiring.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use opsdeck_probes::{ClusterConfig, GpuExporterConfig, MetricsConfig, ModelServerConfig, ProbeSet};
use opsdeck_store::{Store, StoreCatalog};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
    /// Directory the producer services drop their store files into.
    pub data_dir: PathBuf,
    /// Store filename overrides, keyed by store name.
    pub stores: BTreeMap<String, String>,
    pub cluster: ClusterSection,
    pub metrics: MetricsSection,
    pub models: ModelsSection,
    pub gpu: GpuSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:5000".to_string(),
            data_dir: PathBuf::from("/app/data"),
            stores: BTreeMap::new(),
            cluster: ClusterSection::default(),
            metrics: MetricsSection::default(),
            models: ModelsSection::default(),
            gpu: GpuSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterSection {
    pub api_url: String,
    pub token_path: PathBuf,
    pub ca_path: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ClusterSection {
    fn default() -> Self {
        let base = ClusterConfig::default();
        ClusterSection {
            api_url: base.api_url,
            token_path: base.token_path,
            ca_path: base.ca_path,
            timeout_secs: base.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        let base = MetricsConfig::default();
        MetricsSection {
            url: base.base_url,
            timeout_secs: base.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsSection {
    pub url: String,
    pub timeout_secs: u64,
    pub health_timeout_secs: u64,
}

impl Default for ModelsSection {
    fn default() -> Self {
        let base = ModelServerConfig::default();
        ModelsSection {
            url: base.base_url,
            timeout_secs: base.timeout.as_secs(),
            health_timeout_secs: base.health_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GpuSection {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for GpuSection {
    fn default() -> Self {
        let base = GpuExporterConfig::default();
        GpuSection {
            url: base.base_url,
            timeout_secs: base.timeout.as_secs(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Environment overrides, applied after the file.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("OPSDECK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(bind) = std::env::var("OPSDECK_BIND") {
            self.bind = bind;
        }
    }

    /// The store catalog this config describes. Overrides naming a store
    /// that doesn't exist are skipped with a warning rather than refusing
    /// to boot.
    pub fn catalog(&self) -> StoreCatalog {
        let mut catalog = StoreCatalog::new(&self.data_dir);
        for (name, filename) in &self.stores {
            match Store::from_name(name) {
                Some(store) => catalog = catalog.with_filename(store, filename.clone()),
                None => warn!(store = %name, "config overrides an unknown store"),
            }
        }
        catalog
    }

    pub fn probes(&self) -> ProbeSet {
        ProbeSet::new(
            ClusterConfig {
                api_url: self.cluster.api_url.clone(),
                token_path: self.cluster.token_path.clone(),
                ca_path: self.cluster.ca_path.clone(),
                timeout: Duration::from_secs(self.cluster.timeout_secs),
            },
            MetricsConfig {
                base_url: self.metrics.url.clone(),
                timeout: Duration::from_secs(self.metrics.timeout_secs),
            },
            ModelServerConfig {
                base_url: self.models.url.clone(),
                timeout: Duration::from_secs(self.models.timeout_secs),
                health_timeout: Duration::from_secs(self.models.health_timeout_secs),
            },
            GpuExporterConfig {
                base_url: self.gpu.url.clone(),
                timeout: Duration::from_secs(self.gpu.timeout_secs),
            },
        )
    }
}
