//! Reshaped snapshots of the external systems the dashboard polls.
//!
//! These are the JSON bodies the infrastructure endpoints serve. Every field
//! already carries display-ready units (GiB, rounded percentages); consumers
//! never see raw wire payloads except where a source is deliberately passed
//! through (`GpuSnapshot`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cluster node with capacity and version info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub name: String,
    pub ip: String,
    pub ready: bool,
    pub cpu_capacity: String,
    pub memory_capacity_gb: f64,
    pub os_image: String,
    pub kubelet_version: String,
}

/// One pod, with restart totals summed across its containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub phase: String,
    pub node: String,
    pub restarts: i64,
    /// True only when every container reports ready.
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePort {
    pub port: Option<i64>,
    /// Target ports may be numeric or named, so the raw JSON is kept.
    pub target: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cluster_ip: String,
    pub ports: Vec<ServicePort>,
}

/// Per-node gauge readings from the metrics backend, percentages rounded to
/// one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub instance: String,
    pub cpu_pct: f64,
    pub memory_pct: f64,
    pub disk_pct: f64,
}

impl NodeMetrics {
    /// Placeholder used when a node has no matching scrape target.
    pub fn zeroed(instance: impl Into<String>) -> Self {
        NodeMetrics {
            instance: instance.into(),
            cpu_pct: 0.0,
            memory_pct: 0.0,
            disk_pct: 0.0,
        }
    }
}

/// GPU exporter payload, passed through untouched apart from the `online`
/// marker. The exporter owns its own schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSnapshot {
    #[serde(default)]
    pub online: bool,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Default for GpuSnapshot {
    fn default() -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("gpus".to_string(), serde_json::Value::Array(Vec::new()));
        payload.insert("gpu_count".to_string(), serde_json::Value::from(0));
        GpuSnapshot {
            online: false,
            payload,
        }
    }
}

/// A model currently loaded on the model server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningModel {
    pub name: String,
    pub size: i64,
    pub size_gb: f64,
    pub vram_gb: f64,
    pub expires_at: String,
}

/// A model available on disk on the model server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableModel {
    pub name: String,
    pub size_gb: f64,
    pub modified_at: String,
    pub family: String,
    pub parameter_size: String,
    pub quantization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelServerStatus {
    pub online: bool,
    pub running: Vec<RunningModel>,
    pub available: Vec<AvailableModel>,
}

/// A statically known physical host. The GPU box additionally carries its
/// live exporter and model-server sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalHost {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelServerStatus>,
}

/// A cluster node joined with its gauge readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    #[serde(flatten)]
    pub node: NodeSummary,
    pub metrics: NodeMetrics,
}

/// The full graph the infrastructure page renders. Sections degrade
/// independently: a probe failure empties its section and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub physical: Vec<PhysicalHost>,
    pub cluster_nodes: Vec<TopologyNode>,
    pub pods: Vec<PodSummary>,
    pub pod_counts: BTreeMap<String, i64>,
}
