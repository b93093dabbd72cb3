//! Instant-query helpers against the metrics backend (Prometheus HTTP API).

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use opsdeck_types::{NodeMetrics, round1};

const NODE_CPU_PROMQL: &str =
    r#"100 - (avg by (instance) (rate(node_cpu_seconds_total{mode="idle"}[5m])) * 100)"#;
const NODE_MEMORY_PROMQL: &str =
    "100 * (1 - node_memory_MemAvailable_bytes / node_memory_MemTotal_bytes)";
const NODE_DISK_PROMQL: &str = r#"100 - (node_filesystem_avail_bytes{mountpoint="/"} / node_filesystem_size_bytes{mountpoint="/"} * 100)"#;
const RUNNING_PODS_PROMQL: &str =
    r#"count by (namespace) (kube_pod_status_phase{phase="Running"})"#;

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            base_url: "http://prometheus-server.monitoring.svc.cluster.local:9090".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Instant-query envelope: `{"status": "...", "data": {"result": [...]}}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Payload,
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    #[serde(default)]
    result: Vec<Sample>,
}

/// One series sample: label set plus `[timestamp, "value"]`.
#[derive(Debug, Deserialize)]
struct Sample {
    #[serde(default)]
    metric: BTreeMap<String, String>,
    #[serde(default)]
    value: (f64, String),
}

pub struct MetricsClient {
    config: MetricsConfig,
}

impl MetricsClient {
    pub fn new(config: MetricsConfig) -> Self {
        MetricsClient { config }
    }

    /// Run one instant query. Only a `success` envelope yields samples;
    /// every failure mode yields the empty list.
    async fn query(&self, promql: &str) -> Vec<Sample> {
        let Ok(client) = reqwest::Client::builder().timeout(self.config.timeout).build() else {
            return Vec::new();
        };
        let url = format!("{}/api/v1/query", self.config.base_url);
        let response = match client.get(&url).query(&[("query", promql)]).send().await {
            Ok(resp) => resp,
            Err(err) => {
                debug!(error = %err, "metrics query failed");
                return Vec::new();
            }
        };
        let envelope: Envelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(error = %err, "metrics response unreadable");
                return Vec::new();
            }
        };
        if envelope.status != "success" {
            return Vec::new();
        }
        envelope.data.result
    }

    /// Gauge keyed by scrape instance, rounded to one decimal. Samples with
    /// an unparseable value are dropped.
    async fn gauge_by_instance(&self, promql: &str) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        for sample in self.query(promql).await {
            let instance = sample.metric.get("instance").cloned().unwrap_or_default();
            if let Ok(value) = sample.value.1.parse::<f64>() {
                out.insert(instance, round1(value));
            }
        }
        out
    }

    pub async fn node_cpu(&self) -> BTreeMap<String, f64> {
        self.gauge_by_instance(NODE_CPU_PROMQL).await
    }

    pub async fn node_memory(&self) -> BTreeMap<String, f64> {
        self.gauge_by_instance(NODE_MEMORY_PROMQL).await
    }

    pub async fn node_disk(&self) -> BTreeMap<String, f64> {
        self.gauge_by_instance(NODE_DISK_PROMQL).await
    }

    pub async fn running_pods_by_namespace(&self) -> BTreeMap<String, i64> {
        let mut out = BTreeMap::new();
        for sample in self.query(RUNNING_PODS_PROMQL).await {
            let namespace = sample.metric.get("namespace").cloned().unwrap_or_default();
            if let Ok(value) = sample.value.1.parse::<f64>() {
                out.insert(namespace, value as i64);
            }
        }
        out
    }

    /// CPU, memory and disk gauges merged per instance; an instance missing
    /// a gauge reads zero for it.
    pub async fn node_metrics(&self) -> Vec<NodeMetrics> {
        let (cpu, memory, disk) =
            tokio::join!(self.node_cpu(), self.node_memory(), self.node_disk());

        let mut instances: BTreeSet<&String> = BTreeSet::new();
        instances.extend(cpu.keys());
        instances.extend(memory.keys());
        instances.extend(disk.keys());

        instances
            .into_iter()
            .map(|instance| NodeMetrics {
                instance: instance.clone(),
                cpu_pct: cpu.get(instance).copied().unwrap_or(0.0),
                memory_pct: memory.get(instance).copied().unwrap_or(0.0),
                disk_pct: disk.get(instance).copied().unwrap_or(0.0),
            })
            .collect()
    }
}
