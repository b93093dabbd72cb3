//! Cluster control-plane probe using in-cluster service-account files.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::debug;

use opsdeck_types::{NodeSummary, PodSummary, ServicePort, ServiceSummary, kib_to_gib};

#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub api_url: String,
    pub token_path: PathBuf,
    pub ca_path: PathBuf,
    pub timeout: Duration,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            api_url: "https://kubernetes.default.svc".to_string(),
            token_path: PathBuf::from("/var/run/secrets/kubernetes.io/serviceaccount/token"),
            ca_path: PathBuf::from("/var/run/secrets/kubernetes.io/serviceaccount/ca.crt"),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Read-only client for the cluster API server.
///
/// Credentials are the mounted service-account files and are re-read on
/// every call, so a rotated token is picked up without a restart. A missing
/// token short-circuits to `None` before any network traffic.
pub struct ClusterClient {
    config: ClusterConfig,
}

impl ClusterClient {
    pub fn new(config: ClusterConfig) -> Self {
        ClusterClient { config }
    }

    async fn get_json(&self, path: &str) -> Option<serde_json::Value> {
        // without a mounted token there is no point dialing the API server
        let token = std::fs::read_to_string(&self.config.token_path).ok()?;

        let mut builder = reqwest::Client::builder().timeout(self.config.timeout);
        if let Ok(pem) = std::fs::read(&self.config.ca_path) {
            match reqwest::Certificate::from_pem(&pem) {
                Ok(cert) => builder = builder.add_root_certificate(cert),
                Err(err) => {
                    debug!(error = %err, "cluster CA bundle rejected");
                    return None;
                }
            }
        }
        let client = builder.build().ok()?;

        let response = match client
            .get(format!("{}{}", self.config.api_url, path))
            .bearer_auth(token.trim())
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                debug!(error = %err, path, "cluster API request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(status = %response.status(), path, "cluster API returned an error status");
            return None;
        }
        response.json().await.ok()
    }

    pub async fn nodes(&self) -> Option<Vec<NodeSummary>> {
        let data = self.get_json("/api/v1/nodes").await?;
        Some(items(&data).iter().map(reshape_node).collect())
    }

    pub async fn pods(&self) -> Option<Vec<PodSummary>> {
        let data = self.get_json("/api/v1/pods").await?;
        Some(items(&data).iter().map(reshape_pod).collect())
    }

    pub async fn services(&self) -> Option<Vec<ServiceSummary>> {
        let data = self.get_json("/api/v1/services").await?;
        Some(
            items(&data)
                .iter()
                .filter(|item| !is_cluster_internal_service(item))
                .map(reshape_service)
                .collect(),
        )
    }

    pub async fn namespaces(&self) -> Option<Vec<String>> {
        let data = self.get_json("/api/v1/namespaces").await?;
        Some(
            items(&data)
                .iter()
                .filter_map(|item| item["metadata"]["name"].as_str())
                .map(str::to_string)
                .collect(),
        )
    }
}

fn items(data: &serde_json::Value) -> &[serde_json::Value] {
    data.get("items")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(value: &serde_json::Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn reshape_node(item: &serde_json::Value) -> NodeSummary {
    let status = &item["status"];
    let ready = status["conditions"]
        .as_array()
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c["type"] == "Ready" && c["status"] == "True")
        })
        .unwrap_or(false);
    let ip = status["addresses"]
        .as_array()
        .and_then(|addrs| {
            addrs
                .iter()
                .find(|a| a["type"] == "InternalIP")
                .and_then(|a| a["address"].as_str())
        })
        .unwrap_or_default()
        .to_string();

    NodeSummary {
        name: text(&item["metadata"]["name"]),
        ip,
        ready,
        cpu_capacity: status["capacity"]["cpu"].as_str().unwrap_or("0").to_string(),
        memory_capacity_gb: ki_capacity_gb(status["capacity"]["memory"].as_str().unwrap_or("0Ki")),
        os_image: text(&status["nodeInfo"]["osImage"]),
        kubelet_version: text(&status["nodeInfo"]["kubeletVersion"]),
    }
}

/// The kubelet reports memory capacity as a `Ki` quantity.
fn ki_capacity_gb(capacity: &str) -> f64 {
    let kib = capacity
        .strip_suffix("Ki")
        .unwrap_or(capacity)
        .parse::<i64>()
        .unwrap_or(0);
    kib_to_gib(kib)
}

fn reshape_pod(item: &serde_json::Value) -> PodSummary {
    let status = &item["status"];
    let empty = Vec::new();
    let containers = status["containerStatuses"].as_array().unwrap_or(&empty);

    PodSummary {
        name: text(&item["metadata"]["name"]),
        namespace: text(&item["metadata"]["namespace"]),
        phase: status["phase"].as_str().unwrap_or("Unknown").to_string(),
        node: text(&item["spec"]["nodeName"]),
        restarts: containers
            .iter()
            .map(|c| c["restartCount"].as_i64().unwrap_or(0))
            .sum(),
        ready: containers
            .iter()
            .all(|c| c["ready"].as_bool().unwrap_or(false)),
    }
}

/// kube-system plumbing nobody wants on the dashboard.
fn is_cluster_internal_service(item: &serde_json::Value) -> bool {
    item["metadata"]["namespace"] == "kube-system"
        && (item["metadata"]["name"] == "kube-dns" || item["metadata"]["name"] == "metrics-server")
}

fn reshape_service(item: &serde_json::Value) -> ServiceSummary {
    let spec = &item["spec"];
    let ports = spec["ports"]
        .as_array()
        .map(|ports| {
            ports
                .iter()
                .map(|p| ServicePort {
                    port: p["port"].as_i64(),
                    target: p.get("targetPort").cloned(),
                })
                .collect()
        })
        .unwrap_or_default();

    ServiceSummary {
        name: text(&item["metadata"]["name"]),
        namespace: text(&item["metadata"]["namespace"]),
        kind: text(&spec["type"]),
        cluster_ip: text(&spec["clusterIP"]),
        ports,
    }
}
