//! Fan-out aggregation of every probe into the infrastructure topology.

use opsdeck_types::{
    GpuSnapshot, ModelServerStatus, NodeMetrics, PhysicalHost, Topology, TopologyNode,
};

use crate::{
    ClusterClient, ClusterConfig, GpuExporterClient, GpuExporterConfig, MetricsClient,
    MetricsConfig, ModelServerClient, ModelServerConfig,
};

/// All four probes bundled behind one handle.
pub struct ProbeSet {
    cluster: ClusterClient,
    metrics: MetricsClient,
    models: ModelServerClient,
    gpu: GpuExporterClient,
}

impl ProbeSet {
    pub fn new(
        cluster: ClusterConfig,
        metrics: MetricsConfig,
        models: ModelServerConfig,
        gpu: GpuExporterConfig,
    ) -> Self {
        ProbeSet {
            cluster: ClusterClient::new(cluster),
            metrics: MetricsClient::new(metrics),
            models: ModelServerClient::new(models),
            gpu: GpuExporterClient::new(gpu),
        }
    }

    pub fn cluster(&self) -> &ClusterClient {
        &self.cluster
    }

    pub fn metrics(&self) -> &MetricsClient {
        &self.metrics
    }

    pub fn models(&self) -> &ModelServerClient {
        &self.models
    }

    pub fn gpu(&self) -> &GpuExporterClient {
        &self.gpu
    }

    /// Build the full topology graph. The probes run concurrently, so the
    /// worst-case latency is the slowest single timeout rather than their
    /// sum. Each section degrades independently when its source is down.
    pub async fn topology(&self) -> Topology {
        let (nodes, pods, gpu, models, node_metrics, pod_counts) = tokio::join!(
            self.cluster.nodes(),
            self.cluster.pods(),
            self.gpu.snapshot(),
            self.models.status(),
            self.metrics.node_metrics(),
            self.metrics.running_pods_by_namespace(),
        );

        let cluster_nodes = nodes
            .unwrap_or_default()
            .into_iter()
            .map(|node| {
                let metrics = join_metrics(&node.ip, &node_metrics);
                TopologyNode { node, metrics }
            })
            .collect();

        Topology {
            physical: physical_inventory(gpu, models),
            cluster_nodes,
            pods: pods.unwrap_or_default(),
            pod_counts,
        }
    }
}

/// Scrape targets are `host:port`, node addresses bare IPs, so the join is
/// a substring match. A node with no matching target reads zeroed gauges.
fn join_metrics(node_ip: &str, node_metrics: &[NodeMetrics]) -> NodeMetrics {
    node_metrics
        .iter()
        .find(|m| m.instance.contains(node_ip))
        .cloned()
        .unwrap_or_else(|| NodeMetrics::zeroed(""))
}

fn host(id: &str, label: &str, kind: &str, ip: &str) -> PhysicalHost {
    PhysicalHost {
        id: id.to_string(),
        label: label.to_string(),
        kind: kind.to_string(),
        ip: ip.to_string(),
        gpu: None,
        models: None,
    }
}

/// The static rack: these hosts exist whether or not anything answers. The
/// GPU workstation carries its live exporter and model-server sections.
pub fn physical_inventory(gpu: GpuSnapshot, models: ModelServerStatus) -> Vec<PhysicalHost> {
    vec![
        host("udm-pro", "UDM Pro", "gateway", "192.168.1.1"),
        host("nuc1", "NUC1", "hypervisor", "192.168.1.10"),
        host("nuc2", "NUC2", "hypervisor", "192.168.1.11"),
        host("nuc3", "NUC3", "hypervisor", "192.168.1.12"),
        host("nas", "Synology NAS", "storage", "192.168.1.126"),
        PhysicalHost {
            id: "ai-workstation".to_string(),
            label: "AI Workstation".to_string(),
            kind: "gpu".to_string(),
            ip: "192.168.1.50".to_string(),
            gpu: Some(gpu),
            models: Some(models),
        },
        host("openclaw-vm", "OpenClaw VM", "vm", "192.168.1.38"),
        host("postgres-vm", "PostgreSQL VM", "database", "192.168.1.25"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_lists_the_rack_in_order() {
        let hosts = physical_inventory(GpuSnapshot::default(), ModelServerStatus::default());
        let ids: Vec<&str> = hosts.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "udm-pro",
                "nuc1",
                "nuc2",
                "nuc3",
                "nas",
                "ai-workstation",
                "openclaw-vm",
                "postgres-vm"
            ]
        );
    }

    #[test]
    fn only_the_gpu_host_carries_live_sections() {
        let hosts = physical_inventory(GpuSnapshot::default(), ModelServerStatus::default());
        for h in &hosts {
            if h.id == "ai-workstation" {
                assert!(h.gpu.is_some());
                assert!(h.models.is_some());
            } else {
                assert!(h.gpu.is_none());
                assert!(h.models.is_none());
            }
        }
    }

    #[test]
    fn metrics_join_is_by_substring() {
        let metrics = vec![
            NodeMetrics {
                instance: "192.168.1.30:9100".to_string(),
                cpu_pct: 12.5,
                memory_pct: 40.0,
                disk_pct: 61.2,
            },
            NodeMetrics {
                instance: "192.168.1.31:9100".to_string(),
                cpu_pct: 3.0,
                memory_pct: 20.0,
                disk_pct: 15.0,
            },
        ];

        let joined = join_metrics("192.168.1.31", &metrics);
        assert_eq!(joined.cpu_pct, 3.0);

        let missing = join_metrics("192.168.1.99", &metrics);
        assert_eq!(missing.cpu_pct, 0.0);
        assert_eq!(missing.memory_pct, 0.0);
        assert_eq!(missing.disk_pct, 0.0);
    }
}
