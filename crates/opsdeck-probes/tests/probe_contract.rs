use std::time::{Duration, Instant};

use httpmock::{Method::GET, MockServer};
use serde_json::json;
use tempfile::TempDir;

use opsdeck_probes::{
    ClusterClient, ClusterConfig, GpuExporterClient, GpuExporterConfig, MetricsClient,
    MetricsConfig, ModelServerClient, ModelServerConfig, ProbeSet,
};

fn cluster_config(server: &MockServer, dir: &TempDir, with_token: bool) -> ClusterConfig {
    let token_path = dir.path().join("token");
    if with_token {
        std::fs::write(&token_path, "test-token\n").unwrap();
    }
    ClusterConfig {
        api_url: server.base_url(),
        token_path,
        // no CA file in the test fixture; plain HTTP does not need one
        ca_path: dir.path().join("ca.crt"),
        timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn cluster_nodes_parse_and_authenticate() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/nodes")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "items": [{
                    "metadata": {"name": "k3s-1"},
                    "status": {
                        "conditions": [{"type": "Ready", "status": "True"}],
                        "addresses": [{"type": "InternalIP", "address": "192.168.1.30"}],
                        "capacity": {"cpu": "4", "memory": "8388608Ki"},
                        "nodeInfo": {"osImage": "Debian 12", "kubeletVersion": "v1.30.2+k3s1"}
                    }
                }]
            }));
        })
        .await;

    let client = ClusterClient::new(cluster_config(&server, &dir, true));
    let nodes = client.nodes().await.unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "k3s-1");
    assert_eq!(nodes[0].memory_capacity_gb, 8.0);
    assert!(nodes[0].ready);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn missing_token_never_dials_the_api() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/nodes");
            then.status(200).json_body(json!({"items": []}));
        })
        .await;

    let client = ClusterClient::new(cluster_config(&server, &dir, false));
    assert!(client.nodes().await.is_none());
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn cluster_error_status_is_absent() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/pods");
            then.status(500);
        })
        .await;

    let client = ClusterClient::new(cluster_config(&server, &dir, true));
    assert!(client.pods().await.is_none());
}

#[tokio::test]
async fn metrics_gauges_come_back_rounded_by_instance() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/query");
            then.status(200).json_body(json!({
                "status": "success",
                "data": {"result": [
                    {"metric": {"instance": "192.168.1.30:9100"}, "value": [1724500000.0, "42.3456"]},
                    {"metric": {"instance": "192.168.1.31:9100"}, "value": [1724500000.0, "7.04"]}
                ]}
            }));
        })
        .await;

    let client = MetricsClient::new(MetricsConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(2),
    });
    let cpu = client.node_cpu().await;

    assert_eq!(cpu.get("192.168.1.30:9100"), Some(&42.3));
    assert_eq!(cpu.get("192.168.1.31:9100"), Some(&7.0));
}

#[tokio::test]
async fn metrics_error_envelope_yields_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/query");
            then.status(400)
                .json_body(json!({"status": "error", "error": "parse error"}));
        })
        .await;

    let client = MetricsClient::new(MetricsConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(2),
    });
    assert!(client.node_cpu().await.is_empty());
    assert!(client.running_pods_by_namespace().await.is_empty());
}

#[tokio::test]
async fn probe_latency_is_bounded_by_the_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/query");
            then.status(200)
                .json_body(json!({"status": "success", "data": {"result": []}}))
                .delay(Duration::from_secs(3));
        })
        .await;

    let client = MetricsClient::new(MetricsConfig {
        base_url: server.base_url(),
        timeout: Duration::from_millis(250),
    });

    let started = Instant::now();
    let cpu = client.node_cpu().await;
    assert!(cpu.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn model_server_lists_convert_sizes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/ps");
            then.status(200).json_body(json!({
                "models": [{
                    "name": "llama3:8b",
                    "size": 2147483648u64,
                    "size_vram": 1610612736u64,
                    "expires_at": "2026-08-24T12:00:00Z"
                }]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200).json_body(json!({
                "models": [{
                    "name": "qwen2.5-coder:14b",
                    "size": 2147483648u64,
                    "modified_at": "2026-08-01T10:00:00Z",
                    "details": {"family": "qwen2", "parameter_size": "14.8B", "quantization_level": "Q4_K_M"}
                }]
            }));
        })
        .await;

    let client = ModelServerClient::new(ModelServerConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(2),
        health_timeout: Duration::from_secs(1),
    });

    let status = client.status().await;
    assert!(status.online);
    assert_eq!(status.running[0].size_gb, 2.0);
    assert_eq!(status.running[0].vram_gb, 1.5);
    assert_eq!(status.available[0].family, "qwen2");
    assert_eq!(status.available[0].size_gb, 2.0);
}

#[tokio::test]
async fn offline_model_server_skips_the_model_endpoints() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(503);
        })
        .await;
    let ps = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/ps");
            then.status(200).json_body(json!({"models": []}));
        })
        .await;

    let client = ModelServerClient::new(ModelServerConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(2),
        health_timeout: Duration::from_secs(1),
    });

    let status = client.status().await;
    assert!(!status.online);
    assert!(status.running.is_empty());
    assert!(status.available.is_empty());
    assert_eq!(ps.hits_async().await, 0);
}

#[tokio::test]
async fn gpu_payload_passes_through_with_online_marker() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/metrics");
            then.status(200).json_body(json!({
                "gpus": [{"name": "RTX 4090", "utilization_pct": 93, "temp_c": 71}],
                "gpu_count": 1
            }));
        })
        .await;

    let client = GpuExporterClient::new(GpuExporterConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(2),
    });

    let snap = client.snapshot().await;
    assert!(snap.online);
    let body = serde_json::to_value(&snap).unwrap();
    assert_eq!(body["gpu_count"], 1);
    assert_eq!(body["gpus"][0]["name"], "RTX 4090");
}

#[tokio::test]
async fn unreachable_gpu_exporter_reports_offline_placeholder() {
    // mock server with no routes: every request 404s with a plain-text body
    let server = MockServer::start_async().await;
    let client = GpuExporterClient::new(GpuExporterConfig {
        base_url: server.base_url(),
        timeout: Duration::from_secs(1),
    });

    let snap = client.snapshot().await;
    assert!(!snap.online);
    let body = serde_json::to_value(&snap).unwrap();
    assert_eq!(body["gpu_count"], 0);
    assert_eq!(body["gpus"], json!([]));
}

#[tokio::test]
async fn topology_degrades_section_by_section() {
    let cluster_server = MockServer::start_async().await;
    let metrics_server = MockServer::start_async().await;
    let dead_server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    cluster_server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/nodes");
            then.status(200).json_body(json!({
                "items": [{
                    "metadata": {"name": "k3s-1"},
                    "status": {
                        "conditions": [{"type": "Ready", "status": "True"}],
                        "addresses": [{"type": "InternalIP", "address": "192.168.1.30"}],
                        "capacity": {"cpu": "4", "memory": "8388608Ki"},
                        "nodeInfo": {}
                    }
                }]
            }));
        })
        .await;
    // pods endpoint left unmocked: that section degrades to empty

    metrics_server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/query");
            then.status(200).json_body(json!({
                "status": "success",
                "data": {"result": [
                    {"metric": {"instance": "192.168.1.30:9100"}, "value": [1724500000.0, "55.5"]}
                ]}
            }));
        })
        .await;

    let probes = ProbeSet::new(
        cluster_config(&cluster_server, &dir, true),
        MetricsConfig {
            base_url: metrics_server.base_url(),
            timeout: Duration::from_secs(2),
        },
        ModelServerConfig {
            base_url: dead_server.base_url(),
            timeout: Duration::from_secs(1),
            health_timeout: Duration::from_secs(1),
        },
        GpuExporterConfig {
            base_url: dead_server.base_url(),
            timeout: Duration::from_secs(1),
        },
    );

    let topology = probes.topology().await;

    assert_eq!(topology.physical.len(), 8);
    assert_eq!(topology.cluster_nodes.len(), 1);
    assert_eq!(topology.cluster_nodes[0].metrics.cpu_pct, 55.5);
    assert!(topology.pods.is_empty());

    let workstation = topology
        .physical
        .iter()
        .find(|h| h.id == "ai-workstation")
        .unwrap();
    assert!(!workstation.gpu.as_ref().unwrap().online);
    assert!(!workstation.models.as_ref().unwrap().online);
}
