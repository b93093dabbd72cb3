//! Custom GPU exporter probe. The exporter owns its payload schema, so the
//! body passes through with only the `online` marker added.

use std::time::Duration;

use tracing::debug;

use opsdeck_types::GpuSnapshot;

#[derive(Debug, Clone)]
pub struct GpuExporterConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GpuExporterConfig {
    fn default() -> Self {
        GpuExporterConfig {
            base_url: "http://192.168.1.50:9101".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

pub struct GpuExporterClient {
    config: GpuExporterConfig,
}

impl GpuExporterClient {
    pub fn new(config: GpuExporterConfig) -> Self {
        GpuExporterClient { config }
    }

    /// An unreachable or unreadable exporter yields the zeroed offline
    /// placeholder, never an error.
    pub async fn snapshot(&self) -> GpuSnapshot {
        let Ok(client) = reqwest::Client::builder().timeout(self.config.timeout).build() else {
            return GpuSnapshot::default();
        };
        let response = match client
            .get(format!("{}/metrics", self.config.base_url))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                debug!(error = %err, "gpu exporter unreachable");
                return GpuSnapshot::default();
            }
        };
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "gpu exporter payload unreadable");
                return GpuSnapshot::default();
            }
        };
        let Some(mut payload) = body.as_object().cloned() else {
            return GpuSnapshot::default();
        };
        if payload.is_empty() {
            return GpuSnapshot::default();
        }
        payload.remove("online");
        GpuSnapshot {
            online: true,
            payload,
        }
    }
}
