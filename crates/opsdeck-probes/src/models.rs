//! Model-server probe (Ollama wire format): loaded models, local library,
//! liveness.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use opsdeck_types::{AvailableModel, ModelServerStatus, RunningModel, bytes_to_gib};

#[derive(Debug, Clone)]
pub struct ModelServerConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// The liveness probe runs on page load, so it gets a tighter budget.
    pub health_timeout: Duration,
}

impl Default for ModelServerConfig {
    fn default() -> Self {
        ModelServerConfig {
            base_url: "http://192.168.1.50:11434".to_string(),
            timeout: Duration::from_secs(5),
            health_timeout: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PsResponse {
    #[serde(default)]
    models: Vec<PsModel>,
}

#[derive(Debug, Default, Deserialize)]
struct PsModel {
    #[serde(default)]
    name: String,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    size_vram: i64,
    #[serde(default)]
    expires_at: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Default, Deserialize)]
struct TagModel {
    #[serde(default)]
    name: String,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    modified_at: String,
    #[serde(default)]
    details: TagDetails,
}

#[derive(Debug, Default, Deserialize)]
struct TagDetails {
    #[serde(default)]
    family: String,
    #[serde(default)]
    parameter_size: String,
    #[serde(default)]
    quantization_level: String,
}

pub struct ModelServerClient {
    config: ModelServerConfig,
}

impl ModelServerClient {
    pub fn new(config: ModelServerConfig) -> Self {
        ModelServerClient { config }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, timeout: Duration) -> Option<T> {
        let client = reqwest::Client::builder().timeout(timeout).build().ok()?;
        let response = match client
            .get(format!("{}{}", self.config.base_url, path))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                debug!(error = %err, path, "model server request failed");
                return None;
            }
        };
        response.json().await.ok()
    }

    /// Models currently loaded into memory, with VRAM footprints in GiB.
    pub async fn running(&self) -> Option<Vec<RunningModel>> {
        let ps: PsResponse = self.get_json("/api/ps", self.config.timeout).await?;
        Some(
            ps.models
                .into_iter()
                .map(|m| RunningModel {
                    size_gb: bytes_to_gib(m.size),
                    vram_gb: bytes_to_gib(m.size_vram),
                    name: m.name,
                    size: m.size,
                    expires_at: m.expires_at,
                })
                .collect(),
        )
    }

    /// Models available on disk.
    pub async fn available(&self) -> Option<Vec<AvailableModel>> {
        let tags: TagsResponse = self.get_json("/api/tags", self.config.timeout).await?;
        Some(
            tags.models
                .into_iter()
                .map(|m| AvailableModel {
                    name: m.name,
                    size_gb: bytes_to_gib(m.size),
                    modified_at: m.modified_at,
                    family: m.details.family,
                    parameter_size: m.details.parameter_size,
                    quantization: m.details.quantization_level,
                })
                .collect(),
        )
    }

    pub async fn health(&self) -> bool {
        let Ok(client) = reqwest::Client::builder()
            .timeout(self.config.health_timeout)
            .build()
        else {
            return false;
        };
        match client
            .get(format!("{}/api/tags", self.config.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status() == StatusCode::OK,
            Err(_) => false,
        }
    }

    /// Liveness plus both model lists. An offline server reports empty
    /// lists without touching the other endpoints.
    pub async fn status(&self) -> ModelServerStatus {
        if !self.health().await {
            return ModelServerStatus::default();
        }
        let (running, available) = tokio::join!(self.running(), self.available());
        ModelServerStatus {
            online: true,
            running: running.unwrap_or_default(),
            available: available.unwrap_or_default(),
        }
    }
}
