//! Shared handler state. Read-only, so one `Arc` covers every request.

use std::sync::Arc;

use opsdeck_probes::ProbeSet;
use opsdeck_store::StoreReader;

use crate::config::ServerConfig;

pub struct AppState {
    pub reader: StoreReader,
    pub probes: ProbeSet,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: &ServerConfig) -> AppState {
        AppState {
            reader: StoreReader::new(config.catalog()),
            probes: config.probes(),
        }
    }

    /// State over an existing reader and probe set, for tests that point
    /// the probes at mock servers.
    pub fn new(reader: StoreReader, probes: ProbeSet) -> AppState {
        AppState { reader, probes }
    }
}
