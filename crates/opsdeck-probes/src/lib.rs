// NOTE: Failure posture
//
// Every probe in this crate polls a service the dashboard does not own, over
// a short per-call timeout. `None` (or the zeroed placeholder) is the only
// failure signal: a missing credential, refused connection, timeout, error
// status, or unreadable body all collapse into it. Nothing here retries,
// caches, or raises; a dead source renders as an offline section and the
// next poll starts clean.

pub mod cluster;
pub mod gpu;
pub mod metrics;
pub mod models;
pub mod topology;

pub use cluster::{ClusterClient, ClusterConfig};
pub use gpu::{GpuExporterClient, GpuExporterConfig};
pub use metrics::{MetricsClient, MetricsConfig};
pub use models::{ModelServerClient, ModelServerConfig};
pub use topology::ProbeSet;
