use std::path::PathBuf;

use tracing::Level;

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    pub level: Box<str>,
    /// Plain-text copy of the log, written in addition to stderr.
    pub log_file: Option<PathBuf>,
    /// OTLP/gRPC collector, e.g. `http://localhost:4317`. Export is off when unset.
    pub otlp_endpoint: Option<Box<str>>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            log_file: None,
            otlp_endpoint: None,
        }
    }
}

impl TelemetryConfig {
    /// `None` when `level` is not one of trace/debug/info/warn/error.
    pub fn level(&self) -> Option<Level> {
        self.level.parse().ok()
    }
}
