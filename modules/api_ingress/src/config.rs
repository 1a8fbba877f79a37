use serde::{Deserialize, Serialize};

/// HTTP host configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Per-request timeout in seconds; 0 disables it.
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            cors_enabled: false,
            timeout_sec: 30,
            body_limit_bytes: default_body_limit(),
        }
    }
}
