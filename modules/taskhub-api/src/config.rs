use serde::{Deserialize, Serialize};

/// Configuration for the API module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Secret for signing identity tokens. Startup fails when empty.
    #[serde(default)]
    pub secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

fn default_token_ttl_hours() -> u64 {
    24 * 7
}
