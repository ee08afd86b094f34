use serde::{Deserialize, Serialize};

use super::common::SecurityConfig;

/// AnyTLS server options. TLS is always on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnyTlsOption {
    pub port: u16,
    pub security_config: SecurityConfig,
}
