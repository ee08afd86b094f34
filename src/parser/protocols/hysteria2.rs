use serde::{Deserialize, Serialize};

use super::common::SecurityConfig;

/// Hysteria2 server options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hysteria2Option {
    pub port: u16,
    /// Port hopping range, e.g. `20000-30000`.
    pub hop_ports: String,
    /// Hop interval in seconds.
    pub hop_interval: u32,
    /// Salamander obfuscation password; empty disables obfuscation.
    pub obfs_password: String,
    pub security_config: SecurityConfig,
}
