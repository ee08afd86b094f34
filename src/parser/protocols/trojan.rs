use serde::{Deserialize, Serialize};

use super::common::StreamSettings;

/// Trojan server options. TLS is implied even when `security` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrojanOption {
    pub port: u16,
    #[serde(flatten)]
    pub stream: StreamSettings,
}
