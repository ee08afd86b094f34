use serde::{Deserialize, Serialize};

use super::common::StreamSettings;

/// VLESS server options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlessOption {
    pub port: u16,
    /// XTLS flow, e.g. `xtls-rprx-vision`.
    pub flow: String,
    #[serde(flatten)]
    pub stream: StreamSettings,
}
