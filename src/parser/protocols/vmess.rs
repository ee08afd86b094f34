use serde::{Deserialize, Serialize};

use super::common::StreamSettings;

/// VMess server options. The user UUID is the id, alterId is always 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmessOption {
    pub port: u16,
    #[serde(flatten)]
    pub stream: StreamSettings,
}
