use serde::{Deserialize, Serialize};

/// The subscriber a config is rendered for.
///
/// The UUID is the credential for every protocol; the traffic counters and
/// expiry feed the human-readable subscription info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscribeUser {
    pub uuid: String,
    /// Uploaded bytes
    pub upload: i64,
    /// Downloaded bytes
    pub download: i64,
    /// Traffic quota in bytes, 0 for unlimited
    pub traffic: i64,
    /// Unix timestamp in seconds
    pub expire_time: i64,
}

impl SubscribeUser {
    pub fn used(&self) -> i64 {
        self.upload.saturating_add(self.download)
    }

    /// Remaining quota, never negative. `None` when the quota is unlimited.
    pub fn remaining(&self) -> Option<i64> {
        if self.traffic <= 0 {
            None
        } else {
            Some(self.traffic.saturating_sub(self.used()).max(0))
        }
    }
}
