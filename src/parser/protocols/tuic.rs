use serde::{Deserialize, Serialize};

use super::common::SecurityConfig;

/// TUIC v5 server options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuicOption {
    pub port: u16,
    pub disable_sni: bool,
    pub reduce_rtt: bool,
    /// `native` or `quic`
    pub udp_relay_mode: String,
    /// `bbr`, `cubic` or `new_reno`
    pub congestion_controller: String,
    pub security_config: SecurityConfig,
}

impl TuicOption {
    pub fn udp_relay_mode(&self) -> &str {
        if self.udp_relay_mode.is_empty() {
            "native"
        } else {
            &self.udp_relay_mode
        }
    }

    pub fn congestion_controller(&self) -> &str {
        if self.congestion_controller.is_empty() {
            "bbr"
        } else {
            &self.congestion_controller
        }
    }
}
