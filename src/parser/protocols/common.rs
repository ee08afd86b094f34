//! Transport and TLS settings shared by the stream-based protocols.

use serde::{Deserialize, Serialize};

/// Transport-specific parameters (`transport_config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub path: String,
    pub host: String,
    pub service_name: String,
}

/// TLS / REALITY parameters (`security_config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub sni: String,
    pub allow_insecure: bool,
    pub fingerprint: String,
    pub alpn: Vec<String>,
    pub reality_server_addr: String,
    pub reality_server_port: u16,
    pub reality_private_key: String,
    pub reality_public_key: String,
    pub reality_short_id: String,
}

impl SecurityConfig {
    /// SNI, falling back to `fallback` (usually the dialed host) when unset.
    pub fn server_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.sni.is_empty() {
            fallback
        } else {
            &self.sni
        }
    }
}

/// `transport` / `security` pair used by VLESS, VMess and Trojan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    pub transport: String,
    pub transport_config: TransportConfig,
    pub security: String,
    pub security_config: SecurityConfig,
}

impl StreamSettings {
    /// Network name, `tcp` when unset.
    pub fn network(&self) -> &str {
        match self.transport.as_str() {
            "" => "tcp",
            other => other,
        }
    }

    pub fn is_tls(&self) -> bool {
        self.security.eq_ignore_ascii_case("tls")
    }

    pub fn is_reality(&self) -> bool {
        self.security.eq_ignore_ascii_case("reality")
    }

    /// True for both plain TLS and REALITY.
    pub fn tls_enabled(&self) -> bool {
        self.is_tls() || self.is_reality()
    }
}
