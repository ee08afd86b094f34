use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Shadowsocks server options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowsocksOption {
    pub port: u16,
    pub method: String,
    /// Server PSK, only meaningful for SIP022 (`2022-blake3-*`) methods.
    pub server_key: String,
}

impl ShadowsocksOption {
    pub fn is_2022(&self) -> bool {
        self.method.starts_with("2022-blake3-")
    }

    /// Key length in bytes of a SIP022 method.
    fn key_len(&self) -> usize {
        match self.method.as_str() {
            "2022-blake3-aes-128-gcm" => 16,
            _ => 32,
        }
    }

    /// Password presented by `uuid` to this server.
    ///
    /// SIP022 methods use `<server_key>:<user_key>` where the user key is the
    /// base64 of the first `key_len` bytes of the UUID.
    pub fn password(&self, uuid: &str) -> String {
        if !self.is_2022() {
            return uuid.to_string();
        }
        let user_key: String = uuid.chars().take(self.key_len()).collect();
        format!("{}:{}", self.server_key, STANDARD.encode(user_key))
    }
}
