//! Per-protocol option decoding.
//!
//! Each server carries a protocol tag and a raw JSON blob. [`parse_option`]
//! turns the pair into exactly one [`ProtocolOption`] variant, or fails; a
//! failure means the server produces no proxy at all.

pub mod anytls;
pub mod common;
pub mod hysteria2;
pub mod shadowsocks;
pub mod trojan;
pub mod tuic;
pub mod vless;
pub mod vmess;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::ProxyType;

pub use anytls::AnyTlsOption;
pub use common::{SecurityConfig, StreamSettings, TransportConfig};
pub use hysteria2::Hysteria2Option;
pub use shadowsocks::ShadowsocksOption;
pub use trojan::TrojanOption;
pub use tuic::TuicOption;
pub use vless::VlessOption;
pub use vmess::VmessOption;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("Failed to decode {protocol} config: {source}")]
    Decode {
        protocol: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{protocol} config is not a JSON object")]
    NotAnObject { protocol: &'static str },
}

/// Typed protocol options, one variant per supported protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolOption {
    Shadowsocks(ShadowsocksOption),
    Vless(VlessOption),
    Vmess(VmessOption),
    Trojan(TrojanOption),
    Hysteria2(Hysteria2Option),
    Tuic(TuicOption),
    AnyTls(AnyTlsOption),
}

impl ProtocolOption {
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            ProtocolOption::Shadowsocks(_) => ProxyType::Shadowsocks,
            ProtocolOption::Vless(_) => ProxyType::Vless,
            ProtocolOption::Vmess(_) => ProxyType::Vmess,
            ProtocolOption::Trojan(_) => ProxyType::Trojan,
            ProtocolOption::Hysteria2(_) => ProxyType::Hysteria2,
            ProtocolOption::Tuic(_) => ProxyType::Tuic,
            ProtocolOption::AnyTls(_) => ProxyType::AnyTls,
        }
    }

    /// Port embedded in the protocol config.
    pub fn port(&self) -> u16 {
        match self {
            ProtocolOption::Shadowsocks(o) => o.port,
            ProtocolOption::Vless(o) => o.port,
            ProtocolOption::Vmess(o) => o.port,
            ProtocolOption::Trojan(o) => o.port,
            ProtocolOption::Hysteria2(o) => o.port,
            ProtocolOption::Tuic(o) => o.port,
            ProtocolOption::AnyTls(o) => o.port,
        }
    }
}

fn decode<T: DeserializeOwned>(protocol: &'static str, config: &str) -> Result<T, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(config)
        .map_err(|source| ProtocolError::Decode { protocol, source })?;
    if !value.is_object() {
        return Err(ProtocolError::NotAnObject { protocol });
    }
    serde_json::from_value(value).map_err(|source| ProtocolError::Decode { protocol, source })
}

/// Decode `config` according to the `protocol` tag.
pub fn parse_option(protocol: &str, config: &str) -> Result<ProtocolOption, ProtocolError> {
    let proxy_type = ProxyType::from_tag(protocol)
        .ok_or_else(|| ProtocolError::UnknownProtocol(protocol.to_string()))?;
    let name = proxy_type.as_str();

    let option = match proxy_type {
        ProxyType::Shadowsocks => ProtocolOption::Shadowsocks(decode(name, config)?),
        ProxyType::Vless => ProtocolOption::Vless(decode(name, config)?),
        ProxyType::Vmess => ProtocolOption::Vmess(decode(name, config)?),
        ProxyType::Trojan => ProtocolOption::Trojan(decode(name, config)?),
        ProxyType::Hysteria2 => ProtocolOption::Hysteria2(decode(name, config)?),
        ProxyType::Tuic => ProtocolOption::Tuic(decode(name, config)?),
        ProxyType::AnyTls => ProtocolOption::AnyTls(decode(name, config)?),
    };
    Ok(option)
}
