//! Proxy model definitions
//!
//! Contains the canonical proxy entry every renderer consumes.

use bitflags::bitflags;

use crate::parser::ProtocolOption;

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    Shadowsocks,
    Vless,
    Vmess,
    Trojan,
    Hysteria2,
    Tuic,
    AnyTls,
}

impl ProxyType {
    /// Canonical protocol tag as stored on server records.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "shadowsocks",
            ProxyType::Vless => "vless",
            ProxyType::Vmess => "vmess",
            ProxyType::Trojan => "trojan",
            ProxyType::Hysteria2 => "hysteria2",
            ProxyType::Tuic => "tuic",
            ProxyType::AnyTls => "anytls",
        }
    }

    /// Parse a protocol tag. Matching is case-insensitive.
    pub fn from_tag(tag: &str) -> Option<ProxyType> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "shadowsocks" | "ss" => Some(ProxyType::Shadowsocks),
            "vless" => Some(ProxyType::Vless),
            "vmess" => Some(ProxyType::Vmess),
            "trojan" => Some(ProxyType::Trojan),
            "hysteria2" | "hy2" => Some(ProxyType::Hysteria2),
            "tuic" => Some(ProxyType::Tuic),
            "anytls" => Some(ProxyType::AnyTls),
            _ => None,
        }
    }

    pub fn flag(self) -> ProxyTypes {
        match self {
            ProxyType::Shadowsocks => ProxyTypes::SHADOWSOCKS,
            ProxyType::Vless => ProxyTypes::VLESS,
            ProxyType::Vmess => ProxyTypes::VMESS,
            ProxyType::Trojan => ProxyTypes::TROJAN,
            ProxyType::Hysteria2 => ProxyTypes::HYSTERIA2,
            ProxyType::Tuic => ProxyTypes::TUIC,
            ProxyType::AnyTls => ProxyTypes::ANYTLS,
        }
    }
}

bitflags! {
    /// Set of protocols a client format can express.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProxyTypes: u8 {
        const SHADOWSOCKS = 1 << 0;
        const VLESS = 1 << 1;
        const VMESS = 1 << 2;
        const TROJAN = 1 << 3;
        const HYSTERIA2 = 1 << 4;
        const TUIC = 1 << 5;
        const ANYTLS = 1 << 6;
    }
}

impl ProxyTypes {
    pub fn supports(self, proxy_type: ProxyType) -> bool {
        self.contains(proxy_type.flag())
    }
}

/// One canonical, named endpoint.
///
/// The protocol is derived from `option`, so a proxy can never carry options
/// of a different protocol than the one it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub option: ProtocolOption,
    pub country: String,
    pub city: String,
    pub tags: Vec<String>,
}

impl Proxy {
    pub fn protocol(&self) -> ProxyType {
        self.option.proxy_type()
    }
}
