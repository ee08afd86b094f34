//! sing-box outbound objects, serialized as they appear under `outbounds`.

use serde::Serialize;
use std::collections::BTreeMap;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Outbound configuration, tagged by `type`
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outbound {
    Direct(TagOnlyOutbound),
    Block(TagOnlyOutbound),
    Selector(SelectorOutbound),
    #[serde(rename = "urltest")]
    UrlTest(UrlTestOutbound),
    Shadowsocks(ShadowsocksOutbound),
    #[serde(rename = "vless")]
    VLess(VLessOutbound),
    #[serde(rename = "vmess")]
    VMess(VMessOutbound),
    Trojan(TrojanOutbound),
    Hysteria2(Hysteria2Outbound),
    #[serde(rename = "tuic")]
    Tuic(TuicOutbound),
    #[serde(rename = "anytls")]
    AnyTls(AnyTlsOutbound),
}

impl Outbound {
    pub fn tag(&self) -> &str {
        match self {
            Outbound::Direct(o) | Outbound::Block(o) => &o.tag,
            Outbound::Selector(o) => &o.tag,
            Outbound::UrlTest(o) => &o.tag,
            Outbound::Shadowsocks(o) => &o.server.tag,
            Outbound::VLess(o) => &o.server.tag,
            Outbound::VMess(o) => &o.server.tag,
            Outbound::Trojan(o) => &o.server.tag,
            Outbound::Hysteria2(o) => &o.server.tag,
            Outbound::Tuic(o) => &o.server.tag,
            Outbound::AnyTls(o) => &o.server.tag,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TagOnlyOutbound {
    pub tag: String,
}

/// Manual selection group
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SelectorOutbound {
    pub tag: String,
    pub outbounds: Vec<String>,
}

/// Latency tested group
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UrlTestOutbound {
    pub tag: String,
    pub outbounds: Vec<String>,
    pub url: String,
    /// Duration string such as `300s`
    pub interval: String,
}

/// Tag and dial target shared by every proxy outbound
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ServerFields {
    pub tag: String,
    pub server: String,
    pub server_port: u16,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ShadowsocksOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub method: String,
    pub password: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct VLessOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub uuid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub flow: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct VMessOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub uuid: String,
    pub security: String,
    pub alter_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TrojanOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<OutboundTls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<V2RayTransport>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Hysteria2Obfs {
    #[serde(rename = "type")]
    pub obfs_type: String,
    pub password: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Hysteria2Outbound {
    #[serde(flatten)]
    pub server: ServerFields,
    /// Port hopping ranges in `start:end` form
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub server_ports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hop_interval: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfs: Option<Hysteria2Obfs>,
    pub tls: OutboundTls,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TuicOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub uuid: String,
    pub password: String,
    pub congestion_control: String,
    pub udp_relay_mode: String,
    #[serde(skip_serializing_if = "is_false")]
    pub zero_rtt_handshake: bool,
    pub tls: OutboundTls,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AnyTlsOutbound {
    #[serde(flatten)]
    pub server: ServerFields,
    pub password: String,
    pub tls: OutboundTls,
}

/// Client TLS settings
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct OutboundTls {
    pub enabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub insecure: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_sni: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utls: Option<OutboundUtls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality: Option<OutboundReality>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OutboundUtls {
    pub enabled: bool,
    pub fingerprint: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OutboundReality {
    pub enabled: bool,
    pub public_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_id: String,
}

/// V2Ray transport, tagged by `type`
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum V2RayTransport {
    Http {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        host: Vec<String>,
        #[serde(skip_serializing_if = "String::is_empty")]
        path: String,
    },
    #[serde(rename = "ws")]
    WebSocket {
        #[serde(skip_serializing_if = "String::is_empty")]
        path: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
    #[serde(rename = "grpc")]
    Grpc {
        #[serde(skip_serializing_if = "String::is_empty")]
        service_name: String,
    },
    #[serde(rename = "httpupgrade")]
    HttpUpgrade {
        #[serde(skip_serializing_if = "String::is_empty")]
        host: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        path: String,
    },
}
