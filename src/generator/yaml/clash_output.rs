use serde::Serialize;
use std::collections::BTreeMap;

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, str::is_empty)
}

fn is_u32_option_zero(u: &Option<u32>) -> bool {
    u.map_or(true, |u| u == 0)
}

/// Common proxy options shared by every Clash proxy type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub client_fingerprint: Option<String>,
}

impl CommonProxyOptions {
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            udp: None,
            tls: None,
            skip_cert_verify: None,
            client_fingerprint: None,
        }
    }

    /// Create a builder for CommonProxyOptions
    pub fn builder(name: String, server: String, port: u16) -> CommonProxyOptionsBuilder {
        CommonProxyOptionsBuilder {
            common: Self::new(name, server, port),
        }
    }
}

/// Builder for CommonProxyOptions
pub struct CommonProxyOptionsBuilder {
    common: CommonProxyOptions,
}

impl CommonProxyOptionsBuilder {
    pub fn udp(mut self, value: bool) -> Self {
        self.common.udp = Some(value);
        self
    }

    pub fn tls(mut self, value: bool) -> Self {
        self.common.tls = Some(value);
        self
    }

    /// Only emitted when verification is actually skipped.
    pub fn skip_cert_verify(mut self, value: bool) -> Self {
        self.common.skip_cert_verify = value.then_some(true);
        self
    }

    pub fn client_fingerprint(mut self, value: &str) -> Self {
        self.common.client_fingerprint = Some(value.to_string());
        self
    }

    pub fn build(self) -> CommonProxyOptions {
        self.common
    }
}

/// `ws-opts` of a websocket or HTTP upgrade transport
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WsOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub v2ray_http_upgrade: bool,
}

/// `grpc-opts` of a gRPC transport
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrpcOptions {
    #[serde(rename = "grpc-service-name")]
    pub grpc_service_name: String,
}

/// `reality-opts` of a VLESS REALITY proxy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOptions {
    pub public_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_id: String,
}

/// Transport settings flattened into stream based proxies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportOptions {
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOptions>,
}

/// A single proxy in Clash configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClashProxy {
    #[serde(rename = "ss")]
    Shadowsocks {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
    },
    #[serde(rename = "vmess")]
    VMess {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(rename = "alterId")]
        alter_id: u32,
        cipher: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        servername: Option<String>,
        #[serde(flatten)]
        transport: TransportOptions,
    },
    #[serde(rename = "vless", rename_all = "kebab-case")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        flow: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reality_opts: Option<RealityOptions>,
        #[serde(flatten)]
        transport: TransportOptions,
    },
    #[serde(rename = "trojan")]
    Trojan {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        sni: Option<String>,
        #[serde(flatten)]
        transport: TransportOptions,
    },
    #[serde(rename = "hysteria2")]
    Hysteria2 {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        ports: Option<String>,
        #[serde(rename = "hop-interval", skip_serializing_if = "is_u32_option_zero")]
        hop_interval: Option<u32>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        obfs: Option<String>,
        #[serde(rename = "obfs-password", skip_serializing_if = "is_empty_option_string")]
        obfs_password: Option<String>,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alpn: Vec<String>,
    },
    #[serde(rename = "tuic", rename_all = "kebab-case")]
    Tuic {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        password: String,
        congestion_controller: String,
        udp_relay_mode: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        reduce_rtt: bool,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        disable_sni: bool,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alpn: Vec<String>,
    },
    #[serde(rename = "anytls")]
    AnyTls {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "is_empty_option_string")]
        sni: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alpn: Vec<String>,
    },
}

/// Trait for common operations on all ClashProxy variants
pub trait ClashProxyCommon {
    fn common(&self) -> &CommonProxyOptions;

    fn name(&self) -> &str {
        &self.common().name
    }
}

impl ClashProxyCommon for ClashProxy {
    fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::Shadowsocks { common, .. } => common,
            ClashProxy::VMess { common, .. } => common,
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
            ClashProxy::Hysteria2 { common, .. } => common,
            ClashProxy::Tuic { common, .. } => common,
            ClashProxy::AnyTls { common, .. } => common,
        }
    }
}
