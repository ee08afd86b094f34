use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};
use serde_json::{json, Value};

use super::RenderError;
use crate::constants::{DIRECT, REJECT};
use crate::generator::json::singbox_output::{
    AnyTlsOutbound, Hysteria2Obfs, Hysteria2Outbound, Outbound, OutboundReality, OutboundTls,
    OutboundUtls, SelectorOutbound, ServerFields, ShadowsocksOutbound, TagOnlyOutbound,
    TrojanOutbound, TuicOutbound, UrlTestOutbound, V2RayTransport, VLessOutbound, VMessOutbound,
};
use crate::models::{Adapter, Group, GroupType, Proxy, SubscribeUser};
use crate::parser::protocols::{SecurityConfig, StreamSettings};
use crate::parser::ProtocolOption;
use crate::settings::Settings;
use crate::template::SINGBOX_BASE;

fn default_alpn() -> Vec<String> {
    vec!["h2".to_string(), "http/1.1".to_string()]
}

fn quic_alpn() -> Vec<String> {
    vec!["h3".to_string()]
}

/// TLS block for a TLS-enabled outbound, ALPN falling back to `alpn`.
fn tls_options(security: &SecurityConfig, alpn: fn() -> Vec<String>) -> OutboundTls {
    OutboundTls {
        enabled: true,
        server_name: security.sni.clone(),
        insecure: security.allow_insecure,
        disable_sni: false,
        alpn: if security.alpn.is_empty() {
            alpn()
        } else {
            security.alpn.clone()
        },
        utls: (!security.fingerprint.is_empty()).then(|| OutboundUtls {
            enabled: true,
            fingerprint: security.fingerprint.clone(),
        }),
        reality: None,
    }
}

fn stream_tls(stream: &StreamSettings) -> Option<OutboundTls> {
    if !stream.tls_enabled() {
        return None;
    }
    let security = &stream.security_config;
    let mut tls = tls_options(security, default_alpn);
    if stream.is_reality() {
        if tls.server_name.is_empty() {
            tls.server_name = security.reality_server_addr.clone();
        }
        tls.insecure = false;
        if tls.utls.is_none() {
            tls.utls = Some(OutboundUtls {
                enabled: true,
                fingerprint: "chrome".to_string(),
            });
        }
        tls.reality = Some(OutboundReality {
            enabled: true,
            public_key: security.reality_public_key.clone(),
            short_id: security.reality_short_id.clone(),
        });
    }
    Some(tls)
}

fn stream_transport(stream: &StreamSettings) -> Option<V2RayTransport> {
    let config = &stream.transport_config;
    match stream.network() {
        "ws" => {
            let mut headers = BTreeMap::new();
            if !config.host.is_empty() {
                headers.insert("Host".to_string(), config.host.clone());
            }
            Some(V2RayTransport::WebSocket {
                path: config.path.clone(),
                headers,
            })
        }
        "grpc" => Some(V2RayTransport::Grpc {
            service_name: config.service_name.clone(),
        }),
        "httpupgrade" | "http-upgrade" => Some(V2RayTransport::HttpUpgrade {
            host: config.host.clone(),
            path: config.path.clone(),
        }),
        "http" | "h2" => Some(V2RayTransport::Http {
            host: crate::utils::split_csv(&config.host),
            path: config.path.clone(),
        }),
        _ => None,
    }
}

/// Convert one proxy into a sing-box outbound.
pub fn proxy_to_outbound(proxy: &Proxy, uuid: &str) -> Outbound {
    let server = ServerFields {
        tag: proxy.name.clone(),
        server: proxy.server.clone(),
        server_port: proxy.port,
    };

    match &proxy.option {
        ProtocolOption::Shadowsocks(o) => Outbound::Shadowsocks(ShadowsocksOutbound {
            server,
            method: o.method.clone(),
            password: o.password(uuid),
        }),
        ProtocolOption::Vless(o) => Outbound::VLess(VLessOutbound {
            server,
            uuid: uuid.to_string(),
            flow: o.flow.clone(),
            tls: stream_tls(&o.stream),
            transport: stream_transport(&o.stream),
        }),
        ProtocolOption::Vmess(o) => Outbound::VMess(VMessOutbound {
            server,
            uuid: uuid.to_string(),
            security: "auto".to_string(),
            alter_id: 0,
            tls: stream_tls(&o.stream),
            transport: stream_transport(&o.stream),
        }),
        ProtocolOption::Trojan(o) => Outbound::Trojan(TrojanOutbound {
            server,
            password: uuid.to_string(),
            tls: Some(tls_options(&o.stream.security_config, default_alpn)),
            transport: stream_transport(&o.stream),
        }),
        ProtocolOption::Hysteria2(o) => Outbound::Hysteria2(Hysteria2Outbound {
            server,
            server_ports: crate::utils::split_csv(&o.hop_ports)
                .into_iter()
                .map(|range| range.replace('-', ":"))
                .collect(),
            hop_interval: (!o.hop_ports.is_empty() && o.hop_interval > 0)
                .then(|| format!("{}s", o.hop_interval)),
            password: uuid.to_string(),
            obfs: (!o.obfs_password.is_empty()).then(|| Hysteria2Obfs {
                obfs_type: "salamander".to_string(),
                password: o.obfs_password.clone(),
            }),
            tls: tls_options(&o.security_config, quic_alpn),
        }),
        ProtocolOption::Tuic(o) => {
            let mut tls = tls_options(&o.security_config, quic_alpn);
            tls.disable_sni = o.disable_sni;
            Outbound::Tuic(TuicOutbound {
                server,
                uuid: uuid.to_string(),
                password: uuid.to_string(),
                congestion_control: o.congestion_controller().to_string(),
                udp_relay_mode: o.udp_relay_mode().to_string(),
                zero_rtt_handshake: o.reduce_rtt,
                tls,
            })
        }
        ProtocolOption::AnyTls(o) => Outbound::AnyTls(AnyTlsOutbound {
            server,
            password: uuid.to_string(),
            tls: tls_options(&o.security_config, default_alpn),
        }),
    }
}

fn group_to_outbound(group: &Group) -> Outbound {
    match group.group_type {
        GroupType::Select => Outbound::Selector(SelectorOutbound {
            tag: group.name.clone(),
            outbounds: group.proxies.clone(),
        }),
        GroupType::URLTest => Outbound::UrlTest(UrlTestOutbound {
            tag: group.name.clone(),
            outbounds: group.proxies.clone(),
            url: group.url.clone(),
            interval: format!("{}s", group.interval),
        }),
    }
}

/// Convert one ACL line into a sing-box route rule. Unsupported kinds give
/// `None`.
pub fn rule_to_route_rule(line: &str) -> Option<Value> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    let key = match parts[0].to_ascii_uppercase().as_str() {
        "DOMAIN" => "domain",
        "DOMAIN-SUFFIX" => "domain_suffix",
        "DOMAIN-KEYWORD" => "domain_keyword",
        "IP-CIDR" | "IP-CIDR6" => "ip_cidr",
        _ => return None,
    };
    Some(json!({ key: [parts[1]], "outbound": parts[2] }))
}

/// Render the adapter as a sing-box JSON profile.
pub fn proxy_to_sing_box(
    adapter: &Adapter,
    user: &SubscribeUser,
    _settings: &Settings,
) -> Result<String, RenderError> {
    let mut outbounds: Vec<Outbound> = adapter.groups.iter().map(group_to_outbound).collect();

    let mut seen: HashSet<&str> = adapter.groups.iter().map(|g| g.name.as_str()).collect();
    for proxy in &adapter.proxies {
        if !seen.insert(proxy.name.as_str()) {
            warn!("Duplicate outbound tag {}, skipping", proxy.name);
            continue;
        }
        outbounds.push(proxy_to_outbound(proxy, &user.uuid));
    }
    outbounds.push(Outbound::Direct(TagOnlyOutbound {
        tag: DIRECT.to_string(),
    }));
    outbounds.push(Outbound::Block(TagOnlyOutbound {
        tag: REJECT.to_string(),
    }));

    let mut rules = Vec::with_capacity(adapter.rules.len());
    for line in &adapter.rules {
        match rule_to_route_rule(line) {
            Some(rule) => rules.push(rule),
            None => debug!("sing-box cannot express rule {}, dropped", line),
        }
    }

    let mut config: Value = serde_json::from_str(SINGBOX_BASE)?;
    config["outbounds"] = serde_json::to_value(&outbounds)?;
    if !config.get("route").is_some_and(Value::is_object) {
        config["route"] = json!({});
    }
    config["route"]["rules"] = Value::Array(rules);
    config["route"]["final"] = Value::String(adapter.default.clone());

    Ok(serde_json::to_string_pretty(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_option;

    fn proxy(protocol: &str, config: &str) -> Proxy {
        Proxy {
            name: "Node".to_string(),
            server: "node.example.com".to_string(),
            port: 443,
            option: parse_option(protocol, config).unwrap(),
            country: String::new(),
            city: String::new(),
            tags: Vec::new(),
        }
    }

    fn to_json(proxy: &Proxy) -> Value {
        serde_json::to_value(proxy_to_outbound(proxy, "uuid-1")).unwrap()
    }

    #[test]
    fn test_trojan_default_alpn() {
        let value = to_json(&proxy("trojan", r#"{"security_config":{"sni":"t.example.com"}}"#));
        assert_eq!(value["type"], "trojan");
        assert_eq!(value["tag"], "Node");
        assert_eq!(value["server_port"], 443);
        assert_eq!(value["password"], "uuid-1");
        assert_eq!(value["tls"]["server_name"], "t.example.com");
        assert_eq!(value["tls"]["alpn"], json!(["h2", "http/1.1"]));
    }

    #[test]
    fn test_hysteria2_ports_and_alpn() {
        let value = to_json(&proxy(
            "hysteria2",
            r#"{"hop_ports":"20000-30000,40000-41000","hop_interval":30}"#,
        ));
        assert_eq!(value["type"], "hysteria2");
        assert_eq!(value["server_ports"], json!(["20000:30000", "40000:41000"]));
        assert_eq!(value["hop_interval"], "30s");
        assert_eq!(value["tls"]["alpn"], json!(["h3"]));
    }

    #[test]
    fn test_vless_reality_tls() {
        let value = to_json(&proxy(
            "vless",
            r#"{"flow":"xtls-rprx-vision","security":"reality","security_config":{"reality_server_addr":"www.apple.com","reality_public_key":"PK","reality_short_id":"01"},"transport":"grpc","transport_config":{"service_name":"svc"}}"#,
        ));
        assert_eq!(value["type"], "vless");
        assert_eq!(value["tls"]["server_name"], "www.apple.com");
        assert_eq!(value["tls"]["reality"]["public_key"], "PK");
        assert_eq!(value["tls"]["utls"]["fingerprint"], "chrome");
        assert_eq!(value["transport"]["type"], "grpc");
        assert_eq!(value["transport"]["service_name"], "svc");
    }

    #[test]
    fn test_plain_vmess_has_no_tls() {
        let value = to_json(&proxy("vmess", r#"{"transport":"ws","transport_config":{"path":"/ws"}}"#));
        assert!(value.get("tls").is_none());
        assert_eq!(value["transport"]["type"], "ws");
        assert_eq!(value["transport"]["path"], "/ws");
    }

    #[test]
    fn test_rule_conversion() {
        assert_eq!(
            rule_to_route_rule("DOMAIN-SUFFIX,google.com,Proxy"),
            Some(json!({"domain_suffix": ["google.com"], "outbound": "Proxy"}))
        );
        assert_eq!(
            rule_to_route_rule("IP-CIDR6,2001:db8::/32,DIRECT,no-resolve"),
            Some(json!({"ip_cidr": ["2001:db8::/32"], "outbound": "DIRECT"}))
        );
        assert_eq!(rule_to_route_rule("GEOIP,CN,DIRECT"), None);
        assert_eq!(rule_to_route_rule("MATCH,Proxy"), None);
    }
}
