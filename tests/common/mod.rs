#![allow(dead_code)]

use subcompiler::models::{NodeRelay, RelayMode};
use subcompiler::{RuleGroup, RuleGroupType, Server, SubscribeUser};

pub const UUID: &str = "0b6c5bd4-3e0f-4c2f-9d7a-7f3b1c2d4e5f";

pub fn server(id: i64, name: &str, protocol: &str, config: &str) -> Server {
    Server {
        id,
        name: name.to_string(),
        server_addr: format!("{}.example.com", name.to_lowercase()),
        protocol: protocol.to_string(),
        config: config.to_string(),
        ..Default::default()
    }
}

pub fn relay(host: &str, port: u16, prefix: &str) -> NodeRelay {
    NodeRelay {
        host: host.to_string(),
        port,
        prefix: prefix.to_string(),
    }
}

/// One server per protocol, all reachable directly.
pub fn every_protocol() -> Vec<Server> {
    vec![
        server(1, "SS", "shadowsocks", r#"{"port":8388,"method":"aes-128-gcm"}"#),
        server(
            2,
            "VMess",
            "vmess",
            r#"{"port":443,"transport":"ws","transport_config":{"path":"/ws","host":"cdn.example.com"},"security":"tls"}"#,
        ),
        server(
            3,
            "VLESS",
            "vless",
            r#"{"port":443,"flow":"xtls-rprx-vision","security":"reality","security_config":{"sni":"www.microsoft.com","reality_public_key":"pbk","reality_short_id":"ab"}}"#,
        ),
        server(4, "Trojan", "trojan", r#"{"port":443,"security":"tls"}"#),
        server(5, "Hy2", "hysteria2", r#"{"port":8443,"obfs_password":"secret"}"#),
        server(6, "TUIC", "tuic", r#"{"port":9443}"#),
        server(7, "AnyTLS", "anytls", r#"{"port":8443}"#),
    ]
}

/// The A/B/C scenario: a direct shadowsocks server, a vmess server behind
/// two relays and a server with an unknown protocol.
pub fn relay_scenario() -> Vec<Server> {
    let a = server(1, "A", "shadowsocks", r#"{"port":8388,"method":"aes-128-gcm"}"#);
    let mut b = server(2, "B", "vmess", r#"{"port":443}"#);
    b.relay_mode = RelayMode::All;
    b.relay_node = vec![
        relay("hk.relay.example.com", 10443, "HK"),
        relay("us.relay.example.com", 20443, "US"),
    ];
    let c = server(3, "C", "wireguard", r#"{"port":51820}"#);
    vec![a, b, c]
}

pub fn rule_group(name: &str, rule_type: RuleGroupType, tags: &str, rules: &str) -> RuleGroup {
    RuleGroup {
        name: name.to_string(),
        rule_type,
        tags: tags.to_string(),
        rules: rules.to_string(),
        default: false,
    }
}

pub fn user() -> SubscribeUser {
    SubscribeUser {
        uuid: UUID.to_string(),
        upload: 1 << 30,
        download: 2 << 30,
        traffic: 100 << 30,
        expire_time: 1_893_456_000,
    }
}
