use log::debug;
use minijinja::context;

use super::{RenderError, TargetNodes, QUANX_SUPPORTED};
use crate::constants::{DIRECT, REJECT};
use crate::generator::config::userinfo::subscription_info;
use crate::models::{Adapter, Group, GroupType, Proxy, SubscribeUser};
use crate::parser::protocols::StreamSettings;
use crate::parser::ProtocolOption;
use crate::settings::Settings;
use crate::template::render_template;

/// QuantumultX spells the routing sentinels in lowercase.
fn policy_name(name: &str) -> &str {
    match name {
        DIRECT => "direct",
        REJECT => "reject",
        other => other,
    }
}

/// Append `obfs` keys for the stream's transport and TLS.
fn push_obfs(line: &mut String, stream: &StreamSettings, host: &str) {
    let config = &stream.transport_config;
    let security = &stream.security_config;
    let tls = stream.tls_enabled();
    match stream.network() {
        "ws" => {
            line.push_str(if tls { ", obfs=wss" } else { ", obfs=ws" });
            let obfs_host = if config.host.is_empty() {
                security.server_name(host)
            } else {
                &config.host
            };
            line.push_str(&format!(", obfs-host={}", obfs_host));
            if !config.path.is_empty() {
                line.push_str(&format!(", obfs-uri={}", config.path));
            }
        }
        _ if tls => {
            line.push_str(&format!(
                ", obfs=over-tls, obfs-host={}",
                security.server_name(host)
            ));
        }
        _ => {}
    }
    if tls {
        line.push_str(&format!(", tls-verification={}", !security.allow_insecure));
    }
}

/// One `[server_local]` line, `None` for protocols QuantumultX cannot express.
pub fn proxy_to_quan_x_line(proxy: &Proxy, uuid: &str) -> Option<String> {
    let line = match &proxy.option {
        ProtocolOption::Shadowsocks(o) => format!(
            "shadowsocks={}:{}, method={}, password={}, fast-open=false, udp-relay=true, tag={}",
            proxy.server,
            proxy.port,
            o.method,
            o.password(uuid),
            proxy.name
        ),
        ProtocolOption::Vmess(o) => {
            let mut line = format!(
                "vmess={}:{}, method=chacha20-ietf-poly1305, password={}",
                proxy.server, proxy.port, uuid
            );
            push_obfs(&mut line, &o.stream, &proxy.server);
            line.push_str(&format!(
                ", fast-open=false, udp-relay=false, aead=true, tag={}",
                proxy.name
            ));
            line
        }
        ProtocolOption::Vless(o) => {
            let mut line = format!(
                "vless={}:{}, method=none, password={}",
                proxy.server, proxy.port, uuid
            );
            push_obfs(&mut line, &o.stream, &proxy.server);
            if o.stream.is_reality() {
                let security = &o.stream.security_config;
                line.push_str(&format!(
                    ", reality-base64-pubkey={}, reality-hex-shortid={}",
                    security.reality_public_key, security.reality_short_id
                ));
            }
            if !o.flow.is_empty() {
                line.push_str(&format!(", vless-flow={}", o.flow));
            }
            line.push_str(&format!(", fast-open=false, udp-relay=false, tag={}", proxy.name));
            line
        }
        ProtocolOption::Trojan(o) => {
            let security = &o.stream.security_config;
            let mut line = format!("trojan={}:{}, password={}", proxy.server, proxy.port, uuid);
            if o.stream.network() == "ws" {
                let mut stream = o.stream.clone();
                stream.security = "tls".to_string();
                push_obfs(&mut line, &stream, &proxy.server);
            } else {
                line.push_str(&format!(
                    ", over-tls=true, tls-host={}, tls-verification={}",
                    security.server_name(&proxy.server),
                    !security.allow_insecure
                ));
            }
            line.push_str(&format!(", fast-open=false, udp-relay=false, tag={}", proxy.name));
            line
        }
        ProtocolOption::Hysteria2(_) | ProtocolOption::Tuic(_) | ProtocolOption::AnyTls(_) => {
            return None
        }
    };
    Some(line)
}

fn group_line(group: &Group, members: &[&str]) -> String {
    let members: Vec<&str> = members.iter().map(|m| policy_name(m)).collect();
    match group.group_type {
        GroupType::Select => format!("static={}, {}", group.name, members.join(", ")),
        GroupType::URLTest => format!(
            "url-latency-benchmark={}, {}, check-interval={}, tolerance=0",
            group.name,
            members.join(", "),
            group.interval
        ),
    }
}

/// Convert one ACL line into QuantumultX filter syntax.
pub fn rule_to_quan_x(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    let kind = match parts[0].to_ascii_uppercase().as_str() {
        "DOMAIN" => "host",
        "DOMAIN-SUFFIX" => "host-suffix",
        "DOMAIN-KEYWORD" => "host-keyword",
        "IP-CIDR" => "ip-cidr",
        "IP-CIDR6" => "ip6-cidr",
        "GEOIP" => "geoip",
        "USER-AGENT" => "user-agent",
        _ => return None,
    };
    Some(format!("{}, {}, {}", kind, parts[1], policy_name(parts[2])))
}

/// Render the adapter as a QuantumultX profile.
pub fn proxy_to_quan_x(
    adapter: &Adapter,
    user: &SubscribeUser,
    settings: &Settings,
) -> Result<String, RenderError> {
    let nodes = TargetNodes::split(adapter, QUANX_SUPPORTED, "QuantumultX");

    let proxies: Vec<String> = nodes
        .supported
        .iter()
        .filter_map(|proxy| proxy_to_quan_x_line(proxy, &user.uuid))
        .collect();
    let groups: Vec<String> = adapter
        .groups
        .iter()
        .map(|group| group_line(group, &nodes.members(group)))
        .collect();
    let rules: Vec<String> = adapter
        .rules
        .iter()
        .filter_map(|line| {
            let rule = rule_to_quan_x(line);
            if rule.is_none() {
                debug!("QuantumultX cannot express rule {}, dropped", line);
            }
            rule
        })
        .collect();

    Ok(render_template(
        "quantumultx.conf",
        context! {
            subscription_info => subscription_info(user, settings),
            test_url => &settings.test_url,
            proxies => proxies,
            groups => groups,
            rules => rules,
            default => policy_name(&adapter.default),
        },
    )?)
}
