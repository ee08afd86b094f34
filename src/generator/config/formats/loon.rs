use minijinja::context;

use super::{RenderError, TargetNodes, LOON_SUPPORTED};
use crate::generator::config::userinfo::subscription_info;
use crate::models::{Adapter, Group, GroupType, Proxy, SubscribeUser};
use crate::parser::protocols::StreamSettings;
use crate::parser::ProtocolOption;
use crate::settings::Settings;
use crate::template::render_template;

/// Append Loon's transport and TLS keys for a stream based proxy.
fn push_stream(line: &mut String, stream: &StreamSettings, host: &str) {
    let config = &stream.transport_config;
    match stream.network() {
        "ws" => {
            line.push_str(",transport=ws");
            if !config.path.is_empty() {
                line.push_str(&format!(",path={}", config.path));
            }
            if !config.host.is_empty() {
                line.push_str(&format!(",host={}", config.host));
            }
        }
        "http" | "h2" => {
            line.push_str(",transport=http");
            if !config.path.is_empty() {
                line.push_str(&format!(",path={}", config.path));
            }
            if !config.host.is_empty() {
                line.push_str(&format!(",host={}", config.host));
            }
        }
        _ => line.push_str(",transport=tcp"),
    }

    if stream.tls_enabled() {
        let security = &stream.security_config;
        line.push_str(&format!(
            ",over-tls=true,tls-name={},skip-cert-verify={}",
            security.server_name(host),
            security.allow_insecure
        ));
        if stream.is_reality() {
            line.push_str(&format!(
                ",public-key=\"{}\",short-id={}",
                security.reality_public_key, security.reality_short_id
            ));
        }
    }
}

/// One `[Proxy]` line, `None` for protocols Loon cannot express.
pub fn proxy_to_loon_line(proxy: &Proxy, uuid: &str) -> Option<String> {
    let mut line = match &proxy.option {
        ProtocolOption::Shadowsocks(o) => format!(
            "{} = Shadowsocks,{},{},{},\"{}\",udp=true",
            proxy.name,
            proxy.server,
            proxy.port,
            o.method,
            o.password(uuid)
        ),
        ProtocolOption::Vmess(o) => {
            let mut line = format!(
                "{} = vmess,{},{},auto,\"{}\",alterId=0",
                proxy.name, proxy.server, proxy.port, uuid
            );
            push_stream(&mut line, &o.stream, &proxy.server);
            line
        }
        ProtocolOption::Vless(o) => {
            let mut line = format!(
                "{} = VLESS,{},{},\"{}\"",
                proxy.name, proxy.server, proxy.port, uuid
            );
            push_stream(&mut line, &o.stream, &proxy.server);
            if !o.flow.is_empty() {
                line.push_str(&format!(",flow={}", o.flow));
            }
            line
        }
        ProtocolOption::Trojan(o) => {
            let security = &o.stream.security_config;
            let mut line = format!(
                "{} = trojan,{},{},\"{}\",tls-name={},skip-cert-verify={}",
                proxy.name,
                proxy.server,
                proxy.port,
                uuid,
                security.server_name(&proxy.server),
                security.allow_insecure
            );
            if o.stream.network() == "ws" {
                let config = &o.stream.transport_config;
                line.push_str(",transport=ws");
                if !config.path.is_empty() {
                    line.push_str(&format!(",path={}", config.path));
                }
                if !config.host.is_empty() {
                    line.push_str(&format!(",host={}", config.host));
                }
            }
            line
        }
        ProtocolOption::Hysteria2(o) => {
            let security = &o.security_config;
            let mut line = format!(
                "{} = Hysteria2,{},{},\"{}\",tls-name={},skip-cert-verify={}",
                proxy.name,
                proxy.server,
                proxy.port,
                uuid,
                security.server_name(&proxy.server),
                security.allow_insecure
            );
            if !o.obfs_password.is_empty() {
                line.push_str(&format!(",salamander-password={}", o.obfs_password));
            }
            line
        }
        ProtocolOption::Tuic(_) | ProtocolOption::AnyTls(_) => return None,
    };
    line.push_str(",fast-open=false");
    Some(line)
}

fn group_line(group: &Group, members: &[&str]) -> String {
    match group.group_type {
        GroupType::Select => format!("{} = select,{}", group.name, members.join(",")),
        GroupType::URLTest => format!(
            "{} = url-test,{},url={},interval={}",
            group.name,
            members.join(","),
            group.url,
            group.interval
        ),
    }
}

/// Render the adapter as a Loon profile.
pub fn proxy_to_loon(
    adapter: &Adapter,
    user: &SubscribeUser,
    settings: &Settings,
) -> Result<String, RenderError> {
    let nodes = TargetNodes::split(adapter, LOON_SUPPORTED, "Loon");

    let proxies: Vec<String> = nodes
        .supported
        .iter()
        .filter_map(|proxy| proxy_to_loon_line(proxy, &user.uuid))
        .collect();
    let groups: Vec<String> = adapter
        .groups
        .iter()
        .map(|group| group_line(group, &nodes.members(group)))
        .collect();

    Ok(render_template(
        "loon.conf",
        context! {
            subscription_info => subscription_info(user, settings),
            test_url => &settings.test_url,
            proxies => proxies,
            groups => groups,
            rules => &adapter.rules,
            default => &adapter.default,
        },
    )?)
}
