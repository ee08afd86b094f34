use minijinja::context;

use super::{RenderError, TargetNodes, SURFBOARD_SUPPORTED};
use crate::generator::config::userinfo::subscription_info;
use crate::models::{Adapter, Group, GroupType, Proxy, SubscribeUser};
use crate::parser::protocols::StreamSettings;
use crate::parser::ProtocolOption;
use crate::settings::Settings;
use crate::template::render_template;

fn push_ws(line: &mut String, stream: &StreamSettings) {
    if stream.network() != "ws" {
        return;
    }
    let config = &stream.transport_config;
    line.push_str(", ws=true");
    if !config.path.is_empty() {
        line.push_str(&format!(", ws-path={}", config.path));
    }
    if !config.host.is_empty() {
        line.push_str(&format!(", ws-headers=Host:\"{}\"", config.host));
    }
}

/// One `[Proxy]` line, `None` for protocols Surfboard cannot express.
pub fn proxy_to_surfboard_line(proxy: &Proxy, uuid: &str) -> Option<String> {
    let line = match &proxy.option {
        ProtocolOption::Shadowsocks(o) => format!(
            "{} = ss, {}, {}, encrypt-method={}, password={}, udp-relay=true",
            proxy.name,
            proxy.server,
            proxy.port,
            o.method,
            o.password(uuid)
        ),
        ProtocolOption::Vmess(o) => {
            let mut line = format!(
                "{} = vmess, {}, {}, username={}",
                proxy.name, proxy.server, proxy.port, uuid
            );
            push_ws(&mut line, &o.stream);
            if o.stream.is_tls() {
                let security = &o.stream.security_config;
                line.push_str(&format!(
                    ", tls=true, sni={}, skip-cert-verify={}",
                    security.server_name(&proxy.server),
                    security.allow_insecure
                ));
            }
            line.push_str(", vmess-aead=true");
            line
        }
        ProtocolOption::Trojan(o) => {
            let security = &o.stream.security_config;
            let mut line = format!(
                "{} = trojan, {}, {}, password={}, sni={}, skip-cert-verify={}",
                proxy.name,
                proxy.server,
                proxy.port,
                uuid,
                security.server_name(&proxy.server),
                security.allow_insecure
            );
            push_ws(&mut line, &o.stream);
            line
        }
        ProtocolOption::Vless(_)
        | ProtocolOption::Hysteria2(_)
        | ProtocolOption::Tuic(_)
        | ProtocolOption::AnyTls(_) => return None,
    };
    Some(line)
}

fn group_line(group: &Group, members: &[&str]) -> String {
    match group.group_type {
        GroupType::Select => format!("{} = select, {}", group.name, members.join(", ")),
        GroupType::URLTest => format!(
            "{} = url-test, {}, url={}, interval={}",
            group.name,
            members.join(", "),
            group.url,
            group.interval
        ),
    }
}

/// Render the adapter as a Surfboard profile.
pub fn proxy_to_surfboard(
    adapter: &Adapter,
    user: &SubscribeUser,
    settings: &Settings,
) -> Result<String, RenderError> {
    let nodes = TargetNodes::split(adapter, SURFBOARD_SUPPORTED, "Surfboard");

    let proxies: Vec<String> = nodes
        .supported
        .iter()
        .filter_map(|proxy| proxy_to_surfboard_line(proxy, &user.uuid))
        .collect();
    let groups: Vec<String> = adapter
        .groups
        .iter()
        .map(|group| group_line(group, &nodes.members(group)))
        .collect();

    Ok(render_template(
        "surfboard.conf",
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

    #[test]
    fn test_vmess_ws_tls_line() {
        let line = proxy_to_surfboard_line(
            &proxy(
                "vmess",
                r#"{"transport":"ws","transport_config":{"path":"/ws","host":"h.example.com"},"security":"tls","security_config":{"sni":"s.example.com"}}"#,
            ),
            "id",
        )
        .unwrap();
        assert_eq!(
            line,
            "Node = vmess, node.example.com, 443, username=id, ws=true, ws-path=/ws, ws-headers=Host:\"h.example.com\", tls=true, sni=s.example.com, skip-cert-verify=false, vmess-aead=true"
        );
    }

    #[test]
    fn test_unsupported_protocols() {
        assert!(proxy_to_surfboard_line(&proxy("vless", "{}"), "id").is_none());
        assert!(proxy_to_surfboard_line(&proxy("hysteria2", "{}"), "id").is_none());
    }
}
