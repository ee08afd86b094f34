use std::collections::{BTreeMap, HashSet};

use log::warn;
use minijinja::context;

use super::RenderError;
use crate::generator::yaml::clash_output::{
    ClashProxy, ClashProxyCommon, CommonProxyOptions, GrpcOptions, RealityOptions,
    TransportOptions, WsOptions,
};
use crate::generator::yaml::proxy_group_output::ClashProxyGroup;
use crate::models::{Adapter, Proxy, SubscribeUser};
use crate::parser::protocols::StreamSettings;
use crate::parser::ProtocolOption;
use crate::settings::Settings;
use crate::template::render_template;

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Map a stream transport onto Clash's `network` and `*-opts` keys.
fn transport_options(stream: &StreamSettings) -> TransportOptions {
    let config = &stream.transport_config;
    let ws = |http_upgrade: bool| {
        let mut headers = BTreeMap::new();
        if !config.host.is_empty() {
            headers.insert("Host".to_string(), config.host.clone());
        }
        WsOptions {
            path: config.path.clone(),
            headers,
            v2ray_http_upgrade: http_upgrade,
        }
    };

    match stream.network() {
        "ws" => TransportOptions {
            network: Some("ws".to_string()),
            ws_opts: Some(ws(false)),
            grpc_opts: None,
        },
        "httpupgrade" | "http-upgrade" => TransportOptions {
            network: Some("ws".to_string()),
            ws_opts: Some(ws(true)),
            grpc_opts: None,
        },
        "grpc" => TransportOptions {
            network: Some("grpc".to_string()),
            ws_opts: None,
            grpc_opts: Some(GrpcOptions {
                grpc_service_name: config.service_name.clone(),
            }),
        },
        _ => TransportOptions::default(),
    }
}

/// Convert one proxy into its Clash representation.
pub fn proxy_to_clash_proxy(proxy: &Proxy, uuid: &str) -> ClashProxy {
    let builder = CommonProxyOptions::builder(proxy.name.clone(), proxy.server.clone(), proxy.port);

    match &proxy.option {
        ProtocolOption::Shadowsocks(o) => ClashProxy::Shadowsocks {
            common: builder.udp(true).build(),
            cipher: o.method.clone(),
            password: o.password(uuid),
        },
        ProtocolOption::Vmess(o) => {
            let security = &o.stream.security_config;
            let mut builder = builder.udp(true).tls(o.stream.tls_enabled());
            if o.stream.tls_enabled() {
                builder = builder.skip_cert_verify(security.allow_insecure);
            }
            if !security.fingerprint.is_empty() {
                builder = builder.client_fingerprint(&security.fingerprint);
            }
            ClashProxy::VMess {
                common: builder.build(),
                uuid: uuid.to_string(),
                alter_id: 0,
                cipher: "auto".to_string(),
                servername: non_empty(&security.sni),
                transport: transport_options(&o.stream),
            }
        }
        ProtocolOption::Vless(o) => {
            let security = &o.stream.security_config;
            let mut builder = builder.udp(true).tls(o.stream.tls_enabled());
            if o.stream.is_tls() {
                builder = builder.skip_cert_verify(security.allow_insecure);
            }
            if o.stream.tls_enabled() {
                let fingerprint = match security.fingerprint.as_str() {
                    "" => "chrome",
                    fp => fp,
                };
                builder = builder.client_fingerprint(fingerprint);
            }
            let reality_opts = o.stream.is_reality().then(|| RealityOptions {
                public_key: security.reality_public_key.clone(),
                short_id: security.reality_short_id.clone(),
            });
            let servername = if o.stream.is_reality() && security.sni.is_empty() {
                non_empty(&security.reality_server_addr)
            } else {
                non_empty(&security.sni)
            };
            ClashProxy::Vless {
                common: builder.build(),
                uuid: uuid.to_string(),
                flow: non_empty(&o.flow),
                servername,
                reality_opts,
                transport: transport_options(&o.stream),
            }
        }
        ProtocolOption::Trojan(o) => {
            let security = &o.stream.security_config;
            let mut builder = builder
                .udp(true)
                .skip_cert_verify(security.allow_insecure);
            if !security.fingerprint.is_empty() {
                builder = builder.client_fingerprint(&security.fingerprint);
            }
            ClashProxy::Trojan {
                common: builder.build(),
                password: uuid.to_string(),
                sni: non_empty(&security.sni),
                transport: transport_options(&o.stream),
            }
        }
        ProtocolOption::Hysteria2(o) => {
            let security = &o.security_config;
            ClashProxy::Hysteria2 {
                common: builder
                    .udp(true)
                    .skip_cert_verify(security.allow_insecure)
                    .build(),
                password: uuid.to_string(),
                ports: non_empty(&o.hop_ports),
                hop_interval: (!o.hop_ports.is_empty() && o.hop_interval > 0)
                    .then_some(o.hop_interval),
                obfs: (!o.obfs_password.is_empty()).then(|| "salamander".to_string()),
                obfs_password: non_empty(&o.obfs_password),
                sni: non_empty(&security.sni),
                alpn: security.alpn.clone(),
            }
        }
        ProtocolOption::Tuic(o) => {
            let security = &o.security_config;
            let alpn = if security.alpn.is_empty() {
                vec!["h3".to_string()]
            } else {
                security.alpn.clone()
            };
            ClashProxy::Tuic {
                common: builder
                    .udp(true)
                    .skip_cert_verify(security.allow_insecure)
                    .build(),
                uuid: uuid.to_string(),
                password: uuid.to_string(),
                congestion_controller: o.congestion_controller().to_string(),
                udp_relay_mode: o.udp_relay_mode().to_string(),
                reduce_rtt: o.reduce_rtt,
                disable_sni: o.disable_sni,
                sni: non_empty(&security.sni),
                alpn,
            }
        }
        ProtocolOption::AnyTls(o) => {
            let security = &o.security_config;
            let mut builder = builder
                .udp(true)
                .skip_cert_verify(security.allow_insecure);
            if !security.fingerprint.is_empty() {
                builder = builder.client_fingerprint(&security.fingerprint);
            }
            ClashProxy::AnyTls {
                common: builder.build(),
                password: uuid.to_string(),
                sni: non_empty(&security.sni),
                alpn: security.alpn.clone(),
            }
        }
    }
}

/// Render the adapter as a Clash (mihomo) YAML profile.
pub fn proxy_to_clash(
    adapter: &Adapter,
    user: &SubscribeUser,
    _settings: &Settings,
) -> Result<String, RenderError> {
    let mut seen = HashSet::new();
    let mut proxies = Vec::with_capacity(adapter.proxies.len());
    for proxy in &adapter.proxies {
        let clash_proxy = proxy_to_clash_proxy(proxy, &user.uuid);
        if !seen.insert(clash_proxy.name().to_string()) {
            warn!("Duplicate proxy name {}, skipping", proxy.name);
            continue;
        }
        proxies.push(clash_proxy);
    }

    let proxy_groups: Vec<ClashProxyGroup> = adapter.groups.iter().map(Into::into).collect();

    let mut rules = adapter.rules.clone();
    rules.push(format!("MATCH,{}", adapter.default));

    Ok(render_template(
        "clash.yaml",
        context! {
            proxies => proxies,
            proxy_groups => proxy_groups,
            rules => rules,
        },
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_option;

    const UUID: &str = "0b6c5bd4-3e0f-4c2f-9d7a-7f3b1c2d4e5f";

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

    fn to_yaml(proxy: &Proxy) -> serde_yaml::Value {
        serde_yaml::to_value(proxy_to_clash_proxy(proxy, UUID)).unwrap()
    }

    #[test]
    fn test_vless_reality() {
        let value = to_yaml(&proxy(
            "vless",
            r#"{"flow":"xtls-rprx-vision","security":"reality","security_config":{"sni":"www.apple.com","reality_public_key":"PUBKEY","reality_short_id":"ab12"}}"#,
        ));
        assert_eq!(value["type"], "vless");
        assert_eq!(value["uuid"], UUID);
        assert_eq!(value["tls"], true);
        assert_eq!(value["flow"], "xtls-rprx-vision");
        assert_eq!(value["servername"], "www.apple.com");
        assert_eq!(value["client-fingerprint"], "chrome");
        assert_eq!(value["reality-opts"]["public-key"], "PUBKEY");
        assert_eq!(value["reality-opts"]["short-id"], "ab12");
    }

    #[test]
    fn test_vmess_websocket() {
        let value = to_yaml(&proxy(
            "vmess",
            r#"{"transport":"ws","transport_config":{"path":"/ray","host":"cdn.example.com"},"security":"tls"}"#,
        ));
        assert_eq!(value["type"], "vmess");
        assert_eq!(value["alterId"], 0);
        assert_eq!(value["cipher"], "auto");
        assert_eq!(value["network"], "ws");
        assert_eq!(value["ws-opts"]["path"], "/ray");
        assert_eq!(value["ws-opts"]["headers"]["Host"], "cdn.example.com");
    }

    #[test]
    fn test_shadowsocks_2022_password() {
        let value = to_yaml(&proxy(
            "shadowsocks",
            r#"{"method":"2022-blake3-aes-128-gcm","server_key":"c2VydmVy"}"#,
        ));
        assert_eq!(value["type"], "ss");
        assert_eq!(value["cipher"], "2022-blake3-aes-128-gcm");
        let password = value["password"].as_str().unwrap();
        assert!(password.starts_with("c2VydmVy:"));
    }

    #[test]
    fn test_hysteria2_obfs() {
        let value = to_yaml(&proxy(
            "hysteria2",
            r#"{"hop_ports":"20000-30000","hop_interval":30,"obfs_password":"secret","security_config":{"sni":"hy.example.com","allow_insecure":true}}"#,
        ));
        assert_eq!(value["type"], "hysteria2");
        assert_eq!(value["ports"], "20000-30000");
        assert_eq!(value["hop-interval"], 30);
        assert_eq!(value["obfs"], "salamander");
        assert_eq!(value["obfs-password"], "secret");
        assert_eq!(value["skip-cert-verify"], true);
    }

    #[test]
    fn test_tuic_defaults() {
        let value = to_yaml(&proxy("tuic", r#"{"port":443}"#));
        assert_eq!(value["type"], "tuic");
        assert_eq!(value["password"], UUID);
        assert_eq!(value["congestion-controller"], "bbr");
        assert_eq!(value["udp-relay-mode"], "native");
        assert_eq!(value["alpn"][0], "h3");
    }
}
