//! Standard share links, one per proxy.

use serde_json::json;

use crate::models::Proxy;
use crate::parser::protocols::StreamSettings;
use crate::parser::ProtocolOption;
use crate::utils::base64::{base64_encode, url_safe_base64_encode};
use crate::utils::url::{build_query, url_encode};

fn with_query(mut uri: String, query: &str, remark: &str) -> String {
    if !query.is_empty() {
        uri.push('?');
        uri.push_str(query);
    }
    uri.push('#');
    uri.push_str(&url_encode(remark));
    uri
}

/// `security`, `type` and transport parameters shared by vless and trojan.
fn stream_params<'a>(stream: &'a StreamSettings, host: &'a str) -> Vec<(&'a str, String)> {
    let config = &stream.transport_config;
    let security = &stream.security_config;
    let mut params = vec![("type", stream.network().to_string())];

    if stream.is_reality() {
        params.push(("security", "reality".to_string()));
        params.push(("sni", security.server_name(&security.reality_server_addr).to_string()));
        params.push(("pbk", security.reality_public_key.clone()));
        params.push(("sid", security.reality_short_id.clone()));
        params.push(("fp", "chrome".to_string()));
    } else if stream.is_tls() {
        params.push(("security", "tls".to_string()));
        params.push(("sni", security.server_name(host).to_string()));
        params.push(("fp", security.fingerprint.clone()));
        params.push(("alpn", security.alpn.join(",")));
        if security.allow_insecure {
            params.push(("allowInsecure", "1".to_string()));
        }
    } else {
        params.push(("security", "none".to_string()));
    }

    match stream.network() {
        "grpc" => params.push(("serviceName", config.service_name.clone())),
        _ => {
            params.push(("host", config.host.clone()));
            params.push(("path", config.path.clone()));
        }
    }
    params
}

fn query_of(params: &[(&str, String)]) -> String {
    let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    build_query(&pairs)
}

/// `vmess://` link carrying the v2 JSON share format.
pub fn vmess_uri(proxy: &Proxy, stream: &StreamSettings, uuid: &str) -> String {
    let config = &stream.transport_config;
    let security = &stream.security_config;
    let path = if stream.network() == "grpc" {
        &config.service_name
    } else {
        &config.path
    };
    let share = json!({
        "v": "2",
        "ps": proxy.name,
        "add": proxy.server,
        "port": proxy.port.to_string(),
        "id": uuid,
        "aid": "0",
        "scy": "auto",
        "net": stream.network(),
        "type": "none",
        "host": config.host,
        "path": path,
        "tls": if stream.tls_enabled() { "tls" } else { "" },
        "sni": security.sni,
        "alpn": security.alpn.join(","),
        "fp": security.fingerprint,
    });
    format!("vmess://{}", base64_encode(&share.to_string()))
}

/// SIP002 `ss://` link.
pub fn shadowsocks_uri(proxy: &Proxy, method: &str, password: &str) -> String {
    let user_info = url_safe_base64_encode(&format!("{}:{}", method, password));
    with_query(
        format!("ss://{}@{}:{}", user_info, proxy.server, proxy.port),
        "",
        &proxy.name,
    )
}

/// Standard share link for `proxy`.
pub fn proxy_to_uri(proxy: &Proxy, uuid: &str) -> String {
    match &proxy.option {
        ProtocolOption::Shadowsocks(o) => shadowsocks_uri(proxy, &o.method, &o.password(uuid)),
        ProtocolOption::Vmess(o) => vmess_uri(proxy, &o.stream, uuid),
        ProtocolOption::Vless(o) => {
            let mut params = vec![("encryption", "none".to_string())];
            params.extend(stream_params(&o.stream, &proxy.server));
            params.push(("flow", o.flow.clone()));
            with_query(
                format!("vless://{}@{}:{}", uuid, proxy.server, proxy.port),
                &query_of(&params),
                &proxy.name,
            )
        }
        ProtocolOption::Trojan(o) => {
            let mut stream = o.stream.clone();
            if !stream.is_reality() {
                stream.security = "tls".to_string();
            }
            with_query(
                format!("trojan://{}@{}:{}", url_encode(uuid), proxy.server, proxy.port),
                &query_of(&stream_params(&stream, &proxy.server)),
                &proxy.name,
            )
        }
        ProtocolOption::Hysteria2(o) => {
            let security = &o.security_config;
            let obfs = if o.obfs_password.is_empty() { "" } else { "salamander" };
            let insecure = if security.allow_insecure { "1" } else { "" };
            with_query(
                format!("hysteria2://{}@{}:{}", url_encode(uuid), proxy.server, proxy.port),
                &build_query(&[
                    ("sni", security.server_name(&proxy.server)),
                    ("insecure", insecure),
                    ("obfs", obfs),
                    ("obfs-password", o.obfs_password.as_str()),
                    ("mport", o.hop_ports.as_str()),
                ]),
                &proxy.name,
            )
        }
        ProtocolOption::Tuic(o) => {
            let security = &o.security_config;
            let alpn = if security.alpn.is_empty() {
                "h3".to_string()
            } else {
                security.alpn.join(",")
            };
            let insecure = if security.allow_insecure { "1" } else { "" };
            let disable_sni = if o.disable_sni { "1" } else { "" };
            with_query(
                format!("tuic://{}:{}@{}:{}", uuid, url_encode(uuid), proxy.server, proxy.port),
                &build_query(&[
                    ("sni", security.server_name(&proxy.server)),
                    ("alpn", alpn.as_str()),
                    ("congestion_control", o.congestion_controller()),
                    ("udp_relay_mode", o.udp_relay_mode()),
                    ("allow_insecure", insecure),
                    ("disable_sni", disable_sni),
                ]),
                &proxy.name,
            )
        }
        ProtocolOption::AnyTls(o) => {
            let security = &o.security_config;
            let insecure = if security.allow_insecure { "1" } else { "" };
            with_query(
                format!("anytls://{}@{}:{}", url_encode(uuid), proxy.server, proxy.port),
                &build_query(&[
                    ("sni", security.server_name(&proxy.server)),
                    ("fp", security.fingerprint.as_str()),
                    ("insecure", insecure),
                ]),
                &proxy.name,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_option;
    use crate::utils::base64::base64_decode;

    fn proxy(protocol: &str, config: &str) -> Proxy {
        Proxy {
            name: "HK 01".to_string(),
            server: "hk.example.com".to_string(),
            port: 443,
            option: parse_option(protocol, config).unwrap(),
            country: String::new(),
            city: String::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_shadowsocks_sip002() {
        let uri = proxy_to_uri(&proxy("ss", r#"{"method":"aes-128-gcm"}"#), "pw");
        assert_eq!(uri, "ss://YWVzLTEyOC1nY206cHc@hk.example.com:443#HK%2001");
    }

    #[test]
    fn test_vmess_share_json() {
        let uri = proxy_to_uri(
            &proxy("vmess", r#"{"transport":"ws","transport_config":{"path":"/ws"},"security":"tls"}"#),
            "id",
        );
        let encoded = uri.strip_prefix("vmess://").unwrap();
        let share: serde_json::Value = serde_json::from_str(&base64_decode(encoded, false)).unwrap();
        assert_eq!(share["ps"], "HK 01");
        assert_eq!(share["port"], "443");
        assert_eq!(share["net"], "ws");
        assert_eq!(share["path"], "/ws");
        assert_eq!(share["tls"], "tls");
    }

    #[test]
    fn test_vless_reality_link() {
        let uri = proxy_to_uri(
            &proxy(
                "vless",
                r#"{"flow":"xtls-rprx-vision","security":"reality","security_config":{"reality_server_addr":"www.apple.com","reality_public_key":"PK","reality_short_id":"01"}}"#,
            ),
            "id",
        );
        assert_eq!(
            uri,
            "vless://id@hk.example.com:443?encryption=none&type=tcp&security=reality&sni=www.apple.com&pbk=PK&sid=01&fp=chrome&flow=xtls-rprx-vision#HK%2001"
        );
    }

    #[test]
    fn test_hysteria2_link() {
        let uri = proxy_to_uri(
            &proxy("hy2", r#"{"obfs_password":"ob","security_config":{"allow_insecure":true}}"#),
            "pw",
        );
        assert_eq!(
            uri,
            "hysteria2://pw@hk.example.com:443?sni=hk.example.com&insecure=1&obfs=salamander&obfs-password=ob#HK%2001"
        );
    }

    #[test]
    fn test_tuic_link() {
        let uri = proxy_to_uri(&proxy("tuic", "{}"), "id");
        assert_eq!(
            uri,
            "tuic://id:id@hk.example.com:443?sni=hk.example.com&alpn=h3&congestion_control=bbr&udp_relay_mode=native#HK%2001"
        );
    }
}
