use super::single::proxy_to_uri;
use super::{encode_uri_list, RenderError};
use crate::models::{Adapter, Proxy, SubscribeUser};
use crate::parser::ProtocolOption;
use crate::settings::Settings;

/// Share links understood by every URI-list client.
pub fn general_uris(adapter: &Adapter, uuid: &str) -> Vec<String> {
    adapter
        .proxies
        .iter()
        .filter(|proxy| is_general(proxy))
        .map(|proxy| proxy_to_uri(proxy, uuid))
        .collect()
}

fn is_general(proxy: &Proxy) -> bool {
    match proxy.option {
        ProtocolOption::Shadowsocks(_)
        | ProtocolOption::Vmess(_)
        | ProtocolOption::Vless(_)
        | ProtocolOption::Trojan(_)
        | ProtocolOption::Hysteria2(_) => true,
        ProtocolOption::Tuic(_) | ProtocolOption::AnyTls(_) => false,
    }
}

/// Render the adapter as a base64 list of standard share links.
pub fn proxy_to_general(
    adapter: &Adapter,
    user: &SubscribeUser,
    _settings: &Settings,
) -> Result<String, RenderError> {
    Ok(encode_uri_list(&general_uris(adapter, &user.uuid)))
}
