use super::single::proxy_to_uri;
use super::{encode_uri_list, RenderError};
use crate::models::{Adapter, SubscribeUser};
use crate::settings::Settings;

/// Render the adapter for V2rayN, which also takes `tuic://` and `anytls://`.
pub fn proxy_to_v2rayn(
    adapter: &Adapter,
    user: &SubscribeUser,
    _settings: &Settings,
) -> Result<String, RenderError> {
    let uris: Vec<String> = adapter
        .proxies
        .iter()
        .map(|proxy| proxy_to_uri(proxy, &user.uuid))
        .collect();
    Ok(encode_uri_list(&uris))
}
