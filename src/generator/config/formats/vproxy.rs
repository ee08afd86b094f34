use super::general::general_uris;
use super::{encode_uri_list, RenderError};
use crate::generator::config::userinfo::remaining_summary;
use crate::models::{Adapter, SubscribeUser};
use crate::settings::Settings;

/// Render the adapter for vproxy: a traffic summary line, then the general
/// share links.
pub fn proxy_to_vproxy(
    adapter: &Adapter,
    user: &SubscribeUser,
    settings: &Settings,
) -> Result<String, RenderError> {
    let mut lines = vec![remaining_summary(user, settings)];
    lines.extend(general_uris(adapter, &user.uuid));
    Ok(encode_uri_list(&lines))
}
