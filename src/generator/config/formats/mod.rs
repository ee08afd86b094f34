//! One renderer per client format.
//!
//! Every renderer takes the finished [`Adapter`](crate::models::Adapter) and
//! never mutates it, so a failure in one target cannot affect another.

pub mod clash;
pub mod general;
pub mod loon;
pub mod quanx;
pub mod shadowrocket;
pub mod singbox;
pub mod single;
pub mod surfboard;
pub mod v2rayn;
pub mod vproxy;

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::constants::DIRECT;
use crate::models::{Adapter, Group, Proxy, ProxyTypes};

pub use clash::proxy_to_clash;
pub use general::proxy_to_general;
pub use loon::proxy_to_loon;
pub use quanx::proxy_to_quan_x;
pub use shadowrocket::proxy_to_shadowrocket;
pub use singbox::proxy_to_sing_box;
pub use surfboard::proxy_to_surfboard;
pub use v2rayn::proxy_to_v2rayn;
pub use vproxy::proxy_to_vproxy;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub const LOON_SUPPORTED: ProxyTypes = ProxyTypes::SHADOWSOCKS
    .union(ProxyTypes::VMESS)
    .union(ProxyTypes::VLESS)
    .union(ProxyTypes::TROJAN)
    .union(ProxyTypes::HYSTERIA2);

pub const SURFBOARD_SUPPORTED: ProxyTypes = ProxyTypes::SHADOWSOCKS
    .union(ProxyTypes::VMESS)
    .union(ProxyTypes::TROJAN);

pub const QUANX_SUPPORTED: ProxyTypes = ProxyTypes::SHADOWSOCKS
    .union(ProxyTypes::VMESS)
    .union(ProxyTypes::VLESS)
    .union(ProxyTypes::TROJAN);

/// Proxies a target can express, plus the names of those it cannot.
pub(crate) struct TargetNodes<'a> {
    pub supported: Vec<&'a Proxy>,
    pub removed: HashSet<&'a str>,
}

impl<'a> TargetNodes<'a> {
    pub fn split(adapter: &'a Adapter, support: ProxyTypes, target: &str) -> Self {
        let mut supported = Vec::new();
        let mut removed = HashSet::new();
        for proxy in &adapter.proxies {
            if support.supports(proxy.protocol()) {
                supported.push(proxy);
            } else {
                debug!(
                    "{} does not support {}, dropping {}",
                    target,
                    proxy.protocol().as_str(),
                    proxy.name
                );
                removed.insert(proxy.name.as_str());
            }
        }
        TargetNodes { supported, removed }
    }

    /// Group members with removed proxies left out. A group left empty
    /// routes to `DIRECT`.
    pub fn members(&self, group: &'a Group) -> Vec<&'a str> {
        let members: Vec<&str> = group
            .proxies
            .iter()
            .map(String::as_str)
            .filter(|m| !self.removed.contains(m))
            .collect();
        if members.is_empty() {
            vec![DIRECT]
        } else {
            members
        }
    }
}

/// Join URIs with CRLF and base64 the result, as URI-list clients expect.
pub(crate) fn encode_uri_list(lines: &[String]) -> String {
    crate::utils::base64::base64_encode(&lines.join("\r\n"))
}
