use serde::Serialize;

use crate::models::{Group, GroupType};

/// A proxy group in Clash configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ClashProxyGroup {
    #[serde(rename = "select")]
    Select { name: String, proxies: Vec<String> },
    #[serde(rename = "url-test")]
    UrlTest {
        name: String,
        proxies: Vec<String>,
        url: String,
        interval: u32,
    },
}

impl From<&Group> for ClashProxyGroup {
    fn from(group: &Group) -> Self {
        match group.group_type {
            GroupType::Select => ClashProxyGroup::Select {
                name: group.name.clone(),
                proxies: group.proxies.clone(),
            },
            GroupType::URLTest => ClashProxyGroup::UrlTest {
                name: group.name.clone(),
                proxies: group.proxies.clone(),
                url: group.url.clone(),
                interval: group.interval,
            },
        }
    }
}
