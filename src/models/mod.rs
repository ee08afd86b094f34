//! Core data models for the application
//!
//! Input records (servers, rule groups, the subscriber) and the canonical
//! intermediate representation (proxies, groups, the adapter) live here,
//! separated from the logic that operates on them.

mod adapter;
mod client_target;
mod proxy;
mod proxy_group_config;
mod rule_group;
mod server;
mod snapshot;
mod subscribe_user;

pub use adapter::Adapter;
pub use client_target::ClientTarget;
pub use proxy::{Proxy, ProxyType, ProxyTypes};
pub use proxy_group_config::{Group, GroupType};
pub use rule_group::{RuleGroup, RuleGroupType};
pub use server::{tag_map_from_servers, NodeRelay, RelayMode, Server, TagMap};
pub use snapshot::Snapshot;
pub use subscribe_user::SubscribeUser;
