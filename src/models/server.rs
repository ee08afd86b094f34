//! Server records as supplied by the data layer.

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::settings::deserializer::{deserialize_raw_json, deserialize_relay_nodes};
use crate::utils::split_csv;

/// How one server is exposed to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelayMode {
    /// Connect to the server directly.
    #[default]
    None,
    /// One proxy per relay front-end.
    All,
    /// One proxy through a relay picked at build time.
    Random,
}

impl From<String> for RelayMode {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => RelayMode::All,
            "random" => RelayMode::Random,
            _ => RelayMode::None,
        }
    }
}

impl From<RelayMode> for String {
    fn from(mode: RelayMode) -> Self {
        match mode {
            RelayMode::None => "none",
            RelayMode::All => "all",
            RelayMode::Random => "random",
        }
        .to_string()
    }
}

/// An alternate front-end for a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeRelay {
    pub host: String,
    pub port: u16,
    pub prefix: String,
}

/// A backend server with its protocol config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: i64,
    pub name: String,
    pub server_addr: String,
    /// 0 means "use the port from the protocol config".
    pub port: u16,
    pub protocol: String,
    #[serde(deserialize_with = "deserialize_raw_json")]
    pub config: String,
    pub relay_mode: RelayMode,
    #[serde(deserialize_with = "deserialize_relay_nodes")]
    pub relay_node: Vec<NodeRelay>,
    pub country: String,
    pub city: String,
    /// Comma separated tag names.
    pub tags: String,
}

impl Server {
    pub fn tag_list(&self) -> Vec<String> {
        split_csv(&self.tags)
    }
}

/// Ordered tag name to server list map used for ad-hoc group membership.
pub type TagMap = LinkedHashMap<String, Vec<Server>>;

/// Group servers by their own `tags`, in first-seen tag order.
pub fn tag_map_from_servers(servers: &[Server]) -> TagMap {
    let mut map = TagMap::new();
    for server in servers {
        for tag in server.tag_list() {
            map.entry(tag).or_insert_with(Vec::new).push(server.clone());
        }
    }
    map
}
