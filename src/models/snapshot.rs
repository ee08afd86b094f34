//! A full input snapshot as read by the command line tool.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{tag_map_from_servers, RuleGroup, Server, SubscribeUser, TagMap};
use crate::settings::{load_document, SettingsError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub servers: Vec<Server>,
    pub rule_groups: Vec<RuleGroup>,
    /// Explicit tag overrides; derived from server tags when absent.
    pub tags: Option<TagMap>,
    pub user: SubscribeUser,
}

impl Snapshot {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load_document(path.as_ref())
    }

    pub fn tag_map(&self) -> TagMap {
        match &self.tags {
            Some(tags) => tags.clone(),
            None => tag_map_from_servers(&self.servers),
        }
    }
}
