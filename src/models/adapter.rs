use crate::models::{Group, Proxy};

/// Render-ready aggregate of proxies, sorted groups and rules.
///
/// Built once per request by
/// [`build_adapter`](crate::generator::config::subexport::build_adapter) and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adapter {
    pub proxies: Vec<Proxy>,
    /// Groups in final client order.
    pub groups: Vec<Group>,
    /// ACL lines in rule group order, without the catch-all.
    pub rules: Vec<String>,
    /// De-duplicated proxy names.
    pub nodes: Vec<String>,
    /// Name of the default group used by the catch-all rule.
    pub default: String,
}

impl Adapter {
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn proxy(&self, name: &str) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.name == name)
    }
}
