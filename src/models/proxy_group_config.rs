use crate::constants::{DIRECT, REJECT};

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    Select,
    URLTest,
}

impl GroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Select => "select",
            GroupType::URLTest => "url-test",
        }
    }
}

/// A named bundle of proxy names with a selection policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Name of the group
    pub name: String,
    /// Selection policy
    pub group_type: GroupType,
    /// Member proxy names, group names or `DIRECT` / `REJECT`
    pub proxies: Vec<String>,
    /// URL for latency testing
    pub url: String,
    /// Interval in seconds between tests
    pub interval: u32,
    /// Pure allow/reject group without live testing
    pub direct: bool,
}

impl Group {
    pub fn select(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_type: GroupType::Select,
            proxies: Vec::new(),
            url: String::new(),
            interval: 0,
            direct: false,
        }
    }

    pub fn url_test(name: impl Into<String>, url: &str, interval: u32) -> Self {
        Self {
            url: url.to_string(),
            interval,
            group_type: GroupType::URLTest,
            ..Self::select(name)
        }
    }

    /// A reject-first group for blocked traffic.
    pub fn ban(name: impl Into<String>) -> Self {
        Self {
            proxies: vec![REJECT.to_string(), DIRECT.to_string()],
            direct: true,
            ..Self::select(name)
        }
    }

    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.proxies.iter().any(|p| p == member)
    }

    /// Append `member` unless it is already present.
    pub fn push_unique(&mut self, member: &str) {
        if !self.contains(member) {
            self.proxies.push(member.to_string());
        }
    }

    /// Remove every occurrence of `member`.
    pub fn remove(&mut self, member: &str) {
        self.proxies.retain(|p| p != member);
    }

    /// Drop repeated members, keeping first occurrences.
    pub fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.proxies.retain(|p| seen.insert(p.clone()));
    }
}
