use serde::{Deserialize, Serialize};

use crate::utils::split_csv;

/// Policy kind of a routing rule group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleGroupType {
    /// Reject matched traffic.
    Ban,
    /// Latency-tested selection.
    Auto,
    /// Manual selection; also used for unrecognised types.
    #[default]
    Manual,
}

impl From<String> for RuleGroupType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "ban" => RuleGroupType::Ban,
            "auto" => RuleGroupType::Auto,
            _ => RuleGroupType::Manual,
        }
    }
}

impl From<RuleGroupType> for String {
    fn from(t: RuleGroupType) -> Self {
        match t {
            RuleGroupType::Ban => "ban",
            RuleGroupType::Auto => "auto",
            RuleGroupType::Manual => "manual",
        }
        .to_string()
    }
}

/// Externally authored routing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleGroupType,
    /// Comma separated member names.
    pub tags: String,
    /// Newline separated ACL lines, e.g. `DOMAIN-SUFFIX,google.com,Proxy`.
    pub rules: String,
    pub default: bool,
}

impl RuleGroup {
    pub fn members(&self) -> Vec<String> {
        split_csv(&self.tags)
    }

    /// Non-empty, trimmed rule lines.
    pub fn rule_lines(&self) -> impl Iterator<Item = &str> {
        self.rules
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}
