//! Client detection from the subscription request's User-Agent.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ClientTarget;

lazy_static! {
    /// Checked in order, first match wins.
    static ref USER_AGENT_TARGETS: Vec<(Regex, ClientTarget)> = vec![
        (r"(?i)quantumult(%20| )?x", ClientTarget::QuantumultX),
        (r"(?i)shadowrocket", ClientTarget::Shadowrocket),
        (r"(?i)surfboard", ClientTarget::Surfboard),
        (r"(?i)loon", ClientTarget::Loon),
        (r"(?i)sing-?box|^SF[AIMT]/", ClientTarget::SingBox),
        (r"(?i)clash|mihomo|stash", ClientTarget::Clash),
        (r"(?i)v2rayn", ClientTarget::V2rayN),
        (r"(?i)vproxy", ClientTarget::Vproxy),
    ]
    .into_iter()
    .filter_map(|(pattern, target)| Regex::new(pattern).ok().map(|re| (re, target)))
    .collect();
}

/// Detect the client from a User-Agent string.
///
/// Unknown agents get the generic base64 list, which every client accepts.
pub fn match_user_agent(user_agent: &str) -> ClientTarget {
    USER_AGENT_TARGETS
        .iter()
        .find(|(re, _)| re.is_match(user_agent))
        .map(|(_, target)| *target)
        .unwrap_or(ClientTarget::General)
}
