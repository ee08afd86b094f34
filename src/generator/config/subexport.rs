//! Adapter assembly and per-target rendering.

use std::collections::HashSet;

use log::{error, info, warn};

use super::formats::{
    proxy_to_clash, proxy_to_general, proxy_to_loon, proxy_to_quan_x, proxy_to_shadowrocket,
    proxy_to_sing_box, proxy_to_surfboard, proxy_to_v2rayn, proxy_to_vproxy, RenderError,
};
use super::group::{compose_groups, ComposedGroups};
use super::sort::sort_groups;
use crate::constants::{DIRECT, SELECTION};
use crate::generator::node_manip::expand_servers_indexed;
use crate::models::{Adapter, ClientTarget, RuleGroup, Server, SubscribeUser, TagMap};
use crate::settings::Settings;

/// Name of the default group: the first rule group flagged `default`, else
/// the configured fallback.
pub fn default_group_name(rule_groups: &[RuleGroup], settings: &Settings) -> String {
    let mut defaults = rule_groups.iter().filter(|g| g.default);
    match defaults.next() {
        Some(group) => {
            if let Some(extra) = defaults.next() {
                warn!(
                    "Rule groups {} and {} are both marked default, using {}",
                    group.name, extra.name, group.name
                );
            }
            group.name.clone()
        }
        None => settings.fallback_default_group.clone(),
    }
}

/// Expand servers, compose and sort groups, and collect everything a
/// renderer needs.
pub fn build_adapter(
    servers: &[Server],
    rule_groups: &[RuleGroup],
    tags: &TagMap,
    settings: &Settings,
) -> Adapter {
    let (proxies, expanded) = expand_servers_indexed(servers);
    let default = default_group_name(rule_groups, settings);

    let ComposedGroups { groups, rules } =
        compose_groups(&proxies, rule_groups, tags, &expanded, settings);
    let default = if groups.iter().any(|g| g.name == default) {
        default
    } else {
        let replacement = if groups.iter().any(|g| g.name == SELECTION) {
            SELECTION
        } else {
            DIRECT
        };
        warn!(
            "Default group {} does not exist, routing the catch-all to {}",
            default, replacement
        );
        replacement.to_string()
    };
    let groups = sort_groups(groups, &default);

    let mut seen = HashSet::new();
    let nodes: Vec<String> = proxies
        .iter()
        .filter(|p| seen.insert(p.name.as_str()))
        .map(|p| p.name.clone())
        .collect();

    info!(
        "Built adapter: {} proxies from {} servers, {} groups, {} rules, default {}",
        proxies.len(),
        servers.len(),
        groups.len(),
        rules.len(),
        default
    );

    Adapter {
        proxies,
        groups,
        rules,
        nodes,
        default,
    }
}

/// Render `adapter` for `target`.
pub fn render(
    target: ClientTarget,
    adapter: &Adapter,
    user: &SubscribeUser,
    settings: &Settings,
) -> Result<String, RenderError> {
    let renderer: fn(&Adapter, &SubscribeUser, &Settings) -> Result<String, RenderError> =
        match target {
            ClientTarget::Clash => proxy_to_clash,
            ClientTarget::SingBox => proxy_to_sing_box,
            ClientTarget::Loon => proxy_to_loon,
            ClientTarget::Surfboard => proxy_to_surfboard,
            ClientTarget::QuantumultX => proxy_to_quan_x,
            ClientTarget::Shadowrocket => proxy_to_shadowrocket,
            ClientTarget::V2rayN => proxy_to_v2rayn,
            ClientTarget::General => proxy_to_general,
            ClientTarget::Vproxy => proxy_to_vproxy,
        };
    renderer(adapter, user, settings).map_err(|e| {
        error!("Rendering {} failed: {}", target, e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_group(name: &str, default: bool) -> RuleGroup {
        RuleGroup {
            name: name.to_string(),
            default,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_group_name() {
        let settings = Settings::default();
        assert_eq!(default_group_name(&[], &settings), "Auto Select");
        assert_eq!(
            default_group_name(&[rule_group("A", false), rule_group("B", true)], &settings),
            "B"
        );
        assert_eq!(
            default_group_name(&[rule_group("A", true), rule_group("B", true)], &settings),
            "A"
        );
    }

    #[test]
    fn test_empty_input_renders_everywhere() {
        let adapter = build_adapter(&[], &[], &TagMap::new(), &Settings::default());
        assert!(adapter.proxies.is_empty());
        assert_eq!(adapter.groups.len(), 1);
        assert_eq!(adapter.default, "Selection");
        for target in ClientTarget::ALL {
            assert!(
                render(target, &adapter, &SubscribeUser::default(), &Settings::default()).is_ok(),
                "{}",
                target
            );
        }
    }
}
