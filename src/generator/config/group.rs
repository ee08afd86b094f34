//! Group composition
//!
//! Builds the unsorted group set from the proxies, the routing rule groups
//! and the tag overrides. Membership is only mutated here; renderers never
//! touch it.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::constants::{is_sentinel, AUTO_SELECT, DIRECT, MANUAL_SELECTION, SELECTION};
use crate::generator::node_manip::{expand_server, ExpandedNames};
use crate::models::{Group, Proxy, RuleGroup, RuleGroupType, TagMap};
use crate::settings::Settings;

/// Chain used by groups that matched nothing.
const FALLBACK_CHAIN: [&str; 3] = [AUTO_SELECT, SELECTION, DIRECT];

/// Groups plus a name to index lookup.
#[derive(Debug, Default)]
struct GroupSet {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupSet {
    fn push(&mut self, group: Group) -> bool {
        if self.index.contains_key(&group.name) {
            return false;
        }
        self.index.insert(group.name.clone(), self.groups.len());
        self.groups.push(group);
        true
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Group> {
        let i = *self.index.get(name)?;
        self.groups.get_mut(i)
    }

    fn retain(&mut self, f: impl FnMut(&Group) -> bool) {
        self.groups.retain(f);
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.clone(), i))
            .collect();
    }

    fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}

/// Output of [`compose_groups`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedGroups {
    pub groups: Vec<Group>,
    pub rules: Vec<String>,
}

/// Compose the candidate groups and collect the rule lines.
pub fn compose_groups(
    proxies: &[Proxy],
    rule_groups: &[RuleGroup],
    tags: &TagMap,
    expanded: &ExpandedNames,
    settings: &Settings,
) -> ComposedGroups {
    let mut set = GroupSet::default();
    let mut rules = Vec::new();

    let mut auto_select = Group::url_test(AUTO_SELECT, &settings.test_url, settings.test_interval);
    let mut selection = Group::select(SELECTION);
    selection.push_unique(AUTO_SELECT);
    for proxy in proxies {
        auto_select.push_unique(&proxy.name);
        selection.push_unique(&proxy.name);
    }
    set.push(auto_select);
    set.push(selection);

    let mut candidates = Vec::new();
    for rule_group in rule_groups {
        let group = match rule_group.rule_type {
            RuleGroupType::Ban => Group::ban(rule_group.name.as_str()),
            RuleGroupType::Auto => {
                let mut group = Group::url_test(
                    rule_group.name.as_str(),
                    &settings.test_url,
                    settings.test_interval,
                );
                group.proxies = rule_group.members();
                group
            }
            RuleGroupType::Manual => {
                let mut group = Group::select(rule_group.name.as_str());
                group.proxies = rule_group.members();
                group
            }
        };
        rules.extend(rule_group.rule_lines().map(str::to_string));

        if set.push(group) {
            candidates.push(rule_group.name.clone());
        } else {
            warn!(
                "Rule group {} duplicates an existing group name, keeping the first",
                rule_group.name
            );
        }
    }

    for name in &candidates {
        if let Some(group) = set.get_mut(name) {
            if !group.direct && group.proxies.is_empty() {
                debug!("Group {} has no members, using the fallback chain", name);
                group.proxies = FALLBACK_CHAIN.iter().map(|s| s.to_string()).collect();
            }
        }
    }

    merge_tag_groups(&mut set, tags, expanded);
    prune_empty_groups(&mut set);
    drop_dangling_members(&mut set, proxies);

    let mut groups = set.into_groups();
    for group in &mut groups {
        group.dedup();
    }
    ComposedGroups { groups, rules }
}

fn merge_tag_groups(set: &mut GroupSet, tags: &TagMap, expanded: &ExpandedNames) {
    for (tag, servers) in tags.iter() {
        for server in servers {
            let names = match expanded.get(&(server.id, server.name.clone())) {
                Some(names) => names.clone(),
                None => expand_server(server).into_iter().map(|p| p.name).collect(),
            };
            for name in names {
                match set.get_mut(tag) {
                    Some(group) if group.direct => {}
                    Some(group) => group.push_unique(&name),
                    None => {
                        let mut group = Group::select(tag.as_str());
                        group.proxies.push(name);
                        set.push(group);
                    }
                }
            }
        }
    }
}

fn prune_empty_groups(set: &mut GroupSet) {
    let pruned: Vec<String> = set
        .groups
        .iter()
        .filter(|g| g.proxies.is_empty() && g.name != MANUAL_SELECTION)
        .map(|g| g.name.clone())
        .collect();

    if let Some(manual) = set.get_mut(MANUAL_SELECTION) {
        for name in &pruned {
            manual.remove(name);
        }
    }

    set.retain(|g| {
        if g.proxies.is_empty() {
            debug!("Pruning empty group {}", g.name);
            false
        } else {
            true
        }
    });
}

/// Remove members that name neither a proxy, a group nor a sentinel. A group
/// emptied this way falls back to whatever part of the fallback chain
/// survived.
fn drop_dangling_members(set: &mut GroupSet, proxies: &[Proxy]) {
    let known: HashSet<String> = proxies
        .iter()
        .map(|p| p.name.clone())
        .chain(set.groups.iter().map(|g| g.name.clone()))
        .collect();

    for group in set.groups.iter_mut().filter(|g| !g.direct) {
        let before = group.proxies.len();
        group
            .proxies
            .retain(|m| is_sentinel(m) || known.contains(m.as_str()));
        if group.proxies.len() != before {
            warn!(
                "Group {} referenced {} unknown member(s), dropped",
                group.name,
                before - group.proxies.len()
            );
        }
        if group.proxies.is_empty() {
            group.proxies = FALLBACK_CHAIN
                .iter()
                .filter(|m| **m != group.name && (is_sentinel(m) || known.contains(**m)))
                .map(|m| m.to_string())
                .collect();
        }
    }
}
