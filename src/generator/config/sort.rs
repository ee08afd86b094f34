//! Final group ordering.

use log::debug;

use crate::constants::{AUTO_SELECT, DIRECT, REJECT, SELECTION};
use crate::models::Group;

fn take(groups: &mut Vec<Group>, name: &str) -> Option<Group> {
    let i = groups.iter().position(|g| g.name == name)?;
    Some(groups.remove(i))
}

/// Strip `names` from a non-direct group, keeping it non-empty.
fn strip(group: &mut Group, names: &[&str]) {
    if group.direct {
        return;
    }
    for name in names {
        group.remove(name);
    }
    if group.proxies.is_empty() {
        debug!("Group {} emptied by ordering, routing it to DIRECT", group.name);
        group.proxies.push(DIRECT.to_string());
    }
}

/// Order groups for emission: the default group first, then `Auto Select`,
/// the rest in composition order, and `Selection` last.
pub fn sort_groups(mut groups: Vec<Group>, default: &str) -> Vec<Group> {
    let mut sorted = Vec::with_capacity(groups.len());

    if let Some(mut group) = take(&mut groups, default) {
        strip(&mut group, &[default, REJECT]);
        sorted.push(group);
    }
    if let Some(mut group) = take(&mut groups, AUTO_SELECT) {
        strip(&mut group, &[default, AUTO_SELECT]);
        sorted.push(group);
    }
    let selection = take(&mut groups, SELECTION).map(|mut group| {
        strip(&mut group, &[default, SELECTION]);
        group
    });

    sorted.extend(groups);
    sorted.extend(selection);
    sorted
}
