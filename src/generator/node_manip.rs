//! Server to proxy expansion.
//!
//! One server yields zero or more proxies depending on its relay mode. A
//! server whose protocol config cannot be decoded yields nothing and the
//! rest of the build carries on.

use std::collections::HashMap;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{NodeRelay, Proxy, RelayMode, Server};
use crate::parser::{parse_option, ProtocolOption};

/// Expand `server` using the thread-local RNG for random relays.
pub fn expand_server(server: &Server) -> Vec<Proxy> {
    expand_server_with(server, &mut rand::thread_rng())
}

/// Expand `server`, drawing random relay picks from `rng`.
pub fn expand_server_with<R: Rng + ?Sized>(server: &Server, rng: &mut R) -> Vec<Proxy> {
    let option = match parse_option(&server.protocol, &server.config) {
        Ok(option) => option,
        Err(e) => {
            warn!(
                "Skipping server {} ({}): {}",
                server.id, server.name, e
            );
            return Vec::new();
        }
    };

    match server.relay_mode {
        RelayMode::All if !server.relay_node.is_empty() => server
            .relay_node
            .iter()
            .map(|relay| make_proxy(server, &option, Some(relay)))
            .collect(),
        RelayMode::Random if !server.relay_node.is_empty() => {
            let relay = server.relay_node.choose(rng);
            debug!(
                "Server {} picked relay {:?}",
                server.name,
                relay.map(|r| &r.host)
            );
            vec![make_proxy(server, &option, relay)]
        }
        _ => vec![make_proxy(server, &option, None)],
    }
}

/// Proxy names produced by each `(server id, server name)`.
pub type ExpandedNames = HashMap<(i64, String), Vec<String>>;

/// Expand every server and remember which names each one produced, so later
/// passes see the same random relay picks.
pub fn expand_servers_indexed(servers: &[Server]) -> (Vec<Proxy>, ExpandedNames) {
    let mut rng = rand::thread_rng();
    let mut proxies = Vec::new();
    let mut names = ExpandedNames::new();
    for server in servers {
        let expanded = expand_server_with(server, &mut rng);
        names
            .entry((server.id, server.name.clone()))
            .or_insert_with(Vec::new)
            .extend(expanded.iter().map(|p| p.name.clone()));
        proxies.extend(expanded);
    }
    (proxies, names)
}

/// Name of a proxy reached through `relay`.
pub fn relay_name(server_name: &str, relay: Option<&NodeRelay>) -> String {
    match relay {
        Some(relay) if !relay.prefix.is_empty() => format!("{}-{}", relay.prefix, server_name),
        _ => server_name.to_string(),
    }
}

fn make_proxy(server: &Server, option: &ProtocolOption, relay: Option<&NodeRelay>) -> Proxy {
    let host = relay
        .map(|r| r.host.as_str())
        .filter(|h| !h.is_empty())
        .unwrap_or(&server.server_addr);
    let port = [relay.map_or(0, |r| r.port), server.port, option.port()]
        .into_iter()
        .find(|p| *p != 0)
        .unwrap_or(0);

    Proxy {
        name: relay_name(&server.name, relay),
        server: host.to_string(),
        port,
        option: option.clone(),
        country: server.country.clone(),
        city: server.city.clone(),
        tags: server.tag_list(),
    }
}
