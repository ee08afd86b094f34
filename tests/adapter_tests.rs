mod common;

use common::{every_protocol, relay_scenario, rule_group, server};
use subcompiler::models::tag_map_from_servers;
use subcompiler::settings::Settings;
use subcompiler::{build_adapter, GroupType, RuleGroupType, TagMap};

fn group_names(adapter: &subcompiler::Adapter) -> Vec<&str> {
    adapter.groups.iter().map(|g| g.name.as_str()).collect()
}

#[test]
fn test_relay_scenario_expansion() {
    let servers = relay_scenario();
    let adapter = build_adapter(&servers, &[], &TagMap::new(), &Settings::default());

    let names: Vec<&str> = adapter.proxies.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "HK-B", "US-B"]);
    assert_eq!(adapter.nodes, vec!["A", "HK-B", "US-B"]);

    let hk = adapter.proxy("HK-B").unwrap();
    assert_eq!(hk.server, "hk.relay.example.com");
    assert_eq!(hk.port, 10443);

    // the fallback default is the first group emitted
    assert_eq!(adapter.default, "Auto Select");
    assert_eq!(adapter.groups[0].name, "Auto Select");
    assert_eq!(adapter.groups[0].group_type, GroupType::URLTest);
    assert_eq!(adapter.groups[0].proxies, vec!["A", "HK-B", "US-B"]);
}

#[test]
fn test_selection_is_last_and_clean() {
    let rule_groups = vec![
        {
            let mut g = rule_group("Proxy", RuleGroupType::Manual, "Auto Select,A", "");
            g.default = true;
            g
        },
        rule_group("Media", RuleGroupType::Auto, "A", "DOMAIN-SUFFIX,netflix.com,Media"),
    ];
    let adapter = build_adapter(
        &relay_scenario(),
        &rule_groups,
        &TagMap::new(),
        &Settings::default(),
    );
    assert_eq!(
        group_names(&adapter),
        vec!["Proxy", "Auto Select", "Media", "Selection"]
    );
    let selection = adapter.groups.last().unwrap();
    assert!(!selection.contains("Selection"));
    assert!(!selection.contains("Proxy"));
    assert!(selection.contains("Auto Select"));
    assert!(!adapter.groups[0].contains("Proxy"));
    assert!(!adapter.groups[1].contains("Proxy"));
}

#[test]
fn test_ban_group_members_are_fixed() {
    let rule_groups = vec![rule_group(
        "AdBlock",
        RuleGroupType::Ban,
        "A,HK-B",
        "DOMAIN-KEYWORD,ads,AdBlock",
    )];
    let adapter = build_adapter(
        &relay_scenario(),
        &rule_groups,
        &tag_map_from_servers(&relay_scenario()),
        &Settings::default(),
    );
    let ban = adapter.group("AdBlock").unwrap();
    assert_eq!(ban.proxies, vec!["REJECT", "DIRECT"]);
    assert!(ban.direct);
    assert_eq!(adapter.rules, vec!["DOMAIN-KEYWORD,ads,AdBlock"]);
}

#[test]
fn test_no_rule_groups_yields_seed_groups_only() {
    let adapter = build_adapter(&every_protocol(), &[], &TagMap::new(), &Settings::default());
    assert_eq!(group_names(&adapter), vec!["Auto Select", "Selection"]);
    assert!(adapter.rules.is_empty());
    assert_eq!(adapter.proxies.len(), 7);
}

#[test]
fn test_unknown_protocol_is_skipped() {
    let mut servers = every_protocol();
    let n = servers.len();
    servers.push(server(99, "Broken", "socks5", r#"{"port":1080}"#));
    servers.push(server(100, "Garbage", "vmess", "not json"));
    let adapter = build_adapter(&servers, &[], &TagMap::new(), &Settings::default());
    assert_eq!(adapter.proxies.len(), n);
    assert!(adapter.proxy("Broken").is_none());
    assert!(adapter.proxy("Garbage").is_none());
}

#[test]
fn test_tag_groups_follow_server_tags() {
    let mut servers = relay_scenario();
    servers[0].tags = "Asia".to_string();
    servers[1].tags = "Asia,America".to_string();
    let tags = tag_map_from_servers(&servers);
    let adapter = build_adapter(&servers, &[], &tags, &Settings::default());

    let asia = adapter.group("Asia").unwrap();
    assert_eq!(asia.proxies, vec!["A", "HK-B", "US-B"]);
    let america = adapter.group("America").unwrap();
    assert_eq!(america.proxies, vec!["HK-B", "US-B"]);
    assert_eq!(adapter.groups.last().unwrap().name, "Selection");
}

#[test]
fn test_rule_group_without_members_gets_fallback() {
    let rule_groups = vec![rule_group("Streaming", RuleGroupType::Manual, "Nowhere", "")];
    let adapter = build_adapter(
        &relay_scenario(),
        &rule_groups,
        &TagMap::new(),
        &Settings::default(),
    );
    let streaming = adapter.group("Streaming").unwrap();
    assert_eq!(streaming.proxies, vec!["Auto Select", "Selection", "DIRECT"]);
}

#[test]
fn test_rules_keep_rule_group_order() {
    let rule_groups = vec![
        rule_group("B", RuleGroupType::Manual, "A", "DOMAIN,b.com,B\n\n  DOMAIN,b2.com,B  "),
        rule_group("A2", RuleGroupType::Manual, "A", "DOMAIN,a.com,A2"),
    ];
    let adapter = build_adapter(
        &relay_scenario(),
        &rule_groups,
        &TagMap::new(),
        &Settings::default(),
    );
    assert_eq!(
        adapter.rules,
        vec!["DOMAIN,b.com,B", "DOMAIN,b2.com,B", "DOMAIN,a.com,A2"]
    );
}

#[test]
fn test_missing_default_group_falls_back() {
    let rule_groups = vec![rule_group("Proxy", RuleGroupType::Manual, "", "")];
    let adapter = build_adapter(&[], &rule_groups, &TagMap::new(), &Settings::default());
    // Auto Select is pruned without proxies, so the catch-all moves to Selection
    assert_eq!(adapter.default, "Selection");
    assert_eq!(group_names(&adapter), vec!["Selection", "Proxy"]);
    assert_eq!(adapter.groups[0].proxies, vec!["DIRECT"]);
    assert_eq!(adapter.groups[1].proxies, vec!["Selection", "DIRECT"]);
}
