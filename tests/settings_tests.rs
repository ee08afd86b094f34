use std::io::Write;

use subcompiler::models::{RelayMode, Snapshot};
use subcompiler::settings::{Settings, SettingsError};
use subcompiler::RuleGroupType;
use tempfile::Builder;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[cfg(test)]
mod settings_file_tests {
    use super::*;

    #[test]
    fn test_settings_toml() {
        let file = write_temp(
            ".toml",
            r#"
test_url = "https://cp.cloudflare.com/generate_204"
test_interval = 600
fallback_default_group = "Proxy"
expire_utc_offset_hours = 8
"#,
        );
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.test_url, "https://cp.cloudflare.com/generate_204");
        assert_eq!(settings.test_interval, 600);
        assert_eq!(settings.fallback_default_group, "Proxy");
        assert_eq!(settings.expire_utc_offset_hours, 8);
    }

    #[test]
    fn test_settings_yaml_partial() {
        let file = write_temp(".yaml", "test_interval: 120\n");
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.test_interval, 120);
        assert_eq!(settings.fallback_default_group, "Auto Select");
    }

    #[test]
    fn test_settings_json() {
        let file = write_temp(".json", r#"{"fallback_default_group": "Selection"}"#);
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.fallback_default_group, "Selection");
    }

    #[test]
    fn test_settings_errors() {
        let file = write_temp(".toml", "test_interval = \"soon\"\n");
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(SettingsError::Toml(_))
        ));
        assert!(matches!(
            Settings::from_file("/nonexistent/settings.toml"),
            Err(SettingsError::Io(_))
        ));
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    const SNAPSHOT: &str = r#"
servers:
  - id: 1
    name: Tokyo
    server_addr: jp.example.com
    protocol: trojan
    config: '{"port":443,"security":"tls"}'
    tags: Asia
  - id: 2
    name: Frankfurt
    server_addr: de.example.com
    protocol: vless
    config:
      port: 443
      security: reality
      security_config:
        sni: www.microsoft.com
    relay_mode: random
    relay_node:
      - host: relay.example.com
        port: 8443
        prefix: R
    tags: Europe
rule_groups:
  - name: Proxy
    type: manual
    tags: Asia,Europe
    default: true
  - name: Ads
    type: ban
    rules: |
      DOMAIN-SUFFIX,doubleclick.net,Ads
user:
  uuid: 0b6c5bd4-3e0f-4c2f-9d7a-7f3b1c2d4e5f
  traffic: 10737418240
  expire_time: 0
"#;

    #[test]
    fn test_snapshot_yaml() {
        let file = write_temp(".yaml", SNAPSHOT);
        let snapshot = Snapshot::from_file(file.path()).unwrap();
        assert_eq!(snapshot.servers.len(), 2);
        assert_eq!(snapshot.servers[1].relay_mode, RelayMode::Random);
        assert_eq!(snapshot.servers[1].relay_node[0].prefix, "R");
        assert_eq!(snapshot.rule_groups[1].rule_type, RuleGroupType::Ban);
        assert_eq!(
            snapshot.rule_groups[1].rule_lines().collect::<Vec<_>>(),
            vec!["DOMAIN-SUFFIX,doubleclick.net,Ads"]
        );
        assert_eq!(snapshot.user.remaining(), Some(10737418240));

        let tags = snapshot.tag_map();
        let keys: Vec<&String> = tags.keys().collect();
        assert_eq!(keys, vec!["Asia", "Europe"]);
    }

    #[test]
    fn test_snapshot_builds_adapter() {
        let file = write_temp(".yml", SNAPSHOT);
        let snapshot = Snapshot::from_file(file.path()).unwrap();
        let settings = Settings::default();
        let adapter = subcompiler::build_adapter(
            &snapshot.servers,
            &snapshot.rule_groups,
            &snapshot.tag_map(),
            &settings,
        );
        assert_eq!(adapter.default, "Proxy");
        assert_eq!(adapter.nodes, vec!["Tokyo", "R-Frankfurt"]);
        // the random relay name is shared with the tag group
        assert_eq!(adapter.group("Europe").unwrap().proxies, vec!["R-Frankfurt"]);
        assert_eq!(adapter.group("Proxy").unwrap().proxies, vec!["Asia", "Europe"]);
    }
}
