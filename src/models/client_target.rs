use std::fmt;

/// Client applications a subscription can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientTarget {
    Clash,
    SingBox,
    Loon,
    Surfboard,
    QuantumultX,
    Shadowrocket,
    V2rayN,
    General,
    Vproxy,
}

impl ClientTarget {
    pub const ALL: [ClientTarget; 9] = [
        ClientTarget::Clash,
        ClientTarget::SingBox,
        ClientTarget::Loon,
        ClientTarget::Surfboard,
        ClientTarget::QuantumultX,
        ClientTarget::Shadowrocket,
        ClientTarget::V2rayN,
        ClientTarget::General,
        ClientTarget::Vproxy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClientTarget::Clash => "clash",
            ClientTarget::SingBox => "singbox",
            ClientTarget::Loon => "loon",
            ClientTarget::Surfboard => "surfboard",
            ClientTarget::QuantumultX => "quantumultx",
            ClientTarget::Shadowrocket => "shadowrocket",
            ClientTarget::V2rayN => "v2rayn",
            ClientTarget::General => "general",
            ClientTarget::Vproxy => "vproxy",
        }
    }

    /// Resolve a target name such as `clash`, `sing-box` or `quanx`.
    pub fn from_name(name: &str) -> Option<ClientTarget> {
        let target = match name.trim().to_ascii_lowercase().as_str() {
            "clash" | "clashmeta" | "clash.meta" | "mihomo" => ClientTarget::Clash,
            "singbox" | "sing-box" => ClientTarget::SingBox,
            "loon" => ClientTarget::Loon,
            "surfboard" => ClientTarget::Surfboard,
            "quantumultx" | "quantumult-x" | "quanx" => ClientTarget::QuantumultX,
            "shadowrocket" => ClientTarget::Shadowrocket,
            "v2rayn" | "v2rayng" => ClientTarget::V2rayN,
            "general" | "base64" | "v2ray" => ClientTarget::General,
            "vproxy" => ClientTarget::Vproxy,
            _ => return None,
        };
        Some(target)
    }

    /// Detect the client from a User-Agent header value.
    pub fn from_user_agent(user_agent: &str) -> ClientTarget {
        crate::utils::useragent::match_user_agent(user_agent)
    }

    /// Whether the rendered body is a base64 URI list.
    pub fn is_uri_list(self) -> bool {
        matches!(
            self,
            ClientTarget::Shadowrocket
                | ClientTarget::V2rayN
                | ClientTarget::General
                | ClientTarget::Vproxy
        )
    }
}

impl fmt::Display for ClientTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for target in ClientTarget::ALL {
            assert_eq!(ClientTarget::from_name(target.as_str()), Some(target));
        }
        assert_eq!(ClientTarget::from_name("Sing-Box"), Some(ClientTarget::SingBox));
        assert_eq!(ClientTarget::from_name("surge"), None);
    }
}
