use serde::Deserialize;
use serde_json::Value;

use crate::models::NodeRelay;

/// Accept a protocol config either as a JSON string (as stored in the
/// database) or as an inline mapping, and keep it as a JSON string.
pub fn deserialize_raw_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accept the relay list either as a list or as a JSON-encoded string.
/// An empty or unparsable string yields an empty list.
pub fn deserialize_relay_nodes<'de, D>(deserializer: D) -> Result<Vec<NodeRelay>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RelayNodes {
        List(Vec<NodeRelay>),
        Encoded(String),
        Missing(()),
    }

    Ok(match RelayNodes::deserialize(deserializer)? {
        RelayNodes::List(list) => list,
        RelayNodes::Encoded(s) if s.trim().is_empty() => Vec::new(),
        RelayNodes::Encoded(s) => match serde_json::from_str(&s) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Ignoring malformed relay_node list: {}", e);
                Vec::new()
            }
        },
        RelayNodes::Missing(()) => Vec::new(),
    })
}
