use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream addresses; a single string or a list.
    #[serde(default, deserialize_with = "deserialize_addresses")]
    pub servers: Vec<String>,

    /// Singular alias for `servers`. When set it replaces `servers`.
    #[serde(
        default,
        deserialize_with = "deserialize_addresses",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub server: Vec<String>,

    /// Per-attempt timeout for a single upstream port.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            server: Vec::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    /// Folds the `server` alias into `servers`.
    pub fn normalize(&mut self) {
        if !self.server.is_empty() {
            self.servers = std::mem::take(&mut self.server);
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AddressList {
    One(String),
    Many(Vec<toml::Value>),
}

/// Accepts a string or a list; list entries that are not strings are dropped.
fn deserialize_addresses<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let addresses = match AddressList::deserialize(deserializer)? {
        AddressList::One(address) => vec![address],
        AddressList::Many(values) => values
            .into_iter()
            .filter_map(|value| match value {
                toml::Value::String(address) => Some(address),
                _ => None,
            })
            .collect(),
    };
    Ok(addresses)
}
