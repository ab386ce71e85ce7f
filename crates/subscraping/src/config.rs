use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

// region:        --- Constants

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("subscraping/", env!("CARGO_PKG_VERSION"));

// endregion:     --- Constants

// region:        --- Session config

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// endregion:     --- Session config

// region:        --- Provider config

/// API keys per source, e.g.
///
/// ```yaml
/// odin:
///   - key-one
///   - key-two
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig {
    keys: HashMap<String, Vec<String>>,
}

impl ProviderConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading provider config from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // an empty file is a valid, empty config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ProviderConfig = serde_yaml::from_str(content)?;
        debug!("{} sources configured", config.keys.len());
        Ok(config)
    }

    /// Keys from the file followed by `<SOURCE>_API_KEY` (comma separated),
    /// without duplicates.
    pub fn keys_for(&self, source: &str) -> Vec<String> {
        let from_env = std::env::var(env_key_name(source)).ok();
        merge_keys(self.keys.get(source), from_env.as_deref())
    }
}

pub fn env_key_name(source: &str) -> String {
    format!("{}_API_KEY", source.to_uppercase().replace('-', "_"))
}

fn merge_keys(file_keys: Option<&Vec<String>>, env_value: Option<&str>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let candidates = file_keys
        .into_iter()
        .flatten()
        .map(|key| key.as_str())
        .chain(env_value.into_iter().flat_map(|value| value.split(',')));

    for key in candidates.map(str::trim).filter(|key| !key.is_empty()) {
        if !keys.iter().any(|known| known == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

// endregion:     --- Provider config

#[cfg(test)]
mod tests {
    use super::{env_key_name, merge_keys, ProviderConfig};
    use std::io::Write;

    #[test]
    fn parses_provider_yaml() {
        let config = ProviderConfig::from_yaml("odin:\n  - k1\n  - k2\nother: []\n").unwrap();
        assert_eq!(
            Some(&vec!["k1".to_string(), "k2".to_string()]),
            config.keys.get("odin")
        );
        assert_eq!(Some(&Vec::new()), config.keys.get("other"));
    }

    #[test]
    fn empty_yaml_is_empty_config() {
        let config = ProviderConfig::from_yaml("  \n").unwrap();
        assert!(config.keys.is_empty());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(ProviderConfig::from_yaml("odin: [unclosed").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "odin:\n  - from-file").unwrap();

        let config = ProviderConfig::from_file(file.path()).unwrap();
        assert_eq!(Some(&vec!["from-file".to_string()]), config.keys.get("odin"));
    }

    #[test]
    fn env_name_is_uppercased() {
        assert_eq!("ODIN_API_KEY", env_key_name("odin"));
        assert_eq!("SOME_SOURCE_API_KEY", env_key_name("some-source"));
    }

    #[test]
    fn merges_file_and_env_keys() {
        let file_keys = vec!["a".to_string(), "b".to_string()];
        let keys = merge_keys(Some(&file_keys), Some("b, c,,"));
        assert_eq!(vec!["a", "b", "c"], keys);

        assert!(merge_keys(None, None).is_empty());
        assert_eq!(vec!["x"], merge_keys(None, Some(" x ")));
    }
}
