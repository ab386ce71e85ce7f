use tracing::debug;

/// Chooses which API key a source uses for one run.
pub trait CredentialSource: Send + Sync {
    fn pick_random(&self, keys: &[String], source: &str) -> Option<String>;
}

/// Uniform random pick over the configured pool, ignoring blank entries.
#[derive(Debug, Clone, Default)]
pub struct RandomKeyPicker;

impl CredentialSource for RandomKeyPicker {
    fn pick_random(&self, keys: &[String], source: &str) -> Option<String> {
        let keys: Vec<&String> = keys.iter().filter(|key| !key.trim().is_empty()).collect();
        if keys.is_empty() {
            debug!("{}: no api key configured", source);
            return None;
        }

        let key = keys[rand::random_range(0..keys.len())];
        Some(key.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialSource, RandomKeyPicker};

    #[test]
    fn empty_pool_yields_nothing() {
        let picker = RandomKeyPicker;
        assert_eq!(None, picker.pick_random(&[], "odin"));
        assert_eq!(
            None,
            picker.pick_random(&["".to_string(), "  ".to_string()], "odin")
        );
    }

    #[test]
    fn picks_from_pool() {
        let picker = RandomKeyPicker;
        let keys = vec!["k1".to_string(), "k2".to_string(), "k3".to_string()];
        for _ in 0..20 {
            let key = picker.pick_random(&keys, "odin").unwrap();
            assert!(keys.contains(&key));
        }
        assert_eq!(
            Some("only".to_string()),
            picker.pick_random(&["".to_string(), " only ".to_string()], "odin")
        );
    }
}
