//! Analyst configuration, read from the environment.

use std::path::PathBuf;

/// Ranking length used by [`SalesAnalyst::top_revenue_earners_default`](crate::SalesAnalyst::top_revenue_earners_default).
pub const DEFAULT_TOP_EARNERS: usize = 20;

pub const TOP_EARNERS_VAR: &str = "SALESDESK_TOP_EARNERS";
pub const SNAPSHOT_VAR: &str = "SALESDESK_SNAPSHOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalystConfig {
    pub top_earners: usize,
    /// JSON snapshot the report binary loads.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            top_earners: DEFAULT_TOP_EARNERS,
            snapshot_path: None,
        }
    }
}

impl AnalystConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TOP_EARNERS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(n) => config.top_earners = n,
                Err(e) => tracing::warn!(
                    "{TOP_EARNERS_VAR}={raw:?} is not a count ({e}); using {DEFAULT_TOP_EARNERS}"
                ),
            }
        }

        config.snapshot_path = lookup(SNAPSHOT_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AnalystConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AnalystConfig::default());
        assert_eq!(config.top_earners, 20);
    }

    #[test]
    fn reads_overrides() {
        let config = AnalystConfig::from_lookup(lookup(&[
            (TOP_EARNERS_VAR, " 5 "),
            (SNAPSHOT_VAR, "/tmp/sales.json"),
        ]));
        assert_eq!(config.top_earners, 5);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/sales.json")));
    }

    #[test]
    fn unparseable_count_falls_back() {
        let config = AnalystConfig::from_lookup(lookup(&[(TOP_EARNERS_VAR, "lots")]));
        assert_eq!(config.top_earners, DEFAULT_TOP_EARNERS);
    }
}
