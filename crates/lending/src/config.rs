//! Policy thresholds loaded from environment variables.

use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::{LendingError, Result};

const MAX_HOLDS: &str = "LENDING_MAX_HOLDS";
const RESEARCHER_MAX_HOLDS: &str = "LENDING_RESEARCHER_MAX_HOLDS";
const OVERDUE_CHECKOUTS_THRESHOLD: &str = "LENDING_OVERDUE_CHECKOUTS_THRESHOLD";

/// Thresholds used by the standard placing-on-hold policies.
///
/// Reads from environment variables:
/// - `LENDING_MAX_HOLDS`: holds a regular patron may own at once (default: `5`)
/// - `LENDING_RESEARCHER_MAX_HOLDS`: holds a researcher may own at once
///   (default: unset, researchers are not capped)
/// - `LENDING_OVERDUE_CHECKOUTS_THRESHOLD`: overdue checkouts at a branch that
///   block new holds there (default: `1`, a single overdue book blocks; `0` is
///   rejected since it would block patrons with no overdue books)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub max_holds: usize,
    pub researcher_max_holds: Option<usize>,
    pub overdue_checkouts_threshold: NonZeroUsize,
}

impl PolicyConfig {
    /// Loads configuration from environment variables, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            max_holds: parse(&lookup, MAX_HOLDS)?.unwrap_or(defaults.max_holds),
            researcher_max_holds: parse(&lookup, RESEARCHER_MAX_HOLDS)?
                .or(defaults.researcher_max_holds),
            overdue_checkouts_threshold: parse(&lookup, OVERDUE_CHECKOUTS_THRESHOLD)?
                .unwrap_or(defaults.overdue_checkouts_threshold),
        };
        tracing::debug!(?config, "loaded lending policy configuration");
        Ok(config)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_holds: 5,
            researcher_max_holds: None,
            overdue_checkouts_threshold: NonZeroUsize::MIN,
        }
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LendingError::InvalidConfiguration { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = PolicyConfig::default();
        assert_eq!(config.max_holds, 5);
        assert_eq!(config.researcher_max_holds, None);
        assert_eq!(config.overdue_checkouts_threshold.get(), 1);
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = PolicyConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = PolicyConfig::from_lookup(lookup_from(&[
            (MAX_HOLDS, "3"),
            (RESEARCHER_MAX_HOLDS, " 20 "),
            (OVERDUE_CHECKOUTS_THRESHOLD, "2"),
        ]))
        .unwrap();

        assert_eq!(config.max_holds, 3);
        assert_eq!(config.researcher_max_holds, Some(20));
        assert_eq!(config.overdue_checkouts_threshold.get(), 2);
    }

    #[test]
    fn test_unparseable_value_is_rejected() {
        let result = PolicyConfig::from_lookup(lookup_from(&[(MAX_HOLDS, "five")]));
        assert!(matches!(
            result,
            Err(LendingError::InvalidConfiguration { key: MAX_HOLDS, ref value }) if value == "five"
        ));
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let result =
            PolicyConfig::from_lookup(lookup_from(&[(OVERDUE_CHECKOUTS_THRESHOLD, "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let result = PolicyConfig::from_lookup(lookup_from(&[(OVERDUE_CHECKOUTS_THRESHOLD, "0")]));
        assert!(matches!(
            result,
            Err(LendingError::InvalidConfiguration {
                key: OVERDUE_CHECKOUTS_THRESHOLD,
                ref value,
            }) if value == "0"
        ));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            std::env::set_var(MAX_HOLDS, "7");
            std::env::remove_var(RESEARCHER_MAX_HOLDS);
            std::env::remove_var(OVERDUE_CHECKOUTS_THRESHOLD);
        }

        let config = PolicyConfig::from_env().unwrap();

        unsafe {
            std::env::remove_var(MAX_HOLDS);
        }

        assert_eq!(config.max_holds, 7);
        assert_eq!(config.researcher_max_holds, None);
        assert_eq!(config.overdue_checkouts_threshold.get(), 1);
    }
}
