//! Server configuration from environment variables
//!
//! | Variable         | Default  | Meaning                                          |
//! |------------------|----------|--------------------------------------------------|
//! | `PORT`           | 3000     | HTTP listen port                                 |
//! | `DATA_DIR`       | unset    | Directory for the JSON analysis store (in-memory when unset) |
//! | `MAX_ITEMS`      | 100000   | Largest batch accepted per request               |
//! | `CACHE_TTL_SECS` | 300      | Lifetime of cached analysis responses            |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_ITEMS: usize = 100_000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub max_items: usize,
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: None,
            max_items: DEFAULT_MAX_ITEMS,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("DATA_DIR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            data_dir,
            max_items: parse_or(&lookup, "MAX_ITEMS", DEFAULT_MAX_ITEMS),
            cache_ttl: Duration::from_secs(parse_or(&lookup, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: FxHashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/ranker"),
            ("MAX_ITEMS", "500"),
            ("CACHE_TTL_SECS", "10"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/ranker")));
        assert_eq!(config.max_items, 500);
        assert_eq!(config.cache_ttl, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "http"), ("MAX_ITEMS", "-1")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
    }
}
