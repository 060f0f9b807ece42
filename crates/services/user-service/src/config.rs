//! User service configuration.

use std::env;

use common::DatabaseConfig;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Connection pool settings for the user database
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: lookup("USER_SERVICE_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: lookup("USER_SERVICE_DB_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: lookup("USER_SERVICE_DB_MIN_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = UserServiceConfig::from_lookup(lookup(&[]));
        let defaults = DatabaseConfig::default();

        assert_eq!(config.database.url, defaults.url);
        assert_eq!(config.database.max_connections, defaults.max_connections);
        assert_eq!(config.database.min_connections, defaults.min_connections);
    }

    #[test]
    fn service_url_wins_over_generic_url() {
        let config = UserServiceConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://generic"),
            ("USER_SERVICE_DATABASE_URL", "postgres://users"),
        ]));
        assert_eq!(config.database.url, "postgres://users");

        let config = UserServiceConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://generic")]));
        assert_eq!(config.database.url, "postgres://generic");
    }

    #[test]
    fn unparsable_pool_sizes_are_ignored() {
        let config = UserServiceConfig::from_lookup(lookup(&[
            ("USER_SERVICE_DB_MAX_CONNECTIONS", "lots"),
            ("USER_SERVICE_DB_MIN_CONNECTIONS", "3"),
        ]));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 3);
    }
}
