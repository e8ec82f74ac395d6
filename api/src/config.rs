use std::env;

use anyhow::{anyhow, Context};
use chrono_tz::Tz;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;
const DEFAULT_ACHIEVEMENT_WORKERS: usize = 4;
const DEFAULT_HISTORY_LIMIT: u64 = 100_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Timezone used for calendar days and work hours
    pub timezone: Tz,
    /// Maximum number of achievement refreshes running at once
    pub achievement_workers: usize,
    /// Most matches read back when classifying a player's history
    pub history_limit: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let timezone = match lookup("REFERENCE_TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| anyhow!("REFERENCE_TIMEZONE is not a known timezone: {}", e))?,
            None => DEFAULT_TIMEZONE,
        };

        let achievement_workers = match lookup("ACHIEVEMENT_WORKERS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("ACHIEVEMENT_WORKERS must be a positive integer: {}", raw))?,
            None => DEFAULT_ACHIEVEMENT_WORKERS,
        };

        let history_limit = match lookup("MATCH_HISTORY_LIMIT") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("MATCH_HISTORY_LIMIT must be a positive integer: {}", raw))?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            database_url,
            port,
            timezone,
            achievement_workers,
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = assert_ok!(Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://x"
        )])));

        assert_eq!(config.database_url, "postgres://x");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.achievement_workers, 4);
        assert_eq!(config.history_limit, 100_000);
    }

    #[test]
    fn database_url_is_required() {
        assert_err!(Config::from_lookup(lookup_from(&[])));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("PORT", "3000"),
            ("REFERENCE_TIMEZONE", "America/New_York"),
            ("ACHIEVEMENT_WORKERS", "8"),
            ("MATCH_HISTORY_LIMIT", "500"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.achievement_workers, 8);
        assert_eq!(config.history_limit, 500);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("REFERENCE_TIMEZONE", "Mars/Olympus"),
            ("ACHIEVEMENT_WORKERS", "0"),
            ("MATCH_HISTORY_LIMIT", "-1"),
        ] {
            let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), (key, value)]));
            assert!(result.is_err(), "{} = {} should be rejected", key, value);
        }
    }
}
