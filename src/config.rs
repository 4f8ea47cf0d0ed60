use chrono::Duration;

use crate::error::ChampionGgError;
use crate::host::Region;
use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.champion.gg";
pub const DEFAULT_DDRAGON_URL: &str = "https://ddragon.leagueoflegends.com";
pub const DEFAULT_RETRY_BASE_MS: u64 = 2000;

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub ddragon_url: String,
    pub region: Region,
    pub cache_max_age_mins: Option<u64>,
    pub retry_base_ms: u64,
}

impl Config {
    /// Builds a config around `api_key`. If `api_key` names an environment
    /// variable, the value of that variable is used instead.
    pub fn new(api_key: &str) -> Self {
        let api_key = env::var(api_key).unwrap_or_else(|_| api_key.to_string());

        Config {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            ddragon_url: DEFAULT_DDRAGON_URL.to_string(),
            region: Region::default(),
            cache_max_age_mins: None,
            retry_base_ms: DEFAULT_RETRY_BASE_MS,
        }
    }

    pub fn from_env() -> Result<Self, ChampionGgError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("CHAMPIONGG_API_KEY").map_err(|_| {
            ChampionGgError::Config(
                "CHAMPIONGG_API_KEY not found in environment or .env file".to_string(),
            )
        })?;

        let mut config = Config::new(&api_key);

        if let Ok(base_url) = env::var("CHAMPIONGG_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(ddragon_url) = env::var("DDRAGON_BASE_URL") {
            config.ddragon_url = ddragon_url;
        }
        if let Ok(region) = env::var("CHAMPIONGG_REGION") {
            config.region = region.parse()?;
        }
        if let Ok(mins) = env::var("CHAMPIONGG_CACHE_MAX_AGE_MINS") {
            config.cache_max_age_mins = Some(parse_cache_max_age(&mins)?);
        }
        if let Ok(ms) = env::var("CHAMPIONGG_RETRY_BASE_MS") {
            config.retry_base_ms = ms.parse::<u64>().map_err(|_| {
                ChampionGgError::Config(format!(
                    "CHAMPIONGG_RETRY_BASE_MS must be a number of milliseconds, got {}",
                    ms
                ))
            })?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_ddragon_url(mut self, ddragon_url: impl Into<String>) -> Self {
        self.ddragon_url = ddragon_url.into();
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_cache_max_age(mut self, mins: u64) -> Self {
        self.cache_max_age_mins = Some(mins);
        self
    }

    pub fn with_retry_base_ms(mut self, ms: u64) -> Self {
        self.retry_base_ms = ms;
        self
    }
}

/// A max age must fit a chrono duration in minutes.
fn parse_cache_max_age(value: &str) -> Result<u64, ChampionGgError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|mins| {
            i64::try_from(*mins)
                .ok()
                .and_then(Duration::try_minutes)
                .is_some()
        })
        .ok_or_else(|| {
            ChampionGgError::Config(format!(
                "CHAMPIONGG_CACHE_MAX_AGE_MINS must be a number of minutes in range, got {}",
                value
            ))
        })
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("ddragon_url", &self.ddragon_url)
            .field("region", &self.region)
            .field("cache_max_age_mins", &self.cache_max_age_mins)
            .field("retry_base_ms", &self.retry_base_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_key_is_kept() {
        let config = Config::new("not-an-env-var-3f9a");
        assert_eq!(config.api_key, "not-an-env-var-3f9a");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_max_age_mins, None);
    }

    #[test]
    fn key_naming_an_env_var_is_resolved() {
        env::set_var("CHAMPIONGG_TEST_KEY_VAR", "secret-from-env");
        let config = Config::new("CHAMPIONGG_TEST_KEY_VAR");
        assert_eq!(config.api_key, "secret-from-env");
    }

    #[test]
    fn builders_override_defaults() {
        let config = Config::new("k")
            .with_base_url("http://localhost:1234")
            .with_region(Region::Euw)
            .with_cache_max_age(5);
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.region, Region::Euw);
        assert_eq!(config.cache_max_age_mins, Some(5));
    }

    #[test]
    fn cache_max_age_must_fit_a_duration() {
        assert_eq!(parse_cache_max_age("30").unwrap(), 30);
        assert_eq!(parse_cache_max_age(" 0 ").unwrap(), 0);
        assert!(matches!(
            parse_cache_max_age("200000000000000000"),
            Err(ChampionGgError::Config(_))
        ));
        assert!(parse_cache_max_age(&u64::MAX.to_string()).is_err());
        assert!(parse_cache_max_age("soon").is_err());
    }
}
