use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::config::Config;
use crate::error::{ChampionGgError, Result};
use crate::host::Patch;
use crate::rate_limit::MultiWindowLimiter;
use crate::stats::champion::{ChampionGgStats, StatsKey};
use crate::stats::matchups::{ChampionGgMatchups, MatchupsKey};

use super::endpoints::{self, Elo, Endpoint, MatchupRole, DEFAULT_INCLUDED_DATA, DEFAULT_LIST_LIMIT, DEFAULT_MATCHUP_LIMIT};
use super::models::*;

const USER_AGENT: &str = concat!("championgg/", env!("CARGO_PKG_VERSION"));
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionListQuery {
    pub patch: String,
    pub included_data: String,
    pub elo: Elo,
    pub limit: u32,
}

impl ChampionListQuery {
    pub fn new(patch: &str) -> Self {
        ChampionListQuery {
            patch: patch.to_string(),
            included_data: DEFAULT_INCLUDED_DATA.to_string(),
            elo: Elo::default(),
            limit: DEFAULT_LIST_LIMIT,
        }
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey::ChampionList {
            patch: self.patch.clone(),
            elo: self.elo,
            included_data: self.included_data.clone(),
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionQuery {
    pub id: i64,
    pub list: ChampionListQuery,
}

impl ChampionQuery {
    pub fn new(id: i64, patch: &str) -> Self {
        ChampionQuery {
            id,
            list: ChampionListQuery::new(patch),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupQuery {
    pub champion_id: i64,
    pub patch: String,
    pub role: Option<MatchupRole>,
    pub elo: Elo,
    pub limit: u32,
}

impl MatchupQuery {
    pub fn new(champion_id: i64, patch: &str, role: Option<MatchupRole>) -> Self {
        MatchupQuery {
            champion_id,
            patch: patch.to_string(),
            role,
            elo: Elo::default(),
            limit: DEFAULT_MATCHUP_LIMIT,
        }
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey::Matchups {
            patch: self.patch.clone(),
            elo: self.elo,
            champion_id: self.champion_id,
            role: self.role,
        }
    }
}

// A poisoned lock only means another request panicked mid-insert; the
// cached values themselves are still whole.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The champion.gg datasource: rate-limited HTTP plus an in-process cache.
pub struct ChampionGg {
    config: Config,
    agent: ureq::Agent,
    rate_limiter: Mutex<MultiWindowLimiter>,
    champion_lists: Mutex<ResponseCache<ChampionGgListDto>>,
    matchups: Mutex<ResponseCache<Vec<MatchupDto>>>,
    site_information: Mutex<ResponseCache<Vec<SiteInformationDto>>>,
}

impl ChampionGg {
    pub fn new(config: Config) -> Self {
        ChampionGg::with_rate_limiter(config, MultiWindowLimiter::championgg())
    }

    pub fn with_rate_limiter(config: Config, rate_limiter: MultiWindowLimiter) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build();
        let max_age = config.cache_max_age_mins;

        ChampionGg {
            config,
            agent,
            rate_limiter: Mutex::new(rate_limiter),
            champion_lists: Mutex::new(ResponseCache::new(max_age)),
            matchups: Mutex::new(ResponseCache::new(max_age)),
            site_information: Mutex::new(ResponseCache::new(max_age)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn wait_for_permit(&self) {
        loop {
            let wait = match lock(&self.rate_limiter).acquire() {
                Ok(()) => return,
                Err(wait) => wait,
            };
            let wait = wait.to_std().unwrap_or_default().max(Duration::from_millis(10));
            debug!(wait_ms = wait.as_millis() as u64, "champion.gg rate limit reached, waiting");
            thread::sleep(wait);
        }
    }

    // Every attempt against champion.gg, retries included, takes a permit.
    fn get_body(&self, endpoint: &Endpoint, rate_limited: bool) -> Result<String> {
        let mut retry_count = 0;

        loop {
            if rate_limited {
                self.wait_for_permit();
            }
            let request = endpoint
                .params
                .iter()
                .fold(self.agent.get(&endpoint.url), |request, (key, value)| {
                    request.query(key, value)
                });

            trace!(url = %endpoint.redacted(), "GET");
            match request.call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| ChampionGgError::Http(e.to_string()));
                }
                Err(ureq::Error::Status(403, _)) => return Err(ChampionGgError::Forbidden),
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(ChampionGgError::RateLimited);
                    }
                    let wait_ms = self.config.retry_base_ms * (retry_count + 1) as u64;
                    warn!(wait_ms, url = %endpoint.url, "Rate limited by server, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(ChampionGgError::NotFound(format!(
                        "{} returned HTTP {}",
                        endpoint.url, code
                    )));
                }
                Err(ureq::Error::Transport(e)) => {
                    return Err(ChampionGgError::Http(e.to_string()));
                }
            }
        }
    }

    fn execute_request(&self, endpoint: &Endpoint) -> Result<String> {
        self.get_body(endpoint, true)
    }

    pub fn get_champion_list(&self, query: &ChampionListQuery) -> Result<Arc<ChampionGgListDto>> {
        let key = query.cache_key();
        if let Some(cached) = lock(&self.champion_lists).get(&key) {
            trace!(patch = %query.patch, elo = %query.elo, "Champion list cache hit");
            return Ok(cached);
        }

        debug!(patch = %query.patch, elo = %query.elo, "Fetching champion list");
        let endpoint = endpoints::champion_list(
            &self.config.base_url,
            &self.config.api_key,
            query.elo,
            &query.included_data,
            query.limit,
        );
        let body = self.execute_request(&endpoint)?;
        let data: Vec<ChampionGgDto> = serde_json::from_str(&body)?;

        let list = ChampionGgListDto {
            data,
            patch: query.patch.clone(),
            included_data: query.included_data.clone(),
            elo: query.elo.to_string(),
            limit: query.limit,
        };
        Ok(lock(&self.champion_lists).insert(key, list))
    }

    /// Every role record of one champion, served from the champion list.
    pub fn get_champion(&self, query: &ChampionQuery) -> Result<Vec<ChampionGgDto>> {
        let list = self.get_champion_list(&query.list)?;
        let records: Vec<ChampionGgDto> = list
            .data
            .iter()
            .filter(|record| record.champion_id == query.id)
            .cloned()
            .collect();

        if records.is_empty() {
            return Err(ChampionGgError::NotFound(format!(
                "champion {} on patch {} ({})",
                query.id, query.list.patch, query.list.elo
            )));
        }
        Ok(records)
    }

    pub fn get_matchups(&self, query: &MatchupQuery) -> Result<Arc<Vec<MatchupDto>>> {
        let key = query.cache_key();
        if let Some(cached) = lock(&self.matchups).get(&key) {
            trace!(champion_id = query.champion_id, "Matchups cache hit");
            return Ok(cached);
        }

        debug!(champion_id = query.champion_id, role = ?query.role, "Fetching matchups");
        let endpoint = endpoints::matchups(
            &self.config.base_url,
            &self.config.api_key,
            query.champion_id,
            query.role,
            query.elo,
            query.limit,
        );
        let body = self.execute_request(&endpoint)?;
        let matchups: Vec<MatchupDto> = serde_json::from_str(&body)?;

        Ok(lock(&self.matchups).insert(key, matchups))
    }

    pub fn get_site_information(&self, elo: Elo) -> Result<Arc<Vec<SiteInformationDto>>> {
        let key = CacheKey::SiteInformation { elo };
        if let Some(cached) = lock(&self.site_information).get(&key) {
            return Ok(cached);
        }

        let endpoint = endpoints::site_information(&self.config.base_url, &self.config.api_key, elo);
        let body = self.execute_request(&endpoint)?;
        let info: Vec<SiteInformationDto> = serde_json::from_str(&body)?;

        Ok(lock(&self.site_information).insert(key, info))
    }

    /// The patch champion.gg currently aggregates for `elo`.
    pub fn current_patch(&self, elo: Elo) -> Result<Patch> {
        let info = self.get_site_information(elo)?;
        let latest = info
            .first()
            .ok_or_else(|| ChampionGgError::NotFound("champion.gg site information".to_string()))?;
        Patch::new(&latest.patch, self.config.region)
    }

    /// Newest game version published on Data Dragon.
    pub fn fetch_latest_version(&self) -> Result<String> {
        let endpoint = endpoints::ddragon_versions(&self.config.ddragon_url);
        let body = self.get_body(&endpoint, false)?;
        let versions: Vec<String> = serde_json::from_str(&body)?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| ChampionGgError::NotFound("Data Dragon versions".to_string()))
    }

    pub fn stats(self: &Arc<Self>, id: i64, patch: Patch) -> ChampionGgStats {
        self.stats_with(StatsKey::new(id, patch))
    }

    pub fn stats_with(self: &Arc<Self>, key: StatsKey) -> ChampionGgStats {
        ChampionGgStats::new(Arc::clone(self), key)
    }

    pub fn matchups(self: &Arc<Self>, id: i64, patch: Patch, role: Option<MatchupRole>) -> ChampionGgMatchups {
        self.matchups_with(MatchupsKey::new(id, patch, role))
    }

    pub fn matchups_with(self: &Arc<Self>, key: MatchupsKey) -> ChampionGgMatchups {
        ChampionGgMatchups::new(Arc::clone(self), key)
    }

    /// Requests the limiter would still admit right now.
    pub fn remaining_permits(&self) -> u32 {
        lock(&self.rate_limiter).get_remaining()
    }

    pub fn clear_cache(&self) {
        lock(&self.champion_lists).clear();
        lock(&self.matchups).clear();
        lock(&self.site_information).clear();
    }

    pub fn cached_responses(&self) -> usize {
        lock(&self.champion_lists).len() + lock(&self.matchups).len() + lock(&self.site_information).len()
    }
}

impl fmt::Debug for ChampionGg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampionGg")
            .field("base_url", &self.config.base_url)
            .field("region", &self.config.region)
            .field("cached_responses", &self.cached_responses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let query = ChampionListQuery::new("8.24");
        assert_eq!(query.included_data, DEFAULT_INCLUDED_DATA);
        assert_eq!(query.elo, Elo::PlatinumDiamondMasterChallenger);
        assert_eq!(query.limit, 300);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let source = ChampionGg::new(Config::new("hidden-key-value"));
        let rendered = format!("{:?}", source);
        assert!(!rendered.contains("hidden-key-value"));
        assert!(rendered.contains("cached_responses: 0"));
    }

    #[test]
    fn unreachable_host_is_an_http_error() {
        let config = Config::new("k").with_base_url("http://127.0.0.1:1");
        let source = ChampionGg::new(config);
        let result = source.get_champion_list(&ChampionListQuery::new("8.24"));
        assert!(matches!(result, Err(ChampionGgError::Http(_))));
    }
}
