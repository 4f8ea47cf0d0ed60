use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::api::client::{ChampionGg, MatchupQuery};
use crate::api::endpoints::{Elo, MatchupRole, DEFAULT_MATCHUP_LIMIT};
use crate::error::Result;
use crate::host::Patch;

use super::data::MatchupData;
use super::transform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupsKey {
    pub champion_id: i64,
    pub patch: Patch,
    pub role: Option<MatchupRole>,
    pub elo: Elo,
    pub limit: u32,
}

impl MatchupsKey {
    pub fn new(champion_id: i64, patch: Patch, role: Option<MatchupRole>) -> Self {
        MatchupsKey {
            champion_id,
            patch,
            role,
            elo: Elo::default(),
            limit: DEFAULT_MATCHUP_LIMIT,
        }
    }

    pub fn with_elo(mut self, elo: Elo) -> Self {
        self.elo = elo;
        self
    }

    fn query(&self) -> MatchupQuery {
        MatchupQuery {
            champion_id: self.champion_id,
            patch: self.patch.name.clone(),
            role: self.role,
            elo: self.elo,
            limit: self.limit,
        }
    }
}

/// A champion's matchups, loaded on first access.
pub struct ChampionGgMatchups {
    source: Arc<ChampionGg>,
    key: MatchupsKey,
    data: OnceCell<Vec<MatchupData>>,
}

impl ChampionGgMatchups {
    pub fn new(source: Arc<ChampionGg>, key: MatchupsKey) -> Self {
        ChampionGgMatchups {
            source,
            key,
            data: OnceCell::new(),
        }
    }

    pub fn champion_id(&self) -> i64 {
        self.key.champion_id
    }

    pub fn role(&self) -> Option<MatchupRole> {
        self.key.role
    }

    pub fn patch(&self) -> &Patch {
        &self.key.patch
    }

    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    pub fn all(&self) -> Result<&[MatchupData]> {
        let data = self.data.get_or_try_init(|| {
            debug!(champion_id = self.key.champion_id, role = ?self.key.role, "Loading matchups");
            let dtos = self.source.get_matchups(&self.key.query())?;
            dtos.iter()
                .map(|dto| transform::matchup_dto_to_data(self.key.champion_id, dto))
                .collect::<Result<Vec<_>>>()
        })?;
        Ok(data.as_slice())
    }

    pub fn against(&self, opponent_id: i64) -> Result<Vec<&MatchupData>> {
        Ok(self
            .all()?
            .iter()
            .filter(|matchup| matchup.opponent_id == opponent_id)
            .collect())
    }

    /// Matchups with at least `min_games` games, best win rate first.
    pub fn best(&self, n: usize, min_games: u32) -> Result<Vec<&MatchupData>> {
        let mut ranked = self.ranked(min_games)?;
        ranked.reverse();
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Matchups with at least `min_games` games, worst win rate first.
    pub fn worst(&self, n: usize, min_games: u32) -> Result<Vec<&MatchupData>> {
        let mut ranked = self.ranked(min_games)?;
        ranked.truncate(n);
        Ok(ranked)
    }

    fn ranked(&self, min_games: u32) -> Result<Vec<&MatchupData>> {
        let mut matchups: Vec<&MatchupData> = self
            .all()?
            .iter()
            .filter(|matchup| matchup.count >= min_games)
            .collect();
        matchups.sort_by(|a, b| {
            a.champion
                .win_rate
                .partial_cmp(&b.champion.win_rate)
                .unwrap_or(Ordering::Equal)
        });
        Ok(matchups)
    }
}

impl fmt::Debug for ChampionGgMatchups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampionGgMatchups")
            .field("key", &self.key)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
