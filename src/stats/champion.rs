use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::api::client::{ChampionGg, ChampionQuery};
use crate::api::endpoints::{Elo, DEFAULT_INCLUDED_DATA};
use crate::error::Result;
use crate::host::{Patch, Region, Role, Tier};

use super::data::{ChampionGgData, DamageComposition, RoleMap};
use super::transform;

/// Everything needed to look a champion up without loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsKey {
    pub id: i64,
    pub patch: Patch,
    pub elo: Elo,
    pub included_data: String,
}

impl StatsKey {
    pub fn new(id: i64, patch: Patch) -> Self {
        StatsKey {
            id,
            patch,
            elo: Elo::default(),
            included_data: DEFAULT_INCLUDED_DATA.to_string(),
        }
    }

    pub fn with_elo(mut self, elo: Elo) -> Self {
        self.elo = elo;
        self
    }

    pub fn with_included_data(mut self, included_data: &str) -> Self {
        self.included_data = included_data.to_string();
        self
    }

    fn query(&self) -> ChampionQuery {
        let mut query = ChampionQuery::new(self.id, &self.patch.name);
        query.list.elo = self.elo;
        query.list.included_data = self.included_data.clone();
        query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionGgMetadata {
    pub elo: Vec<Tier>,
    pub patch: Patch,
}

/// A champion's champion.gg statistics. Built unloaded; the first statistic
/// accessed fetches and transforms the data, which is then kept.
pub struct ChampionGgStats {
    source: Arc<ChampionGg>,
    key: StatsKey,
    data: OnceCell<ChampionGgData>,
}

impl ChampionGgStats {
    pub fn new(source: Arc<ChampionGg>, key: StatsKey) -> Self {
        ChampionGgStats {
            source,
            key,
            data: OnceCell::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.key.id
    }

    pub fn patch(&self) -> &Patch {
        &self.key.patch
    }

    pub fn region(&self) -> Region {
        self.key.patch.region
    }

    pub fn elo(&self) -> Elo {
        self.key.elo
    }

    pub fn included_data(&self) -> Vec<String> {
        transform::parse_included_data(&self.key.included_data)
    }

    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    pub fn load(&self) -> Result<&ChampionGgData> {
        self.data.get_or_try_init(|| {
            debug!(champion_id = self.key.id, patch = %self.key.patch, "Loading champion.gg stats");
            let records = self.source.get_champion(&self.key.query())?;
            transform::champion_dto_to_data(&records, &self.key.included_data)
        })
    }

    pub fn roles(&self) -> Result<&[Role]> {
        Ok(self.load()?.roles.as_slice())
    }

    pub fn win_rate(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.win_rate)
    }

    pub fn play_rate(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.play_rate)
    }

    pub fn play_rate_by_role(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.play_rate_by_role)
    }

    pub fn ban_rate(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.ban_rate)
    }

    pub fn games_played(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.games_played)
    }

    pub fn damage_composition(&self) -> Result<&RoleMap<DamageComposition>> {
        Ok(&self.load()?.damage_composition)
    }

    pub fn kills(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.kills)
    }

    pub fn deaths(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.deaths)
    }

    pub fn assists(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.assists)
    }

    pub fn total_damage_taken(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.total_damage_taken)
    }

    pub fn wards_killed(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.wards_killed)
    }

    pub fn wards_placed(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.wards_placed)
    }

    pub fn neutral_minions_killed_in_team_jungle(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.neutral_minions_killed_in_team_jungle)
    }

    pub fn neutral_minions_killed_in_enemy_jungle(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.neutral_minions_killed_in_enemy_jungle)
    }

    pub fn minions_killed(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.minions_killed)
    }

    pub fn gold_earned(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.gold_earned)
    }

    pub fn total_healed(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.total_healed)
    }

    pub fn performance_score(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.performance_score)
    }

    pub fn killing_sprees(&self) -> Result<&RoleMap<f64>> {
        Ok(&self.load()?.killing_sprees)
    }

    pub fn championgg_metadata(&self) -> Result<ChampionGgMetadata> {
        let data = self.load()?;
        let elo = if data.elo.is_empty() {
            transform::parse_elo(self.key.elo.as_str())?
        } else {
            data.elo.clone()
        };
        Ok(ChampionGgMetadata {
            elo,
            patch: self.key.patch.clone(),
        })
    }
}

impl fmt::Debug for ChampionGgStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampionGgStats")
            .field("key", &self.key)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
