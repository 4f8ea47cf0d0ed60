use std::collections::BTreeMap;

use crate::api::endpoints::MatchupRole;
use crate::api::models::{DamageCompositionDto, MatchupSideDto};
use crate::host::{Role, Tier};

pub type RoleMap<T> = BTreeMap<Role, T>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageComposition {
    pub percent_true: f64,
    pub percent_magical: f64,
    pub percent_physical: f64,
    pub total: f64,
    pub total_true: f64,
    pub total_magical: f64,
    pub total_physical: f64,
}

impl From<DamageCompositionDto> for DamageComposition {
    fn from(dto: DamageCompositionDto) -> Self {
        DamageComposition {
            percent_true: dto.percent_true,
            percent_magical: dto.percent_magical,
            percent_physical: dto.percent_physical,
            total: dto.total,
            total_true: dto.total_true,
            total_magical: dto.total_magical,
            total_physical: dto.total_physical,
        }
    }
}

/// One champion's statistics, every field keyed by role.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChampionGgData {
    pub id: i64,
    pub patch: String,
    pub elo: Vec<Tier>,
    pub included_data: Vec<String>,
    pub roles: Vec<Role>,
    pub win_rate: RoleMap<f64>,
    pub play_rate: RoleMap<f64>,
    pub play_rate_by_role: RoleMap<f64>,
    pub ban_rate: RoleMap<f64>,
    pub games_played: RoleMap<f64>,
    pub damage_composition: RoleMap<DamageComposition>,
    pub kills: RoleMap<f64>,
    pub deaths: RoleMap<f64>,
    pub assists: RoleMap<f64>,
    pub total_damage_taken: RoleMap<f64>,
    pub wards_killed: RoleMap<f64>,
    pub wards_placed: RoleMap<f64>,
    pub neutral_minions_killed_in_team_jungle: RoleMap<f64>,
    pub neutral_minions_killed_in_enemy_jungle: RoleMap<f64>,
    pub minions_killed: RoleMap<f64>,
    pub gold_earned: RoleMap<f64>,
    pub total_healed: RoleMap<f64>,
    pub performance_score: RoleMap<f64>,
    pub killing_sprees: RoleMap<f64>,
    pub average_games: RoleMap<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChampionGgListData {
    pub data: Vec<ChampionGgData>,
    pub patch: String,
    pub elo: Vec<Tier>,
    pub included_data: Vec<String>,
    pub limit: u32,
}

impl ChampionGgListData {
    pub fn get(&self, champion_id: i64) -> Option<&ChampionGgData> {
        self.data.iter().find(|champion| champion.id == champion_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchupSide {
    pub win_rate: f64,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub gold_earned: f64,
    pub minions_killed: f64,
    pub damage_dealt_to_champions: f64,
    pub killing_sprees: f64,
    pub weighed_score: f64,
}

impl From<MatchupSideDto> for MatchupSide {
    fn from(dto: MatchupSideDto) -> Self {
        MatchupSide {
            win_rate: dto.winrate,
            kills: dto.kills,
            deaths: dto.deaths,
            assists: dto.assists,
            gold_earned: dto.gold_earned,
            minions_killed: dto.minions_killed,
            damage_dealt_to_champions: dto.total_damage_dealt_to_champions,
            killing_sprees: dto.killing_sprees,
            weighed_score: dto.weighed_score,
        }
    }
}

/// A matchup seen from `champion_id`'s side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupData {
    pub champion_id: i64,
    pub opponent_id: i64,
    pub role: MatchupRole,
    pub count: u32,
    pub champion: MatchupSide,
    pub opponent: MatchupSide,
}
