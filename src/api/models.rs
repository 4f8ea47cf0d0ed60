use serde::{Deserialize, Serialize};

use crate::host::Role;

use super::endpoints::MatchupRole;

// /v2/champions record: one champion in one role. `_id` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionGgDto {
    pub champion_id: i64,
    pub role: Role,
    #[serde(default)]
    pub elo: String,
    #[serde(default)]
    pub patch: String,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub play_rate: Option<f64>,
    #[serde(default)]
    pub percent_role_played: Option<f64>,
    #[serde(default)]
    pub ban_rate: Option<f64>,
    #[serde(default)]
    pub games_played: Option<f64>,
    #[serde(default)]
    pub kills: Option<f64>,
    #[serde(default)]
    pub deaths: Option<f64>,
    #[serde(default)]
    pub assists: Option<f64>,
    #[serde(default)]
    pub total_damage_taken: Option<f64>,
    #[serde(default)]
    pub wards_killed: Option<f64>,
    #[serde(default)]
    pub ward_placed: Option<f64>,
    #[serde(default)]
    pub neutral_minions_killed_team_jungle: Option<f64>,
    #[serde(default)]
    pub neutral_minions_killed_enemy_jungle: Option<f64>,
    #[serde(default)]
    pub minions_killed: Option<f64>,
    #[serde(default)]
    pub gold_earned: Option<f64>,
    #[serde(default)]
    pub total_heal: Option<f64>,
    #[serde(default)]
    pub overall_performance_score: Option<f64>,
    #[serde(default)]
    pub killing_sprees: Option<f64>,
    #[serde(default)]
    pub average_games: Option<f64>,
    #[serde(default)]
    pub damage_composition: Option<DamageCompositionDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageCompositionDto {
    pub percent_true: f64,
    pub percent_magical: f64,
    pub percent_physical: f64,
    pub total: f64,
    pub total_true: f64,
    pub total_magical: f64,
    pub total_physical: f64,
}

// The list response plus the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionGgListDto {
    pub data: Vec<ChampionGgDto>,
    pub patch: String,
    pub included_data: String,
    pub elo: String,
    pub limit: u32,
}

// /v2/champions/{id}[/{role}]/matchups record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchupDto {
    #[serde(rename = "_id")]
    pub key: MatchupKeyDto,
    #[serde(default)]
    pub count: u32,
    pub champ1: MatchupSideDto,
    pub champ2: MatchupSideDto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchupKeyDto {
    pub champ1_id: i64,
    pub champ2_id: i64,
    pub role: MatchupRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchupSideDto {
    pub winrate: f64,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub gold_earned: f64,
    pub minions_killed: f64,
    pub total_damage_dealt_to_champions: f64,
    pub killing_sprees: f64,
    pub weighed_score: f64,
}

// /v2/general record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInformationDto {
    pub elo: String,
    pub patch: String,
    #[serde(default)]
    pub champion_count: Option<u32>,
    #[serde(default)]
    pub last_update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn champion_record_ignores_server_id_and_unknown_fields() {
        let raw = json!({
            "_id": {"championId": 103, "role": "MIDDLE"},
            "championId": 103,
            "role": "MIDDLE",
            "elo": "PLATINUM,DIAMOND,MASTER,CHALLENGER",
            "patch": "8.24",
            "winRate": 0.51,
            "totalHeal": 1200.5,
            "hashes": {"skillorderhash": {}},
            "damageComposition": {"percentMagical": 0.8, "total": 20000.0}
        });

        let dto: ChampionGgDto = serde_json::from_value(raw).unwrap();
        assert_eq!(dto.champion_id, 103);
        assert_eq!(dto.role, Role::Middle);
        assert_eq!(dto.win_rate, Some(0.51));
        assert_eq!(dto.total_heal, Some(1200.5));
        assert_eq!(dto.kills, None);
        let damage = dto.damage_composition.unwrap();
        assert_eq!(damage.percent_magical, 0.8);
        assert_eq!(damage.percent_true, 0.0);
    }

    #[test]
    fn matchup_record_reads_key_and_sides() {
        let raw = json!({
            "_id": {"champ1_id": 1, "champ2_id": 7, "role": "MIDDLE"},
            "count": 412,
            "champ1_id": 1,
            "champ1": {"winrate": 0.47, "kills": 6.1, "goldEarned": 10500.0},
            "champ2_id": 7,
            "champ2": {"winrate": 0.53}
        });

        let dto: MatchupDto = serde_json::from_value(raw).unwrap();
        assert_eq!(dto.key.champ2_id, 7);
        assert_eq!(dto.key.role, MatchupRole::Middle);
        assert_eq!(dto.count, 412);
        assert_eq!(dto.champ1.gold_earned, 10500.0);
        assert_eq!(dto.champ2.winrate, 0.53);
    }
}
