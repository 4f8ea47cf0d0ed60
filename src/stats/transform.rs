// Dto -> Data transformers

use std::collections::HashMap;

use tracing::warn;

use crate::api::models::{ChampionGgDto, ChampionGgListDto, MatchupDto};
use crate::error::{ChampionGgError, Result};
use crate::host::{Role, Tier};

use super::data::{ChampionGgData, ChampionGgListData, MatchupData, RoleMap};

/// Splits `PLATINUM,DIAMOND,MASTER,CHALLENGER` (or the underscore-joined
/// query form) into tiers.
pub fn parse_elo(elo: &str) -> Result<Vec<Tier>> {
    elo.split([',', '_'])
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<Tier>)
        .collect()
}

pub fn parse_included_data(included_data: &str) -> Vec<String> {
    included_data
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(String::from)
        .collect()
}

fn put<T>(map: &mut RoleMap<T>, role: Role, value: Option<T>) {
    if let Some(value) = value {
        map.insert(role, value);
    }
}

/// Folds one champion's per-role records into per-field, per-role maps.
pub fn champion_dto_to_data(records: &[ChampionGgDto], included_data: &str) -> Result<ChampionGgData> {
    let first = records
        .first()
        .ok_or_else(|| ChampionGgError::Transform("no champion.gg records to transform".to_string()))?;

    let mut data = ChampionGgData {
        id: first.champion_id,
        included_data: parse_included_data(included_data),
        ..Default::default()
    };

    for record in records {
        if record.champion_id != data.id {
            return Err(ChampionGgError::Transform(format!(
                "records for champion {} mixed with champion {}",
                data.id, record.champion_id
            )));
        }
        if data.patch.is_empty() {
            data.patch = record.patch.clone();
        }
        if data.elo.is_empty() {
            data.elo = parse_elo(&record.elo)?;
        }

        let role = record.role;
        if data.roles.contains(&role) {
            warn!(champion_id = data.id, role = %role, "Duplicate role record, keeping the last one");
        } else {
            data.roles.push(role);
        }

        put(&mut data.win_rate, role, record.win_rate);
        put(&mut data.play_rate, role, record.play_rate);
        put(&mut data.play_rate_by_role, role, record.percent_role_played);
        put(&mut data.ban_rate, role, record.ban_rate);
        put(&mut data.games_played, role, record.games_played);
        put(&mut data.damage_composition, role, record.damage_composition.map(Into::into));
        put(&mut data.kills, role, record.kills);
        put(&mut data.deaths, role, record.deaths);
        put(&mut data.assists, role, record.assists);
        put(&mut data.total_damage_taken, role, record.total_damage_taken);
        put(&mut data.wards_killed, role, record.wards_killed);
        put(&mut data.wards_placed, role, record.ward_placed);
        put(
            &mut data.neutral_minions_killed_in_team_jungle,
            role,
            record.neutral_minions_killed_team_jungle,
        );
        put(
            &mut data.neutral_minions_killed_in_enemy_jungle,
            role,
            record.neutral_minions_killed_enemy_jungle,
        );
        put(&mut data.minions_killed, role, record.minions_killed);
        put(&mut data.gold_earned, role, record.gold_earned);
        put(&mut data.total_healed, role, record.total_heal);
        put(&mut data.performance_score, role, record.overall_performance_score);
        put(&mut data.killing_sprees, role, record.killing_sprees);
        put(&mut data.average_games, role, record.average_games);
    }

    Ok(data)
}

/// Groups the flat list by champion, in first-seen order, and transforms
/// each group.
pub fn champion_list_dto_to_data(list: &ChampionGgListDto) -> Result<ChampionGgListData> {
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, Vec<ChampionGgDto>> = HashMap::new();

    for record in &list.data {
        groups
            .entry(record.champion_id)
            .or_insert_with(|| {
                order.push(record.champion_id);
                Vec::new()
            })
            .push(record.clone());
    }

    let data = order
        .iter()
        .filter_map(|id| groups.get(id))
        .map(|records| champion_dto_to_data(records, &list.included_data))
        .collect::<Result<Vec<_>>>()?;

    Ok(ChampionGgListData {
        data,
        patch: list.patch.clone(),
        elo: parse_elo(&list.elo)?,
        included_data: parse_included_data(&list.included_data),
        limit: list.limit,
    })
}

pub fn matchup_dto_to_data(champion_id: i64, dto: &MatchupDto) -> Result<MatchupData> {
    let (opponent_id, champion, opponent) = if dto.key.champ1_id == champion_id {
        (dto.key.champ2_id, dto.champ1, dto.champ2)
    } else if dto.key.champ2_id == champion_id {
        (dto.key.champ1_id, dto.champ2, dto.champ1)
    } else {
        return Err(ChampionGgError::Transform(format!(
            "matchup {} vs {} does not involve champion {}",
            dto.key.champ1_id, dto.key.champ2_id, champion_id
        )));
    };

    Ok(MatchupData {
        champion_id,
        opponent_id,
        role: dto.key.role,
        count: dto.count,
        champion: champion.into(),
        opponent: opponent.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::MatchupRole;
    use serde_json::json;

    fn record(id: i64, role: &str, win_rate: f64) -> ChampionGgDto {
        serde_json::from_value(json!({
            "championId": id,
            "role": role,
            "elo": "PLATINUM,DIAMOND,MASTER,CHALLENGER",
            "patch": "8.24",
            "winRate": win_rate,
            "percentRolePlayed": 0.5,
            "overallPerformanceScore": 61.2,
            "totalHeal": 900.0,
            "neutralMinionsKilledTeamJungle": 3.0
        }))
        .unwrap()
    }

    #[test]
    fn role_records_fold_into_per_field_maps() {
        let records = vec![record(103, "MIDDLE", 0.52), record(103, "DUO_SUPPORT", 0.48)];
        let data = champion_dto_to_data(&records, "kda,damage").unwrap();

        assert_eq!(data.id, 103);
        assert_eq!(data.patch, "8.24");
        assert_eq!(data.roles, vec![Role::Middle, Role::DuoSupport]);
        assert_eq!(data.win_rate[&Role::Middle], 0.52);
        assert_eq!(data.win_rate[&Role::DuoSupport], 0.48);
        assert_eq!(data.play_rate_by_role[&Role::Middle], 0.5);
        assert_eq!(data.performance_score[&Role::Middle], 61.2);
        assert_eq!(data.total_healed[&Role::DuoSupport], 900.0);
        assert_eq!(data.neutral_minions_killed_in_team_jungle.len(), 2);
        assert!(data.kills.is_empty());
        assert_eq!(data.included_data, vec!["kda", "damage"]);
        assert_eq!(
            data.elo,
            vec![Tier::Platinum, Tier::Diamond, Tier::Master, Tier::Challenger]
        );
    }

    #[test]
    fn empty_or_mixed_records_are_rejected() {
        assert!(champion_dto_to_data(&[], "").is_err());
        let mixed = vec![record(1, "TOP", 0.5), record(2, "TOP", 0.5)];
        assert!(matches!(
            champion_dto_to_data(&mixed, ""),
            Err(ChampionGgError::Transform(_))
        ));
    }

    #[test]
    fn list_groups_by_champion_in_first_seen_order() {
        let list = ChampionGgListDto {
            data: vec![
                record(7, "MIDDLE", 0.55),
                record(1, "MIDDLE", 0.50),
                record(7, "TOP", 0.45),
            ],
            patch: "8.24".to_string(),
            included_data: "kda".to_string(),
            elo: "GOLD".to_string(),
            limit: 300,
        };

        let data = champion_list_dto_to_data(&list).unwrap();
        assert_eq!(data.data.iter().map(|c| c.id).collect::<Vec<_>>(), vec![7, 1]);
        assert_eq!(data.get(7).unwrap().win_rate.len(), 2);
        assert_eq!(data.elo, vec![Tier::Gold]);
        assert!(data.get(42).is_none());
    }

    #[test]
    fn elo_accepts_query_and_response_forms() {
        let expected = vec![Tier::Platinum, Tier::Diamond, Tier::Master, Tier::Challenger];
        assert_eq!(parse_elo("PLATINUM_DIAMOND_MASTER_CHALLENGER").unwrap(), expected);
        assert_eq!(parse_elo("PLATINUM,DIAMOND,MASTER,CHALLENGER").unwrap(), expected);
        assert!(parse_elo("").unwrap().is_empty());
    }

    #[test]
    fn matchup_is_oriented_to_requested_champion() {
        let dto: MatchupDto = serde_json::from_value(json!({
            "_id": {"champ1_id": 7, "champ2_id": 1, "role": "MIDDLE"},
            "count": 100,
            "champ1": {"winrate": 0.6},
            "champ2": {"winrate": 0.4}
        }))
        .unwrap();

        let data = matchup_dto_to_data(1, &dto).unwrap();
        assert_eq!(data.opponent_id, 7);
        assert_eq!(data.champion.win_rate, 0.4);
        assert_eq!(data.opponent.win_rate, 0.6);
        assert_eq!(data.role, MatchupRole::Middle);

        assert!(matchup_dto_to_data(99, &dto).is_err());
    }
}
