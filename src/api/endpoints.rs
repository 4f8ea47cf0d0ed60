// champion.gg v2 endpoint definitions and URL builders

use std::fmt;
use std::str::FromStr;

use crate::error::ChampionGgError;

pub const GENERAL_PATH: &str = "/v2/general";
pub const OVERALL_PATH: &str = "/v2/overall";
pub const CHAMPIONS_PATH: &str = "/v2/champions";

pub const DEFAULT_INCLUDED_DATA: &str = "kda,damage,minions,wards,overallPerformanceScore,goldEarned";
pub const DEFAULT_LIST_LIMIT: u32 = 300;
pub const DEFAULT_MATCHUP_LIMIT: u32 = 99999;
const CHAMPIONS_URL_LIMIT: u32 = 500;
const SORT: &str = "winRate-desc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Elo {
    Bronze,
    Silver,
    Gold,
    Platinum,
    #[default]
    PlatinumDiamondMasterChallenger,
}

impl Elo {
    pub const ALL: [Elo; 5] = [
        Elo::Bronze,
        Elo::Silver,
        Elo::Gold,
        Elo::Platinum,
        Elo::PlatinumDiamondMasterChallenger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Elo::Bronze => "BRONZE",
            Elo::Silver => "SILVER",
            Elo::Gold => "GOLD",
            Elo::Platinum => "PLATINUM",
            Elo::PlatinumDiamondMasterChallenger => "PLATINUM_DIAMOND_MASTER_CHALLENGER",
        }
    }
}

impl fmt::Display for Elo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Elo {
    type Err = ChampionGgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Elo::ALL
            .into_iter()
            .find(|elo| elo.as_str() == upper)
            .ok_or_else(|| ChampionGgError::InvalidElo {
                expected: Elo::ALL.map(|e| e.as_str()).join(", "),
                got: upper,
            })
    }
}

/// Roles accepted by the matchups endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
pub enum MatchupRole {
    #[serde(rename = "TOP")]
    Top,
    #[serde(rename = "JUNGLE")]
    Jungle,
    #[serde(rename = "MIDDLE")]
    Middle,
    #[serde(rename = "SYNERGY")]
    Synergy,
    #[serde(rename = "ADCSUPPORT")]
    AdcSupport,
    #[serde(rename = "DUO_CARRY")]
    DuoCarry,
}

impl MatchupRole {
    pub const ALL: [MatchupRole; 6] = [
        MatchupRole::Top,
        MatchupRole::Jungle,
        MatchupRole::Middle,
        MatchupRole::Synergy,
        MatchupRole::AdcSupport,
        MatchupRole::DuoCarry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchupRole::Top => "TOP",
            MatchupRole::Jungle => "JUNGLE",
            MatchupRole::Middle => "MIDDLE",
            MatchupRole::Synergy => "SYNERGY",
            MatchupRole::AdcSupport => "ADCSUPPORT",
            MatchupRole::DuoCarry => "DUO_CARRY",
        }
    }
}

impl fmt::Display for MatchupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchupRole {
    type Err = ChampionGgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        MatchupRole::ALL
            .into_iter()
            .find(|role| role.as_str() == upper)
            .ok_or_else(|| ChampionGgError::InvalidRole {
                expected: MatchupRole::ALL.map(|r| r.as_str()).join(", "),
                got: upper,
            })
    }
}

/// Field selectors for the `champData` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChampData {
    Role,
    WinRate,
    PlayRate,
    PercentRolePlayed,
    BanRate,
    Kda,
    Damage,
    Minions,
    Wins,
    GamesPlayed,
    Wards,
    Positions,
    Normalized,
    AverageGames,
    OverallPerformanceScore,
    Sprees,
    Hashes,
    MaxMins,
    Matchups,
    GoldEarned,
    TotalHeal,
}

impl ChampData {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChampData::Role => "role",
            ChampData::WinRate => "winRate",
            ChampData::PlayRate => "playRate",
            ChampData::PercentRolePlayed => "percentRolePlayed",
            ChampData::BanRate => "banRate",
            ChampData::Kda => "kda",
            ChampData::Damage => "damage",
            ChampData::Minions => "minions",
            ChampData::Wins => "wins",
            ChampData::GamesPlayed => "gamesPlayed",
            ChampData::Wards => "wards",
            ChampData::Positions => "positions",
            ChampData::Normalized => "normalized",
            ChampData::AverageGames => "averageGames",
            ChampData::OverallPerformanceScore => "overallPerformanceScore",
            ChampData::Sprees => "sprees",
            ChampData::Hashes => "hashes",
            ChampData::MaxMins => "maxMins",
            ChampData::Matchups => "matchups",
            ChampData::GoldEarned => "goldEarned",
            ChampData::TotalHeal => "totalHeal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionUrlOptions {
    pub win_rate: bool,
    pub play_rate: bool,
    pub percent_role_played: bool,
    pub ban_rate: bool,
    pub kda: bool,
    pub gold_earned: bool,
    pub minions_killed: bool,
    pub damage: bool,
    pub total_healed: bool,
    pub items_runes_skills: bool,
    pub normalize_by_role: bool,
    pub wins_by_matches_played: bool,
    pub games_played: bool,
    pub wards_placed: bool,
    pub positions: bool,
    pub average_number_of_games: bool,
    pub overall_performance_score: bool,
    pub killing_sprees: bool,
    pub max_mins: bool,
    pub matchups: bool,
    pub champion: Option<i64>,
}

impl Default for ChampionUrlOptions {
    fn default() -> Self {
        ChampionUrlOptions {
            win_rate: true,
            play_rate: true,
            percent_role_played: true,
            ban_rate: true,
            kda: true,
            gold_earned: true,
            minions_killed: true,
            damage: true,
            total_healed: true,
            items_runes_skills: true,
            normalize_by_role: false,
            wins_by_matches_played: false,
            games_played: false,
            wards_placed: false,
            positions: false,
            average_number_of_games: false,
            overall_performance_score: false,
            killing_sprees: false,
            max_mins: false,
            matchups: false,
            champion: None,
        }
    }
}

impl ChampionUrlOptions {
    pub fn for_champion(champion: i64) -> Self {
        ChampionUrlOptions {
            champion: Some(champion),
            ..Default::default()
        }
    }

    pub fn selectors(&self) -> Vec<ChampData> {
        let flags = [
            (self.win_rate, ChampData::WinRate),
            (self.play_rate, ChampData::PlayRate),
            (self.percent_role_played, ChampData::PercentRolePlayed),
            (self.ban_rate, ChampData::BanRate),
            (self.kda, ChampData::Kda),
            (self.damage, ChampData::Damage),
            (self.minions_killed, ChampData::Minions),
            (self.wins_by_matches_played, ChampData::Wins),
            (self.games_played, ChampData::GamesPlayed),
            (self.wards_placed, ChampData::Wards),
            (self.positions, ChampData::Positions),
            (self.normalize_by_role, ChampData::Normalized),
            (self.average_number_of_games, ChampData::AverageGames),
            (self.overall_performance_score, ChampData::OverallPerformanceScore),
            (self.killing_sprees, ChampData::Sprees),
            (self.items_runes_skills, ChampData::Hashes),
            (self.max_mins, ChampData::MaxMins),
            (self.matchups, ChampData::Matchups),
            (self.gold_earned, ChampData::GoldEarned),
            (self.total_healed, ChampData::TotalHeal),
        ];

        std::iter::once(ChampData::Role)
            .chain(flags.into_iter().filter(|(on, _)| *on).map(|(_, data)| data))
            .collect()
    }

    pub fn champ_data(&self) -> String {
        self.selectors()
            .iter()
            .map(ChampData::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A fully-formed request: URL without query string plus ordered parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(url: String) -> Self {
        Endpoint {
            url,
            params: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn full_url(&self) -> String {
        self.render(false)
    }

    /// Same as `full_url` with the API key masked, for logs.
    pub fn redacted(&self) -> String {
        self.render(true)
    }

    fn render(&self, mask_key: bool) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(key, value)| {
                if mask_key && *key == "api_key" {
                    format!("{}=***", key)
                } else {
                    format!("{}={}", key, urlencoding::encode(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, query)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({})", self.redacted())
    }
}

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn site_information(base_url: &str, api_key: &str, elo: Elo) -> Endpoint {
    Endpoint::new(format!("{}{}", base(base_url), GENERAL_PATH))
        .param("elo", elo)
        .param("api_key", api_key)
}

pub fn overall(base_url: &str, api_key: &str, elo: Elo) -> Endpoint {
    Endpoint::new(format!("{}{}", base(base_url), OVERALL_PATH))
        .param("elo", elo)
        .param("api_key", api_key)
}

pub fn champions(base_url: &str, api_key: &str, elo: Elo, options: &ChampionUrlOptions) -> Endpoint {
    let url = match options.champion {
        Some(id) => format!("{}{}/{}", base(base_url), CHAMPIONS_PATH, id),
        None => format!("{}{}", base(base_url), CHAMPIONS_PATH),
    };
    Endpoint::new(url)
        .param("elo", elo)
        .param("champData", options.champ_data())
        .param("limit", CHAMPIONS_URL_LIMIT)
        .param("skip", 0)
        .param("sort", SORT)
        .param("api_key", api_key)
}

/// The list request the datasource issues; every champion's per-role records.
pub fn champion_list(
    base_url: &str,
    api_key: &str,
    elo: Elo,
    included_data: &str,
    limit: u32,
) -> Endpoint {
    Endpoint::new(format!("{}{}", base(base_url), CHAMPIONS_PATH))
        .param("api_key", api_key)
        .param("limit", limit)
        .param("skip", 0)
        .param("elo", elo)
        .param("champData", included_data)
        .param("sort", SORT)
        .param("abriged", false)
}

pub fn ddragon_versions(ddragon_url: &str) -> Endpoint {
    Endpoint::new(format!("{}/api/versions.json", base(ddragon_url)))
}

pub fn matchups(
    base_url: &str,
    api_key: &str,
    champion_id: i64,
    role: Option<MatchupRole>,
    elo: Elo,
    limit: u32,
) -> Endpoint {
    let url = match role {
        Some(role) => format!(
            "{}{}/{}/{}/matchups",
            base(base_url),
            CHAMPIONS_PATH,
            champion_id,
            role
        ),
        None => format!("{}{}/{}/matchups", base(base_url), CHAMPIONS_PATH, champion_id),
    };
    Endpoint::new(url)
        .param("elo", elo)
        .param("limit", limit)
        .param("skip", 0)
        .param("api_key", api_key)
}
