//! Host-side vocabulary this plugin hangs off: regions, tiers, roles, patches
//! and the `Champion` entity, plus the `championgg()` extension.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::api::client::{lock, ChampionGg};
use crate::config::Config;
use crate::error::{ChampionGgError, Result};
use crate::stats::champion::{ChampionGgStats, StatsKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    NorthAmerica,
    Euw,
    Eune,
    Korea,
    Brazil,
    Lan,
    Las,
    Oceania,
    Russia,
    Turkey,
    Japan,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA",
            Region::Euw => "EUW",
            Region::Eune => "EUNE",
            Region::Korea => "KR",
            Region::Brazil => "BR",
            Region::Lan => "LAN",
            Region::Las => "LAS",
            Region::Oceania => "OCE",
            Region::Russia => "RU",
            Region::Turkey => "TR",
            Region::Japan => "JP",
        }
    }

    pub fn platform(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "na1",
            Region::Euw => "euw1",
            Region::Eune => "eun1",
            Region::Korea => "kr",
            Region::Brazil => "br1",
            Region::Lan => "la1",
            Region::Las => "la2",
            Region::Oceania => "oc1",
            Region::Russia => "ru",
            Region::Turkey => "tr1",
            Region::Japan => "jp1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = ChampionGgError;

    // Accepts both region names and platform ids.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NA" | "NA1" => Ok(Region::NorthAmerica),
            "EUW" | "EUW1" => Ok(Region::Euw),
            "EUNE" | "EUN1" => Ok(Region::Eune),
            "KR" => Ok(Region::Korea),
            "BR" | "BR1" => Ok(Region::Brazil),
            "LAN" | "LA1" => Ok(Region::Lan),
            "LAS" | "LA2" => Ok(Region::Las),
            "OCE" | "OC1" => Ok(Region::Oceania),
            "RU" => Ok(Region::Russia),
            "TR" | "TR1" => Ok(Region::Turkey),
            "JP" | "JP1" => Ok(Region::Japan),
            _ => Err(ChampionGgError::Config(format!("Unknown region: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ChampionGgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IRON" => Ok(Tier::Iron),
            "BRONZE" => Ok(Tier::Bronze),
            "SILVER" => Ok(Tier::Silver),
            "GOLD" => Ok(Tier::Gold),
            "PLATINUM" => Ok(Tier::Platinum),
            "DIAMOND" => Ok(Tier::Diamond),
            "MASTER" => Ok(Tier::Master),
            "GRANDMASTER" => Ok(Tier::Grandmaster),
            "CHALLENGER" => Ok(Tier::Challenger),
            other => Err(ChampionGgError::Transform(format!("Unknown tier: {}", other))),
        }
    }
}

/// Lane a champion's per-role statistics are aggregated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    DuoCarry,
    DuoSupport,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::DuoCarry,
        Role::DuoSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::DuoCarry => "DUO_CARRY",
            Role::DuoSupport => "DUO_SUPPORT",
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Middle => "Mid",
            Role::DuoCarry => "ADC",
            Role::DuoSupport => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChampionGgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TOP" => Ok(Role::Top),
            "JUNGLE" => Ok(Role::Jungle),
            "MIDDLE" | "MID" => Ok(Role::Middle),
            "DUO_CARRY" | "ADC" | "BOTTOM" => Ok(Role::DuoCarry),
            "DUO_SUPPORT" | "SUPPORT" | "UTILITY" => Ok(Role::DuoSupport),
            _ => Err(ChampionGgError::InvalidRole {
                expected: Role::ALL.map(|r| r.as_str()).join(", "),
                got: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Patch {
    pub name: String,
    pub region: Region,
}

impl Patch {
    pub fn new(name: &str, region: Region) -> Result<Self> {
        let valid = !name.is_empty()
            && name
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if !valid {
            return Err(ChampionGgError::InvalidPatch(name.to_string()));
        }
        Ok(Patch {
            name: name.to_string(),
            region,
        })
    }

    /// `8.24.1` is patch `8.24`: everything but the last version component.
    pub fn from_version(version: &str, region: Region) -> Result<Self> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() < 2 {
            return Err(ChampionGgError::InvalidPatch(version.to_string()));
        }
        Patch::new(&parts[..parts.len() - 1].join("."), region)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Champion {
    pub id: i64,
    pub name: String,
    pub version: String,
    pub region: Region,
}

impl Champion {
    pub fn new(id: i64, name: &str, version: &str, region: Region) -> Self {
        Champion {
            id,
            name: name.to_string(),
            version: version.to_string(),
            region,
        }
    }
}

/// What the host registers: the shared datasource plus per-champion memo.
pub struct Plugin {
    source: Arc<ChampionGg>,
    latest_version: OnceCell<String>,
    stats: Mutex<HashMap<(i64, Patch), Arc<ChampionGgStats>>>,
}

impl Plugin {
    pub fn new(config: Config) -> Self {
        Plugin::with_source(Arc::new(ChampionGg::new(config)))
    }

    pub fn with_source(source: Arc<ChampionGg>) -> Self {
        Plugin {
            source,
            latest_version: OnceCell::new(),
            stats: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Plugin::new(Config::from_env()?))
    }

    pub fn source(&self) -> &Arc<ChampionGg> {
        &self.source
    }

    pub fn latest_version(&self) -> Result<&str> {
        self.latest_version
            .get_or_try_init(|| self.source.fetch_latest_version())
            .map(String::as_str)
    }
}

pub trait ChampionGgExt {
    /// The champion.gg data for this champion.
    fn championgg(&self, plugin: &Plugin) -> Result<Arc<ChampionGgStats>>;
}

impl ChampionGgExt for Champion {
    fn championgg(&self, plugin: &Plugin) -> Result<Arc<ChampionGgStats>> {
        let latest = plugin.latest_version()?;
        if self.version != latest {
            return Err(ChampionGgError::VersionMismatch {
                version: self.version.clone(),
                latest: latest.to_string(),
            });
        }

        let patch = Patch::from_version(&self.version, self.region)?;
        let mut memo = lock(&plugin.stats);

        let stats = memo
            .entry((self.id, patch.clone()))
            .or_insert_with(|| {
                Arc::new(ChampionGgStats::new(
                    Arc::clone(&plugin.source),
                    StatsKey::new(self.id, patch),
                ))
            });
        Ok(Arc::clone(stats))
    }
}
