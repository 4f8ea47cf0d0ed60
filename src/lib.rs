//! champion.gg statistics for League of Legends champions.
//!
//! [`ChampionGg`] is the datasource: it builds champion.gg v2 requests, keeps
//! under the API's two request windows and caches responses in-process.
//! Responses move through three layers: the wire `Dto`s in [`api::models`],
//! the per-role `Data` records in [`stats::data`], and the lazily loaded core
//! objects [`ChampionGgStats`] and [`ChampionGgMatchups`]. The [`host`]
//! module adds `championgg()` to [`host::Champion`].

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod rate_limit;
pub mod stats;

pub use api::client::ChampionGg;
pub use api::endpoints::{Elo, MatchupRole};
pub use config::Config;
pub use error::{ChampionGgError, Result};
pub use host::{Champion, ChampionGgExt, Patch, Plugin, Region, Role, Tier};
pub use stats::champion::{ChampionGgStats, StatsKey};
pub use stats::matchups::{ChampionGgMatchups, MatchupsKey};
