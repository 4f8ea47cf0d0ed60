mod display;

use std::sync::Arc;

use anyhow::Context;
use championgg::{ChampionGg, Config, Elo, MatchupRole, MatchupsKey, Patch, Role, StatsKey};
use clap::Parser;
use display::output::{display_champion_stats, display_error, display_info, display_matchups};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "championgg")]
#[command(about = "Show champion.gg statistics and matchups for a champion", long_about = None)]
struct Args {
    /// Champion id (e.g. 103 for Ahri)
    champion: i64,

    /// Patch (default: the patch champion.gg currently aggregates)
    #[arg(short, long)]
    patch: Option<String>,

    /// Elo bracket: BRONZE, SILVER, GOLD, PLATINUM or PLATINUM_DIAMOND_MASTER_CHALLENGER
    #[arg(short, long, default_value = "PLATINUM_DIAMOND_MASTER_CHALLENGER")]
    elo: String,

    /// Only show this role (TOP, JUNGLE, MIDDLE, DUO_CARRY, DUO_SUPPORT)
    #[arg(short, long)]
    role: Option<String>,

    /// Also show best and worst matchups
    #[arg(short, long)]
    matchups: bool,

    /// Number of matchups to show in each direction
    #[arg(short, long, default_value = "5")]
    top_n: usize,

    /// Minimum games for a matchup to be listed
    #[arg(long, default_value = "100")]
    min_games: u32,

    /// Region (default: CHAMPIONGG_REGION or NA)
    #[arg(long)]
    region: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(region) = &args.region {
        config.region = region.parse()?;
    }
    let region = config.region;

    let elo: Elo = args.elo.parse()?;
    let role: Option<Role> = args.role.as_deref().map(str::parse::<Role>).transpose()?;

    let source = Arc::new(ChampionGg::new(config));

    let patch = match &args.patch {
        Some(name) => Patch::new(name, region)?,
        None => {
            display_info("Looking up the current champion.gg patch...");
            source
                .current_patch(elo)
                .context("could not determine the current patch; pass --patch")?
        }
    };

    display_info(&format!(
        "Fetching champion {} on patch {} ({})",
        args.champion, patch, elo
    ));

    let stats = source.stats_with(StatsKey::new(args.champion, patch.clone()).with_elo(elo));
    display_champion_stats(&stats, role)?;

    if args.matchups {
        let matchup_role = match role {
            Some(Role::Top) => Some(MatchupRole::Top),
            Some(Role::Jungle) => Some(MatchupRole::Jungle),
            Some(Role::Middle) => Some(MatchupRole::Middle),
            Some(Role::DuoCarry) => Some(MatchupRole::DuoCarry),
            Some(Role::DuoSupport) => Some(MatchupRole::AdcSupport),
            None => None,
        };

        let matchups = source.matchups_with(
            MatchupsKey::new(args.champion, patch, matchup_role).with_elo(elo),
        );
        display_matchups(
            "✅ Best matchups",
            &matchups.best(args.top_n, args.min_games)?,
        );
        display_matchups(
            "⚠️  Worst matchups",
            &matchups.worst(args.top_n, args.min_games)?,
        );
    }

    Ok(())
}
