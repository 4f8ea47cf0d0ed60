use championgg::host::Role;
use championgg::stats::champion::ChampionGgStats;
use championgg::stats::data::MatchupData;
use championgg::Result;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RoleRow {
    role: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    #[tabled(rename = "play rate")]
    play_rate: String,
    #[tabled(rename = "ban rate")]
    ban_rate: String,
    kda: String,
    gold: String,
    cs: String,
    score: String,
}

#[derive(Tabled)]
struct MatchupRow {
    rank: String,
    opponent: String,
    role: String,
    games: String,
    win_rate: String,
    gold_diff: String,
}

fn percent(value: Option<&f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

fn number(value: Option<&f64>) -> String {
    value
        .map(|v| format!("{:.0}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn colored_win_rate(win_rate: f64) -> String {
    let text = format!("{:.1}%", win_rate * 100.0);
    if win_rate >= 0.52 {
        text.green().to_string()
    } else if win_rate < 0.48 {
        text.red().to_string()
    } else {
        text
    }
}

pub fn display_champion_stats(stats: &ChampionGgStats, role_filter: Option<Role>) -> Result<()> {
    let metadata = stats.championgg_metadata()?;
    let tiers = metadata
        .elo
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "\n{}",
        format!("📊 champion.gg stats for champion {} (patch {})", stats.id(), metadata.patch)
            .bold()
            .cyan()
    );
    println!("{} {}", "Elo:".bold(), tiers);
    println!("{}\n", "=".repeat(80).cyan());

    let win_rate = stats.win_rate()?;
    let play_rate = stats.play_rate()?;
    let ban_rate = stats.ban_rate()?;
    let kills = stats.kills()?;
    let deaths = stats.deaths()?;
    let assists = stats.assists()?;
    let gold = stats.gold_earned()?;
    let cs = stats.minions_killed()?;
    let score = stats.performance_score()?;

    let mut rows = vec![];
    for role in stats.roles()? {
        if role_filter.is_some_and(|r| r != *role) {
            continue;
        }

        let kda = match (kills.get(role), deaths.get(role), assists.get(role)) {
            (Some(k), Some(d), Some(a)) => format!("{:.1}/{:.1}/{:.1}", k, d, a),
            _ => "-".to_string(),
        };

        rows.push(RoleRow {
            role: role.friendly_name().to_string(),
            win_rate: win_rate
                .get(role)
                .map(|v| colored_win_rate(*v))
                .unwrap_or_else(|| "-".to_string()),
            play_rate: percent(play_rate.get(role)),
            ban_rate: percent(ban_rate.get(role)),
            kda,
            gold: number(gold.get(role)),
            cs: number(cs.get(role)),
            score: score
                .get(role)
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string()),
        });
    }

    if rows.is_empty() {
        println!("{}", "No data for the requested role".yellow());
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);

    Ok(())
}

pub fn display_matchups(title: &str, matchups: &[&MatchupData]) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if matchups.is_empty() {
        println!("{}", "No matchups with enough games".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, matchup) in matchups.iter().enumerate() {
        rows.push(MatchupRow {
            rank: format!("#{}", idx + 1),
            opponent: matchup.opponent_id.to_string(),
            role: matchup.role.to_string(),
            games: matchup.count.to_string(),
            win_rate: colored_win_rate(matchup.champion.win_rate),
            gold_diff: format!(
                "{:+.0}",
                matchup.champion.gold_earned - matchup.opponent.gold_earned
            ),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}
