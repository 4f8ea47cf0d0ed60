use std::sync::Arc;
use std::thread;
use std::time::{Duration as StdDuration, Instant};

use championgg::host::{Champion, ChampionGgExt, Plugin};
use championgg::rate_limit::{FixedWindow, MultiWindowLimiter};
use championgg::stats::transform;
use championgg::{ChampionGg, ChampionGgError, Config, Elo, MatchupRole, Patch, Region, Role, StatsKey};
use httpmock::prelude::*;
use chrono::Duration;
use serde_json::{json, Value};

fn champion_list_body() -> Value {
    json!([
        {
            "_id": {"championId": 103, "role": "MIDDLE"},
            "championId": 103,
            "role": "MIDDLE",
            "elo": "PLATINUM,DIAMOND,MASTER,CHALLENGER",
            "patch": "8.24",
            "winRate": 0.53,
            "playRate": 0.08,
            "percentRolePlayed": 0.91,
            "banRate": 0.02,
            "kills": 7.2,
            "deaths": 5.1,
            "assists": 7.9,
            "goldEarned": 11200.0,
            "minionsKilled": 170.0,
            "overallPerformanceScore": 64.0,
            "damageComposition": {"percentMagical": 0.87, "percentPhysical": 0.05, "percentTrue": 0.08, "total": 21000.0}
        },
        {
            "_id": {"championId": 103, "role": "DUO_SUPPORT"},
            "championId": 103,
            "role": "DUO_SUPPORT",
            "elo": "PLATINUM,DIAMOND,MASTER,CHALLENGER",
            "patch": "8.24",
            "winRate": 0.47,
            "percentRolePlayed": 0.09
        },
        {
            "_id": {"championId": 1, "role": "MIDDLE"},
            "championId": 1,
            "role": "MIDDLE",
            "elo": "PLATINUM,DIAMOND,MASTER,CHALLENGER",
            "patch": "8.24",
            "winRate": 0.49
        }
    ])
}

fn source_for(server: &MockServer) -> Arc<ChampionGg> {
    let config = Config::new("test-key")
        .with_base_url(server.base_url())
        .with_ddragon_url(server.base_url());
    Arc::new(ChampionGg::new(config))
}

fn patch() -> Patch {
    Patch::new("8.24", Region::NorthAmerica).unwrap()
}

#[test]
fn stats_load_lazily_once_and_share_the_list() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/champions")
            .query_param("api_key", "test-key")
            .query_param("elo", "PLATINUM_DIAMOND_MASTER_CHALLENGER")
            .query_param("champData", "kda,damage,minions,wards,overallPerformanceScore,goldEarned")
            .query_param("limit", "300")
            .query_param("skip", "0")
            .query_param("sort", "winRate-desc")
            .query_param("abriged", "false");
        then.status(200).json_body(champion_list_body());
    });

    let source = source_for(&server);
    let ahri = source.stats(103, patch());
    assert!(!ahri.is_loaded());
    list.assert_hits(0);

    let win_rate = ahri.win_rate().unwrap();
    assert_eq!(win_rate[&Role::Middle], 0.53);
    assert_eq!(win_rate[&Role::DuoSupport], 0.47);
    assert_eq!(ahri.play_rate_by_role().unwrap()[&Role::Middle], 0.91);
    assert_eq!(ahri.performance_score().unwrap()[&Role::Middle], 64.0);
    assert_eq!(ahri.damage_composition().unwrap()[&Role::Middle].percent_magical, 0.87);
    assert!(ahri.kills().unwrap().get(&Role::DuoSupport).is_none());
    assert_eq!(ahri.roles().unwrap(), &[Role::Middle, Role::DuoSupport]);

    let annie = source.stats(1, patch());
    assert_eq!(annie.win_rate().unwrap()[&Role::Middle], 0.49);

    list.assert_hits(1);
}

#[test]
fn metadata_reports_tiers_and_patch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions");
        then.status(200).json_body(champion_list_body());
    });

    let stats = source_for(&server).stats(103, patch());
    let metadata = stats.championgg_metadata().unwrap();
    assert_eq!(metadata.patch.name, "8.24");
    assert_eq!(
        metadata.elo,
        transform::parse_elo("PLATINUM,DIAMOND,MASTER,CHALLENGER").unwrap()
    );
}

#[test]
fn elo_is_part_of_the_cache_key() {
    let server = MockServer::start();
    let gold = server.mock(|when, then| {
        when.method(GET).path("/v2/champions").query_param("elo", "GOLD");
        then.status(200).json_body(champion_list_body());
    });
    let high = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/champions")
            .query_param("elo", "PLATINUM_DIAMOND_MASTER_CHALLENGER");
        then.status(200).json_body(champion_list_body());
    });

    let source = source_for(&server);
    source
        .stats_with(StatsKey::new(103, patch()).with_elo(Elo::Gold))
        .win_rate()
        .unwrap();
    source.stats(103, patch()).win_rate().unwrap();
    source.stats(1, patch()).win_rate().unwrap();

    gold.assert_hits(1);
    high.assert_hits(1);
    assert_eq!(source.cached_responses(), 2);

    source.clear_cache();
    source.stats(103, patch()).win_rate().unwrap();
    high.assert_hits(2);
}

#[test]
fn missing_champion_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions");
        then.status(200).json_body(champion_list_body());
    });

    let stats = source_for(&server).stats(9999, patch());
    assert!(matches!(stats.win_rate(), Err(ChampionGgError::NotFound(_))));
}

#[test]
fn forbidden_and_other_statuses_are_mapped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions");
        then.status(403);
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions/103/matchups");
        then.status(404);
    });

    let source = source_for(&server);
    assert!(matches!(
        source.stats(103, patch()).win_rate(),
        Err(ChampionGgError::Forbidden)
    ));
    assert!(matches!(
        source.matchups(103, patch(), None).all(),
        Err(ChampionGgError::NotFound(_))
    ));
}

#[test]
fn malformed_body_is_a_json_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions");
        then.status(200).body("<html>maintenance</html>");
    });

    let stats = source_for(&server).stats(103, patch());
    assert!(matches!(stats.win_rate(), Err(ChampionGgError::Json(_))));
}

#[test]
fn matchups_are_oriented_ranked_and_cached() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/champions/103/MIDDLE/matchups")
            .query_param("limit", "99999")
            .query_param("skip", "0");
        then.status(200).json_body(json!([
            {
                "_id": {"champ1_id": 103, "champ2_id": 1, "role": "MIDDLE"},
                "count": 500,
                "champ1": {"winrate": 0.56, "goldEarned": 11000.0},
                "champ2": {"winrate": 0.44, "goldEarned": 10400.0}
            },
            {
                "_id": {"champ1_id": 7, "champ2_id": 103, "role": "MIDDLE"},
                "count": 300,
                "champ1": {"winrate": 0.58},
                "champ2": {"winrate": 0.42}
            },
            {
                "_id": {"champ1_id": 103, "champ2_id": 45, "role": "MIDDLE"},
                "count": 12,
                "champ1": {"winrate": 0.70},
                "champ2": {"winrate": 0.30}
            }
        ]));
    });

    let source = source_for(&server);
    let matchups = source.matchups(103, patch(), Some(MatchupRole::Middle));

    let against_leblanc = matchups.against(7).unwrap();
    assert_eq!(against_leblanc.len(), 1);
    assert_eq!(against_leblanc[0].champion.win_rate, 0.42);
    assert_eq!(against_leblanc[0].opponent.win_rate, 0.58);

    let best = matchups.best(5, 100).unwrap();
    assert_eq!(best.iter().map(|m| m.opponent_id).collect::<Vec<_>>(), vec![1, 7]);
    let worst = matchups.worst(1, 0).unwrap();
    assert_eq!(worst[0].opponent_id, 7);
    assert_eq!(matchups.best(1, 0).unwrap()[0].opponent_id, 45);

    let again = source.matchups(103, patch(), Some(MatchupRole::Middle));
    assert_eq!(again.all().unwrap().len(), 3);
    mock.assert_hits(1);
}

#[test]
fn current_patch_comes_from_site_information() {
    let server = MockServer::start();
    let general = server.mock(|when, then| {
        when.method(GET).path("/v2/general").query_param("elo", "GOLD");
        then.status(200).json_body(json!([
            {"elo": "GOLD", "patch": "8.24", "championCount": 141, "lastUpdate": "2018-12-05T10:00:00Z"}
        ]));
    });

    let source = source_for(&server);
    assert_eq!(source.current_patch(Elo::Gold).unwrap().name, "8.24");
    assert_eq!(source.current_patch(Elo::Gold).unwrap().name, "8.24");
    general.assert_hits(1);
}

#[test]
fn champion_extension_requires_latest_version() {
    let server = MockServer::start();
    let versions = server.mock(|when, then| {
        when.method(GET).path("/api/versions.json");
        then.status(200).json_body(json!(["8.24.1", "8.23.1", "8.22.1"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v2/champions");
        then.status(200).json_body(champion_list_body());
    });

    let plugin = Plugin::with_source(source_for(&server));

    let old = Champion::new(103, "Ahri", "8.23.1", Region::NorthAmerica);
    assert!(matches!(
        old.championgg(&plugin),
        Err(ChampionGgError::VersionMismatch { .. })
    ));

    let ahri = Champion::new(103, "Ahri", "8.24.1", Region::NorthAmerica);
    let stats = ahri.championgg(&plugin).unwrap();
    assert_eq!(stats.patch().name, "8.24");
    assert_eq!(stats.win_rate().unwrap()[&Role::Middle], 0.53);

    let again = ahri.championgg(&plugin).unwrap();
    assert!(Arc::ptr_eq(&stats, &again));
    assert!(again.is_loaded());

    versions.assert_hits(1);
}

#[test]
fn champion_extension_keeps_regions_apart() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/versions.json");
        then.status(200).json_body(json!(["8.24.1"]));
    });

    let plugin = Plugin::with_source(source_for(&server));
    let na = Champion::new(103, "Ahri", "8.24.1", Region::NorthAmerica)
        .championgg(&plugin)
        .unwrap();
    let kr = Champion::new(103, "Ahri", "8.24.1", Region::Korea)
        .championgg(&plugin)
        .unwrap();

    assert_eq!(na.region(), Region::NorthAmerica);
    assert_eq!(kr.region(), Region::Korea);
    assert!(!Arc::ptr_eq(&na, &kr));
}

fn site_information_body(elo: &str) -> Value {
    json!([{"elo": elo, "patch": "8.24"}])
}

#[test]
fn server_rate_limit_is_retried_then_reported() {
    let server = MockServer::start();
    let general = server.mock(|when, then| {
        when.method(GET).path("/v2/general");
        then.status(429);
    });

    let config = Config::new("test-key")
        .with_base_url(server.base_url())
        .with_retry_base_ms(1);
    let limiter = MultiWindowLimiter::new(vec![FixedWindow::new(Duration::seconds(600), 10)]);
    let source = ChampionGg::with_rate_limiter(config, limiter);

    assert!(matches!(
        source.current_patch(Elo::Gold),
        Err(ChampionGgError::RateLimited)
    ));
    general.assert_hits(4);
    assert_eq!(source.remaining_permits(), 6);
}

#[test]
fn requests_wait_for_the_limiter() {
    let server = MockServer::start();
    let gold = server.mock(|when, then| {
        when.method(GET).path("/v2/general").query_param("elo", "GOLD");
        then.status(200).json_body(site_information_body("GOLD"));
    });
    let silver = server.mock(|when, then| {
        when.method(GET).path("/v2/general").query_param("elo", "SILVER");
        then.status(200).json_body(site_information_body("SILVER"));
    });

    let config = Config::new("test-key").with_base_url(server.base_url());
    let limiter = MultiWindowLimiter::new(vec![FixedWindow::new(Duration::seconds(1), 1)]);
    let source = ChampionGg::with_rate_limiter(config, limiter);

    let started = Instant::now();
    source.current_patch(Elo::Gold).unwrap();
    source.current_patch(Elo::Silver).unwrap();

    assert!(started.elapsed() >= StdDuration::from_millis(900));
    gold.assert_hits(1);
    silver.assert_hits(1);
}

#[test]
fn stale_entries_are_refetched() {
    let server = MockServer::start();
    let general = server.mock(|when, then| {
        when.method(GET).path("/v2/general");
        then.status(200).json_body(site_information_body("GOLD"));
    });

    let config = Config::new("test-key")
        .with_base_url(server.base_url())
        .with_cache_max_age(0);
    let source = ChampionGg::new(config);

    source.current_patch(Elo::Gold).unwrap();
    thread::sleep(StdDuration::from_millis(5));
    source.current_patch(Elo::Gold).unwrap();

    general.assert_hits(2);
}

#[test]
fn huge_max_age_still_serves_from_cache() {
    let server = MockServer::start();
    let general = server.mock(|when, then| {
        when.method(GET).path("/v2/general");
        then.status(200).json_body(site_information_body("GOLD"));
    });

    let config = Config::new("test-key")
        .with_base_url(server.base_url())
        .with_cache_max_age(u64::MAX);
    let source = ChampionGg::new(config);

    source.current_patch(Elo::Gold).unwrap();
    source.current_patch(Elo::Gold).unwrap();

    general.assert_hits(1);
}
