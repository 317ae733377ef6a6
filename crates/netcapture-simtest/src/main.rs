//! NetCapture Headless Scenario Harness
//!
//! Drives the pure capture logic through scripted boat paths and a full
//! cleanup level. Runs entirely in-process — no engine, no rendering.
//!
//! Usage:
//!   cargo run -p netcapture-simtest
//!   cargo run -p netcapture-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p netcapture-simtest

use netcapture_logic::config::{validate_config, NetConfig};
use netcapture_logic::constants::{defaults, item_kinds};
use netcapture_logic::geometry::Vec2;
use netcapture_logic::level::{CleanupLevel, LevelConfig, LevelEvent, LevelState};
use netcapture_logic::polygon::{CandidateItem, PolygonCollector};
use netcapture_logic::session::{Capture, NetSession, TickOutcome};
use netcapture_logic::trail::TrailBuffer;
use serde::Deserialize;

// ── Scripted scenarios ──────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    config: NetConfig,
    path: Vec<[f32; 2]>,
    #[serde(default)]
    items: Vec<CandidateItem>,
    expect: Expectation,
}

#[derive(Debug, Deserialize)]
struct Expectation {
    closure_index: Option<usize>,
    #[serde(default)]
    captured: Vec<u32>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== NetCapture Scenario Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration validation
    results.extend(validate_configs(verbose));

    // 2. Trail bounds under a long drive
    results.extend(validate_trail_bounds(verbose));

    // 3. Scripted closure scenarios
    results.extend(run_scenarios(verbose));

    // 4. Full cleanup level
    results.extend(run_cleanup_level(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        if r.passed {
            log::info!("{} passed: {}", r.name, r.detail);
        } else {
            log::warn!("{} failed: {}", r.name, r.detail);
        }
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configs(_verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let default_errors = validate_config(&NetConfig::default());
    results.push(TestResult {
        name: "config_default_valid".into(),
        passed: default_errors.is_empty(),
        detail: format!("{} errors in default config", default_errors.len()),
    });

    let bad_configs = [
        (
            "close_distance_zero",
            NetConfig {
                close_distance: 0.0,
                ..Default::default()
            },
        ),
        (
            "skip_count_zero",
            NetConfig {
                segment_skip_count: 0,
                ..Default::default()
            },
        ),
        (
            "fade_negative",
            NetConfig {
                fade_duration: -1.0,
                ..Default::default()
            },
        ),
        (
            "length_nan",
            NetConfig {
                max_trail_length: f32::NAN,
                ..Default::default()
            },
        ),
    ];
    for (label, config) in bad_configs {
        let outcome = NetSession::new(config);
        results.push(TestResult {
            name: format!("config_rejects_{}", label),
            passed: outcome.is_err(),
            detail: match outcome {
                Err(e) => format!("rejected: {}", e),
                Ok(_) => "accepted an invalid config".into(),
            },
        });
    }

    results
}

// ── 2. Trail bounds ─────────────────────────────────────────────────────

fn validate_trail_bounds(verbose: bool) -> Vec<TestResult> {
    println!("--- Trail Bounds ---");
    let mut results = Vec::new();

    // Outward spiral: never closes, keeps pushing the length cap.
    let config = NetConfig::default();
    let mut trail = TrailBuffer::from_config(&config);
    let mut longest = 0.0f32;
    let mut oldest_age = 0.0f32;
    let dt = 0.05;
    for step in 0..2000 {
        let t = step as f32 * dt;
        let r = 2.0 + t * 0.8;
        let p = Vec2::new(r * (t * 1.3).cos(), r * (t * 1.3).sin());
        trail.evict_expired(t);
        trail.add_sample(p, t);
        longest = longest.max(trail.path_length());
        if let Some(o) = trail.oldest() {
            oldest_age = oldest_age.max(t - o.time);
        }
    }

    results.push(TestResult {
        name: "trail_length_capped".into(),
        passed: longest <= config.max_trail_length,
        detail: format!(
            "longest {:.2} vs cap {:.2}",
            longest, config.max_trail_length
        ),
    });
    results.push(TestResult {
        name: "trail_age_capped".into(),
        passed: oldest_age <= config.fade_duration,
        detail: format!(
            "oldest sample {:.2}s vs fade {:.2}s",
            oldest_age, config.fade_duration
        ),
    });

    let spacing_ok = trail
        .samples()
        .zip(trail.samples().skip(1))
        .all(|(a, b)| a.point.distance(b.point) >= config.min_sample_spacing);
    results.push(TestResult {
        name: "trail_spacing_respected".into(),
        passed: spacing_ok,
        detail: format!("{} samples at end of drive", trail.len()),
    });

    let now = 2000.0 * dt;
    let fresh = trail.points_with_freshness(now);
    let fresh_ok = fresh
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.freshness));
    results.push(TestResult {
        name: "trail_freshness_in_range".into(),
        passed: fresh_ok,
        detail: format!("{} points rendered", fresh.len()),
    });

    if verbose {
        for p in fresh.iter().rev().take(5) {
            println!(
                "    ({:7.2}, {:7.2}) freshness {:.2}",
                p.point.x, p.point.y, p.freshness
            );
        }
    }

    results
}

// ── 3. Scenarios ────────────────────────────────────────────────────────

fn run_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Closure Scenarios ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenarios_loaded".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        if verbose {
            println!("  {}: {}", scenario.name, scenario.description);
        }
        log::debug!("running scenario {} ({} samples)", scenario.name, scenario.path.len());
        results.push(run_scenario(scenario));
    }

    results
}

fn run_scenario(scenario: &Scenario) -> TestResult {
    let name = format!("scenario_{}", scenario.name);
    let mut session = match NetSession::new(scenario.config.clone()) {
        Ok(s) => s,
        Err(e) => {
            return TestResult {
                name,
                passed: false,
                detail: format!("config rejected: {}", e),
            }
        }
    };
    session.begin();

    let items = || scenario.items.clone();
    let mut capture: Option<Capture> = None;
    for (i, [x, y]) in scenario.path.iter().copied().enumerate() {
        if let TickOutcome::Captured(c) = session.tick(Vec2::new(x, y), i as f32, &items) {
            capture = Some(c);
            break;
        }
    }

    let got_index = capture.as_ref().map(|c| c.closure_index);
    let got_items = capture
        .as_ref()
        .map(|c| c.captured.clone())
        .unwrap_or_default();
    let passed = got_index == scenario.expect.closure_index && got_items == scenario.expect.captured;

    TestResult {
        name,
        passed,
        detail: match &capture {
            Some(c) => format!(
                "closed at {} (area {:.1}), captured {:?}; expected {:?} / {:?}",
                c.closure_index,
                c.polygon.area(),
                c.captured,
                scenario.expect.closure_index,
                scenario.expect.captured
            ),
            None => format!(
                "no closure; expected {:?} / {:?}",
                scenario.expect.closure_index, scenario.expect.captured
            ),
        },
    }
}

// ── 4. Cleanup level ────────────────────────────────────────────────────

fn run_cleanup_level(verbose: bool) -> Vec<TestResult> {
    println!("--- Cleanup Level ---");
    let mut results = Vec::new();

    let level_config = LevelConfig {
        total_rubbish: 5,
        level_time: 120.0,
        spawn_interval: 2.0,
        spawn_area: (20.0, 20.0),
        star_thresholds: (0.25, 0.5),
        seed: 7,
    };
    let net_config = NetConfig {
        close_distance: 1.5,
        segment_skip_count: 8,
        fade_duration: 10.0,
        max_trail_length: 200.0,
        flash_duration: 0.5,
        ..Default::default()
    };

    let mut level = match CleanupLevel::new(level_config) {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult {
                name: "level_config".into(),
                passed: false,
                detail: format!("level config rejected: {}", e),
            });
            return results;
        }
    };
    let mut session = match NetSession::new(net_config) {
        Ok(s) => s.with_collector(PolygonCollector::only(&[item_kinds::TRASH])),
        Err(e) => {
            results.push(TestResult {
                name: "level_net_config".into(),
                passed: false,
                detail: format!("net config rejected: {}", e),
            });
            return results;
        }
    };

    // A turtle sits in the middle of the patrol loop; it must survive.
    let turtle = level.place(item_kinds::FRIENDLY, Vec2::new(1.0, 1.0));

    level.end_intermission();
    session.begin();

    // The boat circles the spawn area, one sample per tick.
    let dt = 0.1;
    let radius = 16.0;
    let steps_per_lap = 48.0;
    let mut now = 0.0;
    let mut laps_closed = 0;
    let mut picked_up = 0;
    let mut spawned = 0;
    let mut tick = 0u32;
    while matches!(level.state(), LevelState::Playing) && tick < 10_000 {
        now += dt;
        tick += 1;
        for e in level.update(dt) {
            if let LevelEvent::Spawned(_) = e {
                spawned += 1;
            }
        }

        let angle = tick as f32 / steps_per_lap * std::f32::consts::TAU;
        let boat = Vec2::new(radius * angle.cos(), radius * angle.sin());
        for e in level.collect_near(boat, defaults::PICKUP_RADIUS) {
            if let LevelEvent::Collected { id, .. } = e {
                picked_up += 1;
                log::debug!("t={:.1}s hull picked up #{}", now, id);
            }
        }
        if !matches!(level.state(), LevelState::Playing) {
            break;
        }

        let live = level.items();
        if let TickOutcome::Captured(c) = session.tick(boat, now, &|| live.clone()) {
            laps_closed += 1;
            let events = level.apply_capture(&c);
            if verbose {
                println!(
                    "    t={:6.1}s lap {} closed, {} collected, total {}",
                    now,
                    laps_closed,
                    events
                        .iter()
                        .filter(|e| matches!(e, LevelEvent::Collected { .. }))
                        .count(),
                    level.collected()
                );
            }
        }
    }

    let state = level.state();
    log::info!(
        "cleanup run: {:?} after {:.1}s ({} laps, {} picked up, {} spawned)",
        state,
        now,
        laps_closed,
        picked_up,
        spawned
    );
    results.push(TestResult {
        name: "level_won".into(),
        passed: matches!(state, LevelState::EndGame { won: true, .. }),
        detail: format!(
            "{:?} after {:.1}s, {} laps, {} picked up, {} spawned",
            state, now, laps_closed, picked_up, spawned
        ),
    });
    results.push(TestResult {
        name: "level_collected_target".into(),
        passed: level.collected() >= level.config().total_rubbish,
        detail: format!(
            "{}/{} collected",
            level.collected(),
            level.config().total_rubbish
        ),
    });
    results.push(TestResult {
        name: "level_wildlife_untouched".into(),
        passed: level.items().contains(&turtle),
        detail: "turtle still on the water".into(),
    });

    results
}
