//! Integration tests for the full capture pipeline.
//!
//! Exercises: boat positions → TrailBuffer → LoopDetector → CapturePolygon
//! → PolygonCollector → CleanupLevel
//!
//! All tests are pure logic — no engine, no rendering.

use netcapture_logic::config::NetConfig;
use netcapture_logic::constants::item_kinds;
use netcapture_logic::geometry::Vec2;
use netcapture_logic::level::{CleanupLevel, LevelConfig, LevelEvent, LevelState};
use netcapture_logic::loop_detect::LoopDetector;
use netcapture_logic::polygon::{CandidateItem, PolygonCollector};
use netcapture_logic::session::{Capture, NetSession, NetState, TickOutcome};
use netcapture_logic::trail::TrailBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Helpers ────────────────────────────────────────────────────────────

fn loose_config() -> NetConfig {
    NetConfig {
        min_sample_spacing: 1.0,
        fade_duration: 1000.0,
        max_trail_length: 500.0,
        close_distance: 1.5,
        segment_skip_count: 8,
        flash_duration: 0.5,
        auto_restart: true,
    }
}

/// Points on a circle, starting and ending at angle 0.
fn circle(center: Vec2, radius: f32, steps: usize) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let a = i as f32 / steps as f32 * std::f32::consts::TAU;
            Vec2::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

fn no_items() -> Vec<CandidateItem> {
    Vec::new()
}

fn first_capture(
    session: &mut NetSession,
    path: &[Vec2],
    items: &dyn Fn() -> Vec<CandidateItem>,
) -> Option<Capture> {
    for (i, &p) in path.iter().enumerate() {
        if let TickOutcome::Captured(c) = session.tick(p, i as f32 * 0.05, items) {
            return Some(c);
        }
    }
    None
}

// ── Closure behaviour ──────────────────────────────────────────────────

#[test]
fn square_scenario_closes_at_origin() {
    let mut session = NetSession::new(NetConfig {
        segment_skip_count: 1,
        ..loose_config()
    })
    .unwrap();
    session.begin();
    let path = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 10.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(1.0, 0.5),
    ];
    let capture = first_capture(&mut session, &path, &no_items).unwrap();
    assert_eq!(capture.closure_index, 0);
    let area = capture.polygon.area();
    assert!(area > 90.0 && area < 100.0, "area {area}");
}

#[test]
fn circle_closes_once_full_lap_is_drawn() {
    let mut session = NetSession::new(loose_config()).unwrap();
    session.begin();
    let path = circle(Vec2::ZERO, 10.0, 40);
    let mut closed_at = None;
    for (i, &p) in path.iter().enumerate() {
        if let TickOutcome::Captured(c) = session.tick(p, i as f32, &no_items) {
            closed_at = Some((i, c));
            break;
        }
    }
    let (step, capture) = closed_at.expect("circle should close");
    assert_eq!(step, 40);
    assert_eq!(capture.closure_index, 0);
    let expected = std::f32::consts::PI * 100.0;
    assert!((capture.polygon.area() - expected).abs() / expected < 0.02);
}

#[test]
fn detector_matches_brute_force_on_random_trails() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut trail = TrailBuffer::new(0.5, 1000.0, 1000.0);
        let mut p = Vec2::ZERO;
        for step in 0..rng.gen_range(3..40) {
            p = Vec2::new(p.x + rng.gen_range(-3.0..3.0), p.y + rng.gen_range(-3.0..3.0));
            trail.add_sample(p, step as f32);
        }
        let close = rng.gen_range(0.5..4.0);
        let skip = rng.gen_range(1..6);
        let detector = LoopDetector::new(close, skip);

        let samples: Vec<Vec2> = trail.samples().map(|s| s.point).collect();
        let newest = samples.len() - 1;
        let expected = (0..samples.len())
            .filter(|&i| newest >= i + skip)
            .find(|&i| samples[i].distance(samples[newest]) < close)
            .filter(|&i| newest - i + 1 >= 3);

        assert_eq!(detector.detect(&trail), expected);
        if let Some(i) = expected {
            assert!(newest - i >= skip);
        }
    }
}

#[test]
fn figure_eight_uses_even_odd_rule() {
    // Bow-tie path: both lobes enclose items, the crossing region does not
    // count twice.
    let mut session = NetSession::new(NetConfig {
        segment_skip_count: 2,
        ..loose_config()
    })
    .unwrap();
    session.begin();
    let path = [
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 10.0),
        Vec2::new(0.5, 0.5),
    ];
    let items = || {
        vec![
            CandidateItem::new(1, item_kinds::TRASH, Vec2::new(2.0, 5.0)),
            CandidateItem::new(2, item_kinds::TRASH, Vec2::new(8.0, 5.0)),
            CandidateItem::new(3, item_kinds::TRASH, Vec2::new(5.0, 1.0)),
        ]
    };
    let capture = first_capture(&mut session, &path, &items).unwrap();
    assert_eq!(capture.captured, vec![1, 2]);
}

// ── Sessions ───────────────────────────────────────────────────────────

#[test]
fn parallel_sessions_do_not_share_state() {
    let mut a = NetSession::new(loose_config()).unwrap();
    let mut b = NetSession::new(loose_config()).unwrap();
    a.begin();
    b.begin();
    let lap = circle(Vec2::ZERO, 10.0, 40);
    for (i, &p) in lap.iter().take(20).enumerate() {
        a.tick(p, i as f32, &no_items);
    }
    assert_eq!(a.trail().len(), 20);
    assert!(b.trail().is_empty());
    b.cancel();
    assert_eq!(a.state(), NetState::Drawing);
    assert_eq!(a.trail().len(), 20);
}

#[test]
fn faded_trail_cannot_close() {
    // The trail fades faster than the boat completes a lap.
    let mut session = NetSession::new(NetConfig {
        fade_duration: 5.0,
        ..loose_config()
    })
    .unwrap();
    session.begin();
    for (i, p) in circle(Vec2::ZERO, 10.0, 40).into_iter().enumerate() {
        let outcome = session.tick(p, i as f32, &no_items);
        assert!(!matches!(outcome, TickOutcome::Captured(_)));
    }
    assert!(session.trail().len() <= 6);
}

// ── Full level ─────────────────────────────────────────────────────────

#[test]
fn netting_all_rubbish_wins_the_level() {
    let mut level = CleanupLevel::new(LevelConfig {
        total_rubbish: 3,
        level_time: 120.0,
        spawn_interval: 1000.0,
        spawn_area: (20.0, 20.0),
        star_thresholds: (0.25, 0.5),
        seed: 9,
    })
    .unwrap();
    level.end_intermission();
    for x in [-3.0, 0.0, 3.0] {
        level.place(item_kinds::TRASH, Vec2::new(x, 0.0));
    }
    let turtle = level.place(item_kinds::FRIENDLY, Vec2::new(0.0, 4.0));
    let stray = level.place(item_kinds::TRASH, Vec2::new(40.0, 40.0));

    let mut session = NetSession::new(loose_config())
        .unwrap()
        .with_collector(PolygonCollector::only(&[item_kinds::TRASH]));
    session.begin();

    let dt = 0.1;
    let mut now = 0.0;
    let mut events = Vec::new();
    for p in circle(Vec2::ZERO, 8.0, 32) {
        now += dt;
        events.extend(level.update(dt));
        let live = level.items();
        if let TickOutcome::Captured(c) = session.tick(p, now, &|| live.clone()) {
            events.extend(level.apply_capture(&c));
        }
    }

    let collected = events
        .iter()
        .filter(|e| matches!(e, LevelEvent::Collected { .. }))
        .count();
    assert_eq!(collected, 3);
    assert_eq!(level.collected(), 3);
    assert!(matches!(level.state(), LevelState::EndGame { won: true, stars: 3 }));
    assert_eq!(level.items(), vec![turtle, stray]);
}
