//! Frame update and click handling
//!
//! `tick` is the whole per-frame update: motion for every ghost, then aging
//! and spawning. `click` runs between frames on the same thread.

use glam::Vec2;

use super::hit::{Hit, resolve_click};
use super::lifecycle::{self, LifecycleReport};
use super::motion::advance;
use super::state::Simulation;
use crate::sinks::{AudioCue, Renderer, ScoreSink};

/// Advance the simulation by `dt` ms. Any non-negative `dt` is fine,
/// including 0 and irregular frame gaps.
pub fn tick(sim: &mut Simulation, dt: f32) -> LifecycleReport {
    let dt = dt.max(0.0);
    let arena = sim.factory.arena();

    for ghost in &mut sim.ghosts {
        advance(ghost, dt, &arena, sim.factory.rng_mut());
    }

    let report = lifecycle::tick(
        &mut sim.ghosts,
        &mut sim.spawn_timer,
        &mut sim.factory,
        sim.config.max_ghosts,
        dt,
    );

    sim.stats.expired += u64::from(report.expired);
    sim.stats.spawned += u64::from(report.expired + report.timed_spawns);

    report
}

/// Shoot at `point` (logical canvas pixels). On a hit the ghost is replaced,
/// the score grows, the hit cue plays and the new total is reported. A miss
/// changes nothing and calls nobody.
pub fn click(
    sim: &mut Simulation,
    point: Vec2,
    audio: &mut impl AudioCue,
    score: &mut impl ScoreSink,
) -> Option<Hit> {
    let hit = resolve_click(&mut sim.ghosts, point)?;

    sim.score += u64::from(hit.score_delta);
    sim.stats.hits += 1;
    let replacement = sim.spawn();
    log::debug!(
        "Hit ghost {} at ({:.0}, {:.0}) for {} points, replaced by {}",
        hit.ghost.id(),
        point.x,
        point.y,
        hit.score_delta,
        replacement
    );

    audio.play_hit_cue();
    score.report_score(sim.score);

    Some(hit)
}

impl Simulation {
    /// Hand the current ghosts to a renderer
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.render(&self.ghosts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::*;
    use crate::platform::FrameClock;
    use crate::sim::state::{Ghost, Motion};
    use crate::sinks::Silent;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        cues: u32,
        scores: Vec<u64>,
    }

    impl AudioCue for Recorder {
        fn play_hit_cue(&mut self) {
            self.cues += 1;
        }
    }

    impl ScoreSink for Recorder {
        fn report_score(&mut self, total: u64) {
            self.scores.push(total);
        }
    }

    fn empty_sim() -> Simulation {
        Simulation::empty(GameConfig::default(), 12345).unwrap()
    }

    fn placed(sim: &mut Simulation, pos: Vec2, size: f32, motion: Motion) -> u32 {
        let id = sim.next_entity_id();
        sim.insert(Ghost::new(id, pos, size, 0, 0.4, 10_000.0, motion));
        id
    }

    #[test]
    fn test_click_hits_topmost_and_replaces() {
        let mut sim = empty_sim();
        let p = Vec2::new(400.0, 300.0);
        let _a = placed(&mut sim, p, 50.0, Motion::Linear { vel: Vec2::ZERO });
        let b = placed(&mut sim, p, 50.0, Motion::Linear { vel: Vec2::ZERO });

        let mut sinks = Recorder::default();
        let mut audio = Recorder::default();
        let hit = click(&mut sim, p, &mut audio, &mut sinks).unwrap();

        assert_eq!(hit.ghost.id(), b);
        assert_eq!(hit.score_delta, 15);
        assert_eq!(sim.score(), 15);
        assert_eq!(sim.population(), 2);
        assert_eq!(audio.cues, 1);
        assert_eq!(sinks.scores, vec![15]);
        assert_eq!(sim.stats().hits, 1);
    }

    #[test]
    fn test_click_miss_has_no_side_effects() {
        let mut sim = empty_sim();
        placed(
            &mut sim,
            Vec2::new(100.0, 100.0),
            40.0,
            Motion::Linear { vel: Vec2::ZERO },
        );
        let before = sim.ghosts().to_vec();

        let mut audio = Recorder::default();
        let mut score = Recorder::default();
        assert!(click(&mut sim, Vec2::new(700.0, 500.0), &mut audio, &mut score).is_none());
        assert_eq!(sim.ghosts(), before.as_slice());
        assert_eq!(audio.cues, 0);
        assert!(score.scores.is_empty());
        assert_eq!(sim.score(), 0);
    }

    #[test]
    fn test_score_accumulates() {
        let mut sim = empty_sim();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(600.0, 400.0);
        placed(&mut sim, a, 50.0, Motion::Linear { vel: Vec2::ZERO });
        placed(&mut sim, b, 70.0, Motion::Linear { vel: Vec2::ZERO });

        let mut audio = Recorder::default();
        let mut score = Recorder::default();
        let first = click(&mut sim, a, &mut audio, &mut score).unwrap();
        let second = click(&mut sim, b, &mut audio, &mut score).unwrap();
        assert_eq!(first.score_delta, 15);
        let total = u64::from(first.score_delta + second.score_delta);
        assert_eq!(score.scores, vec![15, total]);
        assert_eq!(sim.score(), total);
        assert_eq!(audio.cues, 2);
    }

    #[test]
    fn test_linear_clamp_through_tick() {
        let mut sim = empty_sim();
        placed(
            &mut sim,
            Vec2::new(15.0, 300.0),
            40.0,
            Motion::Linear {
                vel: Vec2::new(0.25, 0.0),
            },
        );
        tick(&mut sim, 1.0);
        let g = &sim.ghosts()[0];
        assert_eq!(g.pos.x, BOUNDARY_MARGIN);
        let Motion::Linear { vel } = *g.motion() else {
            panic!("variant changed");
        };
        assert!(vel.x >= 0.0);
    }

    #[test]
    fn test_fade_to_zero_replaces() {
        let mut sim = empty_sim();
        let id = sim.next_entity_id();
        sim.insert(
            Ghost::new(
                id,
                Vec2::new(300.0, 300.0),
                40.0,
                0,
                0.4,
                5000.0,
                Motion::Linear { vel: Vec2::ZERO },
            )
            .with_life(5001.0)
            .with_opacity(0.002),
        );

        let report = tick(&mut sim, 1.0);
        assert_eq!(report.expired, 1);
        assert_eq!(sim.population(), 1);
        assert_ne!(sim.ghosts()[0].id(), id);
        assert_eq!(sim.stats().expired, 1);
    }

    #[test]
    fn test_long_host_gap_expires_in_one_frame() {
        let mut sim = empty_sim();
        let id = sim.next_entity_id();
        sim.insert(
            Ghost::new(
                id,
                Vec2::new(300.0, 300.0),
                40.0,
                0,
                0.4,
                8000.0,
                Motion::Linear { vel: Vec2::ZERO },
            )
            .with_life(7500.0),
        );

        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        let dt = clock.delta(2000.0);
        assert_eq!(dt, 1000.0);

        // 8500 ms old and opacity 1 - 2 floors at 0: gone this frame
        let report = tick(&mut sim, dt);
        assert_eq!(report.expired, 1);
        assert_eq!(report.timed_spawns, 0);
        assert_eq!(sim.population(), 1);
        assert_ne!(sim.ghosts()[0].id(), id);
    }

    #[test]
    fn test_zero_dt_does_not_age() {
        let mut sim = Simulation::new(GameConfig::default(), 5).unwrap();
        // First frame snaps orbiting ghosts onto their circle
        tick(&mut sim, 0.0);
        let settled = sim.ghosts().to_vec();
        tick(&mut sim, 0.0);
        assert_eq!(sim.ghosts(), settled.as_slice());
        assert!(sim.ghosts().iter().all(|g| g.life() == 0.0));
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut sim = Simulation::new(GameConfig::default(), 5).unwrap();
        tick(&mut sim, 0.0);
        let settled = sim.ghosts().to_vec();
        tick(&mut sim, -40.0);
        assert_eq!(sim.ghosts(), settled.as_slice());
    }

    #[test]
    fn test_population_grows_to_max_only() {
        let config = GameConfig {
            min_ghosts: 1,
            max_ghosts: 3,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, 77).unwrap();
        for _ in 0..400 {
            tick(&mut sim, 16.0);
            assert!(sim.population() <= 3);
        }
        assert_eq!(sim.population(), 3);
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(GameConfig::default(), 99999).unwrap();
        let mut b = Simulation::new(GameConfig::default(), 99999).unwrap();
        for i in 0..600 {
            let dt = 10.0 + (i % 7) as f32 * 3.0;
            tick(&mut a, dt);
            tick(&mut b, dt);
        }
        assert_eq!(a.ghosts(), b.ghosts());
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_render_sees_stacking_order() {
        struct Capture(Vec<u32>);
        impl Renderer for Capture {
            fn render(&mut self, ghosts: &[Ghost]) {
                self.0 = ghosts.iter().map(|g| g.id()).collect();
            }
        }
        let sim = Simulation::new(GameConfig::default(), 3).unwrap();
        let mut capture = Capture(Vec::new());
        sim.render(&mut capture);
        let ids: Vec<u32> = sim.ghosts().iter().map(|g| g.id()).collect();
        assert_eq!(capture.0, ids);
        sim.render(&mut Silent);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Frame(f32),
        Click(f32, f32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u32..400).prop_map(|ms| Op::Frame(ms as f32 * 0.5)),
            1 => (0u32..900, 0u32..600).prop_map(|(x, y)| Op::Click(x as f32, y as f32)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_over_random_sessions(
            seed in any::<u64>(),
            ops in prop::collection::vec(op_strategy(), 1..300),
        ) {
            let config = GameConfig::default();
            let mut sim = Simulation::new(config.clone(), seed).unwrap();
            let arena = sim.arena();

            for op in ops {
                let before: HashMap<u32, f32> =
                    sim.ghosts().iter().map(|g| (g.id(), g.opacity())).collect();
                let population = sim.population();

                match op {
                    Op::Frame(dt) => {
                        let report = tick(&mut sim, dt);
                        let grown = sim.population() - population;
                        prop_assert!(grown <= 1);
                        prop_assert_eq!(grown as u32, report.timed_spawns);
                    }
                    Op::Click(x, y) => {
                        click(&mut sim, Vec2::new(x, y), &mut Silent, &mut Silent);
                        prop_assert_eq!(sim.population(), population);
                    }
                }

                prop_assert!(sim.population() <= config.max_ghosts);
                for g in sim.ghosts() {
                    prop_assert!((0.0..=1.0).contains(&g.opacity()));
                    prop_assert!(arena.contains(g.pos), "ghost {} escaped to {:?}", g.id(), g.pos);
                    if let Some(&old) = before.get(&g.id()) {
                        prop_assert!(g.opacity() <= old);
                        if g.opacity() < old {
                            prop_assert!(g.is_expired());
                        }
                    }
                }
            }
        }
    }
}
