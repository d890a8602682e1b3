//! Per-ghost movement
//!
//! Linear and Circular ghosts are pure functions of their state and `dt`.
//! Random-walk ghosts touch the RNG only when they pick a new target.

use glam::Vec2;

use super::rng::SimRng;
use super::state::{Arena, Ghost, Motion};
use crate::consts::*;
use crate::heading;

/// Move one ghost by `dt` ms, then keep it inside the arena
pub fn advance(ghost: &mut Ghost, dt: f32, arena: &Arena, rng: &mut SimRng) {
    let speed = ghost.speed();
    match &mut ghost.motion {
        Motion::Linear { vel } => {
            ghost.pos += *vel * dt;
        }
        Motion::RandomWalk {
            target,
            dwell,
            since_retarget,
        } => {
            *since_retarget += dt;
            let to_target = *target - ghost.pos;
            let dist = to_target.length();
            if dist > ARRIVE_DISTANCE {
                ghost.pos += to_target / dist * speed * dt * WANDER_SPEED_FACTOR;
            }
            if *since_retarget > *dwell {
                *target = arena.random_target(rng);
                *since_retarget = 0.0;
            }
        }
        Motion::Circular {
            center,
            radius,
            angle,
            angular_speed,
        } => {
            *angle += *angular_speed * dt;
            ghost.pos = *center + heading(*angle) * *radius;
        }
    }

    clamp_to_arena(ghost, arena);
}

/// Clamp position into `[margin, side - margin]` on both axes. A Linear
/// ghost that touched a wall has its velocity turned back inward.
pub fn clamp_to_arena(ghost: &mut Ghost, arena: &Arena) {
    let (min, max) = (arena.min(), arena.max());
    // Sign each velocity axis must have after the clamp, if any
    let mut reflect = Vec2::ZERO;

    if ghost.pos.x < min.x {
        ghost.pos.x = min.x;
        reflect.x = 1.0;
    }
    if ghost.pos.x > max.x {
        ghost.pos.x = max.x;
        reflect.x = -1.0;
    }
    if ghost.pos.y < min.y {
        ghost.pos.y = min.y;
        reflect.y = 1.0;
    }
    if ghost.pos.y > max.y {
        ghost.pos.y = max.y;
        reflect.y = -1.0;
    }

    if let Motion::Linear { vel } = &mut ghost.motion {
        if reflect.x != 0.0 {
            vel.x = vel.x.abs() * reflect.x;
        }
        if reflect.y != 0.0 {
            vel.y = vel.y.abs() * reflect.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(900.0, 600.0)
    }

    fn ghost(pos: Vec2, motion: Motion) -> Ghost {
        Ghost::new(1, pos, 50.0, 0, 0.5, 10_000.0, motion)
    }

    #[test]
    fn test_linear_euler_step() {
        let mut g = ghost(
            Vec2::new(100.0, 100.0),
            Motion::Linear {
                vel: Vec2::new(0.2, -0.1),
            },
        );
        advance(&mut g, 100.0, &arena(), &mut SimRng::new(0));
        assert!((g.pos - Vec2::new(120.0, 90.0)).length() < 1e-4);
    }

    #[test]
    fn test_linear_clamped_at_left_wall() {
        let mut g = ghost(
            Vec2::new(15.0, 300.0),
            Motion::Linear {
                vel: Vec2::new(0.3, 0.0),
            },
        );
        advance(&mut g, 1.0, &arena(), &mut SimRng::new(0));
        assert_eq!(g.pos.x, 20.0);
        let Motion::Linear { vel } = *g.motion() else {
            panic!("variant changed");
        };
        assert!(vel.x >= 0.0);
    }

    #[test]
    fn test_linear_reflects_off_far_walls() {
        let mut g = ghost(
            Vec2::new(875.0, 575.0),
            Motion::Linear {
                vel: Vec2::new(0.5, 0.5),
            },
        );
        advance(&mut g, 20.0, &arena(), &mut SimRng::new(0));
        assert_eq!(g.pos, Vec2::new(880.0, 580.0));
        let Motion::Linear { vel } = *g.motion() else {
            panic!("variant changed");
        };
        assert_eq!(vel, Vec2::new(-0.5, -0.5));

        // Next step moves back inside
        advance(&mut g, 10.0, &arena(), &mut SimRng::new(0));
        assert!(g.pos.x < 880.0 && g.pos.y < 580.0);
    }

    #[test]
    fn test_random_walk_at_target_stays_put() {
        let start = Vec2::new(300.0, 300.0);
        let mut g = ghost(
            start,
            Motion::RandomWalk {
                target: start,
                dwell: 1000.0,
                since_retarget: 0.0,
            },
        );
        let mut rng = SimRng::new(0);
        for _ in 0..9 {
            advance(&mut g, 100.0, &arena(), &mut rng);
            assert_eq!(g.pos, start);
        }
        let Motion::RandomWalk { since_retarget, .. } = *g.motion() else {
            panic!("variant changed");
        };
        assert!((since_retarget - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_random_walk_steers_toward_target() {
        let mut g = ghost(
            Vec2::new(100.0, 100.0),
            Motion::RandomWalk {
                target: Vec2::new(200.0, 100.0),
                dwell: 5000.0,
                since_retarget: 0.0,
            },
        );
        advance(&mut g, 10.0, &arena(), &mut SimRng::new(0));
        // 0.5 px/ms * 10 ms * 0.9
        assert!((g.pos.x - 104.5).abs() < 1e-4);
        assert!((g.pos.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_random_walk_retargets_after_dwell() {
        let target = Vec2::new(300.0, 300.0);
        let mut g = ghost(
            target,
            Motion::RandomWalk {
                target,
                dwell: 600.0,
                since_retarget: 599.0,
            },
        );
        let mut rng = SimRng::new(8);
        let mut expected_rng = SimRng::new(8);
        let expected = arena().random_target(&mut expected_rng);

        advance(&mut g, 2.0, &arena(), &mut rng);
        let Motion::RandomWalk {
            target: new_target,
            since_retarget,
            ..
        } = *g.motion()
        else {
            panic!("variant changed");
        };
        assert_eq!(since_retarget, 0.0);
        assert_eq!(new_target, expected);
    }

    #[test]
    fn test_random_walk_no_rng_before_dwell() {
        let mut g = ghost(
            Vec2::new(100.0, 100.0),
            Motion::RandomWalk {
                target: Vec2::new(400.0, 400.0),
                dwell: 2000.0,
                since_retarget: 0.0,
            },
        );
        let mut rng = SimRng::new(21);
        advance(&mut g, 16.0, &arena(), &mut rng);
        // Untouched RNG yields the same next draw as a fresh one
        assert_eq!(rng.unit().to_bits(), SimRng::new(21).unit().to_bits());
    }

    #[test]
    fn test_circular_uses_no_rng() {
        let center = Vec2::new(450.0, 300.0);
        let mut g = ghost(
            center,
            Motion::Circular {
                center,
                radius: 60.0,
                angle: 1.0,
                angular_speed: 0.02,
            },
        );
        let mut rng = SimRng::new(33);
        for dt in [0.0, 16.0, 17.0, 1000.0] {
            advance(&mut g, dt, &arena(), &mut rng);
        }
        assert_eq!(rng.unit().to_bits(), SimRng::new(33).unit().to_bits());
    }

    #[test]
    fn test_circular_follows_orbit() {
        let center = Vec2::new(400.0, 300.0);
        let mut g = ghost(
            center,
            Motion::Circular {
                center,
                radius: 50.0,
                angle: 0.0,
                angular_speed: 0.01,
            },
        );
        advance(&mut g, 157.079_63, &arena(), &mut SimRng::new(0));
        // Quarter turn
        assert!((g.pos - Vec2::new(400.0, 350.0)).length() < 1e-2);
        assert!((g.pos.distance(center) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_circular_clamped_but_center_kept() {
        let center = Vec2::new(60.0, 300.0);
        let mut g = ghost(
            center,
            Motion::Circular {
                center,
                radius: 80.0,
                angle: std::f32::consts::PI - 0.01,
                angular_speed: 0.0,
            },
        );
        advance(&mut g, 16.0, &arena(), &mut SimRng::new(0));
        assert_eq!(g.pos.x, 20.0);
        let Motion::Circular { center: c, .. } = *g.motion() else {
            panic!("variant changed");
        };
        assert_eq!(c, center);
    }

    #[test]
    fn test_deterministic_without_rng() {
        let make = || {
            ghost(
                Vec2::new(450.0, 250.0),
                Motion::Linear {
                    vel: Vec2::new(0.7, 0.4),
                },
            )
        };
        let (mut a, mut b) = (make(), make());
        for dt in [16.0, 17.0, 33.0, 0.0, 250.0] {
            advance(&mut a, dt, &arena(), &mut SimRng::new(1));
            advance(&mut b, dt, &arena(), &mut SimRng::new(2));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_dt_is_noop_inside_arena() {
        let mut g = ghost(
            Vec2::new(200.0, 200.0),
            Motion::Linear {
                vel: Vec2::new(1.0, 1.0),
            },
        );
        let before = g.clone();
        advance(&mut g, 0.0, &arena(), &mut SimRng::new(0));
        assert_eq!(g, before);
    }
}
