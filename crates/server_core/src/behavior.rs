//! Enemy behavior state machine.
//!
//! Each enemy carries a small persistent record (timer, phase, committed
//! direction) initialized lazily on its first tick. Every tick it seeks the
//! nearest alive target, dispatches on its movement pattern, then applies a
//! normalized move scaled by its configured speed. Non-finite math skips
//! the position write instead of corrupting it.

use glam::Vec2;
use sim_core::enemy::{BehaviorState, Enemy, Phase};
use sim_core::{MovePattern, WorldState};

/// Hysteresis band around an orbiter's desired ring, in world units.
const ORBIT_BAND: f32 = 10.0;
/// Charger ground speed while stalking, as a fraction of full speed.
const CHARGER_WALK_SCALE: f32 = 0.5;

pub fn step_enemies(world: &mut WorldState, targets: &[Vec2], dt: f32) {
    for e in &mut world.enemies {
        step_enemy(e, targets, dt);
    }
}

pub fn step_enemy(e: &mut Enemy, targets: &[Vec2], dt: f32) {
    let mut state = e.state.take().unwrap_or_default();
    state.timer += dt;

    // Nearest alive target; direction stays zero when nobody is alive.
    let mut dir = Vec2::ZERO;
    let mut dist = f32::INFINITY;
    for &t in targets {
        let d = e.pos.distance(t);
        if d < dist {
            dist = d;
            if d > 0.0 {
                dir = (t - e.pos) / d;
            }
        }
    }

    let (raw, scale) = dispatch(e.pattern, &mut state, dir, dist);

    let mag = raw.length();
    if mag > 0.0 && mag.is_finite() && e.pos.is_finite() {
        e.pos += (raw / mag) * (e.speed * scale * dt);
    }
    e.state = Some(state);
}

/// Returns the raw (unnormalized) move vector and the speed scale for this
/// tick, mutating phase/timer state as transitions fire.
fn dispatch(
    pattern: MovePattern,
    state: &mut BehaviorState,
    dir: Vec2,
    dist: f32,
) -> (Vec2, f32) {
    match pattern {
        MovePattern::Direct => (dir, 1.0),
        MovePattern::Orbiter { orbit_radius } => {
            if dist > orbit_radius + ORBIT_BAND {
                (dir, 1.0)
            } else if dist < orbit_radius - ORBIT_BAND {
                (-dir, 1.0)
            } else {
                // Circle the target: move along the tangent.
                (dir.perp(), 1.0)
            }
        }
        MovePattern::Zigzag {
            frequency,
            amplitude,
        } => {
            let wave = (state.timer * frequency).sin() * amplitude;
            (dir + dir.perp() * wave, 1.0)
        }
        MovePattern::Hopper {
            cooldown_s,
            duration_s,
            speed_mult,
        } => match state.phase {
            Phase::Idle | Phase::Charging => {
                if state.timer >= cooldown_s {
                    state.phase = Phase::Hopping;
                    state.timer = 0.0;
                    state.committed_dir = dir;
                }
                // Movement starts on the next tick of the hop.
                (Vec2::ZERO, 1.0)
            }
            Phase::Hopping => {
                let mv = (state.committed_dir, speed_mult);
                if state.timer >= duration_s {
                    state.phase = Phase::Idle;
                    state.timer = 0.0;
                }
                mv
            }
        },
        MovePattern::Charger {
            trigger_dist,
            cooldown_s,
            duration_s,
            speed_mult,
        } => match state.phase {
            Phase::Idle | Phase::Hopping => {
                if dist < trigger_dist && state.timer > cooldown_s {
                    state.phase = Phase::Charging;
                    state.timer = 0.0;
                    state.committed_dir = dir;
                    (Vec2::ZERO, 1.0)
                } else {
                    (dir, CHARGER_WALK_SCALE)
                }
            }
            Phase::Charging => {
                let mv = (state.committed_dir, speed_mult);
                if state.timer > duration_s {
                    state.phase = Phase::Idle;
                    state.timer = 0.0;
                }
                mv
            }
        },
    }
}
