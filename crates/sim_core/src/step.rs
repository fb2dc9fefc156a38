//! The local simulation step: movement, projectiles and contact damage.
//!
//! Runs unconditionally every tick on every participant. Authority-gated
//! effects (enemy HP) are applied directly when this participant is
//! authoritative, and emitted as intents otherwise; the network layer never
//! appears here.

use glam::Vec2;

use crate::actor::DEAD_MOVE_DRAG;
use crate::authority::Authority;
use crate::geom;
use crate::projectile::{PROJECTILE_DAMAGE, ProjKind};
use crate::world::{KILL_SCORE, WorldState};

/// Contact damage the local actor takes per tick per overlapping enemy.
pub const CONTACT_DAMAGE_PER_TICK: f32 = 0.5;

/// A follower's request that the authority debit an enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageIntent {
    pub enemy_id: String,
    pub amount: f32,
}

/// Everything a tick wants the embedding layer to act on.
#[derive(Debug, Default)]
pub struct TickOutput {
    pub damage_intents: Vec<DamageIntent>,
    /// The local actor died this tick (emit a death notification once).
    pub player_died: bool,
    /// The actor overlaps a door trigger region; presentation only.
    pub touched_door: bool,
}

pub fn step_local(world: &mut WorldState, authority: Authority, dt: f32) -> TickOutput {
    let mut out = TickOutput::default();

    // Numeric corruption is recovered locally, never fatal.
    if !world.player.pos.is_finite() {
        world.player.pos = Vec2::from_array(world.level.spawn);
        world.nan_resets += 1;
        log::warn!("player position was non-finite; reset to spawn");
    }

    move_player(world, dt);
    step_projectiles(world, authority, dt, &mut out);
    contact_damage(world, &mut out);

    out.touched_door = world
        .level
        .doors
        .iter()
        .any(|d| geom::circle_hits_rect(world.player.pos, world.player.radius, d));
    out
}

/// Axis-separated wall resolution: X and Y motion are permitted
/// independently so the actor can slide along a wall.
fn move_player(world: &mut WorldState, dt: f32) {
    let p = &world.player;
    let drag = if p.alive() { 1.0 } else { DEAD_MOVE_DRAG };
    let delta = p.vel * drag * dt;
    if delta == Vec2::ZERO {
        return;
    }
    let next = p.pos + delta;
    let r = p.radius;
    let mut can_move_x = true;
    let mut can_move_y = true;
    for wall in &world.level.walls {
        if geom::circle_hits_rect(Vec2::new(next.x, p.pos.y), r, wall) {
            can_move_x = false;
        }
        if geom::circle_hits_rect(Vec2::new(p.pos.x, next.y), r, wall) {
            can_move_y = false;
        }
    }
    if can_move_x {
        world.player.pos.x = next.x;
    }
    if can_move_y {
        world.player.pos.y = next.y;
    }
}

fn step_projectiles(world: &mut WorldState, authority: Authority, dt: f32, out: &mut TickOutput) {
    let mut i = 0usize;
    while i < world.projectiles.len() {
        {
            let p = &mut world.projectiles[i];
            p.pos += p.vel * dt;
            p.life -= 1;
        }
        let (pos, radius, kind, life) = {
            let p = &world.projectiles[i];
            (p.pos, p.radius, p.kind, p.life)
        };

        // The revive flash only decays; it never collides or damages.
        if kind == ProjKind::Burst {
            if life <= 0 {
                world.projectiles.remove(i);
            } else {
                i += 1;
            }
            continue;
        }

        let hit_wall = world.level.walls.iter().any(|w| geom::point_in_rect(pos, w));

        let mut hit_enemy = false;
        if !hit_wall {
            // Ascending index order; a projectile damages at most one enemy
            // and is then removed.
            for j in 0..world.enemies.len() {
                let e = &world.enemies[j];
                if !geom::circles_overlap(pos, radius, e.pos, e.radius) {
                    continue;
                }
                hit_enemy = true;
                if authority.is_authoritative() {
                    let e = &mut world.enemies[j];
                    e.hp -= PROJECTILE_DAMAGE;
                    if e.hp <= 0.0 {
                        world.enemies.remove(j);
                        world.score += KILL_SCORE;
                    }
                } else {
                    // The authority is the sole writer of enemy HP; ask it.
                    out.damage_intents.push(DamageIntent {
                        enemy_id: world.enemies[j].id.clone(),
                        amount: PROJECTILE_DAMAGE,
                    });
                }
                break;
            }
        }

        if life <= 0 || hit_wall || hit_enemy {
            world.projectiles.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Each participant is solely responsible for its own actor's HP, so this
/// runs regardless of authority.
fn contact_damage(world: &mut WorldState, out: &mut TickOutput) {
    for e in &world.enemies {
        if !world.player.alive() {
            break;
        }
        if geom::circles_overlap(world.player.pos, world.player.radius, e.pos, e.radius) {
            world.player.hp -= CONTACT_DAMAGE_PER_TICK;
            if world.player.hp <= 0.0 {
                world.player.die();
                out.player_died = true;
            }
        }
    }
}
