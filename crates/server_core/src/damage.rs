//! Authoritative application of relayed `damage_enemy` requests.
//!
//! A request naming an enemy that no longer exists is a silent no-op: the
//! authoritative state is already newer than the sender's view.

use sim_core::world::{KILL_SCORE, WorldState};

/// Debit an enemy; remove it and score on a kill. Returns whether the id
/// matched a live enemy.
pub fn apply_enemy_damage(world: &mut WorldState, enemy_id: &str, amount: f32) -> bool {
    let Some(idx) = world.enemies.iter().position(|e| e.id == enemy_id) else {
        return false;
    };
    world.enemies[idx].hp -= amount;
    if world.enemies[idx].hp <= 0.0 {
        world.enemies.remove(idx);
        world.score += KILL_SCORE;
        world.recompute_cr();
    }
    true
}
