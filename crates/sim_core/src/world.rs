//! The single owning context for everything one participant simulates.
//!
//! Enemy list and CR have exactly one writer at any instant: the
//! authoritative participant. On followers they are mirrors replaced
//! wholesale by replication, never mutated in place.

use data_runtime::level::Level;
use data_runtime::templates::TemplateDb;
use glam::Vec2;
use net_core::snapshot::EnemyRep;

use crate::actor::PlayerState;
use crate::enemy::Enemy;
use crate::projectile::Projectile;
use crate::spellqueue::SpellQueue;

/// Global ceiling for the summed challenge rating of live enemies.
pub const MAX_CR: u32 = 100;
pub const KILL_SCORE: u32 = 10;

#[derive(Debug)]
pub struct WorldState {
    pub level: Level,
    pub player: PlayerState,
    pub queue: SpellQueue,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub current_cr: u32,
    pub score: u32,
    /// Count of NaN position recoveries, surfaced in the status readout.
    pub nan_resets: u32,
}

impl WorldState {
    pub fn new(level: Level) -> WorldState {
        let player = PlayerState::new(level.spawn);
        WorldState {
            level,
            player,
            queue: SpellQueue::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            current_cr: 0,
            score: 0,
            nan_resets: 0,
        }
    }

    /// Back to a fresh round: full health, no enemies, no projectiles.
    pub fn reset(&mut self) {
        self.player = PlayerState::new(self.level.spawn);
        self.queue.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.current_cr = 0;
        self.score = 0;
    }

    pub fn recompute_cr(&mut self) {
        self.current_cr = self.enemies.iter().map(|e| e.cr).sum();
    }

    /// Replace the enemy mirror verbatim from an authoritative snapshot.
    pub fn adopt_enemy_snapshot(&mut self, reps: &[EnemyRep], db: &TemplateDb) {
        self.enemies = reps.iter().map(|r| Enemy::from_rep(r, db)).collect();
    }

    pub fn enemy_reps(&self) -> Vec<EnemyRep> {
        self.enemies.iter().map(Enemy::to_rep).collect()
    }

    pub fn nearest_enemy(&self) -> Option<&Enemy> {
        let p = self.player.pos;
        self.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(p)
                .total_cmp(&b.pos.distance_squared(p))
        })
    }

    /// Positions the enemy AI may pursue: the local player when alive plus
    /// any alive remote actors supplied by the replication layer.
    pub fn alive_targets(&self, remote_alive: &[Vec2]) -> Vec<Vec2> {
        let mut targets = Vec::with_capacity(1 + remote_alive.len());
        if self.player.alive() {
            targets.push(self.player.pos);
        }
        targets.extend_from_slice(remote_alive);
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_runtime::templates::TemplateDb;

    fn world_with_enemies() -> WorldState {
        let db = TemplateDb::builtin();
        let mut w = WorldState::new(Level::builtin_arena());
        let t = db.get("Goblin").expect("goblin");
        for i in 0..3 {
            w.enemies.push(Enemy::from_template(
                format!("gob{i}"),
                t,
                Vec2::new(100.0 * i as f32, 0.0),
            ));
        }
        w
    }

    #[test]
    fn cr_is_sum_of_live_enemies() {
        let mut w = world_with_enemies();
        w.recompute_cr();
        assert_eq!(w.current_cr, 27);
        w.enemies.pop();
        w.recompute_cr();
        assert_eq!(w.current_cr, 18);
    }

    #[test]
    fn snapshot_adoption_replaces_wholesale() {
        let db = TemplateDb::builtin();
        let mut w = world_with_enemies();
        let reps = vec![w.enemies[2].to_rep()];
        w.adopt_enemy_snapshot(&reps, &db);
        assert_eq!(w.enemies.len(), 1);
        assert_eq!(w.enemies[0].id, "gob2");
    }

    #[test]
    fn dead_player_is_not_a_target() {
        let mut w = world_with_enemies();
        let remotes = [Vec2::new(5.0, 5.0)];
        assert_eq!(w.alive_targets(&remotes).len(), 2);
        w.player.die();
        let targets = w.alive_targets(&remotes);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0], remotes[0]);
    }
}
