//! CR-budgeted enemy spawning. Authoritative participants only.

use data_runtime::templates::TemplateDb;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_core::enemy::Enemy;
use sim_core::world::{MAX_CR, WorldState};

/// Per-tick probability of attempting a spawn.
pub const SPAWN_CHANCE: f32 = 0.05;
/// Enemies enter from just outside the left or right level edge.
pub const SPAWN_EDGE_MARGIN: f32 = 50.0;
const ID_LEN: usize = 8;
const ID_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub struct Spawner {
    rng: ChaCha8Rng,
    pub spawn_chance: f32,
}

impl Spawner {
    #[must_use]
    pub fn new(seed: u64) -> Spawner {
        Spawner {
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawn_chance: SPAWN_CHANCE,
        }
    }

    /// Roll the per-tick spawn chance; on success pick a random template
    /// and instantiate it at a random point along one of the two horizontal
    /// extremes, unless its CR would blow the budget, in which case the
    /// attempt is silently dropped (not retried).
    pub fn maybe_spawn(&mut self, world: &mut WorldState, db: &TemplateDb) -> Option<String> {
        if db.is_empty() || self.rng.random::<f32>() >= self.spawn_chance {
            return None;
        }
        let name = &db.names()[self.rng.random_range(0..db.names().len())];
        let t = db.get(name)?;
        if world.current_cr + t.cr > MAX_CR {
            metrics::counter!("spawn.rejected_total").increment(1);
            log::debug!(
                "spawn of '{name}' rejected: cr {} + {} exceeds {MAX_CR}",
                world.current_cr,
                t.cr
            );
            return None;
        }
        let x = if self.rng.random::<bool>() {
            -SPAWN_EDGE_MARGIN
        } else {
            world.level.width + SPAWN_EDGE_MARGIN
        };
        let y = self.rng.random_range(0.0..world.level.height);
        let id = self.fresh_id();
        world
            .enemies
            .push(Enemy::from_template(id.clone(), t, Vec2::new(x, y)));
        world.recompute_cr();
        metrics::counter!("spawn.enemies_total").increment(1);
        log::debug!("spawned '{name}' as {id} at ({x:.0}, {y:.0})");
        Some(id)
    }

    /// Opaque 8-character base-36 id, unique across the session in practice.
    pub fn fresh_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_CHARS[self.rng.random_range(0..ID_CHARS.len())] as char)
            .collect()
    }
}
