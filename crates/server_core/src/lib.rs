//! server_core: systems only the authoritative participant runs.
//!
//! Enemy AI, spawning and enemy HP mutation live here. Nothing in this
//! crate touches the network; the embedding runtime decides each tick
//! whether this participant holds authority and calls in accordingly.

use data_runtime::templates::TemplateDb;
use glam::Vec2;
use sim_core::WorldState;

pub mod behavior;
pub mod damage;
pub mod spawn;

pub use damage::apply_enemy_damage;
pub use spawn::Spawner;

/// One authoritative tick: recompute the CR total, roll a spawn, then run
/// the behavior state machine for every enemy.
pub fn step_authoritative(
    world: &mut WorldState,
    spawner: &mut Spawner,
    db: &TemplateDb,
    targets: &[Vec2],
    dt: f32,
) {
    let t0 = std::time::Instant::now();
    world.recompute_cr();
    spawner.maybe_spawn(world, db);
    behavior::step_enemies(world, targets, dt);
    let ms = t0.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("tick.authoritative_ms").record(ms);
}
