//! sim_core: shared simulation model and the per-participant local step.
//!
//! Everything here runs identically on every participant regardless of
//! role. Authority-gated systems (enemy AI, spawning, damage application)
//! live in `server_core`; this crate only decides *whether* a mutation is
//! applied locally or turned into an outbound intent.

pub mod actor;
pub mod authority;
pub mod enemy;
pub mod geom;
pub mod projectile;
pub mod spellqueue;
pub mod step;
pub mod world;

pub use actor::{LifeStatus, PlayerState};
pub use authority::Authority;
pub use data_runtime::templates::MovePattern;
pub use enemy::{BehaviorState, Enemy, Phase};
pub use projectile::{ProjKind, Projectile};
pub use spellqueue::{CastOutcome, SpellQueue};
pub use step::{DamageIntent, TickOutput, step_local};
pub use world::WorldState;
