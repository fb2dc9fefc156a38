//! Projectiles are purely local: they are never transmitted, and a follower
//! reports hits as damage intents rather than applying them.

use glam::Vec2;

pub const PROJECTILE_RADIUS: f32 = 8.0;
/// Units per second.
pub const PROJECTILE_SPEED: f32 = 900.0;
pub const PROJECTILE_LIFE_TICKS: i32 = 100;
pub const PROJECTILE_DAMAGE: f32 = 25.0;

pub const REVIVE_BURST_RADIUS: f32 = 150.0;
pub const REVIVE_BURST_LIFE_TICKS: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjKind {
    /// Cast bolt: collides with walls and enemies, damages on first hit.
    Bolt,
    /// Harmless area visual (revive flash): only decays.
    Burst,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ordered element colors for rendering the gradient; visual only.
    pub colors: Vec<[f32; 4]>,
    /// Remaining lifetime in ticks.
    pub life: i32,
    pub kind: ProjKind,
}

impl Projectile {
    pub fn bolt(pos: Vec2, vel: Vec2, colors: Vec<[f32; 4]>) -> Projectile {
        Projectile {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            colors,
            life: PROJECTILE_LIFE_TICKS,
            kind: ProjKind::Bolt,
        }
    }

    pub fn burst(pos: Vec2, colors: Vec<[f32; 4]>) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: REVIVE_BURST_RADIUS,
            colors,
            life: REVIVE_BURST_LIFE_TICKS,
            kind: ProjKind::Burst,
        }
    }
}
