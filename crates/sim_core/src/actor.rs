//! Local player actor. Remote actors are read-only `ActorRep` mirrors owned
//! by the replication layer; this type is only ever the local one.

use glam::Vec2;
use net_core::snapshot::ActorRep;

pub const PLAYER_RADIUS: f32 = 20.0;
/// Units per second.
pub const PLAYER_SPEED: f32 = 420.0;
pub const PLAYER_MAX_HP: f32 = 100.0;
/// Dead actors drift at reduced speed instead of stopping outright.
pub const DEAD_MOVE_DRAG: f32 = 0.5;
pub const REVIVE_HP_FRACTION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStatus {
    Alive,
    Dead,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub status: LifeStatus,
}

impl PlayerState {
    pub fn new(spawn: [f32; 2]) -> Self {
        Self {
            pos: Vec2::from_array(spawn),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            status: LifeStatus::Alive,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.status == LifeStatus::Alive
    }

    pub fn die(&mut self) {
        self.hp = 0.0;
        self.status = LifeStatus::Dead;
    }

    /// Restore to half health, as applied on a targeted revive.
    pub fn revive(&mut self) {
        self.status = LifeStatus::Alive;
        self.hp = self.max_hp * REVIVE_HP_FRACTION;
    }

    pub fn to_rep(&self, id: u64) -> ActorRep {
        ActorRep {
            id,
            pos: [self.pos.x, self.pos.y],
            alive: self.alive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_zeroes_hp_and_revive_restores_half() {
        let mut p = PlayerState::new([0.0, 0.0]);
        p.die();
        assert_eq!(p.hp, 0.0);
        assert!(!p.alive());
        p.revive();
        assert!(p.alive());
        assert_eq!(p.hp, PLAYER_MAX_HP * 0.5);
    }
}
