//! Spell queue: element picks accumulate (max 5), opposing elements
//! annihilate, and a cast turns the queue into one projectile, or into a
//! revive request when the life+lightning combo is present.

use data_runtime::elements::{ElementId, TRANSPARENT};
use glam::Vec2;

use crate::actor::PlayerState;
use crate::projectile::{PROJECTILE_SPEED, Projectile};

pub const QUEUE_CAP: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct SpellQueue {
    items: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub enum CastOutcome {
    /// Empty queue or dead caster: nothing happens, queue untouched.
    Nothing,
    Fired(Projectile),
    /// Revive combo: the caller owes the session a revive request; the
    /// projectile is the harmless area flash.
    ReviveRequested { visual: Projectile },
}

impl SpellQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Queue an element. If it opposes an element already queued, the most
    /// recent occurrence of the opposing element is removed instead of
    /// appending. Full queues ignore the pick.
    pub fn enqueue(&mut self, id: ElementId) {
        if self.items.len() >= QUEUE_CAP {
            return;
        }
        if let Some(op) = id.opposite() {
            if let Some(idx) = self.items.iter().rposition(|&e| e == op) {
                self.items.remove(idx);
                return;
            }
        }
        self.items.push(id);
    }

    /// Consume the queue into a cast outcome. Clears the queue on every
    /// outcome except `Nothing`.
    pub fn cast(&mut self, player: &PlayerState) -> CastOutcome {
        if self.items.is_empty() || !player.alive() {
            return CastOutcome::Nothing;
        }

        let has = |e: ElementId| self.items.contains(&e);
        if has(ElementId::Life) && has(ElementId::Lightning) {
            self.items.clear();
            let visual = Projectile::burst(player.pos, vec![ElementId::Life.color(), TRANSPARENT]);
            return CastOutcome::ReviveRequested { visual };
        }

        // Fire along current movement; fall back to the canonical forward
        // direction when standing still.
        let mut dir = player.vel;
        if dir == Vec2::ZERO {
            dir = Vec2::X;
        }
        let vel = dir.normalize() * PROJECTILE_SPEED;
        let colors: Vec<[f32; 4]> = self.items.iter().map(|e| e.color()).collect();
        self.items.clear();
        CastOutcome::Fired(Projectile::bolt(player.pos, vel, colors))
    }
}
