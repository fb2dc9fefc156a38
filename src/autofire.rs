//! Auto-fire drill: a removable test harness that drives combat traffic.
//!
//! Every interval it either casts the revive combo (when a teammate is
//! down) or lobs a fire+earth bolt at the nearest enemy. Used by the demo
//! binary and end-to-end tests; never part of a real input path.

use data_runtime::elements::ElementId;
use glam::Vec2;
use sim_core::projectile::{PROJECTILE_SPEED, Projectile};

use crate::runtime::Participant;

pub struct AutoFire {
    pub interval_ticks: u32,
    counter: u32,
}

impl AutoFire {
    #[must_use]
    pub fn new(interval_ticks: u32) -> AutoFire {
        AutoFire {
            interval_ticks,
            counter: 0,
        }
    }

    pub fn step(&mut self, p: &mut Participant) {
        self.counter += 1;
        if self.counter < self.interval_ticks {
            return;
        }
        self.counter = 0;

        // Teammate down? Revive takes priority over shooting.
        let anyone_dead = p.replication.remote_actors.values().any(|a| !a.alive);
        if anyone_dead && p.world.player.alive() {
            p.world.queue.clear();
            p.enqueue_element(ElementId::Life);
            p.enqueue_element(ElementId::Lightning);
            p.cast();
            return;
        }

        if !p.world.player.alive() {
            return;
        }
        let Some(target) = p.world.nearest_enemy().map(|e| e.pos) else {
            return;
        };

        let dir = target - p.world.player.pos;
        let vel = if dir == Vec2::ZERO {
            Vec2::new(PROJECTILE_SPEED, 0.0)
        } else {
            dir.normalize() * PROJECTILE_SPEED
        };
        let colors = vec![ElementId::Fire.color(), ElementId::Earth.color()];
        p.world
            .projectiles
            .push(Projectile::bolt(p.world.player.pos, vel, colors));
    }
}
