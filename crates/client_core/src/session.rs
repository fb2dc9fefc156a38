//! Session identity and authority bookkeeping, including host migration.

use data_runtime::templates::TemplateDb;
use net_core::snapshot::EnemyRep;
use sim_core::{Authority, WorldState};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub connected: bool,
    pub is_host: bool,
    pub self_id: u64,
}

impl Session {
    /// No transport at all: the participant simulates alone and is always
    /// authoritative.
    #[must_use]
    pub fn offline() -> Session {
        Session::default()
    }

    #[inline]
    #[must_use]
    pub fn authority(&self) -> Authority {
        Authority::derive(self.connected, self.is_host)
    }

    pub fn apply_init(&mut self, participant_id: u64, is_host: bool) {
        self.self_id = participant_id;
        self.is_host = is_host;
        log::info!("session init: id={participant_id} host={is_host}");
    }

    pub fn connection_up(&mut self) {
        self.connected = true;
    }

    /// Transport dropped. Role is re-derived from the next `init` or
    /// `host_reassigned`; until then this participant simulates alone.
    pub fn connection_down(&mut self) {
        self.connected = false;
        self.is_host = false;
    }

    /// Apply a `host_reassigned` notification. Every participant recomputes
    /// its own flag by id comparison; a newly promoted authority seeds its
    /// enemy list and CR from the attached snapshot, or starts empty when
    /// none was carried. Returns whether this participant was promoted.
    pub fn apply_host_reassigned(
        &mut self,
        world: &mut WorldState,
        db: &TemplateDb,
        new_host_id: u64,
        enemies: Option<Vec<EnemyRep>>,
        cr: Option<u32>,
    ) -> bool {
        let was_host = self.is_host;
        self.is_host = self.self_id == new_host_id;
        if was_host || !self.is_host {
            return false;
        }
        match enemies {
            Some(reps) => {
                world.adopt_enemy_snapshot(&reps, db);
                log::info!(
                    "promoted to host; seeded {} enemies from snapshot",
                    world.enemies.len()
                );
            }
            None => {
                // Never reconstruct history: AI and spawning restart from
                // an empty set.
                world.enemies.clear();
                log::info!("promoted to host with no snapshot; starting empty");
            }
        }
        match cr {
            Some(cr) => world.current_cr = cr,
            None => world.recompute_cr(),
        }
        true
    }
}
