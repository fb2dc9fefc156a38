//! Inbound message application.
//!
//! Buffers the remote-actor table (replaced wholesale per `state`), adopts
//! authoritative enemy/CR fields into the world when this participant is a
//! follower, and keeps the presentation-only art cache warm. Anything that
//! needs authority-side handling is surfaced as an `InboundEvent` for the
//! runtime to route.

use std::collections::HashMap;

use anyhow::Result;
use data_runtime::templates::TemplateDb;
use glam::Vec2;
use net_core::frame;
use net_core::message::SessionMsg;
use net_core::snapshot::{ActorRep, SnapshotDecode};
use sim_core::WorldState;

use crate::session::Session;

/// Presentation-only cache of art paths keyed by template name, attached
/// lazily as enemies first appear in a snapshot. Authoritative fields are
/// never touched from here.
#[derive(Debug, Default)]
pub struct ArtCache {
    map: HashMap<String, String>,
}

impl ArtCache {
    pub fn ensure(&mut self, name: &str, db: &TemplateDb) {
        if self.map.contains_key(name) {
            return;
        }
        if let Some(path) = db.get(name).and_then(|t| t.art_path.clone()) {
            self.map.insert(name.to_string(), path);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Messages the replication layer cannot fully apply by itself.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A peer requested enemy damage; apply only if authoritative.
    DamageRequest { enemy_id: String, amount: f32 },
    /// This participant was just promoted by a host reassignment.
    BecameHost,
    GameOver,
}

#[derive(Debug, Default)]
pub struct ReplicationBuffer {
    pub remote_actors: HashMap<u64, ActorRep>,
    pub art: ArtCache,
}

impl ReplicationBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of alive remote actors, for enemy AI targeting.
    pub fn alive_remote_positions(&self) -> Vec<Vec2> {
        self.remote_actors
            .values()
            .filter(|a| a.alive)
            .map(|a| Vec2::new(a.pos[0], a.pos[1]))
            .collect()
    }

    /// Apply one framed inbound message. Decode failures bubble up so the
    /// runtime can log-and-continue; a bad message never kills the tick.
    pub fn apply_message(
        &mut self,
        session: &mut Session,
        world: &mut WorldState,
        db: &TemplateDb,
        bytes: &[u8],
    ) -> Result<Option<InboundEvent>> {
        let payload = frame::read_frame(bytes)?;
        let mut slice = payload;
        let msg = SessionMsg::decode(&mut slice)?;
        Ok(self.apply(session, world, db, msg))
    }

    fn apply(
        &mut self,
        session: &mut Session,
        world: &mut WorldState,
        db: &TemplateDb,
        msg: SessionMsg,
    ) -> Option<InboundEvent> {
        match msg {
            SessionMsg::Init {
                participant_id,
                is_host,
                in_progress: _,
            } => {
                session.apply_init(participant_id, is_host);
                None
            }
            SessionMsg::State {
                players,
                enemies,
                cr,
            } => {
                // Last writer wins, wholesale: stale entries disappear.
                self.remote_actors = players.into_iter().map(|p| (p.id, p)).collect();
                if !session.authority().is_authoritative() {
                    if let Some(reps) = enemies {
                        for rep in &reps {
                            self.art.ensure(&rep.name, db);
                        }
                        world.adopt_enemy_snapshot(&reps, db);
                    }
                    if let Some(cr) = cr {
                        world.current_cr = cr;
                    }
                }
                None
            }
            SessionMsg::DamageEnemy { enemy_id, amount } => {
                Some(InboundEvent::DamageRequest { enemy_id, amount })
            }
            SessionMsg::PlayerRevived { target_id } => {
                // Only the named target applies a revive to itself.
                if target_id == session.self_id && !world.player.alive() {
                    world.player.revive();
                    log::info!("revived by a teammate");
                }
                None
            }
            SessionMsg::HostReassigned {
                new_host_id,
                enemies,
                cr,
            } => session
                .apply_host_reassigned(world, db, new_host_id, enemies, cr)
                .then_some(InboundEvent::BecameHost),
            SessionMsg::GameOver => Some(InboundEvent::GameOver),
            // Participant->session traffic echoed back is protocol misuse.
            other => {
                log::debug!("ignoring unexpected inbound message: {other:?}");
                None
            }
        }
    }
}
