//! Per-participant runtime: one tick of the whole core.
//!
//! Order per tick: drain inbound session messages, run the local
//! simulation step, run authoritative systems when this participant holds
//! authority, then broadcast the periodic update. A failing tick is
//! recorded in the status readout and skipped; the loop never halts.

use anyhow::Result;
use client_core::{InboundEvent, ReplicationBuffer, Session};
use data_runtime::elements::ElementId;
use data_runtime::level::Level;
use data_runtime::templates::TemplateDb;
use net_core::frame;
use net_core::message::SessionMsg;
use net_core::snapshot::SnapshotEncode;
use net_core::transport::{LocalLoopbackTransport, Transport};
use server_core::Spawner;
use sim_core::{CastOutcome, WorldState, step_local};

/// Operational readout consumed by presentation alongside the world.
#[derive(Debug, Default)]
pub struct RuntimeStatus {
    pub last_error: Option<String>,
    pub game_over: bool,
    pub touching_door: bool,
}

pub struct Participant {
    pub session: Session,
    pub world: WorldState,
    pub replication: ReplicationBuffer,
    pub spawner: Spawner,
    pub templates: TemplateDb,
    pub status: RuntimeStatus,
    transport: Option<LocalLoopbackTransport>,
}

impl Participant {
    /// Load data from `data/` (or compiled defaults) and start offline.
    pub fn new(seed: u64) -> Result<Participant> {
        let templates = TemplateDb::load_default()?;
        let level = Level::load_default()?;
        Ok(Self::with_data(templates, level, seed))
    }

    pub fn with_data(templates: TemplateDb, level: Level, seed: u64) -> Participant {
        Participant {
            session: Session::offline(),
            world: WorldState::new(level),
            replication: ReplicationBuffer::new(),
            spawner: Spawner::new(seed),
            templates,
            status: RuntimeStatus::default(),
            transport: None,
        }
    }

    /// Attach a live session transport. Identity and role arrive with the
    /// `init` message on the next tick's drain.
    pub fn connect(&mut self, transport: LocalLoopbackTransport) {
        self.transport = Some(transport);
        self.session.connection_up();
    }

    /// The transport reported the connection down. The participant keeps
    /// simulating alone (and is therefore authoritative) until the next
    /// `init` re-derives its role.
    pub fn disconnect(&mut self) {
        self.transport = None;
        self.session.connection_down();
    }

    pub fn enqueue_element(&mut self, element: ElementId) {
        self.world.queue.enqueue(element);
    }

    /// Cast the queued spell. Projectiles stay local; a revive combo also
    /// owes the session a `cast_revive` request.
    pub fn cast(&mut self) {
        match self.world.queue.cast(&self.world.player) {
            CastOutcome::Nothing => {}
            CastOutcome::Fired(p) => self.world.projectiles.push(p),
            CastOutcome::ReviveRequested { visual } => {
                self.world.projectiles.push(visual);
                self.send(&SessionMsg::CastRevive);
            }
        }
    }

    /// Run one simulation tick. Never panics the loop: failures land in
    /// `status.last_error` and the next tick proceeds normally.
    pub fn tick(&mut self, dt: f32) {
        let t0 = std::time::Instant::now();
        if let Err(e) = self.tick_inner(dt) {
            self.status.last_error = Some(format!("{e:#}"));
            log::error!("tick failed (continuing): {e:#}");
        }
        metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }

    fn tick_inner(&mut self, dt: f32) -> Result<()> {
        // 1) Apply whatever the transport buffered since last tick. A
        //    malformed message is dropped, never fatal.
        if let Some(t) = &self.transport {
            for bytes in t.drain() {
                match self.replication.apply_message(
                    &mut self.session,
                    &mut self.world,
                    &self.templates,
                    &bytes,
                ) {
                    Ok(Some(InboundEvent::DamageRequest { enemy_id, amount })) => {
                        // Relayed to everyone; only the authority applies.
                        if self.session.authority().is_authoritative() {
                            let _ = server_core::apply_enemy_damage(
                                &mut self.world,
                                &enemy_id,
                                amount,
                            );
                        }
                    }
                    Ok(Some(InboundEvent::BecameHost)) => {
                        log::info!("authority transferred to this participant");
                    }
                    Ok(Some(InboundEvent::GameOver)) => self.status.game_over = true,
                    Ok(None) => {}
                    Err(e) => log::warn!("dropping malformed session message: {e:#}"),
                }
            }
        }

        // 2) Local simulation runs regardless of role.
        let authority = self.session.authority();
        let out = step_local(&mut self.world, authority, dt);
        self.status.touching_door = out.touched_door;
        if out.player_died {
            self.send(&SessionMsg::PlayerDied);
        }
        for intent in out.damage_intents {
            self.send(&SessionMsg::DamageEnemy {
                enemy_id: intent.enemy_id,
                amount: intent.amount,
            });
        }

        // 3) Authority-gated systems: AI, spawning, CR.
        if authority.is_authoritative() {
            let targets = self
                .world
                .alive_targets(&self.replication.alive_remote_positions());
            server_core::step_authoritative(
                &mut self.world,
                &mut self.spawner,
                &self.templates,
                &targets,
                dt,
            );
        }

        // 4) Periodic update; the authority attaches the enemy list and CR.
        if self.session.connected {
            let actor = self.world.player.to_rep(self.session.self_id);
            let (enemies, cr) = if authority.is_authoritative() {
                (Some(self.world.enemy_reps()), Some(self.world.current_cr))
            } else {
                (None, None)
            };
            self.send(&SessionMsg::Update { actor, enemies, cr });
        }
        Ok(())
    }

    /// Fire-and-forget send; a dropped transport just logs.
    fn send(&self, msg: &SessionMsg) {
        let Some(t) = &self.transport else { return };
        if !self.session.connected {
            return;
        }
        let mut payload = Vec::new();
        msg.encode(&mut payload);
        let mut framed = Vec::with_capacity(payload.len() + 5);
        frame::write_frame(&mut framed, &payload);
        metrics::counter!("net.bytes_sent_total", "dir" => "tx").increment(framed.len() as u64);
        if t.try_send(framed).is_err() {
            log::debug!("send dropped: transport disconnected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_participant_simulates_and_spawns_alone() {
        let mut p = Participant::with_data(
            TemplateDb::builtin(),
            Level::builtin_arena(),
            13,
        );
        p.spawner.spawn_chance = 1.0;
        for _ in 0..30 {
            p.tick(1.0 / 60.0);
        }
        assert!(p.session.authority().is_authoritative());
        assert!(!p.world.enemies.is_empty(), "offline authority spawns");
        assert!(p.status.last_error.is_none());
    }

    #[test]
    fn cast_pushes_a_local_projectile() {
        let mut p = Participant::with_data(
            TemplateDb::builtin(),
            Level::builtin_arena(),
            13,
        );
        p.enqueue_element(ElementId::Fire);
        p.cast();
        assert_eq!(p.world.projectiles.len(), 1);
        assert!(p.world.queue.is_empty());
    }
}
