//! In-proc session hub: the relay every participant connects to.
//!
//! The hub never simulates anything. It assigns identities (first joiner is
//! host), reflects `update` traffic back out as `state`, relays damage
//! requests to everyone, runs the death/revive roster flow, and on a host
//! disconnect promotes the first survivor and ships it the last enemy
//! snapshot cached from the departed authority.

use crate::channel::{self, Rx, Tx};
use crate::frame;
use crate::message::SessionMsg;
use crate::snapshot::{ActorRep, EnemyRep, SnapshotDecode, SnapshotEncode};
use crate::transport::LocalLoopbackTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Waiting,
    Playing,
    GameOver,
}

struct HubClient {
    id: u64,
    /// hub -> participant
    tx: Tx,
    /// participant -> hub
    rx: Rx,
    alive: bool,
    last_rep: Option<ActorRep>,
}

pub struct SessionHub {
    next_id: u64,
    clients: Vec<HubClient>,
    host_id: Option<u64>,
    state: GameState,
    /// Last enemy list/CR seen from the authority; re-broadcast with every
    /// `state` and carried on host reassignment as the migration snapshot.
    cached_enemies: Vec<EnemyRep>,
    cached_cr: u32,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            clients: Vec::new(),
            host_id: None,
            state: GameState::Waiting,
            cached_enemies: Vec::new(),
            cached_cr: 0,
        }
    }

    #[must_use]
    pub fn host_id(&self) -> Option<u64> {
        self.host_id
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Register a participant and hand back its transport endpoint. The
    /// first joiner becomes host.
    pub fn join(&mut self) -> (u64, LocalLoopbackTransport) {
        let id = self.next_id;
        self.next_id += 1;
        let (tx_to_client, rx_at_client) = channel::channel();
        let (tx_at_client, rx_from_client) = channel::channel();
        if self.host_id.is_none() {
            self.host_id = Some(id);
        }
        let client = HubClient {
            id,
            tx: tx_to_client,
            rx: rx_from_client,
            alive: false,
            last_rep: None,
        };
        send_msg(
            &client.tx,
            &SessionMsg::Init {
                participant_id: id,
                is_host: self.host_id == Some(id),
                in_progress: self.state == GameState::Playing,
            },
        );
        self.clients.push(client);
        log::info!(
            "hub: participant {id} joined (host={:?}, total={})",
            self.host_id,
            self.clients.len()
        );
        (id, LocalLoopbackTransport::from_parts(tx_at_client, rx_at_client))
    }

    /// Transition the session into gameplay, resetting the roster and the
    /// cached world snapshot.
    pub fn start(&mut self) {
        self.state = GameState::Playing;
        self.cached_enemies.clear();
        self.cached_cr = 0;
        for c in &mut self.clients {
            c.alive = true;
        }
        log::info!("hub: game started with {} participants", self.clients.len());
    }

    /// Drain and process every queued inbound message.
    pub fn pump(&mut self) {
        let mut inbound: Vec<(u64, Vec<u8>)> = Vec::new();
        for c in &self.clients {
            for bytes in c.rx.drain() {
                inbound.push((c.id, bytes));
            }
        }
        for (sender, bytes) in inbound {
            let payload = match frame::read_frame(&bytes) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("hub: dropping bad frame from {sender}: {e:#}");
                    continue;
                }
            };
            let mut slice = payload;
            match SessionMsg::decode(&mut slice) {
                Ok(msg) => self.handle(sender, msg),
                Err(e) => log::warn!("hub: dropping undecodable message from {sender}: {e:#}"),
            }
        }
    }

    /// Remove a participant (transport reported the connection down).
    /// Reassigns authority when the host left.
    pub fn leave(&mut self, id: u64) {
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        if self.clients.len() == before {
            return;
        }
        log::info!("hub: participant {id} left ({} remain)", self.clients.len());
        if self.host_id == Some(id) {
            if let Some(first) = self.clients.first() {
                let new_host = first.id;
                self.host_id = Some(new_host);
                log::info!("hub: host reassigned to {new_host}");
                self.broadcast(&SessionMsg::HostReassigned {
                    new_host_id: new_host,
                    enemies: Some(self.cached_enemies.clone()),
                    cr: Some(self.cached_cr),
                });
            } else {
                // Everyone is gone; reset the session.
                self.host_id = None;
                self.state = GameState::Waiting;
                self.cached_enemies.clear();
                self.cached_cr = 0;
            }
        }
    }

    fn handle(&mut self, sender: u64, msg: SessionMsg) {
        match msg {
            SessionMsg::Update { actor, enemies, cr } => {
                if self.state != GameState::Playing {
                    return;
                }
                if self.host_id == Some(sender) {
                    if let Some(list) = enemies {
                        self.cached_enemies = list;
                    }
                    if let Some(cr) = cr {
                        self.cached_cr = cr;
                    }
                }
                let mut rep = actor;
                rep.id = sender;
                let players: Vec<ActorRep> = self
                    .clients
                    .iter()
                    .filter(|c| c.id != sender)
                    .filter_map(|c| c.last_rep)
                    .collect();
                if let Some(c) = self.clients.iter_mut().find(|c| c.id == sender) {
                    c.last_rep = Some(rep);
                    send_msg(
                        &c.tx,
                        &SessionMsg::State {
                            players,
                            enemies: Some(self.cached_enemies.clone()),
                            cr: Some(self.cached_cr),
                        },
                    );
                }
            }
            SessionMsg::DamageEnemy { enemy_id, amount } => {
                if self.state == GameState::Playing {
                    self.broadcast(&SessionMsg::DamageEnemy { enemy_id, amount });
                }
            }
            SessionMsg::PlayerDied => {
                if self.state != GameState::Playing {
                    return;
                }
                if let Some(c) = self.clients.iter_mut().find(|c| c.id == sender) {
                    c.alive = false;
                }
                if !self.clients.is_empty() && self.clients.iter().all(|c| !c.alive) {
                    self.state = GameState::GameOver;
                    self.broadcast(&SessionMsg::GameOver);
                }
            }
            SessionMsg::CastRevive => {
                if self.state != GameState::Playing {
                    return;
                }
                let targets: Vec<u64> = self
                    .clients
                    .iter()
                    .filter(|c| !c.alive)
                    .map(|c| c.id)
                    .collect();
                for target_id in targets {
                    if let Some(c) = self.clients.iter_mut().find(|c| c.id == target_id) {
                        c.alive = true;
                    }
                    self.broadcast(&SessionMsg::PlayerRevived { target_id });
                }
            }
            // Hub-originated messages arriving inbound are protocol misuse;
            // ignore rather than poison the session.
            other => log::debug!("hub: ignoring unexpected message from {sender}: {other:?}"),
        }
    }

    fn broadcast(&self, msg: &SessionMsg) {
        for c in &self.clients {
            send_msg(&c.tx, msg);
        }
    }
}

fn send_msg(tx: &Tx, msg: &SessionMsg) {
    let mut payload = Vec::new();
    msg.encode(&mut payload);
    let mut framed = Vec::with_capacity(payload.len() + 5);
    frame::write_frame(&mut framed, &payload);
    metrics::counter!("net.bytes_sent_total", "dir" => "hub_tx").increment(framed.len() as u64);
    if !tx.try_send(framed) {
        log::debug!("hub: send to departed participant dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;

    fn recv_msg(t: &LocalLoopbackTransport) -> Option<SessionMsg> {
        let bytes = t.try_recv()?;
        let payload = frame::read_frame(&bytes).ok()?;
        let mut slice = payload;
        SessionMsg::decode(&mut slice).ok()
    }

    fn send(t: &LocalLoopbackTransport, msg: &SessionMsg) {
        let mut payload = Vec::new();
        msg.encode(&mut payload);
        let mut framed = Vec::new();
        frame::write_frame(&mut framed, &payload);
        t.try_send(framed).expect("send");
    }

    #[test]
    fn first_joiner_is_host() {
        let mut hub = SessionHub::new();
        let (a_id, a) = hub.join();
        let (b_id, b) = hub.join();
        assert_eq!(hub.host_id(), Some(a_id));
        match recv_msg(&a) {
            Some(SessionMsg::Init {
                participant_id,
                is_host,
                ..
            }) => {
                assert_eq!(participant_id, a_id);
                assert!(is_host);
            }
            other => panic!("expected init, got {other:?}"),
        }
        match recv_msg(&b) {
            Some(SessionMsg::Init { is_host, .. }) => assert!(!is_host),
            other => panic!("expected init, got {other:?}"),
        }
        assert_eq!(b_id, a_id + 1);
    }

    #[test]
    fn update_reflects_state_with_cached_enemies() {
        let mut hub = SessionHub::new();
        let (host_id, host) = hub.join();
        let (_guest_id, guest) = hub.join();
        hub.start();
        let _ = recv_msg(&host);
        let _ = recv_msg(&guest);

        // Host pushes an update carrying one enemy.
        send(
            &host,
            &SessionMsg::Update {
                actor: ActorRep {
                    id: host_id,
                    pos: [10.0, 10.0],
                    alive: true,
                },
                enemies: Some(vec![EnemyRep {
                    id: "e1".into(),
                    name: "Goblin".into(),
                    pos: [0.0, 0.0],
                    radius: 14.0,
                    speed: 84.0,
                    hp: 45.0,
                    max_hp: 45.0,
                    cr: 9,
                    pattern_kind: 0,
                    pattern_params: [0.0; 4],
                }]),
                cr: Some(9),
            },
        );
        hub.pump();
        let _ = recv_msg(&host);

        // Guest update now receives the cached enemy list and the host actor.
        send(
            &guest,
            &SessionMsg::Update {
                actor: ActorRep {
                    id: 0,
                    pos: [5.0, 5.0],
                    alive: true,
                },
                enemies: None,
                cr: None,
            },
        );
        hub.pump();
        match recv_msg(&guest) {
            Some(SessionMsg::State {
                players,
                enemies,
                cr,
            }) => {
                assert_eq!(players.len(), 1);
                assert_eq!(players[0].id, host_id);
                assert_eq!(enemies.map(|e| e.len()), Some(1));
                assert_eq!(cr, Some(9));
            }
            other => panic!("expected state, got {other:?}"),
        }
    }

    #[test]
    fn host_leave_promotes_first_survivor_with_snapshot() {
        let mut hub = SessionHub::new();
        let (host_id, host) = hub.join();
        let (guest_id, guest) = hub.join();
        hub.start();
        let _ = recv_msg(&host);
        let _ = recv_msg(&guest);

        send(
            &host,
            &SessionMsg::Update {
                actor: ActorRep {
                    id: host_id,
                    pos: [0.0, 0.0],
                    alive: true,
                },
                enemies: Some(vec![EnemyRep {
                    id: "e9".into(),
                    name: "Stone Golem".into(),
                    pos: [100.0, 100.0],
                    radius: 26.0,
                    speed: 36.0,
                    hp: 150.0,
                    max_hp: 200.0,
                    cr: 7,
                    pattern_kind: 0,
                    pattern_params: [0.0; 4],
                }]),
                cr: Some(7),
            },
        );
        hub.pump();

        hub.leave(host_id);
        assert_eq!(hub.host_id(), Some(guest_id));
        match recv_msg(&guest) {
            Some(SessionMsg::HostReassigned {
                new_host_id,
                enemies,
                cr,
            }) => {
                assert_eq!(new_host_id, guest_id);
                let enemies = enemies.expect("snapshot");
                assert_eq!(enemies.len(), 1);
                assert_eq!(enemies[0].id, "e9");
                assert_eq!(cr, Some(7));
            }
            other => panic!("expected host_reassigned, got {other:?}"),
        }
    }

    #[test]
    fn all_dead_triggers_game_over_and_revive_targets_named_player() {
        let mut hub = SessionHub::new();
        let (_a_id, a) = hub.join();
        let (b_id, b) = hub.join();
        hub.start();
        let _ = recv_msg(&a);
        let _ = recv_msg(&b);

        send(&b, &SessionMsg::PlayerDied);
        hub.pump();
        // One participant alive: no game over yet.
        assert_eq!(hub.state(), GameState::Playing);

        send(&a, &SessionMsg::CastRevive);
        hub.pump();
        match recv_msg(&b) {
            Some(SessionMsg::PlayerRevived { target_id }) => assert_eq!(target_id, b_id),
            other => panic!("expected player_revived, got {other:?}"),
        }

        send(&a, &SessionMsg::PlayerDied);
        send(&b, &SessionMsg::PlayerDied);
        hub.pump();
        assert_eq!(hub.state(), GameState::GameOver);
    }
}
