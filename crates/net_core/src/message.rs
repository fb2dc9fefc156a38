//! Session message vocabulary.
//!
//! One tagged enum covers the whole participant<->session exchange. Neither
//! `state` nor `damage_enemy` carries a sequence number: delivery is
//! last-writer-wins and fire-and-forget, so a stale `state` can briefly
//! regress a follower's enemy mirror and a duplicated damage request is
//! applied twice. Accepted tradeoff given the short broadcast interval.

use anyhow::{Result, bail};

use crate::snapshot::{
    ActorRep, EnemyRep, SnapshotDecode, SnapshotEncode, get_bool, get_u8, get_u32, get_u64,
};

pub const TAG_INIT: u8 = 0xA0;
pub const TAG_UPDATE: u8 = 0xA1;
pub const TAG_STATE: u8 = 0xA2;
pub const TAG_DAMAGE_ENEMY: u8 = 0xA3;
pub const TAG_PLAYER_DIED: u8 = 0xA4;
pub const TAG_CAST_REVIVE: u8 = 0xA5;
pub const TAG_PLAYER_REVIVED: u8 = 0xA6;
pub const TAG_HOST_REASSIGNED: u8 = 0xA7;
pub const TAG_GAME_OVER: u8 = 0xA8;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionMsg {
    /// Session -> joining participant: identity and current role.
    Init {
        participant_id: u64,
        is_host: bool,
        in_progress: bool,
    },
    /// Participant -> session, every tick. The authoritative participant
    /// additionally attaches its enemy list and CR total.
    Update {
        actor: ActorRep,
        enemies: Option<Vec<EnemyRep>>,
        cr: Option<u32>,
    },
    /// Session -> participant fan-out of everyone else's actors plus the
    /// authority's last enemy list/CR.
    State {
        players: Vec<ActorRep>,
        enemies: Option<Vec<EnemyRep>>,
        cr: Option<u32>,
    },
    /// Non-authoritative hit request; relayed to everyone, applied only by
    /// the authority. No acknowledgement.
    DamageEnemy { enemy_id: String, amount: f32 },
    PlayerDied,
    CastRevive,
    /// Applied only by the participant whose id matches `target_id`.
    PlayerRevived { target_id: u64 },
    /// Authority transfer. Carries the session's cached enemy snapshot so
    /// the promoted participant can seed its world state.
    HostReassigned {
        new_host_id: u64,
        enemies: Option<Vec<EnemyRep>>,
        cr: Option<u32>,
    },
    GameOver,
}

fn put_enemies_opt(out: &mut Vec<u8>, enemies: &Option<Vec<EnemyRep>>) {
    match enemies {
        Some(list) => {
            out.push(1);
            let n = u32::try_from(list.len()).unwrap_or(0);
            out.extend_from_slice(&n.to_le_bytes());
            for e in &list[..n as usize] {
                e.encode(out);
            }
        }
        None => out.push(0),
    }
}

fn get_enemies_opt(inp: &mut &[u8]) -> Result<Option<Vec<EnemyRep>>> {
    if !get_bool(inp)? {
        return Ok(None);
    }
    let n = get_u32(inp)? as usize;
    let mut list = Vec::with_capacity(n.min(1024));
    for _ in 0..n {
        list.push(EnemyRep::decode(inp)?);
    }
    Ok(Some(list))
}

fn put_u32_opt(out: &mut Vec<u8>, v: &Option<u32>) {
    match v {
        Some(v) => {
            out.push(1);
            out.extend_from_slice(&v.to_le_bytes());
        }
        None => out.push(0),
    }
}

fn get_u32_opt(inp: &mut &[u8]) -> Result<Option<u32>> {
    if get_bool(inp)? {
        Ok(Some(get_u32(inp)?))
    } else {
        Ok(None)
    }
}

impl SnapshotEncode for SessionMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            SessionMsg::Init {
                participant_id,
                is_host,
                in_progress,
            } => {
                out.push(TAG_INIT);
                out.extend_from_slice(&participant_id.to_le_bytes());
                out.push(u8::from(*is_host));
                out.push(u8::from(*in_progress));
            }
            SessionMsg::Update { actor, enemies, cr } => {
                out.push(TAG_UPDATE);
                actor.encode(out);
                put_enemies_opt(out, enemies);
                put_u32_opt(out, cr);
            }
            SessionMsg::State {
                players,
                enemies,
                cr,
            } => {
                out.push(TAG_STATE);
                let n = u32::try_from(players.len()).unwrap_or(0);
                out.extend_from_slice(&n.to_le_bytes());
                for p in &players[..n as usize] {
                    p.encode(out);
                }
                put_enemies_opt(out, enemies);
                put_u32_opt(out, cr);
            }
            SessionMsg::DamageEnemy { enemy_id, amount } => {
                out.push(TAG_DAMAGE_ENEMY);
                crate::snapshot::put_str(out, enemy_id);
                out.extend_from_slice(&amount.to_le_bytes());
            }
            SessionMsg::PlayerDied => out.push(TAG_PLAYER_DIED),
            SessionMsg::CastRevive => out.push(TAG_CAST_REVIVE),
            SessionMsg::PlayerRevived { target_id } => {
                out.push(TAG_PLAYER_REVIVED);
                out.extend_from_slice(&target_id.to_le_bytes());
            }
            SessionMsg::HostReassigned {
                new_host_id,
                enemies,
                cr,
            } => {
                out.push(TAG_HOST_REASSIGNED);
                out.extend_from_slice(&new_host_id.to_le_bytes());
                put_enemies_opt(out, enemies);
                put_u32_opt(out, cr);
            }
            SessionMsg::GameOver => out.push(TAG_GAME_OVER),
        }
    }
}

impl SnapshotDecode for SessionMsg {
    fn decode(inp: &mut &[u8]) -> Result<Self> {
        let tag = get_u8(inp)?;
        Ok(match tag {
            TAG_INIT => SessionMsg::Init {
                participant_id: get_u64(inp)?,
                is_host: get_bool(inp)?,
                in_progress: get_bool(inp)?,
            },
            TAG_UPDATE => SessionMsg::Update {
                actor: ActorRep::decode(inp)?,
                enemies: get_enemies_opt(inp)?,
                cr: get_u32_opt(inp)?,
            },
            TAG_STATE => {
                let n = get_u32(inp)? as usize;
                let mut players = Vec::with_capacity(n.min(1024));
                for _ in 0..n {
                    players.push(ActorRep::decode(inp)?);
                }
                SessionMsg::State {
                    players,
                    enemies: get_enemies_opt(inp)?,
                    cr: get_u32_opt(inp)?,
                }
            }
            TAG_DAMAGE_ENEMY => SessionMsg::DamageEnemy {
                enemy_id: crate::snapshot::get_str(inp)?,
                amount: crate::snapshot::get_f32(inp)?,
            },
            TAG_PLAYER_DIED => SessionMsg::PlayerDied,
            TAG_CAST_REVIVE => SessionMsg::CastRevive,
            TAG_PLAYER_REVIVED => SessionMsg::PlayerRevived {
                target_id: get_u64(inp)?,
            },
            TAG_HOST_REASSIGNED => SessionMsg::HostReassigned {
                new_host_id: get_u64(inp)?,
                enemies: get_enemies_opt(inp)?,
                cr: get_u32_opt(inp)?,
            },
            TAG_GAME_OVER => SessionMsg::GameOver,
            other => bail!("unknown session message tag: {other:#x}"),
        })
    }
}
