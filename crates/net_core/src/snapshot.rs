//! Snapshot encode/decode traits and the per-entity wire representations.
//!
//! Encoding is deliberately simple: tagged little-endian fields, strings as
//! u32 length + UTF-8 bytes. Later versions can swap in better encoders
//! without breaking users of these traits.

use anyhow::{Result, bail};

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte
/// slice, advancing it past the consumed bytes.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> Result<Self>;
}

pub(crate) fn take<const N: usize>(inp: &mut &[u8]) -> Result<[u8; N]> {
    if inp.len() < N {
        bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

pub(crate) fn get_u8(inp: &mut &[u8]) -> Result<u8> {
    Ok(take::<1>(inp)?[0])
}

pub(crate) fn get_u32(inp: &mut &[u8]) -> Result<u32> {
    Ok(u32::from_le_bytes(take::<4>(inp)?))
}

pub(crate) fn get_u64(inp: &mut &[u8]) -> Result<u64> {
    Ok(u64::from_le_bytes(take::<8>(inp)?))
}

pub(crate) fn get_f32(inp: &mut &[u8]) -> Result<f32> {
    Ok(f32::from_le_bytes(take::<4>(inp)?))
}

pub(crate) fn get_bool(inp: &mut &[u8]) -> Result<bool> {
    Ok(get_u8(inp)? != 0)
}

pub(crate) fn put_str(out: &mut Vec<u8>, s: &str) {
    let len = u32::try_from(s.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&s.as_bytes()[..len as usize]);
}

pub(crate) fn get_str(inp: &mut &[u8]) -> Result<String> {
    let len = get_u32(inp)? as usize;
    if inp.len() < len {
        bail!("short string read");
    }
    let (a, b) = inp.split_at(len);
    *inp = b;
    Ok(std::str::from_utf8(a)?.to_string())
}

/// Per-participant actor state as broadcast in `update`/`state` messages.
/// Followers replace their remote-actor table wholesale with these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorRep {
    pub id: u64,
    pub pos: [f32; 2],
    pub alive: bool,
}

impl SnapshotEncode for ActorRep {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&self.pos[0].to_le_bytes());
        out.extend_from_slice(&self.pos[1].to_le_bytes());
        out.push(u8::from(self.alive));
    }
}

impl SnapshotDecode for ActorRep {
    fn decode(inp: &mut &[u8]) -> Result<Self> {
        let id = get_u64(inp)?;
        let pos = [get_f32(inp)?, get_f32(inp)?];
        let alive = get_bool(inp)?;
        Ok(Self { id, pos, alive })
    }
}

/// One enemy as carried by authoritative `state` broadcasts and migration
/// snapshots. Transient behavior state (timers/phases) is never replicated;
/// a new authority re-seeds it lazily.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRep {
    pub id: String,
    pub name: String,
    pub pos: [f32; 2],
    pub radius: f32,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub cr: u32,
    /// Movement pattern kind tag plus packed parameters; interpretation
    /// lives with the simulation crate.
    pub pattern_kind: u8,
    pub pattern_params: [f32; 4],
}

impl SnapshotEncode for EnemyRep {
    fn encode(&self, out: &mut Vec<u8>) {
        put_str(out, &self.id);
        put_str(out, &self.name);
        for v in [
            self.pos[0],
            self.pos[1],
            self.radius,
            self.speed,
            self.hp,
            self.max_hp,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.cr.to_le_bytes());
        out.push(self.pattern_kind);
        for p in self.pattern_params {
            out.extend_from_slice(&p.to_le_bytes());
        }
    }
}

impl SnapshotDecode for EnemyRep {
    fn decode(inp: &mut &[u8]) -> Result<Self> {
        let id = get_str(inp)?;
        let name = get_str(inp)?;
        let pos = [get_f32(inp)?, get_f32(inp)?];
        let radius = get_f32(inp)?;
        let speed = get_f32(inp)?;
        let hp = get_f32(inp)?;
        let max_hp = get_f32(inp)?;
        let cr = get_u32(inp)?;
        let pattern_kind = get_u8(inp)?;
        let mut pattern_params = [0.0f32; 4];
        for p in &mut pattern_params {
            *p = get_f32(inp)?;
        }
        Ok(Self {
            id,
            name,
            pos,
            radius,
            speed,
            hp,
            max_hp,
            cr,
            pattern_kind,
            pattern_params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_rep_roundtrip() {
        let a = ActorRep {
            id: 7,
            pos: [12.5, -3.0],
            alive: false,
        };
        let mut buf = Vec::new();
        a.encode(&mut buf);
        let mut slice: &[u8] = &buf;
        let b = ActorRep::decode(&mut slice).expect("decode");
        assert_eq!(a, b);
        assert!(slice.is_empty());
    }

    #[test]
    fn enemy_rep_roundtrip() {
        let e = EnemyRep {
            id: "k3j9x0aa".into(),
            name: "Dire Bat".into(),
            pos: [-50.0, 777.0],
            radius: 12.0,
            speed: 144.0,
            hp: 35.0,
            max_hp: 35.0,
            cr: 20,
            pattern_kind: 2,
            pattern_params: [9.0, 3.2, 0.0, 0.0],
        };
        let mut buf = Vec::new();
        e.encode(&mut buf);
        let mut slice: &[u8] = &buf;
        let d = EnemyRep::decode(&mut slice).expect("decode");
        assert_eq!(e, d);
    }

    #[test]
    fn short_buffer_fails_cleanly() {
        let mut slice: &[u8] = &[1, 2, 3];
        assert!(EnemyRep::decode(&mut slice).is_err());
    }
}
