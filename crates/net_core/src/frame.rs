//! Versioned length framing for session messages.
//!
//! Format (little-endian): u8 version, u32 payload length, payload bytes.
//! Framing lets a multiplexed byte stream delimit messages without peeking
//! into inner payloads.

use anyhow::{Result, bail};

const FRAME_VERSION: u8 = 1;
// Generous for full enemy snapshots; anything larger is a bug or garbage.
const MAX_FRAME_LEN: usize = 262_144;

/// Append a framed message to `out`.
pub fn write_frame(out: &mut Vec<u8>, payload: &[u8]) {
    out.push(FRAME_VERSION);
    let len = u32::try_from(payload.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&payload[..len as usize]);
}

/// Read a single framed message. The returned slice borrows from `inp`.
pub fn read_frame(inp: &[u8]) -> Result<&[u8]> {
    if inp.len() < 5 {
        bail!("short frame header");
    }
    let ver = inp[0];
    if ver != FRAME_VERSION {
        bail!("unsupported frame version: {ver}");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[1..5]);
    let len = u32::from_le_bytes(lenb) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame too large: {len} > {MAX_FRAME_LEN}");
    }
    if inp.len() < 5 + len {
        bail!("short frame payload");
    }
    Ok(&inp[5..5 + len])
}
