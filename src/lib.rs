//! manastorm: host-authoritative multiplayer arena simulation (headless).
//!
//! The crates split the core the same way the runtime uses it:
//! - `sim_core` runs on every participant every tick
//! - `server_core` runs only while this participant holds authority
//! - `client_core` reconciles inbound session traffic
//! - `net_core` carries the vocabulary and the in-proc session hub
//!
//! This root crate owns the per-tick control flow tying those together,
//! plus telemetry bootstrap and the auto-fire drill used by the demo.

pub mod autofire;
pub mod runtime;
pub mod telemetry;
