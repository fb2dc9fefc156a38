//! net_core: session message vocabulary + in-proc replication plumbing.
//!
//! Scope
//! - Snapshot encode/decode traits and the wire representations shared by
//!   every participant (actors, enemies, session messages)
//! - Length framing, non-blocking channels and a transport abstraction
//! - The in-proc session hub: join/leave bookkeeping, host assignment and
//!   migration, state fan-out and damage relay

pub mod channel;
pub mod frame;
pub mod hub;
pub mod message;
pub mod snapshot;
pub mod transport;
