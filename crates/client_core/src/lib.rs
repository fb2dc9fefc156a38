//! client_core: the non-authoritative side of a participant.
//!
//! Holds session identity/role, the read-only mirrors of remote state
//! (actor table, plus enemy list/CR adoption into the world), presentation
//! caches, and the host-migration handling.

pub mod replication;
pub mod session;

pub use replication::{ArtCache, InboundEvent, ReplicationBuffer};
pub use session::Session;
