//! data_runtime: data schemas and loaders for the arena core.
//!
//! Extracted so the simulation, authority and replication crates can depend
//! on a stable data API without knowing where files live on disk.

pub mod elements;
pub mod level;
pub mod loader;
pub mod templates;
pub mod configs {
    pub mod telemetry;
}
