//! Path resolution and raw file reads for everything under `data/`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefer the top-level workspace `data/` so tests and tools can run from
/// any crate; fall back to a crate-local `data/` when built standalone.
pub fn data_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a raw file under `data/` and return its contents.
pub fn read_data(rel: impl AsRef<Path>) -> Result<String> {
    let path = data_root().join(rel);
    let s = fs::read_to_string(&path).with_context(|| format!("read data: {}", path.display()))?;
    Ok(s)
}
