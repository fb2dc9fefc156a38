//! Level definition: static walls, door trigger regions, bounds and the
//! spawn point. Immutable for the whole session.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    pub walls: Vec<Rect>,
    pub doors: Vec<Rect>,
    pub spawn: [f32; 2],
}

impl Level {
    /// Load `data/level/arena.json`, or the built-in arena when absent.
    pub fn load_default() -> Result<Level> {
        match loader::read_data("level/arena.json") {
            Ok(txt) => {
                let level: Level = serde_json::from_str(&txt).context("parse level json")?;
                Ok(level)
            }
            Err(_) => Ok(Self::builtin_arena()),
        }
    }

    /// The default 2000x2000 arena: four border walls, two inner obstacles
    /// and a door at the top edge.
    pub fn builtin_arena() -> Level {
        Level {
            width: 2000.0,
            height: 2000.0,
            walls: vec![
                Rect::new(0.0, 0.0, 2000.0, 50.0),
                Rect::new(0.0, 1950.0, 2000.0, 50.0),
                Rect::new(0.0, 0.0, 50.0, 2000.0),
                Rect::new(1950.0, 0.0, 50.0, 2000.0),
                Rect::new(600.0, 600.0, 200.0, 50.0),
                Rect::new(1200.0, 1200.0, 50.0, 200.0),
            ],
            doors: vec![Rect::new(900.0, 0.0, 200.0, 50.0)],
            spawn: [1000.0, 1000.0],
        }
    }
}
