//! Enemy template database.
//!
//! The on-disk schema is the generated `game_data.json` format: per-template
//! `hp`/`speed`/`radius`/`cr`, a `move_pattern` tag with a free-form
//! `move_params` map, a display color and an art path. That format is
//! frame-based (speeds per frame at 60 Hz, timers in milliseconds), so the
//! loader normalizes everything into per-second engine units.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use crate::loader;

/// Simulation runs the original content at this rate; used only to convert
/// per-frame speeds in template data into units per second.
const SOURCE_FRAME_RATE: f32 = 60.0;

/// Movement pattern as a closed tagged variant. Parameters are late-bound
/// from `move_params` with per-key defaults; unknown tags fall back to
/// `Direct`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePattern {
    Direct,
    Orbiter {
        orbit_radius: f32,
    },
    Zigzag {
        /// Oscillation frequency in radians per second.
        frequency: f32,
        amplitude: f32,
    },
    Hopper {
        cooldown_s: f32,
        duration_s: f32,
        speed_mult: f32,
    },
    Charger {
        trigger_dist: f32,
        cooldown_s: f32,
        duration_s: f32,
        speed_mult: f32,
    },
}

impl MovePattern {
    /// Resolve a pattern tag and raw parameter map (source units) into a
    /// fully-populated variant.
    pub fn resolve(tag: &str, params: &HashMap<String, f64>) -> MovePattern {
        let get = |key: &str, default: f32| params.get(key).map_or(default, |v| *v as f32);
        match tag {
            "ORBITER" => MovePattern::Orbiter {
                orbit_radius: get("orbitRadius", 300.0),
            },
            "ZIGZAG" => MovePattern::Zigzag {
                // Source frequency is radians per millisecond.
                frequency: get("zigzagFrequency", 0.01) * 1000.0,
                amplitude: get("zigzagAmplitude", 3.0),
            },
            "HOPPER" => MovePattern::Hopper {
                cooldown_s: get("hopCooldown", 1500.0) / 1000.0,
                duration_s: get("hopDuration", 300.0) / 1000.0,
                speed_mult: get("hopSpeedMult", 3.0),
            },
            "CHARGER" => MovePattern::Charger {
                trigger_dist: get("chargeDistance", 300.0),
                cooldown_s: get("chargeCooldown", 3000.0) / 1000.0,
                duration_s: get("chargeDuration", 500.0) / 1000.0,
                speed_mult: get("chargeSpeedMult", 3.0),
            },
            // "DIRECT", "SLOW_APPROACH" and anything unrecognized.
            _ => MovePattern::Direct,
        }
    }
}

/// One template entry as it appears in the JSON file (source units).
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRaw {
    pub hp: f32,
    /// Units per frame at 60 Hz.
    pub speed: f32,
    pub radius: f32,
    #[serde(default)]
    pub cr: Option<u32>,
    #[serde(default)]
    pub move_pattern: Option<String>,
    #[serde(default)]
    pub move_params: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Normalized template ready for the simulation (per-second units).
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    pub name: String,
    pub hp: f32,
    pub radius: f32,
    /// Units per second.
    pub speed: f32,
    pub cr: u32,
    pub color: [f32; 4],
    pub art_path: Option<String>,
    pub pattern: MovePattern,
}

const FALLBACK_COLOR: [f32; 4] = [0.725, 0.11, 0.11, 1.0];

/// Parse a `#rrggbb` display color; anything else gets the fallback red.
fn parse_color(hex: Option<&str>) -> [f32; 4] {
    let Some(hex) = hex.and_then(|h| h.strip_prefix('#')) else {
        return FALLBACK_COLOR;
    };
    if hex.len() != 6 || !hex.is_ascii() {
        return FALLBACK_COLOR;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (byte(0), byte(2), byte(4)) {
        (Some(r), Some(g), Some(b)) => [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ],
        _ => FALLBACK_COLOR,
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateDb {
    entries: HashMap<String, EnemyTemplate>,
    /// Template names in sorted order so random picks are reproducible for
    /// a given seed.
    names: Vec<String>,
}

impl TemplateDb {
    /// Load `data/monsters/game_data.json`, or the built-in bestiary when
    /// the file is absent.
    pub fn load_default() -> Result<TemplateDb> {
        match loader::read_data("monsters/game_data.json") {
            Ok(txt) => Self::from_json_str(&txt),
            Err(_) => Ok(Self::builtin()),
        }
    }

    /// Parse the generated JSON format and normalize units.
    pub fn from_json_str(txt: &str) -> Result<TemplateDb> {
        let raw: HashMap<String, TemplateRaw> =
            serde_json::from_str(txt).context("parse enemy template json")?;
        let mut db = TemplateDb::default();
        for (name, t) in raw {
            let params = t.move_params.unwrap_or_default();
            let tag = t.move_pattern.as_deref().unwrap_or("DIRECT");
            db.insert(EnemyTemplate {
                name: name.clone(),
                hp: t.hp,
                radius: t.radius,
                speed: t.speed * SOURCE_FRAME_RATE,
                cr: t.cr.unwrap_or(1),
                color: parse_color(t.color.as_deref()),
                art_path: t.path,
                pattern: MovePattern::resolve(tag, &params),
            });
        }
        Ok(db)
    }

    fn insert(&mut self, t: EnemyTemplate) {
        let name = t.name.clone();
        if self.entries.insert(name.clone(), t).is_none() {
            let idx = self.names.partition_point(|n| *n < name);
            self.names.insert(idx, name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnemyTemplate> {
        self.entries.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Built-in bestiary covering every movement pattern, already in engine
    /// units. CRs follow the generator's `hp/10 * speed^2` curve (speed in
    /// source units).
    pub fn builtin() -> TemplateDb {
        let mut db = TemplateDb::default();
        db.insert(EnemyTemplate {
            name: "Goblin".into(),
            hp: 45.0,
            radius: 14.0,
            speed: 84.0,
            cr: 9,
            color: [0.42, 0.62, 0.22, 1.0],
            art_path: Some("assets/monsters/Goblin.webp".into()),
            pattern: MovePattern::Direct,
        });
        db.insert(EnemyTemplate {
            name: "Dire Bat".into(),
            hp: 35.0,
            radius: 12.0,
            speed: 144.0,
            cr: 20,
            color: [0.35, 0.27, 0.5, 1.0],
            art_path: Some("assets/monsters/Dire Bat.webp".into()),
            pattern: MovePattern::Zigzag {
                frequency: 9.0,
                amplitude: 3.2,
            },
        });
        db.insert(EnemyTemplate {
            name: "Giant Frog".into(),
            hp: 40.0,
            radius: 15.0,
            speed: 72.0,
            cr: 6,
            color: [0.24, 0.55, 0.32, 1.0],
            art_path: Some("assets/monsters/Giant Frog.webp".into()),
            pattern: MovePattern::Hopper {
                cooldown_s: 1.6,
                duration_s: 0.3,
                speed_mult: 4.0,
            },
        });
        db.insert(EnemyTemplate {
            name: "Hobgoblin Archer".into(),
            hp: 50.0,
            radius: 14.0,
            speed: 60.0,
            cr: 5,
            color: [0.62, 0.44, 0.23, 1.0],
            art_path: Some("assets/monsters/Hobgoblin Archer.webp".into()),
            pattern: MovePattern::Orbiter {
                orbit_radius: 320.0,
            },
        });
        db.insert(EnemyTemplate {
            name: "Wild Boar".into(),
            hp: 55.0,
            radius: 16.0,
            speed: 54.0,
            cr: 4,
            color: [0.45, 0.33, 0.25, 1.0],
            art_path: Some("assets/monsters/Wild Boar.webp".into()),
            pattern: MovePattern::Charger {
                trigger_dist: 300.0,
                cooldown_s: 3.0,
                duration_s: 0.6,
                speed_mult: 4.0,
            },
        });
        db.insert(EnemyTemplate {
            name: "Stone Golem".into(),
            hp: 200.0,
            radius: 26.0,
            speed: 36.0,
            cr: 7,
            color: [0.55, 0.55, 0.58, 1.0],
            art_path: Some("assets/monsters/Stone Golem.webp".into()),
            pattern: MovePattern::Direct,
        });
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_all_patterns() {
        let db = TemplateDb::builtin();
        assert!(db.len() >= 5);
        let has = |f: fn(&MovePattern) -> bool| db.names().iter().any(|n| f(&db.get(n).unwrap().pattern));
        assert!(has(|p| matches!(p, MovePattern::Direct)));
        assert!(has(|p| matches!(p, MovePattern::Orbiter { .. })));
        assert!(has(|p| matches!(p, MovePattern::Zigzag { .. })));
        assert!(has(|p| matches!(p, MovePattern::Hopper { .. })));
        assert!(has(|p| matches!(p, MovePattern::Charger { .. })));
    }

    #[test]
    fn names_are_sorted() {
        let db = TemplateDb::builtin();
        let mut sorted = db.names().to_vec();
        sorted.sort();
        assert_eq!(db.names(), &sorted[..]);
    }

    #[test]
    fn resolve_applies_defaults_per_key() {
        let mut params = HashMap::new();
        params.insert("hopCooldown".to_string(), 2000.0);
        // Missing keys fall back to their documented defaults.
        let p = MovePattern::resolve("HOPPER", &params);
        assert_eq!(
            p,
            MovePattern::Hopper {
                cooldown_s: 2.0,
                duration_s: 0.3,
                speed_mult: 3.0
            }
        );
    }

    #[test]
    fn unknown_tag_falls_back_to_direct() {
        let p = MovePattern::resolve("TELEPORTER", &HashMap::new());
        assert_eq!(p, MovePattern::Direct);
        let p = MovePattern::resolve("SLOW_APPROACH", &HashMap::new());
        assert_eq!(p, MovePattern::Direct);
    }

    #[test]
    fn parse_color_handles_bad_input() {
        assert_eq!(parse_color(Some("#ff0000")), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parse_color(Some("ff0000")), FALLBACK_COLOR);
        assert_eq!(parse_color(Some("#zzzzzz")), FALLBACK_COLOR);
        assert_eq!(parse_color(None), FALLBACK_COLOR);
    }
}
