//! Enemy instances and their wire conversions.
//!
//! Enemies are created and destroyed only by the authoritative participant;
//! followers hold a mirror that is replaced wholesale by `state` broadcasts.
//! The behavior state record is transient and never replicated.

use data_runtime::templates::{EnemyTemplate, MovePattern, TemplateDb};
use glam::Vec2;
use net_core::snapshot::EnemyRep;

pub const PATTERN_DIRECT: u8 = 0;
pub const PATTERN_ORBITER: u8 = 1;
pub const PATTERN_ZIGZAG: u8 = 2;
pub const PATTERN_HOPPER: u8 = 3;
pub const PATTERN_CHARGER: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Hopping,
    Charging,
}

/// Per-enemy transient AI scratch, initialized lazily on the first
/// authoritative tick that moves the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BehaviorState {
    pub timer: f32,
    pub phase: Phase,
    /// Direction captured at the start of a hop or charge.
    pub committed_dir: Vec2,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: String,
    /// Template key; also the handle for presentation caches.
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second.
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub cr: u32,
    pub color: [f32; 4],
    pub pattern: MovePattern,
    pub state: Option<BehaviorState>,
}

impl Enemy {
    pub fn from_template(id: String, t: &EnemyTemplate, pos: Vec2) -> Enemy {
        Enemy {
            id,
            name: t.name.clone(),
            pos,
            radius: t.radius,
            speed: t.speed,
            hp: t.hp,
            max_hp: t.hp,
            cr: t.cr,
            color: t.color,
            pattern: t.pattern,
            state: None,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn to_rep(&self) -> EnemyRep {
        let (pattern_kind, pattern_params) = pattern_to_wire(&self.pattern);
        EnemyRep {
            id: self.id.clone(),
            name: self.name.clone(),
            pos: [self.pos.x, self.pos.y],
            radius: self.radius,
            speed: self.speed,
            hp: self.hp,
            max_hp: self.max_hp,
            cr: self.cr,
            pattern_kind,
            pattern_params,
        }
    }

    /// Rebuild an enemy from a replicated snapshot. Display color comes from
    /// the local template DB since it never travels on the wire.
    pub fn from_rep(rep: &EnemyRep, db: &TemplateDb) -> Enemy {
        let color = db
            .get(&rep.name)
            .map_or([0.725, 0.11, 0.11, 1.0], |t| t.color);
        Enemy {
            id: rep.id.clone(),
            name: rep.name.clone(),
            pos: Vec2::new(rep.pos[0], rep.pos[1]),
            radius: rep.radius,
            speed: rep.speed,
            hp: rep.hp,
            max_hp: rep.max_hp,
            cr: rep.cr,
            color,
            pattern: pattern_from_wire(rep.pattern_kind, rep.pattern_params),
            state: None,
        }
    }
}

pub fn pattern_to_wire(p: &MovePattern) -> (u8, [f32; 4]) {
    match *p {
        MovePattern::Direct => (PATTERN_DIRECT, [0.0; 4]),
        MovePattern::Orbiter { orbit_radius } => (PATTERN_ORBITER, [orbit_radius, 0.0, 0.0, 0.0]),
        MovePattern::Zigzag {
            frequency,
            amplitude,
        } => (PATTERN_ZIGZAG, [frequency, amplitude, 0.0, 0.0]),
        MovePattern::Hopper {
            cooldown_s,
            duration_s,
            speed_mult,
        } => (PATTERN_HOPPER, [cooldown_s, duration_s, speed_mult, 0.0]),
        MovePattern::Charger {
            trigger_dist,
            cooldown_s,
            duration_s,
            speed_mult,
        } => (
            PATTERN_CHARGER,
            [trigger_dist, cooldown_s, duration_s, speed_mult],
        ),
    }
}

pub fn pattern_from_wire(kind: u8, p: [f32; 4]) -> MovePattern {
    match kind {
        PATTERN_ORBITER => MovePattern::Orbiter { orbit_radius: p[0] },
        PATTERN_ZIGZAG => MovePattern::Zigzag {
            frequency: p[0],
            amplitude: p[1],
        },
        PATTERN_HOPPER => MovePattern::Hopper {
            cooldown_s: p[0],
            duration_s: p[1],
            speed_mult: p[2],
        },
        PATTERN_CHARGER => MovePattern::Charger {
            trigger_dist: p[0],
            cooldown_s: p[1],
            duration_s: p[2],
            speed_mult: p[3],
        },
        _ => MovePattern::Direct,
    }
}
