//! Element table: the eight castable elements, their display colors and the
//! opposing pairs that annihilate each other inside a spell queue.

/// Closed set of castable elements. The annihilation and revive rules are
/// tied to specific members, so this is an enum rather than open data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Fire,
    Cold,
    Water,
    Lightning,
    Earth,
    Shield,
    Life,
    Arcane,
}

/// Pairs whose simultaneous presence in a queue cancels instead of stacking.
pub const OPPOSING_PAIRS: [(ElementId, ElementId); 3] = [
    (ElementId::Fire, ElementId::Cold),
    (ElementId::Water, ElementId::Lightning),
    (ElementId::Life, ElementId::Arcane),
];

impl ElementId {
    pub const ALL: [ElementId; 8] = [
        ElementId::Fire,
        ElementId::Cold,
        ElementId::Water,
        ElementId::Lightning,
        ElementId::Earth,
        ElementId::Shield,
        ElementId::Life,
        ElementId::Arcane,
    ];

    /// Stable data key, matching the element ids in the asset JSON.
    pub fn key(self) -> &'static str {
        match self {
            ElementId::Fire => "fire",
            ElementId::Cold => "cold",
            ElementId::Water => "water",
            ElementId::Lightning => "lightning",
            ElementId::Earth => "earth",
            ElementId::Shield => "shield",
            ElementId::Life => "life",
            ElementId::Arcane => "arcane",
        }
    }

    pub fn from_key(key: &str) -> Option<ElementId> {
        Self::ALL.iter().copied().find(|e| e.key() == key)
    }

    /// Display color as linear RGBA.
    pub fn color(self) -> [f32; 4] {
        match self {
            ElementId::Fire => [1.0, 0.271, 0.0, 1.0],
            ElementId::Cold => [0.0, 1.0, 1.0, 1.0],
            ElementId::Water => [0.118, 0.565, 1.0, 1.0],
            ElementId::Lightning => [0.541, 0.169, 0.886, 1.0],
            ElementId::Earth => [0.545, 0.271, 0.075, 1.0],
            ElementId::Shield => [1.0, 0.843, 0.0, 1.0],
            ElementId::Life => [0.196, 0.804, 0.196, 1.0],
            ElementId::Arcane => [0.863, 0.078, 0.235, 1.0],
        }
    }

    /// The element that annihilates with this one, if any.
    pub fn opposite(self) -> Option<ElementId> {
        for (a, b) in OPPOSING_PAIRS {
            if self == a {
                return Some(b);
            }
            if self == b {
                return Some(a);
            }
        }
        None
    }
}

/// Fully transparent color used as the outer stop of the revive burst.
pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for e in ElementId::ALL {
            assert_eq!(ElementId::from_key(e.key()), Some(e));
        }
        assert_eq!(ElementId::from_key("plasma"), None);
    }

    #[test]
    fn opposites_are_symmetric() {
        for (a, b) in OPPOSING_PAIRS {
            assert_eq!(a.opposite(), Some(b));
            assert_eq!(b.opposite(), Some(a));
        }
        assert_eq!(ElementId::Earth.opposite(), None);
        assert_eq!(ElementId::Shield.opposite(), None);
    }
}
