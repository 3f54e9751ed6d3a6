use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::error::SimError;

/// RGB color, 0.0–1.0 per channel. Carried for the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BodyColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The fixed category of a body. Set at spawn and never changed, even when
/// the body grows through merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Rocky,
    GasGiant,
    SuperGiant,
    Star,
    BlackHole,
}

/// Spawn-time defaults for an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeDefaults {
    pub mass: f64,
    pub radius: f64,
    pub color: BodyColor,
    pub glow_color: BodyColor,
    pub name: &'static str,
    /// Drawn with a radial glow halo.
    pub has_glow: bool,
    /// Drawn with the dedicated event-horizon style instead of a shaded disc.
    pub special_render: bool,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Rocky,
        Archetype::GasGiant,
        Archetype::SuperGiant,
        Archetype::Star,
        Archetype::BlackHole,
    ];

    /// Stable numeric index, used by the flat render protocol.
    pub fn index(self) -> u32 {
        match self {
            Archetype::Rocky => 0,
            Archetype::GasGiant => 1,
            Archetype::SuperGiant => 2,
            Archetype::Star => 3,
            Archetype::BlackHole => 4,
        }
    }

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Rocky => "rocky",
            Archetype::GasGiant => "gas-giant",
            Archetype::SuperGiant => "super-giant",
            Archetype::Star => "star",
            Archetype::BlackHole => "black-hole",
        }
    }

    pub fn defaults(self) -> ArchetypeDefaults {
        defaults_for(self)
    }
}

/// Static archetype table.
pub const fn defaults_for(archetype: Archetype) -> ArchetypeDefaults {
    match archetype {
        Archetype::Rocky => ArchetypeDefaults {
            mass: 1.0,
            radius: 12.0,
            color: BodyColor::new(0.255, 0.412, 0.882, 1.0),
            glow_color: BodyColor::new(0.255, 0.412, 0.882, 0.25),
            name: "Rocky Planet",
            has_glow: false,
            special_render: false,
        },
        Archetype::GasGiant => ArchetypeDefaults {
            mass: 5.0,
            radius: 18.0,
            color: BodyColor::new(1.0, 0.388, 0.278, 1.0),
            glow_color: BodyColor::new(1.0, 0.388, 0.278, 0.25),
            name: "Gas Giant",
            has_glow: false,
            special_render: false,
        },
        Archetype::SuperGiant => ArchetypeDefaults {
            mass: 10.0,
            radius: 24.0,
            color: BodyColor::new(0.855, 0.647, 0.125, 1.0),
            glow_color: BodyColor::new(0.855, 0.647, 0.125, 0.25),
            name: "Super Giant",
            has_glow: false,
            special_render: false,
        },
        Archetype::Star => ArchetypeDefaults {
            mass: 1000.0,
            radius: 35.0,
            color: BodyColor::new(1.0, 0.843, 0.0, 1.0),
            glow_color: BodyColor::new(1.0, 0.843, 0.0, 0.5),
            name: "Star",
            has_glow: true,
            special_render: false,
        },
        Archetype::BlackHole => ArchetypeDefaults {
            mass: 5000.0,
            radius: 30.0,
            color: BodyColor::new(0.0, 0.0, 0.0, 1.0),
            glow_color: BodyColor::new(0.545, 0.0, 1.0, 0.5),
            name: "Black Hole",
            has_glow: true,
            special_render: true,
        },
    }
}

impl FromStr for Archetype {
    type Err = SimError;

    /// Accepts the canonical names plus the legacy card names
    /// (`planet-small`, `planet-medium`, `planet-large`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rocky" | "planet-small" => Ok(Archetype::Rocky),
            "gas-giant" | "planet-medium" => Ok(Archetype::GasGiant),
            "super-giant" | "planet-large" => Ok(Archetype::SuperGiant),
            "star" => Ok(Archetype::Star),
            "black-hole" => Ok(Archetype::BlackHole),
            other => Err(SimError::UnknownArchetype(other.to_string())),
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_spawn_defaults() {
        let expected = [
            (Archetype::Rocky, 1.0, 12.0),
            (Archetype::GasGiant, 5.0, 18.0),
            (Archetype::SuperGiant, 10.0, 24.0),
            (Archetype::Star, 1000.0, 35.0),
            (Archetype::BlackHole, 5000.0, 30.0),
        ];
        for (archetype, mass, radius) in expected {
            let d = defaults_for(archetype);
            assert_eq!(d.mass, mass, "{archetype}");
            assert_eq!(d.radius, radius, "{archetype}");
        }
    }

    #[test]
    fn only_black_hole_is_special() {
        for a in Archetype::ALL {
            assert_eq!(a.defaults().special_render, a == Archetype::BlackHole);
        }
        assert!(Archetype::Star.defaults().has_glow);
        assert!(!Archetype::Rocky.defaults().has_glow);
    }

    #[test]
    fn parse_canonical_and_legacy_names() {
        for a in Archetype::ALL {
            assert_eq!(a.as_str().parse::<Archetype>().unwrap(), a);
        }
        assert_eq!("planet-medium".parse::<Archetype>().unwrap(), Archetype::GasGiant);
    }

    #[test]
    fn unknown_archetype_is_rejected() {
        let err = "comet".parse::<Archetype>().unwrap_err();
        assert!(matches!(err, SimError::UnknownArchetype(ref s) if s == "comet"));
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen: Vec<u32> = Archetype::ALL.iter().map(|a| a.index()).collect();
        seen.dedup();
        assert_eq!(seen.len(), Archetype::ALL.len());
    }
}
