//! Comm relay array planning
//!
//! Takes a target body, a per-satellite antenna loadout, and a minimum
//! signal-strength threshold, and works out what the constellation can
//! reach and where to park it:
//!
//! ```text
//! catalog -> signal model (combined power, min distances)
//!         -> orbit sweep  (feasible relay orbits + phase orbits)
//!         -> formatter    (scaled units, tables)
//! ```
//!
//! Antenna powers combine sub-linearly: the strongest antenna is scaled by
//! `(sum of powers / strongest)^e` where `e` is the power-weighted average
//! of the parts' combinability exponents. Signal strength between two craft
//! falls off along the smooth-step curve `3x^2 - 2x^3` of normalized
//! distance, and the planner reports the distance at which it drops to the
//! requested threshold.

use orbital_mechanics::Body;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub mod format;
pub mod loader;
pub mod report;
pub mod signal;

/// Default minimum signal strength inside the relay's sphere of influence.
pub const DEFAULT_MIN_STRENGTH: f64 = 0.8;

/// Default number of recommended orbits.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Default largest per-part quantity column in the distance table.
pub const DEFAULT_MAX_QUANTITY: u32 = 5;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown celestial body \"{0}\"")]
    UnknownBody(String),
    #[error("unknown antenna alias \"{0}\"")]
    UnknownPart(String),
    #[error("antenna \"{0}\" cannot relay to other craft")]
    NotRelay(String),
    #[error("duplicate antenna alias \"{0}\"")]
    DuplicateAlias(String),
    #[error("body \"{0}\" orbits unknown parent \"{1}\"")]
    UnknownParent(String, String),
    #[error("parent chain of body \"{0}\" loops back on itself")]
    ParentCycle(String),
    #[error("no antennas selected")]
    EmptySelection,
    #[error("antenna \"{0}\" has non-positive power")]
    NonPositivePower(String),
    #[error("empty table")]
    EmptyTable,
    #[error("table rows have uneven column counts")]
    RaggedTable,
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// A communication antenna as defined by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaPart {
    pub full_name: String,
    /// Short unique handle used on the command line.
    pub alias: String,
    /// Rated antenna power.
    pub power: u64,
    /// Whether stacking more than one of these helps at all.
    pub combinable: bool,
    /// How sub-linearly stacked power combines; 1.0 is fully additive.
    pub combinability_exponent: f64,
    /// Relay antennas extend the network; direct antennas only phone home.
    pub relay: bool,
}

/// A catalog part bound to a per-satellite quantity for one calculation.
///
/// Always a copy of the catalog entry, never a reference into it, so
/// concurrent use cases cannot alias each other's quantities.
#[derive(Debug, Clone)]
pub struct SelectedPart {
    pub part: AntennaPart,
    pub quantity: u32,
}

impl SelectedPart {
    pub fn new(part: &AntennaPart, quantity: u32) -> Self {
        Self {
            part: part.clone(),
            quantity,
        }
    }
}

/// Read-only catalog of celestial bodies and antenna parts, loaded once at
/// startup.
#[derive(Debug, Clone)]
pub struct GameData {
    /// Keyed by lowercased body name; display names live in the values.
    bodies: HashMap<String, Body>,
    /// Keyed by full part name.
    parts: HashMap<String, AntennaPart>,
}

impl GameData {
    /// Build the catalog, validating the structural invariants: aliases are
    /// globally unique, every parent is a known body, and the parent graph
    /// is a tree.
    pub fn new(bodies: Vec<Body>, parts: Vec<AntennaPart>) -> Result<Self> {
        let mut seen_aliases = HashSet::new();
        for part in &parts {
            if !seen_aliases.insert(part.alias.clone()) {
                return Err(PlannerError::DuplicateAlias(part.alias.clone()));
            }
        }

        let by_key: HashMap<String, Body> = bodies
            .into_iter()
            .map(|b| (b.name.to_lowercase(), b))
            .collect();

        for body in by_key.values() {
            if let Some(parent) = &body.parent {
                if !by_key.contains_key(&parent.to_lowercase()) {
                    return Err(PlannerError::UnknownParent(
                        body.name.clone(),
                        parent.clone(),
                    ));
                }
            }

            // Walk to the root; revisiting a body means the chain loops.
            let mut visited = vec![body.name.to_lowercase()];
            let mut current = body;
            while let Some(parent) = &current.parent {
                let key = parent.to_lowercase();
                if visited.contains(&key) {
                    return Err(PlannerError::ParentCycle(body.name.clone()));
                }
                visited.push(key.clone());
                match by_key.get(&key) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        Ok(Self {
            bodies: by_key,
            parts: parts
                .into_iter()
                .map(|p| (p.full_name.clone(), p))
                .collect(),
        })
    }

    /// Case-insensitive body lookup.
    pub fn body(&self, name: &str) -> Result<&Body> {
        self.bodies
            .get(&name.to_lowercase())
            .ok_or_else(|| PlannerError::UnknownBody(name.to_string()))
    }

    /// Exact alias lookup.
    pub fn part_by_alias(&self, alias: &str) -> Result<&AntennaPart> {
        self.parts
            .values()
            .find(|p| p.alias == alias)
            .ok_or_else(|| PlannerError::UnknownPart(alias.to_string()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub fn parts(&self) -> impl Iterator<Item = &AntennaPart> {
        self.parts.values()
    }

    /// Parts ordered the way the distance table lists them: direct
    /// antennas before relays, weakest first within each group.
    pub fn parts_by_signal_order(&self) -> Vec<&AntennaPart> {
        let mut parts: Vec<&AntennaPart> = self.parts.values().collect();
        parts.sort_by(|a, b| (a.relay, a.power).cmp(&(b.relay, b.power)));
        parts
    }

    /// Bodies with no parent, alphabetical.
    pub fn root_bodies(&self) -> Vec<&Body> {
        let mut roots: Vec<&Body> = self.bodies.values().filter(|b| b.parent.is_none()).collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }

    /// Direct satellites of the named body, alphabetical.
    pub fn children_of(&self, name: &str) -> Vec<&Body> {
        let mut children: Vec<&Body> = self
            .bodies
            .values()
            .filter(|b| {
                b.parent
                    .as_ref()
                    .is_some_and(|p| p.eq_ignore_ascii_case(name))
            })
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(full_name: &str, alias: &str, power: u64, relay: bool) -> AntennaPart {
        AntennaPart {
            full_name: full_name.to_string(),
            alias: alias.to_string(),
            power,
            combinable: true,
            combinability_exponent: 0.75,
            relay,
        }
    }

    fn catalog() -> GameData {
        GameData::new(
            vec![
                Body::new("Kerbin", 600_000, 5.2915158e22, 84_159_286, None),
                Body::new("Mun", 200_000, 9.7599066e20, 2_429_559, Some("Kerbin".into())),
            ],
            vec![
                part("HG-5 High Gain Antenna", "HG5", 5_000_000, true),
                part("Communotron 16", "C16", 500_000, false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_body_lookup_is_case_insensitive() {
        let data = catalog();

        assert_eq!(data.body("mun").unwrap().name, "Mun");
        assert_eq!(data.body("Mun").unwrap().name, "Mun");
        assert_eq!(data.body("KERBIN").unwrap().name, "Kerbin");

        assert!(matches!(
            data.body("space"),
            Err(PlannerError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_part_lookup_is_exact() {
        let data = catalog();

        assert_eq!(data.part_by_alias("HG5").unwrap().power, 5_000_000);
        assert!(matches!(
            data.part_by_alias("hg5"),
            Err(PlannerError::UnknownPart(_))
        ));
        assert!(matches!(
            data.part_by_alias("HG-5 High Gain Antenna"),
            Err(PlannerError::UnknownPart(_))
        ));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let result = GameData::new(
            vec![],
            vec![
                part("HG-5 High Gain Antenna", "HG5", 5_000_000, true),
                part("Other Antenna", "HG5", 1_000, false),
            ],
        );

        assert!(matches!(result, Err(PlannerError::DuplicateAlias(_))));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let result = GameData::new(
            vec![Body::new("Mun", 200_000, 9.7599066e20, 2_429_559, Some("Kerbin".into()))],
            vec![],
        );

        assert!(matches!(result, Err(PlannerError::UnknownParent(_, _))));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let result = GameData::new(
            vec![
                Body::new("A", 1_000, 1.0e20, 0, Some("B".into())),
                Body::new("B", 1_000, 1.0e20, 0, Some("A".into())),
            ],
            vec![],
        );

        assert!(matches!(result, Err(PlannerError::ParentCycle(_))));
    }

    #[test]
    fn test_parts_by_signal_order() {
        let data = catalog();
        let order: Vec<&str> = data
            .parts_by_signal_order()
            .iter()
            .map(|p| p.alias.as_str())
            .collect();

        // Direct antennas first, then relays, weakest to strongest.
        assert_eq!(order, vec!["C16", "HG5"]);
    }

    #[test]
    fn test_hierarchy_helpers() {
        let data = catalog();

        let roots: Vec<&str> = data.root_bodies().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(roots, vec!["Kerbin"]);

        let moons: Vec<&str> = data
            .children_of("Kerbin")
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(moons, vec!["Mun"]);
    }

    #[test]
    fn test_selected_part_copies_the_definition() {
        let data = catalog();
        let part = data.part_by_alias("HG5").unwrap();

        let a = SelectedPart::new(part, 1);
        let b = SelectedPart::new(part, 4);

        assert_eq!(a.quantity, 1);
        assert_eq!(b.quantity, 4);
        assert_eq!(data.part_by_alias("HG5").unwrap().power, a.part.power);
    }
}
