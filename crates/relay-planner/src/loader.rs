//! Game data loading
//!
//! Reads the `gamedata.json` catalog once at startup. The file keeps the
//! key spelling of the game's own config ("sphere of influence",
//! "combinability exponent"), so everything deserializes through raw
//! structs before becoming catalog values. Entries with non-positive
//! physical values are skipped with a warning; structural problems abort
//! the load.

use crate::{AntennaPart, GameData, Result};
use orbital_mechanics::Body;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RawGameData {
    bodies: BTreeMap<String, RawBody>,
    #[serde(rename = "communication parts")]
    communication_parts: BTreeMap<String, RawPart>,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    radius: u64,
    mass: f64,
    #[serde(rename = "sphere of influence")]
    sphere_of_influence: u64,
    #[serde(rename = "parent body", default)]
    parent_body: String,
}

#[derive(Debug, Deserialize)]
struct RawPart {
    alias: String,
    power: u64,
    combinable: bool,
    #[serde(rename = "combinability exponent")]
    combinability_exponent: f64,
    relay: bool,
}

/// Load and validate the catalog from a game data file.
pub fn load_game_data(path: impl AsRef<Path>) -> Result<GameData> {
    let path = path.as_ref();
    info!("Loading game data from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: RawGameData = serde_json::from_reader(reader)?;

    let mut bodies = Vec::new();
    let mut skipped = 0;
    for (name, body) in raw.bodies {
        if body.radius == 0 || body.mass <= 0.0 {
            warn!("Skipping body {:?}: non-positive radius or mass", name);
            skipped += 1;
            continue;
        }

        let parent = if body.parent_body.is_empty() {
            None
        } else {
            Some(body.parent_body)
        };
        bodies.push(Body::new(
            name,
            body.radius,
            body.mass,
            body.sphere_of_influence,
            parent,
        ));
    }

    let mut parts = Vec::new();
    for (full_name, part) in raw.communication_parts {
        if part.power == 0 || part.combinability_exponent <= 0.0 {
            warn!("Skipping part {:?}: non-positive power or exponent", full_name);
            skipped += 1;
            continue;
        }

        parts.push(AntennaPart {
            full_name,
            alias: part.alias,
            power: part.power,
            combinable: part.combinable,
            combinability_exponent: part.combinability_exponent,
            relay: part.relay,
        });
    }

    info!(
        "Loaded {} bodies and {} parts ({} entries skipped)",
        bodies.len(),
        parts.len(),
        skipped
    );

    GameData::new(bodies, parts)
}
