//! Report assembly
//!
//! Turns engine and signal-model output into the two tables the planner
//! prints, plus a serializable `PlanReport` for machine-readable export.
//! All numbers stay raw here until the final render pass.

use crate::format::{pretty_distance, pretty_duration, pretty_speed, render_table};
use crate::signal::{combined_power, min_signal_distance};
use crate::{GameData, Result, SelectedPart};
use orbital_mechanics::suggest::{OrbitSuggestion, SuggestionSweep};
use serde::Serialize;

/// Distances one part model reaches against the relay, per quantity.
#[derive(Debug, Clone, Serialize)]
pub struct PartRange {
    pub part: String,
    pub alias: String,
    /// Index 0 holds quantity 1.
    pub distances: Vec<u64>,
}

/// Everything one planner run computed, in raw numbers.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub target_body: String,
    pub min_strength: f64,
    pub combined_power: u64,
    /// Minimum viable orbit altitude, meters.
    pub minimum_orbit: u64,
    pub part_ranges: Vec<PartRange>,
    pub orbits: Vec<OrbitSuggestion>,
    pub quota_met: bool,
}

/// Link distances between the relay and every cataloged part at
/// quantities `1..=max_quantity`.
///
/// Every part is listed, relay or not: the table answers "how far from
/// the relay can a craft with N of these still hold the threshold".
pub fn part_ranges(
    relay_power: u64,
    min_strength: f64,
    max_quantity: u32,
    data: &GameData,
) -> Result<Vec<PartRange>> {
    let mut ranges = Vec::new();
    for part in data.parts_by_signal_order() {
        let mut distances = Vec::with_capacity(max_quantity as usize);
        for quantity in 1..=max_quantity {
            let power = combined_power(&[SelectedPart::new(part, quantity)])?;
            distances.push(min_signal_distance(relay_power, power, min_strength));
        }
        ranges.push(PartRange {
            part: part.full_name.clone(),
            alias: part.alias.clone(),
            distances,
        });
    }
    Ok(ranges)
}

/// Header row plus one row per part, distances rendered to three digits.
pub fn part_distance_matrix(ranges: &[PartRange]) -> Vec<Vec<String>> {
    let quantities = ranges.first().map_or(0, |r| r.distances.len());

    let mut header = vec!["Communication Part".to_string()];
    header.extend((1..=quantities).map(|q| format!("Quantity {q}")));

    let mut matrix = vec![header];
    for range in ranges {
        let mut row = vec![range.part.clone()];
        row.extend(
            range
                .distances
                .iter()
                .map(|&d| pretty_distance(d, Some(3))),
        );
        matrix.push(row);
    }
    matrix
}

/// Header row plus one row per recommended orbit.
pub fn orbit_matrix(sweep: &SuggestionSweep) -> Vec<Vec<String>> {
    let mut matrix = vec![vec![
        "Satellite Altitude".to_string(),
        "Satellite Period".to_string(),
        "Phase Periapsis".to_string(),
        "Phase Period".to_string(),
        "Transfer Delta-V".to_string(),
    ]];
    for orbit in &sweep.orbits {
        matrix.push(vec![
            pretty_distance(orbit.altitude.max(0) as u64, None),
            pretty_duration(orbit.period),
            pretty_distance(orbit.phase_periapsis.max(0) as u64, None),
            pretty_duration(orbit.phase_period),
            pretty_speed(orbit.transfer_delta_v.unsigned_abs()),
        ]);
    }
    matrix
}

/// A `=== title ===` banner sized to span `width` characters after the
/// prefix, title centered with one space each side.
pub fn centered_banner(title: &str, width: usize, prefix: &str) -> String {
    let fill = width.saturating_sub(title.len() + 2);
    let left = fill / 2;
    let right = fill - left;
    format!(
        "{prefix}{} {title} {}",
        "=".repeat(left),
        "=".repeat(right)
    )
}

/// Render both tables with the standard two-space indent.
pub fn render_report_tables(report_matrix: &[Vec<String>]) -> Result<String> {
    render_table(report_matrix, "  ", true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AntennaPart;
    use orbital_mechanics::{suggest::recommended_orbits, Body};

    fn catalog() -> GameData {
        GameData::new(
            vec![Body::new("Mun", 200_000, 9.7599066e20, 2_429_559, None)],
            vec![
                AntennaPart {
                    full_name: "Communotron 16".to_string(),
                    alias: "C16".to_string(),
                    power: 500_000,
                    combinable: true,
                    combinability_exponent: 1.0,
                    relay: false,
                },
                AntennaPart {
                    full_name: "HG-5 High Gain Antenna".to_string(),
                    alias: "HG5".to_string(),
                    power: 5_000_000,
                    combinable: true,
                    combinability_exponent: 0.75,
                    relay: true,
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_part_ranges() {
        let ranges = part_ranges(5_000_000, 0.8, 4, &catalog()).unwrap();

        assert_eq!(ranges.len(), 2);
        // Direct antennas sort ahead of relays.
        assert_eq!(ranges[0].alias, "C16");
        assert_eq!(ranges[0].distances.len(), 4);
        // Single Communotron 16 against the 5M relay at 80%.
        assert_eq!(ranges[0].distances[0], 454_009);
        // More antennas never shorten the link.
        assert!(ranges[0].distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_part_distance_matrix_shape() {
        let ranges = part_ranges(5_000_000, 0.8, 3, &catalog()).unwrap();
        let matrix = part_distance_matrix(&ranges);

        assert_eq!(matrix.len(), 3);
        assert_eq!(
            matrix[0],
            vec!["Communication Part", "Quantity 1", "Quantity 2", "Quantity 3"]
        );
        assert_eq!(matrix[1][0], "Communotron 16");
        assert_eq!(matrix[1][1], "454.009 km");
    }

    #[test]
    fn test_orbit_matrix() {
        let data = catalog();
        let mun = data.body("Mun").unwrap();
        let sweep = recommended_orbits(mun, 200_000, 2);
        let matrix = orbit_matrix(&sweep);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[1][0], "377.36 km");
        assert_eq!(matrix[1][1], "3 hrs 0 mins 0 secs");
        assert_eq!(matrix[1][2], "103.856 km");
        assert_eq!(matrix[1][3], "2 hrs 0 mins 0 secs");
        assert_eq!(matrix[1][4], "67 m/s");
    }

    #[test]
    fn test_centered_banner() {
        assert_eq!(centered_banner("Orbits", 20, ""), "====== Orbits ======");
        assert_eq!(centered_banner("Odd", 10, "  "), "  == Odd ===");
    }
}
