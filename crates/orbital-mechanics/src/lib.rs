//! Closed-form two-body orbit math
//!
//! Kepler-relation helpers for circular and elliptical orbits around a
//! single body, plus the recommended-orbit sweep used to place relay
//! satellites. All distances are meters, all durations are seconds, and
//! every result is rounded to the nearest integer so tables line up with
//! the in-game map view.

use std::f64::consts::PI;

/// Gravitational constant in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Exponent of the inverse Kepler relation. Truncated on purpose: a full
/// `2.0 / 3.0` shifts some derived radii by a meter.
const INVERSE_KEPLER_EXPONENT: f64 = 0.666666666666;

/// A celestial body that relay satellites can orbit.
///
/// Immutable after construction; the standard gravitational parameter is
/// derived from the mass rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    /// Surface radius in meters.
    pub radius: u64,
    /// Mass in kilograms.
    pub mass: f64,
    /// Maximum altitude at which this body's gravity dominates, in meters.
    pub sphere_of_influence: u64,
    /// `None` for the root of the system.
    pub parent: Option<String>,
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        radius: u64,
        mass: f64,
        sphere_of_influence: u64,
        parent: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            radius,
            mass,
            sphere_of_influence,
            parent,
        }
    }

    /// Standard gravitational parameter, m^3 s^-2.
    pub fn mu(&self) -> f64 {
        self.mass * GRAVITATIONAL_CONSTANT
    }

    /// Orbital period in seconds for the orbit with the given periapsis and
    /// apoapsis altitudes (meters above the surface).
    pub fn orbital_period(&self, periapsis: u64, apoapsis: u64) -> u64 {
        let semi_major =
            (periapsis as f64 + apoapsis as f64 + 2.0 * self.radius as f64) / 2.0;
        (2.0 * PI * (semi_major.powi(3) / self.mu()).sqrt()).round() as u64
    }

    /// Altitude in meters of the circular orbit with the given period.
    ///
    /// Negative when the period puts the semi-major axis below the surface.
    pub fn radius_from_period(&self, period: u64) -> i64 {
        self.semi_major_from_period(period) - self.radius as i64
    }

    /// Periapsis altitude of the orbit that has the given apoapsis altitude
    /// and period. A non-positive result means no such orbit clears the
    /// surface; callers must treat it as infeasible.
    pub fn periapsis_from_apoapsis_and_period(&self, apoapsis: i64, period: u64) -> i64 {
        2 * self.semi_major_from_period(period) - apoapsis - 2 * self.radius as i64
    }

    /// First burn of a Hohmann transfer between the circular orbits at the
    /// two altitudes, in m/s. The sign follows the formula: raising the
    /// orbit is positive, lowering it is negative, and the rounding keeps
    /// whatever sign the raw value carries.
    pub fn hohmann_transfer_delta_v(&self, start_altitude: i64, end_altitude: i64) -> i64 {
        let r1 = (start_altitude + self.radius as i64) as f64;
        let r2 = (end_altitude + self.radius as i64) as f64;
        ((self.mu() / r1).sqrt() * ((2.0 * r2 / (r1 + r2)).sqrt() - 1.0)).round() as i64
    }

    // Semi-major axis (meters from the body center) of the orbit with the
    // given period, rounded before any derived arithmetic.
    fn semi_major_from_period(&self, period: u64) -> i64 {
        ((period as f64 * self.mu().sqrt()) / (2.0 * PI))
            .powf(INVERSE_KEPLER_EXPONENT)
            .round() as i64
    }
}

pub mod suggest {
    //! Recommended relay orbits
    //!
    //! Sweeps candidate periods in three-hour steps and keeps the ones a
    //! satellite can actually be delivered to: the orbit must sit inside
    //! the sphere of influence and its phase orbit (two thirds of the
    //! period, so one satellite drops off per apoapsis pass) must clear
    //! the surface.

    use super::Body;
    use serde::Serialize;

    /// Candidate period step: 3 hours in seconds.
    pub const PERIOD_STEP_SECS: u64 = 10_800;

    /// One feasible relay orbit together with its deployment phase orbit.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct OrbitSuggestion {
        /// Circular relay orbit altitude, meters.
        pub altitude: i64,
        /// Relay orbit period, seconds.
        pub period: u64,
        /// Phase orbit periapsis altitude, meters.
        pub phase_periapsis: i64,
        /// Phase orbit period, seconds.
        pub phase_period: u64,
        /// Injection burn from the phase periapsis up to the relay
        /// altitude, m/s.
        pub transfer_delta_v: i64,
    }

    /// Result of a sweep. `quota_met` is false when the sphere of
    /// influence ran out before `count` orbits were found.
    #[derive(Debug, Clone, Serialize)]
    pub struct SuggestionSweep {
        pub orbits: Vec<OrbitSuggestion>,
        pub quota_met: bool,
    }

    /// Sweep candidate periods upward from the circular period at
    /// `min_altitude`, rounded up to the nearest multiple of
    /// [`PERIOD_STEP_SECS`], collecting up to `count` feasible orbits.
    ///
    /// Candidates whose phase periapsis would sit at or below the surface
    /// are skipped; the sweep stops once the derived altitude leaves the
    /// sphere of influence. Altitude grows monotonically with period, so
    /// the loop always terminates.
    pub fn recommended_orbits(body: &Body, min_altitude: u64, count: usize) -> SuggestionSweep {
        let base_period = body.orbital_period(min_altitude, min_altitude);
        let start_period = base_period.div_ceil(PERIOD_STEP_SECS) * PERIOD_STEP_SECS;

        let mut orbits = Vec::new();
        let mut step = 0;
        while orbits.len() < count {
            let period = start_period + PERIOD_STEP_SECS * step;
            step += 1;

            let altitude = body.radius_from_period(period);
            if altitude > body.sphere_of_influence as i64 {
                break;
            }

            let phase_period = (period as f64 * (2.0 / 3.0)).round() as u64;
            let phase_periapsis = body.periapsis_from_apoapsis_and_period(altitude, phase_period);
            if phase_periapsis <= 0 {
                continue;
            }

            orbits.push(OrbitSuggestion {
                altitude,
                period,
                phase_periapsis,
                phase_period,
                transfer_delta_v: body.hohmann_transfer_delta_v(phase_periapsis, altitude),
            });
        }

        let quota_met = orbits.len() == count;
        SuggestionSweep { orbits, quota_met }
    }
}
