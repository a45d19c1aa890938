use serde::{Deserialize, Serialize};

/// Length of an Earth year, in Earth days
pub const EARTH_ORBITAL_PERIOD_DAYS: f64 = 365.25;

/// Length of an Earth day, in hours
pub const EARTH_ROTATION_PERIOD_HOURS: f64 = 24.0;

/// Response wrapper for `GET /people/?search=`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleSearchResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Character>,
}

/// A person as returned by SWAPI
///
/// Values are kept verbatim; SWAPI uses strings such as `"unknown"` for
/// missing measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub birth_year: String,
    /// URL of the character's homeworld resource
    #[serde(default)]
    pub homeworld: Option<String>,
}

/// A planet as returned by SWAPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homeworld {
    pub name: String,
    pub population: String,
    /// Length of the planet's year, in local days
    pub orbital_period: String,
    /// Length of the planet's day, in hours
    pub rotation_period: String,
}

impl Homeworld {
    /// Planet year and day expressed in Earth years and Earth days
    ///
    /// Returns `None` when either period is not numeric.
    pub fn earth_comparison(&self) -> Option<(f64, f64)> {
        let orbital: f64 = self.orbital_period.trim().parse().ok()?;
        let rotation: f64 = self.rotation_period.trim().parse().ok()?;
        Some((
            orbital / EARTH_ORBITAL_PERIOD_DAYS,
            rotation / EARTH_ROTATION_PERIOD_HOURS,
        ))
    }
}
