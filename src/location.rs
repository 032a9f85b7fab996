//! # Location
//!
//! The `Location` struct is the externally supplied input record: a named
//! point with latitude and longitude in degrees. Locations are identified by
//! their position in the input sequence and are never mutated by the engine.

/// A named geographic waypoint.
///
/// The engine refers to locations by their index in the input slice; the
/// record itself only carries presentation data (the name) and coordinates
/// for the distance metric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Display name, carried through to results for the reporting layer.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}
