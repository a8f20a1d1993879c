//! Shared geographic types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pair of floating-point degrees. No validation is performed;
/// out-of-range values are passed through to the backends unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display_rounds_to_four_places() {
        let c = Coordinate::new(37.42212345, -122.08414321);
        assert_eq!(c.to_string(), "37.4221, -122.0841");
    }
}
