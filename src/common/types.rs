use std::fmt;
use serde::{Deserialize, Serialize};

use crate::common::error::*;


/// Coordinate
pub type Coord = f64;

/// Hour of the day (0..=23)
pub type Hour = u8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Geopoint as latitude and longitude in decimal degrees
pub struct GeoPoint {
    pub lat: Coord,
    pub lon: Coord,
}

impl GeoPoint {
    /// Checked constructor, used where user input enters the program
    pub fn new(lat: Coord, lon: Coord) -> GeoResult<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::input(format!("latitude {} is outside [-90, 90]", lat)))
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::input(format!("longitude {} is outside [-180, 180]", lon)))
        }
        Ok(GeoPoint {lat, lon})
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Map zoom level, kept inside [MIN_ZOOM, MAX_ZOOM] by construction
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub fn new(level: u8) -> GeoResult<Self> {
        if level > MAX_ZOOM {
            Err(GeoError::input(format!("zoom level {} is outside [{}, {}]", level, MIN_ZOOM, MAX_ZOOM)))
        } else {
            Ok(ZoomLevel(level))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        ZoomLevel(4)
    }
}

pub const MIN_OFFSET: i8 = -12;
pub const MAX_OFFSET: i8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Whole-hour UTC offset
pub struct TimeZoneOffset(i8);

impl TimeZoneOffset {
    pub const UTC: TimeZoneOffset = TimeZoneOffset(0);

    pub fn new(hours: i8) -> GeoResult<Self> {
        if (MIN_OFFSET..=MAX_OFFSET).contains(&hours) {
            Ok(TimeZoneOffset(hours))
        } else {
            Err(GeoError::input(format!("UTC offset {} is outside [{}, {}]", hours, MIN_OFFSET, MAX_OFFSET)))
        }
    }

    pub fn hours(&self) -> i8 {
        self.0
    }

    /// Longitude of the zone's central meridian (15° per hour)
    pub fn meridian(&self) -> Coord {
        self.0 as Coord * 15.0
    }
}

impl fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "UTC")
        } else {
            write!(f, "UTC{:+}", self.0)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn offset_formatting() {
        assert_eq!(TimeZoneOffset::new(0).unwrap().to_string(), "UTC");
        assert_eq!(TimeZoneOffset::new(5).unwrap().to_string(), "UTC+5");
        assert_eq!(TimeZoneOffset::new(-6).unwrap().to_string(), "UTC-6");
        assert_eq!(TimeZoneOffset::new(14).unwrap().to_string(), "UTC+14");
        assert_eq!(TimeZoneOffset::new(-12).unwrap().to_string(), "UTC-12");
    }

    #[test]
    fn offset_formatting_whole_range() {
        for h in MIN_OFFSET..=MAX_OFFSET {
            let s = TimeZoneOffset::new(h).unwrap().to_string();
            match h {
                0 => assert_eq!(s, "UTC"),
                h if h > 0 => assert_eq!(s, format!("UTC+{}", h)),
                h => assert_eq!(s, format!("UTC-{}", -h)),
            }
        }
    }

    #[test]
    fn offset_bounds() {
        assert_matches!(TimeZoneOffset::new(-13), Err(GeoError::InvalidInput {..}));
        assert_matches!(TimeZoneOffset::new(15), Err(GeoError::InvalidInput {..}));
        assert_eq!(TimeZoneOffset::new(-5).unwrap().meridian(), -75.0);
    }

    #[test]
    fn zoom_bounds() {
        assert_eq!(ZoomLevel::new(15).unwrap().get(), 15);
        assert_matches!(ZoomLevel::new(16), Err(GeoError::InvalidInput {..}));
        assert_eq!(ZoomLevel::default().get(), 4);
    }

    #[test]
    fn geopoint_bounds() {
        assert!(GeoPoint::new(90.0, -180.0).is_ok());
        assert_matches!(GeoPoint::new(90.5, 0.0), Err(GeoError::InvalidInput {..}));
        assert_matches!(GeoPoint::new(0.0, 181.0), Err(GeoError::InvalidInput {..}));
    }
}
