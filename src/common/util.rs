use std::f64::consts::PI;
use std::path::Path;
use num_traits::Float;
use regex::Regex;

use crate::common::error::*;
use crate::common::types::*;


/// Evenly spaced samples over [start, stop], both ends included
pub fn linspace<T: Float>(start: T, stop: T, num: usize) -> Vec<T> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / T::from(num - 1).unwrap_or_else(T::one);
            (0..num)
                .map(|i| {
                    if i == num - 1 {stop} else {start + step * T::from(i).unwrap_or_else(T::zero)}
                })
                .collect()
        }
    }
}

/// Calculates coordinates of a point on a globe of the given radius
pub fn calc_point3d(radius: Coord, lon: Coord, lat: Coord) -> (Coord, Coord, Coord) {
    let phi = lon*PI/180.0;
    let theta = lat*PI/180.0;
    let x = radius*phi.cos() * theta.cos();
    let y = radius*phi.sin() * theta.cos();
    let z = radius*theta.sin();
    (x, y, z)
}

/// Parses "lat,lon" click coordinates
pub fn parse_geopoint(value: &str) -> GeoResult<GeoPoint> {
    let re = Regex::new(r"^\s*(-?[0-9]+(?:\.[0-9]+)?)\s*[,\s]\s*(-?[0-9]+(?:\.[0-9]+)?)\s*$")
        .map_err(|err| GeoError::input(err.to_string()))?;
    match re.captures(value) {
        Some(caps) => {
            let lat = caps[1].parse::<Coord>().map_err(|err| GeoError::input(err.to_string()))?;
            let lon = caps[2].parse::<Coord>().map_err(|err| GeoError::input(err.to_string()))?;
            GeoPoint::new(lat, lon)
        }
        None => Err(GeoError::input(format!("expected 'lat,lon', got '{}'", value)))
    }
}

/// Check validity of directory path specification
pub fn check_dir(value: &str) -> GeoResult<()> {
    let p = Path::new(&value);
    if p.exists() && p.is_dir() {
        Ok(())
    } else {
        Err(GeoError::settings(format!("Directory path is invalid or can't be read: {}", value)))
    }
}

/// Check validity of file path specification
pub fn check_file(value: &str) -> GeoResult<()> {
    let p = Path::new(&value);
    if p.exists() && p.is_file() {
        Ok(())
    } else {
        Err(GeoError::settings(format!("File path is invalid or can't be read: {}", value)))
    }
}
