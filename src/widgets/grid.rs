use std::f64::consts::{FRAC_PI_2, PI};

use crate::common::color::*;
use crate::common::types::*;
use crate::common::util::linspace;
use crate::scene::types::*;
use crate::widgets::Component;
use crate::widgets::geoid::spheroid_grid;


const SPHERE_GRID_SIZE: usize = 50;
const CURVE_SAMPLES: usize = 100;
const GUIDE_PARALLELS: [Coord; 4] = [-60.0, -30.0, 30.0, 60.0];
const GUIDE_MERIDIANS: [Coord; 4] = [-120.0, -60.0, 60.0, 120.0];
const MAIN_LINE_WIDTH: f32 = 5.0;
const GUIDE_LINE_WIDTH: f32 = 2.0;


/// Unit sphere with equator, prime meridian and guide curves
pub struct CoordinateGrid;

/// Circle of latitude: x=cos(L)·cos(t), y=cos(L)·sin(t), z=sin(L), t in [0, 2pi]
pub fn parallel(lat_deg: Coord, samples: usize) -> Vec<Point3D> {
    let lat = lat_deg.to_radians();
    linspace(0.0, 2.0*PI, samples)
        .into_iter()
        .map(|t| [lat.cos()*t.cos(), lat.cos()*t.sin(), lat.sin()])
        .collect()
}

/// Half great circle: x=cos(Λ)·cos(v), y=sin(Λ)·cos(v), z=sin(v), v in [-pi/2, pi/2]
pub fn meridian(lon_deg: Coord, samples: usize) -> Vec<Point3D> {
    let lon = lon_deg.to_radians();
    linspace(-FRAC_PI_2, FRAC_PI_2, samples)
        .into_iter()
        .map(|v| [lon.cos()*v.cos(), lon.sin()*v.cos(), v.sin()])
        .collect()
}

fn line(label: Option<&str>, style: Style, points: Vec<Point3D>) -> Primitive {
    Primitive::Line3D(LinePath3D {label: label.map(String::from), style, points})
}

impl Component for CoordinateGrid {
    type Input = ();
    const NAME: &'static str = "grid";

    fn compute(_: ()) -> Computation {
        let mut scene = Scene::new(View::Space {axis_titles: None, data_aspect: true})
            .with_title("Geographic Coordinate System");

        scene.push(Primitive::Surface(SurfaceMesh {
            label: None,
            style: Style::translucent(LIGHT_BLUE, 0.3),
            grid: spheroid_grid(1.0, 1.0, SPHERE_GRID_SIZE),
        }));
        scene.push(line(Some("Equator (Latitude 0°)"),
            Style::solid(RED, MAIN_LINE_WIDTH), parallel(0.0, CURVE_SAMPLES)));
        scene.push(line(Some("Prime Meridian (Longitude 0°)"),
            Style::solid(GREEN, MAIN_LINE_WIDTH), meridian(0.0, CURVE_SAMPLES)));

        for lat in GUIDE_PARALLELS {
            scene.push(line(None, Style::dotted(RED, GUIDE_LINE_WIDTH), parallel(lat, CURVE_SAMPLES)));
        }
        for lon in GUIDE_MERIDIANS {
            scene.push(line(None, Style::dotted(GREEN, GUIDE_LINE_WIDTH), meridian(lon, CURVE_SAMPLES)));
        }

        Computation {
            scene,
            caption: Caption {segments: vec![
                TextSegment {text: "Latitude:".to_string(), bold: true},
                TextSegment {text: " angular distance from the Equator (0°). Horizontal lines are called parallels. ".to_string(), bold: false},
                TextSegment {text: "Longitude:".to_string(), bold: true},
                TextSegment {text: " angular distance from the Greenwich Meridian (0°). Vertical lines are called meridians.".to_string(), bold: false},
            ]},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn lines(c: &Computation) -> Vec<&LinePath3D> {
        c.scene.primitives.iter().filter_map(|p| match p {
            Primitive::Line3D(l) => Some(l),
            _ => None,
        }).collect()
    }

    #[test]
    fn sphere_and_ten_curves() {
        let out = CoordinateGrid::compute(());
        assert_eq!(out.scene.surfaces().count(), 1);
        let ls = lines(&out);
        assert_eq!(ls.len(), 10);
        assert_eq!(ls.iter().filter(|l| l.style.dash == Dash::Dot).count(), 8);
        assert!(ls.iter().filter(|l| l.style.dash == Dash::Dot).all(|l| !l.style.show_legend));
        assert_eq!(ls[0].label.as_deref(), Some("Equator (Latitude 0°)"));
    }

    #[test]
    fn parallels_keep_latitude() {
        for lat in GUIDE_PARALLELS {
            for [x, y, z] in parallel(lat, CURVE_SAMPLES) {
                assert!((z - lat.to_radians().sin()).abs() < EPS);
                assert!(((x*x + y*y).sqrt() - lat.to_radians().cos()).abs() < EPS);
            }
        }
    }

    #[test]
    fn meridians_keep_longitude() {
        for lon in GUIDE_MERIDIANS.iter().chain([0.0].iter()) {
            let pts = meridian(*lon, CURVE_SAMPLES);
            assert!((pts[0][2] + 1.0).abs() < EPS);
            assert!((pts[CURVE_SAMPLES-1][2] - 1.0).abs() < EPS);
            for [x, y, z] in pts {
                assert!(((x*x + y*y + z*z).sqrt() - 1.0).abs() < EPS);
                if x.abs() > EPS || y.abs() > EPS {
                    assert!((y.atan2(x).to_degrees() - lon).abs() < 1e-6);
                }
            }
        }
    }
}
