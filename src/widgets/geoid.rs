use std::f64::consts::PI;

use crate::common::color::*;
use crate::common::types::*;
use crate::common::util::linspace;
use crate::scene::types::*;
use crate::widgets::Component;


const GRID_SIZE: usize = 100;
const SPHERE_RADIUS: Coord = 10.0;
/// Exaggerated for visibility, not a geodetic value
const GEOID_EQUATORIAL_RADIUS: Coord = 10.2;
const GEOID_POLAR_RADIUS: Coord = 9.8;


/// Perfect sphere next to a flattened "geoid"
pub struct GeoidComparison;

/// Samples x = R·cos(u)·sin(v), y = R·sin(u)·sin(v), z = R'·cos(v)
pub fn spheroid_grid(equatorial: Coord, polar: Coord, size: usize) -> Vec<Vec<Point3D>> {
    let u = linspace(0.0, 2.0*PI, size);
    let v = linspace(0.0, PI, size);
    u.iter()
        .map(|u| {
            v.iter()
                .map(|v| [equatorial*u.cos()*v.sin(), equatorial*u.sin()*v.sin(), polar*v.cos()])
                .collect()
        })
        .collect()
}

impl Component for GeoidComparison {
    type Input = ();
    const NAME: &'static str = "geoid";

    fn compute(_: ()) -> Computation {
        let mut scene = Scene::new(View::Space {
                axis_titles: Some(["X Axis".to_string(), "Y Axis".to_string(), "Z Axis (Rotation)".to_string()]),
                data_aspect: false,
            })
            .with_title("The Earth: Geoid vs. Perfect Sphere");

        scene.push(Primitive::Surface(SurfaceMesh {
            label: Some("Perfect Sphere".to_string()),
            style: Style::translucent(SCALE_BLUES, 0.7),
            grid: spheroid_grid(SPHERE_RADIUS, SPHERE_RADIUS, GRID_SIZE),
        }));
        scene.push(Primitive::Surface(SurfaceMesh {
            label: Some("Geoid (Exaggerated)".to_string()),
            style: Style::translucent(SCALE_GREYS, 0.6),
            grid: spheroid_grid(GEOID_EQUATORIAL_RADIUS, GEOID_POLAR_RADIUS, GRID_SIZE),
        }));

        Computation {
            scene,
            caption: Caption::plain(
                "The Earth is a geoid. The figure compares a sphere (blue) with an exaggerated geoid (grey) \
                to highlight polar flattening."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn two_surfaces_of_full_grid() {
        let out = GeoidComparison::compute(());
        let surfaces: Vec<_> = out.scene.surfaces().collect();
        assert_eq!(surfaces.len(), 2);
        for s in surfaces {
            assert_eq!((s.rows(), s.columns()), (GRID_SIZE, GRID_SIZE));
        }
    }

    #[test]
    fn sphere_vertices_on_radius() {
        let out = GeoidComparison::compute(());
        let sphere = out.scene.surfaces().next().unwrap();
        for [x, y, z] in sphere.vertices() {
            assert!(((x*x + y*y + z*z).sqrt() - SPHERE_RADIUS).abs() < EPS);
        }
    }

    #[test]
    fn geoid_vertices_on_spheroid() {
        let out = GeoidComparison::compute(());
        let geoid = out.scene.surfaces().nth(1).unwrap();
        for [x, y, z] in geoid.vertices() {
            let r = (x*x + y*y).sqrt();
            assert!(r <= GEOID_EQUATORIAL_RADIUS + EPS);
            assert!(z.abs() <= GEOID_POLAR_RADIUS + EPS);
            // (r/a)^2 + (z/b)^2 == 1 at every vertex
            let e = (r/GEOID_EQUATORIAL_RADIUS).powi(2) + (z/GEOID_POLAR_RADIUS).powi(2);
            assert!((e - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn geoid_equator_and_poles() {
        let grid = spheroid_grid(GEOID_EQUATORIAL_RADIUS, GEOID_POLAR_RADIUS, 3);
        // v = pi/2 is the middle column
        for row in &grid {
            let [x, y, z] = row[1];
            assert!(((x*x + y*y).sqrt() - GEOID_EQUATORIAL_RADIUS).abs() < EPS);
            assert!(z.abs() < EPS);
            assert!((row[0][2] - GEOID_POLAR_RADIUS).abs() < EPS);
            assert!((row[2][2] + GEOID_POLAR_RADIUS).abs() < EPS);
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(GeoidComparison::compute(()), GeoidComparison::compute(()));
    }
}
