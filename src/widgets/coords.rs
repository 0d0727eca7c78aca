use crate::common::color::*;
use crate::common::types::*;
use crate::scene::types::*;
use crate::session::ClickEvent;
use crate::widgets::Component;
use crate::widgets::scale::TILE_STYLE;


pub const DEFAULT_POINT: GeoPoint = GeoPoint {lat: 23.63, lon: -102.55};
pub const PLACEHOLDER: &str = "Click on the map to get the coordinates.";
const MAP_ZOOM: u8 = 3;
const MARKER_SIZE: f32 = 14.0;


/// Marker and readout for the latest click on the 2d map
pub struct CoordinatePicker;

pub fn format_coordinates(p: &GeoPoint) -> String {
    format!("Latitude {:.4}, Longitude {:.4}", p.lat, p.lon)
}

impl Component for CoordinatePicker {
    /// Only the most recent click counts, no history is kept
    type Input = Option<ClickEvent>;
    const NAME: &'static str = "coords";

    fn compute(click: Option<ClickEvent>) -> Computation {
        let (point, caption) = match click.as_ref().and_then(|c| c.point()) {
            Some(p) => (p, Caption::plain(format_coordinates(&p))),
            None => (DEFAULT_POINT, Caption::plain(PLACEHOLDER)),
        };

        let mut scene = Scene::new(View::Tiles {
            style: TILE_STYLE.to_string(),
            center: point,
            zoom: MAP_ZOOM,
        });
        scene.push(Primitive::Marker(Marker {
            label: None,
            color: RED,
            size: MARKER_SIZE,
            symbol: Symbol::Circle,
            position: point,
        }));

        Computation {scene, caption}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_without_click() {
        let out = CoordinatePicker::compute(None);
        assert_eq!(out.caption.to_string(), PLACEHOLDER);
        assert_eq!(out.scene.markers().next().unwrap().position, DEFAULT_POINT);

        let out = CoordinatePicker::compute(Some(ClickEvent::default()));
        assert_eq!(out.caption.to_string(), PLACEHOLDER);
    }

    #[test]
    fn click_formats_four_decimals() {
        let p = GeoPoint {lat: 40.7128, lon: -74.0060};
        let out = CoordinatePicker::compute(Some(ClickEvent::at(p)));
        assert_eq!(out.caption.to_string(), "Latitude 40.7128, Longitude -74.0060");
        assert_eq!(out.scene.markers().next().unwrap().position, p);
    }

    #[test]
    fn no_history() {
        let p = GeoPoint {lat: 1.0, lon: 2.0};
        CoordinatePicker::compute(Some(ClickEvent::at(p)));
        assert_eq!(CoordinatePicker::compute(None), CoordinatePicker::compute(None));
        assert_eq!(CoordinatePicker::compute(None).scene.markers().next().unwrap().position, DEFAULT_POINT);
    }
}
