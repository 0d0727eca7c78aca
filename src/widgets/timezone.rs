use crate::common::color::*;
use crate::common::types::*;
use crate::scene::types::*;
use crate::widgets::Component;


pub const PROMPT: &str = "Enter an hour.";
const MARKER_LAT: Coord = 30.0;
const MARKER_SIZE: f32 = 10.0;
const MERIDIAN_STEP: usize = 15;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeZoneInput {
    /// Absent while the hour box is empty
    pub base_hour: Option<Hour>,
    pub base: TimeZoneOffset,
    pub target: TimeZoneOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of converting a whole hour between two zones
pub struct TimeConversion {
    pub difference: i8,
    pub target_hour: Hour,
}

/// Hour in the target zone for the base hour in the base zone
pub fn convert(base_hour: Hour, base: TimeZoneOffset, target: TimeZoneOffset) -> TimeConversion {
    let difference = target.hours() - base.hours();
    let target_hour = (base_hour as i32 + difference as i32 + 24).rem_euclid(24) as Hour;
    TimeConversion {difference, target_hour}
}

/// Converts a reference hour and draws the two zones' meridians
pub struct TimeZoneCalculator;

fn meridian_guides() -> impl Iterator<Item = Primitive> {
    (-180..=180).step_by(MERIDIAN_STEP).map(|lon| {
        Primitive::GeoLine(GeoPath {
            label: None,
            style: Style::dotted(GRAY, 0.5),
            points: vec![GeoPoint {lat: -90.0, lon: lon as Coord}, GeoPoint {lat: 90.0, lon: lon as Coord}],
        })
    })
}

fn zone_marker(label: &str, color: RGB, offset: TimeZoneOffset) -> Primitive {
    Primitive::Marker(Marker {
        label: Some(label.to_string()),
        color,
        size: MARKER_SIZE,
        symbol: Symbol::Star,
        position: GeoPoint {lat: MARKER_LAT, lon: offset.meridian()},
    })
}

impl Component for TimeZoneCalculator {
    type Input = TimeZoneInput;
    const NAME: &'static str = "timezone";

    fn compute(input: TimeZoneInput) -> Computation {
        let base_hour = match input.base_hour {
            Some(h) => h,
            None => return Computation {scene: Scene::empty(), caption: Caption::plain(PROMPT)},
        };
        let TimeConversion {target_hour, ..} = convert(base_hour, input.base, input.target);

        let caption = Caption::plain(format!("If it is {:02}:00 in {}, it is {:02}:00 in {}.",
            base_hour, input.base, target_hour, input.target));

        let mut scene = Scene::new(View::Geo {
            projection: "natural earth".to_string(),
            coastlines: true,
            land: Some(LIGHT_GRAY),
            ocean: Some(LIGHT_BLUE),
            height: Some(400),
        });
        scene.push(Primitive::GeoLine(GeoPath {
            label: None,
            style: Style::solid(LIGHT_GRAY, 1.0),
            points: vec![GeoPoint {lat: 0.0, lon: -180.0}, GeoPoint {lat: 0.0, lon: 180.0}],
        }));
        meridian_guides().for_each(|p| scene.push(p));
        scene.push(zone_marker("Reference", BLUE, input.base));
        scene.push(zone_marker("Target", RED, input.target));

        Computation {scene, caption}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn tz(h: i8) -> TimeZoneOffset {
        TimeZoneOffset::new(h).unwrap()
    }

    fn input(hour: Option<Hour>, base: i8, target: i8) -> TimeZoneInput {
        TimeZoneInput {base_hour: hour, base: tz(base), target: tz(target)}
    }

    #[test]
    fn noon_utc_to_utc_minus_6() {
        assert_eq!(convert(12, tz(0), tz(-6)).target_hour, 6);
        let out = TimeZoneCalculator::compute(input(Some(12), 0, -6));
        assert_eq!(out.caption.to_string(), "If it is 12:00 in UTC, it is 06:00 in UTC-6.");
    }

    #[test]
    fn wraps_past_midnight() {
        let c = convert(23, tz(-5), tz(9));
        assert_eq!(c, TimeConversion {difference: 14, target_hour: 13});
        let out = TimeZoneCalculator::compute(input(Some(23), -5, 9));
        assert_eq!(out.caption.to_string(), "If it is 23:00 in UTC-5, it is 13:00 in UTC+9.");
    }

    #[test]
    fn always_in_range_and_reversible() {
        for h in 0..24u8 {
            for b in MIN_OFFSET..=MAX_OFFSET {
                for t in MIN_OFFSET..=MAX_OFFSET {
                    let there = convert(h, tz(b), tz(t));
                    assert!(there.target_hour < 24);
                    let back = convert(there.target_hour, tz(t), tz(b));
                    assert_eq!(back.difference, -there.difference);
                    assert_eq!(back.target_hour, h);
                }
            }
        }
    }

    #[test]
    fn missing_hour_prompts() {
        let out = TimeZoneCalculator::compute(input(None, 3, 4));
        assert_eq!(out.caption.to_string(), PROMPT);
        assert!(out.scene.is_empty());
    }

    #[test]
    fn diagram_markers_and_guides() {
        let out = TimeZoneCalculator::compute(input(Some(8), -5, 9));
        assert_matches!(out.scene.view, View::Geo {coastlines: true, ref projection, ..}
            if projection == "natural earth");
        let markers: Vec<_> = out.scene.markers().collect();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].position, GeoPoint {lat: 30.0, lon: -75.0});
        assert_eq!(markers[1].position, GeoPoint {lat: 30.0, lon: 135.0});
        assert_eq!(markers[0].label.as_deref(), Some("Reference"));
        let guides = out.scene.primitives.iter()
            .filter(|p| matches!(p, Primitive::GeoLine(g) if g.style.dash == Dash::Dot))
            .count();
        assert_eq!(guides, 25);
    }
}
