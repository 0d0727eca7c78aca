use crate::common::color::*;
use crate::common::types::*;
use crate::scene::types::*;
use crate::session::*;
use crate::widgets::Component;


/// Map center until the first click of a session
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {lat: 19.4326, lon: -99.1332};
pub const TILE_STYLE: &str = "open-street-map";
const MARKER_SIZE: f32 = 10.0;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse map scale category
pub enum ScaleBand {Small, Medium, Large}

impl ScaleBand {
    pub fn classify(zoom: ZoomLevel) -> Self {
        match zoom.get() {
            z if z >= 10 => ScaleBand::Large,
            z if z >= 4 => ScaleBand::Medium,
            _ => ScaleBand::Small,
        }
    }

    pub fn caption(&self) -> Caption {
        match self {
            ScaleBand::Large => Caption::labelled("Large Scale:",
                " Less reduction (e.g. 1:50,000). Shows great detail of small areas."),
            ScaleBand::Medium => Caption::labelled("Medium Scale:",
                " Intermediate reduction. Shows countries or regions."),
            ScaleBand::Small => Caption::labelled("Small Scale:",
                " Greater reduction (e.g. 1:250,000+). Shows little detail of large areas."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInput {
    pub zoom: ZoomLevel,
    /// Stored session point, if a click has happened
    pub center: Option<GeoPoint>,
}

/// Zoomable map centred on the session's stored point
pub struct ScaleExplorer;

impl ScaleExplorer {
    /// Turns a click on the scale map into a session update
    pub fn capture_click(ctx: &mut SessionContext, click: Option<&ClickEvent>) -> StateUpdate {
        let update = StateUpdate::from_click(click);
        match update {
            StateUpdate::Replace(p) => tracing::debug!(point = %p, "scale map center stored"),
            StateUpdate::Retain => tracing::debug!("click without point data, center retained"),
        }
        ctx.apply(update);
        update
    }

    /// Recomputes against the session's current state
    pub fn compute_for(ctx: &SessionContext, zoom: ZoomLevel) -> Computation {
        Self::recompute(ScaleInput {zoom, center: ctx.map_center()}).1
    }
}

impl Component for ScaleExplorer {
    type Input = ScaleInput;
    const NAME: &'static str = "scale";

    fn compute(input: ScaleInput) -> Computation {
        let center = input.center.unwrap_or(DEFAULT_CENTER);
        let mut scene = Scene::new(View::Tiles {
            style: TILE_STYLE.to_string(),
            center,
            zoom: input.zoom.get(),
        });
        scene.push(Primitive::Marker(Marker {
            label: None,
            color: RED,
            size: MARKER_SIZE,
            symbol: Symbol::Circle,
            position: center,
        }));

        Computation {scene, caption: ScaleBand::classify(input.zoom).caption()}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn zoom(z: u8) -> ZoomLevel {
        ZoomLevel::new(z).unwrap()
    }

    #[test]
    fn classify_band_edges() {
        assert_eq!(ScaleBand::classify(zoom(0)), ScaleBand::Small);
        assert_eq!(ScaleBand::classify(zoom(3)), ScaleBand::Small);
        assert_eq!(ScaleBand::classify(zoom(4)), ScaleBand::Medium);
        assert_eq!(ScaleBand::classify(zoom(9)), ScaleBand::Medium);
        assert_eq!(ScaleBand::classify(zoom(10)), ScaleBand::Large);
        assert_eq!(ScaleBand::classify(zoom(15)), ScaleBand::Large);
    }

    #[test]
    fn caption_follows_band() {
        let out = ScaleExplorer::compute(ScaleInput {zoom: zoom(12), center: None});
        assert_eq!(out.caption.segments[0].text, "Large Scale:");
        assert!(out.caption.segments[0].bold);
        let out = ScaleExplorer::compute(ScaleInput {zoom: zoom(2), center: None});
        assert!(out.caption.to_string().starts_with("Small Scale:"));
    }

    #[test]
    fn default_center_without_click() {
        let ctx = SessionContext::new();
        let out = ScaleExplorer::compute_for(&ctx, zoom(4));
        assert_matches!(out.scene.view, View::Tiles {center, zoom: 4, ..} if center == DEFAULT_CENTER);
        assert_eq!(out.scene.markers().next().unwrap().position, DEFAULT_CENTER);
    }

    #[test]
    fn click_recenters_and_empty_click_is_noop() {
        let mut ctx = SessionContext::new();
        let p = GeoPoint {lat: 48.8566, lon: 2.3522};
        ScaleExplorer::capture_click(&mut ctx, Some(&ClickEvent::at(p)));
        let first = ScaleExplorer::compute_for(&ctx, zoom(7));

        let update = ScaleExplorer::capture_click(&mut ctx, Some(&ClickEvent::default()));
        assert_matches!(update, StateUpdate::Retain);
        let second = ScaleExplorer::compute_for(&ctx, zoom(7));
        ScaleExplorer::capture_click(&mut ctx, None);
        let third = ScaleExplorer::compute_for(&ctx, zoom(7));

        assert_eq!(ctx.map_center(), Some(p));
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(third.scene.markers().next().unwrap().position, p);
    }
}
