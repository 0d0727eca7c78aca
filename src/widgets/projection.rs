use crate::common::color::*;
use crate::scene::types::*;
use crate::widgets::Component;


const MAP_HEIGHT: u32 = 300;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Projection styles the selector offers
pub enum ProjectionChoice {
    Cylindrical,
    Conic,
    Azimuthal,
}

impl ProjectionChoice {
    pub const ALL: [ProjectionChoice; 3] =
        [ProjectionChoice::Cylindrical, ProjectionChoice::Conic, ProjectionChoice::Azimuthal];

    /// Renderer projection identifier
    pub fn key(&self) -> &'static str {
        match self {
            ProjectionChoice::Cylindrical => "cylindrical stereographic",
            ProjectionChoice::Conic => "conic conformal",
            ProjectionChoice::Azimuthal => "azimuthal equidistant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectionChoice::Cylindrical => "Cylindrical",
            ProjectionChoice::Conic => "Conic",
            ProjectionChoice::Azimuthal => "Azimuthal / Polar",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProjectionChoice::Cylindrical => "Cylindrical: Ideal for equatorial zones.",
            ProjectionChoice::Conic => "Conic: Suitable for middle latitudes.",
            ProjectionChoice::Azimuthal => "Azimuthal: Useful for polar regions.",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl Default for ProjectionChoice {
    fn default() -> Self {
        ProjectionChoice::Cylindrical
    }
}

/// World outline under the selected projection
pub struct ProjectionSelector;

impl Component for ProjectionSelector {
    /// Raw projection identifier, passed through even when unknown
    type Input = String;
    const NAME: &'static str = "projection";

    fn compute(key: String) -> Computation {
        let caption = ProjectionChoice::from_key(&key)
            .map(|c| Caption::plain(c.description()))
            .unwrap_or_default();

        Computation {
            scene: Scene::new(View::Geo {
                projection: key,
                coastlines: true,
                land: Some(LIGHT_GREEN),
                ocean: Some(LIGHT_BLUE),
                height: Some(MAP_HEIGHT),
            }),
            caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_choices_are_described() {
        for choice in ProjectionChoice::ALL {
            let out = ProjectionSelector::compute(choice.key().to_string());
            assert_eq!(out.caption.to_string(), choice.description());
            assert_matches!(out.scene.view, View::Geo {ref projection, coastlines: true, ..}
                if projection == choice.key());
        }
    }

    #[test]
    fn unknown_key_passes_through() {
        let out = ProjectionSelector::compute("mollweide".to_string());
        assert_eq!(out.caption.to_string(), "");
        assert!(out.caption.is_empty());
        assert_matches!(out.scene.view, View::Geo {ref projection, ..} if projection == "mollweide");
    }

    #[test]
    fn default_is_cylindrical() {
        assert_eq!(ProjectionChoice::default().key(), "cylindrical stereographic");
        assert_eq!(ProjectionChoice::from_key("conic conformal"), Some(ProjectionChoice::Conic));
        assert_eq!(ProjectionChoice::from_key("conic"), None);
    }
}
