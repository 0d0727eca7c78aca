use std::fmt;
use serde::Serialize;

use crate::common::color::*;
use crate::common::types::*;


/// Vertex of a 3d primitive
pub type Point3D = [Coord; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Line dash pattern
pub enum Dash {Solid, Dot}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Marker glyph
pub enum Symbol {Circle, Star}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Drawing style of a primitive
pub struct Style {
    pub color: RGB,
    pub opacity: f32,
    pub width: f32,
    pub dash: Dash,
    pub show_legend: bool,
}

impl Style {
    pub fn solid(color: RGB, width: f32) -> Self {
        Style {color, opacity: 1.0, width, dash: Dash::Solid, show_legend: true}
    }

    pub fn translucent(color: RGB, opacity: f32) -> Self {
        Style {color, opacity, width: 0.0, dash: Dash::Solid, show_legend: false}
    }

    /// Dotted guide line, kept out of the legend
    pub fn dotted(color: RGB, width: f32) -> Self {
        Style {color, opacity: 1.0, width, dash: Dash::Dot, show_legend: false}
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Parametric surface sampled on a rows x columns grid
pub struct SurfaceMesh {
    pub label: Option<String>,
    pub style: Style,
    /// grid[i][j] is the vertex for the i-th first and j-th second parameter
    pub grid: Vec<Vec<Point3D>>,
}

impl SurfaceMesh {
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, |row| row.len())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Point3D> {
        self.grid.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Polyline in 3d space
pub struct LinePath3D {
    pub label: Option<String>,
    pub style: Style,
    pub points: Vec<Point3D>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Polyline in geographic coordinates
pub struct GeoPath {
    pub label: Option<String>,
    pub style: Style,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Marker placed at a geographic point
pub struct Marker {
    pub label: Option<String>,
    pub color: RGB,
    pub size: f32,
    pub symbol: Symbol,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Drawable primitive
pub enum Primitive {
    Surface(SurfaceMesh),
    Line3D(LinePath3D),
    GeoLine(GeoPath),
    Marker(Marker),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How the renderer frames the primitives
pub enum View {
    /// Nothing configured, an empty figure
    Blank,
    /// 3d axes
    Space {
        axis_titles: Option<[String; 3]>,
        data_aspect: bool,
    },
    /// World outline drawn with a named projection
    Geo {
        projection: String,
        coastlines: bool,
        land: Option<RGB>,
        ocean: Option<RGB>,
        height: Option<u32>,
    },
    /// Slippy tile map
    Tiles {
        style: String,
        center: GeoPoint,
        zoom: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Declarative scene description handed to the renderer
pub struct Scene {
    pub title: Option<String>,
    pub view: View,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(view: View) -> Self {
        Scene {title: None, view, primitives: vec![]}
    }

    /// Figure with no view and no primitives
    pub fn empty() -> Self {
        Scene::new(View::Blank)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive)
    }

    pub fn is_empty(&self) -> bool {
        self.view == View::Blank && self.primitives.is_empty()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker(m) => Some(m),
            _ => None,
        })
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceMesh> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Surface(s) => Some(s),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Piece of inline formatted text
pub struct TextSegment {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
/// Caption shown under a figure
pub struct Caption {
    pub segments: Vec<TextSegment>,
}

impl Caption {
    pub fn plain(text: impl Into<String>) -> Self {
        Caption {segments: vec![TextSegment {text: text.into(), bold: false}]}
    }

    /// Bold label followed by regular text
    pub fn labelled(label: &str, text: &str) -> Self {
        Caption {segments: vec![
            TextSegment {text: label.to_string(), bold: true},
            TextSegment {text: text.to_string(), bold: false},
        ]}
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// What every widget recomputation yields
pub struct Computation {
    pub scene: Scene,
    pub caption: Caption,
}
