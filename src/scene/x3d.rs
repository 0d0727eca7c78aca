use std::io::Write;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::common::color::*;
use crate::common::error::*;
use crate::common::types::*;
use crate::common::util::calc_point3d;
use crate::scene::SceneWriter;
use crate::scene::types::*;


const PLACEHOLDER: &[u8] = b"_Scene";
const DEFAULT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<X3D profile="Immersive" version="3.3">
<head>
<meta name="generator" content="geoconcepts"/>
</head>
<Scene>
<Background skyColor="1 1 1"/>
<_Scene/>
</Scene>
</X3D>
"#;
/// Radius of the globe geographic primitives are drawn on
const GLOBE_RADIUS: Coord = 1.0;
/// Markers float slightly above the globe surface
const MARKER_LIFT: Coord = 1.01;
const MARKER_SCALE: f64 = 0.004;
/// Interpolation steps between consecutive points of a geographic path
const PATH_STEPS: usize = 32;
/// X3D LineProperties linetype codes
const LINETYPE_SOLID: &str = "1";
const LINETYPE_DOTTED: &str = "3";


/// Fills an X3D template's `<_Scene/>` placeholder with the scene nodes
pub struct X3DWriter {
    template: String,
}

impl Default for X3DWriter {
    fn default() -> Self {
        X3DWriter {template: DEFAULT_TEMPLATE.to_string()}
    }
}

fn fmt_coord(v: Coord) -> String {
    let s = format!("{:.5}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn fmt_points<'p>(points: impl Iterator<Item = &'p Point3D>) -> String {
    points
        .map(|[x, y, z]| format!("{} {} {}", fmt_coord(*x), fmt_coord(*y), fmt_coord(*z)))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Quad faces over a rows x columns vertex grid
pub fn grid_face_indices(rows: usize, columns: usize) -> Vec<[usize; 4]> {
    let mut faces = Vec::with_capacity(rows.saturating_sub(1)*columns.saturating_sub(1));
    for i in 0..rows.saturating_sub(1) {
        for j in 0..columns.saturating_sub(1) {
            let k = i*columns + j;
            faces.push([k, k + columns, k + columns + 1, k + 1]);
        }
    }
    faces
}

/// Lays a geographic polyline onto the globe, following the lat/lon grid between points
pub fn densify(points: &[GeoPoint], steps: usize, radius: Coord) -> Vec<Point3D> {
    let to3d = |lat: Coord, lon: Coord| {
        let (x, y, z) = calc_point3d(radius, lon, lat);
        [x, y, z]
    };
    let mut out = Vec::with_capacity(points.len()*steps + 1);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        for s in 0..steps {
            let t = s as Coord / steps as Coord;
            out.push(to3d(a.lat + (b.lat - a.lat)*t, a.lon + (b.lon - a.lon)*t));
        }
    }
    if let Some(last) = points.last() {
        out.push(to3d(last.lat, last.lon));
    }
    out
}

/// Viewpoint orientation (axis, angle) that looks from `position` at the origin
fn look_at_origin(position: Point3D) -> ([Coord; 3], Coord) {
    let [x, y, z] = position;
    let len = (x*x + y*y + z*z).sqrt();
    if len == 0.0 {
        return ([0.0, 0.0, 1.0], 0.0)
    }
    let (dx, dy, dz) = (-x/len, -y/len, -z/len);
    // default view direction is -Z
    let axis = [dy, -dx, 0.0];
    let axis_len = (dy*dy + dx*dx).sqrt();
    let angle = (-dz).clamp(-1.0, 1.0).acos();
    if axis_len < 1e-12 {
        ([1.0, 0.0, 0.0], angle)
    } else {
        ([axis[0]/axis_len, axis[1]/axis_len, 0.0], angle)
    }
}

fn mf_string(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('"', "'")))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Thin wrapper turning quick-xml errors into GeoError
struct Nodes<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> Nodes<W> {
    fn event(&mut self, e: Event<'_>) -> GeoResult<()> {
        self.writer.write_event(e).map_err(|err| GeoError::scene(err.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> GeoResult<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.event(Event::Start(elem))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> GeoResult<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.event(Event::Empty(elem))
    }

    fn end(&mut self, name: &str) -> GeoResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn appearance(&mut self, color: RGB, transparency: f32, emissive: bool) -> GeoResult<()> {
        let color = color.to_string();
        let transparency = fmt_coord(transparency as Coord);
        self.start("Appearance", &[])?;
        if emissive {
            self.empty("Material", &[("emissiveColor", &color), ("diffuseColor", "0 0 0")])?;
        } else {
            self.empty("Material", &[("diffuseColor", &color), ("transparency", &transparency)])?;
        }
        Ok(())
    }

    fn world_info(&mut self, scene: &Scene, caption: &Caption) -> GeoResult<()> {
        let mut info: Vec<String> = vec![];
        match &scene.view {
            View::Blank => info.push("view: blank".to_string()),
            View::Space {axis_titles, data_aspect} => {
                info.push("view: space".to_string());
                if let Some(titles) = axis_titles {
                    info.push(format!("axes: {}", titles.join(", ")));
                }
                info.push(format!("aspect: {}", if *data_aspect {"data"} else {"auto"}));
            }
            View::Geo {projection, coastlines, land, ocean, height} => {
                info.push("view: geo".to_string());
                info.push(format!("projection: {}", projection));
                info.push(format!("coastlines: {}", coastlines));
                if let Some(c) = land {info.push(format!("land: {}", c.to_hex()))}
                if let Some(c) = ocean {info.push(format!("ocean: {}", c.to_hex()))}
                if let Some(h) = height {info.push(format!("height: {}", h))}
            }
            View::Tiles {style, center, zoom} => {
                info.push("view: tiles".to_string());
                info.push(format!("style: {}", style));
                info.push(format!("center: {} {}", center.lat, center.lon));
                info.push(format!("zoom: {}", zoom));
            }
        }
        info.push(format!("caption: {}", caption));

        let title = scene.title.clone().unwrap_or_default();
        self.empty("WorldInfo", &[("title", &title), ("info", &mf_string(&info))])
    }

    fn view(&mut self, view: &View) -> GeoResult<()> {
        match view {
            View::Geo {ocean, ..} => {
                // reference globe the geographic primitives sit on
                self.start("Shape", &[])?;
                self.appearance(ocean.unwrap_or(LIGHT_BLUE), 0.2, false)?;
                self.end("Appearance")?;
                self.empty("Sphere", &[("radius", &fmt_coord(GLOBE_RADIUS*0.995))])?;
                self.end("Shape")
            }
            View::Tiles {center, zoom, ..} => {
                let distance = GLOBE_RADIUS + 4.0/(1.0 + *zoom as Coord);
                let (x, y, z) = calc_point3d(distance, center.lon, center.lat);
                let ([ax, ay, az], angle) = look_at_origin([x, y, z]);
                self.empty("Viewpoint", &[
                    ("description", &format!("{} zoom {}", center, zoom)),
                    ("position", &fmt_points([[x, y, z]].iter())),
                    ("orientation", &format!("{} {} {} {}", fmt_coord(ax), fmt_coord(ay), fmt_coord(az), fmt_coord(angle))),
                ])?;
                self.start("Shape", &[])?;
                self.appearance(LIGHT_GRAY, 0.0, false)?;
                self.end("Appearance")?;
                self.empty("Sphere", &[("radius", &fmt_coord(GLOBE_RADIUS*0.995))])?;
                self.end("Shape")
            }
            View::Space {..} | View::Blank => Ok(()),
        }
    }

    fn surface(&mut self, mesh: &SurfaceMesh) -> GeoResult<()> {
        let coord_index = grid_face_indices(mesh.rows(), mesh.columns())
            .iter()
            .map(|[a, b, c, d]| format!("{} {} {} {} -1", a, b, c, d))
            .collect::<Vec<String>>()
            .join(" ");
        self.start("Shape", &[])?;
        self.appearance(mesh.style.color, 1.0 - mesh.style.opacity, false)?;
        self.end("Appearance")?;
        self.start("IndexedFaceSet", &[("solid", "false"), ("coordIndex", &coord_index)])?;
        self.empty("Coordinate", &[("point", &fmt_points(mesh.vertices()))])?;
        self.end("IndexedFaceSet")?;
        self.end("Shape")
    }

    fn polyline(&mut self, style: &Style, points: &[Point3D]) -> GeoResult<()> {
        let mut coord_index = (0..points.len()).map(|i| i.to_string()).collect::<Vec<String>>();
        coord_index.push("-1".to_string());
        let linetype = match style.dash {
            Dash::Solid => LINETYPE_SOLID,
            Dash::Dot => LINETYPE_DOTTED,
        };
        self.start("Shape", &[])?;
        self.appearance(style.color, 0.0, true)?;
        self.empty("LineProperties", &[
            ("linetype", linetype),
            ("linewidthScaleFactor", &fmt_coord(style.width as Coord)),
        ])?;
        self.end("Appearance")?;
        self.start("IndexedLineSet", &[("coordIndex", &coord_index.join(" "))])?;
        self.empty("Coordinate", &[("point", &fmt_points(points.iter()))])?;
        self.end("IndexedLineSet")?;
        self.end("Shape")
    }

    fn marker(&mut self, marker: &Marker) -> GeoResult<()> {
        let (x, y, z) = calc_point3d(MARKER_LIFT, marker.position.lon, marker.position.lat);
        let size = marker.size as f64 * MARKER_SCALE;
        self.start("Transform", &[("translation", &fmt_points([[x, y, z]].iter()))])?;
        self.start("Shape", &[])?;
        self.appearance(marker.color, 0.0, false)?;
        self.end("Appearance")?;
        match marker.symbol {
            Symbol::Circle => self.empty("Sphere", &[("radius", &fmt_coord(size))])?,
            Symbol::Star => self.empty("Cone", &[
                ("bottomRadius", &fmt_coord(size)),
                ("height", &fmt_coord(2.0*size)),
            ])?,
        }
        self.end("Shape")?;
        self.end("Transform")
    }

    fn scene(&mut self, computation: &Computation) -> GeoResult<()> {
        let scene = &computation.scene;
        self.world_info(scene, &computation.caption)?;
        self.view(&scene.view)?;
        for primitive in &scene.primitives {
            match primitive {
                Primitive::Surface(mesh) => self.surface(mesh)?,
                Primitive::Line3D(line) => self.polyline(&line.style, &line.points)?,
                Primitive::GeoLine(path) =>
                    self.polyline(&path.style, &densify(&path.points, PATH_STEPS, GLOBE_RADIUS))?,
                Primitive::Marker(marker) => self.marker(marker)?,
            }
        }
        Ok(())
    }
}

impl X3DWriter {
    pub fn with_template(template: String) -> Self {
        X3DWriter {template}
    }
}

impl SceneWriter for X3DWriter {
    fn write(&self, computation: &Computation, out: &mut dyn Write) -> GeoResult<()> {
        let mut reader = Reader::from_str(&self.template);
        reader.config_mut().check_comments = true;

        let mut nodes = Nodes {writer: Writer::new(out)};
        let mut filled = false;
        loop {
            match reader.read_event() {
                Err(e) => return Err(GeoError::scene(
                    format!("Template error at position {}: {:?}", reader.error_position(), e))),
                Ok(Event::Eof) => break,
                Ok(Event::Empty(e)) if e.name().as_ref() == PLACEHOLDER => {
                    nodes.scene(computation)?;
                    filled = true;
                }
                Ok(e) => nodes.event(e)?,
            }
        }

        if filled {
            Ok(())
        } else {
            Err(GeoError::scene("X3D template has no <_Scene/> placeholder"))
        }
    }
}
