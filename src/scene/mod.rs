//! Scene description and the files it is written to.

pub mod types;
pub mod x3d;
pub mod json;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::error::*;
use crate::common::settings::Settings;
use crate::scene::types::*;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scene file format
pub enum SceneFormat {
    X3D,
    Json,
}

impl SceneFormat {
    pub fn parse(value: &str) -> GeoResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "x3d" => Ok(SceneFormat::X3D),
            "json" => Ok(SceneFormat::Json),
            _ => Err(GeoError::input(format!("Unknown scene format: {}", value)))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SceneFormat::X3D => "x3d",
            SceneFormat::Json => "json",
        }
    }
}

pub trait SceneWriter {
    /// Writes the scene and its caption
    fn write(&self, computation: &Computation, out: &mut dyn Write) -> GeoResult<()>;
}

/// Makes the writer for the configured format
pub fn make_writer(settings: &Settings) -> GeoResult<Box<dyn SceneWriter>> {
    let writer: Box<dyn SceneWriter> = match settings.format {
        SceneFormat::X3D => match &settings.x3d_template_file {
            Some(path) => {
                let template = fs::read_to_string(path)
                    .map_err(|err| GeoError::settings(format!("Can't read template {}: {}", path, err)))?;
                Box::new(x3d::X3DWriter::with_template(template))
            }
            None => Box::new(x3d::X3DWriter::default()),
        },
        SceneFormat::Json => Box::new(json::JsonWriter),
    };
    Ok(writer)
}

/// Writes computations to `<output_dir>/<name>.<ext>`
pub struct SceneOutput {
    output_dir: PathBuf,
    format: SceneFormat,
    writer: Box<dyn SceneWriter>,
}

impl SceneOutput {
    pub fn new(settings: &Settings) -> GeoResult<Self> {
        settings.check_output()?;
        Ok(SceneOutput {
            output_dir: Path::new(&settings.output_dir).to_path_buf(),
            format: settings.format,
            writer: make_writer(settings)?,
        })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir.join(name).with_extension(self.format.extension())
    }

    /// Saves the scene file and prints the caption
    pub fn emit(&self, name: &str, computation: &Computation) -> GeoResult<PathBuf> {
        self.emit_to(name, computation, &mut io::stdout().lock())
    }

    /// Saves the scene file and writes the caption line to `console`
    pub fn emit_to(&self, name: &str, computation: &Computation, console: &mut dyn Write) -> GeoResult<PathBuf> {
        let path = self.path_for(name);
        let file = File::create(&path)
            .map_err(|err| GeoError::scene(format!("Can't write to output file {}: {}", path.display(), err)))?;
        let mut buffer = BufWriter::new(file);
        self.writer.write(computation, &mut buffer)?;
        buffer.flush()?;
        tracing::info!(component = name, path = %path.display(), "scene written");

        writeln!(console, "{}", computation.caption)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::common::types::GeoPoint;
    use crate::session::ClickEvent;
    use crate::widgets::Component;
    use crate::widgets::coords::CoordinatePicker;

    #[test]
    fn parse_format() {
        assert_eq!(SceneFormat::parse("X3D").unwrap(), SceneFormat::X3D);
        assert_eq!(SceneFormat::parse("json").unwrap().extension(), "json");
        assert_matches!(SceneFormat::parse("obj"), Err(GeoError::InvalidInput {..}));
    }

    fn output_in(dir: &Path, format: SceneFormat) -> SceneOutput {
        let settings = Settings {
            output_dir: dir.to_string_lossy().into_owned(),
            format,
            ..Settings::default()
        };
        SceneOutput::new(&settings).unwrap()
    }

    #[test]
    fn emit_writes_file_and_caption() {
        let dir = tempfile::tempdir().unwrap();
        let c = CoordinatePicker::compute(Some(ClickEvent::at(GeoPoint {lat: 40.7128, lon: -74.0060})));

        let mut console: Vec<u8> = vec![];
        let path = output_in(dir.path(), SceneFormat::Json).emit_to("coords", &c, &mut console).unwrap();
        assert_eq!(path, dir.path().join("coords.json"));
        assert_eq!(String::from_utf8(console).unwrap(), "Latitude 40.7128, Longitude -74.0060\n");
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["caption"]["segments"][0]["text"], "Latitude 40.7128, Longitude -74.0060");

        let mut console: Vec<u8> = vec![];
        let path = output_in(dir.path(), SceneFormat::X3D).emit_to("coords", &c, &mut console).unwrap();
        assert_eq!(path, dir.path().join("coords.x3d"));
        assert!(fs::read_to_string(&path).unwrap().contains("<Transform"));
    }

    #[test]
    fn missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().join("absent").to_string_lossy().into_owned(),
            ..Settings::default()
        };
        assert_matches!(settings.check_output(), Err(GeoError::Settings {..}));
        assert!(matches!(SceneOutput::new(&settings), Err(GeoError::Settings {..})));
    }

    #[test]
    fn output_paths() {
        let settings = Settings {format: SceneFormat::Json, ..Settings::default()};
        let out = SceneOutput::new(&settings).unwrap();
        assert_eq!(out.path_for("scale"), Path::new("./scale.json"));
    }
}
