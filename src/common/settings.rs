use std::fs::read_to_string;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

use crate::common::args::*;
use crate::common::error::*;
use crate::common::util::*;
use crate::scene::SceneFormat;


pub const DEFAULT_SETTINGS_FILE: &str = "./settings.yaml";
const DEFAULT_OUTPUT_DIR: &str = "./";
const DEFAULT_LOG_LEVEL: &str = "info";


/// Reads the settings file
fn read_settings_file(filepath: &str) -> GeoResult<String> {
    read_to_string(filepath)
        .map_err(|err| GeoError::settings(format!("Can't read settings file {}: {}", filepath, err)))
}

/// Loads the settings document.
///
/// A missing file is only an error when it was named explicitly; otherwise
/// every setting takes its default.
pub fn get_settings_yaml(filepath: Option<&str>) -> GeoResult<Yaml> {
    let path = match filepath {
        Some(p) => p,
        None if Path::new(DEFAULT_SETTINGS_FILE).exists() => DEFAULT_SETTINGS_FILE,
        None => return Ok(Yaml::BadValue),
    };
    let s = read_settings_file(path)?;
    let docs = YamlLoader::load_from_str(&s)
        .map_err(|err| GeoError::settings(format!("Can't parse {}: {}", path, err)))?;
    Ok(docs.into_iter().next().unwrap_or(Yaml::BadValue))
}

/// Main settings structure
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// where scene files go
    pub output_dir: String,
    /// scene file format
    pub format: SceneFormat,
    /// X3D template with a <_Scene/> placeholder
    pub x3d_template_file: Option<String>,
    /// log filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            format: SceneFormat::X3D,
            x3d_template_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Merges command line values over the settings document over defaults
    pub fn make_settings(tl_commands: &TopLevelCommands, settings: &Yaml) -> GeoResult<Self> {
        let output = &settings["Output"];

        let output_dir = tl_commands.output_dir.clone()
            .or_else(|| get_string(output, "dir"))
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let format = match tl_commands.format {
            Some(f) => f,
            None => match get_string(output, "format") {
                Some(s) => SceneFormat::parse(&s)
                    .map_err(|err| GeoError::settings(format!("invalid 'format' parameter in the settings file: {}", err)))?,
                None => SceneFormat::X3D,
            }
        };

        let x3d_template_file = get_string(&settings["Scene"]["X3D"], "template_file");
        if let Some(f) = &x3d_template_file {
            check_file(f)?;
        }

        let log_level = get_string(&settings["Logging"], "level")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Settings {output_dir, format, x3d_template_file, log_level})
    }

    /// Output directory must exist before anything is written
    pub fn check_output(&self) -> GeoResult<()> {
        check_dir(&self.output_dir)
    }
}

// Returns a string parameter, None when the key is missing
fn get_string(section: &Yaml, parameter: &str) -> Option<String> {
    if section[parameter].is_badvalue() {
        None
    } else {
        section[parameter].as_str().map(String::from)
    }
}
