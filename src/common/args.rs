use argh::FromArgs;

use crate::common::types::*;
use crate::common::util::parse_geopoint;
use crate::scene::SceneFormat;
use crate::widgets::projection::ProjectionChoice;


/// Get scene format identificator depending on specific command argument
fn get_scene_format(value: &str) -> Result<SceneFormat, String> {
    SceneFormat::parse(value).map_err(|err| err.to_string())
}

fn parse_zoom(value: &str) -> Result<ZoomLevel, String> {
    let z = value.parse::<u8>().map_err(|_| format!("Invalid zoom level: {}", value))?;
    ZoomLevel::new(z).map_err(|err| err.to_string())
}

fn parse_offset(value: &str) -> Result<TimeZoneOffset, String> {
    let h = value.parse::<i8>().map_err(|_| format!("Invalid UTC offset: {}", value))?;
    TimeZoneOffset::new(h).map_err(|err| err.to_string())
}

fn parse_hour(value: &str) -> Result<Hour, String> {
    match value.parse::<Hour>() {
        Ok(h) if h < 24 => Ok(h),
        _ => Err(format!("Invalid hour (0..23): {}", value)),
    }
}

fn parse_click(value: &str) -> Result<GeoPoint, String> {
    parse_geopoint(value).map_err(|err| err.to_string())
}

fn default_projection_key() -> String {
    ProjectionChoice::default().key().to_string()
}

fn default_target_offset() -> TimeZoneOffset {
    TimeZoneOffset::new(-6).unwrap_or(TimeZoneOffset::UTC)
}

/// Top-level commands
#[derive(FromArgs, PartialEq, Debug)]
pub struct TopLevelCommands {
    /// settings file (default: ./settings.yaml when present)
    #[argh(option)]
    pub settings: Option<String>,

    /// scene file format (x3d or json)
    #[argh(option, from_str_fn(get_scene_format))]
    pub format: Option<SceneFormat>,

    /// output path (default: current directory)
    #[argh(option)]
    pub output_dir: Option<String>,

    #[argh(subcommand)]
    pub inner_enum: MySubCommandEnum,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum MySubCommandEnum {
    SubCommandGeoid(CLIArgsGeoid),
    SubCommandGrid(CLIArgsGrid),
    SubCommandProjection(CLIArgsProjection),
    SubCommandScale(CLIArgsScale),
    SubCommandCoords(CLIArgsCoords),
    SubCommandTimeZone(CLIArgsTimeZone),
    SubCommandSession(CLIArgsSession),
    SubCommandLayout(CLIArgsLayout),
}

/// Sphere compared with an exaggerated geoid
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "geoid")]
pub struct CLIArgsGeoid {}

/// Unit sphere with parallels and meridians
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "grid")]
pub struct CLIArgsGrid {}

/// World outline under a map projection
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "projection")]
pub struct CLIArgsProjection {
    /// projection identifier (cylindrical stereographic, conic conformal, azimuthal equidistant)
    #[argh(option, default = "default_projection_key()")]
    pub key: String,
}

/// Map view at a zoom level with its scale category
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "scale")]
pub struct CLIArgsScale {
    /// zoom level 0..15 (default: 4)
    #[argh(option, from_str_fn(parse_zoom), default = "ZoomLevel::default()")]
    pub zoom: ZoomLevel,

    /// clicked point as 'lat,lon'
    #[argh(option, from_str_fn(parse_click))]
    pub click: Option<GeoPoint>,
}

/// Latitude and longitude of a clicked point
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "coords")]
pub struct CLIArgsCoords {
    /// clicked point as 'lat,lon'
    #[argh(option, from_str_fn(parse_click))]
    pub click: Option<GeoPoint>,
}

/// Hour conversion between two UTC offsets
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "timezone")]
pub struct CLIArgsTimeZone {
    /// reference hour 0..23
    #[argh(option, from_str_fn(parse_hour))]
    pub hour: Option<Hour>,

    /// reference UTC offset -12..14 (default: 0)
    #[argh(option, from_str_fn(parse_offset), default = "TimeZoneOffset::UTC")]
    pub base: TimeZoneOffset,

    /// target UTC offset -12..14 (default: -6)
    #[argh(option, from_str_fn(parse_offset), default = "default_target_offset()")]
    pub target: TimeZoneOffset,
}

/// Interactive session reading one interaction per line from stdin
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "session")]
pub struct CLIArgsSession {}

/// Print the widget description as JSON
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "layout")]
pub struct CLIArgsLayout {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::common::args::MySubCommandEnum::*;

    fn parse(args: &[&str]) -> Result<TopLevelCommands, argh::EarlyExit> {
        TopLevelCommands::from_args(&["geoconcepts"], args)
    }

    #[test]
    fn timezone_defaults() {
        let tl = parse(&["timezone"]).unwrap();
        assert_matches!(tl.inner_enum, SubCommandTimeZone(CLIArgsTimeZone {hour: None, base, target})
            if base.hours() == 0 && target.hours() == -6);
    }

    #[test]
    fn timezone_values() {
        let tl = parse(&["timezone", "--hour", "23", "--base", "-5", "--target", "9"]).unwrap();
        assert_matches!(tl.inner_enum, SubCommandTimeZone(CLIArgsTimeZone {hour: Some(23), base, target})
            if base.hours() == -5 && target.hours() == 9);
        assert!(parse(&["timezone", "--hour", "24"]).is_err());
        assert!(parse(&["timezone", "--base", "15"]).is_err());
    }

    #[test]
    fn scale_values() {
        let tl = parse(&["--format", "json", "scale", "--zoom", "11", "--click", "40.7128,-74.0060"]).unwrap();
        assert_eq!(tl.format, Some(SceneFormat::Json));
        assert_matches!(tl.inner_enum, SubCommandScale(CLIArgsScale {zoom, click: Some(p)})
            if zoom.get() == 11 && p == (GeoPoint {lat: 40.7128, lon: -74.0060}));
        assert!(parse(&["scale", "--zoom", "16"]).is_err());
    }

    #[test]
    fn projection_default() {
        let tl = parse(&["projection"]).unwrap();
        assert_matches!(tl.inner_enum, SubCommandProjection(CLIArgsProjection {ref key})
            if key == "cylindrical stereographic");
    }
}
