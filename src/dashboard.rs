//! Widget description and the interactive event loop.
//!
//! The loop stands in for the UI layer: it owns the widget values, turns each
//! interaction into exactly one recomputation and hands the result to a sink.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::time::{SystemTime, UNIX_EPOCH};
use regex::Regex;
use serde::Serialize;

use crate::common::error::*;
use crate::common::types::*;
use crate::common::util::parse_geopoint;
use crate::scene::types::*;
use crate::session::*;
use crate::widgets::Component;
use crate::widgets::coords::CoordinatePicker;
use crate::widgets::geoid::GeoidComparison;
use crate::widgets::grid::CoordinateGrid;
use crate::widgets::projection::*;
use crate::widgets::scale::ScaleExplorer;
use crate::widgets::timezone::*;


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Declarative input widget
pub enum Widget {
    RadioItems {
        id: String,
        options: Vec<RadioOption>,
        value: String,
    },
    Slider {
        id: String,
        label: String,
        min: i32,
        max: i32,
        step: i32,
        value: i32,
        marks: BTreeMap<i32, String>,
    },
    NumberInput {
        id: String,
        label: String,
        min: i32,
        max: i32,
        step: i32,
        value: Option<i32>,
    },
}

/// Current hour of the day in UTC
pub fn current_utc_hour() -> Hour {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ((secs / 3600) % 24) as Hour
}

fn offset_marks() -> BTreeMap<i32, String> {
    (MIN_OFFSET as i32..=MAX_OFFSET as i32).step_by(2).map(|i| (i, i.to_string())).collect()
}

/// Input widgets of every component, with their initial values
pub fn layout(controls: &Controls) -> Vec<Widget> {
    vec![
        Widget::RadioItems {
            id: "projection-selector".to_string(),
            options: ProjectionChoice::ALL.iter()
                .map(|c| RadioOption {label: c.label().to_string(), value: c.key().to_string()})
                .collect(),
            value: controls.projection.clone(),
        },
        Widget::Slider {
            id: "map-scale-slider".to_string(),
            label: "Zoom Level (Simulates Scale):".to_string(),
            min: MIN_ZOOM as i32,
            max: MAX_ZOOM as i32,
            step: 1,
            value: controls.zoom.get() as i32,
            marks: BTreeMap::from([
                (0, "Global".to_string()),
                (5, "Continental".to_string()),
                (10, "National".to_string()),
                (15, "Local".to_string()),
            ]),
        },
        Widget::NumberInput {
            id: "base-time-input".to_string(),
            label: "Reference Hour (24h):".to_string(),
            min: 0,
            max: 23,
            step: 1,
            value: controls.base_hour.map(|h| h as i32),
        },
        Widget::Slider {
            id: "base-timezone-slider".to_string(),
            label: "Reference Time Zone (UTC):".to_string(),
            min: MIN_OFFSET as i32,
            max: MAX_OFFSET as i32,
            step: 1,
            value: controls.base.hours() as i32,
            marks: offset_marks(),
        },
        Widget::Slider {
            id: "target-timezone-slider".to_string(),
            label: "Target Time Zone (UTC):".to_string(),
            min: MIN_OFFSET as i32,
            max: MAX_OFFSET as i32,
            step: 1,
            value: controls.target.hours() as i32,
            marks: offset_marks(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
/// Widget values held by the UI layer
pub struct Controls {
    pub projection: String,
    pub zoom: ZoomLevel,
    pub base_hour: Option<Hour>,
    pub base: TimeZoneOffset,
    pub target: TimeZoneOffset,
}

impl Controls {
    pub fn new(base_hour: Option<Hour>) -> Self {
        Controls {
            projection: ProjectionChoice::default().key().to_string(),
            zoom: ZoomLevel::default(),
            base_hour,
            base: TimeZoneOffset::UTC,
            target: TimeZoneOffset::new(-6).unwrap_or(TimeZoneOffset::UTC),
        }
    }

    fn timezone_input(&self) -> TimeZoneInput {
        TimeZoneInput {base_hour: self.base_hour, base: self.base, target: self.target}
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One user action, changing exactly one input
pub enum Interaction {
    ShowGeoid,
    ShowGrid,
    SelectProjection(String),
    SetZoom(ZoomLevel),
    ScaleClick(Option<ClickEvent>),
    CoordinateClick(Option<ClickEvent>),
    SetHour(Option<Hour>),
    SetBaseOffset(TimeZoneOffset),
    SetTargetOffset(TimeZoneOffset),
    Quit,
}

fn click_payload(value: Option<&str>) -> GeoResult<Option<ClickEvent>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(ClickEvent::at(parse_geopoint(v)?))),
        None => Ok(None),
    }
}

fn parse_offset(value: &str) -> GeoResult<TimeZoneOffset> {
    let h = value.parse::<i8>().map_err(|_| GeoError::input(format!("Invalid UTC offset: {}", value)))?;
    TimeZoneOffset::new(h)
}

/// Parses one line of the session input
pub fn parse_interaction(line: &str) -> GeoResult<Interaction> {
    let re = Regex::new(r"^\s*([a-z-]+)(?:\s+(.*?))?\s*$")
        .map_err(|err| GeoError::input(err.to_string()))?;
    let caps = re.captures(line)
        .ok_or_else(|| GeoError::input(format!("Can't parse interaction: '{}'", line.trim())))?;
    let arg = caps.get(2).map(|m| m.as_str());
    let required = || arg.ok_or_else(|| GeoError::input(format!("'{}' needs a value", &caps[1])));

    match &caps[1] {
        "geoid" => Ok(Interaction::ShowGeoid),
        "grid" => Ok(Interaction::ShowGrid),
        "projection" => Ok(Interaction::SelectProjection(required()?.to_string())),
        "zoom" => {
            let v = required()?;
            let z = v.parse::<u8>().map_err(|_| GeoError::input(format!("Invalid zoom level: {}", v)))?;
            Ok(Interaction::SetZoom(ZoomLevel::new(z)?))
        }
        "scale-click" => Ok(Interaction::ScaleClick(click_payload(arg)?)),
        "coord-click" => Ok(Interaction::CoordinateClick(click_payload(arg)?)),
        "hour" => match required()? {
            "-" => Ok(Interaction::SetHour(None)),
            v => match v.parse::<Hour>() {
                Ok(h) if h < 24 => Ok(Interaction::SetHour(Some(h))),
                _ => Err(GeoError::input(format!("Invalid hour (0..23): {}", v))),
            },
        },
        "base-tz" => Ok(Interaction::SetBaseOffset(parse_offset(required()?)?)),
        "target-tz" => Ok(Interaction::SetTargetOffset(parse_offset(required()?)?)),
        "quit" => Ok(Interaction::Quit),
        other => Err(GeoError::input(format!("Unknown interaction: {}", other))),
    }
}

/// One user's dashboard, bound to a session in the store
pub struct Dashboard<'s> {
    store: &'s mut SessionStore,
    session: SessionId,
    pub controls: Controls,
}

impl<'s> Dashboard<'s> {
    /// Opens a session for this dashboard
    pub fn open(store: &'s mut SessionStore, controls: Controls) -> Self {
        let session = store.open();
        Dashboard {store, session, controls}
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    fn context(&mut self) -> &mut SessionContext {
        self.store.context_mut(self.session)
    }

    /// Applies an interaction and recomputes the component it feeds.
    ///
    /// Returns None when nothing needs to be redrawn.
    pub fn handle(&mut self, interaction: Interaction) -> Option<(&'static str, Computation)> {
        match interaction {
            Interaction::ShowGeoid => Some(GeoidComparison::recompute(())),
            Interaction::ShowGrid => Some(CoordinateGrid::recompute(())),
            Interaction::SelectProjection(key) => {
                self.controls.projection = key.clone();
                Some(ProjectionSelector::recompute(key))
            }
            Interaction::SetZoom(zoom) => {
                self.controls.zoom = zoom;
                let ctx = self.context();
                Some((ScaleExplorer::NAME, ScaleExplorer::compute_for(ctx, zoom)))
            }
            Interaction::ScaleClick(click) => {
                let zoom = self.controls.zoom;
                let ctx = self.context();
                match ScaleExplorer::capture_click(ctx, click.as_ref()) {
                    StateUpdate::Replace(_) => Some((ScaleExplorer::NAME, ScaleExplorer::compute_for(ctx, zoom))),
                    StateUpdate::Retain => None,
                }
            }
            Interaction::CoordinateClick(click) => Some(CoordinatePicker::recompute(click)),
            Interaction::SetHour(hour) => {
                self.controls.base_hour = hour;
                Some(TimeZoneCalculator::recompute(self.controls.timezone_input()))
            }
            Interaction::SetBaseOffset(offset) => {
                self.controls.base = offset;
                Some(TimeZoneCalculator::recompute(self.controls.timezone_input()))
            }
            Interaction::SetTargetOffset(offset) => {
                self.controls.target = offset;
                Some(TimeZoneCalculator::recompute(self.controls.timezone_input()))
            }
            Interaction::Quit => None,
        }
    }

    /// Handles interactions line by line until `quit` or end of input.
    ///
    /// Bad lines, including ones that are not UTF-8, are logged and skipped;
    /// only read and sink errors stop the loop.
    pub fn run<R, F>(&mut self, mut input: R, mut sink: F) -> GeoResult<usize>
    where
        R: BufRead,
        F: FnMut(&str, &Computation) -> GeoResult<()>,
    {
        let mut redraws = 0;
        let mut buf: Vec<u8> = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(s) => s,
                Err(err) => {
                    tracing::warn!(%err, "skipping line that is not valid UTF-8");
                    continue;
                }
            };
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let interaction = match parse_interaction(line) {
                Ok(i) => i,
                Err(err) => {
                    tracing::warn!(%err, "skipping interaction");
                    continue;
                }
            };
            if interaction == Interaction::Quit {
                break;
            }
            tracing::debug!(session = %self.session, ?interaction, "interaction");
            if let Some((name, computation)) = self.handle(interaction) {
                sink(name, &computation)?;
                redraws += 1;
            }
        }
        Ok(redraws)
    }

    /// Ends the session, dropping its state
    pub fn close(self) {
        self.store.close(self.session);
    }
}
