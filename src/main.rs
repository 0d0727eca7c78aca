//! # geoconcepts tool
//!
//! Renders the geography dashboard figures (for web viewers or 3d tools).
//! One subcommand per figure, or an interactive session on stdin.

use std::io;
use std::process::ExitCode;

use geoconcepts::common::args::*;
use geoconcepts::common::args::MySubCommandEnum::*;
use geoconcepts::common::error::*;
use geoconcepts::common::logging::init_logging;
use geoconcepts::common::settings::*;
use geoconcepts::dashboard::*;
use geoconcepts::scene::SceneOutput;
use geoconcepts::session::*;
use geoconcepts::widgets::Component;
use geoconcepts::widgets::coords::CoordinatePicker;
use geoconcepts::widgets::geoid::GeoidComparison;
use geoconcepts::widgets::grid::CoordinateGrid;
use geoconcepts::widgets::projection::ProjectionSelector;
use geoconcepts::widgets::scale::ScaleExplorer;
use geoconcepts::widgets::timezone::*;


/// Renders whatever the subcommand asks for
fn materialize(tl_commands: &TopLevelCommands, settings: &Settings) -> GeoResult<()> {
    if let SubCommandLayout(_) = &tl_commands.inner_enum {
        let widgets = layout(&Controls::new(Some(current_utc_hour())));
        println!("{}", serde_json::to_string_pretty(&widgets)?);
        return Ok(())
    }

    let output = SceneOutput::new(settings)?;
    match &tl_commands.inner_enum {
        SubCommandGeoid(_) => {
            let (name, computation) = GeoidComparison::recompute(());
            output.emit(name, &computation)?;
        }
        SubCommandGrid(_) => {
            let (name, computation) = CoordinateGrid::recompute(());
            output.emit(name, &computation)?;
        }
        SubCommandProjection(args) => {
            let (name, computation) = ProjectionSelector::recompute(args.key.clone());
            output.emit(name, &computation)?;
        }
        SubCommandScale(args) => {
            let mut store = SessionStore::new();
            let mut dashboard = Dashboard::open(&mut store, Controls {zoom: args.zoom, ..Controls::new(None)});
            if let Some(p) = args.click {
                dashboard.handle(Interaction::ScaleClick(Some(ClickEvent::at(p))));
            }
            if let Some((name, computation)) = dashboard.handle(Interaction::SetZoom(args.zoom)) {
                output.emit(name, &computation)?;
            }
            dashboard.close();
        }
        SubCommandCoords(args) => {
            let click = args.click.map(ClickEvent::at);
            let (name, computation) = CoordinatePicker::recompute(click);
            output.emit(name, &computation)?;
        }
        SubCommandTimeZone(args) => {
            let input = TimeZoneInput {base_hour: args.hour, base: args.base, target: args.target};
            let (name, computation) = TimeZoneCalculator::recompute(input);
            output.emit(name, &computation)?;
        }
        SubCommandSession(_) => {
            let mut store = SessionStore::new();
            let mut dashboard = Dashboard::open(&mut store, Controls::new(Some(current_utc_hour())));
            tracing::info!(session = %dashboard.session(), "reading interactions from stdin");
            let result = dashboard.run(io::stdin().lock(), |name, computation| {
                output.emit(name, computation).map(|_| ())
            });
            dashboard.close();
            let redraws = result?;
            tracing::info!(redraws, "session ended");
        }
        SubCommandLayout(_) => (),
    }
    Ok(())
}

fn main() -> ExitCode {
    let tl_commands: TopLevelCommands = argh::from_env();

    let settings = get_settings_yaml(tl_commands.settings.as_deref())
        .and_then(|yaml| Settings::make_settings(&tl_commands, &yaml));
    let settings = match settings {
        Ok(s) => s,
        Err(err) => {
            init_logging("info");
            tracing::error!("{err}");
            return ExitCode::FAILURE
        }
    };
    init_logging(&settings.log_level);

    match materialize(&tl_commands, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
