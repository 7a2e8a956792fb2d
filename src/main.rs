use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use orrery::cli::{self, Args};
use orrery::{SimulationDiagnosticsPlugin, SimulationPlugin};

fn main() -> AppExit {
    let args = Args::parse();

    if args.list_scenarios {
        cli::handle_list_scenarios();
        return AppExit::Success;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    let Some(frame_wait) = config.run.frame_duration() else {
        eprintln!("Error: invalid frame rate {}", config.run.frame_rate);
        return AppExit::error();
    };

    let simulation_plugin = match SimulationPlugin::from_config(config) {
        Ok(plugin) => plugin,
        Err(e) => {
            eprintln!("Error: failed to build scenario: {e}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_wait)),
        LogPlugin {
            level: if args.verbose {
                Level::DEBUG
            } else {
                Level::INFO
            },
            ..default()
        },
        simulation_plugin,
        SimulationDiagnosticsPlugin::default(),
    ));

    if args.verbose {
        app.add_plugins(LogDiagnosticsPlugin::default());
    }

    app.run()
}

