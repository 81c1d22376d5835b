use bevy::prelude::*;
use bevy::window::WindowResolution;

use driftfire::attack::{setup_projectile_spawner, AttackPlugin};
use driftfire::config::{load_tuning_config, TuningConfig};
use driftfire::constants::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use driftfire::debug_panel::{setup_debug_overlay, DebugOverlayPlugin};
use driftfire::graphics::{load_game_font, setup_camera, GameFont};
use driftfire::input::ControlState;
use driftfire::menu::PauseMenuPlugin;
use driftfire::player::{spawn_player, FlightPlugin};
use driftfire::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert TuningConfig with compiled defaults; load_tuning_config will
        // overwrite it from assets/tuning.toml (if present) in the Startup
        // schedule.
        .insert_resource(TuningConfig::default())
        .init_resource::<ControlState>()
        .init_resource::<GameFont>()
        // SimulationPlugin first: it owns the chained frame order the other
        // plugins register their systems into. PauseMenuPlugin next: it
        // registers GameMode before anything runs under in_state(...).
        .add_plugins(SimulationPlugin)
        .add_plugins(PauseMenuPlugin)
        .add_plugins(FlightPlugin)
        .add_plugins(AttackPlugin)
        .add_plugins(DebugOverlayPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                load_tuning_config,
                load_game_font.after(load_tuning_config),
                setup_camera,
                spawn_player.after(load_tuning_config),
                setup_projectile_spawner.after(load_tuning_config),
                setup_debug_overlay
                    .after(load_tuning_config)
                    .after(load_game_font),
            ),
        )
        .run();
}
