//! Font loading and camera setup.

use crate::constants::FONT_PATH;
use crate::error::{GameError, GameResult};
use bevy::app::AppExit;
use bevy::prelude::*;

/// Game font resource — stores the loaded UI font handle.
///
/// All UI text (telemetry readout, menus, tuning panel) references
/// `font.0.clone()` instead of the default Bevy font. Created by
/// [`load_game_font`] at startup.
#[derive(Resource, Default)]
pub struct GameFont(pub Handle<Font>);

/// Read the font file from disk and validate it before handing it to Bevy.
///
/// `ttf-parser` rejects truncated or non-font files up front, so a bad asset
/// fails here with a real parser message rather than surfacing later as
/// blank text.
fn read_font(path: &str) -> GameResult<Font> {
    let bytes = std::fs::read(path).map_err(|e| GameError::FontLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    ttf_parser::Face::parse(&bytes, 0).map_err(|e| GameError::FontLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Font::try_from_bytes(bytes).map_err(|e| GameError::FontLoad {
        path: path.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Load the UI font synchronously at startup.
///
/// Failure is **fatal**: without the font no menu or readout can render, so
/// the game logs the error and exits before the frame loop starts.
///
/// Must run before any UI setup systems that spawn text.
pub fn load_game_font(
    mut font: ResMut<GameFont>,
    mut fonts: ResMut<Assets<Font>>,
    mut exit: MessageWriter<AppExit>,
) {
    match read_font(FONT_PATH) {
        Ok(loaded) => {
            font.0 = fonts.add(loaded);
            println!("✓ Loaded UI font from {FONT_PATH}");
        }
        Err(e) => {
            eprintln!("✗ {e}");
            exit.write(AppExit::error());
        }
    }
}

/// Setup camera for 2D rendering.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}
