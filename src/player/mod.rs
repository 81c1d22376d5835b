//! Player module: ship entity, kinematics, movement systems, and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | [`KinematicBody`] integrator component, [`Player`] marker, [`RotationDelta`] resource |
//! | [`control`] | Rotation and thrust systems over [`KinematicBody`] |
//! | [`rendering`] | Ship triangle mesh, screen→world transform mirror |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{movement_system, rotation_speed, rotation_system};
pub use rendering::{attach_ship_mesh_system, sync_body_transform_system};
pub use state::{KinematicBody, Player, RotationDelta};

use crate::config::TuningConfig;
use crate::constants::{INITIAL_HEADING_DEG, PLAYER_SPAWN_X, PLAYER_SPAWN_Y};
use crate::menu::GameMode;
use crate::simulation::FrameSet;
use bevy::prelude::*;

/// Spawn the player's ship at the fixed spawn point.
///
/// Must run after the config load so the first frame already uses the
/// overridden tunables.
pub fn spawn_player(mut commands: Commands, config: Res<TuningConfig>) {
    commands.spawn((
        Player,
        KinematicBody::new(
            Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            INITIAL_HEADING_DEG,
            config.acceleration,
            config.friction,
            config.max_speed,
            config.player_scale,
        ),
        Transform::default(),
        Visibility::default(),
    ));

    println!("✓ Player ship spawned at ({PLAYER_SPAWN_X}, {PLAYER_SPAWN_Y})");
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the flight systems (Running only) and the render mirror.
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RotationDelta>()
            .add_systems(
                Update,
                (rotation_system, movement_system)
                    .chain()
                    .in_set(FrameSet::Flight)
                    .run_if(in_state(GameMode::Running)),
            )
            .add_systems(
                Update,
                (attach_ship_mesh_system, sync_body_transform_system).in_set(FrameSet::Render),
            );
    }
}
