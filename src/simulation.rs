//! Frame orchestration: system-set ordering, screen bounds, debounce timers.
//!
//! ## Per-frame order
//!
//! Every gameplay system is assigned to one of the chained [`FrameSet`]s, so
//! the whole `Update` schedule runs as a single deterministic sequence:
//!
//! | Set       | Runs      | Contents                                        |
//! |-----------|-----------|-------------------------------------------------|
//! | `Input`   | always    | keyboard sampling, window-resize propagation    |
//! | `Timers`  | always    | debounce / menu-repeat countdown                |
//! | `Toggles` | always    | tuning-panel toggle, pause toggle               |
//! | `Menu`    | paused    | menu navigation + menu display refresh          |
//! | `Flight`  | running   | ship rotation, thrust integration               |
//! | `Combat`  | running   | projectile spawner update                       |
//! | `Telemetry`| running  | readout line refresh                            |
//! | `Render`  | always    | transform sync, gizmos, panel/slider refresh    |
//!
//! Pausing therefore freezes flight, combat, and telemetry wholesale while
//! input, timers, and menu handling keep running.
//!
//! ## Coordinate spaces
//!
//! Simulation state lives in *screen space*: origin at the window's
//! top-left, +x right, +y down, units = logical pixels. Rendering converts
//! to Bevy world space (origin at window centre, +y up) through
//! [`to_world`] / [`heading_to_world_rotation`] and nowhere else.

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use bevy::prelude::*;
use bevy::window::WindowResized;

// ── System sets ───────────────────────────────────────────────────────────────

/// The chained per-frame stages. See the module docs for the full table.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Timers,
    Toggles,
    Menu,
    Flight,
    Combat,
    Telemetry,
    Render,
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Live screen bounds in logical pixels.
///
/// This is the projectile survival region and the reference for the
/// screen-centre telemetry; it follows the window through resizes and
/// fullscreen switches via [`propagate_screen_bounds_system`].
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

impl ScreenBounds {
    /// Centre of the screen in screen coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Count-down debounce timers shared by the frame loop.
///
/// `pause` gates the level-triggered pause key; `debug` gates the F1
/// tuning-panel toggle. Both are decremented once per frame in the
/// `Timers` set, floored at zero. (Menu-repeat cooldowns live inside
/// [`crate::menu::MenuState`] — each menu screen owns its own.)
#[derive(Resource, Debug, Default)]
pub struct DebounceTimers {
    pub pause: f32,
    pub debug: f32,
}

// ── Space conversion ──────────────────────────────────────────────────────────

/// Convert a screen-space point (top-left origin, +y down) into Bevy world
/// space (window-centre origin, +y up).
pub fn to_world(p: Vec2, bounds: &ScreenBounds) -> Vec2 {
    Vec2::new(p.x - bounds.width / 2.0, bounds.height / 2.0 - p.y)
}

/// Convert a screen-space direction (+y down) into a world-space direction.
pub fn dir_to_world(d: Vec2) -> Vec2 {
    Vec2::new(d.x, -d.y)
}

/// World-space rotation for a heading in degrees (0° = screen-up,
/// clockwise positive).
pub fn heading_to_world_rotation(heading_deg: f32) -> Quat {
    Quat::from_rotation_z(-heading_deg.to_radians())
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Decrement the shared debounce timers, floored at zero.
pub fn tick_debounce_timers_system(mut timers: ResMut<DebounceTimers>, time: Res<Time>) {
    let dt = time.delta_secs();
    timers.pause = (timers.pause - dt).max(0.0);
    timers.debug = (timers.debug - dt).max(0.0);
}

/// Mirror window resizes (including fullscreen switches) into
/// [`ScreenBounds`].
///
/// The camera viewport follows the window automatically; only the
/// simulation-side bounds need explicit propagation.
pub fn propagate_screen_bounds_system(
    mut resized: MessageReader<WindowResized>,
    mut bounds: ResMut<ScreenBounds>,
) {
    for event in resized.read() {
        bounds.width = event.width;
        bounds.height = event.height;
        info!(
            "[window] Screen bounds now {:.0}×{:.0}",
            event.width, event.height
        );
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the chained frame order and the shared frame resources.
///
/// Must be added before the gameplay plugins so their `.in_set(...)`
/// registrations land inside an already-ordered schedule.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenBounds>()
            .init_resource::<DebounceTimers>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Timers,
                    FrameSet::Toggles,
                    FrameSet::Menu,
                    FrameSet::Flight,
                    FrameSet::Combat,
                    FrameSet::Telemetry,
                    FrameSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    crate::input::gather_input_system.in_set(FrameSet::Input),
                    propagate_screen_bounds_system.in_set(FrameSet::Input),
                    tick_debounce_timers_system.in_set(FrameSet::Timers),
                ),
            );
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_world_maps_screen_centre_to_origin() {
        let bounds = ScreenBounds {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(to_world(Vec2::new(400.0, 300.0), &bounds), Vec2::ZERO);
    }

    #[test]
    fn to_world_flips_the_y_axis() {
        let bounds = ScreenBounds {
            width: 800.0,
            height: 600.0,
        };
        // Top-left of the screen is up-left of the world origin.
        let world = to_world(Vec2::ZERO, &bounds);
        assert_eq!(world, Vec2::new(-400.0, 300.0));
    }

    #[test]
    fn heading_zero_points_world_up() {
        let up = heading_to_world_rotation(0.0) * Vec3::Y;
        assert!((up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn heading_ninety_points_world_east() {
        // Heading is clockwise on screen, so 90° turns the nose to the right.
        let east = heading_to_world_rotation(90.0) * Vec3::Y;
        assert!((east - Vec3::X).length() < 1e-5, "got {east:?}");
    }
}
