//! Centralised gameplay and presentation constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::TuningConfig`] mirrors the gameplay subset of these and
//! can override them at startup from `assets/tuning.toml`.

// ── Window ────────────────────────────────────────────────────────────────────

/// Title shown in the OS window decoration.
pub const WINDOW_TITLE: &str = "Driftfire";

/// Initial window width in logical pixels. Also the initial projectile cull
/// bound; both follow the live window size after a resize or mode switch.
pub const WINDOW_WIDTH: f32 = 800.0;

/// Initial window height in logical pixels.
pub const WINDOW_HEIGHT: f32 = 600.0;

// ── Player: spawn ─────────────────────────────────────────────────────────────

/// Fixed spawn point of the ship, in screen coordinates (top-left origin).
pub const PLAYER_SPAWN_X: f32 = 400.0;
pub const PLAYER_SPAWN_Y: f32 = 300.0;

/// Heading at spawn, degrees. 0° points screen-up.
pub const INITIAL_HEADING_DEG: f32 = 0.0;

// ── Player: movement ──────────────────────────────────────────────────────────

/// Thrust acceleration in px/s² applied while the forward key is held.
///
/// Higher values make the ship snappier; at 600 the ship reaches max speed
/// from rest in one second of sustained thrust.
pub const PLAYER_ACCELERATION: f32 = 600.0;

/// Deceleration in px/s² applied while *no* forward force is present.
///
/// Deliberately higher than the acceleration so the ship stops faster than
/// it starts. Friction never reverses the velocity direction.
pub const PLAYER_FRICTION: f32 = 800.0;

/// Hard ceiling on the ship's speed in px/s, enforced every integration step.
pub const PLAYER_MAX_SPEED: f32 = 600.0;

/// Uniform visual scale of the ship. Clamped to [`MIN_SHIP_SCALE`] at the
/// setter boundary.
pub const PLAYER_SCALE: f32 = 1.0;

/// Floor for the ship scale; prevents degenerate (invisible) geometry.
pub const MIN_SHIP_SCALE: f32 = 0.1;

/// Forward force unit passed to the integrator while W is held.
pub const FORWARD_FORCE_UNIT: f32 = 1.0;

// ── Player: rotation ──────────────────────────────────────────────────────────

/// Turn rate in degrees per second without the fast modifier.
pub const NORMAL_ROTATION_SPEED_DEG_S: f32 = 180.0;

/// Turn rate in degrees per second with Shift held.
pub const FAST_ROTATION_SPEED_DEG_S: f32 = 360.0;

// ── Attack ────────────────────────────────────────────────────────────────────

/// Visual radius of a projectile in px. Floor: [`MIN_PROJECTILE_SIZE`].
pub const PROJECTILE_SIZE: f32 = 2.0;

/// Floor for the projectile radius.
pub const MIN_PROJECTILE_SIZE: f32 = 0.1;

/// Seconds between consecutive shots while fire is active.
/// Floor: [`MIN_SHOOT_COOLDOWN_S`].
pub const SHOOT_COOLDOWN_S: f32 = 0.05;

/// Floor for the shot cooldown; prevents degenerate per-frame fire rates.
pub const MIN_SHOOT_COOLDOWN_S: f32 = 0.01;

/// Projectile speed in px/s. Any sign is permitted; negative values fire
/// backwards along the heading.
pub const PROJECTILE_SPEED: f32 = 400.0;

/// Fraction of this frame's rotation delta added to the firing heading.
///
/// Compensates visually for the rotation applied earlier in the same frame,
/// so a turning ship fires where it appears to point mid-frame.
pub const ATTACK_ANGLE_LEAD: f32 = 0.5;

// ── Input debounce ────────────────────────────────────────────────────────────

/// Seconds before a held pause key can toggle pause again.
pub const PAUSE_INPUT_COOLDOWN_S: f32 = 0.5;

/// Seconds between accepted menu navigation inputs (held-key repeat rate).
pub const MENU_INPUT_COOLDOWN_S: f32 = 0.2;

/// Seconds before F1 can toggle the tuning panel again.
pub const DEBUG_TOGGLE_COOLDOWN_S: f32 = 0.5;

// ── Presentation ──────────────────────────────────────────────────────────────

/// Path of the single UI font, relative to the working directory.
/// Missing or unparsable font is a fatal startup error.
pub const FONT_PATH: &str = "assets/fonts/DejaVuSans.ttf";

/// Font size of the telemetry readout lines.
pub const HUD_FONT_SIZE: f32 = 18.0;
