//! Runtime tuning configuration loaded from `assets/tuning.toml`.
//!
//! [`TuningConfig`] is a Bevy [`Resource`] that mirrors the gameplay
//! constants in [`crate::constants`]. At startup, [`load_tuning_config`]
//! reads `assets/tuning.toml` and overwrites the defaults with any values
//! present in the file. Missing keys fall back to the compile-time
//! defaults, so a minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<TuningConfig>` to any system parameter list and read
//! values with `config.acceleration`, `config.shoot_cooldown`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TuningConfig::default()`.

use crate::constants::*;
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/tuning.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    // ── Ship movement ─────────────────────────────────────────────────────────
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub player_scale: f32,

    // ── Ship rotation ─────────────────────────────────────────────────────────
    pub normal_rotation_speed: f32,
    pub fast_rotation_speed: f32,

    // ── Attack ────────────────────────────────────────────────────────────────
    pub projectile_size: f32,
    pub shoot_cooldown: f32,
    pub projectile_speed: f32,
    pub attack_angle_lead: f32,

    // ── Input debounce ────────────────────────────────────────────────────────
    pub pause_input_cooldown: f32,
    pub menu_input_cooldown: f32,
    pub debug_toggle_cooldown: f32,

    // ── Presentation ──────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            // Ship movement
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
            player_scale: PLAYER_SCALE,
            // Ship rotation
            normal_rotation_speed: NORMAL_ROTATION_SPEED_DEG_S,
            fast_rotation_speed: FAST_ROTATION_SPEED_DEG_S,
            // Attack
            projectile_size: PROJECTILE_SIZE,
            shoot_cooldown: SHOOT_COOLDOWN_S,
            projectile_speed: PROJECTILE_SPEED,
            attack_angle_lead: ATTACK_ANGLE_LEAD,
            // Input debounce
            pause_input_cooldown: PAUSE_INPUT_COOLDOWN_S,
            menu_input_cooldown: MENU_INPUT_COOLDOWN_S,
            debug_toggle_cooldown: DEBUG_TOGGLE_COOLDOWN_S,
            // Presentation
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

/// Path of the optional tuning override file.
const TUNING_PATH: &str = "assets/tuning.toml";

/// Read and parse the tuning file, distinguishing a missing file from a
/// malformed one so the caller can log them differently.
fn read_tuning_file(path: &str) -> GameResult<TuningConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| GameError::ConfigRead {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| GameError::ConfigParse {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Startup system: attempt to load `assets/tuning.toml` and overwrite the
/// `TuningConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. A missing file is silently
/// ignored (defaults are already in place from `insert_resource`); a parse
/// error is logged but does not abort the game.
pub fn load_tuning_config(mut config: ResMut<TuningConfig>) {
    match read_tuning_file(TUNING_PATH) {
        Ok(loaded) => {
            *config = loaded;
            println!("✓ Loaded tuning config from {TUNING_PATH}");
        }
        Err(GameError::ConfigRead { .. }) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {TUNING_PATH} found; using compiled defaults");
        }
        Err(e) => {
            eprintln!("⚠ {e}; using defaults");
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = TuningConfig::default();
        assert_eq!(config.acceleration, PLAYER_ACCELERATION);
        assert_eq!(config.friction, PLAYER_FRICTION);
        assert_eq!(config.max_speed, PLAYER_MAX_SPEED);
        assert_eq!(config.shoot_cooldown, SHOOT_COOLDOWN_S);
        assert_eq!(config.attack_angle_lead, ATTACK_ANGLE_LEAD);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: TuningConfig = toml::from_str("max_speed = 250.0").unwrap();
        assert_eq!(config.max_speed, 250.0);
        // Everything else stays at the compiled default.
        assert_eq!(config.acceleration, PLAYER_ACCELERATION);
        assert_eq!(config.friction, PLAYER_FRICTION);
    }

    #[test]
    fn malformed_toml_is_reported_as_parse_error() {
        let err = toml::from_str::<TuningConfig>("max_speed = \"fast\"").unwrap_err();
        assert!(err.to_string().contains("max_speed"));
    }
}
