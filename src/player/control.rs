//! Ship rotation and thrust systems.
//!
//! ## Pipeline (runs in order every Running frame)
//!
//! 1. [`rotation_system`] — turn the ship from the rotate flags, record the
//!    applied delta in [`RotationDelta`] for the attack-angle lead.
//! 2. [`movement_system`] — apply forward thrust and integrate.
//!
//! The decision logic lives in the pure [`rotation_speed`] helper so the
//! fast > normal > none priority ladder is testable without an `App`.

use super::state::{KinematicBody, Player, RotationDelta};
use crate::config::TuningConfig;
use crate::constants::FORWARD_FORCE_UNIT;
use crate::input::ControlState;
use bevy::prelude::*;

/// Signed turn rate in degrees per second for the current control flags.
///
/// Fast rotation wins over normal rotation; left is negative, right
/// positive. Opposing keys resolve in favour of the first match in the
/// ladder.
pub fn rotation_speed(control: &ControlState, config: &TuningConfig) -> f32 {
    if control.fast_rotate_left {
        -config.fast_rotation_speed
    } else if control.rotate_left {
        -config.normal_rotation_speed
    } else if control.fast_rotate_right {
        config.fast_rotation_speed
    } else if control.rotate_right {
        config.normal_rotation_speed
    } else {
        0.0
    }
}

/// Turn the ship and record this frame's rotation delta.
pub fn rotation_system(
    control: Res<ControlState>,
    config: Res<TuningConfig>,
    mut q_player: Query<&mut KinematicBody, With<Player>>,
    mut delta: ResMut<RotationDelta>,
    time: Res<Time>,
) {
    let Ok(mut body) = q_player.single_mut() else {
        return;
    };
    let speed = rotation_speed(&control, &config);
    let dt = time.delta_secs();
    body.rotate(speed, dt);
    delta.0 = speed * dt;
}

/// Apply forward thrust (if held) and advance the integrator.
pub fn movement_system(
    control: Res<ControlState>,
    mut q_player: Query<&mut KinematicBody, With<Player>>,
    time: Res<Time>,
) {
    let Ok(mut body) = q_player.single_mut() else {
        return;
    };
    let force = if control.thrust {
        FORWARD_FORCE_UNIT
    } else {
        0.0
    };
    let dt = time.delta_secs();
    let heading = body.heading_deg;
    body.apply_force(force, dt, heading);
    body.integrate(dt, force);
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawKeys;

    fn control_with(raw: RawKeys) -> ControlState {
        let mut control = ControlState::default();
        control.apply(&raw);
        control
    }

    #[test]
    fn no_keys_means_no_rotation() {
        let control = control_with(RawKeys::default());
        assert_eq!(rotation_speed(&control, &TuningConfig::default()), 0.0);
    }

    #[test]
    fn left_is_negative_right_is_positive() {
        let config = TuningConfig::default();

        let control = control_with(RawKeys {
            rotate_left: true,
            ..Default::default()
        });
        assert_eq!(rotation_speed(&control, &config), -config.normal_rotation_speed);

        let control = control_with(RawKeys {
            rotate_right: true,
            ..Default::default()
        });
        assert_eq!(rotation_speed(&control, &config), config.normal_rotation_speed);
    }

    #[test]
    fn fast_modifier_doubles_the_turn_rate() {
        let config = TuningConfig::default();

        let control = control_with(RawKeys {
            rotate_left: true,
            fast_modifier: true,
            ..Default::default()
        });
        assert_eq!(rotation_speed(&control, &config), -config.fast_rotation_speed);

        let control = control_with(RawKeys {
            rotate_right: true,
            fast_modifier: true,
            ..Default::default()
        });
        assert_eq!(rotation_speed(&control, &config), config.fast_rotation_speed);
    }

    #[test]
    fn fast_left_wins_over_plain_right() {
        // Both rotate keys held with Shift: the ladder picks fast-left first.
        let config = TuningConfig::default();
        let control = control_with(RawKeys {
            rotate_left: true,
            rotate_right: true,
            fast_modifier: true,
            ..Default::default()
        });
        assert_eq!(rotation_speed(&control, &config), -config.fast_rotation_speed);
    }
}
