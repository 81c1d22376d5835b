//! Frame input sampling: level, edge, and derived control flags.
//!
//! The **input abstraction layer** ([`RawKeys`] → [`ControlState`]) keeps the
//! control logic fully testable and decoupled from the window backend: tests
//! build a [`RawKeys`] sample directly and call [`ControlState::apply`]
//! without a keyboard, while [`gather_input_system`] is the only place that
//! touches `ButtonInput<KeyCode>`.
//!
//! Edge-triggered flags (attack toggle, tuning-panel toggle) are true only on
//! the frame the underlying key transitions released → pressed; the previous
//! frame's raw state is stored inside [`ControlState`] for this.
//!
//! **Caller contract**: [`ControlState::apply`] must be called exactly once
//! per frame. Skipping a frame misses edges; applying the same sample twice
//! consumes them. This is documented, not enforced.

use bevy::prelude::*;

/// One frame's raw key sample. Plain booleans, no device types.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawKeys {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fast_modifier: bool,
    pub attack: bool,
    pub pause: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_select: bool,
    pub debug_toggle: bool,
}

/// Per-frame control flags derived from the raw key sample.
#[derive(Resource, Debug, Default)]
pub struct ControlState {
    // Level-triggered
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fast_modifier: bool,
    pub pause_held: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_select: bool,

    // Edge-triggered: true only on the released→pressed frame.
    pub attack_toggled: bool,
    pub debug_toggled: bool,

    // Derived
    pub fast_rotate_left: bool,
    pub fast_rotate_right: bool,

    // Previous raw state backing the edge detection.
    prev_attack: bool,
    prev_debug: bool,
}

impl ControlState {
    /// Fold one frame's raw sample into the control flags.
    pub fn apply(&mut self, raw: &RawKeys) {
        self.rotate_left = raw.rotate_left;
        self.rotate_right = raw.rotate_right;
        self.thrust = raw.thrust;
        self.fast_modifier = raw.fast_modifier;
        self.pause_held = raw.pause;
        self.menu_up = raw.menu_up;
        self.menu_down = raw.menu_down;
        self.menu_select = raw.menu_select;

        self.attack_toggled = raw.attack && !self.prev_attack;
        self.prev_attack = raw.attack;

        self.debug_toggled = raw.debug_toggle && !self.prev_debug;
        self.prev_debug = raw.debug_toggle;

        self.fast_rotate_left = raw.rotate_left && raw.fast_modifier;
        self.fast_rotate_right = raw.rotate_right && raw.fast_modifier;
    }
}

/// Sample the keyboard once per frame and refresh [`ControlState`].
///
/// Key map: A/D rotate, W thrust, Shift fast-rotate modifier, Space attack
/// toggle, Escape pause, Up/W + Down/S + Enter/Space menu navigation,
/// F1 tuning panel.
pub fn gather_input_system(keys: Res<ButtonInput<KeyCode>>, mut control: ResMut<ControlState>) {
    let raw = RawKeys {
        rotate_left: keys.pressed(KeyCode::KeyA),
        rotate_right: keys.pressed(KeyCode::KeyD),
        thrust: keys.pressed(KeyCode::KeyW),
        fast_modifier: keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight),
        attack: keys.pressed(KeyCode::Space),
        pause: keys.pressed(KeyCode::Escape),
        menu_up: keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW),
        menu_down: keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS),
        menu_select: keys.pressed(KeyCode::Enter) || keys.pressed(KeyCode::Space),
        debug_toggle: keys.pressed(KeyCode::F1),
    };
    control.apply(&raw);
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_frame(attack: bool) -> RawKeys {
        RawKeys {
            attack,
            ..Default::default()
        }
    }

    #[test]
    fn attack_edge_fires_once_while_held() {
        let mut control = ControlState::default();

        control.apply(&attack_frame(true));
        assert!(control.attack_toggled, "edge must fire on the press frame");

        control.apply(&attack_frame(true));
        assert!(!control.attack_toggled, "edge must not repeat while held");
        control.apply(&attack_frame(true));
        assert!(!control.attack_toggled);
    }

    #[test]
    fn attack_edge_fires_again_after_release() {
        let mut control = ControlState::default();

        control.apply(&attack_frame(true));
        control.apply(&attack_frame(false));
        assert!(!control.attack_toggled);

        control.apply(&attack_frame(true));
        assert!(control.attack_toggled, "release then press is a second edge");
    }

    #[test]
    fn double_sampling_one_frame_consumes_the_edge() {
        // Documents the once-per-frame caller contract: a second apply with
        // the same held key swallows the edge.
        let mut control = ControlState::default();

        control.apply(&attack_frame(true));
        control.apply(&attack_frame(true));
        assert!(!control.attack_toggled);
    }

    #[test]
    fn debug_toggle_edge_is_independent_of_attack_edge() {
        let mut control = ControlState::default();

        control.apply(&RawKeys {
            attack: true,
            debug_toggle: true,
            ..Default::default()
        });
        assert!(control.attack_toggled);
        assert!(control.debug_toggled);

        control.apply(&RawKeys {
            attack: false,
            debug_toggle: true,
            ..Default::default()
        });
        assert!(!control.attack_toggled);
        assert!(!control.debug_toggled);
    }

    #[test]
    fn fast_rotate_requires_both_rotate_and_modifier() {
        let mut control = ControlState::default();

        control.apply(&RawKeys {
            rotate_left: true,
            ..Default::default()
        });
        assert!(control.rotate_left && !control.fast_rotate_left);

        control.apply(&RawKeys {
            rotate_left: true,
            fast_modifier: true,
            ..Default::default()
        });
        assert!(control.fast_rotate_left);
        assert!(!control.fast_rotate_right);

        control.apply(&RawKeys {
            rotate_right: true,
            fast_modifier: true,
            ..Default::default()
        });
        assert!(control.fast_rotate_right && !control.fast_rotate_left);
    }

    #[test]
    fn level_flags_track_the_raw_sample() {
        let mut control = ControlState::default();

        control.apply(&RawKeys {
            thrust: true,
            pause: true,
            menu_down: true,
            ..Default::default()
        });
        assert!(control.thrust && control.pause_held && control.menu_down);

        control.apply(&RawKeys::default());
        assert!(!control.thrust && !control.pause_held && !control.menu_down);
    }
}
