//! Debug overlay: telemetry readout, compass gauges, and the live tuning
//! panel.
//!
//! ## Layers
//!
//! | Layer              | Technology | Default | Controlled by          |
//! |--------------------|------------|---------|------------------------|
//! | Telemetry readout  | Bevy UI    | ON      | — (refreshed while Running) |
//! | Facing compass     | Gizmos     | ON      | —                      |
//! | Centre compass     | Gizmos     | ON      | —                      |
//! | Tuning panel       | Bevy UI    | hidden  | F1 (0.5 s debounce)    |
//!
//! ## Tuning binding
//!
//! Every slider row is tagged with a [`TunableParam`] — a stable parameter
//! identifier that dispatches to the owning struct's clamped accessor pair.
//! Dragging writes through `apply`; the sync system re-reads `get` every
//! visible frame, so changes from any side show up immediately. No
//! references or pointers are captured across frames.

use crate::attack::ProjectileSpawner;
use crate::config::TuningConfig;
use crate::graphics::GameFont;
use crate::input::ControlState;
use crate::menu::GameMode;
use crate::player::{KinematicBody, Player};
use crate::simulation::{dir_to_world, to_world, DebounceTimers, FrameSet, ScreenBounds};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

// ── Layout ────────────────────────────────────────────────────────────────────

const READOUT_POS: Vec2 = Vec2::new(10.0, 10.0);

const COMPASS_RADIUS: f32 = 32.0;
const COMPASS_NEEDLE_OFFSET: f32 = 6.0;
/// Screen-space centre of the facing compass, below the readout lines.
const COMPASS_FACING_CENTER: Vec2 = Vec2::new(52.0, 110.0);
/// Screen-space centre of the centre-pointing compass, below the first.
const COMPASS_CENTER_CENTER: Vec2 = Vec2::new(52.0, 194.0);

const SLIDER_WIDTH: f32 = 140.0;

// ── Resources ─────────────────────────────────────────────────────────────────

/// The telemetry line buffer plus the tuning-panel visibility flag.
///
/// Lines are cleared and re-appended every Running frame; while paused the
/// last Running frame's lines stay on screen under the menu overlay.
#[derive(Resource, Debug, Default)]
pub struct DebugPanel {
    lines: Vec<String>,
    pub tuning_open: bool,
}

impl DebugPanel {
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn add_line(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

// ── Tunable parameters ────────────────────────────────────────────────────────

/// Stable identifier of one live-tunable simulation parameter.
///
/// Doubles as the component tagging the slider row that edits it. All reads
/// and writes go through the owning struct's accessor pair, so the setter
/// clamps apply no matter where a value comes from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunableParam {
    Acceleration,
    Friction,
    MaxSpeed,
    ShipScale,
    ProjectileSpeed,
    ProjectileSize,
    ShootCooldown,
}

/// Display order of the slider rows.
pub const TUNABLE_PARAMS: [TunableParam; 7] = [
    TunableParam::Acceleration,
    TunableParam::Friction,
    TunableParam::MaxSpeed,
    TunableParam::ShipScale,
    TunableParam::ProjectileSpeed,
    TunableParam::ProjectileSize,
    TunableParam::ShootCooldown,
];

impl TunableParam {
    /// Label shown next to the slider.
    pub fn label(self) -> &'static str {
        match self {
            Self::Acceleration => "Acceleration",
            Self::Friction => "Friction",
            Self::MaxSpeed => "Max Speed",
            Self::ShipScale => "Ship Scale",
            Self::ProjectileSpeed => "Projectile Speed",
            Self::ProjectileSize => "Projectile Size",
            Self::ShootCooldown => "Shoot Cooldown",
        }
    }

    /// Slider range, `(min, max)`.
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Acceleration => (0.0, 2000.0),
            Self::Friction => (0.0, 2000.0),
            Self::MaxSpeed => (100.0, 1000.0),
            Self::ShipScale => (0.5, 2.0),
            Self::ProjectileSpeed => (50.0, 1000.0),
            Self::ProjectileSize => (0.5, 10.0),
            Self::ShootCooldown => (0.01, 1.0),
        }
    }

    /// Read the current value from the owning struct.
    pub fn get(self, body: &KinematicBody, spawner: &ProjectileSpawner) -> f32 {
        match self {
            Self::Acceleration => body.acceleration(),
            Self::Friction => body.friction(),
            Self::MaxSpeed => body.max_speed(),
            Self::ShipScale => body.scale(),
            Self::ProjectileSpeed => spawner.projectile_speed(),
            Self::ProjectileSize => spawner.projectile_size(),
            Self::ShootCooldown => spawner.shoot_cooldown(),
        }
    }

    /// Write a value through the owning struct's clamped setter.
    pub fn apply(self, value: f32, body: &mut KinematicBody, spawner: &mut ProjectileSpawner) {
        match self {
            Self::Acceleration => body.set_acceleration(value),
            Self::Friction => body.set_friction(value),
            Self::MaxSpeed => body.set_max_speed(value),
            Self::ShipScale => body.set_scale(value),
            Self::ProjectileSpeed => spawner.set_projectile_speed(value),
            Self::ProjectileSize => spawner.set_projectile_size(value),
            Self::ShootCooldown => spawner.set_shoot_cooldown(value),
        }
    }
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Tags the telemetry readout text node.
#[derive(Component)]
pub struct TelemetryText;

/// Tags the tuning panel root node.
#[derive(Component)]
pub struct TuningPanelRoot;

/// Tags the live readout block inside the tuning panel.
#[derive(Component)]
pub struct TuningReadoutText;

/// Tags a slider's draggable handle.
#[derive(Component)]
pub struct SliderHandle(pub TunableParam);

/// Tags a slider's numeric value text.
#[derive(Component)]
pub struct SliderValueText(pub TunableParam);

// ── Toggles: F1 ───────────────────────────────────────────────────────────────

/// Flip the tuning panel on the F1 edge, gated by its own debounce.
pub fn toggle_tuning_panel_system(
    control: Res<ControlState>,
    config: Res<TuningConfig>,
    mut timers: ResMut<DebounceTimers>,
    mut panel: ResMut<DebugPanel>,
) {
    if control.debug_toggled && timers.debug == 0.0 {
        panel.tuning_open = !panel.tuning_open;
        timers.debug = config.debug_toggle_cooldown;
        info!(
            "[debug] Tuning panel {}",
            if panel.tuning_open { "opened" } else { "closed" }
        );
    }
}

/// Show or hide the panel when the flag changes.
pub fn sync_tuning_panel_visibility_system(
    panel: Res<DebugPanel>,
    mut query: Query<&mut Visibility, With<TuningPanelRoot>>,
) {
    if !panel.is_changed() {
        return;
    }
    let vis = if panel.tuning_open {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut v in query.iter_mut() {
        *v = vis;
    }
}

// ── Telemetry ─────────────────────────────────────────────────────────────────

/// Rebuild the telemetry lines from the live ship state.
pub fn telemetry_system(
    q_player: Query<&KinematicBody, With<Player>>,
    bounds: Res<ScreenBounds>,
    mut panel: ResMut<DebugPanel>,
) {
    let Ok(body) = q_player.single() else {
        return;
    };
    let rel = body.position - bounds.center();

    panel.clear();
    panel.add_line(format!("Heading: {:.1} deg", body.heading_deg));
    panel.add_line(format!("Rel to Center: ({:.1}, {:.1})", rel.x, rel.y));
    panel.add_line("Press F1 for tuning panel".to_string());
}

/// Mirror the line buffer into the readout text node.
pub fn telemetry_text_system(
    panel: Res<DebugPanel>,
    mut query: Query<&mut Text, With<TelemetryText>>,
) {
    if !panel.is_changed() {
        return;
    }
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(panel.lines().join("\n"));
    }
}

// ── Compasses ─────────────────────────────────────────────────────────────────

/// Draw the two compass gauges: a red needle for the facing angle and a
/// cyan needle pointing from the ship toward the screen centre.
pub fn compass_gizmo_system(
    q_player: Query<&KinematicBody, With<Player>>,
    bounds: Res<ScreenBounds>,
    mut gizmos: Gizmos,
) {
    let Ok(body) = q_player.single() else {
        return;
    };
    let outline = Color::WHITE;
    let needle_len = COMPASS_RADIUS - COMPASS_NEEDLE_OFFSET;

    // Facing compass: the needle uses the same −90° re-base as thrust, so
    // heading 0° points the needle at the "N" label.
    let center = to_world(COMPASS_FACING_CENTER, &bounds);
    gizmos.circle_2d(center, COMPASS_RADIUS, outline);
    let angle = (body.heading_deg - 90.0).to_radians();
    let dir = dir_to_world(Vec2::new(angle.cos(), angle.sin()));
    gizmos.line_2d(center, center + dir * needle_len, Color::srgb(1.0, 0.15, 0.15));

    // Centre compass: raw atan2 of the ship→centre offset, no re-base.
    let center2 = to_world(COMPASS_CENTER_CENTER, &bounds);
    gizmos.circle_2d(center2, COMPASS_RADIUS, outline);
    let to_center = bounds.center() - body.position;
    if to_center.length_squared() > 1e-6 {
        let angle = to_center.y.atan2(to_center.x);
        let dir = dir_to_world(Vec2::new(angle.cos(), angle.sin()));
        gizmos.line_2d(
            center2,
            center2 + dir * needle_len,
            Color::srgb(0.2, 0.9, 0.95),
        );
    }
}

// ── Tuning panel: readout + sliders ───────────────────────────────────────────

/// Refresh the readout block at the top of the tuning panel.
pub fn tuning_readout_system(
    panel: Res<DebugPanel>,
    q_player: Query<&KinematicBody, With<Player>>,
    spawner: Res<ProjectileSpawner>,
    mut query: Query<&mut Text, With<TuningReadoutText>>,
) {
    if !panel.tuning_open {
        return;
    }
    let Ok(body) = q_player.single() else {
        return;
    };
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(format!(
            "Pos: ({:.1}, {:.1})\nAttack Active: {}\nProjectiles: {}",
            body.position.x,
            body.position.y,
            if spawner.is_attack_active() { "Yes" } else { "No" },
            spawner.projectiles().len()
        ));
    }
}

/// Turn a pressed slider bar into a parameter write.
///
/// The cursor position is read relative to the bar node, normalised to
/// `[0, 1]`, mapped into the parameter's range, and written through the
/// clamped setter. Runs every frame the button stays pressed, so holding
/// and dragging tracks the cursor.
pub fn slider_drag_system(
    panel: Res<DebugPanel>,
    q_bars: Query<(&Interaction, &RelativeCursorPosition, &TunableParam)>,
    mut q_player: Query<&mut KinematicBody, With<Player>>,
    mut spawner: ResMut<ProjectileSpawner>,
) {
    if !panel.tuning_open {
        return;
    }
    let Ok(mut body) = q_player.single_mut() else {
        return;
    };
    for (interaction, cursor, &param) in q_bars.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(normalized) = cursor.normalized else {
            continue;
        };
        let (min, max) = param.range();
        let value = min + normalized.x.clamp(0.0, 1.0) * (max - min);
        param.apply(value, &mut body, &mut spawner);
    }
}

/// Re-read every tunable and refresh its handle position and value text.
///
/// This is the other half of the two-way binding: values changed from the
/// config file or future code paths show up on the sliders without any
/// extra wiring.
pub fn slider_sync_system(
    panel: Res<DebugPanel>,
    q_player: Query<&KinematicBody, With<Player>>,
    spawner: Res<ProjectileSpawner>,
    mut q_handles: Query<(&SliderHandle, &mut Node)>,
    mut q_values: Query<(&SliderValueText, &mut Text)>,
) {
    if !panel.tuning_open {
        return;
    }
    let Ok(body) = q_player.single() else {
        return;
    };

    for (handle, mut node) in q_handles.iter_mut() {
        let (min, max) = handle.0.range();
        let value = handle.0.get(body, &spawner);
        let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
        node.left = Val::Percent(t * 100.0);
    }

    for (value_text, mut text) in q_values.iter_mut() {
        let value = value_text.0.get(body, &spawner);
        *text = Text::new(format!("{value:.2}"));
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the telemetry readout, the compass labels, and the (hidden) tuning
/// panel with one slider row per tunable parameter.
pub fn setup_debug_overlay(mut commands: Commands, font: Res<GameFont>, config: Res<TuningConfig>) {
    let small = TextFont {
        font: font.0.clone(),
        font_size: 12.0,
        ..default()
    };

    // ── Telemetry readout ─────────────────────────────────────────────────────
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(READOUT_POS.x),
            top: Val::Px(READOUT_POS.y),
            ..default()
        },
        Text::new(""),
        TextFont {
            font: font.0.clone(),
            font_size: config.hud_font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        TelemetryText,
    ));

    // ── Compass labels ────────────────────────────────────────────────────────
    for (label, compass_center, color) in [
        ("N", COMPASS_FACING_CENTER, Color::WHITE),
        ("C", COMPASS_CENTER_CENTER, Color::srgb(0.2, 0.9, 0.95)),
    ] {
        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(compass_center.x - 6.0),
                top: Val::Px(compass_center.y - COMPASS_RADIUS - 22.0),
                ..default()
            },
            Text::new(label),
            TextFont {
                font: font.0.clone(),
                font_size: config.hud_font_size,
                ..default()
            },
            TextColor(color),
        ));
    }

    // ── Tuning panel ──────────────────────────────────────────────────────────
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                top: Val::Px(10.0),
                width: Val::Px(235.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.93)),
            BorderColor::all(Color::srgb(0.32, 0.32, 0.44)),
            TuningPanelRoot,
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Tuning"),
                TextFont {
                    font: font.0.clone(),
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));

            panel.spawn((
                Text::new(""),
                small.clone(),
                TextColor(Color::srgb(0.85, 0.85, 0.88)),
                TuningReadoutText,
            ));

            for param in TUNABLE_PARAMS {
                spawn_slider_row(panel, param, &small);
            }

            panel.spawn((
                Text::new("Drag a bar to tune; F1 closes"),
                small,
                TextColor(Color::srgb(0.42, 0.42, 0.52)),
            ));
        });
}

/// Spawn one slider row: `Label  value` over a draggable bar.
fn spawn_slider_row(panel: &mut ChildSpawnerCommands<'_>, param: TunableParam, small: &TextFont) {
    panel
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(2.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn(Node {
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                width: Val::Px(SLIDER_WIDTH + 60.0),
                ..default()
            })
            .with_children(|header| {
                header.spawn((
                    Text::new(param.label()),
                    small.clone(),
                    TextColor(Color::srgb(0.85, 0.85, 0.88)),
                ));
                header.spawn((
                    Text::new("0.00"),
                    small.clone(),
                    TextColor(Color::WHITE),
                    SliderValueText(param),
                ));
            });

            row.spawn((
                Button,
                Node {
                    width: Val::Px(SLIDER_WIDTH),
                    height: Val::Px(10.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.39, 0.39, 0.39)),
                RelativeCursorPosition::default(),
                param,
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(0.0),
                        top: Val::Px(-2.0),
                        width: Val::Px(6.0),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    SliderHandle(param),
                ));
            });
        });
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the overlay: F1 toggle, telemetry refresh (Running only),
/// compasses, and the tuning panel systems.
pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugPanel>()
            .add_systems(
                Update,
                // Panel toggle resolves before the pause toggle, matching the
                // frame loop's step order.
                toggle_tuning_panel_system
                    .in_set(FrameSet::Toggles)
                    .before(crate::menu::pause_toggle_system),
            )
            .add_systems(
                Update,
                telemetry_system
                    .in_set(FrameSet::Telemetry)
                    .run_if(in_state(GameMode::Running)),
            )
            .add_systems(
                Update,
                (
                    sync_tuning_panel_visibility_system,
                    telemetry_text_system,
                    compass_gizmo_system,
                    tuning_readout_system,
                    // Drag writes land before the same frame's visual sync.
                    (slider_drag_system, slider_sync_system).chain(),
                )
                    .in_set(FrameSet::Render),
            );
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (KinematicBody, ProjectileSpawner) {
        (
            KinematicBody::new(Vec2::new(400.0, 300.0), 0.0, 600.0, 800.0, 600.0, 1.0),
            ProjectileSpawner::new(2.0, 0.05, 400.0, Vec2::new(800.0, 600.0)),
        )
    }

    #[test]
    fn every_param_round_trips_through_its_accessors() {
        let (mut body, mut spawner) = fixtures();
        for param in TUNABLE_PARAMS {
            let (min, max) = param.range();
            let value = (min + max) / 2.0;
            param.apply(value, &mut body, &mut spawner);
            assert!(
                (param.get(&body, &spawner) - value).abs() < 1e-4,
                "{param:?} did not round-trip"
            );
        }
    }

    #[test]
    fn applies_below_the_floor_come_back_clamped() {
        let (mut body, mut spawner) = fixtures();

        TunableParam::ShipScale.apply(0.0, &mut body, &mut spawner);
        assert_eq!(TunableParam::ShipScale.get(&body, &spawner), 0.1);

        TunableParam::ShootCooldown.apply(0.0, &mut body, &mut spawner);
        assert_eq!(TunableParam::ShootCooldown.get(&body, &spawner), 0.01);

        TunableParam::ProjectileSize.apply(-3.0, &mut body, &mut spawner);
        assert_eq!(TunableParam::ProjectileSize.get(&body, &spawner), 0.1);

        TunableParam::Acceleration.apply(-100.0, &mut body, &mut spawner);
        assert_eq!(TunableParam::Acceleration.get(&body, &spawner), 0.0);
    }

    #[test]
    fn slider_ranges_are_well_formed() {
        for param in TUNABLE_PARAMS {
            let (min, max) = param.range();
            assert!(min < max, "{param:?} range is inverted");
        }
    }

    #[test]
    fn panel_lines_rebuild_on_clear() {
        let mut panel = DebugPanel::default();
        panel.add_line("Heading: 0.0 deg".to_string());
        panel.add_line("second".to_string());
        assert_eq!(panel.lines().len(), 2);

        panel.clear();
        assert!(panel.lines().is_empty());

        panel.add_line("fresh".to_string());
        assert_eq!(panel.lines(), ["fresh".to_string()]);
    }
}
