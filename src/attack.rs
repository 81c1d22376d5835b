//! Projectile spawning, straight-line flight, and screen-bounds culling.
//!
//! [`ProjectileSpawner`] owns the live projectile collection and performs
//! the whole per-frame update — cooldown gating, at-most-one spawn, advance,
//! cull — as plain, unit-testable code. The systems around it only feed it
//! input state and mirror it to the screen.

use crate::config::TuningConfig;
use crate::constants::{MIN_PROJECTILE_SIZE, MIN_SHOOT_COOLDOWN_S};
use crate::input::ControlState;
use crate::menu::GameMode;
use crate::player::{KinematicBody, Player, RotationDelta};
use crate::simulation::{to_world, FrameSet, ScreenBounds};
use bevy::prelude::*;

// ── Data ──────────────────────────────────────────────────────────────────────

/// One projectile in flight. Velocity is fixed at spawn time — no drag, no
/// gravity.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// Whether fire is currently toggled on. Flipped by the attack-toggle edge.
#[derive(Resource, Debug, Default)]
pub struct AttackSwitch(pub bool);

/// Cooldown-gated projectile emitter and pool.
///
/// Positions are screen-space; the survival region is `[0, width] ×
/// [0, height]` against the *current* bounds (inclusive at the edges).
/// The pool has no hard cap — the cull pass bounds its size by
/// fire rate × screen-crossing time.
#[derive(Resource, Debug, Clone)]
pub struct ProjectileSpawner {
    attack_active: bool,
    shoot_timer: f32,
    shoot_cooldown: f32,
    projectile_speed: f32,
    projectile_size: f32,
    bounds: Vec2,
    projectiles: Vec<Projectile>,
}

impl ProjectileSpawner {
    pub fn new(projectile_size: f32, shoot_cooldown: f32, projectile_speed: f32, bounds: Vec2) -> Self {
        let mut spawner = Self {
            attack_active: false,
            shoot_timer: 0.0,
            shoot_cooldown: MIN_SHOOT_COOLDOWN_S,
            projectile_speed,
            projectile_size: MIN_PROJECTILE_SIZE,
            bounds,
            projectiles: Vec::new(),
        };
        spawner.set_shoot_cooldown(shoot_cooldown);
        spawner.set_projectile_size(projectile_size);
        spawner
    }

    /// Advance the spawner by one frame.
    ///
    /// 1. Advance the cooldown timer.
    /// 2. If firing and the timer has elapsed, spawn **one** projectile at
    ///    `origin` along `heading_deg` (0° = screen-up) and reset the timer
    ///    to zero — even if several cooldown intervals passed this frame.
    /// 3. Advance every projectile by `velocity * dt`.
    /// 4. Drop every projectile that left the screen bounds (strict
    ///    exclusion on both axes).
    pub fn update(&mut self, dt: f32, origin: Vec2, heading_deg: f32, attack_active: bool) {
        self.attack_active = attack_active;

        self.shoot_timer += dt;
        if self.attack_active && self.shoot_timer >= self.shoot_cooldown {
            let angle = (heading_deg - 90.0).to_radians();
            self.projectiles.push(Projectile {
                position: origin,
                velocity: Vec2::new(angle.cos(), angle.sin()) * self.projectile_speed,
                radius: self.projectile_size,
            });
            self.shoot_timer = 0.0;
        }

        for proj in &mut self.projectiles {
            proj.position += proj.velocity * dt;
        }

        let bounds = self.bounds;
        self.projectiles.retain(|proj| {
            let p = proj.position;
            p.x >= 0.0 && p.x <= bounds.x && p.y >= 0.0 && p.y <= bounds.y
        });
    }

    /// Live projectiles, unordered.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn is_attack_active(&self) -> bool {
        self.attack_active
    }

    /// Re-propagate the screen bounds after a resize or mode switch.
    /// Takes effect on the next cull pass.
    pub fn set_screen_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    // ── Tunable accessors (floors enforced here, not at use time) ─────────────

    pub fn projectile_size(&self) -> f32 {
        self.projectile_size
    }

    pub fn set_projectile_size(&mut self, size: f32) {
        self.projectile_size = size.max(MIN_PROJECTILE_SIZE);
    }

    pub fn shoot_cooldown(&self) -> f32 {
        self.shoot_cooldown
    }

    pub fn set_shoot_cooldown(&mut self, cooldown: f32) {
        self.shoot_cooldown = cooldown.max(MIN_SHOOT_COOLDOWN_S);
    }

    pub fn projectile_speed(&self) -> f32 {
        self.projectile_speed
    }

    /// Any sign is permitted; negative speeds fire backwards.
    pub fn set_projectile_speed(&mut self, speed: f32) {
        self.projectile_speed = speed;
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Create the spawner after the config load so overrides apply from frame 1.
pub fn setup_projectile_spawner(
    mut commands: Commands,
    config: Res<TuningConfig>,
    bounds: Res<ScreenBounds>,
) {
    commands.insert_resource(ProjectileSpawner::new(
        config.projectile_size,
        config.shoot_cooldown,
        config.projectile_speed,
        Vec2::new(bounds.width, bounds.height),
    ));
}

/// Per-frame attack step: flip the fire switch on the toggle edge, compute
/// the firing heading with the half-rotation lead, and run the spawner.
pub fn attack_system(
    control: Res<ControlState>,
    config: Res<TuningConfig>,
    mut switch: ResMut<AttackSwitch>,
    delta: Res<RotationDelta>,
    q_player: Query<&KinematicBody, With<Player>>,
    mut spawner: ResMut<ProjectileSpawner>,
    time: Res<Time>,
) {
    let Ok(body) = q_player.single() else {
        return;
    };

    if control.attack_toggled {
        switch.0 = !switch.0;
    }

    let heading = body.heading_deg + delta.0 * config.attack_angle_lead;
    spawner.update(time.delta_secs(), body.position, heading, switch.0);
}

/// Keep the spawner's cull region in step with the live screen bounds.
pub fn sync_spawner_bounds_system(
    bounds: Res<ScreenBounds>,
    mut spawner: ResMut<ProjectileSpawner>,
) {
    if !bounds.is_changed() {
        return;
    }
    spawner.set_screen_bounds(Vec2::new(bounds.width, bounds.height));
}

/// Draw each projectile as a yellow gizmo circle.
pub fn projectile_gizmo_system(
    spawner: Res<ProjectileSpawner>,
    bounds: Res<ScreenBounds>,
    mut gizmos: Gizmos,
) {
    let color = Color::srgb(1.0, 0.9, 0.2);
    for proj in spawner.projectiles() {
        gizmos.circle_2d(to_world(proj.position, &bounds), proj.radius, color);
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the attack step (Running only), the bounds mirror, and the
/// projectile rendering.
pub struct AttackPlugin;

impl Plugin for AttackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AttackSwitch>()
            .add_systems(
                Update,
                sync_spawner_bounds_system
                    .in_set(FrameSet::Input)
                    .after(crate::simulation::propagate_screen_bounds_system),
            )
            .add_systems(
                Update,
                attack_system
                    .in_set(FrameSet::Combat)
                    .run_if(in_state(GameMode::Running)),
            )
            .add_systems(Update, projectile_gizmo_system.in_set(FrameSet::Render));
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);
    const ORIGIN: Vec2 = Vec2::new(400.0, 300.0);

    fn test_spawner() -> ProjectileSpawner {
        ProjectileSpawner::new(2.0, 0.05, 400.0, BOUNDS)
    }

    #[test]
    fn first_active_frame_spawns_up_and_moves_one_step() {
        // Heading 0° maps to (cos(−90°), sin(−90°)) = (0, −1): screen-up.
        let mut spawner = test_spawner();
        spawner.update(0.05, ORIGIN, 0.0, true);

        assert_eq!(spawner.projectiles().len(), 1);
        let proj = spawner.projectiles()[0];
        // Spawned at the origin, then advanced by (0, −400 · 0.05).
        assert!((proj.position - Vec2::new(400.0, 280.0)).length() < 1e-3);
        assert!((proj.velocity - Vec2::new(0.0, -400.0)).length() < 1e-3);
        assert_eq!(proj.radius, 2.0);
    }

    #[test]
    fn fire_cadence_matches_elapsed_over_cooldown() {
        // dt divides the cooldown exactly, so no remainder is lost to the
        // timer reset and count == floor(elapsed / cooldown) while nothing
        // has left the screen yet.
        let mut spawner = test_spawner();
        let dt = 0.025;
        for _ in 0..20 {
            spawner.update(dt, ORIGIN, 0.0, true);
        }
        let elapsed = 20.0 * dt; // 0.5 s; fastest projectile has flown 190 px
        assert_eq!(
            spawner.projectiles().len(),
            (elapsed / 0.05).floor() as usize
        );
    }

    #[test]
    fn only_one_spawn_per_frame_even_after_a_long_stall() {
        let mut spawner = test_spawner();
        // One big step worth four cooldown intervals still emits one round.
        spawner.update(0.2, ORIGIN, 90.0, true);
        assert_eq!(spawner.projectiles().len(), 1);
    }

    #[test]
    fn inactive_fire_spawns_nothing_but_arms_the_timer() {
        let mut spawner = test_spawner();
        for _ in 0..10 {
            spawner.update(0.05, ORIGIN, 0.0, false);
        }
        assert!(spawner.projectiles().is_empty());
        assert!(!spawner.is_attack_active());

        // The accumulated timer means the first active frame fires at once.
        spawner.update(0.001, ORIGIN, 0.0, true);
        assert_eq!(spawner.projectiles().len(), 1);
    }

    #[test]
    fn projectile_velocity_is_constant_after_spawn() {
        let mut spawner = test_spawner();
        spawner.update(0.05, ORIGIN, 90.0, true); // east
        let v0 = spawner.projectiles()[0].velocity;
        let p0 = spawner.projectiles()[0].position;

        spawner.update(0.1, ORIGIN, 270.0, false);
        let proj = spawner.projectiles()[0];
        assert_eq!(proj.velocity, v0);
        assert!((proj.position - (p0 + v0 * 0.1)).length() < 1e-3);
    }

    #[test]
    fn edge_position_survives_strictly_outside_does_not() {
        let mut spawner = test_spawner();
        spawner.set_projectile_speed(100.0);
        // Fire east from just inside the right edge.
        spawner.update(0.05, Vec2::new(795.0, 300.0), 90.0, true);
        // 795 + 100·0.05 = 800: exactly on the bound, still alive.
        assert_eq!(spawner.projectiles().len(), 1);
        assert!((spawner.projectiles()[0].position.x - 800.0).abs() < 1e-3);

        // The very next update pushes it strictly past the bound.
        spawner.update(0.05, Vec2::new(795.0, 300.0), 90.0, false);
        assert!(spawner.projectiles().is_empty());
    }

    #[test]
    fn cull_uses_current_bounds_not_spawn_time_bounds() {
        let mut spawner = test_spawner();
        spawner.update(0.05, Vec2::new(700.0, 300.0), 90.0, true);
        assert_eq!(spawner.projectiles().len(), 1);

        // Shrink the screen: the projectile at x = 720 is now outside.
        spawner.set_screen_bounds(Vec2::new(640.0, 480.0));
        spawner.update(0.0, Vec2::new(700.0, 300.0), 90.0, false);
        assert!(spawner.projectiles().is_empty());
    }

    #[test]
    fn sustained_fire_count_is_bounded_by_the_cull_pass() {
        // Firing screen-up from the centre: 300 px to the edge at 400 px/s
        // is 0.75 s of flight; at one round per 0.05 s the pool must level
        // out near 15 and stay there indefinitely.
        let mut spawner = test_spawner();
        let mut peak = 0usize;
        for frame in 0..2000 {
            spawner.update(0.05, ORIGIN, 0.0, true);
            peak = peak.max(spawner.projectiles().len());
            if frame > 100 {
                assert!(
                    spawner.projectiles().len() <= 16,
                    "pool grew unboundedly: {} live at frame {}",
                    spawner.projectiles().len(),
                    frame
                );
            }
        }
        assert!(peak >= 14, "expected a full corridor of rounds, peak {peak}");
    }

    #[test]
    fn negative_speed_fires_backwards_and_still_culls() {
        let mut spawner = test_spawner();
        spawner.set_projectile_speed(-400.0);
        spawner.update(0.05, ORIGIN, 0.0, true);
        // Heading up with negative speed: the round moves down.
        assert!(spawner.projectiles()[0].velocity.y > 0.0);

        for _ in 0..20 {
            spawner.update(0.05, ORIGIN, 0.0, false);
        }
        assert!(spawner.projectiles().is_empty(), "must exit the bottom edge");
    }

    #[test]
    fn setters_clamp_at_the_boundary() {
        let mut spawner = test_spawner();

        spawner.set_projectile_size(0.0);
        assert_eq!(spawner.projectile_size(), MIN_PROJECTILE_SIZE);
        spawner.set_projectile_size(5.0);
        assert_eq!(spawner.projectile_size(), 5.0);

        spawner.set_shoot_cooldown(0.0);
        assert_eq!(spawner.shoot_cooldown(), MIN_SHOOT_COOLDOWN_S);
        spawner.set_shoot_cooldown(0.5);
        assert_eq!(spawner.shoot_cooldown(), 0.5);

        // Speed is unclamped by design.
        spawner.set_projectile_speed(-123.0);
        assert_eq!(spawner.projectile_speed(), -123.0);
    }
}
