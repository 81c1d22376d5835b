//! Ship kinematic state: the integrator component and per-frame resources.
//!
//! [`KinematicBody`] is plain data with plain methods, so every kinematic
//! property (friction clamping, speed ceiling, heading re-base) is unit
//! tested without an `App`. Systems that drive it are in
//! [`super::control`]; the screen→world mirror is in [`super::rendering`].

use crate::constants::MIN_SHIP_SCALE;
use bevy::prelude::*;

/// Marker component for the player ship entity.
#[derive(Component)]
pub struct Player;

/// Degrees of rotation applied to the ship this frame.
///
/// Written by the rotation system, read by the attack system to lead the
/// firing angle by a configurable fraction of the frame's turn.
#[derive(Resource, Debug, Default)]
pub struct RotationDelta(pub f32);

/// Position, heading, and velocity integrator for the ship.
///
/// Positions are screen-space (top-left origin, +y down); headings are
/// degrees with 0° = screen-up, clockwise positive. The heading grows
/// unbounded under sustained rotation — only trig functions consume it, so
/// no wrap-around normalisation is needed.
///
/// The tunable fields are private: the debug sliders and config all go
/// through the clamped setters, which is where the floors are enforced.
#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec2,
    pub heading_deg: f32,
    pub velocity: Vec2,
    acceleration: f32,
    friction: f32,
    max_speed: f32,
    scale: f32,
}

impl KinematicBody {
    pub fn new(
        position: Vec2,
        heading_deg: f32,
        acceleration: f32,
        friction: f32,
        max_speed: f32,
        scale: f32,
    ) -> Self {
        let mut body = Self {
            position,
            heading_deg,
            velocity: Vec2::ZERO,
            acceleration: 0.0,
            friction: 0.0,
            max_speed: 0.0,
            scale: MIN_SHIP_SCALE,
        };
        // Route construction through the setters so the clamps hold from
        // the first frame.
        body.set_acceleration(acceleration);
        body.set_friction(friction);
        body.set_max_speed(max_speed);
        body.set_scale(scale);
        body
    }

    /// Accumulate thrust into the velocity.
    ///
    /// The heading is re-based by −90° so 0° points along the ship's nose
    /// (screen-up) rather than screen-east. `force` is 0.0 or 1.0 from the
    /// caller but any real value is accepted.
    pub fn apply_force(&mut self, force: f32, dt: f32, heading_deg: f32) {
        let angle = (heading_deg - 90.0).to_radians();
        self.velocity += Vec2::new(angle.cos(), angle.sin()) * force * self.acceleration * dt;
    }

    /// Advance one integration step: friction (only without forward force),
    /// speed clamp, then position update.
    ///
    /// Friction removes at most the speed that is present, so it can slow
    /// the ship to a stop but never reverse it.
    pub fn integrate(&mut self, dt: f32, force: f32) {
        if force == 0.0 && self.velocity != Vec2::ZERO {
            let speed = self.velocity.length();
            if speed > 0.0 {
                let friction_amount = (self.friction * dt).min(speed);
                self.velocity -= self.velocity / speed * friction_amount;
            }
        }

        let speed = self.velocity.length();
        if speed > self.max_speed {
            self.velocity = self.velocity / speed * self.max_speed;
        }

        self.position += self.velocity * dt;
    }

    /// Turn the ship. Positive is clockwise on screen.
    pub fn rotate(&mut self, degrees_per_sec: f32, dt: f32) {
        self.heading_deg += degrees_per_sec * dt;
    }

    // ── Tunable accessors (floors enforced here, not at use time) ─────────────

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, accel: f32) {
        self.acceleration = accel.max(0.0);
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.max(0.0);
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn set_max_speed(&mut self, speed: f32) {
        self.max_speed = speed.max(0.0);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(MIN_SHIP_SCALE);
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
