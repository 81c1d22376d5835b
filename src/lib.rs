//! Driftfire — a minimal 2D arcade shooter.
//!
//! A triangle ship rotates and thrusts around a bounded screen and fires
//! projectiles along its facing angle. The crate is organised as thin Bevy
//! systems over plain, unit-testable simulation types:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`constants`] | Compile-time tunable defaults |
//! | [`config`] | `TuningConfig` resource + `assets/tuning.toml` loading |
//! | [`error`] | Startup error types |
//! | [`graphics`] | Font loading (fatal on failure) + camera |
//! | [`input`] | Level/edge control flags from raw key samples |
//! | [`simulation`] | Frame ordering, screen bounds, debounce timers |
//! | [`player`] | Ship kinematics, movement systems, rendering |
//! | [`attack`] | Projectile spawner, flight, bounds culling |
//! | [`menu`] | Pause/settings state machines + overlay UI |
//! | [`debug_panel`] | Telemetry readout, compasses, tuning sliders |

pub mod attack;
pub mod config;
pub mod constants;
pub mod debug_panel;
pub mod error;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod player;
pub mod simulation;
