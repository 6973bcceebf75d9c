//! Circle Sandbox - disks moving on a 2D plane
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion modes, boundary bounce, collisions)
//! - `settings`: Tunable configuration, loadable from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default window size in pixels
    pub const DEFAULT_BOUNDS: (f32, f32) = (1020.0, 720.0);
    /// Area reserved on the right/bottom for the property panel
    pub const DEFAULT_UI_MARGIN: (f32, f32) = (250.0, 0.0);
    /// Default frame rate of the host loop
    pub const DEFAULT_FPS: f32 = 144.0;

    /// Visual half-extent of an entity, also its collision radius
    pub const ENTITY_RADIUS: f32 = 25.0;
    /// Added to the sum of radii in every overlap test (negative = allow overlap)
    pub const DEFAULT_COLLISION_MARGIN: f32 = -2.0;

    /// Maximum number of positions kept in a trace
    pub const TRACE_CAPACITY: usize = 1000;

    /// Circling defaults
    pub const CIRCLE_RADIUS: f32 = 100.0;
    pub const CIRCLE_ANGULAR_VELOCITY: f32 = 2.0;

    /// Wave (oscillation) defaults
    pub const WAVE_AMPLITUDE: f32 = 50.0;
    pub const WAVE_FREQUENCY: f32 = 1.0;

    /// Simple harmonic motion defaults
    pub const HARMONIC_AMPLITUDE: f32 = 200.0;
    pub const HARMONIC_FREQUENCY: f32 = 1.0;

    /// Free motion speed in pixels/s
    pub const FREE_SPEED: f32 = 250.0;

    /// Debug vectors are drawn this long
    pub const DEBUG_VECTOR_LENGTH: f32 = 500.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Unit vector pointing at `angle`, measured clockwise from "up" in screen space
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}
