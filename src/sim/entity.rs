//! Simulated disks and their per-mode motion parameters
//!
//! Every tunable here is a plain public field: the property panel reads and
//! writes them directly and is responsible for its own validation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::Arena;
use super::motion;
use super::trace::Trace;
use crate::consts::*;
use crate::direction_from_angle;

/// Stable entity identifier, assigned by the world
pub type EntityId = u32;

/// How the free-motion direction reacts to a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BounceMode {
    /// Direction is left alone
    None,
    /// Direction is negated
    SimpleInvert,
    /// Direction is mirrored about the contact normal
    #[default]
    RealisticReflect,
}

/// Which motion models are active
///
/// Not mutually exclusive. See [`motion::advance`] for how overlapping
/// modes combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionFlags {
    pub circling: bool,
    pub harmonic: bool,
    pub wave_x: bool,
    pub wave_y: bool,
    /// Direction-vector driven movement with wall bounce
    pub free_motion: bool,
    /// Runs every accumulator and increment backwards
    pub counter_clockwise: bool,
}

impl Default for MotionFlags {
    fn default() -> Self {
        Self {
            circling: false,
            harmonic: false,
            wave_x: false,
            wave_y: false,
            free_motion: true,
            counter_clockwise: false,
        }
    }
}

/// Per-entity overlays the renderer draws; no effect on the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub draw_trace: bool,
    /// Center point plus the thread to the circling center
    pub draw_center_point: bool,
    /// Readout of [`Entity::sin_cos`]
    pub draw_sin_cos: bool,
}

/// Uniform circular motion around `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularParams {
    pub center: Vec2,
    pub radius: f32,
    /// Radians per second
    pub angular_velocity: f32,
}

/// Simple harmonic motion along `direction` through `origin`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub origin: Vec2,
    pub phase: f32,
    pub direction: Vec2,
}

/// Sinusoidal offset added on top of the other modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: WAVE_AMPLITUDE,
            frequency: WAVE_FREQUENCY,
        }
    }
}

/// Free ("gravity") motion state and collision response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeMotion {
    /// Unit travel direction
    pub direction: Vec2,
    /// Pixels per second
    pub speed: f32,
    pub bounce: BounceMode,
    /// Push apart on overlap even without reflective bounce
    pub slide_off: bool,
}

impl FreeMotion {
    pub fn new(direction: Vec2) -> Self {
        Self {
            direction,
            speed: FREE_SPEED,
            bounce: BounceMode::default(),
            slide_off: false,
        }
    }

    /// Whether overlaps involving this entity get positional correction
    #[inline]
    pub fn separates(&self) -> bool {
        self.slide_off || self.bounce == BounceMode::RealisticReflect
    }
}

/// A disk moving on the plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pub name: String,
    pub pos: Vec2,
    radius: f32,
    pub flags: MotionFlags,
    pub display: DisplayOptions,
    pub circular: CircularParams,
    pub harmonic: HarmonicParams,
    pub wave: WaveParams,
    pub free: FreeMotion,
    /// Magnitude applied to every accumulator; the sign comes from `flags.counter_clockwise`
    pub velocity_multiplier: f32,
    /// Angle shared by circling and the wave modes
    pub angle: f32,
    pub selected: bool,
    pub dragged: bool,
    #[serde(skip)]
    trace: Trace,
}

impl Entity {
    /// Entity at `pos` heading straight up, no phase, free motion only
    pub fn new(id: EntityId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            name: format!("Circle{id}"),
            pos,
            radius,
            flags: MotionFlags::default(),
            display: DisplayOptions::default(),
            circular: CircularParams {
                center: pos,
                radius: CIRCLE_RADIUS,
                angular_velocity: CIRCLE_ANGULAR_VELOCITY,
            },
            harmonic: HarmonicParams {
                amplitude: HARMONIC_AMPLITUDE,
                frequency: HARMONIC_FREQUENCY,
                origin: pos,
                phase: 0.0,
                direction: Vec2::X,
            },
            wave: WaveParams::default(),
            free: FreeMotion::new(direction_from_angle(0.0)),
            velocity_multiplier: 1.0,
            angle: 0.0,
            selected: false,
            dragged: false,
            trace: Trace::default(),
        }
    }

    /// Entity at the arena center with random harmonic and free-motion directions
    pub fn spawn<R: Rng>(id: EntityId, arena: &Arena, radius: f32, phase: f32, rng: &mut R) -> Self {
        let pos = arena.center();
        let mut entity = Self::new(id, pos, radius);
        entity.circular.center = pos;
        entity.harmonic.phase = phase;
        entity.harmonic.direction = crate::polar_to_cartesian(1.0, rng.random::<f32>() * std::f32::consts::TAU);
        entity.free.direction = direction_from_angle(rng.random::<f32>() * std::f32::consts::TAU);
        entity
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Collision radius (visual half-extent)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Half-extent on both axes, used by the boundary checks
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::splat(self.radius)
    }

    /// Whether `point` lies inside the entity's bounding square
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.pos).abs();
        d.x <= self.radius && d.y <= self.radius
    }

    /// Move for one frame according to the active motion modes
    pub fn advance(&mut self, dt: f32, arena: &Arena) {
        motion::advance(self, dt, arena);
    }

    /// Append the current position to the trace
    pub fn record_history(&mut self) {
        self.trace.push(self.pos);
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Normalized offset from the circling center: (cos, sin) while circling
    pub fn sin_cos(&self) -> (f32, f32) {
        let offset = (self.pos - self.circular.center) / self.circular.radius;
        (offset.x, offset.y)
    }
}
