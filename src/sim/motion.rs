//! Per-frame kinematics
//!
//! Active modes are applied in a fixed order, each stage seeing the result
//! of the previous one:
//!
//! 1. circling sets the position absolutely on the circle
//! 2. harmonic motion sets the position absolutely on its line
//! 3. wave-X adds an offset on X
//! 4. wave-Y adds an offset on Y
//! 5. free motion adds `direction * speed * dt`, then bounces off the walls
//!
//! The shared `angle` only advances while circling. The wave stages read it,
//! so with circling off they add a constant offset (zero from a fresh angle).

use glam::Vec2;

use super::bounds::Arena;
use super::entity::{CircularParams, Entity, HarmonicParams, WaveParams};
use crate::polar_to_cartesian;

/// Signed multiplier for every accumulator this frame
#[inline]
pub fn direction_sign(entity: &Entity) -> f32 {
    let magnitude = entity.velocity_multiplier.abs();
    if entity.flags.counter_clockwise {
        -magnitude
    } else {
        magnitude
    }
}

/// Point on the circle at `angle`
#[inline]
pub fn circle_position(params: &CircularParams, angle: f32) -> Vec2 {
    params.center + polar_to_cartesian(params.radius, angle)
}

/// Harmonic position at the params' current phase
///
/// The Y axis feeds `direction.y` into the sine instead of scaling its
/// result. Existing motion presets depend on this, keep it.
#[inline]
pub fn harmonic_position(params: &HarmonicParams) -> Vec2 {
    let wt = params.frequency * params.phase;
    Vec2::new(
        params.origin.x + params.amplitude * wt.sin() * params.direction.x,
        params.origin.y + params.amplitude * (wt * params.direction.y).sin(),
    )
}

/// Offset added by a wave stage
#[inline]
pub fn wave_offset(params: &WaveParams, angle: f32) -> f32 {
    params.amplitude * (params.frequency * angle).sin()
}

/// Advance one entity by `dt` seconds
///
/// Dragged entities don't move on their own. `dt` must be finite and
/// non-negative.
pub fn advance(entity: &mut Entity, dt: f32, arena: &Arena) {
    debug_assert!(dt.is_finite() && dt >= 0.0, "invalid frame dt: {dt}");
    if entity.dragged {
        return;
    }

    let sign = direction_sign(entity);

    if entity.flags.circling {
        entity.angle += sign * entity.circular.angular_velocity * dt;
        entity.pos = circle_position(&entity.circular, entity.angle);
    }

    if entity.flags.harmonic {
        entity.harmonic.phase += sign * dt;
        entity.pos = harmonic_position(&entity.harmonic);
    }

    if entity.flags.wave_x {
        entity.pos.x += wave_offset(&entity.wave, entity.angle);
    }

    if entity.flags.wave_y {
        entity.pos.y += wave_offset(&entity.wave, entity.angle);
    }

    if entity.flags.free_motion {
        entity.pos += entity.free.direction * entity.free.speed * dt * sign;
        let origin = entity.origin();
        arena.bounce(entity.pos, origin, &mut entity.free.direction);
    }
}
