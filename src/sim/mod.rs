//! Frame-stepped simulation module
//!
//! All motion and collision logic lives here. This module must stay
//! deterministic and free of rendering/platform dependencies:
//! - Caller-supplied frame timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster order)

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod motion;
pub mod segments;
pub mod tick;
pub mod trace;
pub mod world;

pub use bounds::Arena;
pub use collision::{
    CollisionStats, CollisionSystem, Contact, DebugVector, DebugVectorKind, circle_contact,
    circles_overlap, reflect_velocity,
};
pub use entity::{
    BounceMode, CircularParams, DisplayOptions, Entity, EntityId, FreeMotion, HarmonicParams,
    MotionFlags, WaveParams,
};
pub use segments::SegmentSet;
pub use tick::{FrameReport, TickInput, tick};
pub use trace::Trace;
pub use world::World;
