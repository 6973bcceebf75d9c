//! Overlap detection and response
//!
//! Runs once per frame after every entity has moved. Pairs are scanned in
//! roster order and corrections are applied in place, so later pairs see
//! the already-corrected positions of earlier ones. Each outer entity
//! resolves at most one contact per frame.

use glam::Vec2;

use super::bounds::Arena;
use super::entity::{BounceMode, Entity, EntityId};
use super::segments::SegmentSet;
use crate::consts::DEBUG_VECTOR_LENGTH;

/// Result of an overlap check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Whether the shapes overlap (within the margin)
    pub hit: bool,
    /// Unit vector from the other shape toward this one
    pub normal: Vec2,
    /// How far to push apart until they just touch
    pub penetration: f32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Whether two circles count as overlapping
///
/// `margin` is added to the sum of radii; negative values tolerate that much
/// interpenetration before reporting a hit.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, margin: f32) -> bool {
    a.distance(b) < ra + rb + margin
}

/// Contact between circle `a` and circle `b`, normal pointing from `b` to `a`
///
/// Coincident centers give no usable normal and are reported as a miss.
pub fn circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32, margin: f32) -> Contact {
    let delta = a - b;
    let distance = delta.length();
    if distance >= ra + rb + margin {
        return Contact::miss();
    }
    if distance <= f32::EPSILON {
        log::warn!("coincident centers at {a}, skipping collision response");
        return Contact::miss();
    }
    // A positive margin widens the separation target too
    let contact_distance = ra + rb + margin.max(0.0);
    Contact {
        hit: true,
        normal: delta / distance,
        penetration: contact_distance - distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// New free-motion direction after a contact with the given normal
#[inline]
pub fn bounce_direction(mode: BounceMode, direction: Vec2, normal: Vec2) -> Vec2 {
    match mode {
        BounceMode::None => direction,
        BounceMode::SimpleInvert => -direction,
        BounceMode::RealisticReflect => reflect_velocity(direction, normal),
    }
}

/// What a debug vector illustrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugVectorKind {
    /// Contact normal
    Separation,
    /// Direction after the bounce
    Direction,
    /// The bounced direction reflected once more, for comparison
    Reflected,
}

impl DebugVectorKind {
    /// RGBA draw color
    pub fn color(&self) -> [f32; 4] {
        match self {
            DebugVectorKind::Separation => [0.0, 0.5, 0.0, 1.0],
            DebugVectorKind::Direction => [0.0, 0.0, 1.0, 1.0],
            DebugVectorKind::Reflected => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Line to draw for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugVector {
    pub origin: Vec2,
    pub direction: Vec2,
    pub length: f32,
    pub color: [f32; 4],
    pub kind: DebugVectorKind,
}

impl DebugVector {
    fn new(origin: Vec2, direction: Vec2, kind: DebugVectorKind) -> Self {
        Self {
            origin,
            direction,
            length: DEBUG_VECTOR_LENGTH,
            color: kind.color(),
            kind,
        }
    }
}

/// Counts from one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub entity_contacts: usize,
    pub segment_contacts: usize,
    /// Contacts whose positional correction was refused by the arena guard
    pub blocked: usize,
}

/// Per-frame overlap resolver
#[derive(Debug, Default)]
pub struct CollisionSystem {
    debug_vectors: Vec<DebugVector>,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect and resolve entity/entity then entity/segment overlaps
    ///
    /// Debug vectors left over from the previous frame are dropped first.
    pub fn update(
        &mut self,
        entities: &mut [Entity],
        segments: &SegmentSet,
        margin: f32,
        arena: &Arena,
        selected: Option<EntityId>,
    ) -> CollisionStats {
        self.debug_vectors.clear();
        let mut stats = CollisionStats::default();

        let n = entities.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let (a, b) = (&entities[i], &entities[j]);
                if !circles_overlap(a.pos, a.radius(), b.pos, b.radius(), margin) {
                    continue;
                }
                let (head, tail) = entities.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if let Some(moved) = self.resolve_pair(a, b, margin, arena, selected) {
                    stats.entity_contacts += 1;
                    if !moved {
                        stats.blocked += 1;
                    }
                }
                break;
            }
        }

        if !segments.is_empty() {
            for entity in entities.iter_mut() {
                let hit = segments
                    .points()
                    .iter()
                    .copied()
                    .find(|&p| circles_overlap(entity.pos, entity.radius(), p, 0.0, margin));
                if let Some(point) = hit {
                    if let Some(moved) = self.resolve_segment(entity, point, margin, arena, selected) {
                        stats.segment_contacts += 1;
                        if !moved {
                            stats.blocked += 1;
                        }
                    }
                }
            }
        }

        if stats.entity_contacts + stats.segment_contacts > 0 {
            log::debug!(
                "collisions: {} entity, {} segment, {} blocked",
                stats.entity_contacts,
                stats.segment_contacts,
                stats.blocked
            );
        }
        stats
    }

    /// Push two overlapping entities apart and bounce their directions
    ///
    /// Returns None if there was nothing to resolve, otherwise whether the
    /// positions were corrected.
    fn resolve_pair(
        &mut self,
        a: &mut Entity,
        b: &mut Entity,
        margin: f32,
        arena: &Arena,
        selected: Option<EntityId>,
    ) -> Option<bool> {
        let contact = circle_contact(a.pos, a.radius(), b.pos, b.radius(), margin);
        if !contact.hit {
            return None;
        }
        let n = contact.normal;

        let mut moved = false;
        if a.free.separates() || b.free.separates() {
            let push = n * (contact.penetration / 2.0);
            let (new_a, new_b) = (a.pos + push, b.pos - push);
            if !arena.is_outside(new_a, a.origin()) && !arena.is_outside(new_b, b.origin()) {
                a.pos = new_a;
                b.pos = new_b;
                moved = true;
            } else {
                log::debug!("separation of {} and {} would leave the arena", a.name, b.name);
            }
        }

        a.free.direction = bounce_direction(a.free.bounce, a.free.direction, n);
        b.free.direction = bounce_direction(b.free.bounce, b.free.direction, -n);

        if selected == Some(a.id()) {
            self.push_debug(a.pos, n, a.free.direction);
        } else if selected == Some(b.id()) {
            self.push_debug(b.pos, -n, b.free.direction);
        }
        Some(moved)
    }

    /// Push an entity off a fixed obstacle point
    fn resolve_segment(
        &mut self,
        entity: &mut Entity,
        point: Vec2,
        margin: f32,
        arena: &Arena,
        selected: Option<EntityId>,
    ) -> Option<bool> {
        let contact = circle_contact(entity.pos, entity.radius(), point, 0.0, margin);
        if !contact.hit {
            return None;
        }
        let n = contact.normal;

        let mut moved = false;
        if entity.free.separates() {
            let new_pos = entity.pos + n * contact.penetration;
            if !arena.is_outside(new_pos, entity.origin()) {
                entity.pos = new_pos;
                moved = true;
            }
        }

        entity.free.direction = bounce_direction(entity.free.bounce, entity.free.direction, n);

        if selected == Some(entity.id()) {
            self.push_debug(entity.pos, n, entity.free.direction);
        }
        Some(moved)
    }

    fn push_debug(&mut self, origin: Vec2, normal: Vec2, direction: Vec2) {
        self.debug_vectors.extend([
            DebugVector::new(origin, normal, DebugVectorKind::Separation),
            DebugVector::new(origin, direction, DebugVectorKind::Direction),
            DebugVector::new(origin, reflect_velocity(direction, normal), DebugVectorKind::Reflected),
        ]);
    }

    /// Debug vectors from the last pass
    pub fn debug_vectors(&self) -> &[DebugVector] {
        &self.debug_vectors
    }

    /// Hand the debug vectors to the renderer, leaving none behind
    pub fn take_debug_vectors(&mut self) -> Vec<DebugVector> {
        std::mem::take(&mut self.debug_vectors)
    }
}
