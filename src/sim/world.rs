//! Entity roster and world-level operations
//!
//! All simulation state lives here: the entities (iterated in spawn order),
//! the arena, the collision margin, the drawn obstacles and the selection.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::Arena;
use super::collision::{CollisionStats, CollisionSystem, DebugVector, circles_overlap};
use super::entity::{Entity, EntityId};
use super::segments::SegmentSet;
use crate::settings::{MotionDefaults, Settings};

/// The simulated world
#[derive(Debug)]
pub struct World {
    /// Entities in spawn order; this is also collision detection order
    pub entities: Vec<Entity>,
    pub arena: Arena,
    /// Added to the sum of radii in every overlap test
    pub collision_margin: f32,
    /// Obstacles from the drawing tool
    pub segments: SegmentSet,
    pub entity_radius: f32,
    pub motion_defaults: MotionDefaults,
    selected: Option<EntityId>,
    collisions: CollisionSystem,
    rng: Pcg32,
    next_id: EntityId,
}

impl World {
    /// Empty world with the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            entities: Vec::new(),
            arena: settings.arena(),
            collision_margin: settings.collision_margin,
            segments: SegmentSet::new(),
            entity_radius: settings.entity_radius,
            motion_defaults: settings.motion,
            selected: None,
            collisions: CollisionSystem::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 0,
        }
    }

    /// World pre-populated with `settings.initial_entities` entities
    pub fn from_settings(settings: &Settings) -> Self {
        let mut world = Self::new(settings);
        for _ in 0..settings.initial_entities {
            world.spawn();
        }
        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an entity at the arena center
    ///
    /// The first entity starts at phase zero, later ones at a random phase.
    /// The first entity spawned into an unselected world becomes selected.
    pub fn spawn(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let phase = if self.entities.is_empty() {
            0.0
        } else {
            self.rng.random::<f32>() * std::f32::consts::TAU
        };
        let mut entity = Entity::spawn(id, &self.arena, self.entity_radius, phase, &mut self.rng);
        let d = self.motion_defaults;
        entity.circular.radius = d.circle_radius;
        entity.circular.angular_velocity = d.circle_angular_velocity;
        entity.wave.amplitude = d.wave_amplitude;
        entity.wave.frequency = d.wave_frequency;
        entity.harmonic.amplitude = d.harmonic_amplitude;
        entity.harmonic.frequency = d.harmonic_frequency;
        entity.free.speed = d.free_speed;
        self.entities.push(entity);
        log::info!("Spawned entity {} ({} total)", id, self.entities.len());

        if self.selected.is_none() {
            self.select(id);
        }
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_entity_mut(&mut self) -> Option<&mut Entity> {
        let id = self.selected?;
        self.get_mut(id)
    }

    /// Make `id` the only selected entity; false if it doesn't exist
    pub fn select(&mut self, id: EntityId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for entity in &mut self.entities {
            entity.selected = entity.id() == id;
        }
        self.selected = Some(id);
        true
    }

    /// Select the topmost (last spawned) entity under `point`
    pub fn select_at(&mut self, point: Vec2) -> Option<EntityId> {
        let id = self.entities.iter().rev().find(|e| e.contains(point))?.id();
        self.select(id);
        Some(id)
    }

    /// Remove an entity
    ///
    /// Removing the selected entity first promotes a uniformly random
    /// survivor, so the selection never dangles.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        let removed = self.entities.remove(index);

        if self.selected == Some(id) {
            self.selected = None;
            if !self.entities.is_empty() {
                let pick = self.rng.random_range(0..self.entities.len());
                let next = self.entities[pick].id();
                self.select(next);
            }
        }
        log::info!("Removed entity {} ({} left)", id, self.entities.len());
        Some(removed)
    }

    /// Remove every entity under `point`
    pub fn remove_at(&mut self, point: Vec2) -> Vec<EntityId> {
        let hits: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.contains(point))
            .map(|e| e.id())
            .collect();
        for &id in &hits {
            self.remove(id);
        }
        hits
    }

    /// Mark an entity as grabbed (or released) by the pointer
    pub fn set_dragged(&mut self, id: EntityId, dragged: bool) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.dragged = dragged;
                true
            }
            None => false,
        }
    }

    /// Release every dragged entity
    pub fn release_drag(&mut self) {
        for entity in &mut self.entities {
            entity.dragged = false;
        }
    }

    /// Move a dragged entity to `cursor` unless it would overlap another entity
    ///
    /// Uses the same overlap test as the collision pass.
    pub fn drag_to(&mut self, id: EntityId, cursor: Vec2) -> bool {
        let Some(entity) = self.get(id) else {
            return false;
        };
        if !entity.dragged {
            return false;
        }
        let radius = entity.radius();
        let margin = self.collision_margin;
        let blocked = self
            .entities
            .iter()
            .filter(|other| other.id() != id)
            .any(|other| circles_overlap(cursor, radius, other.pos, other.radius(), margin));
        if blocked {
            return false;
        }
        if let Some(entity) = self.get_mut(id) {
            entity.pos = cursor;
        }
        true
    }

    /// Apply an edit to one entity and restart its trace
    pub fn edit<F: FnOnce(&mut Entity)>(&mut self, id: EntityId, f: F) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                f(entity);
                entity.clear_trace();
                true
            }
            None => false,
        }
    }

    /// Apply the same edit to every entity
    pub fn apply_to_all<F: FnMut(&mut Entity)>(&mut self, mut f: F) {
        for entity in &mut self.entities {
            f(entity);
            entity.clear_trace();
        }
    }

    /// The window was resized
    pub fn resize(&mut self, bounds: Vec2) {
        self.arena.bounds = bounds;
        log::info!("Arena resized to {}x{}", bounds.x, bounds.y);
    }

    /// Advance every entity's motion by `dt`
    pub fn step_motion(&mut self, dt: f32) {
        for entity in &mut self.entities {
            entity.advance(dt, &self.arena);
        }
    }

    /// Run one collision pass over the current positions
    pub fn resolve_collisions(&mut self) -> CollisionStats {
        self.collisions.update(
            &mut self.entities,
            &self.segments,
            self.collision_margin,
            &self.arena,
            self.selected,
        )
    }

    /// Record every entity's current position in its trace
    pub fn record_traces(&mut self) {
        for entity in &mut self.entities {
            entity.record_history();
        }
    }

    pub fn clear_traces(&mut self) {
        for entity in &mut self.entities {
            entity.clear_trace();
        }
    }

    /// Debug vectors from the last collision pass
    pub fn debug_vectors(&self) -> &[DebugVector] {
        self.collisions.debug_vectors()
    }

    /// Hand this frame's debug vectors to the renderer
    pub fn take_debug_vectors(&mut self) -> Vec<DebugVector> {
        self.collisions.take_debug_vectors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(&Settings::default())
    }

    #[test]
    fn test_spawn_assigns_ids_and_selects_first() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        assert_ne!(a, b);
        assert_eq!(w.selected(), Some(a));
        assert!(w.get(a).is_some_and(|e| e.selected));
        assert!(w.get(b).is_some_and(|e| !e.selected));
        assert_eq!(w.get(a).map(|e| e.harmonic.phase), Some(0.0));
    }

    #[test]
    fn test_spawn_uses_motion_defaults() {
        let mut settings = Settings::default();
        settings.motion.free_speed = 42.0;
        settings.motion.circle_radius = 7.0;
        settings.entity_radius = 12.0;
        let mut w = World::new(&settings);
        let id = w.spawn();
        let e = w.get(id).expect("spawned");
        assert_eq!(e.free.speed, 42.0);
        assert_eq!(e.circular.radius, 7.0);
        assert_eq!(e.radius(), 12.0);
    }

    #[test]
    fn test_from_settings_spawns_initial_entities() {
        let settings = Settings {
            initial_entities: 3,
            ..Default::default()
        };
        assert_eq!(World::from_settings(&settings).entities.len(), 3);
    }

    #[test]
    fn test_remove_selected_promotes_survivor() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        let c = w.spawn();
        assert_eq!(w.selected(), Some(a));
        assert!(w.remove(a).is_some());
        let sel = w.selected().expect("promoted");
        assert!(sel == b || sel == c);
        assert_eq!(w.entities.iter().filter(|e| e.selected).count(), 1);
        assert!(w.get(a).is_none());
    }

    #[test]
    fn test_remove_last_entity_clears_selection() {
        let mut w = world();
        let a = w.spawn();
        w.remove(a);
        assert_eq!(w.selected(), None);
        assert!(w.remove(a).is_none());
    }

    #[test]
    fn test_remove_unselected_keeps_selection() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        w.remove(b);
        assert_eq!(w.selected(), Some(a));
    }

    #[test]
    fn test_select_at_and_remove_at() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        if let Some(e) = w.get_mut(b) {
            e.pos = Vec2::new(100.0, 100.0);
        }
        assert_eq!(w.select_at(Vec2::new(105.0, 95.0)), Some(b));
        assert!(w.get(b).is_some_and(|e| e.selected));
        assert!(w.get(a).is_some_and(|e| !e.selected));
        assert_eq!(w.select_at(Vec2::new(5.0, 5.0)), None);

        assert_eq!(w.remove_at(Vec2::new(100.0, 100.0)), vec![b]);
        assert_eq!(w.selected(), Some(a));
    }

    #[test]
    fn test_drag_is_blocked_by_overlap() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        if let Some(e) = w.get_mut(b) {
            e.pos = Vec2::new(300.0, 300.0);
        }
        // Not dragged yet
        assert!(!w.drag_to(a, Vec2::new(100.0, 100.0)));
        assert!(w.set_dragged(a, true));
        assert!(w.drag_to(a, Vec2::new(100.0, 100.0)));
        assert_eq!(w.get(a).map(|e| e.pos), Some(Vec2::new(100.0, 100.0)));
        // 30px from b with radius 25 each: overlapping
        assert!(!w.drag_to(a, Vec2::new(330.0, 300.0)));
        assert_eq!(w.get(a).map(|e| e.pos), Some(Vec2::new(100.0, 100.0)));
        w.release_drag();
        assert!(w.get(a).is_some_and(|e| !e.dragged));
    }

    #[test]
    fn test_edit_and_apply_to_all_clear_traces() {
        let mut w = world();
        let a = w.spawn();
        w.spawn();
        w.record_traces();
        assert!(w.edit(a, |e| e.flags.circling = true));
        assert!(w.get(a).is_some_and(|e| e.trace().is_empty() && e.flags.circling));
        w.record_traces();
        w.apply_to_all(|e| e.free.speed = 10.0);
        assert!(w.entities.iter().all(|e| e.free.speed == 10.0 && e.trace().is_empty()));
    }

    #[test]
    fn test_resize_changes_arena() {
        let mut w = world();
        w.resize(Vec2::new(640.0, 480.0));
        assert_eq!(w.arena.bounds, Vec2::new(640.0, 480.0));
        assert_eq!(w.arena.ui_margin, Vec2::new(250.0, 0.0));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut w1 = world();
        let mut w2 = world();
        for _ in 0..4 {
            w1.spawn();
            w2.spawn();
        }
        for (a, b) in w1.entities.iter().zip(&w2.entities) {
            assert_eq!(a.free.direction, b.free.direction);
            assert_eq!(a.harmonic.phase, b.harmonic.phase);
        }
    }
}
