//! Per-frame simulation step
//!
//! Order within a frame:
//! 1. pointer input (spawn, select, drag)
//! 2. motion for every entity
//! 3. one collision pass over the moved positions
//! 4. trace recording of the final positions
//! 5. removals requested this frame

use glam::Vec2;

use super::collision::CollisionStats;
use super::entity::EntityId;
use super::world::World;

/// Input for a single frame, already decoded by the host
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in window coordinates
    pub cursor: Option<Vec2>,
    /// Primary button went down this frame
    pub click: bool,
    /// Secondary button went down this frame (remove under cursor)
    pub right_click: bool,
    /// Primary button is held
    pub drag: bool,
    /// Add a new entity
    pub spawn: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub collisions: CollisionStats,
    pub removed: Vec<EntityId>,
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> FrameReport {
    if input.spawn {
        world.spawn();
    }

    if let Some(cursor) = input.cursor {
        if input.click {
            world.select_at(cursor);
        }
        handle_drag(world, cursor, input.drag);
    } else if !input.drag {
        world.release_drag();
    }

    world.step_motion(dt);
    let collisions = world.resolve_collisions();
    world.record_traces();

    let removed = match input.cursor {
        Some(cursor) if input.right_click => world.remove_at(cursor),
        _ => Vec::new(),
    };

    FrameReport { collisions, removed }
}

/// Grab the selected entity when the press starts on it, follow the cursor
/// while held, release on button up
fn handle_drag(world: &mut World, cursor: Vec2, held: bool) {
    if !held {
        world.release_drag();
        return;
    }
    let Some(id) = world.selected() else {
        return;
    };
    let grabbed = match world.get(id) {
        Some(entity) => entity.dragged || entity.contains(cursor),
        None => false,
    };
    if grabbed {
        world.set_dragged(id, true);
        world.drag_to(id, cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::BounceMode;

    const DT: f32 = 1.0 / 144.0;

    fn world() -> World {
        World::new(&Settings::default())
    }

    #[test]
    fn test_tick_spawn_and_trace() {
        let mut w = world();
        let input = TickInput {
            spawn: true,
            ..Default::default()
        };
        tick(&mut w, &input, DT);
        assert_eq!(w.entities.len(), 1);
        tick(&mut w, &TickInput::default(), DT);
        assert_eq!(w.entities[0].trace().len(), 2);
        assert_eq!(w.entities[0].trace().newest(), Some(w.entities[0].pos));
    }

    #[test]
    fn test_collision_runs_after_motion() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        w.collision_margin = 0.0;
        for (id, x, dir) in [(a, 100.0, 1.0), (b, 145.0, -1.0)] {
            w.edit(id, |e| {
                e.pos = Vec2::new(x, 200.0);
                e.free.direction = Vec2::new(dir, 0.0);
                e.free.speed = 144.0;
                e.free.bounce = BounceMode::RealisticReflect;
            });
        }
        // 45px apart with r=25 each: the frame's move makes it 43px, then collides
        let report = tick(&mut w, &TickInput::default(), DT);
        assert_eq!(report.collisions.entity_contacts, 1);
        let (ea, eb) = (w.get(a).expect("a"), w.get(b).expect("b"));
        assert!(ea.pos.distance(eb.pos) >= 50.0 - 1e-3);
        assert!(ea.free.direction.x < 0.0);
        assert!(eb.free.direction.x > 0.0);
        // Trace holds the corrected position, not the pre-collision one
        assert_eq!(ea.trace().newest(), Some(ea.pos));
    }

    #[test]
    fn test_click_selects_and_right_click_removes() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        w.edit(b, |e| {
            e.pos = Vec2::new(100.0, 100.0);
            e.flags.free_motion = false;
        });
        let click = TickInput {
            cursor: Some(Vec2::new(100.0, 100.0)),
            click: true,
            drag: true,
            ..Default::default()
        };
        tick(&mut w, &click, DT);
        assert_eq!(w.selected(), Some(b));

        let remove = TickInput {
            cursor: Some(Vec2::new(100.0, 100.0)),
            right_click: true,
            ..Default::default()
        };
        let report = tick(&mut w, &remove, DT);
        assert_eq!(report.removed, vec![b]);
        assert_eq!(w.selected(), Some(a));
    }

    #[test]
    fn test_drag_moves_selected_and_suppresses_motion() {
        let mut w = world();
        let a = w.spawn();
        let start = w.get(a).map(|e| e.pos).expect("a");
        let press = TickInput {
            cursor: Some(start),
            click: true,
            drag: true,
            ..Default::default()
        };
        tick(&mut w, &press, DT);
        assert!(w.get(a).is_some_and(|e| e.dragged));

        let target = Vec2::new(200.0, 200.0);
        let hold = TickInput {
            cursor: Some(target),
            drag: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut w, &hold, DT);
        }
        assert_eq!(w.get(a).map(|e| e.pos), Some(target));

        let release = TickInput {
            cursor: Some(target),
            ..Default::default()
        };
        tick(&mut w, &release, DT);
        assert!(w.get(a).is_some_and(|e| !e.dragged && e.pos != target));
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            initial_entities: 6,
            ..Default::default()
        };
        let mut w1 = World::from_settings(&settings);
        let mut w2 = World::from_settings(&settings);
        for _ in 0..500 {
            tick(&mut w1, &TickInput::default(), DT);
            tick(&mut w2, &TickInput::default(), DT);
        }
        for (a, b) in w1.entities.iter().zip(&w2.entities) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.free.direction, b.free.direction);
        }
    }

    #[test]
    fn test_long_run_stays_finite() {
        let settings = Settings {
            initial_entities: 8,
            ..Default::default()
        };
        let mut w = World::from_settings(&settings);
        w.segments.add_stroke(&[Vec2::new(100.0, 500.0), Vec2::new(600.0, 500.0)]);
        for _ in 0..2000 {
            tick(&mut w, &TickInput::default(), DT);
        }
        for e in &w.entities {
            assert!(e.pos.is_finite(), "non-finite position {}", e.pos);
            assert!(e.free.direction.is_finite());
            assert_eq!(e.trace().len(), 1000);
        }
    }
}
