//! Circle Sandbox entry point
//!
//! Headless host: loads settings, populates the world and drives the frame
//! loop at the configured rate, logging what happens.
//!
//! Usage: `circle-sandbox [settings.json] [seconds]`

use glam::Vec2;

use circle_sandbox::Settings;
use circle_sandbox::sim::{TickInput, World, tick};

/// Default simulated duration
const DEFAULT_SECONDS: f32 = 10.0;

fn main() {
    env_logger::init();
    log::info!("Circle Sandbox (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let mut world = World::from_settings(&settings);
    if world.entities.is_empty() {
        world.spawn();
    }

    // A diagonal obstacle across the usable area
    let max = world.arena.usable_max();
    world
        .segments
        .add_stroke(&[Vec2::new(max.x * 0.2, max.y * 0.8), Vec2::new(max.x * 0.8, max.y * 0.6)]);
    log::info!(
        "World ready: {} entities, {} obstacle points, margin {}",
        world.entities.len(),
        world.segments.len(),
        world.collision_margin
    );

    let dt = settings.frame_dt();
    let frames = (seconds / dt).round() as u64;
    let frames_per_second = (1.0 / dt).round().max(1.0) as u64;
    let input = TickInput::default();

    let mut contacts = 0usize;
    let mut blocked = 0usize;
    for frame in 1..=frames {
        let report = tick(&mut world, &input, dt);
        contacts += report.collisions.entity_contacts + report.collisions.segment_contacts;
        blocked += report.collisions.blocked;
        // Nothing renders them; consume so they live a single frame
        let _ = world.take_debug_vectors();

        if frame % frames_per_second == 0 {
            log::info!("t={:.1}s contacts={} blocked={}", frame as f32 * dt, contacts, blocked);
            for entity in &world.entities {
                log::debug!(
                    "  {} pos={} dir={} trace={}",
                    entity.name,
                    entity.pos,
                    entity.free.direction,
                    entity.trace().len()
                );
            }
        }
    }

    println!(
        "Simulated {frames} frames ({seconds:.1}s): {contacts} contacts, {blocked} blocked separations"
    );
    for entity in &world.entities {
        println!("{:>10} at ({:7.1}, {:7.1})", entity.name, entity.pos.x, entity.pos.y);
    }
}
