//! Simulation settings
//!
//! Stored as JSON next to the binary. Missing fields take their defaults so
//! older files keep loading.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Errors from reading or writing a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Starting motion parameters for newly spawned entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionDefaults {
    pub circle_radius: f32,
    pub circle_angular_velocity: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub harmonic_amplitude: f32,
    pub harmonic_frequency: f32,
    pub free_speed: f32,
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self {
            circle_radius: CIRCLE_RADIUS,
            circle_angular_velocity: CIRCLE_ANGULAR_VELOCITY,
            wave_amplitude: WAVE_AMPLITUDE,
            wave_frequency: WAVE_FREQUENCY,
            harmonic_amplitude: HARMONIC_AMPLITUDE,
            harmonic_frequency: HARMONIC_FREQUENCY,
            free_speed: FREE_SPEED,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Window size in pixels
    pub bounds: Vec2,
    /// Space reserved for the property panel
    pub ui_margin: Vec2,
    /// Host loop rate
    pub fps: f32,

    // === Entities ===
    /// Half-extent (and collision radius) of every entity
    pub entity_radius: f32,
    /// Entities spawned at startup
    pub initial_entities: usize,
    pub motion: MotionDefaults,

    // === Collision ===
    /// Added to the sum of radii in every overlap test
    pub collision_margin: f32,

    /// RNG seed for spawn directions and selection promotion
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: Vec2::new(DEFAULT_BOUNDS.0, DEFAULT_BOUNDS.1),
            ui_margin: Vec2::new(DEFAULT_UI_MARGIN.0, DEFAULT_UI_MARGIN.1),
            fps: DEFAULT_FPS,

            entity_radius: ENTITY_RADIUS,
            initial_entities: 1,
            motion: MotionDefaults::default(),

            collision_margin: DEFAULT_COLLISION_MARGIN,

            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Usable rectangle described by these settings
    pub fn arena(&self) -> Arena {
        Arena::new(self.bounds, self.ui_margin)
    }

    /// Fixed frame timestep in seconds
    pub fn frame_dt(&self) -> f32 {
        if self.fps > 0.0 { 1.0 / self.fps } else { 1.0 / DEFAULT_FPS }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }
}
