//! Carom Table - a three-cushion billiards table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, cue, carom scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Host-adjustable configuration (cue power ceiling)
//! - `error`: Configuration and initialization errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, RenderError};
pub use settings::{Settings, ShotDirection};

use glam::Vec2;

/// Table and physics constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Velocity retained per axis per tick
    pub const FRICTION: f32 = 0.99;
    /// Velocity components below this magnitude snap to exactly zero (units/tick)
    pub const REST_EPSILON: f32 = 0.01;
    /// Velocity retained after bouncing off a rail
    pub const RAIL_RESTITUTION: f32 = 0.9;

    /// Ball radius in table units
    pub const BALL_RADIUS: f32 = 10.0;

    /// Shot power per unit of pointer distance from the cue ball
    pub const AIM_POWER_SCALE: f32 = 0.1;
    /// Aim line length per unit of power
    pub const AIM_LINE_SCALE: f32 = 10.0;

    /// Default power ceiling (matches the slider's initial value)
    pub const DEFAULT_CUE_POWER: f32 = 10.0;
    /// Largest power ceiling the host UI may configure
    pub const MAX_CUE_POWER: f32 = 1000.0;

    /// Distinct rails a carom needs
    pub const CAROM_MIN_RAILS: u32 = 3;
    /// Object balls a carom needs
    pub const CAROM_MIN_BALLS: u32 = 1;

    /// How long a touched rail stays highlighted
    pub const RAIL_FLASH_TICKS: u64 = 30;

    /// Table width as a fraction of the window width
    pub const TABLE_WIDTH_FRACTION: f64 = 0.9;
    /// Width / height of the playing surface
    pub const TABLE_ASPECT: f32 = 2.0;
}

/// Unit vector pointing along `angle` (radians, y grows downward)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
