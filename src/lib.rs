//! Homebound - a waypoint chase-and-evade arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player navigation, enemy kinematics,
//!   spawn scheduling, win/lose state)
//! - `render`: Drawing-surface contract the render pass emits calls against
//! - `config`: Session configuration

pub mod config;
pub mod render;
pub mod sim;

pub use config::Config;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (ticks per second of wall clock)
    pub const SIM_HZ: u32 = 30;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    /// Nominal player marker extent, for the render bounding box
    pub const PLAYER_MARKER_SIZE: f32 = 20.0;

    /// Home sits this far in from the right arena edge
    pub const HOME_INSET: f32 = 100.0;
    pub const HOME_SIZE: f32 = 20.0;

    /// Waypoint cross half-extent
    pub const WAYPOINT_ARM: f32 = 10.0;

    /// Generator schedule: first batch ~100 ms in, then every ~1 s
    pub const SPAWN_DELAY_TICKS: u64 = 3;
    pub const SPAWN_INTERVAL_TICKS: u64 = 30;

    /// Per-kind spawn caps
    pub const FENCING_CAP: u32 = 7;
    pub const SINE_CAP: u32 = 10;

    /// Enemy defaults per kind
    pub const DEMO_SIZE: f32 = 20.0;
    pub const RANDOM_WALK_SIZE: f32 = 15.0;
    pub const RANDOM_WALK_SPEED: f32 = 3.0;
    pub const CHASING_SIZE: f32 = 30.0;
    pub const CHASING_SPEED: f32 = 2.0;
    pub const FENCING_SIZE: f32 = 10.0;
    pub const FENCING_SPEED: f32 = 1.0;
    pub const SINE_SIZE: f32 = 20.0;
    pub const SINE_SPEED: f32 = 1.0;

    /// Fencing patrol distance beyond the home edge
    pub const HOME_OFFSET: f32 = 20.0;

    /// Sine trajectory shape
    pub const SINE_AMPLITUDE: f32 = 50.0;
    pub const SINE_FREQUENCY: f32 = 0.02;
}

/// Bearing (radians) from one point toward another
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit step along a bearing
#[inline]
pub fn heading_vec(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
