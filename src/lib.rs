//! Rabbit Run - a side-scrolling flap-and-dodge game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, contacts, obstacles, game state)
//! - `settings`: Data-driven tuning loaded from JSON
//!
//! Rendering, audio and raw input capture live in the host. The host calls
//! [`sim::GameState::update`] once per frame and feeds it input and contact
//! events; everything it needs to draw comes back through
//! [`sim::GameState::snapshot`] and [`sim::GameState::drain_events`].

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the frame rate the game was tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas longer than this are treated as a stall and truncated
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default logical screen size (scene is centred on the origin)
    pub const SCREEN_WIDTH: f32 = 375.0;
    pub const SCREEN_HEIGHT: f32 = 667.0;

    /// Horizontal world speed (units/s)
    pub const SCROLL_SPEED: f32 = 160.0;

    /// Obstacle spawn cadence and vertical band of the gap centre
    pub const SPAWN_INTERVAL: f32 = 1.5;
    pub const SPAWN_Y_MIN: f32 = -100.0;
    pub const SPAWN_Y_MAX: f32 = 200.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_GAP: f32 = 130.0;
    pub const GOAL_WIDTH: f32 = 8.0;

    /// Ground tile geometry (each tile at least as wide as the screen)
    pub const GROUND_WIDTH: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Protagonist defaults
    pub const PROTAGONIST_X: f32 = -90.0;
    pub const PROTAGONIST_RADIUS: f32 = 14.0;
    pub const GRAVITY: f32 = -900.0;
    pub const MAX_RISE_SPEED: f32 = 400.0;
    pub const FLAP_IMPULSE: f32 = 250.0;
    pub const FLAP_SPIN: f32 = 1.0;

    /// Nose-down torque applied once the player has not flapped for a while
    pub const NEGLECT_TORQUE: f32 = 20000.0;
    pub const NEGLECT_DELAY: f32 = 0.1;

    /// Orientation limits while alive (degrees)
    pub const MIN_ANGLE_DEG: f32 = -20.0;
    pub const MAX_ANGLE_DEG: f32 = 30.0;
    /// Angular velocity limit (rad/s)
    pub const MAX_ANGULAR_VEL: f32 = 2.0;
    /// Face-down pose after a crash (degrees)
    pub const DOWNED_ANGLE_DEG: f32 = -90.0;
}

/// Clamp `value` into `[min, max]` without panicking when the bounds are inverted
#[inline]
pub fn saturate(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
