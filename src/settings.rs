//! Game tuning
//!
//! Every gameplay constant the simulation reads. Defaults reproduce the
//! tuned feel; hosts can override any subset from a JSON document.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load a settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Logical screen width; off-screen thresholds derive from it
    pub screen_width: f32,
    pub screen_height: f32,

    // === World ===
    /// Horizontal scroll speed (units/s)
    pub scroll_speed: f32,
    /// Step the ground and neglect torque are tuned against
    pub fixed_delta: f32,
    /// Seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Vertical band for the gap centre of new obstacles
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    /// Depth of the scoring sensor behind each obstacle
    pub goal_width: f32,
    pub ground_width: f32,
    pub ground_height: f32,

    // === Protagonist ===
    pub protagonist_x: f32,
    pub protagonist_y: f32,
    pub protagonist_radius: f32,
    /// Downward acceleration (negative is down)
    pub gravity: f32,
    pub max_rise_speed: f32,
    pub flap_impulse: f32,
    pub flap_spin: f32,
    pub neglect_torque: f32,
    /// Seconds without input before the nose starts dropping
    pub neglect_delay: f32,
    pub min_angle_deg: f32,
    pub max_angle_deg: f32,
    pub max_angular_vel: f32,
    pub downed_angle_deg: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            scroll_speed: SCROLL_SPEED,
            fixed_delta: SIM_DT,
            spawn_interval: SPAWN_INTERVAL,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            goal_width: GOAL_WIDTH,
            ground_width: GROUND_WIDTH,
            ground_height: GROUND_HEIGHT,

            protagonist_x: PROTAGONIST_X,
            protagonist_y: 0.0,
            protagonist_radius: PROTAGONIST_RADIUS,
            gravity: GRAVITY,
            max_rise_speed: MAX_RISE_SPEED,
            flap_impulse: FLAP_IMPULSE,
            flap_spin: FLAP_SPIN,
            neglect_torque: NEGLECT_TORQUE,
            neglect_delay: NEGLECT_DELAY,
            min_angle_deg: MIN_ANGLE_DEG,
            max_angle_deg: MAX_ANGLE_DEG,
            max_angular_vel: MAX_ANGULAR_VEL,
            downed_angle_deg: DOWNED_ANGLE_DEG,
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.warn_on_suspicious_values();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}, using default settings", e);
                Self::default()
            }
        }
    }

    pub fn min_angle(&self) -> f32 {
        self.min_angle_deg.to_radians()
    }

    pub fn max_angle(&self) -> f32 {
        self.max_angle_deg.to_radians()
    }

    pub fn downed_angle(&self) -> f32 {
        self.downed_angle_deg.to_radians()
    }

    /// Values that still simulate but will look broken
    fn warn_on_suspicious_values(&self) {
        if self.ground_width < self.screen_width {
            log::warn!(
                "ground_width {} is narrower than screen_width {}; seams will show",
                self.ground_width,
                self.screen_width
            );
        }
        if self.spawn_y_min > self.spawn_y_max {
            log::warn!(
                "spawn band [{}, {}] is inverted; obstacles will spawn at {}",
                self.spawn_y_min,
                self.spawn_y_max,
                self.spawn_y_min
            );
        }
        if self.spawn_interval <= 0.0 {
            log::warn!("spawn_interval {} spawns an obstacle every frame", self.spawn_interval);
        }
    }
}
