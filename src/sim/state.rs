//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]. Hosts read it through
//! accessors or a [`Snapshot`] and never hold references across frames.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::ground::ScrollingGround;
use super::obstacles::{Obstacle, ObstacleField, RandomSource};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World scrolling, player in control
    Active,
    /// Crashed; waiting for a restart request
    GameOver,
}

/// Looping animation on the protagonist sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Flapping,
    /// All actions cancelled (after a crash)
    Still,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play the flap sound
    Flap,
    Scored { score: u32 },
    GameOver { score: u32 },
    /// Show the restart control
    ShowRestart,
    /// Shake every scene entity
    Shake,
    Restarted,
    ObstacleSpawned { id: u32 },
    ObstacleDespawned { id: u32 },
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protagonist {
    pub body: PhysicsBody,
    pub radius: f32,
    /// Seconds since the last input
    pub since_touch: f32,
    pub alive: bool,
    /// Cleared on death so nothing else reports contacts
    pub collidable: bool,
    pub animation: Animation,
}

impl Protagonist {
    pub fn new(settings: &Settings) -> Self {
        Self {
            body: PhysicsBody::new(Vec2::new(settings.protagonist_x, settings.protagonist_y)),
            radius: settings.protagonist_radius,
            since_touch: 0.0,
            alive: true,
            collidable: true,
            animation: Animation::Flapping,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Orientation in radians
    pub fn angle(&self) -> f32 {
        self.body.angle
    }

    pub fn rotation_locked(&self) -> bool {
        !self.body.allows_rotation
    }
}

/// Read-only view handed to renderers and UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub protagonist_pos: Vec2,
    pub protagonist_angle: f32,
    pub protagonist_alive: bool,
    pub obstacles: Vec<Obstacle>,
    pub ground: [Vec2; 2],
}

/// Complete game state
///
/// Generic over the random source so hosts (and tests) can supply their own;
/// the default is a seeded PCG stream.
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = Pcg32> {
    pub(crate) settings: Settings,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) protagonist: Protagonist,
    pub(crate) obstacles: ObstacleField,
    pub(crate) ground: ScrollingGround,
    /// Active frames simulated since the last reset
    pub(crate) frame: u64,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Default tuning with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Fully populated initial configuration
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            phase: GamePhase::Active,
            score: 0,
            protagonist: Protagonist::new(&settings),
            obstacles: ObstacleField::new(),
            ground: ScrollingGround::new(&settings),
            frame: 0,
            events: Vec::new(),
            rng,
            settings,
        }
    }

    /// Rebuild every piece of run state from settings
    ///
    /// The random stream continues so consecutive runs differ.
    pub(crate) fn reset(&mut self) {
        self.phase = GamePhase::Active;
        self.score = 0;
        self.protagonist = Protagonist::new(&self.settings);
        self.obstacles = ObstacleField::new();
        self.ground = ScrollingGround::new(&self.settings);
        self.frame = 0;
        self.events.clear();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn protagonist(&self) -> &Protagonist {
        &self.protagonist
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn obstacle_positions(&self) -> Vec<Vec2> {
        self.obstacles.positions()
    }

    pub fn ground(&self) -> &ScrollingGround {
        &self.ground
    }

    pub fn ground_positions(&self) -> [Vec2; 2] {
        self.ground.positions()
    }

    /// Take all notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            phase: self.phase,
            score: self.score,
            protagonist_pos: self.protagonist.pos(),
            protagonist_angle: self.protagonist.angle(),
            protagonist_alive: self.protagonist.alive,
            obstacles: self.obstacles.iter().cloned().collect(),
            ground: self.ground.positions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles().is_empty());
        assert!(state.protagonist().alive);
        assert!(state.protagonist().collidable);
        assert_eq!(state.protagonist().animation, Animation::Flapping);
        assert_eq!(state.protagonist().pos(), Vec2::new(-90.0, 0.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_string(&state.snapshot()).expect("serialize");
        let back: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, state.snapshot());
        assert!(json.contains("\"phase\":\"Active\""));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut state = GameState::new(1);
        state.events.push(GameEvent::Flap);
        assert_eq!(state.drain_events(), vec![GameEvent::Flap]);
        assert!(state.drain_events().is_empty());
    }
}
