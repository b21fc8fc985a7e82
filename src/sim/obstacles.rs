//! Obstacle spawning, scrolling and despawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Slack on the spawn timer, in ulps of the interval, so accumulated float
/// error never skips a spawn
const SPAWN_SLACK_ULPS: f32 = 64.0;

/// Uniform random values supplied by the host
pub trait RandomSource {
    /// Value in `[min, max]`; returns `min` when the range is empty
    fn range(&mut self, min: f32, max: f32) -> f32;
}

impl RandomSource for Pcg32 {
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.random_range(min..=max)
    }
}

/// A pair of pipes with a gap; `pos` is the gap centre in scene space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    /// Vertical opening between the pipes
    pub gap: f32,
    /// Goal sensor already reported
    pub passed: bool,
}

/// What changed during one field update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub spawned: Option<u32>,
    pub despawned: Vec<u32>,
}

/// All live obstacles in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    /// Advance one frame: scroll, drop what left the screen, then maybe spawn
    pub fn update<R: RandomSource>(
        &mut self,
        dt: f32,
        settings: &Settings,
        rng: &mut R,
    ) -> FieldUpdate {
        let mut report = FieldUpdate::default();
        let shift = settings.scroll_speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= shift;
        }

        let left_edge = -0.5 * settings.screen_width;
        self.obstacles.retain(|o| {
            if o.pos.x <= left_edge {
                log::debug!("Obstacle {} despawned at x={:.1}", o.id, o.pos.x);
                report.despawned.push(o.id);
                false
            } else {
                true
            }
        });

        self.spawn_timer += dt;
        let slack = f32::EPSILON * settings.spawn_interval.abs() * SPAWN_SLACK_ULPS;
        if self.spawn_timer + slack >= settings.spawn_interval {
            let y = rng.range(settings.spawn_y_min, settings.spawn_y_max);
            let pos = Vec2::new(0.5 * settings.screen_width, y);
            let id = self.insert(pos, settings.obstacle_width, settings.obstacle_gap);
            log::info!("Obstacle {} spawned at y={:.1}", id, y);
            report.spawned = Some(id);
            self.spawn_timer = 0.0;
        }

        report
    }

    /// Place an obstacle directly, returns its id
    pub fn insert(&mut self, pos: Vec2, width: f32, gap: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            pos,
            width,
            gap,
            passed: false,
        });
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Gap centres, in spawn order
    pub fn positions(&self) -> Vec<Vec2> {
        self.obstacles.iter().map(|o| o.pos).collect()
    }
}
