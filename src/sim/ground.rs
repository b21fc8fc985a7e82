//! Endless ground made of two leapfrogging tiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One ground tile; `pos` is the tile centre in scene space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl GroundSegment {
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// Two equal tiles laid end to end
///
/// Whenever a tile has fully scrolled past the left side it jumps to the right
/// edge of its sibling, so the pair always covers the screen without a seam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollingGround {
    pub segments: [GroundSegment; 2],
}

impl ScrollingGround {
    pub fn new(settings: &Settings) -> Self {
        let width = settings.ground_width;
        let height = settings.ground_height;
        let y = -settings.screen_height / 2.0 + height / 2.0;
        let make = |x: f32| GroundSegment {
            pos: Vec2::new(x, y),
            width,
            height,
        };
        Self {
            segments: [make(0.0), make(width)],
        }
    }

    /// Height of the walkable surface
    pub fn top(&self) -> f32 {
        let seg = &self.segments[0];
        seg.pos.y + seg.height / 2.0
    }

    /// Scroll both tiles left by `distance`, then recycle any tile that left the screen
    pub fn update(&mut self, distance: f32) {
        for seg in &mut self.segments {
            seg.pos.x -= distance;
        }

        // Each tile is checked against the other's current position
        for i in 0..2 {
            let other = 1 - i;
            let width = self.segments[i].width;
            if self.segments[i].pos.x <= -width {
                let new_x = self.segments[other].pos.x + self.segments[other].width;
                log::debug!(
                    "Ground tile {} wrapped {:.1} -> {:.1}",
                    i,
                    self.segments[i].pos.x,
                    new_x
                );
                self.segments[i].pos.x = new_x;
            }
        }
    }

    /// Tile centres, in tile order
    pub fn positions(&self) -> [Vec2; 2] {
        [self.segments[0].pos, self.segments[1].pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_layout_is_contiguous() {
        let ground = ScrollingGround::new(&Settings::default());
        let [a, b] = &ground.segments;
        assert_eq!(b.pos.x - a.pos.x, a.width);
        assert_eq!(a.pos.y, b.pos.y);
    }

    #[test]
    fn test_first_tile_wraps_behind_second() {
        let mut ground = ScrollingGround::new(&Settings::default());
        let width = ground.segments[0].width;

        ground.update(width);
        // Tile 0 reached -width and leapt over tile 1 (now at 0)
        assert_eq!(ground.segments[1].pos.x, 0.0);
        assert_eq!(ground.segments[0].pos.x, width);
    }

    #[test]
    fn test_top_matches_screen_layout() {
        let settings = Settings::default();
        let ground = ScrollingGround::new(&settings);
        let expected = -settings.screen_height / 2.0 + settings.ground_height;
        assert!((ground.top() - expected).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_tiles_never_leave_a_gap(steps in prop::collection::vec(0.0f32..40.0, 1..400)) {
            let mut ground = ScrollingGround::new(&Settings::default());
            let width = ground.segments[0].width;
            for step in steps {
                ground.update(step);
                let gap = (ground.segments[1].pos.x - ground.segments[0].pos.x).abs();
                prop_assert!((gap - width).abs() < 5e-2, "gap {} width {}", gap, width);
                // Some tile always covers the screen centre
                prop_assert!(ground
                    .segments
                    .iter()
                    .any(|s| (s.pos.x - s.width / 2.0) <= 1e-2 && s.right_edge() >= -1e-2));
            }
        }
    }
}
