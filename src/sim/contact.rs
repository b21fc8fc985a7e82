//! Contact classification and sensing
//!
//! The host (or [`detect_contacts`]) reports pairs of tagged bodies whose
//! bounds started touching. [`classify_contact`] decides what that means for
//! the game: a point, a crash, or nothing.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ground::ScrollingGround;
use super::obstacles::{Obstacle, ObstacleField};
use super::state::{GamePhase, Protagonist};

/// What kind of body took part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityTag {
    Protagonist,
    /// Solid part of an obstacle
    Obstacle,
    Ground,
    /// Scoring sensor inside an obstacle's gap
    Goal,
    /// Anything the host could not name
    Unknown,
}

impl EntityTag {
    /// Resolve a host-side node name; unknown names never fail
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "protagonist" | "hero" => EntityTag::Protagonist,
            "obstacle" => EntityTag::Obstacle,
            "ground" => EntityTag::Ground,
            "goal" => EntityTag::Goal,
            _ => EntityTag::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityTag::Protagonist => "protagonist",
            EntityTag::Obstacle => "obstacle",
            EntityTag::Ground => "ground",
            EntityTag::Goal => "goal",
            EntityTag::Unknown => "unknown",
        }
    }
}

impl FromStr for EntityTag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gameplay meaning of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// Protagonist crossed an obstacle's gap
    Score,
    /// Protagonist hit something solid while alive
    Lethal,
    Ignore,
}

/// Classify a contact between `a` and `b` (order does not matter)
///
/// Goal contacts score before the phase is consulted, so a goal reported after
/// the crash still counts.
pub fn classify_contact(a: EntityTag, b: EntityTag, phase: GamePhase) -> ContactOutcome {
    if a == EntityTag::Goal || b == EntityTag::Goal {
        return ContactOutcome::Score;
    }

    if phase != GamePhase::Active {
        return ContactOutcome::Ignore;
    }

    if a == EntityTag::Unknown || b == EntityTag::Unknown {
        return ContactOutcome::Ignore;
    }

    // Lethal means a protagonist collision; scenery touching scenery is not a crash
    // even though it is neither a goal nor outside Active
    if a != EntityTag::Protagonist && b != EntityTag::Protagonist {
        return ContactOutcome::Ignore;
    }

    ContactOutcome::Lethal
}

/// A contact pair as reported by the sensing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityTag,
    pub b: EntityTag,
}

impl Contact {
    pub fn with_protagonist(other: EntityTag) -> Self {
        Self {
            a: EntityTag::Protagonist,
            b: other,
        }
    }
}

/// Axis-aligned box, edges may be infinite
#[derive(Debug, Clone, Copy)]
struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        center.distance_squared(closest) < radius * radius
    }
}

fn pipe_rects(obstacle: &Obstacle) -> [Rect; 2] {
    let half_w = obstacle.width / 2.0;
    let half_gap = obstacle.gap / 2.0;
    let x0 = obstacle.pos.x - half_w;
    let x1 = obstacle.pos.x + half_w;
    [
        Rect {
            min: Vec2::new(x0, obstacle.pos.y + half_gap),
            max: Vec2::new(x1, f32::INFINITY),
        },
        Rect {
            min: Vec2::new(x0, f32::NEG_INFINITY),
            max: Vec2::new(x1, obstacle.pos.y - half_gap),
        },
    ]
}

fn goal_rect(obstacle: &Obstacle, goal_width: f32) -> Rect {
    let trailing = obstacle.pos.x + obstacle.width / 2.0;
    let half_gap = obstacle.gap / 2.0;
    Rect {
        min: Vec2::new(trailing, obstacle.pos.y - half_gap),
        max: Vec2::new(trailing + goal_width, obstacle.pos.y + half_gap),
    }
}

/// Overlap test standing in for an engine's contact callbacks
///
/// Reports protagonist contacts with the ground, with obstacle pipes, and with
/// goal sensors. A goal is reported once per obstacle (its `passed` flag is
/// set here). Nothing is reported once the protagonist stops colliding.
pub fn detect_contacts(
    protagonist: &Protagonist,
    obstacles: &mut ObstacleField,
    ground: &ScrollingGround,
    goal_width: f32,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if !protagonist.collidable {
        return contacts;
    }

    let center = protagonist.body.pos;
    let radius = protagonist.radius;

    for obstacle in obstacles.iter_mut() {
        if pipe_rects(obstacle)
            .iter()
            .any(|r| r.overlaps_circle(center, radius))
        {
            contacts.push(Contact::with_protagonist(EntityTag::Obstacle));
        }

        if !obstacle.passed && goal_rect(obstacle, goal_width).overlaps_circle(center, radius) {
            obstacle.passed = true;
            contacts.push(Contact::with_protagonist(EntityTag::Goal));
        }
    }

    if center.y - radius <= ground.top() {
        contacts.push(Contact::with_protagonist(EntityTag::Ground));
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    const ALL: [EntityTag; 5] = [
        EntityTag::Protagonist,
        EntityTag::Obstacle,
        EntityTag::Ground,
        EntityTag::Goal,
        EntityTag::Unknown,
    ];

    #[test]
    fn test_goal_scores_in_any_phase_and_order() {
        for phase in [GamePhase::Active, GamePhase::GameOver] {
            for other in ALL {
                assert_eq!(
                    classify_contact(EntityTag::Goal, other, phase),
                    ContactOutcome::Score
                );
                assert_eq!(
                    classify_contact(other, EntityTag::Goal, phase),
                    ContactOutcome::Score
                );
            }
        }
    }

    #[test]
    fn test_solid_contact_is_lethal_only_while_active() {
        for solid in [EntityTag::Obstacle, EntityTag::Ground] {
            assert_eq!(
                classify_contact(EntityTag::Protagonist, solid, GamePhase::Active),
                ContactOutcome::Lethal
            );
            assert_eq!(
                classify_contact(solid, EntityTag::Protagonist, GamePhase::Active),
                ContactOutcome::Lethal
            );
            assert_eq!(
                classify_contact(solid, EntityTag::Protagonist, GamePhase::GameOver),
                ContactOutcome::Ignore
            );
        }
    }

    #[test]
    fn test_unknown_and_scenery_pairs_are_ignored() {
        assert_eq!(
            classify_contact(EntityTag::Protagonist, EntityTag::Unknown, GamePhase::Active),
            ContactOutcome::Ignore
        );
        assert_eq!(
            classify_contact(EntityTag::Obstacle, EntityTag::Ground, GamePhase::Active),
            ContactOutcome::Ignore
        );
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(EntityTag::from_name("goal"), EntityTag::Goal);
        assert_eq!(EntityTag::from_name(" Ground "), EntityTag::Ground);
        assert_eq!("protagonist".parse::<EntityTag>(), Ok(EntityTag::Protagonist));
        assert_eq!(EntityTag::from_name("spinny"), EntityTag::Unknown);
        assert_eq!(EntityTag::Obstacle.to_string(), "obstacle");
    }

    fn fixture() -> (Settings, Protagonist, ObstacleField, ScrollingGround) {
        let settings = Settings::default();
        let protagonist = Protagonist::new(&settings);
        let obstacles = ObstacleField::new();
        let ground = ScrollingGround::new(&settings);
        (settings, protagonist, obstacles, ground)
    }

    #[test]
    fn test_clear_air_has_no_contacts() {
        let (settings, protagonist, mut obstacles, ground) = fixture();
        let contacts = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_pipe_hit() {
        let (settings, protagonist, mut obstacles, ground) = fixture();
        // Gap well above the protagonist: it is inside the lower pipe
        obstacles.insert(
            Vec2::new(protagonist.body.pos.x, 200.0),
            settings.obstacle_width,
            settings.obstacle_gap,
        );
        let contacts = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert_eq!(contacts, vec![Contact::with_protagonist(EntityTag::Obstacle)]);
    }

    #[test]
    fn test_goal_reported_once() {
        let (settings, protagonist, mut obstacles, ground) = fixture();
        // Gap centred on the protagonist, trailing edge just behind it
        let x = protagonist.body.pos.x - settings.obstacle_width / 2.0 - 2.0;
        obstacles.insert(
            Vec2::new(x, protagonist.body.pos.y),
            settings.obstacle_width,
            settings.obstacle_gap,
        );

        let first = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert_eq!(first, vec![Contact::with_protagonist(EntityTag::Goal)]);

        let second = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert!(second.is_empty());
    }

    #[test]
    fn test_ground_and_disabled_collision() {
        let (settings, mut protagonist, mut obstacles, ground) = fixture();
        protagonist.body.pos.y = ground.top();
        let contacts = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert_eq!(contacts, vec![Contact::with_protagonist(EntityTag::Ground)]);

        protagonist.collidable = false;
        let contacts = detect_contacts(&protagonist, &mut obstacles, &ground, settings.goal_width);
        assert!(contacts.is_empty());
    }
}
