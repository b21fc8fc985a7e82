//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (or a host-supplied [`RandomSource`])
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod contact;
pub mod ground;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use body::PhysicsBody;
pub use clock::FixedTimestep;
pub use contact::{Contact, ContactOutcome, EntityTag, classify_contact, detect_contacts};
pub use ground::{GroundSegment, ScrollingGround};
pub use obstacles::{Obstacle, ObstacleField, RandomSource};
pub use state::{Animation, GameEvent, GamePhase, GameState, Protagonist, Snapshot};
