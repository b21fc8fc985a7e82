//! Minimal 2D rigid body
//!
//! Just enough state to replace an engine-provided physics body: a point mass
//! with linear and angular motion. Every clamp saturates silently.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::saturate;

/// Point mass with orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Position in scene space
    pub pos: Vec2,
    /// Linear velocity (units/s)
    pub vel: Vec2,
    /// Orientation (radians, counter-clockwise positive)
    pub angle: f32,
    /// Angular velocity (rad/s)
    pub angular_vel: f32,
    /// Mass used to scale linear impulses
    pub mass: f32,
    /// Moment of inertia used to scale angular impulses
    pub inertia: f32,
    /// When false, angular impulses are discarded
    pub allows_rotation: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl PhysicsBody {
    /// Unit-mass body at rest
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            mass: 1.0,
            inertia: 1.0,
            allows_rotation: true,
        }
    }

    /// Instantaneous change of momentum
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass > 0.0 {
            self.vel += impulse / self.mass;
        }
    }

    /// Instantaneous change of angular momentum (ignored while rotation is locked)
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.allows_rotation && self.inertia > 0.0 {
            self.angular_vel += impulse / self.inertia;
        }
    }

    /// Advance position and orientation by one step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.angle += self.angular_vel * dt;
    }

    /// Apply a constant acceleration then integrate (semi-implicit Euler)
    pub fn step(&mut self, gravity: Vec2, dt: f32) {
        self.vel += gravity * dt;
        self.integrate(dt);
    }

    /// Cap upward speed; falling speed is left alone
    pub fn clamp_velocity_y(&mut self, max: f32) {
        if self.vel.y > max {
            self.vel.y = max;
        }
    }

    pub fn clamp_angular_velocity(&mut self, min: f32, max: f32) {
        self.angular_vel = saturate(self.angular_vel, min, max);
    }

    pub fn clamp_angle(&mut self, min: f32, max: f32) {
        self.angle = saturate(self.angle, min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_impulse_scales_by_mass() {
        let mut body = PhysicsBody::new(Vec2::ZERO);
        body.apply_impulse(Vec2::new(0.0, 250.0));
        assert_eq!(body.vel, Vec2::new(0.0, 250.0));

        body.vel = Vec2::ZERO;
        body.mass = 2.0;
        body.apply_impulse(Vec2::new(0.0, 250.0));
        assert_eq!(body.vel.y, 125.0);
    }

    #[test]
    fn test_locked_rotation_ignores_angular_impulse() {
        let mut body = PhysicsBody::default();
        body.allows_rotation = false;
        body.apply_angular_impulse(5.0);
        assert_eq!(body.angular_vel, 0.0);
    }

    #[test]
    fn test_integrate() {
        let mut body = PhysicsBody::new(Vec2::new(10.0, 0.0));
        body.vel = Vec2::new(0.0, -60.0);
        body.angular_vel = 1.5;
        body.integrate(0.5);
        assert_eq!(body.pos, Vec2::new(10.0, -30.0));
        assert!((body.angle - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_step_applies_gravity_first() {
        let mut body = PhysicsBody::default();
        body.step(Vec2::new(0.0, -10.0), 1.0);
        assert_eq!(body.vel.y, -10.0);
        assert_eq!(body.pos.y, -10.0);
    }

    #[test]
    fn test_velocity_clamp_only_caps_rise() {
        let mut body = PhysicsBody::default();
        body.vel.y = 900.0;
        body.clamp_velocity_y(400.0);
        assert_eq!(body.vel.y, 400.0);

        body.vel.y = -900.0;
        body.clamp_velocity_y(400.0);
        assert_eq!(body.vel.y, -900.0);
    }

    proptest! {
        #[test]
        fn prop_clamps_are_idempotent_and_bounded(
            impulses in prop::collection::vec(-500.0f32..500.0, 0..40),
            angle in -10.0f32..10.0,
        ) {
            let mut body = PhysicsBody::default();
            body.angle = angle;
            for impulse in impulses {
                body.apply_angular_impulse(impulse);
            }
            body.clamp_angular_velocity(-2.0, 2.0);
            body.clamp_angle(-0.35, 0.52);
            let once = body.clone();
            body.clamp_angular_velocity(-2.0, 2.0);
            body.clamp_angle(-0.35, 0.52);

            prop_assert_eq!(&once, &body);
            prop_assert!((-2.0..=2.0).contains(&body.angular_vel));
            prop_assert!((-0.35..=0.52).contains(&body.angle));
        }
    }
}
