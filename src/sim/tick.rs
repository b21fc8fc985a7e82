//! Per-frame simulation and host-facing event handlers
//!
//! Core game loop that advances simulation deterministically. Each handler
//! runs to completion before the next; a restart is applied between frames.

use glam::Vec2;

use super::contact::{Contact, ContactOutcome, EntityTag, classify_contact, detect_contacts};
use super::obstacles::RandomSource;
use super::state::{Animation, GameEvent, GamePhase, GameState};

impl<R: RandomSource> GameState<R> {
    /// Advance the world by one frame of `dt` seconds
    ///
    /// Fixed order: body step, rise clamp, neglect torque, angle and spin
    /// clamps, ground scroll, obstacle scroll/despawn/spawn. Does nothing
    /// after game over or for a non-positive `dt`.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Active {
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let settings = &self.settings;
        let protagonist = &mut self.protagonist;
        let body = &mut protagonist.body;

        body.step(Vec2::new(0.0, settings.gravity), dt);
        body.clamp_velocity_y(settings.max_rise_speed);

        if protagonist.since_touch > settings.neglect_delay {
            body.apply_angular_impulse(-settings.neglect_torque * settings.fixed_delta);
        }

        body.clamp_angle(settings.min_angle(), settings.max_angle());
        body.clamp_angular_velocity(-settings.max_angular_vel, settings.max_angular_vel);

        protagonist.since_touch += dt;

        self.ground.update(settings.scroll_speed * settings.fixed_delta);

        let report = self.obstacles.update(dt, settings, &mut self.rng);
        for id in report.despawned {
            self.events.push(GameEvent::ObstacleDespawned { id });
        }
        if let Some(id) = report.spawned {
            self.events.push(GameEvent::ObstacleSpawned { id });
        }

        self.frame += 1;
    }

    /// Tap/click: flap upward
    pub fn on_input_down(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }

        let settings = &self.settings;
        let body = &mut self.protagonist.body;
        body.vel.y = 0.0;
        body.apply_impulse(Vec2::new(0.0, settings.flap_impulse));
        body.apply_angular_impulse(settings.flap_spin);
        body.clamp_angular_velocity(-settings.max_angular_vel, settings.max_angular_vel);

        self.protagonist.since_touch = 0.0;
        self.events.push(GameEvent::Flap);
    }

    /// A contact between two tagged bodies began
    pub fn on_contact(&mut self, a: EntityTag, b: EntityTag) -> ContactOutcome {
        let outcome = classify_contact(a, b, self.phase);
        match outcome {
            ContactOutcome::Score => {
                self.score += 1;
                log::debug!("Scored ({} + {}), score now {}", a, b, self.score);
                self.events.push(GameEvent::Scored { score: self.score });
            }
            ContactOutcome::Lethal => {
                let other = if a == EntityTag::Protagonist { b } else { a };
                log::info!("Crashed into {} (score {})", other, self.score);
                self.enter_game_over();
            }
            ContactOutcome::Ignore => {}
        }
        outcome
    }

    /// Same as [`Self::on_contact`] but with host-side node names
    pub fn on_contact_named(&mut self, a: &str, b: &str) -> ContactOutcome {
        self.on_contact(EntityTag::from_name(a), EntityTag::from_name(b))
    }

    /// Restart button pressed: rebuild the initial configuration
    pub fn on_restart_requested(&mut self) {
        log::info!("Restarting (previous score {})", self.score);
        self.reset();
        self.events.push(GameEvent::Restarted);
    }

    /// Contacts that began this frame, from the built-in overlap test
    ///
    /// Hosts with their own physics engine skip this and call
    /// [`Self::on_contact`] directly.
    pub fn sense_contacts(&mut self) -> Vec<Contact> {
        if self.phase != GamePhase::Active {
            return Vec::new();
        }
        detect_contacts(
            &self.protagonist,
            &mut self.obstacles,
            &self.ground,
            self.settings.goal_width,
        )
    }

    /// Sense contacts and feed each one through [`Self::on_contact`]
    pub fn resolve_contacts(&mut self) -> Vec<ContactOutcome> {
        self.sense_contacts()
            .into_iter()
            .map(|c| self.on_contact(c.a, c.b))
            .collect()
    }

    fn enter_game_over(&mut self) {
        self.phase = GamePhase::GameOver;

        let downed = self.settings.downed_angle();
        let protagonist = &mut self.protagonist;
        protagonist.body.allows_rotation = false;
        protagonist.body.angular_vel = 0.0;
        protagonist.animation = Animation::Still;
        protagonist.body.angle = downed;
        protagonist.collidable = false;
        protagonist.alive = false;

        self.events.push(GameEvent::GameOver { score: self.score });
        self.events.push(GameEvent::ShowRestart);
        self.events.push(GameEvent::Shake);
    }
}
