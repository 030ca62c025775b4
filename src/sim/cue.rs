//! Cue aiming and shooting
//!
//! The cue is a small state machine gated on ball motion:
//! - `begin_aim` arms it, only while every ball is at rest
//! - `update_aim` follows the pointer, only while armed and the cue ball is at rest
//! - `release` fires, only while armed and every ball is at rest
//!
//! Calls outside those windows are ignored. That gating is what keeps pointer input
//! from touching a ball mid-shot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallKind, all_stationary};
use crate::consts::{AIM_LINE_SCALE, AIM_POWER_SCALE};
use crate::{angle_between, direction};
use crate::settings::{Settings, ShotDirection};

/// Aim state visible to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueState {
    pub armed: bool,
    /// Pointer angle from the cue ball (radians)
    pub angle: f32,
    pub power: f32,
}

/// Cue controller for one table session
#[derive(Debug, Clone)]
pub struct CueController {
    state: CueState,
    max_power: f32,
    baseline: f32,
    shot_direction: ShotDirection,
}

impl CueController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: CueState {
                armed: false,
                angle: 0.0,
                power: settings.baseline(),
            },
            max_power: settings.cue_power,
            baseline: settings.baseline(),
            shot_direction: settings.shot_direction,
        }
    }

    pub fn state(&self) -> &CueState {
        &self.state
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    pub fn max_power(&self) -> f32 {
        self.max_power
    }

    /// Pick up new ceiling/baseline/direction
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.max_power = settings.cue_power;
        self.baseline = settings.baseline();
        self.shot_direction = settings.shot_direction;
        if self.state.armed {
            self.state.power = self.state.power.min(self.max_power);
        } else {
            self.state.power = self.baseline;
        }
    }

    /// Arm the cue. Returns true if it was armed by this call.
    pub fn begin_aim(&mut self, balls: &[Ball; 3]) -> bool {
        if self.state.armed || !all_stationary(balls) {
            return false;
        }
        self.state.armed = true;
        true
    }

    /// Point the cue at `pointer`; power grows with distance up to the ceiling
    pub fn update_aim(&mut self, balls: &[Ball; 3], pointer: Vec2) -> bool {
        let cue_ball = &balls[BallKind::Cue.index()];
        if !self.state.armed || !cue_ball.is_stationary() {
            return false;
        }
        self.state.angle = angle_between(cue_ball.pos, pointer);
        self.state.power = (cue_ball.pos.distance(pointer) * AIM_POWER_SCALE).min(self.max_power);
        true
    }

    /// Fire the cue ball. Returns the imparted velocity, or `None` if the release
    /// was outside its window.
    pub fn release(&mut self, balls: &mut [Ball; 3]) -> Option<Vec2> {
        if !self.state.armed || !all_stationary(balls) {
            return None;
        }
        let velocity = self.shot_direction() * self.state.power;
        balls[BallKind::Cue.index()].vel = velocity;

        self.state.armed = false;
        self.state.power = self.baseline;
        Some(velocity)
    }

    /// Unit vector the cue ball will travel along
    pub fn shot_direction(&self) -> Vec2 {
        direction(self.state.angle) * self.shot_direction.sign()
    }

    /// Aim line from the cue ball, shown while armed over a resting cue ball
    pub fn aim_line(&self, balls: &[Ball; 3]) -> Option<(Vec2, Vec2)> {
        let cue_ball = &balls[BallKind::Cue.index()];
        if !self.state.armed || !cue_ball.is_stationary() {
            return None;
        }
        let end = cue_ball.pos + self.shot_direction() * self.state.power * AIM_LINE_SCALE;
        Some((cue_ball.pos, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::opening_layout;

    fn controller(cue_power: f32) -> CueController {
        CueController::new(&Settings::with_cue_power(cue_power).unwrap())
    }

    #[test]
    fn test_begin_aim_requires_all_stationary() {
        let mut cue = controller(10.0);
        let mut balls = opening_layout();
        balls[2].vel = Vec2::new(0.5, 0.0);

        assert!(!cue.begin_aim(&balls));
        assert!(!cue.is_armed());

        balls[2].vel = Vec2::ZERO;
        assert!(cue.begin_aim(&balls));
        assert!(cue.is_armed());
    }

    #[test]
    fn test_update_aim_computes_angle_and_capped_power() {
        let mut cue = controller(10.0);
        let balls = opening_layout();
        let cue_pos = balls[0].pos;

        // Ignored while not armed
        assert!(!cue.update_aim(&balls, cue_pos + Vec2::new(30.0, 0.0)));
        assert_eq!(cue.state().power, 10.0);

        cue.begin_aim(&balls);
        assert!(cue.update_aim(&balls, cue_pos + Vec2::new(0.0, 30.0)));
        assert!((cue.state().angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((cue.state().power - 3.0).abs() < 1e-5);

        // Far pointer is capped at the ceiling
        cue.update_aim(&balls, cue_pos + Vec2::new(-5000.0, 0.0));
        assert_eq!(cue.state().power, 10.0);
        assert!((cue.state().angle.abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_update_aim_ignored_while_cue_ball_moving() {
        let mut cue = controller(10.0);
        let mut balls = opening_layout();
        cue.begin_aim(&balls);
        balls[0].vel = Vec2::new(1.0, 0.0);

        assert!(!cue.update_aim(&balls, Vec2::new(500.0, 500.0)));
        assert_eq!(cue.state().angle, 0.0);
    }

    #[test]
    fn test_release_toward_pointer() {
        let mut cue = controller(10.0);
        let mut balls = opening_layout();
        let cue_pos = balls[0].pos;

        cue.begin_aim(&balls);
        cue.update_aim(&balls, cue_pos + Vec2::new(40.0, 0.0));
        let velocity = cue.release(&mut balls).unwrap();

        assert!((velocity - Vec2::new(4.0, 0.0)).length() < 1e-5);
        assert_eq!(balls[0].vel, velocity);
        assert!(!cue.is_armed());
        assert_eq!(cue.state().power, 10.0);
    }

    #[test]
    fn test_release_away_from_pointer() {
        let settings = Settings {
            shot_direction: ShotDirection::AwayFromPointer,
            ..Settings::default()
        };
        let mut cue = CueController::new(&settings);
        let mut balls = opening_layout();
        let cue_pos = balls[0].pos;

        cue.begin_aim(&balls);
        cue.update_aim(&balls, cue_pos + Vec2::new(40.0, 0.0));
        let velocity = cue.release(&mut balls).unwrap();

        assert!((velocity - Vec2::new(-4.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_release_while_moving_is_noop() {
        let mut cue = controller(10.0);
        let mut balls = opening_layout();
        cue.begin_aim(&balls);
        cue.update_aim(&balls, balls[0].pos + Vec2::new(40.0, 0.0));

        balls[1].vel = Vec2::new(0.0, 2.0);
        let before = balls;
        assert!(cue.release(&mut balls).is_none());
        assert_eq!(balls, before);
        assert!(cue.is_armed());
        assert!((cue.state().power - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_release_without_arming_is_noop() {
        let mut cue = controller(10.0);
        let mut balls = opening_layout();
        assert!(cue.release(&mut balls).is_none());
        assert!(balls[0].is_stationary());
    }

    #[test]
    fn test_power_resets_to_configured_baseline() {
        let settings = Settings {
            cue_power: 20.0,
            baseline_power: Some(5.0),
            ..Settings::default()
        };
        let mut cue = CueController::new(&settings);
        let mut balls = opening_layout();
        assert_eq!(cue.state().power, 5.0);

        cue.begin_aim(&balls);
        cue.update_aim(&balls, balls[0].pos + Vec2::new(150.0, 0.0));
        assert_eq!(cue.state().power, 15.0);
        cue.release(&mut balls);
        assert_eq!(cue.state().power, 5.0);
    }

    #[test]
    fn test_apply_settings_clamps_armed_power() {
        let mut cue = controller(50.0);
        let balls = opening_layout();
        cue.begin_aim(&balls);
        cue.update_aim(&balls, balls[0].pos + Vec2::new(300.0, 0.0));
        assert_eq!(cue.state().power, 30.0);

        cue.apply_settings(&Settings::with_cue_power(12.0).unwrap());
        assert_eq!(cue.state().power, 12.0);
        assert_eq!(cue.max_power(), 12.0);
    }

    #[test]
    fn test_aim_line_follows_shot_direction() {
        let mut cue = controller(10.0);
        let balls = opening_layout();
        assert!(cue.aim_line(&balls).is_none());

        cue.begin_aim(&balls);
        cue.update_aim(&balls, balls[0].pos + Vec2::new(0.0, -20.0));
        let (start, end) = cue.aim_line(&balls).unwrap();
        assert_eq!(start, balls[0].pos);
        // power 2.0, line 20 units long, pointing up
        assert!((end - (start + Vec2::new(0.0, -20.0))).length() < 1e-4);
    }
}
