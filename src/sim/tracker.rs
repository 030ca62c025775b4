//! Carom scoring
//!
//! Tracks, per shot, which rails the cue ball touched and which object balls it
//! struck. A shot ends on any tick where the cue ball is exactly at rest; at that
//! point it is scored and both sets are cleared.

use serde::{Deserialize, Serialize};

use super::state::{BallKind, BallSet, RailSet};
use crate::consts::{CAROM_MIN_BALLS, CAROM_MIN_RAILS};

/// Shot lifecycle as seen by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackerPhase {
    /// Nothing recorded, cue ball at rest
    #[default]
    Idle,
    /// Cue ball moving, touches accumulating
    InProgress,
    /// Shot just scored and cleared
    Evaluated,
}

/// Outcome of an end-of-shot evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// True if a shot was in progress when the cue ball stopped
    pub shot_ended: bool,
    /// New carom total, if this shot scored
    pub scored: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaromTracker {
    phase: TrackerPhase,
    rails: RailSet,
    hits: BallSet,
    caroms: u32,
}

impl CaromTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn rails(&self) -> RailSet {
        self.rails
    }

    pub fn hits(&self) -> BallSet {
        self.hits
    }

    pub fn carom_count(&self) -> u32 {
        self.caroms
    }

    /// Cue ball is moving: the current shot continues
    pub fn mark_moving(&mut self) {
        self.phase = TrackerPhase::InProgress;
    }

    pub fn record_rails(&mut self, rails: RailSet) {
        if rails.is_empty() {
            return;
        }
        self.rails.extend(rails);
        self.phase = TrackerPhase::InProgress;
    }

    /// Cue ball struck `ball`. Contacts with the cue ball itself are ignored.
    pub fn record_hit(&mut self, ball: BallKind) {
        if ball.is_cue() {
            return;
        }
        self.hits.insert(ball);
        self.phase = TrackerPhase::InProgress;
    }

    /// Whether the current touches would score if the shot ended now
    pub fn qualifies(&self) -> bool {
        self.rails.len() >= CAROM_MIN_RAILS && self.hits.len() >= CAROM_MIN_BALLS
    }

    /// Score the shot. Call on every tick the cue ball is exactly at rest.
    ///
    /// Both sets are cleared regardless of the outcome, so repeated calls on a
    /// resting cue ball never count the same shot twice.
    pub fn evaluate(&mut self) -> Evaluation {
        let shot_ended = self.phase == TrackerPhase::InProgress;
        let scored = if self.qualifies() {
            self.caroms += 1;
            log::info!(
                "Carom! rails={} balls={} total={}",
                self.rails.len(),
                self.hits.len(),
                self.caroms
            );
            Some(self.caroms)
        } else {
            None
        };

        self.rails.clear();
        self.hits.clear();
        self.phase = if shot_ended {
            TrackerPhase::Evaluated
        } else {
            TrackerPhase::Idle
        };

        Evaluation { shot_ended, scored }
    }
}
