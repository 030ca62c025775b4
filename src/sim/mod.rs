//! Deterministic simulation module
//!
//! All table logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Stable iteration order (balls by index, pairs once each)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod cue;
pub mod geometry;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tracker;

pub use clock::FixedStep;
pub use collision::{detect_ball_collision, resolve_ball_collision, resolve_rail_collision};
pub use cue::{CueController, CueState};
pub use geometry::ContactFrame;
pub use input::{InputEvent, InputQueue};
pub use snapshot::{BallView, RailView, TableSnapshot};
pub use state::{
    Ball, BallKind, BallSet, Rail, RailFlash, RailSet, TableBounds, TableEvent, TableState,
};
pub use tick::{apply_input, run_until_rest, tick};
pub use tracker::{CaromTracker, Evaluation, TrackerPhase};
