//! Table state and core simulation types
//!
//! Everything a table session owns lives here: the three balls, the table bounds,
//! the cue, the carom tracker and the rail highlight timestamps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cue::CueController;
use super::tracker::CaromTracker;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Identity of a ball (doubles as its index in `TableState::balls`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    /// Player-controlled white ball
    Cue,
    Yellow,
    Red,
}

impl BallKind {
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            BallKind::Cue => 0,
            BallKind::Yellow => 1,
            BallKind::Red => 2,
        }
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        *self == BallKind::Cue
    }

    /// Display colour (RGBA)
    pub fn color(&self) -> [f32; 4] {
        match self {
            BallKind::Cue => [1.0, 1.0, 1.0, 1.0],
            BallKind::Yellow => [1.0, 0.9, 0.1, 1.0],
            BallKind::Red => [0.85, 0.1, 0.1, 1.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallKind::Cue => "cue",
            BallKind::Yellow => "yellow",
            BallKind::Red => "red",
        }
    }
}

/// A ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: BallKind, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    /// True only when both velocity components are exactly zero
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.vel.x == 0.0 && self.vel.y == 0.0
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

/// True when every ball is at rest
pub fn all_stationary(balls: &[Ball]) -> bool {
    balls.iter().all(Ball::is_stationary)
}

/// One of the four cushions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rail {
    Top,
    Bottom,
    Left,
    Right,
}

impl Rail {
    pub const ALL: [Rail; 4] = [Rail::Top, Rail::Bottom, Rail::Left, Rail::Right];

    #[inline]
    fn bit(&self) -> u8 {
        match self {
            Rail::Top => 1 << 0,
            Rail::Bottom => 1 << 1,
            Rail::Left => 1 << 2,
            Rail::Right => 1 << 3,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Rail::Top => 0,
            Rail::Bottom => 1,
            Rail::Left => 2,
            Rail::Right => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rail::Top => "top",
            Rail::Bottom => "bottom",
            Rail::Left => "left",
            Rail::Right => "right",
        }
    }
}

/// Set of rails, packed into a bitfield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailSet {
    bits: u8,
}

impl RailSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, rail: Rail) {
        self.bits |= rail.bit();
    }

    pub fn contains(&self, rail: Rail) -> bool {
        self.bits & rail.bit() != 0
    }

    /// Add every rail in `other`
    pub fn extend(&mut self, other: RailSet) {
        self.bits |= other.bits;
    }

    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Rail> + '_ {
        Rail::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Rail> for RailSet {
    fn from_iter<I: IntoIterator<Item = Rail>>(iter: I) -> Self {
        let mut set = RailSet::new();
        for rail in iter {
            set.insert(rail);
        }
        set
    }
}

/// Set of balls, packed into a bitfield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallSet {
    bits: u8,
}

impl BallSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, ball: BallKind) {
        self.bits |= 1 << ball.index();
    }

    pub fn contains(&self, ball: BallKind) -> bool {
        self.bits & (1 << ball.index()) != 0
    }

    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

/// Playing surface, origin at the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableBounds {
    pub width: f32,
    pub height: f32,
}

impl TableBounds {
    /// Each side must fit at least one ball across
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v >= 2.0 * BALL_RADIUS;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidTableSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bounds sized from a window width
    pub fn from_window_width(window_width: f64) -> Result<Self, ConfigError> {
        let width = (window_width * TABLE_WIDTH_FRACTION) as f32;
        Self::new(width, width / TABLE_ASPECT)
    }

    pub fn contains(&self, ball: &Ball) -> bool {
        ball.pos.x - ball.radius >= 0.0
            && ball.pos.x + ball.radius <= self.width
            && ball.pos.y - ball.radius >= 0.0
            && ball.pos.y + ball.radius <= self.height
    }
}

/// Tick at which each rail was last touched by the cue ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailFlash {
    last_touched: [Option<u64>; 4],
}

impl RailFlash {
    pub fn touch(&mut self, rails: RailSet, now: u64) {
        for rail in rails.iter() {
            self.last_touched[rail.index()] = Some(now);
        }
    }

    pub fn last_touched(&self, rail: Rail) -> Option<u64> {
        self.last_touched[rail.index()]
    }
}

/// Something that happened during a tick, for the renderer/HUD to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent {
    /// Cue released with this initial velocity
    ShotFired { velocity: Vec2 },
    /// A ball bounced off a rail
    RailTouched { ball: BallKind, rail: Rail },
    /// Two balls collided (`a` has the lower index)
    BallsCollided { a: BallKind, b: BallKind },
    /// A carom was completed; `count` is the new total
    CaromScored { count: u32 },
    /// The cue ball came to rest after moving
    ShotEnded { caromed: bool },
}

/// Complete table state for one session
#[derive(Debug, Clone)]
pub struct TableState {
    /// Cue ball at index 0, then yellow and red
    pub balls: [Ball; 3],
    pub bounds: TableBounds,
    pub cue: CueController,
    pub tracker: CaromTracker,
    pub rail_flash: RailFlash,
    /// Simulation tick counter
    pub time_ticks: u64,
    settings: Settings,
}

impl TableState {
    /// Create a table with the standard opening layout
    pub fn new(bounds: TableBounds, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            balls: opening_layout(),
            bounds,
            cue: CueController::new(&settings),
            tracker: CaromTracker::new(),
            rail_flash: RailFlash::default(),
            time_ticks: 0,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate and apply new settings; on error the old settings stay in force
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.cue.apply_settings(&settings);
        self.settings = settings;
        Ok(())
    }

    pub fn ball(&self, kind: BallKind) -> &Ball {
        &self.balls[kind.index()]
    }

    pub fn ball_mut(&mut self, kind: BallKind) -> &mut Ball {
        &mut self.balls[kind.index()]
    }

    pub fn cue_ball(&self) -> &Ball {
        self.ball(BallKind::Cue)
    }

    pub fn all_stationary(&self) -> bool {
        all_stationary(&self.balls)
    }

    pub fn carom_count(&self) -> u32 {
        self.tracker.carom_count()
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }
}

/// Opening positions: cue, yellow and red on a diagonal
pub fn opening_layout() -> [Ball; 3] {
    [
        Ball::new(BallKind::Cue, Vec2::new(100.0, 100.0)),
        Ball::new(BallKind::Yellow, Vec2::new(200.0, 150.0)),
        Ball::new(BallKind::Red, Vec2::new(300.0, 200.0)),
    ]
}
