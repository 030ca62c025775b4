//! Read-only view of the table for rendering and the HUD

use glam::Vec2;
use serde::Serialize;

use super::state::{BallKind, Rail, TableState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub id: BallKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RailView {
    pub rail: Rail,
    /// Tick the cue ball last touched this rail
    pub last_touched: Option<u64>,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub width: f32,
    pub height: f32,
    /// Tick the snapshot was taken at
    pub now: u64,
    pub balls: [BallView; 3],
    pub rails: [RailView; 4],
    /// Aim line endpoints, while aiming
    pub aim_line: Option<(Vec2, Vec2)>,
    pub carom_count: u32,
}

impl TableSnapshot {
    pub fn capture(state: &TableState) -> Self {
        let balls = state.balls.map(|b| BallView {
            id: b.id,
            pos: b.pos,
            radius: b.radius,
            color: b.id.color(),
        });
        let rails = Rail::ALL.map(|rail| RailView {
            rail,
            last_touched: state.rail_flash.last_touched(rail),
        });

        Self {
            width: state.bounds.width,
            height: state.bounds.height,
            now: state.time_ticks,
            balls,
            rails,
            aim_line: state.cue.aim_line(&state.balls),
            carom_count: state.carom_count(),
        }
    }

    /// HUD label
    pub fn score_label(&self) -> String {
        format!("Carambolas: {}", self.carom_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::input::InputEvent;
    use crate::sim::state::TableBounds;
    use crate::sim::tick::apply_input;

    fn table() -> TableState {
        TableState::new(TableBounds::new(800.0, 400.0).unwrap(), Settings::default()).unwrap()
    }

    #[test]
    fn test_capture_at_rest() {
        let state = table();
        let snap = TableSnapshot::capture(&state);
        assert_eq!(snap.balls[0].id, BallKind::Cue);
        assert_eq!(snap.balls[0].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(snap.balls[2].pos, state.balls[2].pos);
        assert!(snap.aim_line.is_none());
        assert!(snap.rails.iter().all(|r| r.last_touched.is_none()));
        assert_eq!(snap.score_label(), "Carambolas: 0");
    }

    #[test]
    fn test_aim_line_visible_while_armed() {
        let mut state = table();
        let mut events = Vec::new();
        apply_input(&mut state, &InputEvent::PointerDown { x: 0.0, y: 0.0 }, &mut events);
        apply_input(&mut state, &InputEvent::PointerMove { x: 130.0, y: 100.0 }, &mut events);

        let snap = TableSnapshot::capture(&state);
        let (start, end) = snap.aim_line.unwrap();
        assert_eq!(start, Vec2::new(100.0, 100.0));
        assert!((end - Vec2::new(130.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&TableSnapshot::capture(&table())).unwrap();
        assert!(json.contains("\"carom_count\":0"));
        assert!(json.contains("\"Cue\""));
    }
}
