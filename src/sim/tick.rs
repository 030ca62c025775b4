//! Fixed-step simulation tick
//!
//! One call advances the table by exactly one frame. Units are table units per
//! tick, so the step has no `dt`; the host loop decides how many ticks to run.

use super::collision::{detect_ball_collision, resolve_ball_collision, resolve_rail_collision};
use super::geometry::snap_to_rest;
use super::input::InputEvent;
use super::state::{Ball, TableEvent, TableState};
use crate::consts::{FRICTION, REST_EPSILON};

/// Apply one pointer event to the cue. Events outside the cue's precondition
/// windows are dropped silently.
pub fn apply_input(state: &mut TableState, event: &InputEvent, events: &mut Vec<TableEvent>) {
    match *event {
        InputEvent::PointerDown { .. } => {
            if state.cue.begin_aim(&state.balls) {
                log::trace!("Cue armed");
            }
        }
        InputEvent::PointerMove { .. } => {
            state.cue.update_aim(&state.balls, event.position());
        }
        InputEvent::PointerUp { .. } => {
            if let Some(velocity) = state.cue.release(&mut state.balls) {
                log::debug!(
                    "Shot fired: power={:.2} velocity=({:.2}, {:.2})",
                    velocity.length(),
                    velocity.x,
                    velocity.y
                );
                events.push(TableEvent::ShotFired { velocity });
            }
        }
    }
}

/// Advance the table by one tick.
///
/// Order: inputs, integrate, friction, rails, ball pairs, scoring.
pub fn tick(state: &mut TableState, inputs: &[InputEvent]) -> Vec<TableEvent> {
    let mut events = Vec::new();

    for input in inputs {
        apply_input(state, input, &mut events);
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Integrate, then bleed off speed
    for ball in &mut state.balls {
        ball.pos += ball.vel;
        ball.vel = snap_to_rest(ball.vel * FRICTION, REST_EPSILON);
    }

    // Rails
    for ball in &mut state.balls {
        let rails = resolve_rail_collision(ball, &state.bounds);
        if rails.is_empty() {
            continue;
        }
        for rail in rails.iter() {
            log::trace!("{} ball touched {} rail", ball.id.as_str(), rail.as_str());
            events.push(TableEvent::RailTouched { ball: ball.id, rail });
        }
        if ball.id.is_cue() {
            state.tracker.record_rails(rails);
            state.rail_flash.touch(rails, now);
        }
    }

    // Ball pairs, each unordered pair once
    let n = state.balls.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = pair_mut(&mut state.balls, i, j);
            if !detect_ball_collision(a, b) {
                continue;
            }
            resolve_ball_collision(a, b);
            let (a_id, b_id) = (a.id, b.id);
            log::trace!("{} ball hit {} ball", a_id.as_str(), b_id.as_str());
            events.push(TableEvent::BallsCollided { a: a_id, b: b_id });

            if a_id.is_cue() {
                state.tracker.record_hit(b_id);
            } else if b_id.is_cue() {
                state.tracker.record_hit(a_id);
            }
        }
    }

    // Scoring
    if state.cue_ball().is_stationary() {
        let eval = state.tracker.evaluate();
        if let Some(count) = eval.scored {
            events.push(TableEvent::CaromScored { count });
        }
        if eval.shot_ended {
            log::debug!(
                "Shot ended after tick {} (carom: {})",
                now,
                eval.scored.is_some()
            );
            events.push(TableEvent::ShotEnded {
                caromed: eval.scored.is_some(),
            });
        }
    } else {
        state.tracker.mark_moving();
    }

    events
}

/// Tick with no input until every ball is at rest or `max_ticks` have run.
///
/// Returns the number of ticks run and every event produced.
pub fn run_until_rest(state: &mut TableState, max_ticks: u32) -> (u32, Vec<TableEvent>) {
    let mut all_events = Vec::new();
    let mut ticks = 0;
    while ticks < max_ticks && !state.all_stationary() {
        all_events.extend(tick(state, &[]));
        ticks += 1;
    }
    (ticks, all_events)
}

/// Mutable references to two distinct balls, `i < j`
fn pair_mut(balls: &mut [Ball; 3], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert!(i < j);
    let (head, tail) = balls.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
