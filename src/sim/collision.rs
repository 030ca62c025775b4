//! Collision detection and response
//!
//! Two kinds of contact on a carom table:
//! - ball against ball: equal-mass elastic exchange of the normal components,
//!   followed by positional de-penetration
//! - ball against rail: clamp back inside the table and reflect the crossing
//!   velocity component, losing energy to the cushion

use super::geometry::ContactFrame;
use super::state::{Ball, Rail, RailSet, TableBounds};
use crate::consts::RAIL_RESTITUTION;

/// True if the two balls overlap
#[inline]
pub fn detect_ball_collision(a: &Ball, b: &Ball) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// Resolve an overlapping pair.
///
/// Normal components of the two velocities are swapped and tangential components
/// kept, then each ball is pushed out along the normal by half the overlap.
/// Returns false (and leaves both balls untouched) when the centres coincide.
pub fn resolve_ball_collision(a: &mut Ball, b: &mut Ball) -> bool {
    let Some(frame) = ContactFrame::between(a.pos, b.pos) else {
        log::trace!("Skipping contact with coincident centres at {:?}", a.pos);
        return false;
    };

    let (a_normal, a_tangent) = frame.decompose(a.vel);
    let (b_normal, b_tangent) = frame.decompose(b.vel);

    a.vel = frame.compose(b_normal, a_tangent);
    b.vel = frame.compose(a_normal, b_tangent);

    let overlap = a.radius + b.radius - frame.distance;
    let correction = frame.normal * (overlap / 2.0);
    a.pos += correction;
    b.pos -= correction;

    true
}

/// Bounce a ball off any rail it has crossed.
///
/// Returns the rails touched this tick. Corner contacts report two rails.
pub fn resolve_rail_collision(ball: &mut Ball, bounds: &TableBounds) -> RailSet {
    let mut touched = RailSet::new();
    let r = ball.radius;

    if ball.pos.x + r > bounds.width {
        ball.pos.x = bounds.width - r;
        ball.vel.x = -ball.vel.x * RAIL_RESTITUTION;
        touched.insert(Rail::Right);
    }
    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x * RAIL_RESTITUTION;
        touched.insert(Rail::Left);
    }
    if ball.pos.y + r > bounds.height {
        ball.pos.y = bounds.height - r;
        ball.vel.y = -ball.vel.y * RAIL_RESTITUTION;
        touched.insert(Rail::Bottom);
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y * RAIL_RESTITUTION;
        touched.insert(Rail::Top);
    }

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ball(id: BallKind, x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut b = Ball::new(id, Vec2::new(x, y));
        b.vel = Vec2::new(vx, vy);
        b
    }

    fn table() -> TableBounds {
        TableBounds::new(400.0, 200.0).unwrap()
    }

    #[test]
    fn test_detect_ball_collision() {
        let a = ball(BallKind::Cue, 100.0, 100.0, 0.0, 0.0);
        let touching = ball(BallKind::Red, 119.0, 100.0, 0.0, 0.0);
        let apart = ball(BallKind::Red, 120.0, 100.0, 0.0, 0.0);
        assert!(detect_ball_collision(&a, &touching));
        // Exactly touching is not a collision
        assert!(!detect_ball_collision(&a, &apart));
    }

    #[test]
    fn test_head_on_exchanges_velocity() {
        let mut a = ball(BallKind::Cue, 100.0, 100.0, 5.0, 0.0);
        let mut b = ball(BallKind::Yellow, 115.0, 100.0, 0.0, 0.0);

        assert!(resolve_ball_collision(&mut a, &mut b));
        assert!(a.vel.length() < 1e-6);
        assert!((b.vel - Vec2::new(5.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_glancing_keeps_tangential_component() {
        // Contact normal along x, cue moving diagonally
        let mut a = ball(BallKind::Cue, 100.0, 100.0, 3.0, 4.0);
        let mut b = ball(BallKind::Red, 118.0, 100.0, 0.0, 0.0);
        resolve_ball_collision(&mut a, &mut b);

        assert!(a.vel.x.abs() < 1e-6);
        assert!((a.vel.y - 4.0).abs() < 1e-6);
        assert!((b.vel.x - 3.0).abs() < 1e-6);
        assert!(b.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_depenetration_separates_pair() {
        let mut a = ball(BallKind::Cue, 100.0, 100.0, 1.0, 0.0);
        let mut b = ball(BallKind::Yellow, 112.0, 100.0, 0.0, 0.0);
        resolve_ball_collision(&mut a, &mut b);

        // Overlap of 8 split evenly
        assert!((a.pos.x - 96.0).abs() < 1e-4);
        assert!((b.pos.x - 116.0).abs() < 1e-4);
        assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_centres_are_skipped() {
        let mut a = ball(BallKind::Cue, 50.0, 50.0, 1.0, 2.0);
        let mut b = ball(BallKind::Red, 50.0, 50.0, -1.0, 0.0);
        let (a0, b0) = (a, b);

        assert!(!resolve_ball_collision(&mut a, &mut b));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_rail_clamps_to_exact_boundary() {
        let bounds = table();

        let mut b = ball(BallKind::Cue, 395.0, 100.0, 5.0, 0.0);
        let rails = resolve_rail_collision(&mut b, &bounds);
        assert!(rails.contains(Rail::Right));
        assert_eq!(rails.len(), 1);
        assert_eq!(b.pos.x, 390.0);
        assert_eq!(b.vel.x, -4.5);

        let mut b = ball(BallKind::Cue, 3.0, 100.0, -5.0, 1.0);
        let rails = resolve_rail_collision(&mut b, &bounds);
        assert!(rails.contains(Rail::Left));
        assert_eq!(b.pos.x, 10.0);
        assert_eq!(b.vel.x, 4.5);
        assert_eq!(b.vel.y, 1.0);

        let mut b = ball(BallKind::Cue, 100.0, 195.0, 0.0, 2.0);
        let rails = resolve_rail_collision(&mut b, &bounds);
        assert!(rails.contains(Rail::Bottom));
        assert_eq!(b.pos.y, 190.0);

        let mut b = ball(BallKind::Cue, 100.0, 4.0, 0.0, -2.0);
        let rails = resolve_rail_collision(&mut b, &bounds);
        assert!(rails.contains(Rail::Top));
        assert_eq!(b.pos.y, 10.0);
    }

    #[test]
    fn test_corner_touches_two_rails() {
        let mut b = ball(BallKind::Cue, 2.0, 198.0, -3.0, 3.0);
        let rails = resolve_rail_collision(&mut b, &table());
        assert_eq!(rails.len(), 2);
        assert!(rails.contains(Rail::Left));
        assert!(rails.contains(Rail::Bottom));
        assert_eq!(b.pos, Vec2::new(10.0, 190.0));
    }

    #[test]
    fn test_inside_ball_touches_nothing() {
        let mut b = ball(BallKind::Cue, 200.0, 100.0, 3.0, 3.0);
        let before = b;
        assert!(resolve_rail_collision(&mut b, &table()).is_empty());
        assert_eq!(b, before);
    }

    proptest! {
        #[test]
        fn prop_ball_collision_conserves_momentum_and_energy(
            ax in 80.0f32..120.0, ay in 80.0f32..120.0,
            dx in -19.0f32..19.0, dy in -19.0f32..19.0,
            avx in -20.0f32..20.0, avy in -20.0f32..20.0,
            bvx in -20.0f32..20.0, bvy in -20.0f32..20.0,
        ) {
            prop_assume!(dx * dx + dy * dy > 1.0);
            let mut a = ball(BallKind::Cue, ax, ay, avx, avy);
            let mut b = ball(BallKind::Red, ax + dx, ay + dy, bvx, bvy);
            prop_assume!(detect_ball_collision(&a, &b));

            let momentum = a.vel + b.vel;
            let energy = a.kinetic_energy() + b.kinetic_energy();

            prop_assert!(resolve_ball_collision(&mut a, &mut b));

            let tol = 1e-3 * (1.0 + energy);
            prop_assert!(((a.vel + b.vel) - momentum).length() < 1e-3);
            prop_assert!(((a.kinetic_energy() + b.kinetic_energy()) - energy).abs() < tol);
            prop_assert!(!detect_ball_collision(&a, &b) || (a.pos.distance(b.pos) - 20.0).abs() < 1e-3);
        }

        #[test]
        fn prop_rail_keeps_ball_on_table(
            x in -50.0f32..450.0, y in -50.0f32..250.0,
            vx in -30.0f32..30.0, vy in -30.0f32..30.0,
        ) {
            let bounds = table();
            let mut b = ball(BallKind::Cue, x, y, vx, vy);
            let speed = b.vel.length();
            resolve_rail_collision(&mut b, &bounds);
            prop_assert!(bounds.contains(&b));
            prop_assert!(b.vel.length() <= speed + 1e-4);
        }
    }
}
