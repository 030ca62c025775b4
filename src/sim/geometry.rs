//! Vector helpers for contact resolution
//!
//! Ball-ball contacts are resolved in a local frame: the unit normal along the
//! line of centres and the unit tangent perpendicular to it.

use glam::Vec2;

/// Local contact frame between two ball centres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFrame {
    /// Unit vector from `b` toward `a`
    pub normal: Vec2,
    /// Unit vector perpendicular to `normal`
    pub tangent: Vec2,
    /// Distance between the centres
    pub distance: f32,
}

impl ContactFrame {
    /// Build the frame for centres `a` and `b`.
    ///
    /// Returns `None` when the centres coincide, since no normal exists.
    pub fn between(a: Vec2, b: Vec2) -> Option<Self> {
        let delta = a - b;
        let distance = delta.length();
        if distance == 0.0 || !distance.is_finite() {
            return None;
        }
        let normal = delta / distance;
        Some(Self {
            normal,
            tangent: tangent_of(normal),
            distance,
        })
    }

    /// Split a velocity into (normal, tangent) scalar components
    #[inline]
    pub fn decompose(&self, velocity: Vec2) -> (f32, f32) {
        (velocity.dot(self.normal), velocity.dot(self.tangent))
    }

    /// Rebuild a velocity from (normal, tangent) scalar components
    #[inline]
    pub fn compose(&self, normal: f32, tangent: f32) -> Vec2 {
        self.tangent * tangent + self.normal * normal
    }
}

/// Left-hand perpendicular of a unit vector
#[inline]
pub fn tangent_of(normal: Vec2) -> Vec2 {
    Vec2::new(-normal.y, normal.x)
}

/// Snap components whose magnitude is below `epsilon` to exactly zero
#[inline]
pub fn snap_to_rest(velocity: Vec2, epsilon: f32) -> Vec2 {
    Vec2::new(
        if velocity.x.abs() < epsilon { 0.0 } else { velocity.x },
        if velocity.y.abs() < epsilon { 0.0 } else { velocity.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_orthonormal() {
        let frame = ContactFrame::between(Vec2::new(3.0, 4.0), Vec2::ZERO).unwrap();
        assert!((frame.distance - 5.0).abs() < 1e-6);
        assert!((frame.normal.length() - 1.0).abs() < 1e-6);
        assert!((frame.tangent.length() - 1.0).abs() < 1e-6);
        assert!(frame.normal.dot(frame.tangent).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centres_have_no_frame() {
        let p = Vec2::new(50.0, 50.0);
        assert!(ContactFrame::between(p, p).is_none());
    }

    #[test]
    fn test_decompose_compose_recovers_velocity() {
        let frame = ContactFrame::between(Vec2::new(1.0, 2.0), Vec2::new(-2.0, 0.5)).unwrap();
        let v = Vec2::new(3.5, -1.25);
        let (n, t) = frame.decompose(v);
        let back = frame.compose(n, t);
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn test_snap_to_rest_is_per_axis() {
        let v = snap_to_rest(Vec2::new(0.005, -2.0), 0.01);
        assert_eq!(v, Vec2::new(0.0, -2.0));
        let v = snap_to_rest(Vec2::new(-0.0099, 0.0099), 0.01);
        assert_eq!(v, Vec2::ZERO);
    }
}
