//! Shape generation for the table
//!
//! Everything is emitted as triangle lists in table coordinates; the pipeline maps
//! them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::RAIL_FLASH_TICKS;
use crate::sim::{Rail, TableSnapshot};

/// Cushion thickness drawn outside the playing surface
pub const RAIL_THICKNESS: f32 = 12.0;
/// Aim line width
pub const AIM_LINE_WIDTH: f32 = 2.0;
const BALL_SEGMENTS: u32 = 24;

/// Rail color at tick `now`, given when the cue ball last touched it.
///
/// A fresh touch shows the flash color, fading back to the plain rail over
/// `RAIL_FLASH_TICKS`.
pub fn rail_color(now: u64, last_touched: Option<u64>) -> [f32; 4] {
    let Some(touched) = last_touched else {
        return colors::RAIL;
    };
    let age = now.saturating_sub(touched);
    if age >= RAIL_FLASH_TICKS {
        return colors::RAIL;
    }
    let t = age as f32 / RAIL_FLASH_TICKS as f32;
    lerp_color(colors::RAIL_FLASH, colors::RAIL, t)
}

fn lerp_color(from: [f32; 4], to: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| from[i] + (to[i] - from[i]) * t)
}

/// Axis-aligned rectangle as two triangles
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thick line segment as a quad
pub fn line(start: Vec2, end: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = start + perp;
    let b = start - perp;
    let c = end + perp;
    let d = end - perp;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Cushion strip just outside the playing surface
fn rail_strip(rail: Rail, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = RAIL_THICKNESS;
    match rail {
        Rail::Top => rect(Vec2::new(-t, -t), Vec2::new(width + t, 0.0), color),
        Rail::Bottom => rect(Vec2::new(-t, height), Vec2::new(width + t, height + t), color),
        Rail::Left => rect(Vec2::new(-t, 0.0), Vec2::new(0.0, height), color),
        Rail::Right => rect(Vec2::new(width, 0.0), Vec2::new(width + t, height), color),
    }
}

/// Full frame: felt, rails, balls, then the aim line on top
pub fn table_vertices(snapshot: &TableSnapshot) -> Vec<Vertex> {
    let mut vertices = rect(
        Vec2::ZERO,
        Vec2::new(snapshot.width, snapshot.height),
        colors::FELT,
    );

    for view in &snapshot.rails {
        let color = rail_color(snapshot.now, view.last_touched);
        vertices.extend(rail_strip(view.rail, snapshot.width, snapshot.height, color));
    }

    for ball in &snapshot.balls {
        vertices.extend(circle(ball.pos, ball.radius, ball.color, BALL_SEGMENTS));
    }

    if let Some((start, end)) = snapshot.aim_line {
        vertices.extend(line(start, end, AIM_LINE_WIDTH, colors::AIM_LINE));
    }

    vertices
}
