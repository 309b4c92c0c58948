//! Shape generation for 2D primitives
//!
//! All positions are field pixels (Y down); the pipeline converts to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{BodyTag, RenderBody};

/// Outline width for boxes (pixels)
pub const OUTLINE_WIDTH: f32 = 1.0;
/// Pendulum constraint line width (pixels)
pub const CONSTRAINT_WIDTH: f32 = 1.0;

fn tag_color(tag: BodyTag) -> [f32; 4] {
    match tag {
        BodyTag::Ground => colors::GROUND,
        BodyTag::Wall => colors::WALL,
        BodyTag::FinishLine => colors::FINISH_LINE,
        BodyTag::PendingBox => colors::PENDING_BOX,
        BodyTag::SettledBox => colors::SETTLED_BOX,
        BodyTag::Pendulum => colors::PENDULUM,
    }
}

/// Push two triangles covering the quad a-b-c-d (in winding order)
fn push_quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
    vertices.push(Vertex::new(a.x, a.y, color));
}

/// Corners of a rotated rectangle, counter-clockwise from top-left
fn corners(center: Vec2, half_extents: Vec2, rotation: f32) -> [Vec2; 4] {
    let rot = Vec2::from_angle(rotation);
    [
        Vec2::new(-half_extents.x, -half_extents.y),
        Vec2::new(-half_extents.x, half_extents.y),
        Vec2::new(half_extents.x, half_extents.y),
        Vec2::new(half_extents.x, -half_extents.y),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// Generate vertices for a filled rectangle
pub fn rect_fill(center: Vec2, half_extents: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners(center, half_extents, rotation);
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, a, b, c, d, color);
    vertices
}

/// Generate vertices for a rectangle outline (band inside the edges)
pub fn rect_outline(
    center: Vec2,
    half_extents: Vec2,
    rotation: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let outer = corners(center, half_extents, rotation);
    let inner_half = (half_extents - Vec2::splat(width)).max(Vec2::ZERO);
    let inner = corners(center, inner_half, rotation);

    let mut vertices = Vec::with_capacity(24);
    for i in 0..4 {
        let j = (i + 1) % 4;
        push_quad(&mut vertices, outer[i], outer[j], inner[j], inner[i], color);
    }
    vertices
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, from + perp, from - perp, to - perp, to + perp, color);
    vertices
}

/// Everything on the field for one frame: static bodies filled, boxes
/// outlined, then the constraint line on top
pub fn scene_vertices(bodies: &[RenderBody], pendulum_line: Option<(Vec2, Vec2)>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(bodies.len() * 24 + 6);

    for body in bodies {
        let color = tag_color(body.tag);
        if body.tag.is_outlined() {
            vertices.extend(rect_outline(
                body.center,
                body.half_extents,
                body.rotation,
                OUTLINE_WIDTH,
                color,
            ));
        } else {
            vertices.extend(rect_fill(body.center, body.half_extents, body.rotation, color));
        }
    }

    if let Some((anchor, end)) = pendulum_line {
        vertices.extend(line(anchor, end, CONSTRAINT_WIDTH, colors::CONSTRAINT));
    }

    vertices
}
