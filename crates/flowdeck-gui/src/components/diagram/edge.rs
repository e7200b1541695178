//! Edge routing between node anchors.
//!
//! Edges leave the source node at its source anchor and arrive at the target
//! node's target anchor, following a cubic bezier whose control points reach
//! horizontally out of each anchor. Everything here is plain geometry so the
//! routing can be tested without a UI context.

use flowdeck_core::{Rect, Vec2};

/// Segments used when flattening a curve for drawing and hit-testing.
pub const CURVE_SEGMENTS: usize = 32;

/// Hover tolerance in canvas units.
pub const HIT_TOLERANCE: f32 = 6.0;

const MIN_REACH: f32 = 24.0;
const MAX_REACH: f32 = 140.0;

/// The source anchor sits at the midpoint of the node's left edge.
pub fn source_anchor(rect: &Rect) -> Vec2 {
    rect.left_center()
}

/// The target anchor sits at the midpoint of the node's right edge.
pub fn target_anchor(rect: &Rect) -> Vec2 {
    rect.right_center()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;
        Vec2::new(
            w0 * self.p0.x + w1 * self.p1.x + w2 * self.p2.x + w3 * self.p3.x,
            w0 * self.p0.y + w1 * self.p1.y + w2 * self.p2.y + w3 * self.p3.y,
        )
    }

    /// Flatten the curve into `segments + 1` points from t = 0 to t = 1.
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }

    /// Approximate distance from a point to the curve, via uniform sampling.
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.sample(CURVE_SEGMENTS)
            .into_iter()
            .map(|p| p.distance(point))
            .fold(f32::INFINITY, f32::min)
    }

    pub fn hit(&self, point: Vec2) -> bool {
        self.distance_to(point) <= HIT_TOLERANCE
    }
}

/// Triangle for the arrow head at the target end, aligned with the curve's
/// incoming tangent. Returns `[tip, base_a, base_b]`.
pub fn arrow_head(curve: &CubicBezier, size: f32) -> [Vec2; 3] {
    let towards = Vec2::new(curve.p3.x - curve.p2.x, curve.p3.y - curve.p2.y);
    let len = towards.length().max(f32::EPSILON);
    let dir = Vec2::new(towards.x / len, towards.y / len);
    let perp = Vec2::new(-dir.y, dir.x);

    let tip = curve.p3;
    let back = Vec2::new(tip.x - dir.x * size, tip.y - dir.y * size);
    let half = size * 0.5;
    [
        tip,
        Vec2::new(back.x + perp.x * half, back.y + perp.y * half),
        Vec2::new(back.x - perp.x * half, back.y - perp.y * half),
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct EdgeRouter {
    /// Fraction of the anchor distance the control points reach out.
    curvature: f32,
}

impl Default for EdgeRouter {
    fn default() -> Self {
        Self { curvature: 0.45 }
    }
}

impl EdgeRouter {
    pub fn new(curvature: f32) -> Self {
        Self { curvature }
    }

    /// Route an edge from the source node's source anchor to the target
    /// node's target anchor.
    pub fn route(&self, source: &Rect, target: &Rect) -> CubicBezier {
        let p0 = source_anchor(source);
        let p3 = target_anchor(target);
        let reach = (p0.distance(p3) * self.curvature).clamp(MIN_REACH, MAX_REACH);
        CubicBezier {
            p0,
            p1: Vec2::new(p0.x - reach, p0.y),
            p2: Vec2::new(p3.x + reach, p3.y),
            p3,
        }
    }
}
