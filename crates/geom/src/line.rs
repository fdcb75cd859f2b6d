use crate::{point, Point, Vector};

/// An infinite line defined by a point and a vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line {
    pub point: Point,
    pub vector: Vector,
}

impl Line {
    /// Determinants below this are considered parallel.
    pub const PARALLEL_EPSILON: f32 = 1e-4;

    /// The line going through `from` and `to`.
    #[inline]
    pub fn between(from: Point, to: Point) -> Self {
        Line {
            point: from,
            vector: to - from,
        }
    }

    /// Computes the point where two lines cross.
    ///
    /// Returns `None` if the lines are parallel or close to parallel.
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        let det = self.vector.cross(other.vector);
        if det.abs() <= Self::PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let self_p2 = self.point + self.vector;
        let other_p2 = other.point + other.vector;
        let a = self.point.to_vector().cross(self_p2.to_vector());
        let b = other.point.to_vector().cross(other_p2.to_vector());

        Some(point(
            (b * self.vector.x - a * other.vector.x) * inv_det,
            (b * self.vector.y - a * other.vector.y) * inv_det,
        ))
    }

    pub fn distance_to_point(&self, p: &Point) -> f32 {
        self.signed_distance_to_point(p).abs()
    }

    /// Positive on the left side of the line (counter-clockwise from its vector).
    pub fn signed_distance_to_point(&self, p: &Point) -> f32 {
        let v = *p - self.point;
        self.vector.cross(v) / self.vector.length()
    }
}

#[cfg(test)]
use crate::vector;

#[test]
fn intersection_axis_aligned() {
    let l1 = Line {
        point: point(0.0, 1.0),
        vector: vector(1.0, 0.0),
    };
    let l2 = Line {
        point: point(3.0, -5.0),
        vector: vector(0.0, 2.0),
    };

    let i = l1.intersection(&l2).unwrap();
    assert!((i - point(3.0, 1.0)).length() < 1e-5, "{:?}", i);
}

#[test]
fn intersection_rotated() {
    use std::f32::consts::PI;
    let count: u32 = 64;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f32 / (count as f32) * 2.0 * PI;
            let angle2 = j as f32 / (count as f32) * 2.0 * PI;

            let l1 = Line {
                point: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                vector: vector(angle1.cos(), angle1.sin()),
            };
            let l2 = Line {
                point: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                vector: vector(angle2.cos(), angle2.sin()),
            };

            // Both lines go through the origin.
            let intersection = l1.intersection(&l2).unwrap();
            assert!(intersection.to_vector().length() < 0.001, "{:?}", intersection);
        }
    }
}

#[test]
fn parallel_lines() {
    let l1 = Line::between(point(0.0, 0.0), point(10.0, 0.0));
    let l2 = Line::between(point(0.0, 2.0), point(5.0, 2.0));
    let l3 = Line::between(point(0.0, 0.0), point(-1.0, 0.0));

    assert!(l1.intersection(&l2).is_none());
    assert!(l1.intersection(&l3).is_none());
}

#[test]
fn signed_distance() {
    let l = Line::between(point(0.0, 0.0), point(2.0, 0.0));
    assert_eq!(l.signed_distance_to_point(&point(1.0, 3.0)), 3.0);
    assert_eq!(l.signed_distance_to_point(&point(1.0, -3.0)), -3.0);
    assert_eq!(l.distance_to_point(&point(5.0, -3.0)), 3.0);
}
