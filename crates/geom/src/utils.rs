//! Small vector helpers shared by the tessellators.

use crate::{vector, Angle, Vector};

/// The normal on the left of `v`, rotated a quarter turn counter-clockwise.
#[inline]
pub fn left_normal(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// The normal on the right of `v`, rotated a quarter turn clockwise.
#[inline]
pub fn right_normal(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Normalizes `v`, or returns the zero vector if `v` has no length.
#[inline]
pub fn normalized_or_zero(v: Vector) -> Vector {
    v.try_normalize().unwrap_or_else(Vector::zero)
}

/// Whether going from direction `from` to direction `to` is a right turn.
///
/// Going straight counts as a right turn.
#[inline]
pub fn turns_right(from: Vector, to: Vector) -> bool {
    right_normal(from).dot(to) >= 0.0
}

/// The signed angle from `from` to `to`, counter-clockwise being positive,
/// in `[-PI, PI]`.
#[inline]
pub fn signed_angle(from: Vector, to: Vector) -> Angle {
    Angle::radians(from.cross(to).atan2(from.dot(to)))
}

#[test]
fn normals() {
    let v = vector(1.0, 0.0);
    assert_eq!(left_normal(v), vector(0.0, 1.0));
    assert_eq!(right_normal(v), vector(0.0, -1.0));
    assert_eq!(normalized_or_zero(vector(0.0, 0.0)), vector(0.0, 0.0));
    assert_eq!(normalized_or_zero(vector(0.0, 3.0)), vector(0.0, 1.0));
}

#[test]
fn turn_direction() {
    let east = vector(1.0, 0.0);
    assert!(turns_right(east, vector(0.0, -1.0)));
    assert!(!turns_right(east, vector(0.0, 1.0)));
    // Straight lines are considered right turns.
    assert!(turns_right(east, east));
}

#[test]
fn angles() {
    use std::f32::consts::FRAC_PI_2;
    let east = vector(1.0, 0.0);
    assert!((signed_angle(east, vector(0.0, 1.0)).radians - FRAC_PI_2).abs() < 1e-6);
    assert!((signed_angle(east, vector(0.0, -1.0)).radians + FRAC_PI_2).abs() < 1e-6);
    assert_eq!(signed_angle(east, east).radians, 0.0);
}
