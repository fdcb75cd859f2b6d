#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Overview.
//!
//! This crate implements the few geometric tools the stroke tessellator needs:
//!
//! - Aliases for the euclid types used everywhere in quill ([`Point`], [`Vector`],
//!   [`Box2D`], [`Size`]) and shorthand constructors for them.
//! - Infinite [`Line`]s with an intersection test, used to compute miter joins.
//! - [`ArcStepper`], which walks around a circle by a fixed angle increment using
//!   a precomputed rotation, used to approximate round joins and caps.
//! - A few [`utils`] to build the left and right normals of a direction.
//!
//! All of the types use `f32` coordinates, since they end up in 16-bit indexed
//! GPU vertex buffers anyway.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod arc;
mod line;
pub mod utils;

#[doc(inline)]
pub use crate::arc::ArcStepper;
#[doc(inline)]
pub use crate::line::Line;

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Size2D<f32>`.
pub type Size = euclid::default::Size2D<f32>;

/// Alias for `euclid::default::Box2D<f32>`
pub type Box2D = euclid::default::Box2D<f32>;

/// An angle in radians.
pub type Angle = euclid::Angle<f32>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Size::new(w, h)`.
#[inline]
pub fn size(w: f32, h: f32) -> Size {
    Size::new(w, h)
}

/// Shorthand for the box that starts at `origin` and extends by `size`.
#[inline]
pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Box2D {
    Box2D::new(point(x, y), point(x + w, y + h))
}

pub mod math {
    //! Basic types that are used everywhere. Most other quill crates
    //! reexport them.

    pub use super::{point, rect, size, vector, Angle, Box2D, Point, Size, Vector};
}
