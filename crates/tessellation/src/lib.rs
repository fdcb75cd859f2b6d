#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Tessellation of 2D lines of variable width and color into batched
//! triangle meshes.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [`LineTessellator`] - Turns polylines, open or closed, into strips of
//!   triangles with miter, round or bevel joins and butt, square or round caps.
//! * [`Stroke`] - How a line looks: its width, joins, caps and [`Fill`].
//! * [`Fill`] - Computes the color and texture coordinates of each vertex,
//!   with the knowledge of where the vertex is in the line or shape.
//! * [`DrawTarget`] - (See the documentation of the [draw_target module](draw_target/index.html))
//!   the interface the tessellators write vertices and triangles into. It
//!   represents a batch of bounded size which can be flushed when full.
//! * [`DrawBatch`] - A draw target with fixed-size vertex and 16-bit index
//!   arrays, handing each full batch over to a [`Submit`] sink.
//!
//! ## The tessellation pipeline
//!
//! A line is described one vertex at a time with a [`LineBuilder`], each
//! vertex optionally carrying its own width and color. When the line is
//! finished, colors that were not given are requested from the stroke's fill,
//! knowing the index of the vertex and the number of vertices in the line.
//! The tessellator then walks the line, emitting caps, joins and the quads in
//! between into the draw target, reserving room before each of them and
//! carrying the vertices it still needs over when the target has to flush.
//!
//! ```ascii
//!  LineBuilder::vertex*  ->  LineTessellator  ->  DrawTarget  ->  Submit
//!                              (caps, joins)      (DrawBatch)    (renderer)
//! ```
//!
//! ### Rendering the tessellated geometry
//!
//! The batches contain vertex and index buffers which are expected to be
//! rendered using the equivalent of OpenGL's `glDrawElements` with mode
//! `GL_TRIANGLES` and 16-bit indices. Each [`Vertex`] is `#[repr(C)]` and
//! implements `bytemuck::Pod`, so a batch can be uploaded as bytes.
//!
//! ## Examples
//!
//! - [Building lines](line/index.html#examples).
//! - [Writing a custom fill](fill/index.html).
//! - [Implementing a draw target](draw_target/index.html#implementing-a-draw-target).

pub use quill_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod basic_shapes;
mod batch;
mod color;
pub mod draw_target;
mod error;
pub mod fill;
pub mod line;
mod stroke;

#[cfg(test)]
mod line_tests;

pub use crate::geom::math;

#[doc(inline)]
pub use crate::batch::*;

#[doc(inline)]
pub use crate::color::*;

#[doc(inline)]
pub use crate::draw_target::{DrawTarget, TextureId, Vertex, VertexId};

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fill::{line_fn, DebugFill, Fill, LineFn, SolidFill, TiledTextureFill};

#[doc(inline)]
pub use crate::line::{
    line, line_loop, Edge, LineBuilder, LineTessellator, Polygon, SessionState,
    MAX_CAP_TRIANGLES, MAX_CAP_VERTICES, MAX_JOIN_TRIANGLES, MAX_JOIN_VERTICES,
};

#[doc(inline)]
pub use crate::stroke::*;
