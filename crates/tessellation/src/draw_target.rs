//! The interface between the tessellators and the geometry they produce.
//!
//! ## Overview
//!
//! The tessellators don't write vertex and index buffers themselves. They push
//! [`Vertex`] values and triangles into a [`DrawTarget`], which owns a batch of
//! bounded size and decides what "full" means and what happens to a batch once
//! it is full (uploading it to the GPU, recording it, dropping it...).
//!
//! Vertex ids handed out by a target are only valid until the next flush. A
//! tessellator that is in the middle of a shape when a flush happens is
//! responsible for carrying the vertices it still needs over to the new batch,
//! which is why targets allow reading back an in-flight vertex with
//! [`DrawTarget::vertex`].
//!
//! The crate provides [`DrawBatch`](crate::DrawBatch) as the standard
//! implementation.
//!
//! ## Implementing a draw target
//!
//! ```
//! use quill_tessellation::{DrawTarget, TextureId, Vertex, VertexId};
//!
//! /// Counts triangles, never flushes.
//! #[derive(Default)]
//! struct Counter {
//!     vertices: Vec<Vertex>,
//!     triangles: u32,
//!     texture: TextureId,
//! }
//!
//! impl DrawTarget for Counter {
//!     fn can_fit(&self, vertices: u32, _triangles: u32) -> bool {
//!         self.vertices.len() + vertices as usize <= u16::MAX as usize
//!     }
//!     fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
//!         self.vertices.push(vertex);
//!         VertexId::from_usize(self.vertices.len() - 1)
//!     }
//!     fn vertex(&self, id: VertexId) -> Vertex {
//!         self.vertices[id.to_usize()]
//!     }
//!     fn add_triangle(&mut self, _a: VertexId, _b: VertexId, _c: VertexId) {
//!         self.triangles += 1;
//!     }
//!     fn flush(&mut self) {
//!         self.vertices.clear();
//!     }
//!     fn texture(&self) -> TextureId {
//!         self.texture
//!     }
//!     fn set_texture(&mut self, texture: TextureId) {
//!         self.texture = texture;
//!     }
//! }
//! ```

use crate::color::Color;
use crate::error::DrawTargetError;
use crate::math::Point;

use bytemuck::{Pod, Zeroable};

/// A vertex produced by the tessellators, laid out to be uploaded as is.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    pub fn new(position: Point, color: Color, uv: [f32; 2]) -> Self {
        Vertex {
            position: position.to_array(),
            color,
            uv,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::from(self.position)
    }
}

/// A virtual vertex offset in a batch.
///
/// The `VertexId`s are only valid until the next flush of the draw target
/// that created them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub u16);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u16::MAX);

    #[inline]
    pub fn offset(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_usize(v: usize) -> Self {
        debug_assert!(v <= u16::MAX as usize);
        VertexId(v as u16)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}

impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0 as u32
    }
}

/// An opaque handle to a texture owned by the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TextureId(pub u32);

/// A bounded batch of vertices and triangles that the tessellators write into.
///
/// See the [module documentation](index.html).
pub trait DrawTarget {
    /// Whether the current batch has room for this many more vertices and
    /// triangles without flushing.
    fn can_fit(&self, vertices: u32, triangles: u32) -> bool;

    /// Flushes the current batch if it can't take this many more vertices and
    /// triangles.
    ///
    /// Returns whether a flush happened. Fails if the request would not fit
    /// in an empty batch either, in which case the batch is left flushed.
    fn ensure_capacity(&mut self, vertices: u32, triangles: u32) -> Result<bool, DrawTargetError> {
        if self.can_fit(vertices, triangles) {
            return Ok(false);
        }

        self.flush();

        if self.can_fit(vertices, triangles) {
            Ok(true)
        } else {
            Err(DrawTargetError::RequestTooLarge { vertices, triangles })
        }
    }

    /// Appends a vertex to the current batch.
    ///
    /// The caller must have made sure there is room for it.
    fn add_vertex(&mut self, vertex: Vertex) -> VertexId;

    /// Reads back a vertex of the current batch.
    fn vertex(&self, id: VertexId) -> Vertex;

    /// Appends a triangle made of vertices of the current batch.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// Appends the two triangles `(bl, tl, tr)` and `(tr, br, bl)`.
    fn add_quad(&mut self, bl: VertexId, tl: VertexId, tr: VertexId, br: VertexId) {
        self.add_triangle(bl, tl, tr);
        self.add_triangle(tr, br, bl);
    }

    /// Submits the current batch and starts an empty one.
    ///
    /// All previously returned vertex ids are invalidated.
    fn flush(&mut self);

    /// The texture the current batch is drawn with.
    fn texture(&self) -> TextureId;

    /// Changes the texture of the following geometry, flushing first if it
    /// differs from the current one.
    fn set_texture(&mut self, texture: TextureId);
}

impl<'l, T: DrawTarget + ?Sized> DrawTarget for &'l mut T {
    fn can_fit(&self, vertices: u32, triangles: u32) -> bool {
        (**self).can_fit(vertices, triangles)
    }
    fn ensure_capacity(&mut self, vertices: u32, triangles: u32) -> Result<bool, DrawTargetError> {
        (**self).ensure_capacity(vertices, triangles)
    }
    fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        (**self).add_vertex(vertex)
    }
    fn vertex(&self, id: VertexId) -> Vertex {
        (**self).vertex(id)
    }
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        (**self).add_triangle(a, b, c)
    }
    fn add_quad(&mut self, bl: VertexId, tl: VertexId, tr: VertexId, br: VertexId) {
        (**self).add_quad(bl, tl, tr, br)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
    fn texture(&self) -> TextureId {
        (**self).texture()
    }
    fn set_texture(&mut self, texture: TextureId) {
        (**self).set_texture(texture)
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn vertex_layout() {
    assert_eq!(std::mem::size_of::<Vertex>(), 20);

    let v = Vertex::new(point(1.0, 2.0), Color::BLACK, [0.5, 0.25]);
    assert_eq!(v.position(), point(1.0, 2.0));

    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
    assert_eq!(floats.len(), 5);
    assert_eq!(floats[0], 1.0);
    assert_eq!(floats[2].to_bits(), Color::BLACK.0);
    assert_eq!(floats[4], 0.25);
}

#[test]
fn default_quad_and_capacity() {
    struct Log {
        triangles: Vec<[u16; 3]>,
        room: u32,
        flushes: u32,
    }

    impl DrawTarget for Log {
        fn can_fit(&self, vertices: u32, _: u32) -> bool {
            vertices <= self.room
        }
        fn add_vertex(&mut self, _: Vertex) -> VertexId {
            VertexId(0)
        }
        fn vertex(&self, _: VertexId) -> Vertex {
            Vertex::default()
        }
        fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
            self.triangles.push([a.0, b.0, c.0]);
        }
        fn flush(&mut self) {
            self.flushes += 1;
            self.room = 10;
        }
        fn texture(&self) -> TextureId {
            TextureId(0)
        }
        fn set_texture(&mut self, _: TextureId) {}
    }

    let mut target = Log {
        triangles: Vec::new(),
        room: 2,
        flushes: 0,
    };

    target.add_quad(VertexId(0), VertexId(1), VertexId(2), VertexId(3));
    assert_eq!(target.triangles, vec![[0, 1, 2], [2, 3, 0]]);

    assert_eq!(target.ensure_capacity(2, 0), Ok(false));
    assert_eq!(target.ensure_capacity(5, 0), Ok(true));
    assert_eq!(
        (&mut target).ensure_capacity(11, 3),
        Err(DrawTargetError::RequestTooLarge {
            vertices: 11,
            triangles: 3
        })
    );
    assert_eq!(target.flushes, 2);
}
