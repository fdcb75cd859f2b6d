//! A fixed-capacity vertex/index batch that hands itself over to a sink when
//! it is full.
//!
//! ## Overview
//!
//! [`DrawBatch`] is the standard [`DrawTarget`]. It stores vertices and 16-bit
//! indices in arrays allocated once, and everything that forces the geometry
//! drawn so far to be submitted (running out of room, changing texture or
//! blend mode, finishing the frame) goes through [`DrawBatch::flush`], which
//! passes a [`Batch`] to a [`Submit`] sink.
//!
//! What a sink does with a batch is up to the renderer. Closures taking a
//! `&Batch` are sinks, and [`Recorder`] keeps a copy of every batch.
//!
//! ```
//! use quill_tessellation::{DrawBatch, LineTessellator, Recorder, Stroke};
//! use quill_tessellation::math::point;
//!
//! let mut batch = DrawBatch::new(Recorder::new());
//! let mut tessellator = LineTessellator::new();
//!
//! tessellator.stroke_polyline(
//!     &Stroke::white(),
//!     &[point(0.0, 0.0), point(100.0, 0.0), point(100.0, 100.0)],
//!     &mut batch,
//! ).unwrap();
//! batch.finish();
//!
//! assert_eq!(batch.sink().batches().len(), 1);
//! ```

use crate::draw_target::{DrawTarget, TextureId, Vertex, VertexId};
use crate::error::DrawTargetError;

use std::fmt;

/// How a batch is composited with what was drawn before.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum BlendMode {
    /// Overwrite.
    #[default]
    None,
    /// Source alpha, one minus source alpha.
    Alpha,
    /// Source alpha, one.
    Additive,
}

/// The geometry submitted by one flush.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Batch<'l> {
    pub vertices: &'l [Vertex],
    pub indices: &'l [u16],
    pub texture: TextureId,
    pub blend: BlendMode,
}

impl<'l> Batch<'l> {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles of the batch, resolving the indices.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + 'l {
        let vertices = self.vertices;
        self.indices.chunks_exact(3).map(move |tri| {
            [
                vertices[tri[0] as usize],
                vertices[tri[1] as usize],
                vertices[tri[2] as usize],
            ]
        })
    }
}

/// Receives the batches flushed by a [`DrawBatch`].
pub trait Submit {
    fn submit(&mut self, batch: &Batch);
}

impl<F> Submit for F
where
    F: FnMut(&Batch),
{
    fn submit(&mut self, batch: &Batch) {
        self(batch)
    }
}

/// An owned copy of a submitted [`Batch`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedBatch {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub texture: TextureId,
    pub blend: BlendMode,
}

impl RecordedBatch {
    pub fn as_batch(&self) -> Batch<'_> {
        Batch {
            vertices: &self.vertices,
            indices: &self.indices,
            texture: self.texture,
            blend: self.blend,
        }
    }
}

/// A sink that keeps a copy of every submitted batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    batches: Vec<RecordedBatch>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    pub fn batches(&self) -> &[RecordedBatch] {
        &self.batches
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.batches.iter().map(|b| b.indices.len() / 3).sum()
    }

    /// All recorded triangles, in submission order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.batches.iter().flat_map(|b| {
            b.indices.chunks_exact(3).map(move |tri| {
                [
                    b.vertices[tri[0] as usize],
                    b.vertices[tri[1] as usize],
                    b.vertices[tri[2] as usize],
                ]
            })
        })
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl Submit for Recorder {
    fn submit(&mut self, batch: &Batch) {
        self.batches.push(RecordedBatch {
            vertices: batch.vertices.to_vec(),
            indices: batch.indices.to_vec(),
            texture: batch.texture,
            blend: batch.blend,
        });
    }
}

/// A [`DrawTarget`] writing into fixed-size vertex and index arrays.
///
/// See the [module documentation](index.html).
pub struct DrawBatch<S> {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    max_vertices: usize,
    max_indices: usize,

    default_texture: TextureId,
    texture: TextureId,
    blend: BlendMode,

    render_calls: u32,
    total_render_calls: u32,
    max_vertices_in_batch: usize,

    sink: S,
}

impl<S: Submit> DrawBatch<S> {
    /// Room for this many vertices and as many indices by default.
    pub const DEFAULT_CAPACITY: usize = i16::MAX as usize;

    /// The largest vertex capacity addressable with 16-bit indices.
    pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

    pub fn new(sink: S) -> Self {
        DrawBatch::allocate(Self::DEFAULT_CAPACITY, Self::DEFAULT_CAPACITY, sink)
    }

    pub fn with_capacity(vertices: usize, indices: usize, sink: S) -> Result<Self, DrawTargetError> {
        if vertices == 0 || indices == 0 || vertices > Self::MAX_VERTICES {
            return Err(DrawTargetError::InvalidCapacity { vertices, indices });
        }

        Ok(DrawBatch::allocate(vertices, indices, sink))
    }

    fn allocate(max_vertices: usize, max_indices: usize, sink: S) -> Self {
        DrawBatch {
            vertices: Vec::with_capacity(max_vertices),
            indices: Vec::with_capacity(max_indices),
            max_vertices,
            max_indices,
            default_texture: TextureId::default(),
            texture: TextureId::default(),
            blend: BlendMode::default(),
            render_calls: 0,
            total_render_calls: 0,
            max_vertices_in_batch: 0,
            sink,
        }
    }

    /// Sets the texture used by geometry that doesn't ask for one and makes
    /// it the current texture.
    pub fn with_default_texture(mut self, texture: TextureId) -> Self {
        self.default_texture = texture;
        self.texture = texture;
        self
    }

    pub fn default_texture(&self) -> TextureId {
        self.default_texture
    }

    /// Goes back to the default texture, flushing if needed.
    pub fn reset_texture(&mut self) {
        let texture = self.default_texture;
        self.set_texture(texture);
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Changes the blend mode of the following geometry, flushing first if
    /// it differs from the current one.
    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        if blend != self.blend {
            self.flush();
            self.blend = blend;
        }
    }

    /// Submits whatever is left in the batch.
    pub fn finish(&mut self) {
        self.flush();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_capacity(&self) -> usize {
        self.max_vertices
    }

    pub fn index_capacity(&self) -> usize {
        self.max_indices
    }

    /// Number of batches submitted since the last call to `reset_render_calls`.
    pub fn render_calls(&self) -> u32 {
        self.render_calls
    }

    /// Number of batches submitted since creation.
    pub fn total_render_calls(&self) -> u32 {
        self.total_render_calls
    }

    /// The vertex count of the largest batch submitted so far.
    pub fn max_vertices_in_batch(&self) -> usize {
        self.max_vertices_in_batch
    }

    pub fn reset_render_calls(&mut self) {
        self.render_calls = 0;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns the sink, dropping any geometry that was not flushed.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: Submit> DrawTarget for DrawBatch<S> {
    fn can_fit(&self, vertices: u32, triangles: u32) -> bool {
        self.vertices.len() + vertices as usize <= self.max_vertices
            && self.indices.len() + triangles as usize * 3 <= self.max_indices
    }

    fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        assert!(
            self.vertices.len() < self.max_vertices,
            "vertex added to a full batch"
        );
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(vertex);

        id
    }

    fn vertex(&self, id: VertexId) -> Vertex {
        self.vertices[id.to_usize()]
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(self.indices.len() + 3 <= self.max_indices);
        debug_assert!(a.to_usize() < self.vertices.len());
        debug_assert!(b.to_usize() < self.vertices.len());
        debug_assert!(c.to_usize() < self.vertices.len());
        self.indices.extend_from_slice(&[a.0, b.0, c.0]);
    }

    fn flush(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        self.render_calls += 1;
        self.total_render_calls += 1;
        self.max_vertices_in_batch = self.max_vertices_in_batch.max(self.vertices.len());

        self.sink.submit(&Batch {
            vertices: &self.vertices,
            indices: &self.indices,
            texture: self.texture,
            blend: self.blend,
        });

        self.vertices.clear();
        self.indices.clear();
    }

    fn texture(&self) -> TextureId {
        self.texture
    }

    fn set_texture(&mut self, texture: TextureId) {
        if texture != self.texture {
            self.flush();
            self.texture = texture;
        }
    }
}

impl<S> fmt::Debug for DrawBatch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawBatch")
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("max_vertices", &self.max_vertices)
            .field("max_indices", &self.max_indices)
            .field("texture", &self.texture)
            .field("blend", &self.blend)
            .field("render_calls", &self.render_calls)
            .finish()
    }
}

#[cfg(test)]
use crate::{color::Color, math::point};

#[cfg(test)]
fn add_triangle_at<T: DrawTarget>(target: &mut T, x: f32) {
    let a = target.add_vertex(Vertex::new(point(x, 0.0), Color::WHITE, [0.0; 2]));
    let b = target.add_vertex(Vertex::new(point(x + 1.0, 0.0), Color::WHITE, [0.0; 2]));
    let c = target.add_vertex(Vertex::new(point(x, 1.0), Color::WHITE, [0.0; 2]));
    target.add_triangle(a, b, c);
}

#[test]
fn invalid_capacity() {
    assert!(DrawBatch::with_capacity(0, 10, Recorder::new()).is_err());
    assert!(DrawBatch::with_capacity(10, 0, Recorder::new()).is_err());
    assert_eq!(
        DrawBatch::with_capacity(70_000, 10, Recorder::new()).err(),
        Some(DrawTargetError::InvalidCapacity {
            vertices: 70_000,
            indices: 10
        })
    );
    assert!(DrawBatch::with_capacity(65_536, 3, Recorder::new()).is_ok());

    let batch = DrawBatch::new(Recorder::new());
    assert_eq!(batch.vertex_capacity(), 32767);
    assert_eq!(batch.index_capacity(), 32767);
}

#[test]
fn flushes_when_full() {
    let mut batch = DrawBatch::with_capacity(6, 6, Recorder::new()).unwrap();

    assert!(batch.can_fit(6, 2));
    assert!(!batch.can_fit(7, 0));
    assert!(!batch.can_fit(0, 3));

    add_triangle_at(&mut batch, 0.0);
    add_triangle_at(&mut batch, 2.0);
    assert!(!batch.can_fit(3, 1));

    assert_eq!(batch.ensure_capacity(3, 1), Ok(true));
    assert_eq!(batch.vertex_count(), 0);
    add_triangle_at(&mut batch, 4.0);
    assert_eq!(batch.ensure_capacity(3, 1), Ok(false));
    assert!(batch.ensure_capacity(7, 1).is_err());

    batch.finish();
    let recorder = batch.into_sink();
    assert_eq!(recorder.batches().len(), 2);
    assert_eq!(recorder.batches()[0].indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(recorder.triangle_count(), 3);
    assert_eq!(recorder.vertex_count(), 9);

    let first = recorder.triangles().next().unwrap();
    assert_eq!(first[1].position(), point(1.0, 0.0));
}

#[test]
fn empty_flushes_are_skipped() {
    fn counting(calls: &mut u32) -> impl FnMut(&Batch) + '_ {
        move |_| *calls += 1
    }

    let mut calls = 0;
    let mut batch = DrawBatch::new(counting(&mut calls));

    batch.flush();
    batch.set_texture(TextureId(2));
    batch.set_blend_mode(BlendMode::Additive);
    batch.finish();

    assert_eq!(batch.render_calls(), 0);
    drop(batch);
    assert_eq!(calls, 0);
}

#[test]
fn state_changes_flush() {
    let mut batch = DrawBatch::new(Recorder::new()).with_default_texture(TextureId(1));
    assert_eq!(batch.texture(), TextureId(1));

    add_triangle_at(&mut batch, 0.0);
    batch.set_texture(TextureId(1));
    assert_eq!(batch.render_calls(), 0);

    batch.set_texture(TextureId(5));
    assert_eq!(batch.render_calls(), 1);
    add_triangle_at(&mut batch, 0.0);
    add_triangle_at(&mut batch, 1.0);

    batch.set_blend_mode(BlendMode::Alpha);
    assert_eq!(batch.render_calls(), 2);
    add_triangle_at(&mut batch, 0.0);

    batch.reset_texture();
    assert_eq!(batch.render_calls(), 3);
    assert_eq!(batch.max_vertices_in_batch(), 6);

    batch.reset_render_calls();
    assert_eq!(batch.render_calls(), 0);
    assert_eq!(batch.total_render_calls(), 3);

    let batches = batch.sink().batches();
    assert_eq!(batches[0].texture, TextureId(1));
    assert_eq!(batches[1].texture, TextureId(5));
    assert_eq!(batches[1].blend, BlendMode::None);
    assert_eq!(batches[2].texture, TextureId(5));
    assert_eq!(batches[2].blend, BlendMode::Alpha);
    assert_eq!(batches[2].as_batch().triangle_count(), 1);
}
