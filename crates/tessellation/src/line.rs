//! Line stroke tessellation.
//!
//! ## Overview
//!
//! A line is described vertex by vertex through a [`LineBuilder`], each
//! vertex optionally carrying its own width and color. Once all vertices are
//! known the line is finished either as an open polyline with a cap at both
//! ends ([`LineBuilder::done_line`]) or as a closed loop where the last vertex
//! connects back to the first ([`LineBuilder::done_loop`]).
//!
//! The line is turned into a strip of quads, one per segment, stitched
//! together by joins. Each join and cap is a handful of vertices around its
//! line vertex (plus a fan of triangles for round ones), and produces the
//! left/right [`Edge`]s that the neighboring quads are built from:
//!
//! ```ascii
//!   begin.left    join.end.left   join.start.left
//!      +--------------+  +-------------+ ...
//!      |   segment    | join          ...
//!      +--------------+  +-------------+ ...
//!   begin.right   join.end.right  join.start.right
//! ```
//!
//! ## Batching
//!
//! Geometry is written into a [`DrawTarget`] of bounded size. Before every
//! join or cap, the tessellator reserves the worst case amount of vertices
//! and triangles it can produce. When the target is full it is flushed, and
//! the edge that the next quad starts from is copied over to the new batch,
//! so that long lines can span any number of batches without seams. For
//! loops, the edge produced by the first join is also carried, since the
//! last quad closes onto it.
//!
//! ## Examples
//!
//! ```
//! use quill_tessellation::{
//!     DrawBatch, LineCap, LineJoin, LineTessellator, Recorder, Stroke, gray,
//! };
//! use quill_tessellation::math::point;
//!
//! let mut batch = DrawBatch::new(Recorder::new());
//! let mut tessellator = LineTessellator::new();
//! let stroke = Stroke::white()
//!     .with_cap(LineCap::Round)
//!     .with_join(LineJoin::Round);
//!
//! let mut line = tessellator.begin(&stroke);
//! line.vertex(point(0.0, 0.0))
//!     .vertex_w(point(50.0, 20.0), 10.0)
//!     .vertex_c(point(100.0, 0.0), gray(0.5));
//! line.done_line(&mut batch).unwrap();
//!
//! batch.finish();
//! assert!(batch.sink().triangle_count() > 0);
//! ```

use crate::color::Color;
use crate::draw_target::{DrawTarget, Vertex, VertexId};
use crate::error::{DrawTargetError, TessellationError, TessellationResult, UnsupportedParameter};
use crate::fill::Fill;
use crate::geom::utils::{left_normal, normalized_or_zero, right_normal, signed_angle, turns_right};
use crate::geom::{ArcStepper, Line};
use crate::math::{point, Angle, Point, Vector};
use crate::stroke::{LineCap, LineJoin, Stroke};

use arrayvec::ArrayVec;

use std::f32::consts::{PI, TAU};

/// Upper bound on the number of vertices a single join produces.
pub const MAX_JOIN_VERTICES: u32 = 5 + MAX_ARC_STEPS;
/// Upper bound on the number of triangles a single join produces.
pub const MAX_JOIN_TRIANGLES: u32 = MAX_ARC_STEPS + 1;
/// Upper bound on the number of vertices a single cap produces.
pub const MAX_CAP_VERTICES: u32 = 3 + MAX_ARC_STEPS;
/// Upper bound on the number of triangles a single cap produces.
pub const MAX_CAP_TRIANGLES: u32 = MAX_ARC_STEPS + 1;

/// Round joins and caps are approximated with at most this many steps.
pub const MAX_ARC_STEPS: u32 = 300;

const FLOATS_PER_VERTEX: usize = 4;
const QUAD_TRIANGLES: u32 = 2;

/// Where a [`LineTessellator`] is in its life cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No line is being built.
    Idle,
    /// A [`LineBuilder`] is collecting vertices.
    Collecting,
    /// The collected line is being turned into triangles.
    Finalizing,
}

/// The left and right vertices at one end of a quad of the strip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub left: VertexId,
    pub right: VertexId,
}

/// The two edges produced by a join: the one closing the incoming segment
/// and the one opening the outgoing segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Join {
    end: Edge,
    start: Edge,
}

/// An open or closed polyline.
#[derive(Copy, Clone, Debug)]
pub struct Polygon<'l> {
    pub points: &'l [Point],
    pub closed: bool,
}

/// Tessellates lines of variable width and color into a [`DrawTarget`].
///
/// The tessellator keeps its vertex buffers between lines so that it can be
/// reused without allocating.
///
/// See the [module documentation](index.html).
#[derive(Clone, Debug)]
pub struct LineTessellator {
    /// x, y, width and color bits of each vertex.
    raw: Vec<f32>,
    /// Offsets in `raw` of the vertices whose color comes from the fill.
    deferred: Vec<usize>,
    state: SessionState,
}

impl Default for LineTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTessellator {
    pub fn new() -> Self {
        LineTessellator {
            raw: Vec::new(),
            deferred: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Starts collecting the vertices of a line drawn with `stroke`.
    ///
    /// Only one line can be built at a time; the returned builder borrows the
    /// tessellator until it is finished or dropped.
    pub fn begin<'l, F: Fill>(&'l mut self, stroke: &'l Stroke<F>) -> LineBuilder<'l, F> {
        assert_eq!(
            self.state,
            SessionState::Idle,
            "a line is already being built"
        );

        self.raw.clear();
        self.deferred.clear();
        self.state = SessionState::Collecting;
        log::trace!("begin line, width {}", stroke.width);

        LineBuilder {
            tessellator: self,
            stroke,
        }
    }

    /// Tessellates an open polyline.
    pub fn stroke_polyline<F: Fill, T: DrawTarget + ?Sized>(
        &mut self,
        stroke: &Stroke<F>,
        points: &[Point],
        target: &mut T,
    ) -> TessellationResult {
        let mut builder = self.begin(stroke);
        for p in points {
            builder.vertex(*p);
        }

        builder.done_line(target)
    }

    /// Tessellates a closed polyline.
    pub fn stroke_loop<F: Fill, T: DrawTarget + ?Sized>(
        &mut self,
        stroke: &Stroke<F>,
        points: &[Point],
        target: &mut T,
    ) -> TessellationResult {
        let mut builder = self.begin(stroke);
        for p in points {
            builder.vertex(*p);
        }

        builder.done_loop(target)
    }

    pub fn stroke_polygon<F: Fill, T: DrawTarget + ?Sized>(
        &mut self,
        stroke: &Stroke<F>,
        polygon: Polygon,
        target: &mut T,
    ) -> TessellationResult {
        if polygon.closed {
            self.stroke_loop(stroke, polygon.points, target)
        } else {
            self.stroke_polyline(stroke, polygon.points, target)
        }
    }

    fn push(&mut self, at: Point, width: f32, color: Option<Color>) {
        debug_assert_eq!(self.state, SessionState::Collecting);

        let offset = self.raw.len();
        let color_bits = match color {
            Some(color) => color.to_f32_bits(),
            None => {
                self.deferred.push(offset);
                0.0
            }
        };

        self.raw.extend_from_slice(&[at.x, at.y, width, color_bits]);
    }

    fn reset(&mut self) {
        self.raw.clear();
        self.deferred.clear();
        self.state = SessionState::Idle;
    }

    fn finish<F: Fill, T: DrawTarget + ?Sized>(
        &mut self,
        stroke: &Stroke<F>,
        target: &mut T,
        closed: bool,
    ) -> TessellationResult {
        self.state = SessionState::Finalizing;
        let result = self.tessellate(stroke, target, closed);
        self.reset();

        result
    }

    fn tessellate<F: Fill, T: DrawTarget + ?Sized>(
        &mut self,
        stroke: &Stroke<F>,
        target: &mut T,
        closed: bool,
    ) -> TessellationResult {
        for vertex in self.raw.chunks_exact(FLOATS_PER_VERTEX) {
            if vertex[0].is_nan() || vertex[1].is_nan() {
                return Err(UnsupportedParameter::PositionIsNaN.into());
            }
            if vertex[2].is_nan() {
                return Err(UnsupportedParameter::WidthIsNaN.into());
            }
        }

        let count = self.raw.len() / FLOATS_PER_VERTEX;

        for &offset in &self.deferred {
            let at = point(self.raw[offset], self.raw[offset + 1]);
            let color = stroke.fill.color_on_line(at, offset / FLOATS_PER_VERTEX, count);
            self.raw[offset + 3] = color.to_f32_bits();
        }

        if let Some(texture) = stroke.fill.texture() {
            target.set_texture(texture);
        }

        if count < 2 {
            return Ok(());
        }

        let mut strip = Strip {
            raw: &self.raw,
            count,
            stroke,
            target,
            wrap: None,
        };

        if closed {
            strip.tessellate_loop()
        } else {
            strip.tessellate_line()
        }
    }
}

/// Collects the vertices of a line.
///
/// Created with [`LineTessellator::begin`]. Dropping the builder without
/// calling `done_line` or `done_loop` discards the line.
pub struct LineBuilder<'l, F> {
    tessellator: &'l mut LineTessellator,
    stroke: &'l Stroke<F>,
}

impl<'l, F: Fill> LineBuilder<'l, F> {
    /// Adds a vertex with the stroke's width and a color from the fill.
    pub fn vertex(&mut self, at: Point) -> &mut Self {
        let width = self.stroke.width;
        self.tessellator.push(at, width, None);
        self
    }

    /// Adds a vertex with its own width and a color from the fill.
    pub fn vertex_w(&mut self, at: Point, width: f32) -> &mut Self {
        self.tessellator.push(at, width, None);
        self
    }

    /// Adds a vertex with the stroke's width and its own color.
    pub fn vertex_c(&mut self, at: Point, color: Color) -> &mut Self {
        let width = self.stroke.width;
        self.tessellator.push(at, width, Some(color));
        self
    }

    /// Adds a vertex with its own width and color.
    pub fn vertex_wc(&mut self, at: Point, width: f32, color: Color) -> &mut Self {
        self.tessellator.push(at, width, Some(color));
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.tessellator.raw.len() / FLOATS_PER_VERTEX
    }

    pub fn stroke(&self) -> &Stroke<F> {
        self.stroke
    }

    /// Tessellates the collected vertices as an open line with caps at both
    /// ends.
    ///
    /// Lines of less than two vertices produce nothing.
    pub fn done_line<T: DrawTarget + ?Sized>(mut self, target: &mut T) -> TessellationResult {
        log::trace!("done line, {} vertices", self.vertex_count());
        self.tessellator.finish(self.stroke, target, false)
    }

    /// Tessellates the collected vertices as a closed loop, the last vertex
    /// connecting back to the first.
    ///
    /// Loops of less than two vertices produce nothing.
    pub fn done_loop<T: DrawTarget + ?Sized>(mut self, target: &mut T) -> TessellationResult {
        log::trace!("done loop, {} vertices", self.vertex_count());
        self.tessellator.finish(self.stroke, target, true)
    }
}

impl<'l, F> Drop for LineBuilder<'l, F> {
    fn drop(&mut self) {
        if self.tessellator.state == SessionState::Collecting {
            log::warn!(
                "line of {} vertices dropped before being finished",
                self.tessellator.raw.len() / FLOATS_PER_VERTEX
            );
            self.tessellator.reset();
        }
    }
}

/// Tessellates an open line inside a session scope.
///
/// ```
/// use quill_tessellation::{line, DrawBatch, LineTessellator, Recorder, Stroke};
/// use quill_tessellation::math::point;
///
/// let mut batch = DrawBatch::new(Recorder::new());
/// let mut tessellator = LineTessellator::new();
///
/// line(&mut batch, &mut tessellator, &Stroke::black(), |line| {
///     for i in 0..10 {
///         line.vertex(point(i as f32 * 10.0, (i % 2) as f32 * 10.0));
///     }
/// }).unwrap();
/// ```
pub fn line<F, T, B>(
    target: &mut T,
    tessellator: &mut LineTessellator,
    stroke: &Stroke<F>,
    build: B,
) -> TessellationResult
where
    F: Fill,
    T: DrawTarget + ?Sized,
    B: FnOnce(&mut LineBuilder<F>),
{
    let mut builder = tessellator.begin(stroke);
    build(&mut builder);
    builder.done_line(target)
}

/// Tessellates a closed loop inside a session scope.
pub fn line_loop<F, T, B>(
    target: &mut T,
    tessellator: &mut LineTessellator,
    stroke: &Stroke<F>,
    build: B,
) -> TessellationResult
where
    F: Fill,
    T: DrawTarget + ?Sized,
    B: FnOnce(&mut LineBuilder<F>),
{
    let mut builder = tessellator.begin(stroke);
    build(&mut builder);
    builder.done_loop(target)
}

/// The most vertices and triangles a join or cap can add, connecting quads
/// included.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Budget {
    pub vertices: u32,
    pub triangles: u32,
}

impl Budget {
    fn with_quads(self, quads: u32) -> Self {
        Budget {
            vertices: self.vertices,
            triangles: self.triangles + quads * QUAD_TRIANGLES,
        }
    }
}

/// Arc steps for a half circle (caps) or full circle (joins) of the given
/// radius.
fn arc_steps(radius: f32) -> u32 {
    (radius as u32).saturating_add(2).min(MAX_ARC_STEPS)
}

pub(crate) fn join_budget(join: LineJoin, width: f32) -> Budget {
    let budget = match join {
        LineJoin::Round => {
            let steps = arc_steps(width);
            Budget {
                vertices: 5 + steps,
                triangles: steps + 1,
            }
        }
        LineJoin::Miter | LineJoin::Bevel => Budget {
            vertices: 5,
            triangles: 1,
        },
    };
    debug_assert!(budget.vertices <= MAX_JOIN_VERTICES);
    debug_assert!(budget.triangles <= MAX_JOIN_TRIANGLES);

    budget
}

pub(crate) fn cap_budget(cap: LineCap, width: f32) -> Budget {
    let budget = match cap {
        LineCap::Round => {
            let steps = arc_steps(width * 0.5);
            Budget {
                vertices: 3 + steps,
                triangles: steps + 1,
            }
        }
        LineCap::Butt | LineCap::Square => Budget {
            vertices: 2,
            triangles: 0,
        },
    };
    debug_assert!(budget.vertices <= MAX_CAP_VERTICES);
    debug_assert!(budget.triangles <= MAX_CAP_TRIANGLES);

    budget
}

/// The four offset points and the center of a join.
struct Corners {
    center: Point,
    end_left: Point,
    end_right: Point,
    start_left: Point,
    start_right: Point,
}

/// The boundary edge of the first join of a loop, which the last quad closes
/// onto.
struct WrapEdge {
    edge: Edge,
    /// Copy of the edge's vertices, taken the first time they are about to be
    /// flushed.
    copy: Option<[Vertex; 2]>,
}

/// The state of a line being written into a target.
struct Strip<'l, F, T: ?Sized> {
    raw: &'l [f32],
    count: usize,
    stroke: &'l Stroke<F>,
    target: &'l mut T,
    wrap: Option<WrapEdge>,
}

impl<'l, F: Fill, T: DrawTarget + ?Sized> Strip<'l, F, T> {
    fn tessellate_line(&mut self) -> TessellationResult {
        let last = self.count - 1;
        let mut direction = self.direction(0);

        self.reserve(cap_budget(self.stroke.cap, self.width(0)), None)?;
        let mut begin = self.cap(0, direction, true);

        for i in 0..last - 1 {
            let next_direction = self.direction(i + 1);

            let budget = join_budget(self.stroke.join, self.width(i + 1)).with_quads(1);
            self.reserve(budget, Some(&mut begin))?;

            let join = self.join(i + 1, direction, next_direction);
            self.quad(begin, join.end);

            begin = join.start;
            direction = next_direction;
        }

        let budget = cap_budget(self.stroke.cap, self.width(last)).with_quads(1);
        self.reserve(budget, Some(&mut begin))?;

        let end = self.cap(last, direction, false);
        self.quad(begin, end);

        Ok(())
    }

    fn tessellate_loop(&mut self) -> TessellationResult {
        let last = self.count - 1;
        let mut direction = self.direction(0);

        self.reserve(join_budget(self.stroke.join, self.width(0)), None)?;
        let wrap = self.join(0, self.direction(last), direction);
        self.wrap = Some(WrapEdge {
            edge: wrap.end,
            copy: None,
        });

        let mut begin = wrap.start;

        for i in 0..last {
            let next_direction = self.direction(i + 1);

            // The closing quad is reserved along with every join, so that the
            // last iteration leaves room for it.
            let budget = join_budget(self.stroke.join, self.width(i + 1)).with_quads(2);
            self.reserve(budget, Some(&mut begin))?;

            let join = self.join(i + 1, direction, next_direction);
            self.quad(begin, join.end);

            begin = join.start;
            direction = next_direction;
        }

        if let Some(wrap) = &self.wrap {
            let end = wrap.edge;
            self.quad(begin, end);
        }

        Ok(())
    }

    #[inline]
    fn position(&self, i: usize) -> Point {
        let offset = i * FLOATS_PER_VERTEX;
        point(self.raw[offset], self.raw[offset + 1])
    }

    #[inline]
    fn width(&self, i: usize) -> f32 {
        self.raw[i * FLOATS_PER_VERTEX + 2]
    }

    #[inline]
    fn color(&self, i: usize) -> Color {
        Color::from_f32_bits(self.raw[i * FLOATS_PER_VERTEX + 3])
    }

    /// Unit direction of the segment starting at vertex `segment`, the
    /// segment after the last vertex wrapping around to the first.
    fn direction(&self, segment: usize) -> Vector {
        let from = segment_offset(segment, self.raw.len());
        let to = segment_offset(segment + 1, self.raw.len());

        let from = point(self.raw[from], self.raw[from + 1]);
        let to = point(self.raw[to], self.raw[to + 1]);

        normalized_or_zero(to - from)
    }

    /// Makes sure the target can take `budget` more geometry, flushing it
    /// and carrying the edges that are still needed over to the new batch if
    /// it can't.
    fn reserve(&mut self, budget: Budget, begin: Option<&mut Edge>) -> TessellationResult {
        if self.target.can_fit(budget.vertices, budget.triangles) {
            return Ok(());
        }

        let mut carried: ArrayVec<[Vertex; 2], 2> = ArrayVec::new();
        if let Some(edge) = &begin {
            carried.push(read_edge(&*self.target, **edge));
        }
        if let Some(wrap) = &mut self.wrap {
            let edge = wrap.edge;
            let target = &*self.target;
            carried.push(*wrap.copy.get_or_insert_with(|| read_edge(target, edge)));
        }

        let edges = carried.len();
        self.target.flush();

        let mut carried = carried.into_iter();
        if let (Some(edge), Some(vertices)) = (begin, carried.next()) {
            *edge = append_edge(self.target, vertices);
        }
        if let (Some(wrap), Some(vertices)) = (self.wrap.as_mut(), carried.next()) {
            wrap.edge = append_edge(self.target, vertices);
        }

        log::debug!(
            "flushed for {} vertices and {} triangles, carried {} edges over",
            budget.vertices,
            budget.triangles,
            edges,
        );

        if !self.target.can_fit(budget.vertices, budget.triangles) {
            return Err(TessellationError::DrawTarget(DrawTargetError::RequestTooLarge {
                vertices: budget.vertices,
                triangles: budget.triangles,
            }));
        }

        Ok(())
    }

    /// Emits a vertex of the strip at `at`, colored like line vertex `i`.
    fn emit(&mut self, i: usize, at: Point) -> VertexId {
        let fill = &self.stroke.fill;
        let uv = [
            fill.texture_u_on_line(at, i, self.count),
            fill.texture_v_on_line(at, i, self.count),
        ];
        let color = self.color(i);

        self.target.add_vertex(Vertex::new(at, color, uv))
    }

    fn emit_edge(&mut self, i: usize, left: Point, right: Point) -> Edge {
        Edge {
            left: self.emit(i, left),
            right: self.emit(i, right),
        }
    }

    /// Connects two edges with a quad.
    fn quad(&mut self, begin: Edge, end: Edge) {
        self.target.add_quad(begin.left, end.left, end.right, begin.right);
    }

    fn corners(&self, i: usize, d0: Vector, d1: Vector) -> Corners {
        let center = self.position(i);
        let w = self.width(i);

        Corners {
            center,
            end_left: center + left_normal(d0) * w,
            end_right: center + right_normal(d0) * w,
            start_left: center + left_normal(d1) * w,
            start_right: center + right_normal(d1) * w,
        }
    }

    /// Emits the join at vertex `i` between the segments of directions `d0`
    /// and `d1`.
    fn join(&mut self, i: usize, d0: Vector, d1: Vector) -> Join {
        match self.stroke.join {
            LineJoin::Bevel => self.bevel_join(i, d0, d1),
            LineJoin::Miter if d0.dot(d1) < self.stroke.miter_limit => self.bevel_join(i, d0, d1),
            LineJoin::Miter => self.miter_join(i, d0, d1),
            LineJoin::Round => self.round_join(i, d0, d1),
        }
    }

    fn bevel_join(&mut self, i: usize, d0: Vector, d1: Vector) -> Join {
        let c = self.corners(i, d0, d1);

        let end = self.emit_edge(i, c.end_left, c.end_right);
        let start = self.emit_edge(i, c.start_left, c.start_right);
        let center = self.emit(i, c.center);

        if turns_right(d0, d1) {
            self.target.add_triangle(end.left, start.left, center);
        } else {
            self.target.add_triangle(end.right, start.right, center);
        }

        Join { end, start }
    }

    /// Extends the outer edges until they meet. The segments overlap on the
    /// inner side.
    fn miter_join(&mut self, i: usize, d0: Vector, d1: Vector) -> Join {
        let mut c = self.corners(i, d0, d1);

        if turns_right(d0, d1) {
            let end = Line { point: c.end_left, vector: d0 };
            let start = Line { point: c.start_left, vector: d1 };
            match end.intersection(&start) {
                Some(p) => {
                    c.end_left = p;
                    c.start_left = p;
                }
                None => return self.bevel_join(i, d0, d1),
            }
        } else {
            let end = Line { point: c.end_right, vector: d0 };
            let start = Line { point: c.start_right, vector: d1 };
            match end.intersection(&start) {
                Some(p) => {
                    c.end_right = p;
                    c.start_right = p;
                }
                None => return self.bevel_join(i, d0, d1),
            }
        }

        let end = self.emit_edge(i, c.end_left, c.end_right);
        let start = self.emit_edge(i, c.start_left, c.start_right);

        Join { end, start }
    }

    /// Fills the outer side with a fan of triangles around the center.
    fn round_join(&mut self, i: usize, d0: Vector, d1: Vector) -> Join {
        let c = self.corners(i, d0, d1);
        let w = self.width(i);

        let end = self.emit_edge(i, c.end_left, c.end_right);
        let start = self.emit_edge(i, c.start_left, c.start_right);
        let center = self.emit(i, c.center);

        let right = turns_right(d0, d1);
        let (from, to, mut last, finish) = if right {
            (c.end_left, c.start_left, end.left, start.left)
        } else {
            (c.end_right, c.start_right, end.right, start.right)
        };

        // Clockwise around the outside of right turns, counter-clockwise
        // around left turns.
        let mut sweep = signed_angle(from - c.center, to - c.center).radians;
        if right && sweep > 0.0 {
            sweep -= TAU;
        } else if !right && sweep < 0.0 {
            sweep += TAU;
        }

        let fraction = (sweep.abs() / TAU).min(1.0);
        let steps = ((w * fraction) as u32).saturating_add(2).min(MAX_ARC_STEPS);

        for offset in ArcStepper::new(from - c.center, Angle::radians(sweep), steps) {
            let vertex = self.emit(i, c.center + offset);
            self.target.add_triangle(center, last, vertex);
            last = vertex;
        }
        self.target.add_triangle(center, last, finish);

        Join { end, start }
    }

    /// Emits the cap at vertex `i` of a segment of direction `d`, and returns
    /// the edge the segment's quad connects to.
    fn cap(&mut self, i: usize, d: Vector, begin: bool) -> Edge {
        match self.stroke.cap {
            LineCap::Butt => self.square_cap(i, d, begin, 0.0),
            LineCap::Square => self.square_cap(i, d, begin, self.width(i)),
            LineCap::Round => self.round_cap(i, d, begin),
        }
    }

    /// Moves the end of the line outwards by `extension`.
    fn square_cap(&mut self, i: usize, d: Vector, begin: bool, extension: f32) -> Edge {
        let w = self.width(i);
        let outwards = if begin { -d } else { d };
        let center = self.position(i) + outwards * extension;

        self.emit_edge(i, center + left_normal(d) * w, center + right_normal(d) * w)
    }

    /// A half circle fan, from the left to the right side around the start
    /// of the line and from the right to the left side around its end.
    fn round_cap(&mut self, i: usize, d: Vector, begin: bool) -> Edge {
        let w = self.width(i);
        let center_pos = self.position(i);
        let left_offset = left_normal(d) * w;
        let right_offset = right_normal(d) * w;

        let edge = self.emit_edge(i, center_pos + left_offset, center_pos + right_offset);
        let center = self.emit(i, center_pos);

        let steps = arc_steps(w * 0.5);
        let (from, mut last, finish) = if begin {
            (left_offset, edge.left, edge.right)
        } else {
            (right_offset, edge.right, edge.left)
        };

        for offset in ArcStepper::new(from, Angle::radians(PI), steps) {
            let vertex = self.emit(i, center_pos + offset);
            self.target.add_triangle(center, last, vertex);
            last = vertex;
        }
        self.target.add_triangle(center, last, finish);

        edge
    }
}

/// Offset in the raw buffer of the first vertex of a segment.
#[inline]
fn segment_offset(segment: usize, len: usize) -> usize {
    (segment * FLOATS_PER_VERTEX) % len
}

fn read_edge<T: DrawTarget + ?Sized>(target: &T, edge: Edge) -> [Vertex; 2] {
    [target.vertex(edge.left), target.vertex(edge.right)]
}

fn append_edge<T: DrawTarget + ?Sized>(target: &mut T, [left, right]: [Vertex; 2]) -> Edge {
    Edge {
        left: target.add_vertex(left),
        right: target.add_vertex(right),
    }
}

#[test]
fn budgets() {
    assert_eq!(
        join_budget(LineJoin::Bevel, 1000.0),
        Budget {
            vertices: 5,
            triangles: 1
        }
    );
    assert_eq!(join_budget(LineJoin::Miter, 3.0).vertices, 5);
    assert_eq!(
        join_budget(LineJoin::Round, 5.5),
        Budget {
            vertices: 12,
            triangles: 8
        }
    );
    assert_eq!(
        join_budget(LineJoin::Round, 1.0e9),
        Budget {
            vertices: MAX_JOIN_VERTICES,
            triangles: MAX_JOIN_TRIANGLES
        }
    );
    assert_eq!(
        cap_budget(LineCap::Round, 5.0),
        Budget {
            vertices: 7,
            triangles: 5
        }
    );
    assert_eq!(
        cap_budget(LineCap::Round, f32::INFINITY),
        Budget {
            vertices: MAX_CAP_VERTICES,
            triangles: MAX_CAP_TRIANGLES
        }
    );
    assert_eq!(cap_budget(LineCap::Square, 5.0).triangles, 0);
    assert_eq!(cap_budget(LineCap::Butt, 5.0).with_quads(1).triangles, 2);
}

#[test]
fn segment_offsets_wrap() {
    assert_eq!(segment_offset(0, 12), 0);
    assert_eq!(segment_offset(2, 12), 8);
    assert_eq!(segment_offset(3, 12), 0);
}
