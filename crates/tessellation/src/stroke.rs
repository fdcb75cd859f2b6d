//! The description of how lines are drawn.

use crate::color::Color;
use crate::fill::SolidFill;

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width.
    Square,
    /// At each end of each sub-path, the shape representing the stroke will be extended
    /// by a half circle with a radius equal to the stroke width.
    Round,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// The outer edges are extended until they meet, unless the angle
    /// between the segments is too sharp, in which case a bevel is used.
    Miter,
    /// A circular arc centered on the joint.
    Round,
    /// The outer corner is cut off with a single triangle.
    Bevel,
}

/// Parameters of the line tessellator.
///
/// Note that the `width` is the distance between the center of the line and
/// each of its edges, so the visible thickness of a line is twice its width.
///
/// ```
/// use quill_tessellation::{Color, LineCap, LineJoin, SolidFill, Stroke};
///
/// let stroke = Stroke::new(3.0, SolidFill(Color::BLACK))
///     .with_cap(LineCap::Round)
///     .with_join(LineJoin::Miter)
///     .with_miter_limit(-0.5);
///
/// assert_eq!(stroke.width, 3.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Stroke<F> {
    /// Half of the line thickness, used for vertices that don't specify one.
    ///
    /// Must be greater than zero.
    pub width: f32,

    /// Colors and texture coordinates of the line.
    pub fill: F,

    /// What cap to use at both ends of open lines.
    ///
    /// Default value: `LineCap::Butt`.
    pub cap: LineCap,

    /// Default value: `LineJoin::Bevel`.
    pub join: LineJoin,

    /// Miter joins between segments whose directions have a dot product
    /// under this value are drawn as bevels instead.
    ///
    /// `-1.0` never falls back, `1.0` always does.
    /// Default value: `Stroke::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,
}

impl<F> Stroke<F> {
    /// A bit under 37 degrees between segments turns a miter into a bevel.
    pub const DEFAULT_MITER_LIMIT: f32 = -0.8;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Bevel;

    pub fn new(width: f32, fill: F) -> Self {
        assert_valid_width(width);
        Stroke {
            width,
            fill,
            cap: Self::DEFAULT_LINE_CAP,
            join: Self::DEFAULT_LINE_JOIN,
            miter_limit: Self::DEFAULT_MITER_LIMIT,
        }
    }

    #[inline]
    pub fn with_width(mut self, width: f32) -> Self {
        assert_valid_width(width);
        self.width = width;
        self
    }

    #[inline]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    #[inline]
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!((-1.0..=1.0).contains(&limit), "invalid miter limit {}", limit);
        self.miter_limit = limit;
        self
    }

    /// Replaces the fill, keeping the other parameters.
    pub fn with_fill<G>(self, fill: G) -> Stroke<G> {
        Stroke {
            width: self.width,
            fill,
            cap: self.cap,
            join: self.join,
            miter_limit: self.miter_limit,
        }
    }

    /// A stroke that borrows this one's fill.
    pub fn by_ref(&self) -> Stroke<&F> {
        Stroke {
            width: self.width,
            fill: &self.fill,
            cap: self.cap,
            join: self.join,
            miter_limit: self.miter_limit,
        }
    }
}

impl Stroke<SolidFill> {
    pub const DEFAULT_WIDTH: f32 = 5.0;

    pub fn solid(width: f32, color: Color) -> Self {
        Stroke::new(width, SolidFill(color))
    }

    pub fn white() -> Self {
        Stroke::solid(Self::DEFAULT_WIDTH, Color::WHITE)
    }

    pub fn black() -> Self {
        Stroke::solid(Self::DEFAULT_WIDTH, Color::BLACK)
    }
}

impl Default for Stroke<SolidFill> {
    fn default() -> Self {
        Stroke::white()
    }
}

fn assert_valid_width(width: f32) {
    assert!(width > 0.0, "invalid line width {}", width);
}

#[test]
fn defaults() {
    let stroke: Stroke<SolidFill> = Stroke::default();
    assert_eq!(stroke.width, 5.0);
    assert_eq!(stroke.fill, SolidFill::WHITE);
    assert_eq!(stroke.cap, LineCap::Butt);
    assert_eq!(stroke.join, LineJoin::Bevel);
    assert_eq!(stroke.miter_limit, -0.8);
    assert_eq!(Stroke::black().fill.0, Color::BLACK);
}

#[test]
fn builder() {
    let stroke = Stroke::white()
        .with_width(2.0)
        .with_cap(LineCap::Square)
        .with_join(LineJoin::Round)
        .with_miter_limit(1.0);

    assert_eq!(stroke.width, 2.0);
    assert_eq!(stroke.cap, LineCap::Square);
    assert_eq!(stroke.join, LineJoin::Round);
    assert_eq!(stroke.miter_limit, 1.0);

    let borrowed = stroke.by_ref();
    assert_eq!(*borrowed.fill, SolidFill::WHITE);
    assert_eq!(borrowed.join, LineJoin::Round);

    let retinted = stroke.with_fill(SolidFill::BLACK);
    assert_eq!(retinted.width, 2.0);
    assert_eq!(retinted.fill, SolidFill::BLACK);
}

#[test]
#[should_panic]
fn miter_limit_out_of_range() {
    let _ = Stroke::white().with_miter_limit(1.5);
}

#[test]
#[should_panic]
fn zero_width() {
    let _ = Stroke::solid(0.0, Color::WHITE);
}

#[test]
#[should_panic]
fn nan_width() {
    let _ = Stroke::white().with_width(f32::NAN);
}
