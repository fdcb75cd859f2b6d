//! Colors and texture coordinates of tessellated geometry.
//!
//! A [`Fill`] is queried once per emitted vertex. Each query comes in three
//! shapes: a plain one that only knows the position, an "in area" one used by
//! filled shapes which also knows the shape's bounding box, and an "on line"
//! one used by the line tessellator which knows which vertex of the line is
//! being colored and how many vertices the line has. The area and line forms
//! fall back to the plain form unless overridden, so a fill only implements
//! what it needs.
//!
//! ```
//! use quill_tessellation::{Color, Fill, hsb};
//! use quill_tessellation::math::Point;
//!
//! /// A rainbow along the length of a line.
//! struct Rainbow;
//!
//! impl Fill for Rainbow {
//!     fn color_on_line(&self, _at: Point, vertex: usize, vertex_count: usize) -> Color {
//!         hsb(vertex as f32 / vertex_count as f32, 1.0, 1.0, 1.0)
//!     }
//! }
//! ```

use crate::color::Color;
use crate::math::{Box2D, Point, Size};
use crate::TextureId;

use std::fmt;

/// A per-position color and texture sampler.
pub trait Fill {
    /// Base color at a position.
    fn color(&self, _at: Point) -> Color {
        Color::WHITE
    }

    /// Color at a position that belongs to a filled area with the given bounds.
    fn color_in_area(&self, at: Point, _area: &Box2D) -> Color {
        self.color(at)
    }

    /// Color at a vertex of a line with `vertex_count` vertices.
    fn color_on_line(&self, at: Point, _vertex: usize, _vertex_count: usize) -> Color {
        self.color(at)
    }

    /// The texture sampled with the texture coordinates, `None` for
    /// solid-colored geometry.
    fn texture(&self) -> Option<TextureId> {
        None
    }

    fn texture_u(&self, _at: Point) -> f32 {
        0.0
    }

    fn texture_v(&self, _at: Point) -> f32 {
        0.0
    }

    fn texture_u_in_area(&self, at: Point, _area: &Box2D) -> f32 {
        self.texture_u(at)
    }

    fn texture_v_in_area(&self, at: Point, _area: &Box2D) -> f32 {
        self.texture_v(at)
    }

    fn texture_u_on_line(&self, at: Point, _vertex: usize, _vertex_count: usize) -> f32 {
        self.texture_u(at)
    }

    fn texture_v_on_line(&self, at: Point, _vertex: usize, _vertex_count: usize) -> f32 {
        self.texture_v(at)
    }
}

macro_rules! forward_fill {
    () => {
        fn color(&self, at: Point) -> Color {
            (**self).color(at)
        }
        fn color_in_area(&self, at: Point, area: &Box2D) -> Color {
            (**self).color_in_area(at, area)
        }
        fn color_on_line(&self, at: Point, vertex: usize, vertex_count: usize) -> Color {
            (**self).color_on_line(at, vertex, vertex_count)
        }
        fn texture(&self) -> Option<TextureId> {
            (**self).texture()
        }
        fn texture_u(&self, at: Point) -> f32 {
            (**self).texture_u(at)
        }
        fn texture_v(&self, at: Point) -> f32 {
            (**self).texture_v(at)
        }
        fn texture_u_in_area(&self, at: Point, area: &Box2D) -> f32 {
            (**self).texture_u_in_area(at, area)
        }
        fn texture_v_in_area(&self, at: Point, area: &Box2D) -> f32 {
            (**self).texture_v_in_area(at, area)
        }
        fn texture_u_on_line(&self, at: Point, vertex: usize, vertex_count: usize) -> f32 {
            (**self).texture_u_on_line(at, vertex, vertex_count)
        }
        fn texture_v_on_line(&self, at: Point, vertex: usize, vertex_count: usize) -> f32 {
            (**self).texture_v_on_line(at, vertex, vertex_count)
        }
    };
}

impl<'a, F: Fill + ?Sized> Fill for &'a F {
    forward_fill!();
}

impl<F: Fill + ?Sized> Fill for Box<F> {
    forward_fill!();
}

/// A single color everywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SolidFill(pub Color);

impl SolidFill {
    pub const WHITE: SolidFill = SolidFill(Color::WHITE);
    pub const BLACK: SolidFill = SolidFill(Color::BLACK);
}

impl Default for SolidFill {
    fn default() -> Self {
        SolidFill::WHITE
    }
}

impl Fill for SolidFill {
    fn color(&self, _at: Point) -> Color {
        self.0
    }
}

/// A texture repeated every `tile` world units, untinted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TiledTextureFill {
    pub texture: TextureId,
    pub tile: Size,
}

impl TiledTextureFill {
    pub fn new(texture: TextureId, tile: Size) -> Self {
        debug_assert!(tile.width != 0.0 && tile.height != 0.0);
        TiledTextureFill { texture, tile }
    }

    /// Tiles a texture of `texture_size` pixels drawn at `scale` world units per pixel.
    pub fn scaled(texture: TextureId, texture_size: Size, scale: f32) -> Self {
        TiledTextureFill::new(texture, texture_size * scale)
    }
}

impl Fill for TiledTextureFill {
    fn texture(&self) -> Option<TextureId> {
        Some(self.texture)
    }

    fn texture_u(&self, at: Point) -> f32 {
        at.x / self.tile.width
    }

    fn texture_v(&self, at: Point) -> f32 {
        at.y / self.tile.height
    }
}

/// A procedural fill that makes the geometry's structure visible.
///
/// - Plain queries map the position within the viewport to red and green.
/// - Area queries map the position within the shape's bounds to red and green.
/// - Line queries map the vertex index to red and the position within the
///   viewport to green and blue.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DebugFill {
    pub viewport: Size,
}

impl DebugFill {
    pub fn new(viewport: Size) -> Self {
        DebugFill { viewport }
    }

    fn wrap(&self, at: Point) -> (f32, f32) {
        (
            (at.x / self.viewport.width).rem_euclid(1.0),
            (at.y / self.viewport.height).rem_euclid(1.0),
        )
    }
}

impl Fill for DebugFill {
    fn color(&self, at: Point) -> Color {
        let (r, g) = self.wrap(at);
        Color::from_f32(r, g, 1.0, 1.0)
    }

    fn color_in_area(&self, at: Point, area: &Box2D) -> Color {
        let u = (at.x - area.min.x) / area.width();
        let v = (at.y - area.min.y) / area.height();
        Color::from_f32(u, v, 1.0, 1.0)
    }

    fn color_on_line(&self, at: Point, vertex: usize, vertex_count: usize) -> Color {
        let (x, y) = self.wrap(at);
        Color::from_f32(vertex as f32 / vertex_count as f32, x, y, 1.0)
    }
}

/// A fill that computes the color of each line vertex with a closure.
///
/// Outside of lines, the color is the one at vertex 0 of 1.
///
/// See [`line_fn`].
#[derive(Clone)]
pub struct LineFn<F> {
    func: F,
}

/// Creates a fill from a closure receiving the position, index and count of
/// the line vertex to color.
pub fn line_fn<F>(func: F) -> LineFn<F>
where
    F: Fn(Point, usize, usize) -> Color,
{
    LineFn { func }
}

impl<F> Fill for LineFn<F>
where
    F: Fn(Point, usize, usize) -> Color,
{
    fn color(&self, at: Point) -> Color {
        (self.func)(at, 0, 1)
    }

    fn color_on_line(&self, at: Point, vertex: usize, vertex_count: usize) -> Color {
        (self.func)(at, vertex, vertex_count)
    }
}

impl<F> fmt::Debug for LineFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LineFn")
    }
}

#[cfg(test)]
use crate::math::{point, rect, size};

#[test]
fn defaults_fall_back_to_plain_queries() {
    struct Plain;
    impl Fill for Plain {
        fn color(&self, at: Point) -> Color {
            if at.x > 0.0 {
                Color::BLACK
            } else {
                Color::WHITE
            }
        }
        fn texture_u(&self, at: Point) -> f32 {
            at.x
        }
    }

    let area = rect(0.0, 0.0, 10.0, 10.0);
    let p = point(3.0, 4.0);
    assert_eq!(Plain.color_in_area(p, &area), Color::BLACK);
    assert_eq!(Plain.color_on_line(p, 2, 5), Color::BLACK);
    assert_eq!(Plain.texture_u_in_area(p, &area), 3.0);
    assert_eq!(Plain.texture_u_on_line(p, 1, 2), 3.0);
    assert_eq!(Plain.texture_v_on_line(p, 1, 2), 0.0);
    assert_eq!(Plain.texture(), None);
}

#[test]
fn overrides_are_independent() {
    struct OnlyLines;
    impl Fill for OnlyLines {
        fn color_on_line(&self, _: Point, vertex: usize, _: usize) -> Color {
            Color::from_bytes(vertex as u8, 0, 0, 255)
        }
    }

    let p = point(0.0, 0.0);
    assert_eq!(OnlyLines.color(p), Color::WHITE);
    assert_eq!(OnlyLines.color_in_area(p, &rect(0.0, 0.0, 1.0, 1.0)), Color::WHITE);
    assert_eq!(OnlyLines.color_on_line(p, 7, 10).r(), 7);

    // Going through references and boxes keeps the override.
    let boxed: Box<dyn Fill> = Box::new(OnlyLines);
    assert_eq!(boxed.color_on_line(p, 3, 10).r(), 3);
    assert_eq!((&OnlyLines).color_on_line(p, 4, 10).r(), 4);
}

#[test]
fn solid_and_tiled_fills() {
    let p = point(15.0, -5.0);
    assert_eq!(SolidFill(Color::BLACK).color_on_line(p, 0, 2), Color::BLACK);
    assert_eq!(SolidFill::default().texture(), None);

    let tiled = TiledTextureFill::scaled(TextureId(3), size(20.0, 10.0), 0.5);
    assert_eq!(tiled.texture(), Some(TextureId(3)));
    assert_eq!(tiled.texture_u(p), 1.5);
    assert_eq!(tiled.texture_v_on_line(p, 0, 2), -1.0);
    assert_eq!(tiled.color(p), Color::WHITE);
}

#[test]
fn debug_fill() {
    let fill = DebugFill::new(size(100.0, 100.0));
    let area = rect(10.0, 10.0, 20.0, 20.0);

    assert_eq!(fill.color_in_area(point(10.0, 30.0), &area), rgb_test(0.0, 1.0));
    assert_eq!(fill.color(point(-25.0, 150.0)), rgb_test(0.75, 0.5));
    assert_eq!(fill.color_on_line(point(0.0, 0.0), 1, 2).r(), 128);

    fn rgb_test(r: f32, g: f32) -> Color {
        Color::from_f32(r, g, 1.0, 1.0)
    }
}

#[test]
fn closure_fill() {
    let fill = line_fn(|_, i, n| if i + 1 == n { Color::WHITE } else { Color::BLACK });
    let p = point(0.0, 0.0);
    assert_eq!(fill.color_on_line(p, 0, 3), Color::BLACK);
    assert_eq!(fill.color_on_line(p, 2, 3), Color::WHITE);
    // Outside of a line, the fill sees the only vertex of a single-vertex line.
    assert_eq!(fill.color(p), Color::WHITE);
}
