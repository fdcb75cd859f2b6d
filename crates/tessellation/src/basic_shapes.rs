//! Filled and stroked axis-aligned rectangles and ellipses.
//!
//! Fills are colored with the area-aware [`Fill`] queries, receiving the
//! bounding box of the shape. Outlines are closed lines going through the
//! same points as the filled shape.

use crate::draw_target::{DrawTarget, Vertex, VertexId};
use crate::fill::Fill;
use crate::line::LineTessellator;
use crate::math::{point, Box2D, Point, Size};
use crate::stroke::Stroke;
use crate::TessellationResult;

use std::f64::consts::FRAC_PI_2;

/// The box of the given size centered on `center`.
pub fn centered(center: Point, size: Size) -> Box2D {
    let half = size.to_vector() * 0.5;
    Box2D::new(center - half, center + half)
}

pub fn fill_rectangle<F, T>(rect: &Box2D, fill: &F, output: &mut T) -> TessellationResult
where
    F: Fill + ?Sized,
    T: DrawTarget + ?Sized,
{
    bind_texture(fill, output);
    output.ensure_capacity(4, 2)?;

    let mut vertex = |position| area_vertex(output, fill, rect, position);
    let bl = vertex(rect.min);
    let tl = vertex(point(rect.min.x, rect.max.y));
    let tr = vertex(rect.max);
    let br = vertex(point(rect.max.x, rect.min.y));

    output.add_quad(bl, tl, tr, br);

    Ok(())
}

pub fn stroke_rectangle<F, T>(
    rect: &Box2D,
    stroke: &Stroke<F>,
    tessellator: &mut LineTessellator,
    output: &mut T,
) -> TessellationResult
where
    F: Fill,
    T: DrawTarget + ?Sized,
{
    let mut outline = tessellator.begin(stroke);
    outline
        .vertex(rect.min)
        .vertex(point(rect.min.x, rect.max.y))
        .vertex(rect.max)
        .vertex(point(rect.max.x, rect.min.y));

    outline.done_loop(output)
}

/// Fills the ellipse inscribed in `rect` with a fan of triangles around its
/// center.
pub fn fill_ellipse<F, T>(rect: &Box2D, fill: &F, output: &mut T) -> TessellationResult
where
    F: Fill + ?Sized,
    T: DrawTarget + ?Sized,
{
    let ellipse = Ellipse::new(rect);
    let n = ellipse.points_per_quarter;

    bind_texture(fill, output);
    output.ensure_capacity(4 * n + 5, 4 * (n + 1))?;

    let vertex = |output: &mut T, position| area_vertex(output, fill, rect, position);
    let center = vertex(output, ellipse.center);
    let top = vertex(output, ellipse.point(0.0, 1.0));
    let left = vertex(output, ellipse.point(-1.0, 0.0));
    let right = vertex(output, ellipse.point(1.0, 0.0));
    let bottom = vertex(output, ellipse.point(0.0, -1.0));

    // Each quarter starts on an axis and turns clockwise to the next one.
    let mut prev = [top, right, bottom, left];

    for i in 0..=n {
        let next = if i == n {
            [right, bottom, left, top]
        } else {
            let (s, c) = ellipse.quarter(i);
            [
                vertex(output, ellipse.point(s, c)),
                vertex(output, ellipse.point(c, -s)),
                vertex(output, ellipse.point(-s, -c)),
                vertex(output, ellipse.point(-c, s)),
            ]
        };

        for q in 0..4 {
            output.add_triangle(center, prev[q], next[q]);
        }
        prev = next;
    }

    Ok(())
}

/// Strokes the outline of the ellipse inscribed in `rect`.
pub fn stroke_ellipse<F, T>(
    rect: &Box2D,
    stroke: &Stroke<F>,
    tessellator: &mut LineTessellator,
    output: &mut T,
) -> TessellationResult
where
    F: Fill,
    T: DrawTarget + ?Sized,
{
    let ellipse = Ellipse::new(rect);
    let n = ellipse.points_per_quarter;

    let mut outline = tessellator.begin(stroke);
    for (sx, sy) in [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)] {
        for i in 0..n {
            let (s, c) = ellipse.quarter(i);
            // Quarters alternate between going away from the vertical and
            // the horizontal axis.
            let p = if sx == sy {
                ellipse.point(sx * s, sy * c)
            } else {
                ellipse.point(sx * c, sy * s)
            };
            outline.vertex(p);
        }
        let axis = if sx == sy {
            ellipse.point(sx, 0.0)
        } else {
            ellipse.point(0.0, sy)
        };
        outline.vertex(axis);
    }

    outline.done_loop(output)
}

/// The points of an ellipse, symmetric in the four quarters.
struct Ellipse {
    center: Point,
    radii: Size,
    points_per_quarter: u32,
    step: f64,
}

impl Ellipse {
    fn new(rect: &Box2D) -> Self {
        let size = rect.size();
        let largest = size.width.abs().max(size.height.abs());
        let points_per_quarter = ((largest / 16.0).round() as u32).max(1);

        Ellipse {
            center: rect.center(),
            radii: size * 0.5,
            points_per_quarter,
            step: FRAC_PI_2 / (points_per_quarter + 1) as f64,
        }
    }

    /// Sine and cosine of the angle of the `i`-th point of a quarter.
    fn quarter(&self, i: u32) -> (f32, f32) {
        let angle = self.step * (i + 1) as f64;
        (angle.sin() as f32, angle.cos() as f32)
    }

    fn point(&self, x: f32, y: f32) -> Point {
        point(
            self.center.x + x * self.radii.width,
            self.center.y + y * self.radii.height,
        )
    }
}

fn bind_texture<F: Fill + ?Sized, T: DrawTarget + ?Sized>(fill: &F, output: &mut T) {
    if let Some(texture) = fill.texture() {
        output.set_texture(texture);
    }
}

fn area_vertex<F, T>(output: &mut T, fill: &F, area: &Box2D, position: Point) -> VertexId
where
    F: Fill + ?Sized,
    T: DrawTarget + ?Sized,
{
    output.add_vertex(Vertex::new(
        position,
        fill.color_in_area(position, area),
        [
            fill.texture_u_in_area(position, area),
            fill.texture_v_in_area(position, area),
        ],
    ))
}

#[cfg(test)]
use crate::{
    color::Color,
    fill::{DebugFill, SolidFill},
    math::{rect, size},
    DrawBatch, Recorder,
};

#[test]
fn rectangle() {
    let mut batch = DrawBatch::new(Recorder::new());
    let r = rect(10.0, 20.0, 30.0, 40.0);

    fill_rectangle(&r, &DebugFill::new(size(100.0, 100.0)), &mut batch).unwrap();
    assert_eq!(batch.vertex_count(), 4);
    assert_eq!(batch.index_count(), 6);

    batch.finish();
    let recorded = &batch.sink().batches()[0];
    assert_eq!(recorded.indices, vec![0, 1, 2, 2, 3, 0]);
    // The fill sees the position within the rectangle.
    assert_eq!(recorded.vertices[0].color, Color::from_f32(0.0, 0.0, 1.0, 1.0));
    assert_eq!(recorded.vertices[2].color, Color::from_f32(1.0, 1.0, 1.0, 1.0));
    assert_eq!(recorded.vertices[1].position(), point(10.0, 60.0));
}

#[test]
fn ellipse_counts() {
    for (w, h, n) in [(10.0, 10.0, 1), (64.0, 16.0, 4), (-48.0, 8.0, 3)] {
        let mut batch = DrawBatch::new(Recorder::new());
        fill_ellipse(&rect(0.0, 0.0, w, h), &SolidFill::WHITE, &mut batch).unwrap();

        assert_eq!(batch.vertex_count(), 5 + 4 * n);
        assert_eq!(batch.index_count(), 12 * (n + 1));
    }
}

#[test]
fn ellipse_points_are_on_the_ellipse() {
    let mut batch = DrawBatch::new(Recorder::new());
    let r = centered(point(50.0, 50.0), size(80.0, 40.0));
    fill_ellipse(&r, &SolidFill::WHITE, &mut batch).unwrap();
    batch.finish();

    let recorded = &batch.sink().batches()[0];
    assert_eq!(recorded.vertices[0].position(), point(50.0, 50.0));
    for v in &recorded.vertices[1..] {
        let p = v.position();
        let x = (p.x - 50.0) / 40.0;
        let y = (p.y - 50.0) / 20.0;
        assert!((x * x + y * y - 1.0).abs() < 1e-4, "{:?}", p);
    }

    // No triangle is degenerate and they all have the same winding.
    for [a, b, c] in batch.sink().triangles() {
        let ab = b.position() - a.position();
        let ac = c.position() - a.position();
        assert!(ab.cross(ac) < 0.0);
    }
}

#[test]
fn outlines() {
    let mut tessellator = LineTessellator::new();
    let stroke = Stroke::black().with_width(2.0);
    let r = rect(0.0, 0.0, 32.0, 32.0);

    let mut batch = DrawBatch::new(Recorder::new());
    stroke_rectangle(&r, &stroke, &mut tessellator, &mut batch).unwrap();
    // Four bevel joins and four quads.
    assert_eq!(batch.vertex_count(), 4 * 5);
    assert_eq!(batch.index_count(), 3 * (4 + 4 * 2));

    let mut batch = DrawBatch::new(Recorder::new());
    stroke_ellipse(&r, &stroke, &mut tessellator, &mut batch).unwrap();
    let n = 2;
    assert_eq!(batch.vertex_count(), 5 * (4 * n + 4));
}

#[test]
fn centered_box() {
    let b = centered(point(0.0, 0.0), size(4.0, 2.0));
    assert_eq!(b, Box2D::new(point(-2.0, -1.0), point(2.0, 1.0)));
}
