use crate::math::*;
use crate::*;

fn record<Body>(max_vertices: usize, max_indices: usize, body: Body) -> Recorder
where
    Body: FnOnce(&mut LineTessellator, &mut DrawBatch<Recorder>),
{
    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::with_capacity(max_vertices, max_indices, Recorder::new()).unwrap();

    body(&mut tessellator, &mut batch);
    batch.finish();

    assert_eq!(tessellator.state(), SessionState::Idle);
    batch.into_sink()
}

fn record_line<F: Fill>(stroke: &Stroke<F>, points: &[Point]) -> Recorder {
    record(u16::MAX as usize, u16::MAX as usize, |tess, batch| {
        tess.stroke_polyline(stroke, points, batch).unwrap();
    })
}

fn record_loop<F: Fill>(stroke: &Stroke<F>, points: &[Point]) -> Recorder {
    record(u16::MAX as usize, u16::MAX as usize, |tess, batch| {
        tess.stroke_loop(stroke, points, batch).unwrap();
    })
}

fn single_batch(recorder: &Recorder) -> &RecordedBatch {
    assert_eq!(recorder.batches().len(), 1);
    &recorder.batches()[0]
}

fn positions(batch: &RecordedBatch) -> Vec<Point> {
    batch.vertices.iter().map(Vertex::position).collect()
}

fn assert_close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
}

fn zigzag(count: usize, step: f32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let x = i as f32 * step;
            let y = if i % 2 == 0 { 0.0 } else { step * 0.75 } + (i % 7) as f32;
            point(x, y)
        })
        .collect()
}

fn circle(count: usize, radius: f32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let a = i as f32 / count as f32 * std::f32::consts::TAU;
            point(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn rainbow() -> LineFn<impl Fn(Point, usize, usize) -> Color> {
    line_fn(|_, i, n| hsb(i as f32 / n as f32, 1.0, 1.0, 1.0))
}

#[test]
fn test_l_shape() {
    let stroke = Stroke::white().with_width(2.0);
    let recorder = record_line(
        &stroke,
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
    );
    let batch = single_batch(&recorder);

    // Two caps of two vertices, one bevel join of five.
    assert_eq!(
        positions(batch),
        vec![
            point(0.0, 2.0),
            point(0.0, -2.0),
            point(10.0, 2.0),
            point(10.0, -2.0),
            point(8.0, 0.0),
            point(12.0, 0.0),
            point(10.0, 0.0),
            point(8.0, 10.0),
            point(12.0, 10.0),
        ]
    );

    // The join triangle fills the outer corner of the left turn, then the
    // two quads.
    assert_eq!(
        batch.indices,
        vec![3, 5, 6, 0, 2, 3, 3, 1, 0, 4, 7, 8, 8, 5, 4]
    );

    assert!(batch.vertices.iter().all(|v| v.color == Color::WHITE));
}

#[test]
fn test_butt_caps_and_bevel_joins_are_at_width_distance() {
    let points = [
        point(0.0, 0.0),
        point(10.0, 5.0),
        point(20.0, -3.0),
        point(35.0, 4.0),
        point(40.0, 20.0),
    ];
    let w = 3.0;
    let stroke = Stroke::black().with_width(w);
    let recorder = record_line(&stroke, &points);
    let vertices = positions(single_batch(&recorder));

    let direction = |i: usize| (points[i + 1] - points[i]).normalize();
    let check = |v: Point, center: Point, d: Vector| {
        let offset = v - center;
        assert!((offset.length() - w).abs() < 1e-4, "{:?}", offset);
        assert!(offset.dot(d).abs() < 1e-4, "{:?} {:?}", offset, d);
    };

    check(vertices[0], points[0], direction(0));
    check(vertices[1], points[0], direction(0));

    for join in 0..points.len() - 2 {
        let base = 2 + join * 5;
        let at = points[join + 1];
        check(vertices[base], at, direction(join));
        check(vertices[base + 1], at, direction(join));
        check(vertices[base + 2], at, direction(join + 1));
        check(vertices[base + 3], at, direction(join + 1));
        assert_eq!(vertices[base + 4], at);
    }

    let last = vertices.len() - 2;
    check(vertices[last], points[4], direction(3));
    check(vertices[last + 1], points[4], direction(3));
}

#[test]
fn test_join_counts() {
    let stroke = Stroke::white().with_width(4.0);

    for n in 2..12 {
        let points = circle(n, 100.0);

        let line = record_line(&stroke, &points);
        assert_eq!(line.vertex_count(), 2 * 2 + 5 * (n - 2));
        assert_eq!(line.triangle_count(), (n - 2) + 2 * (n - 1));

        // One join per vertex and one quad per segment.
        let closed = record_loop(&stroke, &points);
        assert_eq!(closed.vertex_count(), 5 * n);
        assert_eq!(closed.triangle_count(), n + 2 * n);
    }
}

#[test]
fn test_degenerate_lines() {
    let stroke = Stroke::white();
    for points in [&[][..], &[point(1.0, 2.0)][..]] {
        assert_eq!(record_line(&stroke, points).vertex_count(), 0);
        assert_eq!(record_loop(&stroke, points).vertex_count(), 0);
    }

    // The texture is bound even when there is nothing to draw.
    let tiled = Stroke::new(1.0, TiledTextureFill::new(TextureId(3), size(8.0, 8.0)));
    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());
    tessellator
        .stroke_polyline(&tiled, &[point(0.0, 0.0)], &mut batch)
        .unwrap();
    assert_eq!(batch.texture(), TextureId(3));
    assert_eq!(batch.vertex_count(), 0);
}

#[test]
fn test_miter_join() {
    let points = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let stroke = Stroke::white()
        .with_width(2.0)
        .with_join(LineJoin::Miter);

    let recorder = record_line(&stroke, &points);
    let batch = single_batch(&recorder);

    // No join triangle, both sides of the join share the miter point.
    assert_eq!(batch.vertices.len(), 8);
    assert_eq!(batch.indices.len(), 12);

    let vertices = positions(batch);
    let miter = point(12.0, -2.0);
    assert_close(vertices[3], miter);
    assert_close(vertices[5], miter);
    assert_eq!(vertices[2], point(10.0, 2.0));
    assert_eq!(vertices[4], point(8.0, 0.0));

    // Further from the corner than the bevel points, along the bisector.
    let corner = points[1];
    let bevel = record_line(&stroke.with_join(LineJoin::Bevel), &points);
    let bevel_vertices = positions(single_batch(&bevel));
    let to_miter = miter - corner;
    assert!(to_miter.length() > (bevel_vertices[3] - corner).length());
    assert!(to_miter.length() > (bevel_vertices[5] - corner).length());
    let bisector = vector(0.0, -1.0) + vector(1.0, 0.0);
    assert!(to_miter.cross(bisector).abs() < 1e-4);
}

#[test]
fn test_miter_limit_falls_back_to_bevel() {
    let right_angle = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let reversal = [point(0.0, 0.0), point(10.0, 0.0), point(0.0, 1.0)];
    let straight = [point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)];

    let bevel = Stroke::white().with_width(3.0).with_cap(LineCap::Square);
    let miter = bevel.with_join(LineJoin::Miter);

    // dot(d0, d1) = 0 is under the limit.
    assert_eq!(
        record_line(&miter.with_miter_limit(0.5), &right_angle),
        record_line(&bevel, &right_angle),
    );
    // Near reversals are under the default limit.
    assert_eq!(record_line(&miter, &reversal), record_line(&bevel, &reversal));
    // Parallel offset lines never intersect.
    assert_eq!(
        record_line(&miter.with_miter_limit(-1.0), &straight),
        record_line(&bevel, &straight),
    );
    // Sanity check that the miter is used otherwise.
    assert_ne!(record_line(&miter, &right_angle), record_line(&bevel, &right_angle));
}

fn fan_area(triangles: &[[Vertex; 3]]) -> f32 {
    triangles
        .iter()
        .map(|[a, b, c]| {
            let ab = b.position() - a.position();
            let ac = c.position() - a.position();
            ab.cross(ac).abs() * 0.5
        })
        .sum()
}

#[test]
fn test_round_join_approximates_a_sector() {
    let points = [point(0.0, 0.0), point(100.0, 0.0), point(100.0, 100.0)];

    let relative_error = |w: f32| {
        let stroke = Stroke::white().with_width(w).with_join(LineJoin::Round);
        let recorder = record_line(&stroke, &points);
        let triangles: Vec<[Vertex; 3]> = recorder.triangles().collect();

        // Everything but the two quads belongs to the fan.
        let fan = &triangles[..triangles.len() - 4];
        assert!(fan.len() >= 3);
        assert!(fan.len() as u32 <= MAX_JOIN_TRIANGLES);
        for tri in fan {
            assert_eq!(tri[0].position(), points[1]);
        }

        let sector = std::f32::consts::FRAC_PI_4 * w * w;
        (fan_area(fan) - sector).abs() / sector
    };

    let coarse = relative_error(5.0);
    let fine = relative_error(50.0);
    assert!(coarse < 0.06, "{}", coarse);
    assert!(fine < 0.005, "{}", fine);
    assert!(fine < coarse);
}

#[test]
fn test_round_join_step_limit() {
    // Close to a half turn with a very wide line.
    let points = [point(0.0, 0.0), point(100.0, 0.0), point(0.0, 1.0)];
    let stroke = Stroke::white()
        .with_width(1000.0)
        .with_join(LineJoin::Round);

    let recorder = record_line(&stroke, &points);
    assert_eq!(recorder.vertex_count(), 2 + MAX_JOIN_VERTICES as usize + 2);
    assert_eq!(
        recorder.triangle_count(),
        MAX_JOIN_TRIANGLES as usize + 2 * 2
    );
}

#[test]
fn test_round_caps() {
    let w = 4.0;
    let stroke = Stroke::white().with_width(w).with_cap(LineCap::Round);
    let recorder = record_line(&stroke, &[point(0.0, 0.0), point(10.0, 0.0)]);
    let batch = single_batch(&recorder);

    // floor(w / 2) + 2 steps per cap.
    let steps = 4;
    assert_eq!(batch.vertices.len(), 2 * (3 + steps));
    assert_eq!(batch.indices.len(), 3 * (2 * (steps + 1) + 2));

    let vertices = positions(batch);
    assert_eq!(vertices[0], point(0.0, w));
    assert_eq!(vertices[1], point(0.0, -w));
    assert_eq!(vertices[2], point(0.0, 0.0));
    for v in &vertices[3..3 + steps] {
        assert!(v.x <= 1e-4);
        assert!(((*v - point(0.0, 0.0)).length() - w).abs() < 1e-4);
    }
    assert_close(vertices[2 + steps], point(0.0, -w));

    let end = 3 + steps;
    assert_eq!(vertices[end + 2], point(10.0, 0.0));
    for v in &vertices[end + 3..] {
        assert!(v.x >= 10.0 - 1e-4);
    }

    // A half circle on each end.
    let triangles: Vec<[Vertex; 3]> = recorder.triangles().collect();
    let half_circle = std::f32::consts::FRAC_PI_2 * w * w;
    let area = fan_area(&triangles[..steps + 1]);
    assert!((area - half_circle).abs() / half_circle < 0.2, "{}", area);

    let huge = Stroke::white().with_width(1.0e4).with_cap(LineCap::Round);
    let recorder = record_line(&huge, &[point(0.0, 0.0), point(10.0, 0.0)]);
    assert_eq!(recorder.vertex_count(), 2 * MAX_CAP_VERTICES as usize);
    assert_eq!(recorder.triangle_count(), 2 * MAX_CAP_TRIANGLES as usize + 2);
}

#[test]
fn test_square_caps() {
    let stroke = Stroke::white().with_width(2.0).with_cap(LineCap::Square);
    let recorder = record_line(&stroke, &[point(0.0, 0.0), point(10.0, 0.0)]);

    assert_eq!(
        positions(single_batch(&recorder)),
        vec![
            point(-2.0, 2.0),
            point(-2.0, -2.0),
            point(12.0, 2.0),
            point(12.0, -2.0),
        ]
    );
}

#[test]
fn test_variable_width() {
    let stroke = Stroke::white();
    let mut batch = DrawBatch::new(Recorder::new());
    let mut tessellator = LineTessellator::new();

    let mut line = tessellator.begin(&stroke);
    line.vertex_w(point(0.0, 0.0), 1.0)
        .vertex(point(10.0, 0.0))
        .vertex_w(point(20.0, 0.0), 8.0);
    assert_eq!(line.vertex_count(), 3);
    line.done_line(&mut batch).unwrap();
    batch.finish();

    let vertices = positions(single_batch(batch.sink()));
    assert_eq!(vertices[0], point(0.0, 1.0));
    assert_eq!(vertices[2], point(10.0, Stroke::<SolidFill>::DEFAULT_WIDTH));
    assert_eq!(vertices[vertices.len() - 1], point(20.0, -8.0));
}

#[test]
fn test_colors() {
    let fill = line_fn(|_, i, n| Color::from_bytes(i as u8, n as u8, 0, 255));
    let stroke = Stroke::new(1.0, fill);

    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());
    line(&mut batch, &mut tessellator, &stroke, |line| {
        line.vertex(point(0.0, 0.0))
            .vertex_c(point(10.0, 0.0), Color::BLACK)
            .vertex(point(10.0, 10.0));
    })
    .unwrap();
    batch.finish();

    let colors: Vec<Color> = single_batch(batch.sink())
        .vertices
        .iter()
        .map(|v| v.color)
        .collect();

    let first = Color::from_bytes(0, 3, 0, 255);
    let last = Color::from_bytes(2, 3, 0, 255);
    assert_eq!(&colors[0..2], &[first, first]);
    assert!(colors[2..7].iter().all(|c| *c == Color::BLACK));
    assert_eq!(&colors[7..9], &[last, last]);
}

#[test]
fn test_texture_coordinates() {
    let stroke = Stroke::new(2.0, TiledTextureFill::new(TextureId(7), size(10.0, 20.0)));

    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());

    // Geometry drawn with another texture gets flushed first.
    crate::basic_shapes::fill_rectangle(&rect(0.0, 0.0, 1.0, 1.0), &SolidFill::WHITE, &mut batch)
        .unwrap();
    tessellator
        .stroke_polyline(&stroke, &[point(0.0, 0.0), point(10.0, 0.0)], &mut batch)
        .unwrap();
    assert_eq!(batch.render_calls(), 1);
    batch.finish();

    let batches = batch.sink().batches();
    assert_eq!(batches[0].texture, TextureId(0));
    assert_eq!(batches[1].texture, TextureId(7));
    for v in &batches[1].vertices {
        assert_eq!(v.uv, [v.position[0] / 10.0, v.position[1] / 20.0]);
    }
}

#[test]
fn test_flush_continuity() {
    let points = zigzag(300, 10.0);

    for join in [LineJoin::Bevel, LineJoin::Miter, LineJoin::Round] {
        for cap in [LineCap::Butt, LineCap::Square, LineCap::Round] {
            let stroke = Stroke::new(6.0, rainbow()).with_join(join).with_cap(cap);

            let reference = record_line(&stroke, &points);
            let flushed = record(64, 96, |tess, batch| {
                tess.stroke_polyline(&stroke, &points, batch).unwrap();
            });

            assert_eq!(reference.batches().len(), 1);
            assert!(flushed.batches().len() > 10);
            assert!(flushed.batches().iter().all(|b| b.vertices.len() <= 64));
            assert!(flushed.batches().iter().all(|b| b.indices.len() <= 96));

            // Same triangles in the same order, carried vertices included.
            assert!(reference.triangles().eq(flushed.triangles()), "{:?} {:?}", join, cap);
        }
    }
}

#[test]
fn test_loop_flush_continuity() {
    let points = circle(200, 500.0);

    for join in [LineJoin::Bevel, LineJoin::Miter, LineJoin::Round] {
        let stroke = Stroke::new(20.0, rainbow()).with_join(join);

        let reference = record_loop(&stroke, &points);
        let flushed = record(80, 120, |tess, batch| {
            tess.stroke_loop(&stroke, &points, batch).unwrap();
        });

        assert_eq!(reference.batches().len(), 1);
        assert!(flushed.batches().len() > 10);
        assert!(reference.triangles().eq(flushed.triangles()), "{:?}", join);

        // The last quad closes onto the first join, several flushes later.
        let last = flushed.triangles().last().unwrap();
        let first_join_right = &reference.batches()[0].vertices[1];
        assert!(last.contains(first_join_right));
    }
}

#[test]
fn test_request_too_large() {
    let stroke = Stroke::white().with_width(100.0).with_join(LineJoin::Round);
    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::with_capacity(8, 64, Recorder::new()).unwrap();

    let result = tessellator.stroke_polyline(
        &stroke,
        &[point(0.0, 0.0), point(100.0, 0.0), point(100.0, 100.0)],
        &mut batch,
    );

    assert_eq!(
        result,
        Err(TessellationError::DrawTarget(DrawTargetError::RequestTooLarge {
            vertices: 107,
            triangles: 105,
        }))
    );
    assert_eq!(tessellator.state(), SessionState::Idle);
}

#[test]
fn test_determinism() {
    let points = zigzag(50, 7.0);
    let stroke = Stroke::new(3.0, rainbow())
        .with_join(LineJoin::Round)
        .with_cap(LineCap::Round);

    let mut tessellator = LineTessellator::new();
    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut batch = DrawBatch::with_capacity(100, 300, Recorder::new()).unwrap();
        tessellator.stroke_polyline(&stroke, &points, &mut batch).unwrap();
        tessellator.stroke_loop(&stroke, &points, &mut batch).unwrap();
        batch.finish();
        outputs.push(batch.into_sink());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_zero_length_segments() {
    let points = [
        point(0.0, 0.0),
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
    ];

    for join in [LineJoin::Bevel, LineJoin::Miter, LineJoin::Round] {
        for cap in [LineCap::Butt, LineCap::Square, LineCap::Round] {
            let stroke = Stroke::white().with_join(join).with_cap(cap);
            let line = record_line(&stroke, &points);
            let closed = record_loop(&stroke, &points);

            assert!(line.triangle_count() > 0);
            assert!(closed.triangle_count() > 0);
            for v in line.triangles().chain(closed.triangles()).flatten() {
                assert!(v.position[0].is_finite() && v.position[1].is_finite());
            }
        }
    }
}

#[test]
fn test_nan() {
    let stroke = Stroke::white();
    let mut tessellator = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());

    let result = tessellator.stroke_polyline(
        &stroke,
        &[point(0.0, 0.0), point(f32::NAN, 1.0), point(2.0, 2.0)],
        &mut batch,
    );
    assert_eq!(
        result,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );

    let mut line = tessellator.begin(&stroke);
    line.vertex(point(0.0, 0.0)).vertex_w(point(1.0, 0.0), f32::NAN);
    assert_eq!(
        line.done_loop(&mut batch),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::WidthIsNaN
        ))
    );

    assert_eq!(batch.vertex_count(), 0);
    assert_eq!(tessellator.state(), SessionState::Idle);
}

#[test]
fn test_session_scopes() {
    let stroke = Stroke::black();
    let points = [point(0.0, 0.0), point(10.0, 0.0), point(5.0, 8.0)];

    let scoped = record(u16::MAX as usize, u16::MAX as usize, |tess, batch| {
        line_loop(batch, tess, &stroke, |line| {
            for p in &points {
                line.vertex(*p);
            }
        })
        .unwrap();
    });
    let polygon = record(u16::MAX as usize, u16::MAX as usize, |tess, batch| {
        let polygon = Polygon {
            points: &points,
            closed: true,
        };
        tess.stroke_polygon(&stroke, polygon, batch).unwrap();
    });

    assert_eq!(scoped, record_loop(&stroke, &points));
    assert_eq!(polygon, record_loop(&stroke, &points));
}

#[test]
fn test_abandoned_session() {
    let stroke = Stroke::white();
    let mut tessellator = LineTessellator::new();
    assert_eq!(tessellator.state(), SessionState::Idle);

    {
        let mut line = tessellator.begin(&stroke);
        line.vertex(point(0.0, 0.0)).vertex(point(1.0, 1.0));
    }
    assert_eq!(tessellator.state(), SessionState::Idle);

    // The dropped vertices don't leak into the next line.
    let mut batch = DrawBatch::new(Recorder::new());
    let mut line = tessellator.begin(&stroke);
    line.vertex(point(0.0, 0.0));
    assert_eq!(line.vertex_count(), 1);
    line.done_line(&mut batch).unwrap();
    assert_eq!(batch.vertex_count(), 0);
}

#[test]
fn test_leaked_session_stays_open() {
    let stroke = Stroke::white();
    let mut tessellator = LineTessellator::new();
    std::mem::forget(tessellator.begin(&stroke));
    assert_eq!(tessellator.state(), SessionState::Collecting);
}

#[test]
#[should_panic]
fn test_nested_session() {
    let stroke = Stroke::white();
    let mut tessellator = LineTessellator::new();
    std::mem::forget(tessellator.begin(&stroke));
    let _ = tessellator.begin(&stroke);
}
