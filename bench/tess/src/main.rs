#[macro_use]
extern crate bencher;

use quill::math::{point, rect, Point};
use quill::tessellation::basic_shapes::{fill_ellipse, stroke_ellipse};
use quill::tessellation::{
    hsb, line_fn, Batch, DrawBatch, LineCap, LineJoin, LineTessellator, Recorder, SolidFill, Stroke,
};

use bencher::Bencher;

const N: usize = 100;

fn spiral(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * 0.1;
            let radius = 10.0 + i as f32 * 0.5;
            point(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn discard(_: &Batch) {}

fn stroke_spiral(bench: &mut Bencher, join: LineJoin, cap: LineCap) {
    let points = spiral(1000);
    let stroke = Stroke::white().with_width(4.0).with_join(join).with_cap(cap);
    let mut tess = LineTessellator::new();
    let mut batch = DrawBatch::new(discard);

    bench.iter(|| {
        for _ in 0..N {
            tess.stroke_polyline(&stroke, &points, &mut batch).unwrap();
            batch.finish();
        }
    })
}

fn stroke_spiral_bevel(bench: &mut Bencher) {
    stroke_spiral(bench, LineJoin::Bevel, LineCap::Butt);
}

fn stroke_spiral_miter(bench: &mut Bencher) {
    stroke_spiral(bench, LineJoin::Miter, LineCap::Square);
}

fn stroke_spiral_round(bench: &mut Bencher) {
    stroke_spiral(bench, LineJoin::Round, LineCap::Round);
}

fn stroke_spiral_small_batches(bench: &mut Bencher) {
    let points = spiral(1000);
    let stroke = Stroke::white().with_width(4.0).with_join(LineJoin::Round);
    let mut tess = LineTessellator::new();
    let mut batch = DrawBatch::with_capacity(512, 1536, Recorder::new()).unwrap();

    bench.iter(|| {
        for _ in 0..N {
            tess.stroke_loop(&stroke, &points, &mut batch).unwrap();
            batch.finish();
            batch.sink_mut().clear();
        }
    })
}

fn stroke_spiral_deferred_colors(bench: &mut Bencher) {
    let points = spiral(1000);
    let fill = line_fn(|_, i, n| hsb(i as f32 / n as f32, 1.0, 1.0, 1.0));
    let stroke = Stroke::new(4.0, fill);
    let mut tess = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());

    bench.iter(|| {
        for _ in 0..N {
            tess.stroke_polyline(&stroke, &points, &mut batch).unwrap();
            batch.finish();
            batch.sink_mut().clear();
        }
    })
}

fn ellipses(bench: &mut Bencher) {
    let stroke = Stroke::black();
    let mut tess = LineTessellator::new();
    let mut batch = DrawBatch::new(Recorder::new());

    bench.iter(|| {
        for i in 0..N {
            let r = rect(0.0, 0.0, 10.0 + i as f32, 200.0);
            fill_ellipse(&r, &SolidFill::WHITE, &mut batch).unwrap();
            stroke_ellipse(&r, &stroke, &mut tess, &mut batch).unwrap();
        }
        batch.finish();
        batch.sink_mut().clear();
    })
}

benchmark_group!(stroke_tess,
  stroke_spiral_bevel,
  stroke_spiral_miter,
  stroke_spiral_round,
  stroke_spiral_small_batches,
  stroke_spiral_deferred_colors
);

benchmark_group!(shapes,
  ellipses
);

benchmark_main!(stroke_tess, shapes);
