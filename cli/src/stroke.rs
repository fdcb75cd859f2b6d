use crate::commands::StrokeCmd;
use quill::tessellation::{
    DrawBatch, DrawTargetError, LineTessellator, Recorder, Stroke, TessellationError,
};
use std::fmt;
use std::io::{self, Write};

#[derive(Debug)]
pub enum StrokeError {
    Io(io::Error),
    Batch(DrawTargetError),
    Tessellation(TessellationError),
}

impl From<io::Error> for StrokeError {
    fn from(err: io::Error) -> Self {
        StrokeError::Io(err)
    }
}

impl From<DrawTargetError> for StrokeError {
    fn from(err: DrawTargetError) -> Self {
        StrokeError::Batch(err)
    }
}

impl From<TessellationError> for StrokeError {
    fn from(err: TessellationError) -> Self {
        StrokeError::Tessellation(err)
    }
}

impl fmt::Display for StrokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeError::Io(err) => write!(f, "i/o error: {}", err),
            StrokeError::Batch(err) => write!(f, "invalid batch: {}", err),
            StrokeError::Tessellation(err) => write!(f, "tessellation failed: {}", err),
        }
    }
}

pub fn stroke(mut cmd: StrokeCmd) -> Result<(), StrokeError> {
    let stroke = Stroke::white()
        .with_width(cmd.width)
        .with_cap(cmd.cap)
        .with_join(cmd.join)
        .with_miter_limit(cmd.miter_limit);

    let mut batch = DrawBatch::with_capacity(cmd.capacity, cmd.capacity * 3, Recorder::new())?;
    let mut tessellator = LineTessellator::new();

    log::info!(
        "stroking {} {} points",
        if cmd.closed { "a loop of" } else { "a line of" },
        cmd.points.len()
    );

    if cmd.closed {
        tessellator.stroke_loop(&stroke, &cmd.points, &mut batch)?;
    } else {
        tessellator.stroke_polyline(&stroke, &cmd.points, &mut batch)?;
    }
    batch.finish();

    let recorder = batch.sink();
    let output = &mut *cmd.output;

    writeln!(output, "batches: {}", recorder.batches().len())?;
    writeln!(output, "vertices: {}", recorder.vertex_count())?;
    writeln!(output, "triangles: {}", recorder.triangle_count())?;
    writeln!(output, "largest batch: {} vertices", batch.max_vertices_in_batch())?;

    if !cmd.dump {
        return Ok(());
    }

    for (i, recorded) in recorder.batches().iter().enumerate() {
        writeln!(output, "batch {} (texture {}):", i, recorded.texture.0)?;

        write!(output, "  vertices: [")?;
        for (n, vertex) in recorded.vertices.iter().enumerate() {
            if n > 0 {
                write!(output, ", ")?;
            }
            write!(output, "({}, {})", vertex.position[0], vertex.position[1])?;
        }
        writeln!(output, "]")?;

        write!(output, "  indices: [")?;
        for (n, index) in recorded.indices.iter().enumerate() {
            if n > 0 {
                write!(output, ", ")?;
            }
            write!(output, "{}", index)?;
        }
        writeln!(output, "]")?;
    }

    Ok(())
}
