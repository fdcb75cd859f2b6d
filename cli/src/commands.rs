use quill::math::Point;
use quill::tessellation::{LineCap, LineJoin};
use std::io;

pub struct StrokeCmd {
    pub points: Vec<Point>,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    pub closed: bool,
    /// Maximum number of vertices per batch.
    pub capacity: usize,
    pub dump: bool,
    pub output: Box<dyn io::Write>,
}
