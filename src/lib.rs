#![deny(bare_trait_objects)]

//! Tessellation of 2D lines of variable width and color for GPU rendering.
//!
//! # Crates
//!
//! This meta-crate (`quill`) reexports the following sub-crates for convenience:
//!
//! * **quill_tessellation** - Line stroke tessellation into batched triangle meshes.
//! * **quill_geom** - 2D math on top of euclid, line intersection and arc stepping.
//!
//! Each `quill_<name>` crate is reexported as a `<name>` module in `quill`. For example:
//!
//! ```ignore
//! use quill_tessellation::LineTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use quill::tessellation::LineTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ```
//! use quill::math::point;
//! use quill::tessellation::{DrawBatch, LineJoin, LineTessellator, Recorder, Stroke};
//!
//! let mut batch = DrawBatch::new(Recorder::new());
//! let mut tessellator = LineTessellator::new();
//! let stroke = Stroke::black().with_width(2.0).with_join(LineJoin::Round);
//!
//! tessellator.stroke_loop(
//!     &stroke,
//!     &[point(0.0, 0.0), point(100.0, 0.0), point(50.0, 80.0)],
//!     &mut batch,
//! ).unwrap();
//!
//! batch.finish();
//! assert!(batch.sink().triangle_count() > 0);
//! ```

pub extern crate quill_tessellation;

pub use quill_tessellation as tessellation;
pub use quill_tessellation::geom;
pub use quill_tessellation::math;
