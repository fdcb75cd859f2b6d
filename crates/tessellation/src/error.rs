use thiserror::Error;

/// The line tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error reported by a [`DrawTarget`](crate::DrawTarget).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum DrawTargetError {
    /// The requested geometry does not fit in an empty batch.
    #[error("{vertices} vertices and {triangles} triangles will never fit in a batch")]
    RequestTooLarge { vertices: u32, triangles: u32 },
    /// A batch must hold at least one vertex and index, and vertices must be
    /// addressable with 16-bit indices.
    #[error("invalid batch capacity ({vertices} vertices, {indices} indices)")]
    InvalidCapacity { vertices: usize, indices: usize },
}

/// Input the tessellator refuses to work with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum UnsupportedParameter {
    #[error("position is not a number")]
    PositionIsNaN,
    #[error("line width is not a number")]
    WidthIsNaN,
}

/// The line tessellator's error enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum TessellationError {
    #[error("unsupported parameter: {0}")]
    UnsupportedParameter(#[from] UnsupportedParameter),
    #[error("draw target error: {0}")]
    DrawTarget(#[from] DrawTargetError),
}
