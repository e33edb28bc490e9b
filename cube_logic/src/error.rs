use thiserror::Error;

use crate::cube::CubeColor;

/// Reasons a scan could not be turned into a consistent set of six sides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("expected 54 facelets, got {0}")]
    FaceletCount(usize),
    #[error("no center facelet identified as {0}")]
    MissingCenter(CubeColor),
    #[error("blue and green centers share hue {0}")]
    AmbiguousBlueGreen(u8),
    #[error("center facelet {0} falls in the white set, a side was scanned twice")]
    DuplicateSide(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("invalid face {0:?}")]
    Face(String),
    #[error("invalid solver move {0:?}")]
    SolverMove(String),
    #[error("invalid robot move {0:?}")]
    RobotMove(String),
    #[error("invalid cube string {0:?}")]
    CubeString(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("image {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("image {width}x{height} too small for a 3x3 grid")]
    TooSmall { width: usize, height: usize },
}
