use crate::Vec2;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// The position lies outside the tree's root boundary. An ordinary
    /// rejection; hosts that clamp entities to the viewport may ignore it.
    #[error("position {0:?} is outside the tree boundary")]
    OutOfBounds(Vec2),

    /// Every quadrant rejected a position the parent boundary accepted.
    /// Indicates floating-point disagreement at a quadrant edge; a
    /// programmer-facing invariant violation, never an expected outcome.
    #[error("no quadrant accepted position {0:?} inside the parent boundary")]
    QuadrantMismatch(Vec2),
}
