//! Error types for palette generation and color math.

use thiserror::Error;

/// Errors surfaced by the crate's public API.
///
/// All variants represent caller-input mistakes (an out-of-range alpha, a
/// translucent background passed where an opaque one is required, or a
/// malformed pixel buffer). Internal algorithmic dead ends (an empty
/// priority queue, an unsplittable box, zero population in an averaging
/// step) are handled locally and never surface as errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
    #[error("alpha value {0} is outside the valid range 0..=255")]
    InvalidAlpha(i32),

    #[error("background color must be fully opaque to compute contrast against it")]
    InvalidBackground,

    #[error("palette builder was given neither an image nor a swatch list, or the given source was empty")]
    EmptyInput,

    #[error("pixel buffer length {actual} does not match width * height * 4 ({expected})")]
    InvalidBuffer { expected: usize, actual: usize },
}

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, PaletteError>;
