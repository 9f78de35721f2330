//! Error types for analysis operations.

use thiserror::Error;

/// Errors returned by [`NoveltySliceClient::process`](crate::NoveltySliceClient::process).
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Sample rate was zero, negative, or not finite.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Input contained NaN or infinite samples.
    #[error("non-finite sample at index {0}")]
    NonFiniteInput(usize),
}
