//! Matrix error handling
//!
//! Errors for the validated constructors, which accept data from outside the
//! crate and report invariant violations instead of panicking.

/// Matrix-specific result type
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Errors raised when building a matrix from external data
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("matrix rank must be zero or a power of two, got {rank}")]
    RankNotPowerOfTwo { rank: u32 },

    #[error("buffer of {actual} elements does not match rank {rank} (expected {expected})")]
    BufferSizeMismatch {
        rank: u32,
        expected: u64,
        actual: usize,
    },
}
