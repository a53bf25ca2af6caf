//! Error types for depthfilt-filter
//!
//! Precondition violations (wrong channel count, mismatched destination)
//! are reported before any output is written. Invalid samples and
//! all-excluded neighborhoods are not errors; they produce zero pixels.

use depthfilt_core::DepthGrid;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] depthfilt_core::Error),

    /// Source or destination is not a single-channel depth grid
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels {
        /// Required channel count
        expected: u32,
        /// Channel count of the offending grid
        actual: u32,
    },

    /// Destination size differs from the source
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

pub(crate) fn check_single_channel(grid: &DepthGrid) -> FilterResult<()> {
    if grid.channels() != 1 {
        return Err(FilterError::UnsupportedChannels {
            expected: 1,
            actual: grid.channels(),
        });
    }
    Ok(())
}

/// Validate a source/destination pair before any output is written.
pub(crate) fn check_src_dst(src: &DepthGrid, dst: &DepthGrid) -> FilterResult<()> {
    check_single_channel(src)?;
    check_single_channel(dst)?;
    if src.dimensions() != dst.dimensions() {
        return Err(FilterError::DimensionMismatch {
            expected: src.dimensions(),
            actual: dst.dimensions(),
        });
    }
    Ok(())
}
