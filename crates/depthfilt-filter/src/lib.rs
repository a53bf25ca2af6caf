//! depthfilt-filter - Edge-preserving filters for depth maps
//!
//! This crate provides two validity-aware bilateral filters for
//! single-channel depth grids:
//!
//! - [`fixed_window_bilateral`] - direct evaluation over a clipped 13×13
//!   window, output clamped to `[0, 3·center]` by default
//! - [`depth_bilateral`] - configurable radius, precomputed spatial and
//!   range tables, explicit border padding and a maximum-depth-delta gate
//!
//! Both are pure functions: every call builds its own tables and the
//! output rows are computed in parallel with `rayon`. Invalid samples
//! (see [`depthfilt_core::is_valid_depth`]) never contribute to a
//! neighbor and always produce a zero output pixel.

pub mod bilateral;
mod error;
pub mod kernel;
pub mod policy;
pub mod range_lut;
pub mod windowed;

pub use error::{FilterError, FilterResult};
pub use kernel::{KernelTap, MAX_KERNEL_RADIUS, SpatialKernel};
pub use policy::ClampPolicy;
pub use range_lut::{RANGE_LUT_BINS, RangeLut};

// Re-export commonly used functions
pub use bilateral::{DepthBilateralParams, depth_bilateral, depth_bilateral_into};
pub use windowed::{
    FIXED_WINDOW_RADIUS, FixedWindowParams, fixed_window_bilateral, fixed_window_bilateral_into,
    fixed_window_bilateral_with,
};

use depthfilt_core::DepthGrid;

/// Filter selection for callers that pick the variant from configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "method", rename_all = "snake_case"))]
pub enum DepthFilter {
    /// [`fixed_window_bilateral_with`]
    FixedWindow(FixedWindowParams),
    /// [`depth_bilateral`]
    Parametric(DepthBilateralParams),
}

impl Default for DepthFilter {
    fn default() -> Self {
        DepthFilter::Parametric(DepthBilateralParams::default())
    }
}

/// Run the configured filter on `src`.
pub fn filter_depth(src: &DepthGrid, filter: &DepthFilter) -> FilterResult<DepthGrid> {
    match filter {
        DepthFilter::FixedWindow(params) => fixed_window_bilateral_with(src, params),
        DepthFilter::Parametric(params) => depth_bilateral(src, params),
    }
}

/// Run the configured filter on `src`, writing into `dst`.
pub fn filter_depth_into(
    src: &DepthGrid,
    dst: &mut DepthGrid,
    filter: &DepthFilter,
) -> FilterResult<()> {
    match filter {
        DepthFilter::FixedWindow(params) => fixed_window_bilateral_into(src, dst, params),
        DepthFilter::Parametric(params) => depth_bilateral_into(src, dst, params),
    }
}
