//! depthfilt - Depth-map denoising for range cameras
//!
//! # Overview
//!
//! depthfilt smooths per-pixel noise in single-channel depth frames while
//! keeping object boundaries sharp and leaving missing measurements
//! missing. It provides:
//!
//! - [`DepthGrid`] - the depth frame container (samples below 1e-5 are invalid)
//! - [`filter::fixed_window_bilateral`] - direct 13×13 bilateral filter
//! - [`filter::depth_bilateral`] - table-driven bilateral filter with a
//!   maximum-depth-delta gate and selectable border handling
//!
//! Frame acquisition and display are left to the caller.
//!
//! # Example
//!
//! ```
//! use depthfilt::DepthGrid;
//! use depthfilt::filter::{DepthBilateralParams, depth_bilateral};
//!
//! let mut depth = DepthGrid::new_with_value(64, 48, 1.5).unwrap();
//! depth.set_pixel(10, 10, 0.0).unwrap(); // no measurement
//!
//! let smoothed = depth_bilateral(&depth, &DepthBilateralParams::default()).unwrap();
//! assert_eq!(smoothed.dimensions(), (64, 48));
//! assert_eq!(smoothed.get_pixel(10, 10).unwrap(), 0.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use depthfilt_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use depthfilt_filter as filter;
