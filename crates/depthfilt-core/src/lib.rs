//! depthfilt-core - Basic data structures for depth-map filtering
//!
//! This crate provides the data types shared by the depthfilt crates:
//!
//! - [`DepthGrid`] - Floating-point depth map with invalid-sample semantics
//! - [`BorderMode`] - Border extension rules for padded processing
//! - [`Error`] / [`Result`] - Core error handling
//!
//! A depth sample below [`INVALID_DEPTH_THRESHOLD`] means "no measurement";
//! see [`is_valid_depth`].

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::border::BorderMode;
pub use grid::{DepthGrid, INVALID_DEPTH_THRESHOLD, is_valid_depth};
