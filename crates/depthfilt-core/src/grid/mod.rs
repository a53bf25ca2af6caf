//! DepthGrid - Floating-point depth map
//!
//! `DepthGrid` is a 2D array of `f32` samples as produced by range-sensing
//! cameras. A sample below [`INVALID_DEPTH_THRESHOLD`] (or a non-finite
//! sample) marks a pixel without a reliable measurement.
//!
//! See [`border`] for border extension.
//!
//! # Examples
//!
//! ```
//! use depthfilt_core::DepthGrid;
//!
//! let mut grid = DepthGrid::new(640, 480).unwrap();
//! grid.set_pixel(10, 20, 1.25).unwrap();
//! assert_eq!(grid.get_pixel(10, 20).unwrap(), 1.25);
//! assert_eq!(grid.valid_count(), 1);
//! ```

pub mod border;

use crate::error::{Error, Result};

/// Samples strictly below this value carry no depth measurement.
pub const INVALID_DEPTH_THRESHOLD: f32 = 1e-5;

/// Returns `true` if `value` is a usable depth measurement.
///
/// NaN and infinite samples are rejected along with everything below
/// [`INVALID_DEPTH_THRESHOLD`].
#[inline]
pub fn is_valid_depth(value: f32) -> bool {
    value.is_finite() && value >= INVALID_DEPTH_THRESHOLD
}

/// Floating-point depth grid
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. Samples of
/// multi-channel grids are interleaved, so channel `c` of the pixel at
/// (x, y) is at index `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: u32,
    /// Sample data (row-major, interleaved, no padding)
    data: Vec<f32>,
}

impl DepthGrid {
    /// Create a new single-channel grid with all samples set to zero
    /// (that is, every pixel invalid).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthfilt_core::DepthGrid;
    ///
    /// let grid = DepthGrid::new(640, 480).unwrap();
    /// assert_eq!(grid.dimensions(), (640, 480));
    /// assert_eq!(grid.channels(), 1);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new single-channel grid with every sample set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        check_dimensions(width, height)?;

        let size = (width as usize) * (height as usize);
        Ok(DepthGrid {
            width,
            height,
            channels: 1,
            data: vec![value; size],
        })
    }

    /// Create a single-channel grid from row-major sample data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length does
    /// not equal `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        Self::from_interleaved(width, height, 1, data)
    }

    /// Create a grid from interleaved multi-channel sample data
    ///
    /// Frame sources sometimes deliver packed float frames (for example an
    /// XYZ point map); those can be wrapped here, but the bilateral filters
    /// only accept single-channel grids.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions or channel count are invalid, or the
    /// data length does not equal `width * height * channels`.
    pub fn from_interleaved(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height)?;
        if channels == 0 {
            return Err(Error::InvalidChannels(channels));
        }

        let expected_size = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels,
                expected_size
            )));
        }

        Ok(DepthGrid {
            width,
            height,
            channels,
            data,
        })
    }

    /// Get the grid width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the grid dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the number of interleaved samples per pixel
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Number of samples in one row (`width * channels`)
    #[inline]
    pub fn row_len(&self) -> usize {
        (self.width as usize) * (self.channels as usize)
    }

    /// Get the first-channel sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        let idx = self.checked_index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the first-channel sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Get the first-channel sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Set the first-channel sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the grid and return its sample buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Get a mutable row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let len = self.row_len();
        let start = (y as usize) * len;
        &mut self.data[start..start + len]
    }

    /// Set every sample to the specified value
    pub fn set_all(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Mark every pixel invalid
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Create a zeroed grid with the same size and channel count
    pub fn create_template(&self) -> DepthGrid {
        DepthGrid {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Check that two grids have the same dimensions and channel count
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` on a width/height mismatch and
    /// `Error::InvalidChannels` on a channel-count mismatch.
    pub fn check_same_size(&self, other: &DepthGrid) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        if self.channels != other.channels {
            return Err(Error::InvalidChannels(other.channels));
        }
        Ok(())
    }

    // ========================================================================
    // Validity
    // ========================================================================

    /// Returns `true` if the first-channel sample at (x, y) is a valid depth.
    ///
    /// Out-of-range coordinates are reported as invalid.
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).is_ok_and(is_valid_depth)
    }

    /// Count the samples holding a valid depth
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| is_valid_depth(v)).count()
    }

    /// Per-sample validity mask in the same layout as [`DepthGrid::data`]
    pub fn validity_mask(&self) -> Vec<bool> {
        self.data.iter().map(|&v| is_valid_depth(v)).collect()
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Global minimum and maximum over all finite samples, invalid ones
    /// included.
    ///
    /// Returns `None` if no sample is finite.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Minimum and maximum over valid samples only
    ///
    /// Returns `None` if the grid holds no valid depth.
    pub fn valid_min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|&v| is_valid_depth(v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Mean of the valid samples
    ///
    /// Returns `None` if the grid holds no valid depth.
    pub fn valid_mean(&self) -> Option<f32> {
        let (sum, count) = self
            .data
            .iter()
            .filter(|&&v| is_valid_depth(v))
            .fold((0.0f64, 0usize), |(s, n), &v| (s + v as f64, n + 1));
        (count > 0).then(|| (sum / count as f64) as f32)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = self.index(x, y);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}
