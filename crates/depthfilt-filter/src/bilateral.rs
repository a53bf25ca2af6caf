//! Parametric depth bilateral filter
//!
//! Table-driven bilateral smoothing for depth maps with a configurable
//! radius. Compared to the fixed-window filter it adds:
//!
//! - a circular spatial support built once per call ([`SpatialKernel`])
//! - an interpolated range-weight table instead of per-neighbor `exp`
//!   ([`RangeLut`])
//! - explicit border padding with a selectable [`BorderMode`]
//! - an adaptive gate that drops neighbors whose depth differs from the
//!   center by more than `max_delta_depth_fraction · center`
//!
//! # Algorithm
//!
//! For a valid center `v0`, the output is
//!
//! ```text
//! Σ u·ws(k)·wr(|u - v0|) / Σ ws(k)·wr(|u - v0|)
//! ```
//!
//! over every valid tap `u` with `|u - v0| <= v0 · fraction`. Invalid
//! centers produce 0, and so does a neighborhood where nothing
//! contributes. No clamping is applied unless requested.
//!
//! # Example
//!
//! ```ignore
//! use depthfilt_filter::{DepthBilateralParams, depth_bilateral};
//!
//! let params = DepthBilateralParams { sigma_space: 2.0, ..Default::default() };
//! let smoothed = depth_bilateral(&depth, &params)?;
//! ```

use crate::error::{check_single_channel, check_src_dst};
use crate::kernel::{MAX_KERNEL_RADIUS, SpatialKernel};
use crate::policy::{ClampPolicy, effective_sigma, weighted_mean};
use crate::range_lut::RangeLut;
use crate::{FilterError, FilterResult};
use depthfilt_core::{BorderMode, DepthGrid, is_valid_depth};
use rayon::prelude::*;

/// Default range bandwidth, in sensor depth units
pub const DEFAULT_SIGMA_COLOR: f32 = 0.05;

/// Default spatial bandwidth, in pixels
pub const DEFAULT_SIGMA_SPACE: f32 = 3.0;

/// Default maximum depth delta, as a fraction of the center depth
pub const DEFAULT_MAX_DELTA_DEPTH_FRACTION: f32 = 0.1;

/// Options for the parametric filter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DepthBilateralParams {
    /// Range-kernel bandwidth (≤ 0 means 1)
    pub sigma_color: f32,
    /// Spatial-kernel bandwidth (≤ 0 means 1)
    pub sigma_space: f32,
    /// Kernel diameter; `None` (or 0) derives it from `sigma_space`
    pub diameter: Option<u32>,
    /// Neighbors further than this fraction of the center depth are
    /// excluded; must lie in (0, 1]
    pub max_delta_depth_fraction: f32,
    /// Border extension used for the padded source
    pub border_mode: BorderMode,
    /// Output clamping
    pub clamp: ClampPolicy,
}

impl Default for DepthBilateralParams {
    fn default() -> Self {
        Self {
            sigma_color: DEFAULT_SIGMA_COLOR,
            sigma_space: DEFAULT_SIGMA_SPACE,
            diameter: None,
            max_delta_depth_fraction: DEFAULT_MAX_DELTA_DEPTH_FRACTION,
            border_mode: BorderMode::default(),
            clamp: ClampPolicy::Unclamped,
        }
    }
}

impl DepthBilateralParams {
    /// Check the options that have no defined fallback.
    ///
    /// # Errors
    /// `FilterError::InvalidParameters` if `max_delta_depth_fraction` is
    /// outside (0, 1] or the kernel radius exceeds [`MAX_KERNEL_RADIUS`].
    pub fn validate(&self) -> FilterResult<()> {
        let f = self.max_delta_depth_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "max_delta_depth_fraction must be in (0, 1], got {f}"
            )));
        }
        let radius = self.radius();
        if radius > MAX_KERNEL_RADIUS {
            return Err(FilterError::InvalidParameters(format!(
                "kernel radius {radius} exceeds maximum {MAX_KERNEL_RADIUS} \
                 (diameter {:?}, sigma_space {})",
                self.diameter, self.sigma_space
            )));
        }
        Ok(())
    }

    /// Kernel radius used for these options.
    ///
    /// An explicit diameter gives `diameter / 2`; otherwise the radius is
    /// `round(1.5 · sigma_space)`. The result is at least 1; an oversized
    /// radius is reported by [`validate`](Self::validate).
    pub fn radius(&self) -> u32 {
        let radius = match self.diameter {
            Some(d) if d > 0 => d / 2,
            _ => (effective_sigma(self.sigma_space) * 1.5).round() as u32,
        };
        radius.max(1)
    }
}

/// Apply the parametric depth bilateral filter.
///
/// # Returns
/// New grid of the same size
///
/// # Errors
/// - `FilterError::UnsupportedChannels` if `src` is not single-channel
/// - `FilterError::InvalidParameters` if the options fail validation
pub fn depth_bilateral(src: &DepthGrid, params: &DepthBilateralParams) -> FilterResult<DepthGrid> {
    check_single_channel(src)?;
    let mut dst = src.create_template();
    depth_bilateral_into(src, &mut dst, params)?;
    Ok(dst)
}

/// Apply the parametric depth bilateral filter, writing into `dst`.
///
/// All lookup tables are built before the parallel row sweep starts and
/// are dropped when the call returns.
///
/// # Errors
/// - `FilterError::UnsupportedChannels` if either grid is not single-channel
/// - `FilterError::DimensionMismatch` if the sizes differ
/// - `FilterError::InvalidParameters` if the options fail validation
pub fn depth_bilateral_into(
    src: &DepthGrid,
    dst: &mut DepthGrid,
    params: &DepthBilateralParams,
) -> FilterResult<()> {
    check_src_dst(src, dst)?;
    params.validate()?;

    let sigma_color = effective_sigma(params.sigma_color);
    let sigma_space = effective_sigma(params.sigma_space);
    let radius = params.radius();

    // An all-NaN grid has no range; every pixel is invalid anyway.
    let (min_val, max_val) = src.min_max().unwrap_or((0.0, 0.0));

    let padded = src.add_border(radius, params.border_mode)?;
    let stride = padded.width() as usize;
    let kernel = SpatialKernel::circular(radius, sigma_space)?;
    let offsets = kernel.offsets(stride);
    let lut = RangeLut::new(sigma_color, max_val - min_val);

    let (w, h) = src.dimensions();
    log::debug!(
        "depth_bilateral: {w}x{h}, radius {radius} (d = {}), {} taps, \
         lut {} entries, scale {}, border {:?}",
        kernel.diameter(),
        kernel.len(),
        lut.len(),
        lut.scale(),
        params.border_mode
    );

    let fraction = params.max_delta_depth_fraction;
    let clamp = params.clamp;
    let taps = kernel.taps();
    let samples = padded.data();
    let r = radius as usize;

    dst.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, out_row)| {
            let row_start = (y + r) * stride + r;
            for (x, out) in out_row.iter_mut().enumerate() {
                let center = row_start + x;
                let v0 = samples[center];
                if !is_valid_depth(v0) {
                    *out = 0.0;
                    continue;
                }

                let max_delta = v0 * fraction;
                let mut sum = 0.0f32;
                let mut wsum = 0.0f32;
                for (tap, &ofs) in taps.iter().zip(&offsets) {
                    let val = samples[center.wrapping_add_signed(ofs)];
                    if !is_valid_depth(val) {
                        continue;
                    }
                    let delta = (val - v0).abs();
                    if delta > max_delta {
                        continue;
                    }
                    let weight = tap.weight * lut.weight(delta);
                    sum += val * weight;
                    wsum += weight;
                }

                *out = clamp.apply(weighted_mean(sum, wsum), v0);
            }
        });

    log::trace!("depth_bilateral: sweep of {h} rows done");
    Ok(())
}
