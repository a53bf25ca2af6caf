//! Fixed-window depth bilateral filter
//!
//! Brute-force bilateral smoothing over a square 13×13 window
//! ([`FIXED_WINDOW_RADIUS`] = 6). The window is clipped to the grid, so
//! border pixels simply see fewer neighbors; nothing is padded.
//!
//! For a valid center sample `v` and each valid neighbor `u` at pixel
//! distance `d`:
//!
//! ```text
//! w = exp(-(d² / (2·sigma_space²) + (v - u)² / (2·sigma_color²)))
//! ```
//!
//! The weighted mean is then clamped to `[0, 3·v]` by default
//! (see [`ClampPolicy`]). Invalid centers produce 0.
//!
//! # Example
//!
//! ```ignore
//! use depthfilt_filter::fixed_window_bilateral;
//!
//! let smoothed = fixed_window_bilateral(&depth, 0.05, 3.0)?;
//! ```

use crate::FilterResult;
use crate::error::{check_single_channel, check_src_dst};
use crate::policy::{ClampPolicy, effective_sigma, weighted_mean};
use depthfilt_core::{DepthGrid, is_valid_depth};
use rayon::prelude::*;

/// Half-size of the fixed square window
pub const FIXED_WINDOW_RADIUS: u32 = 6;

/// Default range bandwidth, in sensor depth units
pub const DEFAULT_SIGMA_COLOR: f32 = 0.05;

/// Default spatial bandwidth, in pixels
pub const DEFAULT_SIGMA_SPACE: f32 = 3.0;

/// Default clamp multiple for the fixed-window filter
pub const DEFAULT_CLAMP_MULTIPLE: f32 = 3.0;

/// Options for the fixed-window filter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FixedWindowParams {
    /// Range-kernel bandwidth (≤ 0 means 1)
    pub sigma_color: f32,
    /// Spatial-kernel bandwidth (≤ 0 means 1)
    pub sigma_space: f32,
    /// Output clamping
    pub clamp: ClampPolicy,
}

impl Default for FixedWindowParams {
    fn default() -> Self {
        Self {
            sigma_color: DEFAULT_SIGMA_COLOR,
            sigma_space: DEFAULT_SIGMA_SPACE,
            clamp: ClampPolicy::CenterMultiple(DEFAULT_CLAMP_MULTIPLE),
        }
    }
}

/// Apply the fixed-window filter with default clamping.
///
/// # Arguments
/// * `src` - Single-channel depth grid
/// * `sigma_color` - Range bandwidth in depth units
/// * `sigma_space` - Spatial bandwidth in pixels
///
/// # Returns
/// New grid of the same size
///
/// # Errors
/// `FilterError::UnsupportedChannels` if `src` is not single-channel.
pub fn fixed_window_bilateral(
    src: &DepthGrid,
    sigma_color: f32,
    sigma_space: f32,
) -> FilterResult<DepthGrid> {
    let params = FixedWindowParams {
        sigma_color,
        sigma_space,
        ..FixedWindowParams::default()
    };
    fixed_window_bilateral_with(src, &params)
}

/// Apply the fixed-window filter with explicit options.
pub fn fixed_window_bilateral_with(
    src: &DepthGrid,
    params: &FixedWindowParams,
) -> FilterResult<DepthGrid> {
    check_single_channel(src)?;
    let mut dst = src.create_template();
    fixed_window_bilateral_into(src, &mut dst, params)?;
    Ok(dst)
}

/// Apply the fixed-window filter, writing into `dst`.
///
/// Every pixel of `dst` is overwritten.
///
/// # Errors
/// `FilterError::UnsupportedChannels` if either grid is not single-channel,
/// `FilterError::DimensionMismatch` if the sizes differ.
pub fn fixed_window_bilateral_into(
    src: &DepthGrid,
    dst: &mut DepthGrid,
    params: &FixedWindowParams,
) -> FilterResult<()> {
    check_src_dst(src, dst)?;

    let sigma_space = effective_sigma(params.sigma_space);
    let sigma_color = effective_sigma(params.sigma_color);
    let space2_inv_half = 0.5 / (sigma_space * sigma_space);
    let color2_inv_half = 0.5 / (sigma_color * sigma_color);
    let clamp = params.clamp;

    let (w, h) = src.dimensions();
    log::debug!(
        "fixed_window_bilateral: {w}x{h}, radius {FIXED_WINDOW_RADIUS}, \
         sigma_color {sigma_color}, sigma_space {sigma_space}, clamp {clamp:?}"
    );

    let r = FIXED_WINDOW_RADIUS;
    dst.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as u32;
            let y0 = y.saturating_sub(r);
            let y1 = (y + r).min(h - 1);

            for (x, out) in (0..w).zip(out_row.iter_mut()) {
                let value = src.get_pixel_unchecked(x, y);
                if !is_valid_depth(value) {
                    *out = 0.0;
                    continue;
                }

                let x0 = x.saturating_sub(r);
                let x1 = (x + r).min(w - 1);

                let mut sum = 0.0f32;
                let mut wsum = 0.0f32;
                for cy in y0..=y1 {
                    let row = src.row(cy);
                    let dy = cy as f32 - y as f32;
                    for cx in x0..=x1 {
                        let neighbor = row[cx as usize];
                        if !is_valid_depth(neighbor) {
                            continue;
                        }
                        let dx = cx as f32 - x as f32;
                        let space2 = dx * dx + dy * dy;
                        let color2 = (value - neighbor) * (value - neighbor);
                        let weight =
                            (-(space2 * space2_inv_half + color2 * color2_inv_half)).exp();
                        sum += neighbor * weight;
                        wsum += weight;
                    }
                }

                *out = clamp.apply(weighted_mean(sum, wsum), value);
            }
        });

    log::trace!("fixed_window_bilateral: sweep of {h} rows done");
    Ok(())
}
