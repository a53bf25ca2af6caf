//! Border extension for depth grids
//!
//! Filters that walk a fixed set of kernel offsets pad their source once
//! so the inner loop never needs bounds checks. The padding content is
//! chosen by [`BorderMode`]:
//!
//! ```text
//! Replicate:   aaaaaa|abcdefgh|hhhhhhh
//! Reflect:     fedcba|abcdefgh|hgfedcb
//! Reflect101:  gfedcb|abcdefgh|gfedcba
//! Constant:    000000|abcdefgh|0000000
//! ```
//!
//! Constant padding writes zeros, which the bilateral filters treat as
//! invalid samples.

use super::DepthGrid;
use crate::error::{Error, Result};

/// How samples outside the grid are synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BorderMode {
    /// Repeat the outermost sample
    #[default]
    Replicate,
    /// Mirror including the edge sample
    Reflect,
    /// Mirror excluding the edge sample
    Reflect101,
    /// Zero (invalid) samples
    Constant,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate onto `0..len`.
    ///
    /// Returns `None` for [`BorderMode::Constant`] when `p` lies outside
    /// the grid. Offsets larger than the grid itself wrap through repeated
    /// reflections.
    pub fn map_index(self, p: i64, len: usize) -> Option<usize> {
        let n = len as i64;
        if (0..n).contains(&p) {
            return Some(p as usize);
        }
        if n == 0 {
            return None;
        }

        let mapped = match self {
            BorderMode::Replicate => p.clamp(0, n - 1),
            BorderMode::Reflect => {
                let period = 2 * n;
                let m = p.rem_euclid(period);
                if m < n { m } else { period - 1 - m }
            }
            BorderMode::Reflect101 => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let m = p.rem_euclid(period);
                    if m < n { m } else { period - m }
                }
            }
            BorderMode::Constant => return None,
        };
        Some(mapped as usize)
    }
}

impl DepthGrid {
    /// Add a uniform border of `npix` pixels on all four sides.
    ///
    /// # Returns
    ///
    /// New grid with dimensions `(width + 2*npix, height + 2*npix)` whose
    /// interior is an exact copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the padded dimensions overflow.
    pub fn add_border(&self, npix: u32, mode: BorderMode) -> Result<DepthGrid> {
        if npix == 0 {
            return Ok(self.clone());
        }

        let overflow = || Error::InvalidParameter(format!("border of {npix} pixels overflows"));
        let extra = npix.checked_mul(2).ok_or_else(overflow)?;
        let out_w = self.width().checked_add(extra).ok_or_else(overflow)?;
        let out_h = self.height().checked_add(extra).ok_or_else(overflow)?;

        let cn = self.channels() as usize;
        let w = self.width() as usize;
        let h = self.height() as usize;
        let pad = npix as i64;

        // Column lookup is shared by every row.
        let col_map: Vec<Option<usize>> = (0..out_w as i64)
            .map(|ox| mode.map_index(ox - pad, w))
            .collect();

        let mut data = vec![0.0f32; (out_w as usize) * (out_h as usize) * cn];
        for (oy, out_row) in data.chunks_exact_mut(out_w as usize * cn).enumerate() {
            let Some(sy) = mode.map_index(oy as i64 - pad, h) else {
                continue;
            };
            let src_row = self.row(sy as u32);
            for (out_px, sx) in out_row.chunks_exact_mut(cn).zip(&col_map) {
                if let Some(sx) = *sx {
                    out_px.copy_from_slice(&src_row[sx * cn..(sx + 1) * cn]);
                }
            }
        }

        DepthGrid::from_interleaved(out_w, out_h, self.channels(), data)
    }
}
