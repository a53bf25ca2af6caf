//! Range-weight lookup table
//!
//! Evaluating `exp(-Δ²/(2·sigma_color²))` for every neighbor is the
//! dominant cost of a bilateral filter. [`RangeLut`] samples the Gaussian
//! at [`RANGE_LUT_BINS`] points over the observed value range and
//! interpolates linearly between adjacent entries.
//!
//! The table is monotonically non-increasing: once an entry underflows to
//! zero, every later entry is zero too.

/// Table resolution over the value range of a single-channel grid
pub const RANGE_LUT_BINS: usize = 1 << 12;

/// Interpolated Gaussian range kernel over `[0, value_range]`
#[derive(Debug, Clone)]
pub struct RangeLut {
    /// `bins + 2` entries; the extra two cover Δ == value_range and the
    /// interpolation partner of the last bin
    table: Vec<f32>,
    /// Index units per depth unit
    scale: f32,
}

impl RangeLut {
    /// Build the table for differences up to `value_range` (global max
    /// minus global min of the input).
    ///
    /// A zero, negative or non-finite range is replaced by 1 so the scale
    /// stays finite. The caller guarantees `sigma_color > 0`.
    pub fn new(sigma_color: f32, value_range: f32) -> Self {
        let range = if value_range.is_finite() && value_range > f32::EPSILON {
            value_range
        } else {
            1.0
        };

        let bins = RANGE_LUT_BINS;
        let scale = bins as f32 / range;

        let gauss_color_coeff = -0.5 / (sigma_color as f64 * sigma_color as f64);
        let mut table = Vec::with_capacity(bins + 2);
        let mut last = 1.0f32;
        for i in 0..bins + 2 {
            let weight = if last > 0.0 {
                let val = i as f64 / scale as f64;
                (val * val * gauss_color_coeff).exp() as f32
            } else {
                0.0
            };
            table.push(weight);
            last = weight;
        }

        RangeLut { table, scale }
    }

    /// Interpolated weight for an absolute difference `delta >= 0`.
    ///
    /// Differences past the end of the table, including infinite ones,
    /// get the last entry.
    #[inline]
    pub fn weight(&self, delta: f32) -> f32 {
        let last = self.table.len() - 1;
        let alpha = delta * self.scale;
        if alpha >= last as f32 {
            return self.table[last];
        }
        // alpha < last, so idx + 1 stays in bounds
        let idx = alpha as usize;
        let frac = alpha - idx as f32;
        let lo = self.table[idx];
        lo + frac * (self.table[idx + 1] - lo)
    }

    /// Index units per depth unit
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of table entries
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`: the table holds at least the guard entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw table entries
    pub fn entries(&self) -> &[f32] {
        &self.table
    }
}
