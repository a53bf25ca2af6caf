//! Spatial kernel tables
//!
//! A [`SpatialKernel`] lists every offset inside a circular support of a
//! given radius together with its Gaussian distance weight. The table is
//! built once per filter call and then only read, so it can be shared by
//! all worker threads of the row sweep.

use crate::{FilterError, FilterResult};

/// Largest supported kernel radius (a 2049×2049 bounding square)
pub const MAX_KERNEL_RADIUS: u32 = 1024;

/// One entry of a spatial kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelTap {
    /// Row offset from the center
    pub dy: i32,
    /// Column offset from the center
    pub dx: i32,
    /// exp(-(dx² + dy²) / (2·sigma_space²))
    pub weight: f32,
}

/// Precomputed circular Gaussian support
#[derive(Debug, Clone)]
pub struct SpatialKernel {
    radius: u32,
    taps: Vec<KernelTap>,
}

impl SpatialKernel {
    /// Build the table for all offsets with Euclidean distance ≤ `radius`.
    ///
    /// Taps are ordered row by row, top-left first. The caller guarantees
    /// `sigma_space > 0`.
    ///
    /// # Errors
    /// `FilterError::InvalidParameters` if `radius` exceeds
    /// [`MAX_KERNEL_RADIUS`].
    pub fn circular(radius: u32, sigma_space: f32) -> FilterResult<Self> {
        if radius > MAX_KERNEL_RADIUS {
            return Err(FilterError::InvalidParameters(format!(
                "kernel radius {radius} exceeds maximum {MAX_KERNEL_RADIUS}"
            )));
        }
        let r = radius as i32;
        let gauss_space_coeff = -0.5 / (sigma_space as f64 * sigma_space as f64);

        let side = 2 * radius as usize + 1;
        let capacity = side.checked_mul(side).ok_or_else(|| {
            FilterError::InvalidParameters(format!("kernel radius {radius} too large"))
        })?;
        let mut taps = Vec::with_capacity(capacity);
        for dy in -r..=r {
            for dx in -r..=r {
                let dist = ((dy * dy + dx * dx) as f64).sqrt();
                if dist > radius as f64 {
                    continue;
                }
                taps.push(KernelTap {
                    dy,
                    dx,
                    weight: (dist * dist * gauss_space_coeff).exp() as f32,
                });
            }
        }

        Ok(SpatialKernel { radius, taps })
    }

    /// Kernel radius in pixels
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Kernel diameter (`2 * radius + 1`)
    #[inline]
    pub fn diameter(&self) -> u32 {
        2 * self.radius + 1
    }

    /// All taps of the kernel
    #[inline]
    pub fn taps(&self) -> &[KernelTap] {
        &self.taps
    }

    /// Number of taps
    #[inline]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always `false`: the center tap is part of every kernel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Linear sample offsets for a row-major buffer with `stride` samples
    /// per row, in tap order.
    pub fn offsets(&self, stride: usize) -> Vec<isize> {
        self.taps
            .iter()
            .map(|t| t.dy as isize * stride as isize + t.dx as isize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_support() {
        let kernel = SpatialKernel::circular(2, 1.0).unwrap();
        // 5x5 square minus the 4 corners (distance sqrt(8) > 2) and the
        // 8 cells at distance sqrt(5) > 2
        assert_eq!(kernel.len(), 13);
        assert_eq!(kernel.diameter(), 5);
        assert!(kernel.taps().iter().all(|t| t.dx * t.dx + t.dy * t.dy <= 4));
    }

    #[test]
    fn test_center_weight_is_one() {
        let kernel = SpatialKernel::circular(3, 2.0).unwrap();
        let center = kernel
            .taps()
            .iter()
            .find(|t| t.dx == 0 && t.dy == 0)
            .unwrap();
        assert_eq!(center.weight, 1.0);
    }

    #[test]
    fn test_weights_decrease_with_distance() {
        let kernel = SpatialKernel::circular(4, 1.5).unwrap();
        let w = |dx: i32, dy: i32| {
            kernel
                .taps()
                .iter()
                .find(|t| t.dx == dx && t.dy == dy)
                .unwrap()
                .weight
        };
        assert!(w(1, 0) > w(2, 0));
        assert!(w(2, 0) > w(3, 0));
        assert_eq!(w(0, 2), w(2, 0));
        let expected = (-4.0f64 / (2.0 * 1.5 * 1.5)).exp() as f32;
        assert!((w(2, 0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_offsets() {
        let kernel = SpatialKernel::circular(1, 1.0).unwrap();
        // Radius 1: the plus-shaped 5-tap support
        assert_eq!(kernel.offsets(10), vec![-10, -1, 0, 1, 10]);
    }

    #[test]
    fn test_radius_limit() {
        let kernel = SpatialKernel::circular(MAX_KERNEL_RADIUS, 10.0).unwrap();
        assert_eq!(kernel.diameter(), 2 * MAX_KERNEL_RADIUS + 1);

        for radius in [MAX_KERNEL_RADIUS + 1, 23_171, u32::MAX] {
            assert!(matches!(
                SpatialKernel::circular(radius, 1.0),
                Err(FilterError::InvalidParameters(_))
            ));
        }
    }
}
