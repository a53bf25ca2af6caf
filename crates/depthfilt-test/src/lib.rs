//! depthfilt-test - Regression test support for depthfilt
//!
//! Provides [`RegParams`], a small regression-check accumulator, and a set
//! of synthetic depth grids that stand in for camera frames in tests and
//! benchmarks.
//!
//! # Usage
//!
//! ```ignore
//! use depthfilt_test::{RegParams, step_edge_grid};
//!
//! let mut rp = RegParams::new("edge");
//! let grid = step_edge_grid(32, 16, 1.0, 3.0);
//! rp.compare_values(1.0, grid.get_pixel(0, 0)? as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter for the test logger (e.g. `depthfilt_filter=debug`)

mod params;

pub use params::RegParams;

use depthfilt_core::DepthGrid;

/// Install `env_logger` in test mode. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Uniform grid where every pixel holds `depth`
pub fn uniform_grid(width: u32, height: u32, depth: f32) -> DepthGrid {
    DepthGrid::new_with_value(width, height, depth).expect("non-zero test dimensions")
}

/// Step edge: left half at `left`, right half (x >= width/2) at `right`
pub fn step_edge_grid(width: u32, height: u32, left: f32, right: f32) -> DepthGrid {
    let mut grid = uniform_grid(width, height, left);
    for y in 0..height {
        for x in width / 2..width {
            grid.set_pixel_unchecked(x, y, right);
        }
    }
    grid
}

/// Two-level grid: a disk of radius `inner_radius` around the center at
/// `inner`, everything else at `outer`
pub fn two_level_grid(size: u32, inner_radius: f32, inner: f32, outer: f32) -> DepthGrid {
    let mut grid = uniform_grid(size, size, outer);
    let c = (size / 2) as f32;
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as f32 - c, y as f32 - c);
            if (dx * dx + dy * dy).sqrt() <= inner_radius {
                grid.set_pixel_unchecked(x, y, inner);
            }
        }
    }
    grid
}

/// Copy of `grid` with every sample equal to `level` replaced by 0
pub fn invalidate_level(grid: &DepthGrid, level: f32) -> DepthGrid {
    let mut out = grid.clone();
    for v in out.data_mut() {
        if *v == level {
            *v = 0.0;
        }
    }
    out
}

/// Plane at `depth` with deterministic uniform noise of `amplitude`
/// (samples lie in `depth ± amplitude`)
pub fn noisy_grid(width: u32, height: u32, depth: f32, amplitude: f32, seed: u64) -> DepthGrid {
    let mut rng = Lcg::new(seed);
    let mut grid = uniform_grid(width, height, depth);
    for v in grid.data_mut() {
        *v += amplitude * (2.0 * rng.next_f32() - 1.0);
    }
    grid
}

/// Mean squared difference between horizontally and vertically adjacent
/// valid samples of a single-channel grid
pub fn neighbor_variance(grid: &DepthGrid) -> f64 {
    let (w, h) = grid.dimensions();
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..h {
        for x in 0..w {
            let v = grid.get_pixel_unchecked(x, y);
            if !depthfilt_core::is_valid_depth(v) {
                continue;
            }
            let right = (x + 1 < w).then(|| grid.get_pixel_unchecked(x + 1, y));
            let down = (y + 1 < h).then(|| grid.get_pixel_unchecked(x, y + 1));
            for u in [right, down].into_iter().flatten() {
                if depthfilt_core::is_valid_depth(u) {
                    let d = (v - u) as f64;
                    sum += d * d;
                    count += 1;
                }
            }
        }
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Linear congruential generator for reproducible noise
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform in [0, 1) from the high 24 bits
    fn next_f32(&mut self) -> f32 {
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }
}
