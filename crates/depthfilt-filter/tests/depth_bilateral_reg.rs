//! Parametric depth bilateral filter regression test
//!
//! Exercises the table-driven filter on synthetic depth grids:
//!   (1) range-gate exclusion against an explicitly invalidated ring
//!   (2) border modes on a ramp
//!   (3) explicit diameter vs derived radius
//!   (4) precondition errors
//!   (5) depth spans wider than the f32 range
//!   (6) oversized kernels

use depthfilt_core::{BorderMode, DepthGrid};
use depthfilt_filter::{
    DepthBilateralParams, FilterError, MAX_KERNEL_RADIUS, depth_bilateral, depth_bilateral_into,
};
use depthfilt_test::{RegParams, invalidate_level, noisy_grid, two_level_grid};

fn gated(sigma_color: f32, sigma_space: f32, fraction: f32) -> DepthBilateralParams {
    DepthBilateralParams {
        sigma_color,
        sigma_space,
        max_delta_depth_fraction: fraction,
        ..Default::default()
    }
}

/// Center disk at 1.0 inside a 1.6 surround: with fraction 0.1 the
/// surround must not contribute to any center pixel.
#[test]
fn depth_bilateral_reg_range_gate() {
    let mut rp = RegParams::new("depth_bilateral_gate");

    let grid = two_level_grid(21, 4.0, 1.0, 1.6);
    let holes = invalidate_level(&grid, 1.6);
    // Wide range bandwidth: only the gate can keep the levels apart
    let params = gated(5.0, 3.0, 0.1);

    let with_ring = depth_bilateral(&grid, &params).unwrap();
    let without_ring = depth_bilateral(&holes, &params).unwrap();

    let mut checked = 0;
    for y in 0..21 {
        for x in 0..21 {
            if grid.get_pixel_unchecked(x, y) != 1.0 {
                continue;
            }
            rp.compare_values(
                without_ring.get_pixel_unchecked(x, y) as f64,
                with_ring.get_pixel_unchecked(x, y) as f64,
                1e-5,
            );
            checked += 1;
        }
    }
    eprintln!("  compared {checked} center pixels");
    rp.check(checked > 40, "center disk has enough pixels");

    // Surround pixels are gated against the disk as well
    rp.compare_values(1.6, with_ring.get_pixel_unchecked(0, 0) as f64, 1e-5);
    rp.compare_values(1.6, with_ring.get_pixel_unchecked(10, 5) as f64, 1e-5);

    // Opening the gate lets the surround pull the disk edge up
    let open = depth_bilateral(&grid, &gated(5.0, 3.0, 1.0)).unwrap();
    rp.check(
        open.get_pixel_unchecked(10, 7) > 1.05,
        "open gate mixes the two levels",
    );

    assert!(rp.cleanup(), "depth_bilateral_gate regression test failed");
}

/// A horizontal ramp is symmetric under every border mode except
/// constant padding, which only removes contributions.
#[test]
fn depth_bilateral_reg_border_modes() {
    let mut rp = RegParams::new("depth_bilateral_border");

    let data: Vec<f32> = (0..20 * 10).map(|i| 1.0 + (i % 20) as f32 * 0.01).collect();
    let ramp = DepthGrid::from_data(20, 10, data).unwrap();

    for mode in [
        BorderMode::Replicate,
        BorderMode::Reflect,
        BorderMode::Reflect101,
        BorderMode::Constant,
    ] {
        let params = DepthBilateralParams {
            border_mode: mode,
            ..gated(1.0, 2.0, 0.5)
        };
        let result = depth_bilateral(&ramp, &params).unwrap();
        rp.compare_values(20.0, result.width() as f64, 0.0);
        rp.compare_values(10.0, result.height() as f64, 0.0);

        // Interior columns of a linear ramp are fixed points of a
        // symmetric kernel with near-flat range weights
        let interior = result.get_pixel_unchecked(10, 5);
        rp.compare_values(1.10, interior as f64, 1e-3);

        // Every output stays inside the input range
        let (lo, hi) = result.valid_min_max().unwrap();
        rp.check(lo >= 1.0 - 1e-5 && hi <= 1.19 + 1e-5, "output within input range");
        eprintln!("  {mode:?}: left edge = {}", result.get_pixel_unchecked(0, 5));
    }

    // Replicate pads with the edge value, so the left edge is pulled up
    // less than with constant padding, which keeps only interior samples
    let rep = depth_bilateral(
        &ramp,
        &DepthBilateralParams {
            border_mode: BorderMode::Replicate,
            ..gated(1.0, 2.0, 0.5)
        },
    )
    .unwrap();
    let con = depth_bilateral(
        &ramp,
        &DepthBilateralParams {
            border_mode: BorderMode::Constant,
            ..gated(1.0, 2.0, 0.5)
        },
    )
    .unwrap();
    rp.check(
        rep.get_pixel_unchecked(0, 5) < con.get_pixel_unchecked(0, 5),
        "replicate vs constant at left edge",
    );

    assert!(rp.cleanup(), "depth_bilateral_border regression test failed");
}

#[test]
fn depth_bilateral_reg_diameter() {
    let mut rp = RegParams::new("depth_bilateral_diameter");

    let grid = noisy_grid(32, 32, 1.5, 0.02, 11);

    // sigma_space 2 derives radius 3 == diameter 7
    let derived = depth_bilateral(&grid, &gated(0.1, 2.0, 0.2)).unwrap();
    let explicit = depth_bilateral(
        &grid,
        &DepthBilateralParams {
            diameter: Some(7),
            ..gated(0.1, 2.0, 0.2)
        },
    )
    .unwrap();
    rp.compare_grids(&derived, &explicit, 0.0);

    // An even diameter keeps d / 2 as the radius
    let even = depth_bilateral(
        &grid,
        &DepthBilateralParams {
            diameter: Some(6),
            ..gated(0.1, 2.0, 0.2)
        },
    )
    .unwrap();
    rp.compare_grids(&derived, &even, 0.0);

    assert!(rp.cleanup(), "depth_bilateral_diameter regression test failed");
}

#[test]
fn depth_bilateral_reg_preconditions() {
    let grid = DepthGrid::new_with_value(8, 8, 1.0).unwrap();

    let mut small = DepthGrid::new(8, 7).unwrap();
    let err = depth_bilateral_into(&grid, &mut small, &DepthBilateralParams::default());
    assert!(matches!(err, Err(FilterError::DimensionMismatch { .. })));

    let rgb = DepthGrid::from_interleaved(8, 8, 3, vec![1.0; 192]).unwrap();
    let err = depth_bilateral(&rgb, &DepthBilateralParams::default());
    assert!(matches!(
        err,
        Err(FilterError::UnsupportedChannels { expected: 1, actual: 3 })
    ));

    let err = depth_bilateral(&grid, &gated(1.0, 1.0, 0.0));
    assert!(matches!(err, Err(FilterError::InvalidParameters(_))));

    // Valid destination is fully overwritten
    let mut dst = DepthGrid::new_with_value(8, 8, 99.0).unwrap();
    depth_bilateral_into(&grid, &mut dst, &DepthBilateralParams::default()).unwrap();
    assert!(dst.data().iter().all(|&v| (v - 1.0).abs() < 1e-5));
}

/// A large negative sentinel next to large valid depths makes max - min
/// overflow to infinity; the far neighbor then falls past the end of the
/// range table and gets its last (zero) weight.
#[test]
fn depth_bilateral_reg_extreme_span() {
    let mut rp = RegParams::new("depth_bilateral_extreme_span");

    let grid = DepthGrid::from_data(3, 1, vec![-3e38, 1e38, 6e37]).unwrap();
    rp.check(
        grid.min_max().is_some_and(|(lo, hi)| !(hi - lo).is_finite()),
        "value range overflows",
    );

    // Radius 1, gate fully open
    let result = depth_bilateral(&grid, &gated(0.05, 0.5, 1.0)).unwrap();
    rp.compare_values(0.0, result.get_pixel_unchecked(0, 0) as f64, 0.0);
    rp.compare_values(1.0, result.get_pixel_unchecked(1, 0) as f64 / 1e38, 1e-5);
    rp.compare_values(1.0, result.get_pixel_unchecked(2, 0) as f64 / 6e37, 1e-5);
    rp.check(result.data().iter().all(|v| v.is_finite()), "output finite");

    assert!(rp.cleanup(), "depth_bilateral_extreme_span regression test failed");
}

#[test]
fn depth_bilateral_reg_oversized_kernel() {
    let grid = DepthGrid::new_with_value(8, 8, 1.0).unwrap();

    for params in [
        DepthBilateralParams {
            diameter: Some(u32::MAX),
            ..Default::default()
        },
        DepthBilateralParams {
            diameter: Some(2 * MAX_KERNEL_RADIUS + 2),
            ..Default::default()
        },
        DepthBilateralParams {
            sigma_space: 1e9,
            ..Default::default()
        },
    ] {
        let err = depth_bilateral(&grid, &params);
        assert!(matches!(err, Err(FilterError::InvalidParameters(_))), "{params:?}");

        // Rejected before anything is written
        let mut dst = DepthGrid::new_with_value(8, 8, 7.0).unwrap();
        assert!(depth_bilateral_into(&grid, &mut dst, &params).is_err());
        assert!(dst.data().iter().all(|&v| v == 7.0));
    }

    // The largest accepted radius still filters a small grid
    let params = DepthBilateralParams {
        diameter: Some(2 * MAX_KERNEL_RADIUS + 1),
        ..Default::default()
    };
    let result = depth_bilateral(&grid, &params).unwrap();
    assert!(result.data().iter().all(|&v| (v - 1.0).abs() < 1e-5));
}
