//! Regression test parameters and operations

use depthfilt_core::DepthGrid;

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the index of the
/// current check, and every failure seen so far. Checks never panic; call
/// [`RegParams::cleanup`] at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "fixed_window")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters and install the test logger.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never compares equal
        if diff.is_nan() || diff > delta {
            self.fail(format!(
                "value comparison: difference = {diff} but allowed delta = {delta}\n\
                 expected = {expected}, actual = {actual}"
            ));
            return false;
        }
        true
    }

    /// Check a boolean condition
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!("check failed: {what}"));
        }
        condition
    }

    /// Compare two grids sample by sample
    ///
    /// Dimensions and channel counts must match exactly; samples must agree
    /// within `delta`.
    ///
    /// # Returns
    ///
    /// `true` if the grids match, `false` otherwise.
    pub fn compare_grids(&mut self, expected: &DepthGrid, actual: &DepthGrid, delta: f32) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() || expected.channels() != actual.channels()
        {
            self.fail(format!(
                "grid comparison - dimension mismatch: {:?}x{} vs {:?}x{}",
                expected.dimensions(),
                expected.channels(),
                actual.dimensions(),
                actual.channels()
            ));
            return false;
        }

        let row_len = expected.row_len();
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(&e, &a)| !((e - a).abs() <= delta));
        if let Some(i) = mismatch {
            self.fail(format!(
                "grid comparison - sample mismatch at ({}, {}): expected {}, actual {}",
                i % row_len,
                i / row_len,
                expected.data()[i],
                actual.data()[i]
            ));
            return false;
        }
        true
    }

    fn fail(&mut self, detail: String) {
        let msg = format!(
            "Failure in {}_reg: index {}: {}",
            self.test_name, self.index, detail
        );
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
