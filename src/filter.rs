// Generic linear difference-equation (IIR) filter
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use alloc::vec;
use alloc::vec::Vec;

use num_traits::Float;

/// Errors raised while constructing or driving an [`IirFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum FilterError {
    /// The numerator coefficient vector `b` was empty.
    #[cfg_attr(feature = "std", error("numerator must have at least one coefficient"))]
    EmptyNumerator,

    /// The denominator coefficient vector `a` was empty.
    #[cfg_attr(
        feature = "std",
        error("denominator must have at least one coefficient")
    )]
    EmptyDenominator,

    /// `a[0]` was not exactly one.
    #[cfg_attr(feature = "std", error("denominator must be normalized so that a[0] == 1"))]
    NonNormalizedDenominator,

    /// `a[0]` was zero, so the coefficients cannot be normalized.
    #[cfg_attr(feature = "std", error("leading denominator coefficient must be non-zero"))]
    ZeroLeadingDenominator,

    /// A coefficient or history value was NaN or infinite.
    #[cfg_attr(feature = "std", error("coefficients and history must be finite"))]
    NonFiniteCoefficient,

    /// The supplied input or output history did not match the filter order.
    #[cfg_attr(
        feature = "std",
        error("history lengths must match the numerator and denominator orders")
    )]
    HistoryLengthMismatch,

    /// A sample fed to the filter was NaN or infinite.
    #[cfg_attr(feature = "std", error("input sample must be finite"))]
    NonFiniteSample,
}

/// A filter evaluating the linear difference equation
///
/// ```text
/// y[n] = b[0] x[n] + ... + b[M-1] x[n-M+1] - a[1] y[n-1] - ... - a[K] y[n-K]
/// ```
///
/// with `a[0] == 1`. Low-pass, high-pass, band-pass and Butterworth sections all reduce to this
/// form; see [`crate::design`] for coefficient recipes.
///
/// Histories are stored newest first. `y_hist[0]` is the latest output; `x_hist[0]` is the slot the
/// next input is written into, so `x_hist[1]` holds the latest input between steps.
///
/// ```rust
/// use daq_kernels::filter::IirFilter;
///
/// let mut lpf = IirFilter::new(vec![0.1_f64], vec![1.0, -0.9]).unwrap();
/// let y = lpf.step(1.0);
/// assert!((y - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IirFilter<F: Float> {
    b: Vec<F>,
    a: Vec<F>,
    x_hist: Vec<F>,
    y_hist: Vec<F>,
    output: F,
}

fn all_finite<F: Float>(values: &[F]) -> bool {
    values.iter().all(|v| v.is_finite())
}

impl<F: Float> IirFilter<F> {
    /// Creates a filter from normalized coefficients, starting from zero history.
    ///
    /// # Errors
    /// - [`FilterError::EmptyNumerator`] / [`FilterError::EmptyDenominator`] if either vector is
    ///   empty.
    /// - [`FilterError::NonNormalizedDenominator`] if `a[0] != 1`.
    /// - [`FilterError::NonFiniteCoefficient`] if any coefficient is not finite.
    pub fn new(b: Vec<F>, a: Vec<F>) -> Result<Self, FilterError> {
        Self::validate(&b, &a)?;
        let x_hist = vec![F::zero(); b.len()];
        let y_hist = vec![F::zero(); a.len() - 1];
        Ok(Self {
            b,
            a,
            x_hist,
            y_hist,
            output: F::zero(),
        })
    }

    /// Creates a filter from arbitrary coefficients, dividing all of them by `a[0]` first.
    pub fn normalized(mut b: Vec<F>, mut a: Vec<F>) -> Result<Self, FilterError> {
        let a0 = *a.first().ok_or(FilterError::EmptyDenominator)?;
        if a0 == F::zero() {
            return Err(FilterError::ZeroLeadingDenominator);
        }
        b.iter_mut().for_each(|c| *c = *c / a0);
        a.iter_mut().for_each(|c| *c = *c / a0);
        // Exact, regardless of rounding in a0 / a0
        a[0] = F::one();
        Self::new(b, a)
    }

    /// Creates a filter with caller-chosen initial history.
    ///
    /// `x_hist` holds the previous `M - 1` inputs and `y_hist` the previous `K` outputs, both
    /// newest first: `x_hist[0]` is `x[n-1]` and `y_hist[0]` is `y[n-1]`.
    ///
    /// ```rust
    /// use daq_kernels::filter::IirFilter;
    ///
    /// // Two-tap moving average that has already seen a 2.0
    /// let mut avg = IirFilter::<f64>::with_history(vec![0.5, 0.5], vec![1.0], vec![2.0], vec![])
    ///     .unwrap();
    /// assert_eq!(avg.step(2.0), 2.0);
    /// ```
    pub fn with_history(
        b: Vec<F>,
        a: Vec<F>,
        x_hist: Vec<F>,
        y_hist: Vec<F>,
    ) -> Result<Self, FilterError> {
        let mut filter = Self::new(b, a)?;
        if x_hist.len() + 1 != filter.x_hist.len() || y_hist.len() != filter.y_hist.len() {
            return Err(FilterError::HistoryLengthMismatch);
        }
        if !all_finite(&x_hist) || !all_finite(&y_hist) {
            return Err(FilterError::NonFiniteCoefficient);
        }
        // Slot 0 is reserved for the incoming sample
        filter.x_hist[1..].copy_from_slice(&x_hist);
        filter.output = y_hist.first().copied().unwrap_or_else(F::zero);
        filter.y_hist = y_hist;
        Ok(filter)
    }

    /// Creates a filter whose input history is filled with `x0` and output history with `y0`.
    ///
    /// Seeding a low-pass filter with `x0 == y0 == first_sample` starts it in steady state and
    /// avoids the initial transient from zero.
    pub fn seeded(b: Vec<F>, a: Vec<F>, x0: F, y0: F) -> Result<Self, FilterError> {
        let mut filter = Self::new(b, a)?;
        if !x0.is_finite() || !y0.is_finite() {
            return Err(FilterError::NonFiniteCoefficient);
        }
        filter.fill(x0, y0);
        Ok(filter)
    }

    fn validate(b: &[F], a: &[F]) -> Result<(), FilterError> {
        if b.is_empty() {
            return Err(FilterError::EmptyNumerator);
        }
        if a.is_empty() {
            return Err(FilterError::EmptyDenominator);
        }
        if !all_finite(b) || !all_finite(a) {
            return Err(FilterError::NonFiniteCoefficient);
        }
        if a[0] != F::one() {
            return Err(FilterError::NonNormalizedDenominator);
        }
        Ok(())
    }

    fn fill(&mut self, x0: F, y0: F) {
        self.x_hist.iter_mut().for_each(|x| *x = x0);
        self.y_hist.iter_mut().for_each(|y| *y = y0);
        self.output = y0;
    }

    /// Filters one sample and returns the new output.
    ///
    /// A non-finite sample is rejected: the filter state is left untouched and the previous output
    /// is returned.
    pub fn step(&mut self, x0: F) -> F {
        self.try_step(x0).unwrap_or(self.output)
    }

    /// Filters one sample, reporting a non-finite sample instead of holding the last output.
    ///
    /// # Errors
    /// [`FilterError::NonFiniteSample`] if `x0` is NaN or infinite. The state is not modified.
    pub fn try_step(&mut self, x0: F) -> Result<F, FilterError> {
        if !x0.is_finite() {
            return Err(FilterError::NonFiniteSample);
        }

        self.x_hist[0] = x0;

        let feedforward = self
            .b
            .iter()
            .zip(&self.x_hist)
            .fold(F::zero(), |acc, (&b, &x)| acc + b * x);
        let feedback = self.a[1..]
            .iter()
            .zip(&self.y_hist)
            .fold(F::zero(), |acc, (&a, &y)| acc + a * y);
        let y0 = feedforward - feedback;

        // Drop the oldest entries; slot 0 is overwritten by the next sample
        self.x_hist.rotate_right(1);
        if !self.y_hist.is_empty() {
            self.y_hist.rotate_right(1);
            self.y_hist[0] = y0;
        }

        self.output = y0;
        Ok(y0)
    }

    /// Filters a whole block of samples, returning one output per input.
    pub fn filter(&mut self, samples: &[F]) -> Vec<F> {
        samples.iter().map(|&x| self.step(x)).collect()
    }

    /// Returns the most recent output, or the seeded output if no sample was filtered yet.
    pub fn output(&self) -> F {
        self.output
    }

    /// Returns the numerator coefficients `b`.
    pub fn numerator(&self) -> &[F] {
        &self.b
    }

    /// Returns the normalized denominator coefficients `a`, with `a[0] == 1`.
    pub fn denominator(&self) -> &[F] {
        &self.a
    }

    /// Returns the filter order, the larger of `M - 1` and `K`.
    pub fn order(&self) -> usize {
        (self.b.len() - 1).max(self.a.len() - 1)
    }

    /// Clears the input and output history to zero.
    pub fn reset(&mut self) {
        self.fill(F::zero(), F::zero());
    }

    /// Re-seeds the history as in [`seeded`](Self::seeded). Non-finite seeds are replaced by zero.
    pub fn reset_to(&mut self, x0: F, y0: F) {
        let finite_or_zero = |v: F| if v.is_finite() { v } else { F::zero() };
        self.fill(finite_or_zero(x0), finite_or_zero(y0));
    }
}
