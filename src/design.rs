// Coefficient recipes for first-order digital filters
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
use core::time::Duration;

use num_traits::{Float, FloatConst};

use crate::filter::{FilterError, IirFilter};
use crate::pid::period_secs;

/// Errors raised by the coefficient recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DesignError {
    /// A filter time constant was not strictly positive and finite.
    #[cfg_attr(feature = "std", error("time constant must be positive and finite"))]
    InvalidTimeConstant,

    /// The sampling period was zero or not representable.
    #[cfg_attr(feature = "std", error("sample time must be strictly positive"))]
    InvalidSampleTime,

    /// A cutoff frequency was not positive, or not below the Nyquist frequency.
    #[cfg_attr(
        feature = "std",
        error("cutoff frequency must be positive and below the Nyquist frequency")
    )]
    InvalidCutoff,
}

/// Numerator and normalized denominator coefficients of a digital filter.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCoefficients<F: Float> {
    /// Numerator coefficients, `b[0]` multiplies the newest input.
    pub b: Vec<F>,
    /// Denominator coefficients, `a[0] == 1`.
    pub a: Vec<F>,
}

impl<F: Float> FilterCoefficients<F> {
    /// Builds a filter with zero initial history.
    pub fn into_filter(self) -> Result<IirFilter<F>, FilterError> {
        IirFilter::new(self.b, self.a)
    }

    /// Builds a filter seeded with input history `x0` and output history `y0`.
    pub fn into_seeded_filter(self, x0: F, y0: F) -> Result<IirFilter<F>, FilterError> {
        IirFilter::seeded(self.b, self.a, x0, y0)
    }

    /// Evaluates the steady-state (DC) gain `sum(b) / sum(a)`.
    pub fn dc_gain(&self) -> F {
        let sum = |c: &[F]| c.iter().fold(F::zero(), |acc, &v| acc + v);
        sum(&self.b) / sum(&self.a)
    }
}

/// Returns the time constant `1 / (2 pi fc)` of a first-order section with cutoff `cutoff_hz`.
pub fn time_constant<F: Float + FloatConst>(cutoff_hz: F) -> Result<F, DesignError> {
    if !(cutoff_hz > F::zero() && cutoff_hz.is_finite()) {
        return Err(DesignError::InvalidCutoff);
    }
    let two = F::one() + F::one();
    Ok((two * F::PI() * cutoff_hz).recip())
}

fn check_tau<F: Float>(tau: F) -> Result<F, DesignError> {
    if tau > F::zero() && tau.is_finite() {
        Ok(tau)
    } else {
        Err(DesignError::InvalidTimeConstant)
    }
}

fn check_ts<F: Float>(sample_time: Duration) -> Result<F, DesignError> {
    period_secs(sample_time).ok_or(DesignError::InvalidSampleTime)
}

/// First-order low-pass from the backward-Euler discretization of `tau y' + y = x`:
///
/// ```text
/// y[n] = tau / (tau + Ts) y[n-1] + Ts / (tau + Ts) x[n]
/// ```
pub fn first_order_low_pass<F: Float>(
    tau: F,
    sample_time: Duration,
) -> Result<FilterCoefficients<F>, DesignError> {
    let tau = check_tau(tau)?;
    let ts = check_ts::<F>(sample_time)?;
    let denom = tau + ts;
    Ok(FilterCoefficients {
        b: vec![ts / denom],
        a: vec![F::one(), -tau / denom],
    })
}

/// First-order band-pass: a high-pass section with time constant `tau_low` (the low cutoff) in
/// series with a low-pass section with time constant `tau_high` (the high cutoff), both
/// discretized with backward Euler.
pub fn first_order_band_pass<F: Float>(
    tau_low: F,
    tau_high: F,
    sample_time: Duration,
) -> Result<FilterCoefficients<F>, DesignError> {
    let t0 = check_tau(tau_low)?;
    let t1 = check_tau(tau_high)?;
    let ts = check_ts::<F>(sample_time)?;
    let two = F::one() + F::one();

    let a0 = t0 * t1 + (t0 + t1) * ts + ts * ts;
    let a1 = -(two * t0 * t1 + (t0 + t1) * ts);
    let a2 = t0 * t1;
    let b0 = t0 * ts;
    let b1 = -t0 * ts;

    Ok(FilterCoefficients {
        b: vec![b0 / a0, b1 / a0],
        a: vec![F::one(), a1 / a0, a2 / a0],
    })
}

/// Pre-warped bilinear gain `K = tan(pi fc Ts)`.
fn bilinear_gain<F: Float + FloatConst>(
    cutoff_hz: F,
    sample_time: Duration,
) -> Result<F, DesignError> {
    let ts = check_ts::<F>(sample_time)?;
    let two = F::one() + F::one();
    let nyquist = (two * ts).recip();
    if !(cutoff_hz > F::zero() && cutoff_hz < nyquist) {
        return Err(DesignError::InvalidCutoff);
    }
    Ok((F::PI() * cutoff_hz * ts).tan())
}

/// First-order Butterworth low-pass via the bilinear transform with frequency pre-warping.
pub fn butterworth_low_pass<F: Float + FloatConst>(
    cutoff_hz: F,
    sample_time: Duration,
) -> Result<FilterCoefficients<F>, DesignError> {
    let k = bilinear_gain(cutoff_hz, sample_time)?;
    let norm = F::one() + k;
    Ok(FilterCoefficients {
        b: vec![k / norm, k / norm],
        a: vec![F::one(), (k - F::one()) / norm],
    })
}

/// First-order Butterworth high-pass via the bilinear transform with frequency pre-warping.
pub fn butterworth_high_pass<F: Float + FloatConst>(
    cutoff_hz: F,
    sample_time: Duration,
) -> Result<FilterCoefficients<F>, DesignError> {
    let k = bilinear_gain(cutoff_hz, sample_time)?;
    let norm = F::one() + k;
    Ok(FilterCoefficients {
        b: vec![norm.recip(), -norm.recip()],
        a: vec![F::one(), (k - F::one()) / norm],
    })
}
