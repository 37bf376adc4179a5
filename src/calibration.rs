// Two-point linear output calibration
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

use num_traits::Float;

/// Errors raised while deriving a [`LinearCalibration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum CalibrationError {
    /// The two reference points share the same measured value, so no slope exists.
    #[cfg_attr(feature = "std", error("calibration points must have distinct measured values"))]
    DegeneratePoints,

    /// A slope, offset or reference point was not finite.
    #[cfg_attr(feature = "std", error("calibration values must be finite"))]
    NonFinite,
}

/// A linear correction `command = slope * value + offset`.
///
/// Used to correct a PWM-driven DAC: the requested voltage is mapped through the calibration and
/// then normalised by the reference voltage into a duty cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearCalibration<F> {
    slope: F,
    offset: F,
}

impl<F: Float> Default for LinearCalibration<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> LinearCalibration<F> {
    /// The identity calibration, `slope = 1`, `offset = 0`.
    pub fn identity() -> Self {
        Self {
            slope: F::one(),
            offset: F::zero(),
        }
    }

    /// Creates a calibration from an explicit slope and offset.
    pub fn new(slope: F, offset: F) -> Result<Self, CalibrationError> {
        if !(slope.is_finite() && offset.is_finite()) {
            return Err(CalibrationError::NonFinite);
        }
        Ok(Self { slope, offset })
    }

    /// Solves for slope and offset from two `(command, measured)` pairs.
    ///
    /// ```rust
    /// use daq_kernels::calibration::LinearCalibration;
    ///
    /// let cal = LinearCalibration::from_two_points((1.0, 0.5), (3.0, 1.5)).unwrap();
    /// assert_eq!(cal.slope(), 2.0);
    /// assert_eq!(cal.offset(), 0.0);
    /// ```
    pub fn from_two_points(first: (F, F), second: (F, F)) -> Result<Self, CalibrationError> {
        let (o1, v1) = first;
        let (o2, v2) = second;
        if v1 == v2 {
            return Err(CalibrationError::DegeneratePoints);
        }
        let slope = (o2 - o1) / (v2 - v1);
        Self::new(slope, o1 - slope * v1)
    }

    /// Returns the calibration slope.
    pub fn slope(&self) -> F {
        self.slope
    }

    /// Returns the calibration offset.
    pub fn offset(&self) -> F {
        self.offset
    }

    /// Maps a requested value through the calibration.
    pub fn apply(&self, value: F) -> F {
        self.slope * value + self.offset
    }

    /// Maps a requested voltage to a duty cycle in `[0, 1]` for a PWM output referenced to `vref`.
    pub fn duty(&self, value: F, vref: F) -> F {
        let duty = self.apply(value) / vref;
        if duty.is_nan() {
            return F::zero();
        }
        duty.max(F::zero()).min(F::one())
    }
}
