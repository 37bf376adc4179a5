// Ramp and periodic signal generators for setpoints and duty-cycle profiles
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

use num_traits::{Float, FloatConst};

/// The three outputs of [`ramp`] at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ramp<F> {
    /// `t / t_ramp`, unbounded.
    pub linear: F,
    /// The linear ramp wrapped into `[0, 1)`.
    pub sawtooth: F,
    /// The sawtooth with every odd segment mirrored, rising and falling between 0 and 1.
    pub triangle: F,
}

/// Evaluates a ramp that reaches 1 after `t_ramp` seconds, along with its sawtooth and triangular
/// foldings.
///
/// `t_ramp` must be positive; a non-positive or non-finite `t_ramp` yields NaN outputs.
///
/// ```rust
/// use daq_kernels::waveform::ramp;
///
/// let r = ramp(1.5, 1.0);
/// assert_eq!(r.linear, 1.5);
/// assert_eq!(r.sawtooth, 0.5);
/// assert_eq!(r.triangle, 0.5);
///
/// let r = ramp(1.25, 1.0);
/// assert_eq!(r.triangle, 0.75);
/// ```
pub fn ramp<F: Float>(t: F, t_ramp: F) -> Ramp<F> {
    if !(t_ramp > F::zero() && t_ramp.is_finite()) {
        let nan = F::nan();
        return Ramp {
            linear: nan,
            sawtooth: nan,
            triangle: nan,
        };
    }
    let two = F::one() + F::one();

    let linear = t / t_ramp;
    let segment = linear.floor();
    let sawtooth = linear - segment;
    let odd = (segment % two).abs() == F::one();
    let triangle = if odd { F::one() - sawtooth } else { sawtooth };

    Ramp {
        linear,
        sawtooth,
        triangle,
    }
}

/// Shape of a [`SignalGenerator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaveForm {
    /// `sin(2 pi t / T)`
    Sine,
    /// The sign of the sine: +1 for the first half period, -1 for the second.
    Square,
    /// Rises linearly from 0 to 1 over each period.
    Sawtooth,
    /// Rises from 0 to 1 over one period and falls back over the next.
    Triangle,
}

/// A periodic signal `offset + amplitude * shape(t)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SignalGenerator<F> {
    waveform: WaveForm,
    period: F,
    amplitude: F,
    offset: F,
}

impl<F: Float + FloatConst> SignalGenerator<F> {
    /// Creates a generator. `period` is the waveform period in seconds; for
    /// [`WaveForm::Triangle`] it is the duration of one rising (or falling) ramp.
    pub fn new(waveform: WaveForm, period: F, amplitude: F, offset: F) -> Self {
        Self {
            waveform,
            period,
            amplitude,
            offset,
        }
    }

    /// Evaluates the signal at `t` seconds.
    pub fn generate(&self, t: F) -> F {
        let two = F::one() + F::one();
        let unit = match self.waveform {
            WaveForm::Sine => (two * F::PI() * t / self.period).sin(),
            WaveForm::Square => {
                if ramp(t, self.period).sawtooth < two.recip() {
                    F::one()
                } else {
                    -F::one()
                }
            }
            WaveForm::Sawtooth => ramp(t, self.period).sawtooth,
            WaveForm::Triangle => ramp(t, self.period).triangle,
        };
        self.amplitude * unit + self.offset
    }
}
