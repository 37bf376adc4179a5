// Reference plants for exercising the kernels in closed loop
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

use nalgebra as na;

/// Advances `x' = f(x)` by one classical fourth-order Runge-Kutta step of length `h`.
pub fn rk4_step<const N: usize>(
    f: impl Fn(na::SVector<f64, N>) -> na::SVector<f64, N>,
    x: na::SVector<f64, N>,
    h: f64,
) -> na::SVector<f64, N> {
    let k1 = f(x);
    let k2 = f(x + k1 * (h / 2.0));
    let k3 = f(x + k2 * (h / 2.0));
    let k4 = f(x + k3 * h);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// A DC motor speed model, `tau w' + w = K u`, with a single state `w`.
pub struct FirstOrderPlant {
    pub gain: f64,
    pub time_constant: f64,
}

impl FirstOrderPlant {
    pub fn f(&self, x: na::Vector1<f64>, u: f64) -> na::Vector1<f64> {
        na::Vector1::new((self.gain * u - x[0]) / self.time_constant)
    }

    pub fn h(&self, x: na::Vector1<f64>) -> f64 {
        x[0]
    }
}

/// A DC motor position model: the speed follows [`FirstOrderPlant`] and the angle integrates it.
///
/// ```text
/// ┌    ┐   ┌            ┐┌   ┐   ┌       ┐
/// │ θ' │ = │ 0   1      ││ θ │ + │ 0     │ u
/// │ ω' │   │ 0   -1/tau ││ ω │   │ K/tau │
/// └    ┘   └            ┘└   ┘   └       ┘
/// ```
pub struct MotorPosition {
    pub gain: f64,
    pub time_constant: f64,
}

impl MotorPosition {
    pub fn f(&self, x: na::Vector2<f64>, u: f64) -> na::Vector2<f64> {
        let mat_a = na::Matrix2::new(0.0, 1.0, 0.0, -1.0 / self.time_constant);
        let mat_b = na::Vector2::new(0.0, self.gain / self.time_constant);

        mat_a * x + mat_b * u
    }

    pub fn h(&self, x: na::Vector2<f64>) -> f64 {
        x[0]
    }
}
