// Incremental discrete PID controller with anti-windup and a filtered derivative
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

use core::time::Duration;

use num_traits::{Float, NumCast};

/// Errors raised while validating a [`PidConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum PidConfigError {
    /// The proportional gain was negative or not finite.
    #[cfg_attr(
        feature = "std",
        error("proportional gain must be non-negative and finite")
    )]
    InvalidProportionalGain,

    /// The integral gain was negative or not finite.
    #[cfg_attr(feature = "std", error("integral gain must be non-negative and finite"))]
    InvalidIntegralGain,

    /// The derivative gain was negative or not finite.
    #[cfg_attr(
        feature = "std",
        error("derivative gain must be non-negative and finite")
    )]
    InvalidDerivativeGain,

    /// The derivative filter time constant was negative or not finite.
    #[cfg_attr(
        feature = "std",
        error("derivative filter time constant must be non-negative and finite")
    )]
    InvalidFilterTimeConstant,

    /// The sample time was zero or not representable in the float type.
    #[cfg_attr(feature = "std", error("sample time must be strictly positive"))]
    InvalidSampleTime,

    /// The output limits were NaN or not strictly ordered.
    #[cfg_attr(
        feature = "std",
        error("output limits must be ordered as min < max and not NaN")
    )]
    InvalidOutputLimits,
}

/// Converts a sampling period to seconds in the target float type.
///
/// Returns `None` if the period is zero or cannot be represented as a finite, positive `F`.
pub(crate) fn period_secs<F: Float>(period: Duration) -> Option<F> {
    <F as NumCast>::from(period.as_secs_f64()).filter(|secs| secs.is_finite() && *secs > F::zero())
}

/// Immutable configuration of an incremental PID controller.
///
/// A `PidConfig` can only be obtained from a [`PidConfigBuilder`], which validates every parameter
/// once. There are no setters: gains, limits and timing are fixed for the lifetime of the
/// controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidConfig<F: Float> {
    kp: F,
    ki: F,
    kd: F,

    /// Time constant of the single-pole filter applied to the derivative term, in seconds.
    filter_tc: F,

    sample_time: Duration,

    /// Sample time in seconds, cached in the working float type.
    ts: F,

    output_min: F,
    output_max: F,

    // Derivative filter weights: tau / (tau + Ts) and Ts / (tau + Ts)
    d_hold: F,
    d_gain: F,
}

impl<F: Float> Default for PidConfig<F> {
    fn default() -> Self {
        let sample_time = Duration::from_millis(10);
        let ts = period_secs(sample_time).unwrap_or_else(F::one);
        PidConfig {
            kp: F::one(),
            ki: F::zero(),
            kd: F::zero(),
            filter_tc: F::zero(),
            sample_time,
            ts,
            output_min: -F::one(),
            output_max: F::one(),
            d_hold: F::zero(),
            d_gain: F::one(),
        }
    }
}

impl<F: Float> PidConfig<F> {
    /// Returns the proportional gain.
    pub fn kp(&self) -> F {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> F {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> F {
        self.kd
    }

    /// Convenience method that returns the proportional, integral, and derivative gains together as a tuple.
    pub fn gains(&self) -> (F, F, F) {
        (self.kp, self.ki, self.kd)
    }

    /// Returns the time constant of the low-pass filter applied to the derivative term.
    pub fn filter_tc(&self) -> F {
        self.filter_tc
    }

    /// Returns the sampling period of the control loop.
    pub fn sample_time(&self) -> Duration {
        self.sample_time
    }

    /// Returns the sampling period in seconds.
    pub fn sample_time_secs(&self) -> F {
        self.ts
    }

    /// Returns the lower output saturation bound.
    pub fn output_min(&self) -> F {
        self.output_min
    }

    /// Returns the upper output saturation bound.
    pub fn output_max(&self) -> F {
        self.output_max
    }
}

/// Builder for [`PidConfig`].
///
/// ```rust
/// use core::time::Duration;
/// use daq_kernels::pid::PidConfigBuilder;
///
/// let config = PidConfigBuilder::default()
///     .kp(0.15)
///     .ki(0.35)
///     .kd(0.01)
///     .filter_tc(0.02)
///     .sample_time(Duration::from_millis(10))
///     .output_limits(-1.0, 1.0)
///     .build()
///     .expect("Invalid PID config");
/// assert_eq!(config.kp(), 0.15);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PidConfigBuilder<F: Float> {
    kp: F,
    ki: F,
    kd: F,
    filter_tc: F,
    sample_time: Duration,
    output_min: F,
    output_max: F,
}

impl<F: Float> Default for PidConfigBuilder<F> {
    fn default() -> Self {
        let config = PidConfig::<F>::default();
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            filter_tc: config.filter_tc,
            sample_time: config.sample_time,
            output_min: config.output_min,
            output_max: config.output_max,
        }
    }
}

impl<F: Float> PidConfigBuilder<F> {
    /// Sets the proportional gain.
    pub fn kp(mut self, kp: F) -> Self {
        self.kp = kp;
        self
    }

    /// Sets the integral gain.
    pub fn ki(mut self, ki: F) -> Self {
        self.ki = ki;
        self
    }

    /// Sets the derivative gain.
    pub fn kd(mut self, kd: F) -> Self {
        self.kd = kd;
        self
    }

    /// Sets the proportional, integral, and derivative gains together.
    pub fn gains(self, kp: F, ki: F, kd: F) -> Self {
        self.kp(kp).ki(ki).kd(kd)
    }

    /// Sets the derivative filter time constant. Zero disables the filter.
    pub fn filter_tc(mut self, filter_tc: F) -> Self {
        self.filter_tc = filter_tc;
        self
    }

    /// Sets the sampling period of the control loop.
    pub fn sample_time(mut self, sample_time: Duration) -> Self {
        self.sample_time = sample_time;
        self
    }

    /// Sets the output saturation bounds. Either bound may be infinite.
    pub fn output_limits(mut self, output_min: F, output_max: F) -> Self {
        self.output_min = output_min;
        self.output_max = output_max;
        self
    }

    /// Validates the parameters and produces an immutable [`PidConfig`].
    ///
    /// # Errors
    /// Returns the first [`PidConfigError`] encountered, checking gains, then the filter time
    /// constant, then the sample time, then the output limits.
    pub fn build(self) -> Result<PidConfig<F>, PidConfigError> {
        let valid_gain = |gain: F| gain >= F::zero() && gain.is_finite();

        if !valid_gain(self.kp) {
            return Err(PidConfigError::InvalidProportionalGain);
        }
        if !valid_gain(self.ki) {
            return Err(PidConfigError::InvalidIntegralGain);
        }
        if !valid_gain(self.kd) {
            return Err(PidConfigError::InvalidDerivativeGain);
        }
        if !valid_gain(self.filter_tc) {
            return Err(PidConfigError::InvalidFilterTimeConstant);
        }

        let ts = period_secs::<F>(self.sample_time).ok_or(PidConfigError::InvalidSampleTime)?;

        if self.output_min.is_nan() || self.output_max.is_nan() || self.output_min >= self.output_max
        {
            return Err(PidConfigError::InvalidOutputLimits);
        }

        let denom = self.filter_tc + ts;
        Ok(PidConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            filter_tc: self.filter_tc,
            sample_time: self.sample_time,
            ts,
            output_min: self.output_min,
            output_max: self.output_max,
            d_hold: self.filter_tc / denom,
            d_gain: ts / denom,
        })
    }
}

/// The mutable history of an incremental PID controller.
///
/// The context is a plain value: [`FuncPidController::compute`] takes it by value and returns the
/// updated copy, so it can be cloned, stored, or rolled back freely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidContext<F: Float> {
    /// e[n-1]
    last_err: F,
    /// e[n-2]
    prev_err: F,
    /// Last unsaturated output with the feedforward contribution removed
    last_unsat: F,
    last_derivative: F,
    last_output: F,
}

impl<F: Float> Default for PidContext<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> PidContext<F> {
    /// Creates a context with zeroed errors, output and derivative history.
    pub fn new() -> Self {
        Self::new_at(F::zero())
    }

    /// Creates a context whose accumulated output starts at `output`.
    ///
    /// Because the controller accumulates increments onto its last output, this gives a bumpless
    /// start when taking over an actuator that is already being driven at `output`.
    pub fn new_at(output: F) -> Self {
        Self {
            last_err: F::zero(),
            prev_err: F::zero(),
            last_unsat: output,
            last_derivative: F::zero(),
            last_output: output,
        }
    }

    /// Returns the last (saturated) output of the controller.
    pub fn output(&self) -> F {
        self.last_output
    }

    /// Returns the error computed at the last sample.
    pub fn error(&self) -> F {
        self.last_err
    }

    /// Returns the last unsaturated output, excluding feedforward.
    pub fn unsaturated_output(&self) -> F {
        self.last_unsat
    }

    /// Returns the last value of the filtered derivative term.
    pub fn derivative(&self) -> F {
        self.last_derivative
    }
}

/// A functional implementation of an incremental PID controller.
///
/// Each call to `compute` adds proportional, integral and derivative *increments* onto the last
/// unsaturated output instead of recomputing absolute terms. Anti-windup therefore reduces to
/// dropping the integral increment while the previous output sits on a saturation bound.
///
/// The controller holds no mutable state; the history lives in a [`PidContext`].
#[derive(Copy, Clone, Debug)]
pub struct FuncPidController<F: Float> {
    config: PidConfig<F>,
}

impl<F: Float> FuncPidController<F> {
    /// Creates a new controller from a validated configuration.
    pub fn new(config: PidConfig<F>) -> Self {
        FuncPidController { config }
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &PidConfig<F> {
        &self.config
    }

    /// Computes one control action.
    ///
    /// # Arguments
    /// - `ctx`: The controller history, consumed and returned updated.
    /// - `setpoint`: The desired value at this sample.
    /// - `measurement`: The measured process value at this sample.
    /// - `feedforward`: Optional feedforward added directly to the output.
    ///
    /// # Returns
    /// The output clamped to the configured limits, and the updated context. If any input is not
    /// finite, or the error or accumulated output overflows, the sample is rejected: the context is
    /// returned untouched along with the last output.
    pub fn compute(
        &self,
        mut ctx: PidContext<F>,
        setpoint: F,
        measurement: F,
        feedforward: Option<F>,
    ) -> (F, PidContext<F>) {
        let cfg = &self.config;

        let held = ctx.last_output.max(cfg.output_min).min(cfg.output_max);

        let uff = feedforward.unwrap_or_else(F::zero);
        if !(setpoint.is_finite() && measurement.is_finite() && uff.is_finite()) {
            return (held, ctx);
        }
        let two = F::one() + F::one();

        let error = setpoint - measurement;
        if !error.is_finite() {
            return (held, ctx);
        }

        let up = cfg.kp * (error - ctx.last_err);

        // Suppress integration while the previous output is saturated
        let feedforwarded = ctx.last_unsat + uff;
        let ui = if feedforwarded >= cfg.output_max || feedforwarded <= cfg.output_min {
            F::zero()
        } else {
            cfg.ki * cfg.ts * error
        };

        let raw_derivative =
            cfg.kd / cfg.ts * (error - two * ctx.last_err + ctx.prev_err);
        let derivative = cfg.d_hold * ctx.last_derivative + cfg.d_gain * raw_derivative;

        let unsat = ctx.last_unsat + up + ui + derivative + uff;
        let accumulated = unsat - uff;
        if !(unsat.is_finite() && accumulated.is_finite()) {
            return (held, ctx);
        }
        let output = unsat.max(cfg.output_min).min(cfg.output_max);

        ctx.prev_err = ctx.last_err;
        ctx.last_err = error;
        ctx.last_unsat = accumulated;
        ctx.last_derivative = derivative;
        ctx.last_output = output;
        (output, ctx)
    }
}

/// A stateful incremental PID controller.
///
/// Wraps a [`FuncPidController`] and keeps its [`PidContext`] inline, so each call to `control`
/// mutates the controller.
///
/// ```rust
/// use daq_kernels::pid::{PidConfigBuilder, PidController};
///
/// let config = PidConfigBuilder::default().kp(0.5).ki(2.0).build().unwrap();
/// let mut pid = PidController::new(config);
///
/// let command = pid.control(1.0, 0.0, None);
/// assert!(command > 0.0 && command <= 1.0);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PidController<F: Float> {
    ctx: PidContext<F>,
    controller: FuncPidController<F>,
}

impl<F: Float> PidController<F> {
    /// Creates a controller with zeroed history.
    pub fn new(config: PidConfig<F>) -> Self {
        Self {
            ctx: PidContext::new(),
            controller: FuncPidController::new(config),
        }
    }

    /// Creates a controller whose accumulated output starts at `output`.
    ///
    /// See [`PidContext::new_at`].
    pub fn new_at(config: PidConfig<F>, output: F) -> Self {
        Self {
            ctx: PidContext::new_at(output),
            controller: FuncPidController::new(config),
        }
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &PidConfig<F> {
        self.controller.config()
    }

    /// Returns a snapshot of the controller history.
    pub fn context(&self) -> &PidContext<F> {
        &self.ctx
    }

    /// Returns the last output of the controller.
    pub fn output(&self) -> F {
        self.ctx.output()
    }

    /// Computes one control action and advances the controller history.
    ///
    /// See [`FuncPidController::compute`].
    pub fn control(&mut self, setpoint: F, measurement: F, feedforward: Option<F>) -> F {
        let (output, ctx) = self
            .controller
            .compute(self.ctx, setpoint, measurement, feedforward);
        self.ctx = ctx;
        output
    }

    /// Clears the error, derivative and output history.
    pub fn reset(&mut self) {
        self.ctx = PidContext::new();
    }

    /// Clears the error and derivative history and restarts accumulation from `output`.
    pub fn reset_to(&mut self, output: F) {
        self.ctx = PidContext::new_at(output);
    }
}
