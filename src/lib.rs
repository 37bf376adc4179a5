#![warn(missing_docs)]

//! # Discrete Data-Acquisition Kernels
//!
//! This library provides the small numerical building blocks of a sampled data-acquisition or
//! control loop: filtering a raw sample, keeping a window of recent samples, finding events in
//! that window, and computing a bounded actuator command.
//!
//! Every kernel is a plain value driven once per sample by the caller's polling loop. Nothing
//! allocates or fails on the hot path: parameters are validated once at construction, and
//! non-finite samples are rejected without corrupting state.
//!
//! ## Features
//!
//! - [`filter::IirFilter`]: evaluates an arbitrary-order linear difference equation, with
//!   configurable (zero, seeded or explicit) initial history.
//! - [`design`]: first-order low-pass, band-pass and Butterworth low/high-pass coefficient recipes.
//! - [`pid`]: an incremental PID controller:
//!   - Anti-windup by suppressing the integral increment while the output is saturated.
//!   - Derivative on the second difference of error, passed through a single-pole filter.
//!   - Optional feedforward.
//!   - Functional and stateful variants, mirroring each other numerically.
//! - [`ring::RingBuffer`]: a fixed-capacity window with an explicit one-way filling/full state.
//! - [`cluster`]: detection of runs of `true` in thresholded signals, with peak location.
//! - [`waveform`] and [`calibration`]: ramp generation and PWM output calibration.
//!
//! ## Usage
//!
//! ```rust
//! use core::time::Duration;
//!
//! use daq_kernels::cluster::ClusterDetector;
//! use daq_kernels::design::first_order_low_pass;
//! use daq_kernels::pid::{PidConfigBuilder, PidController};
//! use daq_kernels::ring::RingBuffer;
//!
//! let sample_time = Duration::from_millis(10);
//!
//! let mut lpf = first_order_low_pass(0.05, sample_time)
//!     .expect("Invalid filter parameters")
//!     .into_filter()
//!     .expect("Invalid filter coefficients");
//! let mut window = RingBuffer::new(100).expect("Invalid capacity");
//! let detector = ClusterDetector::new(3).expect("Invalid minimum length");
//!
//! let config = PidConfigBuilder::default()
//!     .kp(0.15)
//!     .ki(0.35)
//!     .kd(0.01)
//!     .sample_time(sample_time)
//!     .build()
//!     .expect("Invalid PID config");
//! let mut pid = PidController::new(config);
//!
//! for n in 0..200 {
//!     let raw = if n > 50 { 1.0 } else { 0.0 };
//!     let filtered = lpf.step(raw);
//!     window.add(filtered);
//!
//!     let command = pid.control(1.0, filtered, None);
//!     assert!((-1.0..=1.0).contains(&command));
//! }
//!
//! let events = detector.detect(window.iter().map(|&v| v > 0.5));
//! assert_eq!(events.len(), 1);
//! ```
//!
//! ## License
//!
//! MIT
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Incremental discrete PID controller.
pub mod pid;

/// Generic IIR difference-equation filter.
pub mod filter;

/// Coefficient recipes for first-order digital filters.
pub mod design;

/// Fixed-capacity ring buffer.
pub mod ring;

/// Run detection over boolean sequences.
pub mod cluster;

/// Ramp and periodic signal generators.
pub mod waveform;

/// Linear output calibration.
pub mod calibration;

#[doc(hidden)]
#[cfg(feature = "simulation")]
pub mod sim;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
