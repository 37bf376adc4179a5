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

use core::f64::consts::PI;
use std::time::Duration;

use daq_kernels::design::*;
use daq_kernels::filter::IirFilter;

use approx::assert_relative_eq;

const SAMPLE_TIME: Duration = Duration::from_millis(10);

#[test]
fn test_time_constant() {
    assert_relative_eq!(time_constant(1.0).unwrap(), 1.0 / (2.0 * PI));
    assert_relative_eq!(time_constant(0.3).unwrap(), 0.5305164769729845, epsilon = 1e-12);

    for fc in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(time_constant(fc), Err(DesignError::InvalidCutoff));
    }
}

#[test]
fn test_first_order_low_pass_coefficients() {
    let coeffs = first_order_low_pass(0.09, SAMPLE_TIME).unwrap();
    assert_eq!(coeffs.b.len(), 1);
    assert_eq!(coeffs.a.len(), 2);
    assert_relative_eq!(coeffs.b[0], 0.1, epsilon = 1e-12);
    assert_eq!(coeffs.a[0], 1.0);
    assert_relative_eq!(coeffs.a[1], -0.9, epsilon = 1e-12);
    assert_relative_eq!(coeffs.dc_gain(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_first_order_low_pass_rejects_invalid_parameters() {
    for tau in [0.0, -0.1, f64::NAN] {
        assert_eq!(
            first_order_low_pass(tau, SAMPLE_TIME),
            Err(DesignError::InvalidTimeConstant)
        );
    }
    assert_eq!(
        first_order_low_pass(0.1, Duration::ZERO),
        Err(DesignError::InvalidSampleTime)
    );
}

#[test]
fn test_low_pass_settles_to_input() {
    let mut lpf = first_order_low_pass(0.05, SAMPLE_TIME)
        .unwrap()
        .into_filter()
        .unwrap();
    let response = lpf.filter(&[4.0; 300]);
    assert_relative_eq!(response[299], 4.0, epsilon = 1e-9);

    let mut seeded = first_order_low_pass(0.05, SAMPLE_TIME)
        .unwrap()
        .into_seeded_filter(4.0, 4.0)
        .unwrap();
    assert_relative_eq!(seeded.step(4.0), 4.0, epsilon = 1e-12);
}

#[test]
fn test_band_pass_matches_cascade() {
    let (tau_low, tau_high) = (1.0, 0.1);
    let ts = 0.01;

    let coeffs = first_order_band_pass(tau_low, tau_high, SAMPLE_TIME).unwrap();
    assert_eq!(coeffs.b.len(), 2);
    assert_eq!(coeffs.a.len(), 3);
    assert_relative_eq!(coeffs.dc_gain(), 0.0, epsilon = 1e-12);

    let mut band = coeffs.into_filter().unwrap();

    // Backward-Euler high-pass followed by backward-Euler low-pass
    let g = tau_low / (tau_low + ts);
    let mut high = IirFilter::new(vec![g, -g], vec![1.0, -g]).unwrap();
    let mut low = first_order_low_pass(tau_high, SAMPLE_TIME)
        .unwrap()
        .into_filter()
        .unwrap();

    for n in 0..1000 {
        let x = (n as f64 * 0.05).sin() + if n > 300 { 1.0 } else { 0.0 };
        let expected = low.step(high.step(x));
        assert_relative_eq!(band.step(x), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_band_pass_blocks_dc() {
    let mut band = first_order_band_pass(0.5, 0.02, SAMPLE_TIME)
        .unwrap()
        .into_filter()
        .unwrap();
    let response = band.filter(&[1.0; 2000]);
    assert!(response.iter().take(50).any(|&y| y > 0.1));
    assert_relative_eq!(response[1999], 0.0, epsilon = 1e-6);
}

#[test]
fn test_band_pass_rejects_invalid_parameters() {
    assert_eq!(
        first_order_band_pass(0.0, 0.1, SAMPLE_TIME),
        Err(DesignError::InvalidTimeConstant)
    );
    assert_eq!(
        first_order_band_pass(1.0, f64::INFINITY, SAMPLE_TIME),
        Err(DesignError::InvalidTimeConstant)
    );
    assert_eq!(
        first_order_band_pass(1.0, 0.1, Duration::ZERO),
        Err(DesignError::InvalidSampleTime)
    );
}

#[test]
fn test_butterworth_low_pass_coefficients() {
    // 10 Hz cutoff at 100 Hz sampling
    let coeffs = butterworth_low_pass(10.0, SAMPLE_TIME).unwrap();
    assert_relative_eq!(coeffs.b[0], 0.24523727525278557, epsilon = 1e-9);
    assert_relative_eq!(coeffs.b[1], 0.24523727525278557, epsilon = 1e-9);
    assert_eq!(coeffs.a[0], 1.0);
    assert_relative_eq!(coeffs.a[1], -0.5095254494944288, epsilon = 1e-9);
    assert_relative_eq!(coeffs.dc_gain(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_butterworth_high_pass_coefficients() {
    let coeffs = butterworth_high_pass(10.0, SAMPLE_TIME).unwrap();
    assert_relative_eq!(coeffs.b[0], 0.7547627247472144, epsilon = 1e-9);
    assert_relative_eq!(coeffs.b[1], -0.7547627247472144, epsilon = 1e-9);
    assert_relative_eq!(coeffs.a[1], -0.5095254494944288, epsilon = 1e-9);
    assert_relative_eq!(coeffs.dc_gain(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_butterworth_half_power_at_cutoff() {
    let fc = 10.0;
    let ts = SAMPLE_TIME.as_secs_f64();
    let mut lpf = butterworth_low_pass(fc, SAMPLE_TIME)
        .unwrap()
        .into_filter()
        .unwrap();

    let samples: Vec<f64> = (0..2000)
        .map(|n| (2.0 * PI * fc * n as f64 * ts).sin())
        .collect();
    let response = lpf.filter(&samples);
    let peak = response[1000..]
        .iter()
        .fold(0.0_f64, |acc, &y| acc.max(y.abs()));

    // -3 dB, sampled at 10 points per period so the true peak may fall between samples
    assert!((peak - 0.5_f64.sqrt()).abs() < 0.05);
}

#[test]
fn test_butterworth_rejects_cutoff_above_nyquist() {
    for fc in [0.0, -5.0, 50.0, 80.0, f64::NAN] {
        assert_eq!(
            butterworth_low_pass(fc, SAMPLE_TIME),
            Err(DesignError::InvalidCutoff)
        );
        assert_eq!(
            butterworth_high_pass(fc, SAMPLE_TIME),
            Err(DesignError::InvalidCutoff)
        );
    }
    assert!(butterworth_low_pass(49.0, SAMPLE_TIME).is_ok());
}
