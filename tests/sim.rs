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

#[cfg(feature = "simulation")]
mod test_closed_loop_performance {
    use core::time::Duration;
    use daq_kernels::design::first_order_low_pass;
    use daq_kernels::pid::*;
    use daq_kernels::sim;

    use nalgebra as na;

    const SAMPLE_TIME: Duration = Duration::from_millis(10);
    const SAMPLE_TIME_S: f64 = 0.01;

    fn speed_controller() -> PidController<f64> {
        let config = PidConfigBuilder::default()
            .gains(0.5, 2.0, 0.0)
            .sample_time(SAMPLE_TIME)
            .output_limits(-1.0, 1.0)
            .build()
            .unwrap();
        PidController::new(config)
    }

    /// Drives the speed plant `0.5 w' + w = 2 u` for `steps` samples and returns the speed trace
    fn run_speed_loop(
        pid: &mut PidController<f64>,
        state: &mut na::Vector1<f64>,
        setpoint: f64,
        steps: usize,
    ) -> Vec<f64> {
        let plant = sim::FirstOrderPlant {
            gain: 2.0,
            time_constant: 0.5,
        };

        let mut trace = Vec::with_capacity(steps);
        for _ in 0..steps {
            let measurement = plant.h(*state);
            let u = pid.control(setpoint, measurement, None);
            *state = sim::rk4_step(|x| plant.f(x, u), *state, SAMPLE_TIME_S);
            trace.push(plant.h(*state));
        }
        trace
    }

    /// PI speed control of a first-order plant. The closed-loop poles sit at -2 +/- 2j, so the
    /// step response settles well within the simulated 10 s.
    #[test]
    fn test_speed_loop_tracks_step() {
        let mut pid = speed_controller();
        let mut state = na::vector![0.0];

        let trace = run_speed_loop(&mut pid, &mut state, 1.0, 1000);
        assert!((trace[999] - 1.0).abs() < 1e-3);
        assert!(trace.iter().all(|w| w.is_finite()));

        // Steady-state command is setpoint / plant gain
        assert!((pid.output() - 0.5).abs() < 1e-3);
    }

    /// An unreachable setpoint holds the command at the bound. With the integral increment
    /// suppressed while saturated, the loop recovers promptly once the setpoint becomes reachable.
    #[test]
    fn test_speed_loop_recovers_from_saturation() {
        let mut pid = speed_controller();
        let mut state = na::vector![0.0];

        let saturated = run_speed_loop(&mut pid, &mut state, 3.0, 500);
        assert!((pid.output() - 1.0).abs() < 1e-2);
        assert!((saturated[499] - 2.0).abs() < 2e-2);
        assert!(pid.context().unsaturated_output() < 2.0);

        let recovered = run_speed_loop(&mut pid, &mut state, 1.0, 400);
        assert!((recovered[399] - 1.0).abs() < 2e-2);
    }

    /// PD position control of a DC motor. The plant integrates speed, so no integral action is
    /// needed to remove steady-state error.
    #[test]
    fn test_position_loop_settles() {
        let config = PidConfigBuilder::default()
            .gains(2.0, 0.0, 0.2)
            .filter_tc(0.02)
            .sample_time(SAMPLE_TIME)
            .output_limits(-1.0, 1.0)
            .build()
            .unwrap();
        let mut pid = PidController::new(config);

        let motor = sim::MotorPosition {
            gain: 2.0,
            time_constant: 0.5,
        };
        let mut state = na::vector![0.0, 0.0];

        let mut peak = 0.0_f64;
        for _ in 0..1000 {
            let u = pid.control(1.0, motor.h(state), None);
            assert!((-1.0..=1.0).contains(&u));
            state = sim::rk4_step(|x| motor.f(x, u), state, SAMPLE_TIME_S);
            peak = peak.max(motor.h(state));
        }

        assert!((motor.h(state) - 1.0).abs() < 1e-2);
        assert!(peak < 1.5);
    }

    /// The stateful controller matches the functional one sample for sample when the measurement
    /// is low-pass filtered before entering the loop.
    #[test]
    fn test_forwarding_to_stateful_pid_closed_loop_numerical_equivalence() {
        let config = PidConfigBuilder::default()
            .gains(0.5, 2.0, 0.01)
            .filter_tc(0.02)
            .sample_time(SAMPLE_TIME)
            .output_limits(-1.0, 1.0)
            .build()
            .unwrap();
        let func_pid = FuncPidController::new(config);
        let mut ctx = PidContext::new();
        let mut stateful_pid = PidController::new(config);

        let mut lpf = first_order_low_pass(0.05, SAMPLE_TIME)
            .unwrap()
            .into_filter()
            .unwrap();

        let plant = sim::FirstOrderPlant {
            gain: 2.0,
            time_constant: 0.5,
        };
        let mut state = na::vector![0.0];
        let mut expected: f64;

        for i in 0..1000usize {
            let setpoint = if (i / 200) % 2 == 0 { 1.5 } else { -0.5 };
            let measurement = lpf.step(plant.h(state));

            (expected, ctx) = func_pid.compute(ctx, setpoint, measurement, None);
            let result = stateful_pid.control(setpoint, measurement, None);
            assert_eq!(result, expected);

            state = sim::rk4_step(|x| plant.f(x, result), state, SAMPLE_TIME_S);
        }
    }

    #[test]
    fn test_rk4_matches_exponential_decay() {
        let plant = sim::FirstOrderPlant {
            gain: 1.0,
            time_constant: 0.5,
        };
        let mut state = na::vector![1.0];
        for _ in 0..100 {
            state = sim::rk4_step(|x| plant.f(x, 0.0), state, SAMPLE_TIME_S);
        }
        approx::assert_relative_eq!(state[0], (-2.0_f64).exp(), epsilon = 1e-9);
    }
}
