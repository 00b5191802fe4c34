//! Spring animation.
//!
//! Springs are described the way interactive UI springs usually are: by a
//! `response` (period of the undamped oscillation, in seconds) and a
//! `damping_fraction` (1.0 = critically damped, below 1.0 overshoots).
//! The step response is evaluated analytically, so an animation is fully
//! described by its endpoints and start instant and sampling it is pure.

use std::f32::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{SPRING_DAMPING_FRACTION, SPRING_RESPONSE, SPRING_SETTLE_THRESHOLD};

const MIN_RESPONSE: f32 = 0.01;
const MIN_DAMPING: f32 = 0.05;
/// Upper bound for any settle time; slower springs jump to the end here.
const MAX_SETTLE_SECONDS: f32 = 10.0;

/// A damped spring curve from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Seconds for one undamped oscillation
    pub response: f32,
    /// Ratio of actual to critical damping
    pub damping_fraction: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self::interactive()
    }
}

impl Spring {
    pub fn new(response: f32, damping_fraction: f32) -> Self {
        Self {
            response,
            damping_fraction,
        }
    }

    /// The spring used for expand/collapse (0.6 s response, 0.7 damping).
    pub fn interactive() -> Self {
        Self::new(SPRING_RESPONSE, SPRING_DAMPING_FRACTION)
    }

    /// Whether both parameters are finite and in a usable range.
    pub fn is_valid(&self) -> bool {
        self.response.is_finite()
            && self.response > 0.0
            && self.response <= MAX_SETTLE_SECONDS
            && self.damping_fraction.is_finite()
            && self.damping_fraction > 0.0
    }

    fn omega(&self) -> f32 {
        2.0 * PI / self.response.max(MIN_RESPONSE)
    }

    fn zeta(&self) -> f32 {
        self.damping_fraction.max(MIN_DAMPING)
    }

    /// Time after which the curve stays within the settle threshold of 1.0.
    pub fn settle_duration(&self) -> Duration {
        let omega = self.omega();
        let zeta = self.zeta();

        let seconds = if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            // Amplitude of the decaying cos/sin pair
            let amplitude = (1.0 + (zeta * omega / omega_d).powi(2)).sqrt();
            (amplitude / SPRING_SETTLE_THRESHOLD).ln() / (zeta * omega)
        } else {
            // (1 + wt) e^(-wt) has no closed-form inverse; step until it is small
            let step = 1.0 / 240.0;
            let mut t = 0.0;
            while (1.0 + omega * t) * (-omega * t).exp() > SPRING_SETTLE_THRESHOLD
                && t < MAX_SETTLE_SECONDS
            {
                t += step;
            }
            t
        };

        // A non-finite time means the spring never moves
        if seconds.is_finite() {
            Duration::from_secs_f32(seconds.clamp(0.0, MAX_SETTLE_SECONDS))
        } else {
            Duration::ZERO
        }
    }

    /// Progress along the curve after `elapsed`, 0.0 at the start, exactly 1.0
    /// once settled. Underdamped springs exceed 1.0 on the way.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.settle_duration() {
            return 1.0;
        }

        let t = elapsed.as_secs_f32();
        let omega = self.omega();
        let zeta = self.zeta();

        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            1.0 - decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            1.0 - (1.0 + omega * t) * (-omega * t).exp()
        }
    }

    /// Value between `from` and `to` after `elapsed`.
    pub fn interpolate(&self, from: f32, to: f32, elapsed: Duration) -> f32 {
        from + (to - from) * self.progress(elapsed)
    }

    pub fn is_settled(&self, elapsed: Duration) -> bool {
        elapsed >= self.settle_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_endpoints() {
        let spring = Spring::interactive();
        assert!(spring.progress(Duration::ZERO).abs() < 1e-6);
        assert_eq!(spring.progress(spring.settle_duration()), 1.0);
        assert_eq!(spring.progress(Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_interactive_spring_overshoots() {
        let spring = Spring::interactive();
        let peak = (1..100)
            .map(|ms| spring.progress(Duration::from_millis(ms * 10)))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "damping 0.7 should overshoot, peak = {peak}");
        assert!(peak < 1.1);
    }

    #[test]
    fn test_critical_spring_is_monotonic() {
        let spring = Spring::new(0.5, 1.0);
        let mut last = 0.0;
        for ms in (0..2000).step_by(10) {
            let p = spring.progress(Duration::from_millis(ms));
            assert!(p >= last - 1e-6);
            assert!(p <= 1.0 + 1e-6);
            last = p;
        }
        assert_eq!(spring.progress(Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_settles_within_a_second() {
        let settle = Spring::interactive().settle_duration();
        assert!(settle > Duration::from_millis(500));
        assert!(settle < Duration::from_millis(1200));
    }

    #[test]
    fn test_interpolate() {
        let spring = Spring::interactive();
        assert_eq!(spring.interpolate(0.0, -110.0, Duration::from_secs(2)), -110.0);
        assert_eq!(spring.interpolate(55.0, 220.0, Duration::ZERO), 55.0);
    }

    #[test]
    fn test_degenerate_parameters_are_clamped() {
        let spring = Spring::new(0.0, 0.0);
        let settle = spring.settle_duration();
        assert!(settle < Duration::from_secs(10));
        assert_eq!(spring.progress(settle), 1.0);
    }

    #[test]
    fn test_huge_response_settle_is_bounded() {
        let slow = Spring::new(1e30, 0.7);
        assert!(!slow.is_valid());
        assert_eq!(slow.settle_duration(), Duration::from_secs(10));
        assert!(slow.progress(Duration::from_millis(16)).is_finite());
        assert_eq!(slow.progress(Duration::from_secs(10)), 1.0);

        for response in [f32::INFINITY, f32::NAN] {
            let spring = Spring::new(response, 0.7);
            assert!(!spring.is_valid());
            assert!(spring.settle_duration() <= Duration::from_secs(10));
            assert!(spring.progress(Duration::from_millis(16)).is_finite());
        }
        assert!(Spring::interactive().is_valid());
    }
}
