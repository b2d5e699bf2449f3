//! Time-based interpolation helpers.

use glam::Vec3;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of the remaining distance covered in `dt` seconds at `rate`.
#[inline]
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Frame-rate independent exponential approach of `current` toward `target`.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, damp_factor(rate, dt))
}

/// Rate equivalent to multiplying the remaining distance by `keep` every frame at `fps`.
pub fn rate_from_per_frame(keep: f32, fps: f32) -> f32 {
    -keep.ln() * fps
}

pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        lerp(self, other, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    Power2Out,
    Power3Out,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// A one-shot interpolation from `from` to `to` over `duration` seconds.
#[derive(Debug, Copy, Clone)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        Self { from, to, duration: duration.max(0.0), easing, elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 { 1.0 } else { self.elapsed / self.duration }
    }

    pub fn value(&self) -> T {
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_is_frame_rate_independent() {
        let one = damp(0.0, 1.0, 10.0, 0.1);
        let mut two = damp(0.0, 1.0, 10.0, 0.05);
        two = damp(two, 1.0, 10.0, 0.05);
        assert!((one - two).abs() < 1e-5);
    }

    #[test]
    fn damp_with_zero_dt_does_not_move() {
        assert_eq!(damp(3.0, 9.0, 10.0, 0.0), 3.0);
    }

    #[test]
    fn per_frame_rate_matches_table_factor() {
        let rate = rate_from_per_frame(0.95, 60.0);
        assert!((rate - 3.0776).abs() < 1e-3);
        let v = damp(0.0, 1.0, rate, 1.0 / 60.0);
        assert!((v - 0.05).abs() < 1e-4);
    }

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::Power2Out, Easing::Power3Out] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
        assert!(Easing::Power3Out.apply(0.5) > Easing::Power2Out.apply(0.5));
        assert!((Easing::Power2Out.apply(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn tween_reaches_target() {
        let mut t = Tween::new(Vec3::new(0.0, -2.0, -5.0), Vec3::ZERO, 0.7, Easing::Power3Out);
        assert!(!t.is_finished());
        t.advance(0.35);
        let mid = t.value();
        assert!(mid.y > -2.0 && mid.y < 0.0);
        t.advance(1.0);
        assert!(t.is_finished());
        assert_eq!(t.value(), Vec3::ZERO);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t = Tween::new(1.0_f32, 4.0, 0.0, Easing::Linear);
        assert!(t.is_finished());
        assert_eq!(t.value(), 4.0);
    }
}
