use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped by the clock.
    pub dt: f32,

    /// Seconds since the clock was created.
    pub elapsed: f32,

    pub now: Instant,
    pub frame_index: u64,
}

impl FrameTime {
    /// `dt` with a tighter upper bound, for animations that must not jump after a stall.
    #[inline]
    pub fn dt_capped(&self, max: f32) -> f32 {
        self.dt.min(max)
    }
}

/// Produces `FrameTime` snapshots with clamped deltas.
///
/// The lower clamp keeps tight loops from producing zero dt; the upper one
/// keeps a debugger pause or a minimized window from teleporting animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline (not the elapsed origin).
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_both_ways() {
        let mut clock = FrameClock::new();
        let t0 = clock.last;

        let ft = clock.tick_at(t0);
        assert!((ft.dt - 0.0001).abs() < 1e-6);

        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 5.0).abs() < 1e-3);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(b.frame_index, a.frame_index + 1);
    }

    #[test]
    fn capped_dt() {
        let mut clock = FrameClock::new();
        let t0 = clock.last;
        let ft = clock.tick_at(t0 + Duration::from_millis(100));
        assert!((ft.dt_capped(0.033) - 0.033).abs() < 1e-6);
    }
}
