//! Background gradients.
//!
//! The backdrop sits on a two-stop linear gradient picked from a fixed preset
//! list. [`GradientCycle`] swaps to a random preset on a wall-clock interval
//! and tracks a slow drift animation that pans across the gradient. The drift
//! runs faster or slower with the field's speed multiplier.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;

/// Seconds between automatic gradient changes.
pub const DEFAULT_CHANGE_INTERVAL: f32 = 30.0;

/// Seconds for one full drift cycle at speed 1.0.
pub const DRIFT_PERIOD: f32 = 15.0;

/// A two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    /// Direction in degrees, CSS convention: 0 points up, 90 points right.
    pub angle: f32,
    pub start: Rgb,
    pub end: Rgb,
}

impl LinearGradient {
    pub const fn new(angle: f32, start: Rgb, end: Rgb) -> Self {
        Self { angle, start, end }
    }

    /// Color at position `t` along the gradient axis, `t` in `[0, 1]`.
    pub fn sample(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            lerp(self.start.r, self.end.r),
            lerp(self.start.g, self.end.g),
            lerp(self.start.b, self.end.b),
        )
    }
}

const fn diagonal(start: u32, end: u32) -> LinearGradient {
    LinearGradient::new(135.0, Rgb::from_hex(start), Rgb::from_hex(end))
}

/// Built-in gradient presets.
pub const PRESETS: [LinearGradient; 10] = [
    diagonal(0xff9a9e, 0xfad0c4),
    diagonal(0xa1c4fd, 0xc2e9fb),
    diagonal(0x84fab0, 0x8fd3f4),
    diagonal(0xffc3a0, 0xffafbd),
    diagonal(0x667eea, 0x764ba2),
    diagonal(0xfbc2eb, 0xa6c1ee),
    diagonal(0xa6c0fe, 0xf68084),
    diagonal(0xd4fc79, 0x96e6a1),
    diagonal(0x43cbff, 0x9708cc),
    diagonal(0xf093fb, 0xf5576c),
];

/// Picks the current background gradient and animates its drift.
#[derive(Debug, Clone)]
pub struct GradientCycle {
    presets: Vec<LinearGradient>,
    current: usize,
    interval: f32,
    since_change: f32,
    phase: f32,
    rng: SmallRng,
}

impl GradientCycle {
    /// Cycle through [`PRESETS`] every `interval` seconds.
    pub fn new(interval: f32) -> Self {
        Self::with_rng(PRESETS.to_vec(), interval, SmallRng::from_entropy())
    }

    /// Like [`new`](Self::new) with a fixed seed.
    pub fn with_seed(interval: f32, seed: u64) -> Self {
        Self::with_rng(PRESETS.to_vec(), interval, SmallRng::seed_from_u64(seed))
    }

    /// Cycle through custom presets. An empty list falls back to [`PRESETS`].
    pub fn with_presets(presets: Vec<LinearGradient>, interval: f32) -> Self {
        Self::with_rng(presets, interval, SmallRng::from_entropy())
    }

    fn with_rng(presets: Vec<LinearGradient>, interval: f32, rng: SmallRng) -> Self {
        let presets = if presets.is_empty() {
            PRESETS.to_vec()
        } else {
            presets
        };
        Self {
            presets,
            current: 0,
            interval: interval.max(f32::EPSILON),
            since_change: 0.0,
            phase: 0.0,
            rng,
        }
    }

    /// The gradient currently on screen.
    pub fn current(&self) -> &LinearGradient {
        &self.presets[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Jump to a random preset and restart the drift animation.
    ///
    /// The same preset may come up twice in a row.
    pub fn shuffle(&mut self) {
        self.current = self.rng.gen_range(0..self.presets.len());
        self.since_change = 0.0;
        self.phase = 0.0;
    }

    /// Advance by `delta` seconds at the given speed multiplier.
    ///
    /// Returns true when the timer switched to a new preset.
    pub fn advance(&mut self, delta: f32, speed: f32) -> bool {
        let delta = delta.max(0.0);
        self.phase = (self.phase + delta * speed.max(0.0) / DRIFT_PERIOD).fract();
        self.since_change += delta;
        if self.since_change < self.interval {
            return false;
        }
        let carry = self.since_change % self.interval;
        self.shuffle();
        self.since_change = carry;
        true
    }

    /// Raw drift phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Pan offset in `[0, 1]`: out and back once per cycle, eased at both ends.
    pub fn offset(&self) -> f32 {
        let t = if self.phase < 0.5 {
            self.phase * 2.0
        } else {
            2.0 - self.phase * 2.0
        };
        t * t * (3.0 - 2.0 * t)
    }
}

impl Default for GradientCycle {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(PRESETS.len(), 10);
        assert_eq!(PRESETS[0].start, Rgb::from_hex(0xff9a9e));
        assert_eq!(PRESETS[9].end, Rgb::from_hex(0xf5576c));
        assert!(PRESETS.iter().all(|g| g.angle == 135.0));
    }

    #[test]
    fn test_sample_endpoints() {
        let g = LinearGradient::new(90.0, Rgb::BLACK, Rgb::new(200, 100, 50));
        assert_eq!(g.sample(0.0), Rgb::BLACK);
        assert_eq!(g.sample(1.0), Rgb::new(200, 100, 50));
        assert_eq!(g.sample(0.5), Rgb::new(100, 50, 25));
        assert_eq!(g.sample(7.0), g.sample(1.0));
    }

    #[test]
    fn test_changes_on_interval() {
        let mut cycle = GradientCycle::with_seed(30.0, 1);

        let mut changes = 0;
        for _ in 0..(29 * 60) {
            if cycle.advance(1.0 / 60.0, 1.0) {
                changes += 1;
            }
        }
        assert_eq!(changes, 0);

        for _ in 0..(2 * 60) {
            if cycle.advance(1.0 / 60.0, 1.0) {
                changes += 1;
            }
        }
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_long_stall_changes_once() {
        let mut cycle = GradientCycle::with_seed(30.0, 2);
        assert!(cycle.advance(95.0, 1.0));
        assert!(!cycle.advance(0.1, 1.0));
    }

    #[test]
    fn test_shuffle_resets_drift() {
        let mut cycle = GradientCycle::with_seed(30.0, 3);
        cycle.advance(5.0, 1.0);
        assert!(cycle.phase() > 0.0);

        cycle.shuffle();
        assert_eq!(cycle.phase(), 0.0);
        assert!(cycle.current_index() < PRESETS.len());
    }

    #[test]
    fn test_drift_scales_with_speed() {
        let mut slow = GradientCycle::with_seed(100.0, 4);
        let mut fast = GradientCycle::with_seed(100.0, 4);
        slow.advance(3.0, 0.5);
        fast.advance(3.0, 2.0);

        assert!((slow.phase() - 0.1).abs() < 1e-5);
        assert!((fast.phase() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_offset_is_triangle() {
        let mut cycle = GradientCycle::with_seed(100.0, 5);
        assert_eq!(cycle.offset(), 0.0);

        cycle.advance(DRIFT_PERIOD / 2.0, 1.0);
        assert!((cycle.offset() - 1.0).abs() < 1e-4);

        cycle.advance(DRIFT_PERIOD / 4.0, 1.0);
        assert!((cycle.offset() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_empty_presets_fall_back() {
        let cycle = GradientCycle::with_presets(Vec::new(), 10.0);
        assert_eq!(cycle.current(), &PRESETS[0]);
    }
}
