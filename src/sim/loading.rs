//! Fake boot-progress bar
//!
//! `running -> complete` in at most 20 ticks: each 200 ms tick adds a uniform
//! increment from [5, 20) and clamps at 100. There is no retry path; a
//! stalled tick source simply never completes.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Running,
    Complete,
}

/// Report for a single progress tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingTick {
    /// Clamped percentage to display
    pub percent: f32,
    /// True exactly once, on the tick that reaches 100
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct LoadingProgress {
    pub progress: f32,
    pub phase: LoadingPhase,
    next_tick: f64,
    rng: Pcg32,
}

impl LoadingProgress {
    pub fn new(seed: u64, now: f64) -> Self {
        Self {
            progress: 0.0,
            phase: LoadingPhase::Running,
            next_tick: now + LOADING_TICK_MS,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance if a tick boundary has passed. At most one tick per poll;
    /// returns None between ticks and forever after completion.
    pub fn poll(&mut self, now: f64) -> Option<LoadingTick> {
        if self.phase == LoadingPhase::Complete || now < self.next_tick {
            return None;
        }
        self.next_tick += LOADING_TICK_MS;
        self.progress += self
            .rng
            .random_range(LOADING_STEP_MIN..LOADING_STEP_MIN + LOADING_STEP_SPAN);
        let completed = self.progress >= 100.0;
        if completed {
            self.progress = 100.0;
            self.phase = LoadingPhase::Complete;
        }
        Some(LoadingTick {
            percent: self.progress,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_within_20_ticks() {
        // Minimum increment 5 guarantees termination within 20 ticks,
        // whatever the seed.
        for seed in 0..50 {
            let mut loading = LoadingProgress::new(seed, 0.0);
            let mut ticks = 0;
            let mut now = 0.0;
            while loading.phase == LoadingPhase::Running {
                now += LOADING_TICK_MS;
                if loading.poll(now).is_some() {
                    ticks += 1;
                }
                assert!(ticks <= 20, "seed {seed} took more than 20 ticks");
            }
            assert_eq!(loading.progress, 100.0);
        }
    }

    #[test]
    fn test_completed_fires_once_then_stops() {
        let mut loading = LoadingProgress::new(3, 0.0);
        let mut now = 0.0;
        let mut completions = 0;
        for _ in 0..40 {
            now += LOADING_TICK_MS;
            if let Some(tick) = loading.poll(now) {
                assert!(tick.percent <= 100.0);
                if tick.completed {
                    completions += 1;
                    assert_eq!(tick.percent, 100.0);
                }
            }
        }
        assert_eq!(completions, 1);
        // Tick source is stopped: no further reports
        assert_eq!(loading.poll(now + LOADING_TICK_MS), None);
    }

    #[test]
    fn test_no_tick_before_period() {
        let mut loading = LoadingProgress::new(9, 1000.0);
        assert_eq!(loading.poll(1000.0), None);
        assert_eq!(loading.poll(1199.0), None);
        let tick = loading.poll(1200.0).expect("tick due");
        assert!(tick.percent >= LOADING_STEP_MIN);
        assert!(tick.percent < LOADING_STEP_MIN + LOADING_STEP_SPAN);
    }

    #[test]
    fn test_determinism() {
        let mut a = LoadingProgress::new(77, 0.0);
        let mut b = LoadingProgress::new(77, 0.0);
        for i in 1..=20 {
            let now = i as f64 * LOADING_TICK_MS;
            assert_eq!(a.poll(now), b.poll(now));
        }
    }
}
