//! Character-by-character text reveal
//!
//! At most one reveal may be in progress system-wide; a `start` while busy is
//! dropped, not queued.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::KEYSTROKE_CUE_CHANCE;

/// Output of a single poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeStep {
    /// Characters emitted by this poll (usually zero or one)
    pub emitted: String,
    /// How many of the emitted characters rolled a keystroke cue
    pub cues: u32,
    /// True exactly once, when the final character has been emitted
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    target: Vec<char>,
    shown: usize,
    busy: bool,
    speed_ms: f64,
    next_at: f64,
    rng: Pcg32,
}

impl Typewriter {
    pub fn new(seed: u64) -> Self {
        Self {
            target: Vec::new(),
            shown: 0,
            busy: false,
            speed_ms: 0.0,
            next_at: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Begin revealing `text` at one character per `speed_ms`. Returns false
    /// and changes nothing if a reveal is already in progress.
    pub fn start(&mut self, text: &str, speed_ms: f64, now: f64) -> bool {
        if self.busy {
            return false;
        }
        self.target = text.chars().collect();
        self.shown = 0;
        self.busy = true;
        self.speed_ms = speed_ms;
        self.next_at = now + speed_ms;
        true
    }

    /// Emit every character whose deadline has passed. Completion clears the
    /// busy flag and is reported exactly once.
    pub fn poll(&mut self, now: f64) -> TypeStep {
        let mut step = TypeStep::default();
        if !self.busy {
            return step;
        }
        while self.shown < self.target.len() && now >= self.next_at {
            step.emitted.push(self.target[self.shown]);
            self.shown += 1;
            self.next_at += self.speed_ms;
            if self.rng.random::<f32>() < KEYSTROKE_CUE_CHANCE {
                step.cues += 1;
            }
        }
        if self.shown == self.target.len() {
            self.busy = false;
            step.completed = true;
        }
        step
    }
}
