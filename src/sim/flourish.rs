//! Transient visual pulses: cursor ripple, eye blink, avatar glitch
//!
//! Each is a tiny timer with edge-triggered reports so the presentation
//! layer only touches the DOM on state changes.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Cursor-proximity ripple around the avatar container
#[derive(Debug, Clone, Copy, Default)]
pub struct Ripple {
    active_until: f64,
}

impl Ripple {
    /// Arm (or re-arm) the ripple when the pointer is within the activation
    /// radius of the container centre. Returns true when the element should
    /// be grown.
    pub fn trigger(&mut self, dist: f32, now: f64) -> bool {
        if dist < RIPPLE_RADIUS {
            self.active_until = now + RIPPLE_FADE_MS;
            true
        } else {
            false
        }
    }

    /// True exactly once when the fade deadline passes (collapse the element)
    pub fn poll_expired(&mut self, now: f64) -> bool {
        if self.active_until > 0.0 && now >= self.active_until {
            self.active_until = 0.0;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> bool {
        self.active_until > 0.0
    }
}

/// Idle eye-blink scheduler; armed once after load, then runs for the page
/// lifetime with a uniformly random gap between blinks.
#[derive(Debug, Clone)]
pub struct Blink {
    next_at: f64,
    hold_until: f64,
    closed: bool,
    rng: Pcg32,
}

impl Blink {
    pub fn new(seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let gap = BLINK_GAP_MIN_MS + rng.random::<f64>() * BLINK_GAP_SPAN_MS;
        Self {
            next_at: now + BLINK_ARM_MS + gap,
            hold_until: 0.0,
            closed: false,
            rng,
        }
    }

    /// Edge events: Some(true) when the eyes should squash shut, Some(false)
    /// when they reopen.
    pub fn poll(&mut self, now: f64) -> Option<bool> {
        if self.closed {
            if now >= self.hold_until {
                self.closed = false;
                self.next_at =
                    now + BLINK_GAP_MIN_MS + self.rng.random::<f64>() * BLINK_GAP_SPAN_MS;
                return Some(false);
            }
        } else if now >= self.next_at {
            self.closed = true;
            self.hold_until = now + BLINK_HOLD_MS;
            return Some(true);
        }
        None
    }

    pub fn closed(&self) -> bool {
        self.closed
    }
}

/// One-shot avatar filter pulse (easter-egg feedback)
#[derive(Debug, Clone, Copy, Default)]
pub struct GlitchPulse {
    until: f64,
    active: bool,
}

impl GlitchPulse {
    /// Start (or restart) the pulse
    pub fn fire(&mut self, now: f64) {
        self.active = true;
        self.until = now + GLITCH_MS;
    }

    /// True exactly once when the pulse ends (revert the filter)
    pub fn poll_expired(&mut self, now: f64) -> bool {
        if self.active && now >= self.until {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }
}
