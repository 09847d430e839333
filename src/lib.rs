//! Neon Intro - an animated AI-host landing sequence
//!
//! Core modules:
//! - `sim`: Deterministic choreography (boot timeline, motion fields, dialogue)
//! - `stage`: DOM element access (silent no-op on missing targets)
//! - `painter`: Canvas 2D rendering for the motion fields
//! - `audio`: Web Audio procedural sound cues
//! - `tuning`: Data-driven dialogue script

pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod painter;
#[cfg(target_arch = "wasm32")]
pub mod stage;

pub use tuning::{Script, Tuning};

/// Choreography timing and layout constants
pub mod consts {
    /// Loading bar tick period
    pub const LOADING_TICK_MS: f64 = 200.0;
    /// Minimum progress added per loading tick
    pub const LOADING_STEP_MIN: f32 = 5.0;
    /// Width of the uniform increment range [5, 20)
    pub const LOADING_STEP_SPAN: f32 = 15.0;
    /// Pause after reaching 100% before the fade-out class is applied
    pub const LOADING_SETTLE_MS: f64 = 500.0;
    /// Fade-out duration before the loading host is removed and the boot
    /// timeline activates
    pub const LOADING_FADE_MS: f64 = 1000.0;

    /// Node field: pool size, link threshold, link alpha ceiling
    pub const NODE_COUNT: usize = 30;
    pub const NODE_LINK_DIST: f32 = 200.0;
    pub const NODE_LINK_ALPHA: f32 = 0.5;
    /// Particle field
    pub const PARTICLE_COUNT: usize = 150;
    pub const PARTICLE_LINK_DIST: f32 = 100.0;
    pub const PARTICLE_LINK_ALPHA: f32 = 0.1;

    /// Typewriter speeds (ms per character)
    pub const TYPE_SPEED_MS: f64 = 40.0;
    pub const HOVER_TYPE_SPEED_MS: f64 = 35.0;
    pub const CLICK_TYPE_SPEED_MS: f64 = 50.0;
    /// Chance that an emitted character triggers the keystroke cue
    pub const KEYSTROKE_CUE_CHANCE: f32 = 0.3;

    /// Typing indicator dwell before a queued line starts
    pub const INDICATOR_MS: f64 = 1500.0;
    /// Pause between queued lines
    pub const LINE_GAP_MS: f64 = 2000.0;
    /// Settle after the last queued line completes
    pub const FINALE_SETTLE_MS: f64 = 500.0;
    /// Welcome text reveal delay after the settle
    pub const WELCOME_REVEAL_MS: f64 = 500.0;
    /// CTA row reveal delay after the welcome text
    pub const CTA_REVEAL_MS: f64 = 800.0;
    /// Delay before the click follow-up line
    pub const CLICK_FOLLOWUP_MS: f64 = 1500.0;
    /// Delay before the easter-egg response gives the floor back
    pub const EASTER_RESTORE_MS: f64 = 3000.0;

    /// Easter egg input ring capacity
    pub const EASTER_BUFFER_LEN: usize = 10;
    /// Avatar glitch pulse duration
    pub const GLITCH_MS: f64 = 500.0;

    /// Cursor ripple: trigger radius, grown size (px), fade duration
    pub const RIPPLE_RADIUS: f32 = 150.0;
    pub const RIPPLE_SIZE_PX: f32 = 180.0;
    pub const RIPPLE_FADE_MS: f64 = 500.0;

    /// Eye blink: arm delay after load, uniform gap range, squash duration
    pub const BLINK_ARM_MS: f64 = 8000.0;
    pub const BLINK_GAP_MIN_MS: f64 = 4000.0;
    pub const BLINK_GAP_SPAN_MS: f64 = 6000.0;
    pub const BLINK_HOLD_MS: f64 = 150.0;
}
